//! Groups cells into cages: cells connected through a thin border end up in
//! the same cage.

use std::collections::BTreeMap;

use mathdoku_core::lattice::BorderMap;
use mathdoku_core::CellId;

use crate::union_find::UnionFind;

pub struct CageBuilder;

impl CageBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Union each cell with its right/bottom neighbor whenever the shared
    /// border is thin, then group by root. Any missing border entry is
    /// treated as thick (defensive — `BorderMap` already defaults its
    /// out-of-range reads to thick).
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, borders)))]
    pub fn build(&self, n: usize, borders: &BorderMap) -> Vec<Vec<CellId>> {
        let index = |r: usize, c: usize| r * n + c;
        let mut uf = UnionFind::new(n * n);

        for r in 0..n {
            for c in 0..n {
                if c + 1 < n && !borders.v_get(r, c + 1) {
                    uf.union(index(r, c), index(r, c + 1));
                }
                if r + 1 < n && !borders.h_get(r + 1, c) {
                    uf.union(index(r, c), index(r + 1, c));
                }
            }
        }

        let mut groups: BTreeMap<usize, Vec<CellId>> = BTreeMap::new();
        for r in 0..n {
            for c in 0..n {
                let root = uf.find(index(r, c));
                groups.entry(root).or_default().push(CellId::new(r, c));
            }
        }

        let mut cages: Vec<Vec<CellId>> = groups.into_values().collect();
        for cage in cages.iter_mut() {
            cage.sort();
        }
        cages.sort_by_key(|cage| cage[0]);
        cages
    }
}

impl Default for CageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_thick_borders_yield_singleton_cages() {
        let n = 3;
        let borders = BorderMap::new(n);
        let mut all_thick = borders;
        for r in 1..n {
            for c in 0..n {
                all_thick.h_set(r, c, true);
            }
        }
        for r in 0..n {
            for c in 1..n {
                all_thick.v_set(r, c, true);
            }
        }
        let cages = CageBuilder::new().build(n, &all_thick);
        assert_eq!(cages.len(), n * n);
        assert!(cages.iter().all(|cage| cage.len() == 1));
    }

    #[test]
    fn all_thin_borders_yield_one_whole_grid_cage() {
        let n = 3;
        let borders = BorderMap::new(n);
        let cages = CageBuilder::new().build(n, &borders);
        assert_eq!(cages.len(), 1);
        assert_eq!(cages[0].len(), n * n);
    }

    #[test]
    fn cages_partition_every_cell_exactly_once() {
        let n = 4;
        let mut borders = BorderMap::new(n);
        borders.v_set(0, 2, true);
        borders.h_set(2, 0, true);
        borders.h_set(2, 1, true);
        let cages = CageBuilder::new().build(n, &borders);
        let mut seen = std::collections::HashSet::new();
        for cage in &cages {
            for cell in cage {
                assert!(seen.insert(*cell), "cell {:?} appeared in more than one cage", cell);
            }
        }
        assert_eq!(seen.len(), n * n);
    }
}
