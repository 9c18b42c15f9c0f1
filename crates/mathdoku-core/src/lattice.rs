//! Cell lattice and internal-border representation.
//!
//! Per the design note on replacing tuple-keyed maps with dense arrays,
//! border "thickness" is stored as two flat `Vec<bool>` grids rather than a
//! `HashMap<(r,c), bool>` — cheaper and allocation-free once sized.

use serde::{Deserialize, Serialize};

/// A cell coordinate, `0 <= r,c < n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId {
    pub r: usize,
    pub c: usize,
}

impl CellId {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }
}

/// The grid-local pixel positions of the N+1 horizontal and N+1 vertical
/// lattice lines, plus the grid size they imply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lattice {
    pub n: usize,
    pub h: Vec<i32>,
    pub v: Vec<i32>,
}

impl Lattice {
    /// Validate and construct a lattice. Checks strictly-increasing
    /// coordinates, non-negative origins, containment within the bounding
    /// box, and the minimum 10px-per-cell spacing both axes require.
    pub fn new(n: usize, h: Vec<i32>, v: Vec<i32>, bbox_h: i32, bbox_w: i32) -> Option<Self> {
        if n < 4 || n > 9 {
            return None;
        }
        if h.len() != n + 1 || v.len() != n + 1 {
            return None;
        }
        if !is_strictly_increasing(&h) || !is_strictly_increasing(&v) {
            return None;
        }
        if h[0] < 0 || v[0] < 0 {
            return None;
        }
        if *h.last().unwrap() > bbox_h || *v.last().unwrap() > bbox_w {
            return None;
        }
        let h_spacing = (h[n] - h[0]) as f32 / n as f32;
        let v_spacing = (v[n] - v[0]) as f32 / n as f32;
        if h_spacing < 10.0 || v_spacing < 10.0 {
            return None;
        }
        Some(Self { n, h, v })
    }

    pub fn cell_height(&self, r: usize) -> i32 {
        self.h[r + 1] - self.h[r]
    }

    pub fn cell_width(&self, c: usize) -> i32 {
        self.v[c + 1] - self.v[c]
    }
}

fn is_strictly_increasing(values: &[i32]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}

/// Dense thick/thin flags for every internal border of an `n x n` grid.
///
/// `h_thick[r][c]` separates row `r-1` from row `r` in column `c`
/// (`1 <= r <= n-1`). `v_thick[r][c]` separates column `c-1` from column `c`
/// in row `r` (`1 <= c <= n-1`). Both are stored flat, row-major, sized
/// `(n-1) x n` and `n x (n-1)` respectively.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BorderMap {
    pub n: usize,
    h_thick: Vec<bool>,
    v_thick: Vec<bool>,
}

impl BorderMap {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            h_thick: vec![false; (n - 1) * n],
            v_thick: vec![false; n * (n - 1)],
        }
    }

    /// `r` in `1..=n-1`, `c` in `0..n`: the border between row `r-1` and row `r`.
    pub fn h_get(&self, r: usize, c: usize) -> bool {
        if r == 0 || r > self.n - 1 {
            return true;
        }
        self.h_thick[(r - 1) * self.n + c]
    }

    pub fn h_set(&mut self, r: usize, c: usize, thick: bool) {
        self.h_thick[(r - 1) * self.n + c] = thick;
    }

    /// `r` in `0..n`, `c` in `1..=n-1`: the border between column `c-1` and column `c`.
    pub fn v_get(&self, r: usize, c: usize) -> bool {
        if c == 0 || c > self.n - 1 {
            return true;
        }
        self.v_thick[r * (self.n - 1) + (c - 1)]
    }

    pub fn v_set(&mut self, r: usize, c: usize, thick: bool) {
        self.v_thick[r * (self.n - 1) + (c - 1)] = thick;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_rejects_non_increasing_lines() {
        let h = vec![0, 10, 10, 30, 40];
        let v = vec![0, 10, 20, 30, 40];
        assert!(Lattice::new(4, h, v, 100, 100).is_none());
    }

    #[test]
    fn lattice_accepts_evenly_spaced_lines() {
        let h = vec![0, 25, 50, 75, 100];
        let v = vec![0, 25, 50, 75, 100];
        let lattice = Lattice::new(4, h, v, 100, 100).unwrap();
        assert_eq!(lattice.cell_height(0), 25);
        assert_eq!(lattice.cell_width(3), 25);
    }

    #[test]
    fn lattice_rejects_undersized_spacing() {
        let h = vec![0, 2, 4, 6, 8];
        let v = vec![0, 2, 4, 6, 8];
        assert!(Lattice::new(4, h, v, 8, 8).is_none());
    }

    #[test]
    fn border_map_defaults_to_thin_inside_and_thick_at_edges() {
        let map = BorderMap::new(4);
        assert!(!map.h_get(1, 0));
        assert!(map.h_get(0, 0));
        assert!(map.v_get(0, 0));
    }

    #[test]
    fn border_map_round_trips_set_get() {
        let mut map = BorderMap::new(4);
        map.h_set(2, 1, true);
        map.v_set(1, 2, true);
        assert!(map.h_get(2, 1));
        assert!(map.v_get(1, 2));
        assert!(!map.h_get(1, 1));
    }
}
