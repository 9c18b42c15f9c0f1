//! The canonical `PuzzleSpec` output document and the Assembler stage that
//! produces it.

use mathdoku_core::lattice::CellId;
use mathdoku_core::CageValue;
use mathdoku_ocr::CageLabel;
use serde::Serialize;

/// One cage in the emitted document: its cells as A1 references, its
/// recognized value, and its operator glyph if one was recovered.
#[derive(Clone, Debug, Serialize)]
pub struct CageOutput {
    pub cells: Vec<String>,
    pub value: CageValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<char>,
}

/// The full canonical puzzle description: ordered `size`,
/// `difficulty`, `operations`, `cages`.
#[derive(Clone, Debug, Serialize)]
pub struct PuzzleSpec {
    pub size: usize,
    pub difficulty: String,
    pub operations: bool,
    pub cages: Vec<CageOutput>,
}

/// Column letter `A..I` + row number `1..9` for a cell, per the glossary's
/// A1 reference convention.
pub fn cell_a1(cell: CellId) -> String {
    let column = (b'A' + cell.c as u8) as char;
    format!("{column}{}", cell.r + 1)
}

/// Emit the canonical spec from cage groupings and their recognized labels,
/// preserving CageBuilder's cage order.
pub fn assemble(n: usize, cages: &[Vec<CellId>], labels: &[CageLabel]) -> PuzzleSpec {
    let operations = labels.iter().any(|label| label.operator.is_some());

    let cage_outputs = cages
        .iter()
        .zip(labels)
        .map(|(cage, label)| CageOutput {
            cells: cage.iter().map(|&cell| cell_a1(cell)).collect(),
            value: label.value.clone(),
            op: label.operator.map(|op| op.to_char()),
        })
        .collect();

    PuzzleSpec {
        size: n,
        difficulty: "?".to_string(),
        operations,
        cages: cage_outputs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mathdoku_core::Operator;

    #[test]
    fn a1_reference_uses_column_letter_and_one_based_row() {
        assert_eq!(cell_a1(CellId::new(0, 0)), "A1");
        assert_eq!(cell_a1(CellId::new(3, 2)), "C4");
    }

    #[test]
    fn operations_true_iff_any_cage_has_an_operator() {
        let cages = vec![vec![CellId::new(0, 0)], vec![CellId::new(0, 1), CellId::new(1, 1)]];
        let labels = vec![
            CageLabel { value: CageValue::Known(3), operator: None },
            CageLabel { value: CageValue::Known(7), operator: Some(Operator::Plus) },
        ];
        let spec = assemble(4, &cages, &labels);
        assert!(spec.operations);
    }

    #[test]
    fn operations_true_for_a_singleton_cage_with_a_recovered_operator() {
        let cages = vec![vec![CellId::new(0, 0)]];
        let labels = vec![CageLabel { value: CageValue::Known(5), operator: Some(Operator::Minus) }];
        let spec = assemble(4, &cages, &labels);
        assert!(spec.operations);
    }

    #[test]
    fn operations_false_when_no_cage_has_an_operator() {
        let cages = vec![vec![CellId::new(0, 0)], vec![CellId::new(0, 1), CellId::new(1, 1)]];
        let labels = vec![
            CageLabel { value: CageValue::Known(3), operator: None },
            CageLabel { value: CageValue::Known(7), operator: None },
        ];
        let spec = assemble(4, &cages, &labels);
        assert!(!spec.operations);
    }
}
