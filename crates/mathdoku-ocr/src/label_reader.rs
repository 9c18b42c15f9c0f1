//! Orchestrates label region extraction, trimming, OCR preparation, voting,
//! and post-recognition correction into the per-cage `(value, operator?)`
//! pairs the pipeline emits.

use mathdoku_core::lattice::CellId;
use mathdoku_core::{CageValue, GrayImage, GridBBox, Lattice, Operator};

use crate::corrections::{
    classify_component_shape, correct_zero_value, isolate_trailing_component, operators_shown, trailing_digit_to_plus,
};
use crate::engine::OcrEngine;
use crate::label_region::{extract_label_crop_with_margin, top_left_cell};
use crate::params::{operator_configs, vote_configs, LabelReaderParams};
use crate::prepare::prepare_for_ocr;
use crate::trim::trim_to_text;
use crate::voting::{clean_ocr_text, parse_label, select_vote, ParsedLabel};

/// A cage's recognized label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CageLabel {
    pub value: CageValue,
    pub operator: Option<Operator>,
}

pub struct LabelReader<'a> {
    params: LabelReaderParams,
    engine: &'a dyn OcrEngine,
}

impl<'a> LabelReader<'a> {
    pub fn new(params: LabelReaderParams, engine: &'a dyn OcrEngine) -> Self {
        Self { params, engine }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, image, lattice, cages)))]
    pub fn read_labels(
        &self,
        image: &GrayImage,
        bbox: &GridBBox,
        lattice: &Lattice,
        cages: &[Vec<CellId>],
    ) -> Vec<CageLabel> {
        let base_crop = image.crop(bbox.x as usize, bbox.y as usize, bbox.w as usize, bbox.h as usize);

        let min_cell = (0..lattice.n)
            .map(|i| lattice.cell_height(i).min(lattice.cell_width(i)))
            .min()
            .unwrap_or(i32::MAX);

        let (working_crop, working_lattice) = if min_cell > 0 && min_cell < self.params.small_cell_threshold_px as i32 {
            let factor = 2.max((self.params.small_cell_threshold_px as f32 / min_cell as f32).floor() as usize + 1);
            log::debug!("pre-upscaling grid by factor {factor} (min cell {min_cell}px)");
            (base_crop.resize_cubic(factor), scale_lattice(lattice, factor as i32))
        } else {
            (base_crop.clone(), lattice.clone())
        };

        let mut raw: Vec<ParsedLabel> = cages
            .iter()
            .map(|cage| self.recognize_cage(&working_crop, &working_lattice, cage))
            .collect();

        // Post-processing pass 1: two-digit readings get one retry at a
        // higher individual upscale before the operator-recovery pass runs.
        for (cage, reading) in cages.iter().zip(raw.iter_mut()) {
            if reading.digits.len() == 2 {
                if let Some(better) = self.retry_two_digit(&working_crop, &working_lattice, cage, reading) {
                    *reading = better;
                }
            }
        }

        let multi_cell_with_op = cages
            .iter()
            .zip(raw.iter())
            .filter(|(cage, r)| cage.len() > 1 && matches!(r.op, Some(c) if c != '?'))
            .count();
        let multi_cell_without_op = cages.iter().filter(|cage| cage.len() > 1).count() - multi_cell_with_op;
        let shown = operators_shown(multi_cell_with_op, multi_cell_without_op);

        if shown {
            for (cage, reading) in cages.iter().zip(raw.iter_mut()) {
                if cage.len() <= 1 {
                    continue;
                }
                if matches!(reading.op, Some(c) if c != '?') {
                    continue;
                }
                self.recover_operator(&working_crop, &working_lattice, cage, reading);
            }
        }

        raw.into_iter()
            .map(|reading| {
                let digits = correct_zero_value(&reading.digits);
                let operator = reading.op.and_then(Operator::from_char);
                CageLabel {
                    value: CageValue::from_digits(&digits),
                    operator,
                }
            })
            .collect()
    }

    fn recognize_cage(&self, grid_crop: &GrayImage, lattice: &Lattice, cage: &[CellId]) -> ParsedLabel {
        let cell = top_left_cell(cage);
        let margin = dynamic_label_margin(lattice.cell_width(cell.c), lattice.cell_height(cell.r));
        let crop = extract_label_crop_with_margin(grid_crop, lattice, cell, margin, &self.params);
        self.ocr_crop(&crop, &vote_configs())
            .unwrap_or(ParsedLabel { digits: "?".to_string(), op: None })
    }

    /// Run every config in `configs` through trim+prepare+the OCR engine and
    /// vote over the successful parses.
    fn ocr_crop(&self, crop: &GrayImage, configs: &[crate::params::OcrConfig]) -> Option<ParsedLabel> {
        let trimmed = trim_to_text(crop, &self.params);
        let prepared = prepare_for_ocr(&trimmed, &self.params);

        let parses: Vec<ParsedLabel> = configs
            .iter()
            .filter_map(|cfg| self.engine.recognize(&prepared, cfg).ok())
            .map(|raw| clean_ocr_text(&raw))
            .filter_map(|cleaned| parse_label(&cleaned))
            .collect();

        select_vote(&parses)
    }

    fn retry_two_digit(
        &self,
        grid_crop: &GrayImage,
        lattice: &Lattice,
        cage: &[CellId],
        current: &ParsedLabel,
    ) -> Option<ParsedLabel> {
        let cell = top_left_cell(cage);
        let margin = dynamic_label_margin(lattice.cell_width(cell.c), lattice.cell_height(cell.r));
        let crop = extract_label_crop_with_margin(grid_crop, lattice, cell, margin, &self.params);

        for &factor in &self.params.retry_upscales {
            let upscaled = crop.resize_cubic(factor);
            if let Some(candidate) = self.ocr_crop(&upscaled, &vote_configs()) {
                let op_compatible = match (current.op, candidate.op) {
                    (None, _) | (_, None) => true,
                    (Some(a), Some(b)) => a == b,
                };
                if candidate.digits.len() > current.digits.len() && op_compatible {
                    return Some(candidate);
                }
            }
        }
        None
    }

    fn recover_operator(&self, grid_crop: &GrayImage, lattice: &Lattice, cage: &[CellId], reading: &mut ParsedLabel) {
        // Strategy 1: trailing 0/4 misread as a round/cross `+` glyph.
        if let Some(stripped) = trailing_digit_to_plus(&reading.digits) {
            reading.digits = stripped;
            reading.op = Some('+');
            return;
        }

        let cell = top_left_cell(cage);

        // Strategy 2: retry at higher individual upscales and larger margins.
        for &factor in &self.params.recovery_upscales {
            for &margin in &self.params.recovery_margins {
                let crop = extract_label_crop_with_margin(grid_crop, lattice, cell, margin, &self.params);
                let upscaled = crop.resize_cubic(factor);
                if let Some(candidate) = self.ocr_crop(&upscaled, &vote_configs()) {
                    let real_op = matches!(candidate.op, Some(c) if c != '?');
                    let digits_ok = candidate.digits.len() >= reading.digits.len() || candidate.digits == reading.digits;
                    if real_op && digits_ok {
                        *reading = candidate;
                        return;
                    }
                }
            }
        }

        // Strategy 3: isolate the rightmost glyph and classify it directly.
        let margin = dynamic_label_margin(lattice.cell_width(cell.c), lattice.cell_height(cell.r));
        let crop = extract_label_crop_with_margin(grid_crop, lattice, cell, margin, &self.params);
        let trimmed = trim_to_text(&crop, &self.params);
        if let Some(component) = isolate_trailing_component(
            &trimmed,
            self.params.trim_threshold,
            self.params.trailing_component_min_width_fraction,
            self.params.trailing_component_max_area_fraction,
        ) {
            let prepared = prepare_for_ocr(&component, &self.params);
            if let Some(op_reading) = self.ocr_crop(&prepared, &operator_configs()) {
                if let Some(op) = op_reading.op.filter(|&c| c != '?') {
                    reading.op = Some(op);
                    return;
                }
            }
            if let Some(op) = classify_component_shape(&component, self.params.trim_threshold) {
                reading.op = Some(op);
                return;
            }
        }

        reading.op = Some('?');
    }
}

/// First-pass label-crop margin: 3% of the cage cell's shorter span, floored
/// at 3px so tiny cells still get some inset.
fn dynamic_label_margin(cell_w: i32, cell_h: i32) -> u32 {
    let span = cell_w.min(cell_h).max(0) as f32;
    ((span * 0.03) as u32).max(3)
}

fn scale_lattice(lattice: &Lattice, factor: i32) -> Lattice {
    Lattice {
        n: lattice.n,
        h: lattice.h.iter().map(|v| v * factor).collect(),
        v: lattice.v.iter().map(|v| v * factor).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OcrError;
    use crate::params::OcrConfig;

    struct StubEngine {
        response: String,
    }

    impl OcrEngine for StubEngine {
        fn recognize(&self, _image: &GrayImage, _config: &OcrConfig) -> Result<String, OcrError> {
            Ok(self.response.clone())
        }
    }

    fn uniform_lattice(n: usize, cell: i32) -> Lattice {
        let lines: Vec<i32> = (0..=n as i32).map(|k| k * cell).collect();
        Lattice::new(n, lines.clone(), lines, cell * n as i32, cell * n as i32).unwrap()
    }

    #[test]
    fn reads_a_simple_single_cell_value() {
        let engine = StubEngine { response: "9".to_string() };
        let reader = LabelReader::new(LabelReaderParams::default(), &engine);
        let image = GrayImage::new(100, 100);
        let bbox = GridBBox::new(0, 0, 100, 100);
        let lattice = uniform_lattice(4, 25);
        let cages = vec![vec![CellId::new(0, 0)]];
        let labels = reader.read_labels(&image, &bbox, &lattice, &cages);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].value, CageValue::Known(9));
    }

    #[test]
    fn zero_reading_is_corrected_to_nine() {
        let engine = StubEngine { response: "0".to_string() };
        let reader = LabelReader::new(LabelReaderParams::default(), &engine);
        let image = GrayImage::new(100, 100);
        let bbox = GridBBox::new(0, 0, 100, 100);
        let lattice = uniform_lattice(4, 25);
        let cages = vec![vec![CellId::new(0, 0)]];
        let labels = reader.read_labels(&image, &bbox, &lattice, &cages);
        assert_eq!(labels[0].value, CageValue::Known(9));
    }
}
