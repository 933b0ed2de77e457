//! Mode-message reading: layer count and data-word count, RS-corrected
//! over GF(2^4).

use tracing::instrument;

use crate::detection::BullseyeBounds;
use crate::enums::AztecType;
use crate::error::{AztecDecoderError, Result};
use crate::gf::GaloisField;
use crate::matrix::Matrix;
use crate::reed_solomon::ReedSolomonDecoder;

/// GF(2^4) primitive polynomial used for the mode message, `x^4 + x + 1`.
const MODE_PRIM_POLY: u32 = 0x13;

/// Decoded and corrected contents of the mode message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeFields {
    /// Number of data layers (1-4 compact, 1-32 full), as encoded in the
    /// mode message (not the bull's-eye-derived layer count).
    pub layers: u32,
    /// Number of data codewords carried by the symbol.
    pub data_words: u32,
}

/// Reads and RS-corrects the mode ring around the bull's-eye.
pub struct ModeReader<'a> {
    matrix: &'a Matrix,
    bounds: BullseyeBounds,
    aztec_type: AztecType,
    auto_correct: bool,
}

impl<'a> ModeReader<'a> {
    pub fn new(matrix: &'a Matrix, bounds: BullseyeBounds, aztec_type: AztecType) -> Self {
        ModeReader {
            matrix,
            bounds,
            aztec_type,
            auto_correct: true,
        }
    }

    /// Overrides whether the mode message is Reed-Solomon corrected before
    /// its fields are extracted. Defaults to `true`.
    pub fn with_auto_correct(mut self, auto_correct: bool) -> Self {
        self.auto_correct = auto_correct;
        self
    }

    /// Reads one mode-ring cell, failing with [`AztecDecoderError::ModeField`]
    /// if the index falls outside the matrix.
    fn read_cell(&self, r: isize, c: isize) -> Result<u8> {
        self.matrix.get(r, c).ok_or_else(|| AztecDecoderError::ModeField {
            message: format!("mode ring index ({r}, {c}) outside matrix"),
        })
    }

    /// Reads the raw mode-ring bits in ring order, excluding the two corner
    /// cells reserved for the orientation marks on each side, and skipping
    /// the single reference-grid bit present at offset 5 of each side on
    /// full symbols.
    ///
    /// # Errors
    /// [`AztecDecoderError::ModeField`] if the ring geometry walks outside
    /// the matrix.
    fn raw_bits(&self) -> Result<Vec<u8>> {
        let (top, left, bottom, right) = self.bounds;
        let mut bits = Vec::new();

        let skip_offset: Option<usize> = match self.aztec_type {
            AztecType::Full => Some(5),
            AztecType::Compact => None,
        };

        let side = |bits: &mut Vec<u8>, mut raw: Vec<u8>| {
            if let Some(off) = skip_offset {
                if off < raw.len() {
                    raw.remove(off);
                }
            }
            bits.extend(raw);
        };

        // Top side, left to right, one row above the bull's-eye, corners excluded.
        let mut top_row = Vec::new();
        for c in (left + 1)..=(right - 1) {
            top_row.push(self.read_cell(top - 1, c)?);
        }
        side(&mut bits, top_row);

        // Right side, top to bottom, one column right of the bull's-eye.
        let mut right_col = Vec::new();
        for r in (top + 1)..=(bottom - 1) {
            right_col.push(self.read_cell(r, right + 1)?);
        }
        side(&mut bits, right_col);

        // Bottom side, right to left, one row below the bull's-eye.
        let mut bottom_row = Vec::new();
        for c in ((left + 1)..=(right - 1)).rev() {
            bottom_row.push(self.read_cell(bottom + 1, c)?);
        }
        side(&mut bits, bottom_row);

        // Left side, bottom to top, one column left of the bull's-eye.
        let mut left_col = Vec::new();
        for r in ((top + 1)..=(bottom - 1)).rev() {
            left_col.push(self.read_cell(r, left - 1)?);
        }
        side(&mut bits, left_col);

        Ok(bits)
    }

    /// Reads, RS-corrects and decodes the mode message.
    ///
    /// # Errors
    /// [`AztecDecoderError::ModeField`] if the mode ring cannot be
    /// RS-corrected or decodes to an out-of-range layer count.
    #[instrument(skip(self))]
    pub fn read(&self) -> Result<ModeFields> {
        let raw_bits = self.raw_bits()?;
        let nsym = match self.aztec_type {
            AztecType::Compact => 5,
            AztecType::Full => 6,
        };

        let symbols: Vec<u32> = raw_bits
            .chunks(4)
            .map(|chunk| chunk.iter().fold(0u32, |acc, &b| (acc << 1) | b as u32))
            .collect();

        let data_symbols = symbols.len().checked_sub(nsym).ok_or_else(|| AztecDecoderError::ModeField {
            message: format!(
                "mode ring produced {} symbols, fewer than the {nsym} ecc symbols required",
                symbols.len()
            ),
        })?;
        let corrected_symbols = if self.auto_correct {
            let gf = GaloisField::new(MODE_PRIM_POLY, 4);
            let rs = ReedSolomonDecoder::new(gf, 1, 2, nsym);
            rs.correct(&symbols).map_err(|_| AztecDecoderError::ModeField {
                message: "mode message failed Reed-Solomon correction".to_string(),
            })?
        } else {
            symbols
        };

        let mut value: u32 = 0;
        for &sym in &corrected_symbols[..data_symbols] {
            value = (value << 4) | sym;
        }

        let (layers_bits, words_bits): (u32, u32) = match self.aztec_type {
            AztecType::Compact => (2, 6),
            AztecType::Full => (5, 11),
        };
        let words_mask = (1u32 << words_bits) - 1;
        let data_words_raw = value & words_mask;
        let layers_raw = (value >> words_bits) & ((1u32 << layers_bits) - 1);

        let layers = layers_raw + 1;
        let data_words = data_words_raw + 1;

        if layers == 0 || layers > 32 {
            return Err(AztecDecoderError::ModeField {
                message: format!("decoded layer count {layers} out of range"),
            });
        }

        tracing::debug!(layers, data_words, "mode message decoded");
        Ok(ModeFields { layers, data_words })
    }
}
