//! Spiral traversal of the data region and Reed-Solomon correction of the
//! resulting code words.

use tracing::instrument;

use crate::enums::{AztecType, ReadingDirection};
use crate::error::{AztecDecoderError, Result};
use crate::gf::GaloisField;
use crate::matrix::Matrix;
use crate::reed_solomon::ReedSolomonDecoder;

/// Primitive polynomial for each supported code-word size.
fn prim_poly(cw_size: u32) -> u32 {
    match cw_size {
        6 => 0x43,
        8 => 0x12d,
        10 => 0x409,
        12 => 0x1069,
        _ => unreachable!("unsupported code-word size {cw_size}"),
    }
}

/// Code-word bit width for a given data-layer count, per the Aztec Code
/// layer-count table.
pub fn codeword_size(layers: u32) -> u32 {
    if layers <= 2 {
        6
    } else if layers <= 8 {
        8
    } else if layers <= 22 {
        10
    } else {
        12
    }
}

/// Reads the data spiral and Reed-Solomon corrects it into a clean bit
/// stream, following the domino/spiral traversal used by Aztec symbols.
pub struct CodewordReader<'a> {
    matrix: &'a Matrix,
    layers: u32,
    data_words: u32,
    aztec_type: AztecType,
}

impl<'a> CodewordReader<'a> {
    pub fn new(matrix: &'a Matrix, layers: u32, data_words: u32, aztec_type: AztecType) -> Self {
        CodewordReader {
            matrix,
            layers,
            data_words,
            aztec_type,
        }
    }

    fn is_reference(&self, r: isize, c: isize) -> bool {
        let centre = self.matrix.size() as isize / 2;
        (r - centre) % 16 == 0 || (c - centre) % 16 == 0
    }

    /// Reads one matrix cell, failing with [`AztecDecoderError::BitRead`] if
    /// the spiral geometry walked outside the matrix.
    fn read_cell(&self, r: isize, c: isize) -> Result<u8> {
        self.matrix.get(r, c).ok_or_else(|| AztecDecoderError::BitRead {
            message: format!("spiral traversal index ({r}, {c}) outside matrix"),
        })
    }

    /// Walks the spiral in Bottom -> Right -> Top -> Left order, skipping
    /// reference-grid rows/columns on full symbols, and returns the raw bit
    /// stream in traversal order.
    ///
    /// # Errors
    /// [`AztecDecoderError::BitRead`] if the traversal computes an
    /// out-of-matrix index.
    #[instrument(skip(self))]
    pub fn read_bits(&self) -> Result<Vec<u8>> {
        let mut bitmap = Vec::new();
        let mut square_size = self.matrix.size() as isize;
        let mut direction = ReadingDirection::Bottom;
        let mut start: (isize, isize) = (0, 0);
        let mut end: (isize, isize) = (square_size - 1 - 2, 1);
        let mut apply_to_borns: isize = 0;

        for _ in 0..(self.layers as isize * 4) {
            for i in apply_to_borns..(square_size - 2 + apply_to_borns) {
                match direction {
                    ReadingDirection::Bottom => {
                        if self.aztec_type == AztecType::Compact || !self.is_reference(i, start.1) {
                            for c in start.1..=end.1 {
                                bitmap.push(self.read_cell(i, c)?);
                            }
                        }
                    }
                    ReadingDirection::Right => {
                        if self.aztec_type == AztecType::Compact || !self.is_reference(start.0, i) {
                            let mut r = start.0;
                            while r > end.0 {
                                bitmap.push(self.read_cell(r, i)?);
                                r -= 1;
                            }
                        }
                    }
                    ReadingDirection::Top => {
                        let row = start.0 - i + apply_to_borns;
                        if self.aztec_type == AztecType::Compact || !self.is_reference(row, start.1) {
                            let mut c = start.1;
                            while c > end.1 {
                                bitmap.push(self.read_cell(row, c)?);
                                c -= 1;
                            }
                        }
                    }
                    ReadingDirection::Left => {
                        let col = start.1 - i + apply_to_borns;
                        if self.aztec_type == AztecType::Compact || !self.is_reference(start.0, col) {
                            for r in start.0..=end.0 {
                                bitmap.push(self.read_cell(r, col)?);
                            }
                        }
                    }
                }
            }

            match direction {
                ReadingDirection::Bottom => {
                    start = (start.0 + square_size - 1, start.1);
                    end = (start.0 - 1, start.1 + square_size - 1 - 2);
                    direction = ReadingDirection::Right;
                }
                ReadingDirection::Right => {
                    start = (start.0, start.1 + square_size - 1);
                    end = (start.0 - square_size + 1 + 2, start.1 - 1);
                    direction = ReadingDirection::Top;
                }
                ReadingDirection::Top => {
                    start = (start.0 - square_size + 1, start.1);
                    end = (start.0 + 1, start.1 - square_size + 1 + 2);
                    direction = ReadingDirection::Left;
                }
                ReadingDirection::Left => {
                    square_size -= 4;
                    apply_to_borns += 2;
                    start = (end.0 + 1, end.1);
                    if self.is_reference(start.0, start.1) {
                        start = (start.0 + 1, start.1 + 1);
                        square_size -= 2;
                        apply_to_borns += 1;
                    }
                    end = (start.0 + square_size - 1 - 2, start.1 + 1);
                    direction = ReadingDirection::Bottom;
                }
            }
        }

        Ok(bitmap)
    }

    /// Groups the raw bit stream into code words and Reed-Solomon corrects
    /// them, returning the corrected bit stream MSB-first.
    ///
    /// # Errors
    /// [`AztecDecoderError::BitRead`] if the spiral traversal walked outside
    /// the matrix, or [`AztecDecoderError::ReedSolomon`] if the code words
    /// cannot be corrected.
    pub fn corrected_bits(&self) -> Result<Vec<u8>> {
        let bits = self.read_bits()?;
        let cw_size = codeword_size(self.layers);

        let total_words = bits.len() / cw_size as usize;
        let symbols: Vec<u32> = (0..total_words)
            .map(|i| {
                bits[i * cw_size as usize..(i + 1) * cw_size as usize]
                    .iter()
                    .fold(0u32, |acc, &b| (acc << 1) | b as u32)
            })
            .collect();

        let ecc_words = total_words.saturating_sub(self.data_words as usize);
        let gf = GaloisField::new(prim_poly(cw_size), cw_size);
        let rs = ReedSolomonDecoder::new(gf, 1, 2, ecc_words);
        let corrected = rs.correct(&symbols).map_err(|_| AztecDecoderError::ReedSolomon {
            message: "data code words failed Reed-Solomon correction".to_string(),
        })?;

        let mut corrected_bits = Vec::with_capacity(corrected.len() * cw_size as usize);
        for sym in corrected {
            for shift in (0..cw_size).rev() {
                corrected_bits.push(((sym >> shift) & 1) as u8);
            }
        }
        Ok(corrected_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codeword_size_follows_layer_table() {
        assert_eq!(codeword_size(1), 6);
        assert_eq!(codeword_size(2), 6);
        assert_eq!(codeword_size(3), 8);
        assert_eq!(codeword_size(8), 8);
        assert_eq!(codeword_size(9), 10);
        assert_eq!(codeword_size(22), 10);
        assert_eq!(codeword_size(23), 12);
    }

    #[test]
    fn compact_reads_every_row_without_reference_skip() {
        let n = 9;
        let mut rows = vec![vec![0u8; n]; n];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = ((r + c) % 2) as u8;
            }
        }
        let m = Matrix::new(rows).unwrap();
        let reader = CodewordReader::new(&m, 1, 1, AztecType::Compact);
        let bits = reader.read_bits().unwrap();
        assert!(!bits.is_empty());
    }
}
