//! The sampled binary module matrix that is the decoder's sole input.

use crate::error::{AztecDecoderError, Result};

/// A square binary (0/1) grid of modules, 1 meaning "dark".
///
/// Coordinates are `(row, col)` from the top-left, matching
/// `original_source/aztec_decoder/matrix.py`'s `module_matrix[y, x]` layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    cells: Vec<Vec<u8>>,
    n: usize,
}

impl Matrix {
    /// Build a matrix from a square grid of 0/1 values.
    ///
    /// # Errors
    /// Returns [`AztecDecoderError::InvalidParameter`] if `cells` is not
    /// square or its side length is even.
    ///
    /// The 15-151 module side-length range a real Aztec symbol falls in is
    /// not enforced here: it constrains what a scanner ought to hand in, not
    /// the shape of a matrix as a data structure.
    pub fn new(cells: Vec<Vec<u8>>) -> Result<Self> {
        let n = cells.len();
        if n == 0 || cells.iter().any(|row| row.len() != n) {
            return Err(AztecDecoderError::InvalidParameter {
                message: "matrix must be a square 2-D array".to_string(),
            });
        }
        if n % 2 == 0 {
            return Err(AztecDecoderError::InvalidParameter {
                message: "Aztec symbol side length must be odd".to_string(),
            });
        }
        Ok(Matrix { cells, n })
    }

    /// Side length `N` of the square matrix.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Value of the cell at `(row, col)`, or `None` if out of bounds.
    pub fn get(&self, row: isize, col: isize) -> Option<u8> {
        if row < 0 || col < 0 {
            return None;
        }
        self.cells
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
    }

    /// Rotate the matrix 90 degrees clockwise, returning a new matrix.
    pub fn rotate_cw(&self) -> Matrix {
        let n = self.n;
        let mut cells = vec![vec![0u8; n]; n];
        for r in 0..n {
            for c in 0..n {
                cells[c][n - 1 - r] = self.cells[r][c];
            }
        }
        Matrix { cells, n }
    }
}
