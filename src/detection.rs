//! Bull's-eye localization and layer-count derivation.

use tracing::instrument;

use crate::enums::AztecType;
use crate::error::{AztecDecoderError, Result};
use crate::matrix::Matrix;

/// Outer bounds of the bull's-eye: `(top, left, bottom, right)`.
pub type BullseyeBounds = (isize, isize, isize, isize);

/// Locates the central concentric-rings pattern and derives the data-layer
/// count and symbol variant from it.
#[derive(Debug)]
pub struct BullseyeDetector {
    bounds: BullseyeBounds,
    layers: i32,
}

impl BullseyeDetector {
    /// Detects the bull's-eye in `matrix`.
    ///
    /// # Errors
    /// [`AztecDecoderError::BullseyeDetectionError`]-equivalent variant if no
    /// valid alternating ring exists around the center.
    #[instrument(skip(matrix))]
    pub fn detect(matrix: &Matrix) -> Result<Self> {
        let n = matrix.size() as isize;
        let cy = n / 2;
        let cx = n / 2;

        let mut layer: isize = 1;
        loop {
            let color = ((layer + 1) % 2) as u8;
            let mut valid = true;

            'check: for y in (cy - layer)..=(cy + layer) {
                if matrix.get(y, cx - layer) != Some(color) || matrix.get(y, cx + layer) != Some(color) {
                    valid = false;
                    break 'check;
                }
            }
            if valid {
                for x in (cx - layer)..=(cx + layer) {
                    if matrix.get(cy - layer, x) != Some(color) || matrix.get(cy + layer, x) != Some(color) {
                        valid = false;
                        break;
                    }
                }
            }

            if !valid {
                layer -= 1;
                break;
            }
            layer += 1;
        }

        if layer < 1 {
            return Err(AztecDecoderError::BullseyeDetection);
        }

        let bounds = (cy - layer, cx - layer, cy + layer, cx + layer);
        let layers = (layer - 2) as i32;
        tracing::debug!(?bounds, layers, "bullseye located");
        Ok(BullseyeDetector { bounds, layers })
    }

    /// `(top, left, bottom, right)` outer edge of the bull's-eye.
    pub fn bounds(&self) -> BullseyeBounds {
        self.bounds
    }

    /// Number of data layers derived from the bull's-eye ring count.
    pub fn layers(&self) -> i32 {
        self.layers
    }

    /// `Compact` when exactly two data layers were derived, otherwise `Full`.
    pub fn aztec_type(&self) -> AztecType {
        if self.layers == 2 {
            AztecType::Compact
        } else {
            AztecType::Full
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact_matrix() -> Matrix {
        // Ring colors must satisfy color == (layer + 1) % 2. With the grid
        // defaulting to 0, only ring 2 (expected color 1) needs painting;
        // rings 1 and 3 (expected color 0) are already right. Ring 4 is left
        // at the default 0 even though its expected color is 1, so the scan
        // stops there and backs off to layer 3. N = 9, center at (4,4).
        let n = 9;
        let mut cells = vec![vec![0u8; n]; n];
        let layer: isize = 2;
        let (cy, cx) = (4isize, 4isize);
        for y in (cy - layer)..=(cy + layer) {
            cells[y as usize][(cx - layer) as usize] = 1;
            cells[y as usize][(cx + layer) as usize] = 1;
        }
        for x in (cx - layer)..=(cx + layer) {
            cells[(cy - layer) as usize][x as usize] = 1;
            cells[(cy + layer) as usize][x as usize] = 1;
        }
        Matrix::new(cells).unwrap()
    }

    #[test]
    fn detects_compact_bullseye() {
        let m = compact_matrix();
        let det = BullseyeDetector::detect(&m).unwrap();
        assert_eq!(det.bounds(), (1, 1, 7, 7));
        assert_eq!(det.layers(), 1);
    }

    #[test]
    fn random_matrices_with_no_ring_always_fail() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x4154_5a45);
        for n in [9usize, 11, 13, 15] {
            for _ in 0..10 {
                let mut cells: Vec<Vec<u8>> = (0..n)
                    .map(|_| (0..n).map(|_| rng.random_range(0u8..2)).collect())
                    .collect();
                let centre = n / 2;
                // Force the two cells the layer-1 ring check inspects first
                // to disagree, so no alternating ring can ever be found
                // regardless of how the rest of the grid was filled.
                cells[centre][centre - 1] = 0;
                cells[centre][centre + 1] = 1;
                let m = Matrix::new(cells).unwrap();
                assert!(BullseyeDetector::detect(&m).is_err());
            }
        }
    }

    #[test]
    fn no_ring_is_an_error() {
        // All-dark grid: layer 1 expects color 0 (light), so the very first
        // ring check fails and the detector never gets past layer 0.
        let cells = vec![vec![1u8; 9]; 9];
        let m = Matrix::new(cells).unwrap();
        assert!(BullseyeDetector::detect(&m).is_err());
    }
}
