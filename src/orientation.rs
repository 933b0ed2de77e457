//! Canonical-orientation detection and rotation.

use tracing::instrument;

use crate::detection::{BullseyeBounds, BullseyeDetector};
use crate::matrix::Matrix;

const CANONICAL: [[u8; 3]; 4] = [[1, 1, 1], [0, 1, 1], [1, 0, 0], [0, 0, 0]];

/// Reads the four corner triples around the bull's-eye and rotates the
/// matrix into canonical orientation.
pub struct OrientationManager {
    matrix: Matrix,
    bounds: BullseyeBounds,
}

impl OrientationManager {
    pub fn new(matrix: Matrix, bounds: BullseyeBounds) -> Self {
        OrientationManager { matrix, bounds }
    }

    fn read_patterns(matrix: &Matrix, bounds: BullseyeBounds) -> [[u8; 3]; 4] {
        let (tl_y, tl_x, br_y, br_x) = bounds;
        let (tr_y, tr_x, bl_y, bl_x) = (tl_y, br_x, br_y, tl_x);

        let g = |r: isize, c: isize| matrix.get(r, c).unwrap_or(0);

        let top_left = [g(tl_y, tl_x - 1), g(tl_y - 1, tl_x - 1), g(tl_y - 1, tl_x)];
        let top_right = [g(tr_y - 1, tr_x), g(tr_y - 1, tr_x + 1), g(tr_y, tr_x + 1)];
        let bottom_right = [g(br_y, br_x + 1), g(br_y + 1, br_x + 1), g(br_y + 1, br_x)];
        let bottom_left = [g(bl_y + 1, bl_x), g(bl_y + 1, bl_x - 1), g(bl_y, bl_x - 1)];

        [top_left, top_right, bottom_right, bottom_left]
    }

    fn needs_rotation(patterns: &[[u8; 3]; 4]) -> bool {
        *patterns != CANONICAL
    }

    /// Rotates the matrix clockwise up to three times until the canonical
    /// corner pattern is reached, returning it unchanged if never reached.
    #[instrument(skip(self))]
    pub fn rotate_if_needed(mut self) -> Matrix {
        for attempt in 0..4 {
            let patterns = Self::read_patterns(&self.matrix, self.bounds);
            if !Self::needs_rotation(&patterns) {
                tracing::debug!(attempt, "matrix already canonical");
                return self.matrix;
            }
            if attempt == 3 {
                tracing::debug!("no rotation reached canonical orientation");
                return self.matrix;
            }
            self.matrix = self.matrix.rotate_cw();
            self.bounds = BullseyeDetector::detect(&self.matrix)
                .map(|d| d.bounds())
                .unwrap_or(self.bounds);
        }
        self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical_matrix() -> Matrix {
        // N = 7, bull's-eye bounds (1,1,5,5), corner triples matching CANONICAL.
        let n = 7;
        let mut cells = vec![vec![0u8; n]; n];
        // top-left: (1,0)=1 (1,0)? per read_patterns: g(tl_y,tl_x-1), g(tl_y-1,tl_x-1), g(tl_y-1,tl_x)
        cells[1][0] = 1;
        cells[0][0] = 1;
        cells[0][1] = 1;
        // top-right: g(tr_y-1,tr_x)=g(0,5), g(tr_y-1,tr_x+1)=g(0,6), g(tr_y,tr_x+1)=g(1,6)
        cells[0][5] = 0;
        cells[0][6] = 1;
        cells[1][6] = 1;
        // bottom-right: g(5,6)=1, g(6,6)=0, g(6,5)=0
        cells[5][6] = 1;
        cells[6][6] = 0;
        cells[6][5] = 0;
        // bottom-left: g(6,1)=0, g(6,0)=0, g(5,0)=0
        cells[6][1] = 0;
        cells[6][0] = 0;
        cells[5][0] = 0;
        Matrix::new(cells).unwrap()
    }

    #[test]
    fn canonical_matrix_is_unchanged() {
        let m = canonical_matrix();
        let bounds = (1isize, 1isize, 5isize, 5isize);
        let mgr = OrientationManager::new(m.clone(), bounds);
        let patterns = OrientationManager::read_patterns(&m, bounds);
        assert!(!OrientationManager::needs_rotation(&patterns));
        let result = mgr.rotate_if_needed();
        assert_eq!(result, m);
    }
}
