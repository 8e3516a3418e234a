//! Black-border cell classification.
//!
//! Sheets drawn on a black background often separate frames with black
//! borders. A grid cell is accepted only if most of its outline is black.

use crate::sampler::PixelSampler;

/// Samples taken along each edge.
pub const SAMPLES_PER_EDGE: u32 = 8;

/// Percentage of samples that must be black for an edge to count.
pub const BLACK_EDGE_PERCENT: u32 = 60;

/// Black edges required for a cell to pass.
pub const REQUIRED_BLACK_EDGES: u32 = 3;

/// Decides whether a rectangular cell is enclosed by a black border.
#[derive(Debug, Clone, Copy)]
pub struct BorderClassifier<'a> {
    sampler: PixelSampler<'a>,
}

impl<'a> BorderClassifier<'a> {
    /// Creates a classifier using the sampler's black test.
    pub fn new(sampler: PixelSampler<'a>) -> Self {
        Self { sampler }
    }

    /// Whether at least three of the cell's four edges are mostly black.
    pub fn has_black_border(&self, cell_x: u32, cell_y: u32, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        let x0 = cell_x as i64;
        let y0 = cell_y as i64;
        let x1 = x0 + width as i64 - 1;
        let y1 = y0 + height as i64 - 1;

        let top = self.edge_is_black(width, |i| (x0 + i, y0));
        let bottom = self.edge_is_black(width, |i| (x0 + i, y1));
        let left = self.edge_is_black(height, |i| (x0, y0 + i));
        let right = self.edge_is_black(height, |i| (x1, y0 + i));

        let black_edges = [top, bottom, left, right]
            .iter()
            .filter(|&&black| black)
            .count() as u32;
        black_edges >= REQUIRED_BLACK_EDGES
    }

    /// Samples `SAMPLES_PER_EDGE` evenly spaced points (both ends included)
    /// along an edge of `len` pixels.
    fn edge_is_black(&self, len: u32, point: impl Fn(i64) -> (i64, i64)) -> bool {
        let span = (len as i64 - 1).max(0);
        let last = (SAMPLES_PER_EDGE - 1) as i64;
        let black = (0..SAMPLES_PER_EDGE as i64)
            .filter(|&i| {
                let (x, y) = point(i * span / last);
                self.sampler.is_black(x, y)
            })
            .count() as u32;
        black * 100 >= SAMPLES_PER_EDGE * BLACK_EDGE_PERCENT
    }
}
