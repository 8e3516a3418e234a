//! Layout inference over an ordered frame list.

use sheetcade_spec::{AnalysisResult, Frame, FrameSize, Layout};

/// Classifies ordered frames and picks a canonical frame size.
///
/// `tolerance` decides row and column membership relative to the first
/// frame: a frame shares its row when `|y - first.y| <= tolerance`.
#[derive(Debug, Clone, Copy)]
pub struct LayoutAnalyzer {
    tolerance: u32,
}

impl LayoutAnalyzer {
    /// Creates an analyzer with the given row/column tolerance.
    pub fn new(tolerance: u32) -> Self {
        Self { tolerance }
    }

    /// Builds the analysis result for `frames`, which must already be ordered.
    pub fn analyze(&self, frames: Vec<Frame>) -> AnalysisResult {
        let Some(first) = frames.first().copied() else {
            return AnalysisResult::empty();
        };

        let n = frames.len() as u32;
        let first_row = frames
            .iter()
            .filter(|f| f.y.abs_diff(first.y) <= self.tolerance)
            .count() as u32;
        let first_col = frames
            .iter()
            .filter(|f| f.x.abs_diff(first.x) <= self.tolerance)
            .count() as u32;

        let (layout, rows, columns) = if first_row == n {
            (Layout::Horizontal, 1, n)
        } else if first_col == n {
            (Layout::Vertical, n, 1)
        } else {
            (Layout::Grid, n.div_ceil(first_row), first_row)
        };

        AnalysisResult {
            suggested_frame_size: most_common_size(&frames),
            frames,
            layout,
            rows,
            columns,
        }
    }
}

/// Most frequent frame size; ties go to the size seen first.
pub fn most_common_size(frames: &[Frame]) -> FrameSize {
    let mut counts: Vec<(FrameSize, usize)> = Vec::new();
    for frame in frames {
        let size = frame.size();
        match counts.iter_mut().find(|(s, _)| *s == size) {
            Some((_, count)) => *count += 1,
            None => counts.push((size, 1)),
        }
    }

    let mut best: Option<(FrameSize, usize)> = None;
    for (size, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((size, count));
        }
    }
    best.map_or(sheetcade_spec::DEFAULT_FRAME_SIZE, |(size, _)| size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(n: u32, y: u32) -> Vec<Frame> {
        (0..n).map(|i| Frame::new(i * 16, y, 16, 16)).collect()
    }

    #[test]
    fn test_empty_uses_defaults() {
        let result = LayoutAnalyzer::new(5).analyze(Vec::new());
        assert_eq!(result, AnalysisResult::empty());
    }

    #[test]
    fn test_single_frame_is_horizontal() {
        let result = LayoutAnalyzer::new(5).analyze(row(1, 0));
        assert_eq!(result.layout, Layout::Horizontal);
        assert_eq!((result.rows, result.columns), (1, 1));
        assert_eq!(result.suggested_frame_size, FrameSize::new(16, 16));
    }

    #[test]
    fn test_single_row_is_horizontal() {
        let result = LayoutAnalyzer::new(5).analyze(row(7, 3));
        assert_eq!(result.layout, Layout::Horizontal);
        assert_eq!((result.rows, result.columns), (1, 7));
    }

    #[test]
    fn test_single_column_is_vertical() {
        let frames = (0..4).map(|i| Frame::new(2, i * 20, 16, 16)).collect();
        let result = LayoutAnalyzer::new(5).analyze(frames);
        assert_eq!(result.layout, Layout::Vertical);
        assert_eq!((result.rows, result.columns), (4, 1));
    }

    #[test]
    fn test_partial_last_row_rounds_up() {
        let mut frames = row(3, 0);
        frames.extend(row(2, 16));
        let result = LayoutAnalyzer::new(5).analyze(frames);
        assert_eq!(result.layout, Layout::Grid);
        assert_eq!((result.rows, result.columns), (2, 3));
    }

    #[test]
    fn test_rows_within_tolerance_merge() {
        let frames = vec![
            Frame::new(0, 0, 16, 16),
            Frame::new(16, 4, 16, 16),
            Frame::new(32, 5, 16, 16),
        ];
        let result = LayoutAnalyzer::new(5).analyze(frames);
        assert_eq!(result.layout, Layout::Horizontal);
    }

    #[test]
    fn test_size_ties_prefer_first_seen() {
        let frames = vec![
            Frame::new(0, 0, 10, 12),
            Frame::new(20, 0, 16, 16),
            Frame::new(40, 0, 16, 16),
            Frame::new(60, 0, 10, 12),
        ];
        assert_eq!(most_common_size(&frames), FrameSize::new(10, 12));
    }

    #[test]
    fn test_size_majority_wins() {
        let frames = vec![
            Frame::new(0, 0, 10, 12),
            Frame::new(20, 0, 16, 16),
            Frame::new(40, 0, 16, 16),
        ];
        assert_eq!(most_common_size(&frames), FrameSize::new(16, 16));
    }
}
