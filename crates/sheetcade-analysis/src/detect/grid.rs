//! Grid-scan detection for sheets with a known cell size.
//!
//! The whole sheet is partitioned into `floor(W / fw) x floor(H / fh)` cells;
//! sprites may sit anywhere on it, so scanning is not limited to the first
//! `frame_count` cells. Each accepted cell contributes the tight bounding box
//! of its content. All accepted cells are ordered and then truncated to the
//! expected count; any difference from the expected count is reported.

use sheetcade_spec::{
    DetectionIssue, DetectionMode, DetectionOptions, DetectionStrategy, EmptyCellPolicy, Frame,
    FrameSize, GridHint,
};

use super::{Bounds, Detection};
use crate::border::BorderClassifier;
use crate::cancel::CancelToken;
use crate::error::AnalysisError;
use crate::order::{grid_row_tolerance, order_frames};
use crate::sampler::PixelSampler;

/// Scans every grid cell of the sheet.
pub fn scan(
    sampler: &PixelSampler<'_>,
    options: &DetectionOptions,
    hint: GridHint,
    cancel: &CancelToken,
) -> Result<Detection, AnalysisError> {
    let buffer = sampler.buffer();
    let (fw, fh) = (hint.frame_width, hint.frame_height);
    let total_cols = buffer.width() / fw;
    let total_rows = buffer.height() / fh;
    let min = FrameSize::new(options.min_width, options.min_height);
    let border = (options.mode == DetectionMode::BlackBorder)
        .then(|| BorderClassifier::new(*sampler));

    let mut accepted = Vec::new();
    for row in 0..total_rows {
        for col in 0..total_cols {
            cancel.check()?;
            let (cell_x, cell_y) = (col * fw, row * fh);

            if let Some(classifier) = &border {
                if !classifier.has_black_border(cell_x, cell_y, fw, fh) {
                    log::trace!("Cell ({}, {}) rejected: no black border", col, row);
                    continue;
                }
            }

            let frame = match content_bounds(sampler, cell_x, cell_y, fw, fh) {
                Some(b) => Frame::bounded(b.x(), b.y(), b.width(), b.height(), buffer.size(), min),
                None => match options.empty_cell_policy {
                    EmptyCellPolicy::FullCell => {
                        Frame::bounded(cell_x, cell_y, fw, fh, buffer.size(), min)
                    }
                    EmptyCellPolicy::Drop => None,
                },
            };

            match frame {
                Some(frame) => accepted.push(frame),
                None => log::trace!("Cell ({}, {}) rejected: no frame of minimum size", col, row),
            }
        }
    }

    let found = accepted.len() as u32;
    log::debug!(
        "Grid scan over {}x{} cells accepted {} (expected {})",
        total_cols,
        total_rows,
        found,
        hint.frame_count
    );

    let mut issues = Vec::new();
    if found != hint.frame_count {
        log::warn!(
            "Grid scan expected {} frames but accepted {}",
            hint.frame_count,
            found
        );
        issues.push(DetectionIssue::DetectionMismatch {
            expected: hint.frame_count,
            found,
        });
    }

    let row_tolerance = grid_row_tolerance(fh);
    let mut frames = order_frames(&accepted, row_tolerance);
    frames.truncate(hint.frame_count as usize);

    Ok(Detection {
        strategy: DetectionStrategy::Grid,
        frames,
        row_tolerance,
        issues,
    })
}

/// Tight bounding box of the content pixels inside one cell.
fn content_bounds(
    sampler: &PixelSampler<'_>,
    cell_x: u32,
    cell_y: u32,
    width: u32,
    height: u32,
) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;
    for y in cell_y..cell_y + height {
        for x in cell_x..cell_x + width {
            if sampler.is_content(x as i64, y as i64) {
                match bounds.as_mut() {
                    Some(b) => b.include(x, y),
                    None => bounds = Some(Bounds::new(x, y)),
                }
            }
        }
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PixelBuffer;
    use pretty_assertions::assert_eq;

    const OPAQUE: [u8; 4] = [200, 120, 40, 255];

    fn run(buffer: &PixelBuffer, options: &DetectionOptions) -> Detection {
        let sampler = PixelSampler::for_options(buffer, options).unwrap();
        let hint = options.grid_hint().unwrap();
        scan(&sampler, options, hint, &CancelToken::new()).unwrap()
    }

    #[test]
    fn test_trims_to_content() {
        let buffer = PixelBuffer::transparent(64, 32)
            .unwrap()
            .with_rect(Frame::new(4, 6, 10, 12), OPAQUE)
            .with_rect(Frame::new(40, 2, 20, 20), OPAQUE);
        let options = DetectionOptions::alpha().with_grid(32, 32, 2);
        let detection = run(&buffer, &options);
        assert_eq!(
            detection.frames,
            vec![Frame::new(4, 6, 10, 12), Frame::new(40, 2, 20, 20)]
        );
        assert!(detection.issues.is_empty());
        assert_eq!(detection.row_tolerance, 16);
    }

    #[test]
    fn test_empty_cells_follow_policy() {
        let buffer = PixelBuffer::transparent(64, 32)
            .unwrap()
            .with_rect(Frame::new(8, 6, 16, 16), OPAQUE);

        let options = DetectionOptions::alpha().with_grid(32, 32, 2);
        let detection = run(&buffer, &options);
        assert_eq!(
            detection.frames,
            vec![Frame::new(8, 6, 16, 16), Frame::new(32, 0, 32, 32)]
        );

        let options = options.with_empty_cell_policy(EmptyCellPolicy::Drop);
        let detection = run(&buffer, &options);
        assert_eq!(detection.frames, vec![Frame::new(8, 6, 16, 16)]);
        assert_eq!(
            detection.issues,
            vec![DetectionIssue::DetectionMismatch {
                expected: 2,
                found: 1
            }]
        );
    }

    #[test]
    fn test_undersized_content_is_dropped() {
        let buffer = PixelBuffer::transparent(32, 32)
            .unwrap()
            .with_rect(Frame::new(10, 10, 4, 4), OPAQUE);
        let options = DetectionOptions::alpha().with_grid(32, 32, 1);
        let detection = run(&buffer, &options);
        assert!(detection.frames.is_empty());
    }

    #[test]
    fn test_scans_whole_sheet_and_truncates() {
        // Three occupied cells on a 3x2 grid, only two expected.
        let buffer = PixelBuffer::transparent(48, 32)
            .unwrap()
            .with_rect(Frame::new(16, 0, 16, 16), OPAQUE)
            .with_rect(Frame::new(0, 16, 16, 16), OPAQUE)
            .with_rect(Frame::new(32, 16, 16, 16), OPAQUE);
        let options = DetectionOptions::alpha()
            .with_grid(16, 16, 2)
            .with_empty_cell_policy(EmptyCellPolicy::Drop);
        let detection = run(&buffer, &options);
        assert_eq!(
            detection.frames,
            vec![Frame::new(16, 0, 16, 16), Frame::new(0, 16, 16, 16)]
        );
        assert_eq!(
            detection.issues,
            vec![DetectionIssue::DetectionMismatch {
                expected: 2,
                found: 3
            }]
        );
    }

    #[test]
    fn test_partial_cells_at_edges_are_ignored() {
        let buffer = PixelBuffer::filled(40, 20, OPAQUE).unwrap();
        let options = DetectionOptions::alpha().with_grid(16, 16, 2);
        let detection = run(&buffer, &options);
        assert_eq!(
            detection.frames,
            vec![Frame::new(0, 0, 16, 16), Frame::new(16, 0, 16, 16)]
        );
    }

    #[test]
    fn test_cancelled_scan_stops() {
        let buffer = PixelBuffer::filled(32, 32, OPAQUE).unwrap();
        let options = DetectionOptions::alpha().with_grid(16, 16, 4);
        let sampler = PixelSampler::for_options(&buffer, &options).unwrap();
        let token = CancelToken::new();
        token.cancel();
        let result = scan(&sampler, &options, options.grid_hint().unwrap(), &token);
        assert_eq!(result, Err(AnalysisError::Cancelled));
    }
}
