//! Manual frame synthesis.
//!
//! Produces up to `count` uniform frames in a single row starting at the
//! offset, without looking at the image. Useful when the background cannot
//! be told apart from sprite content.

use sheetcade_spec::{DetectionIssue, DetectionStrategy, Frame, FrameSize, GridHint};

use super::Detection;
use crate::order::FLOOD_FILL_ROW_TOLERANCE;

/// Builds frames at `offset_x + i * frame_width` for `i < hint.frame_count`.
///
/// Only frames that lie fully inside `sheet` are emitted, so the work is
/// bounded by the sheet width. A shortfall is reported as a mismatch.
pub fn synthesize(hint: GridHint, offset_x: u32, offset_y: u32, sheet: FrameSize) -> Detection {
    let fits_vertically = offset_y
        .checked_add(hint.frame_height)
        .is_some_and(|bottom| bottom <= sheet.height);
    let fitting = if fits_vertically {
        sheet
            .width
            .saturating_sub(offset_x)
            .checked_div(hint.frame_width)
            .unwrap_or(0)
    } else {
        0
    };
    let count = hint.frame_count.min(fitting);

    let frames: Vec<Frame> = (0..count)
        .map(|i| {
            Frame::new(
                offset_x + i * hint.frame_width,
                offset_y,
                hint.frame_width,
                hint.frame_height,
            )
        })
        .collect();

    let mut issues = Vec::new();
    if count != hint.frame_count {
        log::warn!(
            "Manual grid requested {} frames but only {} fit the {}x{} sheet",
            hint.frame_count,
            count,
            sheet.width,
            sheet.height
        );
        issues.push(DetectionIssue::DetectionMismatch {
            expected: hint.frame_count,
            found: count,
        });
    }

    Detection {
        strategy: DetectionStrategy::Manual,
        frames,
        row_tolerance: FLOOD_FILL_ROW_TOLERANCE,
        issues,
    }
}
