//! Reading-order sorting of detected frames.
//!
//! Frames are projected onto a single numeric key,
//! `round(y / row_tolerance) * ROW_KEY_STRIDE + x`, and sorted by it. A key
//! gives a strict total order; comparing pairs with "same row if |dy| is
//! below the tolerance" does not, because that relation is not transitive.

use sheetcade_spec::Frame;

/// Multiplier separating row buckets. Larger than any accepted sheet width.
pub const ROW_KEY_STRIDE: u64 = 1_000_000;

/// Row tolerance used for flood-fill results.
pub const FLOOD_FILL_ROW_TOLERANCE: u32 = 5;

/// Row tolerance for grid scans: half the cell height, at least 1.
pub fn grid_row_tolerance(frame_height: u32) -> u32 {
    (frame_height / 2).max(1)
}

/// Sort key for a frame.
pub fn row_major_key(frame: &Frame, row_tolerance: u32) -> u64 {
    let tolerance = row_tolerance.max(1) as f64;
    let row = (frame.y as f64 / tolerance).round() as u64;
    row * ROW_KEY_STRIDE + frame.x as u64
}

/// Returns `frames` in approximate reading order.
///
/// The sort is stable, so frames with identical keys keep their input order.
pub fn order_frames(frames: &[Frame], row_tolerance: u32) -> Vec<Frame> {
    let mut ordered = frames.to_vec();
    ordered.sort_by_cached_key(|f| row_major_key(f, row_tolerance));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sorts_rows_then_columns() {
        let frames = [
            Frame::new(40, 30, 8, 8),
            Frame::new(0, 31, 8, 8),
            Frame::new(20, 0, 8, 8),
            Frame::new(0, 2, 8, 8),
        ];
        let ordered = order_frames(&frames, 5);
        assert_eq!(
            ordered,
            vec![
                Frame::new(0, 2, 8, 8),
                Frame::new(20, 0, 8, 8),
                Frame::new(0, 31, 8, 8),
                Frame::new(40, 30, 8, 8),
            ]
        );
    }

    #[test]
    fn test_chain_of_near_rows_stays_consistent() {
        // y = 0, 4, 8: each neighbour pair is within 5 px but the ends are not.
        // Keys place them in buckets 0, 1 and 2, which is a valid total order.
        let frames = [
            Frame::new(0, 8, 8, 8),
            Frame::new(10, 4, 8, 8),
            Frame::new(20, 0, 8, 8),
        ];
        let ordered = order_frames(&frames, 5);
        assert_eq!(
            ordered.iter().map(|f| f.y).collect::<Vec<_>>(),
            vec![0, 4, 8]
        );
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        // 16 / 32 = 0.5 rounds to 1.
        assert_eq!(row_major_key(&Frame::new(3, 16, 1, 1), 32), ROW_KEY_STRIDE + 3);
        assert_eq!(row_major_key(&Frame::new(3, 15, 1, 1), 32), 3);
    }

    #[test]
    fn test_grid_tolerance_is_at_least_one() {
        assert_eq!(grid_row_tolerance(32), 16);
        assert_eq!(grid_row_tolerance(1), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(order_frames(&[], 5).is_empty());
    }
}
