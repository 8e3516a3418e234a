//! End-to-end detection tests over synthetic sprite sheets.
//!
//! Each test paints rectangles onto a transparent canvas and runs the full
//! analysis pipeline, checking frames, ordering and inferred layout.

use pretty_assertions::assert_eq;
use sheetcade_analysis::{analyze, AnalysisError, Analyzer, CancelToken, PixelBuffer};
use sheetcade_spec::{
    AnalysisResult, DetectionIssue, DetectionOptions, DetectionStrategy, EmptyCellPolicy, Frame,
    FrameSize, Layout,
};

const OPAQUE: [u8; 4] = [220, 180, 60, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

fn canvas(width: u32, height: u32) -> PixelBuffer {
    PixelBuffer::transparent(width, height).unwrap()
}

// ============================================================================
// Flood fill
// ============================================================================

/// A single opaque rectangle becomes exactly one frame with its bounds.
#[test]
fn test_flood_fill_single_rectangle() {
    let rect = Frame::new(13, 7, 21, 17);
    let buffer = canvas(64, 48).with_rect(rect, OPAQUE);

    let result = analyze(&buffer, &DetectionOptions::alpha()).unwrap();
    assert_eq!(result.frames, vec![rect]);
    assert_eq!(result.suggested_frame_size, FrameSize::new(21, 17));
    assert_eq!(result.layout, Layout::Horizontal);
    assert_eq!((result.rows, result.columns), (1, 1));
}

/// Irregular sprites in two rows come back in reading order as a grid.
#[test]
fn test_flood_fill_two_rows() {
    let buffer = canvas(96, 64)
        .with_rect(Frame::new(50, 2, 12, 20), OPAQUE)
        .with_rect(Frame::new(4, 1, 16, 22), OPAQUE)
        .with_rect(Frame::new(30, 40, 10, 10), OPAQUE)
        .with_rect(Frame::new(70, 2, 9, 21), OPAQUE);

    let result = analyze(&buffer, &DetectionOptions::alpha()).unwrap();
    assert_eq!(
        result.frames,
        vec![
            Frame::new(4, 1, 16, 22),
            Frame::new(50, 2, 12, 20),
            Frame::new(70, 2, 9, 21),
            Frame::new(30, 40, 10, 10),
        ]
    );
    assert_eq!(result.layout, Layout::Grid);
    assert_eq!((result.rows, result.columns), (2, 3));
}

/// Components smaller than the minimum size are ignored.
#[test]
fn test_flood_fill_drops_specks() {
    let buffer = canvas(48, 32)
        .with_rect(Frame::new(2, 2, 3, 3), OPAQUE)
        .with_rect(Frame::new(20, 4, 12, 12), OPAQUE);

    let result = analyze(&buffer, &DetectionOptions::alpha()).unwrap();
    assert_eq!(result.frames, vec![Frame::new(20, 4, 12, 12)]);

    let relaxed = DetectionOptions::alpha().with_min_size(1, 1);
    assert_eq!(analyze(&buffer, &relaxed).unwrap().frames.len(), 2);
}

/// Translucent pixels at or below the alpha threshold are background.
#[test]
fn test_flood_fill_alpha_threshold() {
    let buffer = canvas(32, 32)
        .with_rect(Frame::new(0, 0, 32, 32), [255, 255, 255, 10])
        .with_rect(Frame::new(8, 8, 10, 10), OPAQUE);

    let result = analyze(&buffer, &DetectionOptions::alpha()).unwrap();
    assert_eq!(result.frames, vec![Frame::new(8, 8, 10, 10)]);
}

// ============================================================================
// Grid scan
// ============================================================================

/// Every fully opaque cell yields its own cell rectangle in row-major order.
#[test]
fn test_grid_scan_fully_opaque() {
    let (cols, rows, fw, fh) = (3, 2, 16, 24);
    let buffer = PixelBuffer::filled(cols * fw, rows * fh, OPAQUE).unwrap();
    let options = DetectionOptions::alpha().with_grid(fw, fh, cols * rows);

    let report = Analyzer::default()
        .run(&buffer, &options, &CancelToken::new())
        .unwrap();
    assert_eq!(report.strategy, DetectionStrategy::Grid);
    assert!(report.issues.is_empty());

    let expected: Vec<Frame> = (0..rows)
        .flat_map(|r| (0..cols).map(move |c| Frame::new(c * fw, r * fh, fw, fh)))
        .collect();
    assert_eq!(report.result.frames, expected);
    assert_eq!(report.result.layout, Layout::Grid);
    assert_eq!((report.result.rows, report.result.columns), (2, 3));
}

/// Cells 0 and 2 hold centered squares, cells 1 and 3 are empty.
#[test]
fn test_grid_scan_full_cell_fallback_scenario() {
    let buffer = canvas(128, 32)
        .with_rect(Frame::new(6, 6, 20, 20), OPAQUE)
        .with_rect(Frame::new(70, 6, 20, 20), OPAQUE);
    let options = DetectionOptions::alpha()
        .with_grid(32, 32, 4)
        .with_empty_cell_policy(EmptyCellPolicy::FullCell);

    let result = analyze(&buffer, &options).unwrap();
    assert_eq!(
        result.frames,
        vec![
            Frame::new(6, 6, 20, 20),
            Frame::new(32, 0, 32, 32),
            Frame::new(70, 6, 20, 20),
            Frame::new(96, 0, 32, 32),
        ]
    );
    assert_eq!(result.layout, Layout::Horizontal);
    // Two of each size; the first seen wins.
    assert_eq!(result.suggested_frame_size, FrameSize::new(20, 20));
}

/// With the drop policy the same sheet yields two frames and a mismatch.
#[test]
fn test_grid_scan_drop_policy_reports_shortfall() {
    let buffer = canvas(128, 32)
        .with_rect(Frame::new(6, 6, 20, 20), OPAQUE)
        .with_rect(Frame::new(70, 6, 20, 20), OPAQUE);
    let options = DetectionOptions::alpha()
        .with_grid(32, 32, 4)
        .with_empty_cell_policy(EmptyCellPolicy::Drop);

    let report = Analyzer::default()
        .run(&buffer, &options, &CancelToken::new())
        .unwrap();
    assert_eq!(
        report.result.frames,
        vec![Frame::new(6, 6, 20, 20), Frame::new(70, 6, 20, 20)]
    );
    assert_eq!(
        report.issues,
        vec![DetectionIssue::DetectionMismatch {
            expected: 4,
            found: 2
        }]
    );
}

/// Sprites beyond the first `frame_count` cells are still found.
#[test]
fn test_grid_scan_covers_whole_sheet() {
    let buffer = canvas(64, 64).with_rect(Frame::new(36, 36, 20, 20), OPAQUE);
    let options = DetectionOptions::alpha()
        .with_grid(32, 32, 1)
        .with_empty_cell_policy(EmptyCellPolicy::Drop);

    let result = analyze(&buffer, &options).unwrap();
    assert_eq!(result.frames, vec![Frame::new(36, 36, 20, 20)]);
}

/// Extra accepted cells are truncated and reported.
#[test]
fn test_grid_scan_truncates_surplus() {
    let buffer = PixelBuffer::filled(96, 32, OPAQUE).unwrap();
    let options = DetectionOptions::alpha().with_grid(32, 32, 2);

    let report = Analyzer::default()
        .run(&buffer, &options, &CancelToken::new())
        .unwrap();
    assert_eq!(
        report.result.frames,
        vec![Frame::new(0, 0, 32, 32), Frame::new(32, 0, 32, 32)]
    );
    assert_eq!(
        report.issues,
        vec![DetectionIssue::DetectionMismatch {
            expected: 2,
            found: 3
        }]
    );
}

// ============================================================================
// Black border
// ============================================================================

fn bordered_cell(buffer: PixelBuffer, cell_x: u32, size: u32) -> PixelBuffer {
    buffer
        .with_rect(Frame::new(cell_x, 0, size, 1), BLACK)
        .with_rect(Frame::new(cell_x, size - 1, size, 1), BLACK)
        .with_rect(Frame::new(cell_x, 0, 1, size), BLACK)
        .with_rect(Frame::new(cell_x + size - 1, 0, 1, size), BLACK)
}

/// Cells with fewer than three black edges are excluded despite opaque content.
#[test]
fn test_black_border_requires_three_edges() {
    // Cell 0: black frame on all four edges around a colored sprite.
    let buffer = bordered_cell(PixelBuffer::filled(64, 32, WHITE).unwrap(), 0, 32)
        .with_rect(Frame::new(1, 1, 30, 30), [0, 0, 0, 0])
        .with_rect(Frame::new(8, 8, 16, 16), OPAQUE)
        // Cell 1: white cell with only top and bottom edges black.
        .with_rect(Frame::new(32, 0, 32, 1), BLACK)
        .with_rect(Frame::new(32, 31, 32, 1), BLACK)
        .with_rect(Frame::new(40, 8, 16, 16), OPAQUE);

    let options = DetectionOptions::black_border().with_grid(32, 32, 2);
    let report = Analyzer::default()
        .run(&buffer, &options, &CancelToken::new())
        .unwrap();

    assert_eq!(report.result.frames, vec![Frame::new(8, 8, 16, 16)]);
    assert!(report.has_mismatch());
}

/// Three black edges are enough.
#[test]
fn test_black_border_three_edges_accepted() {
    let buffer = PixelBuffer::filled(32, 32, WHITE)
        .unwrap()
        .with_rect(Frame::new(0, 0, 32, 1), BLACK)
        .with_rect(Frame::new(0, 31, 32, 1), BLACK)
        .with_rect(Frame::new(0, 0, 1, 32), BLACK);

    let options = DetectionOptions::black_border().with_grid(32, 32, 1);
    let result = analyze(&buffer, &options).unwrap();
    // Content is everything opaque and non-black inside the cell.
    assert_eq!(result.frames, vec![Frame::new(1, 1, 31, 30)]);
}

// ============================================================================
// Manual
// ============================================================================

/// Manual mode synthesizes frames without looking at pixels.
#[test]
fn test_manual_mode_ignores_content() {
    let options = DetectionOptions::manual(16, 20, 5);
    let expected: Vec<Frame> = (0..5).map(|i| Frame::new(i * 16, 0, 16, 20)).collect();

    let empty = analyze(&canvas(80, 20), &options).unwrap();
    let busy = analyze(
        &PixelBuffer::filled(80, 20, OPAQUE)
            .unwrap()
            .with_rect(Frame::new(3, 3, 5, 5), BLACK),
        &options,
    )
    .unwrap();

    assert_eq!(empty.frames, expected);
    assert_eq!(empty, busy);
    assert_eq!(empty.layout, Layout::Horizontal);
    assert_eq!((empty.rows, empty.columns), (1, 5));
}

/// Offsets shift every synthesized frame.
#[test]
fn test_manual_mode_offset() {
    let options = DetectionOptions::manual(8, 8, 2).with_offset(4, 12);
    let result = analyze(&canvas(32, 32), &options).unwrap();
    assert_eq!(
        result.frames,
        vec![Frame::new(4, 12, 8, 8), Frame::new(12, 12, 8, 8)]
    );
}

// ============================================================================
// Errors and defaults
// ============================================================================

/// Zero-sized buffers are rejected before analysis.
#[test]
fn test_zero_buffer_is_invalid() {
    let err = PixelBuffer::from_rgba8(0, 0, Vec::new()).unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidBuffer(_)));
}

/// A sheet without content yields the documented default result.
#[test]
fn test_empty_sheet_default_result() {
    let result = analyze(&canvas(40, 40), &DetectionOptions::alpha()).unwrap();
    assert_eq!(result, AnalysisResult::empty());
    assert_eq!(result.suggested_frame_size, FrameSize::new(32, 32));
    assert_eq!(result.layout, Layout::Horizontal);
    assert_eq!((result.rows, result.columns), (1, 0));
}

/// The same input always produces the same output.
#[test]
fn test_analysis_is_deterministic() {
    let buffer = canvas(100, 60)
        .with_rect(Frame::new(5, 5, 20, 20), OPAQUE)
        .with_rect(Frame::new(40, 8, 15, 18), OPAQUE)
        .with_rect(Frame::new(12, 35, 22, 20), OPAQUE);
    let options = DetectionOptions::alpha();
    assert_eq!(
        analyze(&buffer, &options).unwrap(),
        analyze(&buffer, &options).unwrap()
    );
}
