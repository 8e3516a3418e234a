//! Sprite-sheet and animation records handed to persistence.
//!
//! The analysis engine knows nothing about animations; these records are
//! built from its frames by the animation builder and stored by the backend.

use serde::{Deserialize, Serialize};

use crate::result::Layout;

/// A request to group a run of detected frames into one animation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationGroup {
    /// Animation name (e.g. "walk_down").
    pub name: String,
    /// Index of the first frame in the ordered frame list.
    pub frame_start: u32,
    /// Number of frames in the animation.
    pub frame_count: u32,
}

impl AnimationGroup {
    /// Creates a new animation group.
    pub fn new(name: impl Into<String>, frame_start: u32, frame_count: u32) -> Self {
        Self {
            name: name.into(),
            frame_start,
            frame_count,
        }
    }
}

/// A persisted animation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationRecord {
    /// Animation name.
    pub name: String,
    /// Left edge of the first frame.
    pub start_x: u32,
    /// Top edge of the first frame.
    pub start_y: u32,
    /// Index of the first frame.
    pub frame_start: u32,
    /// Number of frames.
    pub frame_count: u32,
    /// Width of the first frame.
    pub frame_width: u32,
    /// Height of the first frame.
    pub frame_height: u32,
}

/// Sprite-sheet metadata stored alongside the raw image blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSheetRecord {
    /// Sheet name.
    pub name: String,
    /// Image width in pixels.
    pub image_width: u32,
    /// Image height in pixels.
    pub image_height: u32,
    /// Canonical frame width.
    pub frame_width: u32,
    /// Canonical frame height.
    pub frame_height: u32,
    /// Inferred layout.
    pub layout: Layout,
    /// Number of rows.
    pub rows: u32,
    /// Number of columns.
    pub columns: u32,
    /// Number of detected frames.
    pub frame_count: u32,
    /// Animations defined on the sheet.
    #[serde(default)]
    pub animations: Vec<AnimationRecord>,
}
