//! Animation and sprite-sheet records built from detected frames.

use std::collections::HashSet;

use sheetcade_spec::{
    AnalysisResult, AnimationGroup, AnimationRecord, Frame, FrameSize, SpriteSheetRecord,
};
use thiserror::Error;

/// Name of the animation created when no groups are supplied.
pub const DEFAULT_ANIMATION_NAME: &str = "default";

/// Errors that can occur while building animation records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    /// Group extends past the detected frames.
    #[error("Animation '{name}' needs frames {start}..{end} but only {available} were detected")]
    OutOfRange {
        name: String,
        start: u32,
        end: u64,
        available: usize,
    },

    /// Group has no frames.
    #[error("Animation '{0}' has no frames")]
    Empty(String),

    /// Two groups share a name.
    #[error("Duplicate animation name: '{0}'")]
    DuplicateName(String),
}

/// Builds one record per group.
///
/// With no groups, a single [`DEFAULT_ANIMATION_NAME`] animation spans every
/// frame (or nothing is produced when there are no frames).
pub fn build_animations(
    frames: &[Frame],
    groups: &[AnimationGroup],
) -> Result<Vec<AnimationRecord>, AnimationError> {
    if groups.is_empty() {
        let Some(first) = frames.first() else {
            return Ok(Vec::new());
        };
        return Ok(vec![record(
            DEFAULT_ANIMATION_NAME,
            first,
            0,
            frames.len() as u32,
        )]);
    }

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(groups.len());
    for group in groups {
        if !seen.insert(group.name.as_str()) {
            return Err(AnimationError::DuplicateName(group.name.clone()));
        }
        if group.frame_count == 0 {
            return Err(AnimationError::Empty(group.name.clone()));
        }
        let end = group.frame_start as u64 + group.frame_count as u64;
        if end > frames.len() as u64 {
            return Err(AnimationError::OutOfRange {
                name: group.name.clone(),
                start: group.frame_start,
                end,
                available: frames.len(),
            });
        }
        let first = &frames[group.frame_start as usize];
        records.push(record(
            &group.name,
            first,
            group.frame_start,
            group.frame_count,
        ));
    }
    Ok(records)
}

fn record(name: &str, first: &Frame, frame_start: u32, frame_count: u32) -> AnimationRecord {
    AnimationRecord {
        name: name.to_string(),
        start_x: first.x,
        start_y: first.y,
        frame_start,
        frame_count,
        frame_width: first.width,
        frame_height: first.height,
    }
}

/// Builds the sprite-sheet record stored alongside the image blob.
pub fn sprite_sheet_record(
    name: impl Into<String>,
    image: FrameSize,
    result: &AnalysisResult,
    groups: &[AnimationGroup],
) -> Result<SpriteSheetRecord, AnimationError> {
    Ok(SpriteSheetRecord {
        name: name.into(),
        image_width: image.width,
        image_height: image.height,
        frame_width: result.suggested_frame_size.width,
        frame_height: result.suggested_frame_size.height,
        layout: result.layout,
        rows: result.rows,
        columns: result.columns,
        frame_count: result.frames.len() as u32,
        animations: build_animations(&result.frames, groups)?,
    })
}
