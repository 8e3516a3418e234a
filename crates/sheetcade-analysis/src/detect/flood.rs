//! Connected-component detection for sheets without grid hints.
//!
//! Content pixels are grouped into 4-connected components with a
//! breadth-first search; each component's bounding box becomes a frame if it
//! meets the minimum size. Time and memory are O(width * height).

use std::collections::VecDeque;

use sheetcade_spec::{DetectionOptions, Frame, FrameSize};

use super::Bounds;
use crate::cancel::CancelToken;
use crate::error::AnalysisError;
use crate::order::{order_frames, FLOOD_FILL_ROW_TOLERANCE};
use crate::sampler::PixelSampler;

const NEIGHBOURS: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Labels components and returns their frames in reading order.
pub fn label(
    sampler: &PixelSampler<'_>,
    options: &DetectionOptions,
    cancel: &CancelToken,
) -> Result<Vec<Frame>, AnalysisError> {
    let buffer = sampler.buffer();
    let (width, height) = (buffer.width(), buffer.height());
    let min = FrameSize::new(options.min_width, options.min_height);

    let mut visited = vec![false; width as usize * height as usize];
    let index = |x: u32, y: u32| y as usize * width as usize + x as usize;
    let mut queue: VecDeque<(u32, u32)> = VecDeque::new();
    let mut frames = Vec::new();
    let mut components = 0usize;

    for y in 0..height {
        cancel.check()?;
        for x in 0..width {
            if visited[index(x, y)] || !sampler.is_content(x as i64, y as i64) {
                continue;
            }

            visited[index(x, y)] = true;
            queue.push_back((x, y));
            let mut bounds = Bounds::new(x, y);

            while let Some((cx, cy)) = queue.pop_front() {
                bounds.include(cx, cy);
                for (dx, dy) in NEIGHBOURS {
                    let nx = cx as i64 + dx;
                    let ny = cy as i64 + dy;
                    if !sampler.is_content(nx, ny) {
                        continue;
                    }
                    // is_content is false out of range, so nx/ny are valid here.
                    let (nx, ny) = (nx as u32, ny as u32);
                    let slot = index(nx, ny);
                    if !visited[slot] {
                        visited[slot] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }

            components += 1;
            match Frame::bounded(
                bounds.x(),
                bounds.y(),
                bounds.width(),
                bounds.height(),
                buffer.size(),
                min,
            ) {
                Some(frame) => frames.push(frame),
                None => log::trace!(
                    "Component at ({}, {}) {}x{} below minimum size",
                    bounds.x(),
                    bounds.y(),
                    bounds.width(),
                    bounds.height()
                ),
            }
        }
    }

    log::debug!(
        "Flood fill found {} components, {} frames",
        components,
        frames.len()
    );
    Ok(order_frames(&frames, FLOOD_FILL_ROW_TOLERANCE))
}
