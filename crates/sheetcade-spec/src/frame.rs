//! Frame rectangles detected inside a sprite sheet.

use serde::{Deserialize, Serialize};

/// A rectangular sub-region of a sprite sheet holding one animation frame.
///
/// Frames are plain value objects. Detection code builds them through
/// [`Frame::bounded`], which refuses candidates that fall outside the sheet or
/// below the minimum size, so a rejected candidate never becomes a `Frame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frame {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameSize {
    /// Creates a new frame size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Frame {
    /// Creates a frame without any bounds checks.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a frame only if it lies inside `bounds` and meets `min`.
    ///
    /// Returns `None` for zero-sized rectangles, rectangles that overflow the
    /// sheet, and rectangles narrower or shorter than the minimum size.
    pub fn bounded(
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        bounds: FrameSize,
        min: FrameSize,
    ) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        if width < min.width || height < min.height {
            return None;
        }
        let right = x.checked_add(width)?;
        let bottom = y.checked_add(height)?;
        if right > bounds.width || bottom > bounds.height {
            return None;
        }
        Some(Self::new(x, y, width, height))
    }

    /// Frame dimensions.
    pub fn size(&self) -> FrameSize {
        FrameSize::new(self.width, self.height)
    }

    /// Exclusive right edge, saturating at `u32::MAX`.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge, saturating at `u32::MAX`.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Whether the pixel (px, py) lies inside this frame.
    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}
