//! Content-pixel classification.

use sheetcade_spec::{DetectionMode, DetectionOptions};

use crate::buffer::PixelBuffer;

/// Which pixels count as sprite content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRule {
    /// Alpha above threshold.
    Alpha,
    /// Alpha above threshold and not black.
    OpaqueNonBlack,
}

/// Read-only view answering "is this pixel content?".
///
/// There is no sampler for manual mode: [`PixelSampler::for_options`] returns
/// `None`, so manual detection cannot read pixels by construction.
#[derive(Debug, Clone, Copy)]
pub struct PixelSampler<'a> {
    buffer: &'a PixelBuffer,
    rule: ContentRule,
    alpha_threshold: u8,
    black_threshold: u8,
}

impl<'a> PixelSampler<'a> {
    /// Creates a sampler with an explicit rule and thresholds.
    pub fn new(
        buffer: &'a PixelBuffer,
        rule: ContentRule,
        alpha_threshold: u8,
        black_threshold: u8,
    ) -> Self {
        Self {
            buffer,
            rule,
            alpha_threshold,
            black_threshold,
        }
    }

    /// Creates the sampler for `options`, or `None` in manual mode.
    pub fn for_options(buffer: &'a PixelBuffer, options: &DetectionOptions) -> Option<Self> {
        let rule = match options.mode {
            DetectionMode::Alpha => ContentRule::Alpha,
            DetectionMode::BlackBorder => ContentRule::OpaqueNonBlack,
            DetectionMode::Manual => return None,
        };
        Some(Self::new(
            buffer,
            rule,
            options.alpha_threshold,
            options.black_threshold,
        ))
    }

    /// The underlying buffer.
    pub fn buffer(&self) -> &'a PixelBuffer {
        self.buffer
    }

    /// Whether (x, y) is a content pixel. Out-of-range coordinates are not.
    #[inline]
    pub fn is_content(&self, x: i64, y: i64) -> bool {
        let Some([r, g, b, a]) = self.buffer.pixel(x, y) else {
            return false;
        };
        if a <= self.alpha_threshold {
            return false;
        }
        match self.rule {
            ContentRule::Alpha => true,
            ContentRule::OpaqueNonBlack => !self.is_black_rgb(r, g, b),
        }
    }

    /// Whether (x, y) is black, ignoring alpha. Out-of-range coordinates are not.
    #[inline]
    pub fn is_black(&self, x: i64, y: i64) -> bool {
        match self.buffer.pixel(x, y) {
            Some([r, g, b, _]) => self.is_black_rgb(r, g, b),
            None => false,
        }
    }

    #[inline]
    fn is_black_rgb(&self, r: u8, g: u8, b: u8) -> bool {
        r < self.black_threshold && g < self.black_threshold && b < self.black_threshold
    }
}
