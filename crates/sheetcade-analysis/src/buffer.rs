//! Decoded RGBA pixel buffers.

use sheetcade_spec::{Frame, FrameSize};

use crate::error::AnalysisError;

/// An immutable, decoded RGBA8 image (row-major, 4 bytes per pixel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps decoded RGBA8 bytes.
    ///
    /// Fails with `InvalidBuffer` for zero dimensions or when `data` does not
    /// hold exactly `width * height * 4` bytes.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self, AnalysisError> {
        if width == 0 || height == 0 {
            return Err(AnalysisError::InvalidBuffer(format!(
                "dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        let expected = (width as u64) * (height as u64) * 4;
        if data.len() as u64 != expected {
            return Err(AnalysisError::InvalidBuffer(format!(
                "expected {} bytes for {}x{} RGBA, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates a buffer filled with a single RGBA color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, AnalysisError> {
        let pixels = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(pixels * 4);
        for _ in 0..pixels {
            data.extend_from_slice(&rgba);
        }
        Self::from_rgba8(width, height, data)
    }

    /// Creates a fully transparent buffer.
    pub fn transparent(width: u32, height: u32) -> Result<Self, AnalysisError> {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a frame size.
    pub fn size(&self) -> FrameSize {
        FrameSize::new(self.width, self.height)
    }

    /// Total pixel count.
    pub fn pixel_count(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer, returning the raw RGBA bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// RGBA value at (x, y), or `None` outside the buffer.
    #[inline]
    pub fn pixel(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.data[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Returns a copy with every pixel passed through `f`.
    pub fn map_pixels(&self, mut f: impl FnMut([u8; 4]) -> [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            data.extend_from_slice(&f([px[0], px[1], px[2], px[3]]));
        }
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Returns a copy with `rect` filled by `rgba`, clipped to the buffer.
    ///
    /// Intended for building synthetic sheets; decoded images stay immutable.
    pub fn with_rect(&self, rect: Frame, rgba: [u8; 4]) -> Self {
        let mut data = self.data.clone();
        let right = rect.right().min(self.width);
        let bottom = rect.bottom().min(self.height);
        for y in rect.y..bottom {
            for x in rect.x..right {
                let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
                data[idx..idx + 4].copy_from_slice(&rgba);
            }
        }
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = PixelBuffer::from_rgba8(0, 0, Vec::new()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidBuffer(_)));

        let err = PixelBuffer::from_rgba8(4, 0, Vec::new()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidBuffer(_)));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = PixelBuffer::from_rgba8(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidBuffer(_)));
    }

    #[test]
    fn test_pixel_reads_are_bounds_checked() {
        let buffer = PixelBuffer::filled(3, 2, [1, 2, 3, 4]).unwrap();
        assert_eq!(buffer.pixel(0, 0), Some([1, 2, 3, 4]));
        assert_eq!(buffer.pixel(2, 1), Some([1, 2, 3, 4]));
        assert_eq!(buffer.pixel(3, 0), None);
        assert_eq!(buffer.pixel(0, 2), None);
        assert_eq!(buffer.pixel(-1, 0), None);
        assert_eq!(buffer.pixel_count(), 6);
    }

    #[test]
    fn test_with_rect_clips_to_buffer() {
        let buffer = PixelBuffer::transparent(4, 4).unwrap();
        let painted = buffer.with_rect(Frame::new(2, 2, 10, 10), [255, 0, 0, 255]);
        assert_eq!(painted.pixel(1, 1), Some([0, 0, 0, 0]));
        assert_eq!(painted.pixel(3, 3), Some([255, 0, 0, 255]));
        // Original untouched.
        assert_eq!(buffer.pixel(3, 3), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_with_rect_near_u32_max_is_noop() {
        let buffer = PixelBuffer::transparent(4, 4).unwrap();
        let painted = buffer.with_rect(Frame::new(u32::MAX - 1, 0, 8, 8), [255, 0, 0, 255]);
        assert_eq!(painted, buffer);
    }

    #[test]
    fn test_map_pixels_preserves_dimensions() {
        let buffer = PixelBuffer::filled(2, 3, [10, 20, 30, 40]).unwrap();
        let mapped = buffer.map_pixels(|[r, g, b, _]| [r, g, b, 255]);
        assert_eq!(mapped.size(), buffer.size());
        assert_eq!(mapped.pixel(1, 2), Some([10, 20, 30, 255]));
    }
}
