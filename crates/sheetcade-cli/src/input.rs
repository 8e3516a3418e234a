//! Sprite-sheet loading.
//!
//! Reads an image file, hashes the raw bytes and decodes it into the RGBA
//! buffer the analysis engine works on. The header is checked against the
//! pixel budget before any pixel data is allocated.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::ImageReader;

use sheetcade_analysis::{AnalysisError, PixelBuffer};
use thiserror::Error;

use crate::commands::json_output::error_codes;

/// Errors from loading a sprite sheet.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Invalid image: {0}")]
    Buffer(#[from] AnalysisError),
}

impl InputError {
    /// Stable error code for JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            InputError::Read(_) => error_codes::FILE_READ,
            InputError::Decode(_) => error_codes::IMAGE_DECODE,
            InputError::Buffer(AnalysisError::SizeExceeded { .. }) => error_codes::ANALYSIS,
            InputError::Buffer(_) => error_codes::INVALID_BUFFER,
        }
    }
}

/// A decoded sprite sheet.
#[derive(Debug, Clone)]
pub struct LoadedSheet {
    /// Decoded pixels.
    pub buffer: PixelBuffer,
    /// BLAKE3 hash of the file bytes.
    pub hash: String,
}

/// Reads and decodes the sheet at `path`, rejecting images larger than
/// `max_pixels`.
pub fn load_sheet(path: &Path, max_pixels: u64) -> Result<LoadedSheet, InputError> {
    let data = fs::read(path)?;
    let hash = blake3::hash(&data).to_hex().to_string();
    let buffer = decode_sheet(&data, max_pixels)?;
    log::debug!(
        "Loaded {} ({}x{}, hash {})",
        path.display(),
        buffer.width(),
        buffer.height(),
        &hash[..16]
    );
    Ok(LoadedSheet { buffer, hash })
}

/// Decodes encoded image bytes into an RGBA buffer.
///
/// Only the header is read before the size check, so an oversized image
/// fails with [`AnalysisError::SizeExceeded`] without being decoded.
pub fn decode_sheet(data: &[u8], max_pixels: u64) -> Result<PixelBuffer, InputError> {
    let (width, height) = ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .into_dimensions()?;
    let pixels = u64::from(width) * u64::from(height);
    if pixels > max_pixels {
        return Err(AnalysisError::SizeExceeded {
            pixels,
            max: max_pixels,
        }
        .into());
    }

    let image = image::load_from_memory(data)?.to_rgba8();
    let (width, height) = image.dimensions();
    Ok(PixelBuffer::from_rgba8(width, height, image.into_raw())?)
}

/// Whether `path` has a `.png` extension (case-insensitive).
pub fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}
