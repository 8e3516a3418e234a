//! Background color removal.
//!
//! Sheets exported with a solid background color are made transparent by
//! clearing the alpha of every pixel within a Euclidean RGB distance of the
//! key color. Run this before alpha-mode detection.

use crate::buffer::PixelBuffer;

/// Default RGB distance treated as background.
pub const DEFAULT_TOLERANCE: f64 = 10.0;

/// Euclidean distance between two RGB colors.
pub fn color_distance(a: [u8; 3], b: [u8; 3]) -> f64 {
    let dr = a[0] as f64 - b[0] as f64;
    let dg = a[1] as f64 - b[1] as f64;
    let db = a[2] as f64 - b[2] as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// Returns a copy with pixels near `key` made fully transparent.
pub fn remove_background(buffer: &PixelBuffer, key: [u8; 3], tolerance: f64) -> PixelBuffer {
    let mut cleared = 0usize;
    let result = buffer.map_pixels(|[r, g, b, a]| {
        if color_distance([r, g, b], key) <= tolerance {
            cleared += 1;
            [r, g, b, 0]
        } else {
            [r, g, b, a]
        }
    });
    log::debug!(
        "Cleared {} of {} pixels matching #{:02x}{:02x}{:02x}",
        cleared,
        buffer.pixel_count(),
        key[0],
        key[1],
        key[2]
    );
    result
}

/// Most common color among the four corners; ties go to the top-left corner.
pub fn dominant_corner_color(buffer: &PixelBuffer) -> [u8; 3] {
    let (w, h) = (buffer.width() as i64, buffer.height() as i64);
    let corners: Vec<[u8; 3]> = [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)]
        .iter()
        .filter_map(|&(x, y)| buffer.pixel(x, y))
        .map(|[r, g, b, _]| [r, g, b])
        .collect();

    let mut best = corners.first().copied().unwrap_or([0, 0, 0]);
    let mut best_count = 0;
    for color in &corners {
        let count = corners.iter().filter(|c| *c == color).count();
        if count > best_count {
            best = *color;
            best_count = count;
        }
    }
    best
}

/// Parses `RRGGBB` or `#RRGGBB`.
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#').unwrap_or(s);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}
