//! Memoization of analysis reports for UI responsiveness.
//!
//! Entries are keyed by a BLAKE3 digest over the buffer dimensions, pixel
//! bytes and every detection option, so a hit is only possible for identical
//! input. Errors are never cached.

use std::collections::VecDeque;

use sheetcade_spec::{AnalysisReport, DetectionMode, DetectionOptions, EmptyCellPolicy};

use crate::analyze::Analyzer;
use crate::buffer::PixelBuffer;
use crate::cancel::CancelToken;
use crate::error::AnalysisError;

/// Default number of cached reports.
pub const DEFAULT_CACHE_CAPACITY: usize = 16;

/// Digest identifying one (buffer, options) pair.
pub type CacheKey = [u8; 32];

/// Bounded FIFO cache of analysis reports.
#[derive(Debug)]
pub struct AnalysisCache {
    capacity: usize,
    entries: VecDeque<(CacheKey, AnalysisReport)>,
    hits: u64,
    misses: u64,
}

impl AnalysisCache {
    /// Creates a cache holding at most `capacity` reports.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Number of cached reports.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cache hits so far.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Cache misses so far.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drops all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the cached report for this input or runs the analyzer.
    pub fn get_or_run(
        &mut self,
        analyzer: &Analyzer,
        buffer: &PixelBuffer,
        options: &DetectionOptions,
        cancel: &CancelToken,
    ) -> Result<AnalysisReport, AnalysisError> {
        let key = cache_key(buffer, options);
        if let Some((_, report)) = self.entries.iter().find(|(k, _)| *k == key) {
            self.hits += 1;
            return Ok(report.clone());
        }

        self.misses += 1;
        let report = analyzer.run(buffer, options, cancel)?;
        if self.capacity > 0 {
            if self.entries.len() == self.capacity {
                self.entries.pop_front();
            }
            self.entries.push_back((key, report.clone()));
        }
        Ok(report)
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

/// Digest over the buffer and all options.
pub fn cache_key(buffer: &PixelBuffer, options: &DetectionOptions) -> CacheKey {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&buffer.width().to_le_bytes());
    hasher.update(&buffer.height().to_le_bytes());
    hasher.update(buffer.as_bytes());

    let mode: u8 = match options.mode {
        DetectionMode::Alpha => 0,
        DetectionMode::BlackBorder => 1,
        DetectionMode::Manual => 2,
    };
    let policy: u8 = match options.empty_cell_policy {
        EmptyCellPolicy::FullCell => 0,
        EmptyCellPolicy::Drop => 1,
    };
    hasher.update(&[mode, policy, options.alpha_threshold, options.black_threshold]);
    for hint in [
        options.expected_frame_width,
        options.expected_frame_height,
        options.expected_frame_count,
    ] {
        match hint {
            Some(v) => {
                hasher.update(&[1]);
                hasher.update(&v.to_le_bytes());
            }
            None => {
                hasher.update(&[0]);
            }
        }
    }
    for v in [
        options.min_width,
        options.min_height,
        options.manual_offset_x,
        options.manual_offset_y,
    ] {
        hasher.update(&v.to_le_bytes());
    }
    *hasher.finalize().as_bytes()
}
