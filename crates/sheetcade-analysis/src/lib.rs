//! SheetCade Sprite-Sheet Analysis Engine
//!
//! This crate finds the individual frames packed into a decoded sprite sheet
//! and infers how they are laid out. Analysis is pure and synchronous: the
//! same pixels and options always produce the same ordered frames.
//!
//! # Features
//!
//! - **Content tests**: alpha threshold or opaque-non-black (`black_border` mode)
//! - **Grid scan**: fixed cell size with per-cell content bounds and a
//!   black-border classifier
//! - **Flood fill**: 4-connected component labelling for free-form sheets
//! - **Manual grids**: synthesized frames with no pixel inspection
//! - **Layout inference**: horizontal, vertical or grid with row/column counts
//! - **Supporting tools**: background removal, animation records, a result
//!   cache and a superseding background worker
//!
//! # Example
//!
//! ```
//! use sheetcade_analysis::{analyze, PixelBuffer};
//! use sheetcade_spec::{DetectionOptions, Frame, Layout};
//!
//! let sheet = PixelBuffer::transparent(128, 32)
//!     .unwrap()
//!     .with_rect(Frame::new(2, 2, 28, 28), [255, 255, 255, 255])
//!     .with_rect(Frame::new(34, 2, 28, 28), [255, 255, 255, 255])
//!     .with_rect(Frame::new(66, 2, 28, 28), [255, 255, 255, 255])
//!     .with_rect(Frame::new(98, 2, 28, 28), [255, 255, 255, 255]);
//!
//! let options = DetectionOptions::alpha().with_grid(32, 32, 4);
//! let result = analyze(&sheet, &options).unwrap();
//!
//! assert_eq!(result.frames.len(), 4);
//! assert_eq!(result.layout, Layout::Horizontal);
//! ```

pub mod analyze;
pub mod animation;
pub mod background;
pub mod border;
pub mod buffer;
pub mod cache;
pub mod cancel;
pub mod detect;
pub mod error;
pub mod layout;
pub mod order;
pub mod png;
pub mod sampler;
pub mod worker;

pub use analyze::{analyze, Analyzer, AnalyzerConfig, DEFAULT_MAX_PIXELS};
pub use animation::{build_animations, sprite_sheet_record, AnimationError};
pub use background::{dominant_corner_color, parse_hex_color, remove_background};
pub use buffer::PixelBuffer;
pub use cache::AnalysisCache;
pub use cancel::CancelToken;
pub use detect::{Detection, FrameDetector};
pub use error::AnalysisError;
pub use layout::LayoutAnalyzer;
pub use order::order_frames;
pub use worker::{AnalysisWorker, Completed, Submission};
