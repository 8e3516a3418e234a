//! SheetCade Canonical Types
//!
//! This crate defines the serializable data model shared by the SheetCade
//! sprite-sheet analysis engine, the CLI, and downstream asset tooling.
//!
//! # Overview
//!
//! - **Detection options**: how content pixels are recognised and which
//!   frame-detection strategy runs (`alpha`, `black_border`, `manual`)
//! - **Frames**: axis-aligned rectangles inside a decoded sprite sheet
//! - **Analysis results**: ordered frames plus the inferred layout
//! - **Asset records**: sprite-sheet and animation records built from frames
//! - **Behavior modules**: NPC behavior records as a tagged sum type
//!
//! # Example
//!
//! ```
//! use sheetcade_spec::{DetectionOptions, EmptyCellPolicy};
//!
//! let options = DetectionOptions::alpha()
//!     .with_grid(32, 32, 4)
//!     .with_empty_cell_policy(EmptyCellPolicy::Drop);
//!
//! assert!(options.validate().is_ok());
//! assert!(options.grid_hint().is_some());
//! ```

pub mod behavior;
pub mod frame;
pub mod options;
pub mod record;
pub mod result;

pub use behavior::{
    update, Activity, AuthorityModule, BehaviorModule, CombatModule, Direction,
    InteractionModule, MovementModule, MovementState, NpcState, Surroundings, TilePos,
};
pub use frame::{Frame, FrameSize};
pub use options::{DetectionMode, DetectionOptions, EmptyCellPolicy, GridHint, OptionsError};
pub use record::{AnimationGroup, AnimationRecord, SpriteSheetRecord};
pub use result::{
    AnalysisReport, AnalysisResult, DetectionIssue, DetectionStrategy, Layout,
    DEFAULT_FRAME_SIZE,
};
