//! subpic core - Subtitle frame geometry and placement
//!
//! This crate provides the subtitle frame capability trait, the size fitter
//! that clamps frames to an allocator maximum, and the coordinate mapper that
//! places a frame's dirty region on the display surface.

pub mod config;
pub mod error;
pub mod fit;
pub mod frame;
pub mod geometry;
pub mod kind;
pub mod mapper;

pub use config::AllocatorConfig;
pub use error::{Error, Result};
pub use fit::{fit_size, FittedSize};
pub use frame::{FrameState, ReferenceTime, SubPic, SubtitleFrame};
pub use geometry::{Point, Rect, Size};
pub use kind::SubtitleKind;
pub use mapper::{map_source_and_dest, Placement, PlacementRequest};
