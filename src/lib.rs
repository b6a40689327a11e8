//! Framescrub is a scroll-driven image-sequence scrubbing engine.
//!
//! It covers the three moving parts of a scroll-scrubbed hero section:
//!
//! - Preload a numbered frame sequence with live progress ([`SequenceLoader`])
//! - Map scroll progress to a frame index and repaint a cover-fit surface ([`ScrollPlayer`])
//! - Derive overlay parameters (opacity, offset, scale) from the same progress
//!   ([`ParameterCurve`], [`OverlayRig`])
#![forbid(unsafe_code)]

pub mod core;
pub mod curve;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod overlay;
pub mod player;
pub mod presets;
pub mod sequence;
pub mod surface;
pub mod timeline;

pub use crate::core::{SurfaceSize, Vec2};
pub use crate::curve::{Breakpoint, ParameterCurve};
pub use crate::decode::PreparedFrame;
pub use crate::error::{ScrubError, ScrubResult};
pub use crate::fetch::{FrameFetcher, FsFetcher};
pub use crate::loader::SequenceLoader;
pub use crate::overlay::OverlayRig;
pub use crate::player::{PlayerState, ScrollPlayer, map_scroll_to_index};
pub use crate::presets::Section;
pub use crate::sequence::{DEFAULT_FILENAME_PREFIX, FrameSlot, SequenceSpec};
pub use crate::surface::{CoverFit, Surface};
pub use crate::timeline::ScrollTimeline;
