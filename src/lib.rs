//! # HTR
//!
//! Exports an animated joint hierarchy from an authoring tool's scene to
//! the HTR (Hierarchical Translation-Rotation) motion capture text format.
//!
//! ## Modules
//!
//! - [`util`] - Errors and math types
//! - [`core`] - Frame range and frame rate
//! - [`scene`] - Read-only boundary to the authoring tool, plus a JSON-backed scene
//! - [`skeleton`] - Joint tree discovery and the segment arena
//! - [`sample`] - Per-frame transform sampling and base-pose deltas
//! - [`htr`] - Export document and text writer
//! - [`export`] - The end-to-end pipeline
//!
//! ## Example
//!
//! ```ignore
//! use htr::prelude::*;
//!
//! let scene = MemoryScene::open("walk.json")?;
//! let summary = Exporter::new(&scene).export_selection("walk.htr")?;
//! println!("{} segments, {} frames", summary.num_segments, summary.num_frames);
//! ```

pub mod util;
pub mod core;
pub mod scene;
pub mod skeleton;
pub mod sample;
pub mod htr;
pub mod export;

// Re-export commonly used types
pub use util::{Error, Result};
pub use export::{Exporter, ExportSummary};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Error, Result, DVec3};
    pub use crate::core::{FrameRange, FrameRate};
    pub use crate::scene::{Attribute, MemoryScene, Scene};
    pub use crate::skeleton::{build_root, Segment, SegmentId, Skeleton};
    pub use crate::sample::{sample, scene_sampler, Frame, RawSample, Timeline};
    pub use crate::htr::{serialize, ExportDocument};
    pub use crate::export::{Exporter, ExportSummary};
}
