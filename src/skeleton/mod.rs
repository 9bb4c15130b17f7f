//! Skeleton hierarchy.
//!
//! - [`Skeleton`] / [`Segment`] - Arena-backed joint tree with parent ids
//! - [`build_root`] - Discovers the tree from a scene-graph root

mod builder;
mod segment;

pub use builder::{build_root, BuildOutcome};
pub use segment::{PreOrder, Segment, SegmentId, Skeleton, GLOBAL_PARENT};
