//! HTR (Hierarchical Translation-Rotation) output.
//!
//! An HTR file has five sections, always in this order:
//! `[Header]`, `[SegmentNames&Hierarchy]`, `[BasePosition]`, one
//! `[<segment>]` frame block per segment, and the `[EndOfFile]` marker.
//! Segments are listed in pre-order everywhere.

mod constants;
mod document;
mod writer;

pub use document::ExportDocument;
pub use writer::{serialize, write_to};
