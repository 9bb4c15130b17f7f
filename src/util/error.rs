//! Error types for the HTR exporter.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for export operations.
///
/// Every variant is fatal to the export that raised it; nothing is retried
/// and no partial output is written.
#[derive(Error, Debug)]
pub enum Error {
    /// No root object was supplied (empty selection)
    #[error("Nothing selected: select the root joint of the skeleton to export")]
    EmptySelection,

    /// The selected root object is not a joint
    #[error("Object is not a joint: {0}")]
    NotAJoint(String),

    /// Two segments in one tree resolved to the same name
    #[error("Duplicate segment name: {0}")]
    DuplicateSegmentName(String),

    /// Segment name cannot be written to an HTR file
    #[error("Invalid segment name: {0:?}")]
    InvalidSegmentName(String),

    /// Playback range yields fewer than one frame
    #[error("Invalid frame range {min}..={max}: {count} frame(s)")]
    InvalidFrameRange { min: f64, max: f64, count: i64 },

    /// Working time unit is neither a known name nor `<number>fps`
    #[error("Unknown time unit: {0}")]
    UnknownTimeUnit(String),

    /// An attribute could not be read for a segment at a frame
    #[error("Attribute {attribute} unavailable on {segment} at frame {frame}")]
    AttributeUnavailable {
        segment: String,
        frame: i64,
        attribute: &'static str,
    },

    /// A segment's timeline does not cover the document's frame count
    #[error("Timeline of {segment} has {actual} frame(s), expected {expected}")]
    IncompleteTimeline {
        segment: String,
        expected: usize,
        actual: usize,
    },

    /// Scene description references an object that does not exist
    #[error("Object not found: {0}")]
    UnknownObject(String),

    /// Invalid scene description
    #[error("Invalid scene: {0}")]
    InvalidScene(String),

    /// Finished document could not be moved into place
    #[error("Failed to persist {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON scene parse error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an invalid scene error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidScene(msg.into())
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;
