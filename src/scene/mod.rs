//! Boundary to the authoring tool's scene.
//!
//! The exporter never owns scene objects. It only asks the tool a handful
//! of read-only questions through [`Scene`]: what an object is, what its
//! children are, what a transform attribute reads at a frame, and how the
//! timeline is set up. [`MemoryScene`] is a self-contained implementation
//! backed by a JSON scene description.

mod memory;

pub use memory::{Channel, MemoryScene, ObjectDesc, Playback, SceneDesc, JOINT_TYPE};

use std::fmt;
use std::str::FromStr;

use crate::util::Error;

/// Transform attribute read per segment per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    TranslateX,
    TranslateY,
    TranslateZ,
    RotateX,
    RotateY,
    RotateZ,
    ScaleX,
}

impl Attribute {
    /// All sampled attributes, in query order.
    pub const ALL: [Attribute; 7] = [
        Attribute::TranslateX,
        Attribute::TranslateY,
        Attribute::TranslateZ,
        Attribute::RotateX,
        Attribute::RotateY,
        Attribute::RotateZ,
        Attribute::ScaleX,
    ];

    /// Attribute name as the authoring tool spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TranslateX => "translateX",
            Self::TranslateY => "translateY",
            Self::TranslateZ => "translateZ",
            Self::RotateX => "rotateX",
            Self::RotateY => "rotateY",
            Self::RotateZ => "rotateZ",
            Self::ScaleX => "scaleX",
        }
    }

    /// Value the tool reports for an attribute that was never set.
    pub fn default_value(&self) -> f64 {
        match self {
            Self::ScaleX => 1.0,
            _ => 0.0,
        }
    }
}

impl FromStr for Attribute {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.as_str() == s)
            .ok_or_else(|| Error::invalid(format!("unknown attribute `{s}`")))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only queries against the authoring tool.
///
/// Implementations are called from the single export thread only.
pub trait Scene {
    /// Opaque reference to a scene object.
    type Handle: Clone + fmt::Debug;

    /// Whether the object is typed as a joint.
    fn is_joint(&self, handle: &Self::Handle) -> bool;

    /// Direct children in the tool's own order.
    fn list_children(&self, handle: &Self::Handle) -> Vec<Self::Handle>;

    /// Unique display name (or path) of the object.
    fn display_name(&self, handle: &Self::Handle) -> String;

    /// Attribute value at an integer scene frame, `None` if it cannot be resolved.
    fn attribute_at_frame(&self, handle: &Self::Handle, attribute: Attribute, frame: i64) -> Option<f64>;

    /// Playback range as `(min, max)` frame numbers.
    fn playback_frame_range(&self) -> (f64, f64);

    /// Working time unit name (`ntsc`, `film`, `29.97fps`, ...).
    fn working_time_unit(&self) -> String;

    /// Working length unit label (`cm`, `mm`, ...).
    fn working_length_unit(&self) -> String;

    /// Currently selected objects, in selection order.
    fn selection(&self) -> Vec<Self::Handle> {
        Vec::new()
    }
}
