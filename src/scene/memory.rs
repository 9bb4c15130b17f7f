//! In-memory scene loaded from a JSON description.
//!
//! A scene file captures what the authoring tool would report at export
//! time: playback settings, working units, the active selection, and a flat
//! list of objects with their parent and animated channels.
//!
//! ```json
//! {
//!   "playback": { "min": 1, "max": 24 },
//!   "time_unit": "film",
//!   "length_unit": "cm",
//!   "selection": ["hips"],
//!   "objects": [
//!     { "name": "hips", "type": "joint",
//!       "channels": { "translateY": 90.0, "rotateZ": [[1, 0.0], [2, 5.0]] } },
//!     { "name": "spine", "type": "joint", "parent": "hips" }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Attribute, Scene};
use crate::util::{Error, Result};

/// Object type name the tool uses for joints.
pub const JOINT_TYPE: &str = "joint";

fn default_object_type() -> String {
    "transform".to_string()
}

fn default_time_unit() -> String {
    "film".to_string()
}

fn default_length_unit() -> String {
    "cm".to_string()
}

/// Playback range as reported by the tool.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Playback {
    pub min: f64,
    pub max: f64,
}

/// Values of one attribute over time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Channel {
    /// Same value on every frame.
    Constant(f64),
    /// Explicit `[frame, value]` keys; frames without a key are unresolvable.
    Keys(Vec<(i64, f64)>),
}

impl Channel {
    /// Value at an exact frame. No interpolation between keys.
    pub fn value_at(&self, frame: i64) -> Option<f64> {
        match self {
            Self::Constant(v) => Some(*v),
            Self::Keys(keys) => keys.iter().find(|(f, _)| *f == frame).map(|(_, v)| *v),
        }
    }
}

/// One scene object.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectDesc {
    pub name: String,
    #[serde(rename = "type", default = "default_object_type")]
    pub object_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub channels: HashMap<String, Channel>,
}

/// Serialized scene description.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneDesc {
    pub playback: Playback,
    #[serde(default = "default_time_unit")]
    pub time_unit: String,
    #[serde(default = "default_length_unit")]
    pub length_unit: String,
    #[serde(default)]
    pub selection: Vec<String>,
    pub objects: Vec<ObjectDesc>,
}

/// Validated scene with resolved parent/child links.
///
/// Handles are indices into the object list.
#[derive(Clone, Debug)]
pub struct MemoryScene {
    desc: SceneDesc,
    by_name: HashMap<String, usize>,
    children: Vec<Vec<usize>>,
    channels: Vec<HashMap<Attribute, Channel>>,
    selection: Vec<usize>,
}

impl MemoryScene {
    /// Validate a description and link its hierarchy.
    ///
    /// Children keep the order in which they appear in `objects`.
    pub fn from_desc(desc: SceneDesc) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(desc.objects.len());
        for (i, obj) in desc.objects.iter().enumerate() {
            if by_name.insert(obj.name.clone(), i).is_some() {
                return Err(Error::invalid(format!("duplicate object name `{}`", obj.name)));
            }
        }

        let mut children = vec![Vec::new(); desc.objects.len()];
        let mut parents = vec![None; desc.objects.len()];
        for (i, obj) in desc.objects.iter().enumerate() {
            if let Some(parent) = &obj.parent {
                let p = *by_name
                    .get(parent)
                    .ok_or_else(|| Error::UnknownObject(parent.clone()))?;
                children[p].push(i);
                parents[i] = Some(p);
            }
        }

        // Walking up from any object must reach a root within n steps.
        for (i, obj) in desc.objects.iter().enumerate() {
            let mut cur = parents[i];
            let mut steps = 0;
            while let Some(p) = cur {
                steps += 1;
                if steps > desc.objects.len() {
                    return Err(Error::invalid(format!("parent cycle through `{}`", obj.name)));
                }
                cur = parents[p];
            }
        }

        let mut channels = Vec::with_capacity(desc.objects.len());
        for obj in &desc.objects {
            let mut map = HashMap::with_capacity(obj.channels.len());
            for (name, channel) in &obj.channels {
                let attr: Attribute = name.parse()?;
                if let Channel::Keys(keys) = channel {
                    for (n, (frame, _)) in keys.iter().enumerate() {
                        if keys[..n].iter().any(|(f, _)| f == frame) {
                            return Err(Error::invalid(format!(
                                "`{}.{}` has two keys on frame {}",
                                obj.name, name, frame
                            )));
                        }
                    }
                }
                map.insert(attr, channel.clone());
            }
            channels.push(map);
        }

        let selection = desc
            .selection
            .iter()
            .map(|name| by_name.get(name).copied().ok_or_else(|| Error::UnknownObject(name.clone())))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            desc,
            by_name,
            children,
            channels,
            selection,
        })
    }

    /// Parse a JSON scene description.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let desc: SceneDesc = serde_json::from_str(json)?;
        Self::from_desc(desc)
    }

    /// Read a JSON scene description.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let desc: SceneDesc = serde_json::from_reader(reader)?;
        Self::from_desc(desc)
    }

    /// Open a JSON scene file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// The underlying description.
    pub fn desc(&self) -> &SceneDesc {
        &self.desc
    }

    /// Handle of an object by name.
    pub fn handle(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Handle of an object by name, failing if it does not exist.
    pub fn find(&self, name: &str) -> Result<usize> {
        self.handle(name).ok_or_else(|| Error::UnknownObject(name.to_string()))
    }

    /// Number of objects in the scene.
    pub fn num_objects(&self) -> usize {
        self.desc.objects.len()
    }
}

impl Scene for MemoryScene {
    type Handle = usize;

    fn is_joint(&self, handle: &usize) -> bool {
        self.desc
            .objects
            .get(*handle)
            .is_some_and(|obj| obj.object_type == JOINT_TYPE)
    }

    fn list_children(&self, handle: &usize) -> Vec<usize> {
        self.children.get(*handle).cloned().unwrap_or_default()
    }

    fn display_name(&self, handle: &usize) -> String {
        self.desc
            .objects
            .get(*handle)
            .map(|obj| obj.name.clone())
            .unwrap_or_default()
    }

    fn attribute_at_frame(&self, handle: &usize, attribute: Attribute, frame: i64) -> Option<f64> {
        let channels = self.channels.get(*handle)?;
        match channels.get(&attribute) {
            Some(channel) => channel.value_at(frame),
            None => Some(attribute.default_value()),
        }
    }

    fn playback_frame_range(&self) -> (f64, f64) {
        (self.desc.playback.min, self.desc.playback.max)
    }

    fn working_time_unit(&self) -> String {
        self.desc.time_unit.clone()
    }

    fn working_length_unit(&self) -> String {
        self.desc.length_unit.clone()
    }

    fn selection(&self) -> Vec<usize> {
        self.selection.clone()
    }
}
