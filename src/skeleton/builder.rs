//! Builds a [`Skeleton`] from a scene-graph root.
//!
//! Only joints become segments. A non-joint child is dropped together with
//! everything below it: recursion continues only through objects already
//! confirmed as joints, so a joint parented under a non-joint is not
//! exported even if its own parent chain leads back to the root.

use std::collections::HashSet;

use tracing::debug;

use super::segment::{SegmentId, Skeleton};
use crate::scene::Scene;
use crate::util::{Error, Result};

/// Result of visiting one scene-graph child.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The child is a joint and was added to the tree.
    Included(SegmentId),
    /// The child is not a joint; it and its descendants were skipped.
    Excluded,
}

/// Build the joint tree rooted at `root`.
///
/// Fails with [`Error::NotAJoint`] if `root` is not a joint. Timelines of
/// the returned segments are empty.
#[tracing::instrument(skip_all)]
pub fn build_root<S: Scene>(scene: &S, root: &S::Handle) -> Result<Skeleton<S::Handle>> {
    let name = scene.display_name(root);
    if !scene.is_joint(root) {
        return Err(Error::NotAJoint(name));
    }
    check_name(&name)?;

    let mut builder = HierarchyBuilder {
        scene,
        skeleton: Skeleton::with_root(name.clone(), root.clone()),
        names: HashSet::from([name]),
        num_segments: 1,
    };
    for child in scene.list_children(root) {
        builder.build_child(&child, SegmentId::ROOT)?;
    }

    debug_assert_eq!(builder.num_segments, builder.skeleton.len());
    debug!(segments = builder.num_segments, "built hierarchy");
    Ok(builder.skeleton)
}

struct HierarchyBuilder<'a, S: Scene> {
    scene: &'a S,
    skeleton: Skeleton<S::Handle>,
    names: HashSet<String>,
    num_segments: usize,
}

impl<S: Scene> HierarchyBuilder<'_, S> {
    fn build_child(&mut self, handle: &S::Handle, parent: SegmentId) -> Result<BuildOutcome> {
        let name = self.scene.display_name(handle);
        if !self.scene.is_joint(handle) {
            debug!(object = %name, "skipping non-joint and its descendants");
            return Ok(BuildOutcome::Excluded);
        }
        check_name(&name)?;
        // A repeated name also stops a scene graph that loops back on itself.
        if !self.names.insert(name.clone()) {
            return Err(Error::DuplicateSegmentName(name));
        }

        let id = self.skeleton.push_child(parent, name, handle.clone());
        self.num_segments += 1;

        for child in self.scene.list_children(handle) {
            self.build_child(&child, id)?;
        }
        Ok(BuildOutcome::Included(id))
    }
}

/// Names are written between tabs and brackets, one per line.
fn check_name(name: &str) -> Result<()> {
    if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c == '[' || c == ']') {
        return Err(Error::InvalidSegmentName(name.to_string()));
    }
    Ok(())
}
