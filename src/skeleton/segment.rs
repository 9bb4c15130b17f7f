//! Segment arena.

use std::fmt;
use std::ops::Index;

use crate::sample::Timeline;

/// Name written as the parent of a root segment.
pub const GLOBAL_PARENT: &str = "GLOBAL";

/// Stable index of a segment within its [`Skeleton`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentId(pub(crate) usize);

impl SegmentId {
    /// Id of the root segment.
    pub const ROOT: Self = Self(0);

    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One joint of the exported skeleton.
#[derive(Clone, Debug)]
pub struct Segment<H> {
    id: SegmentId,
    name: String,
    parent: Option<SegmentId>,
    children: Vec<SegmentId>,
    handle: H,
    timeline: Timeline,
}

impl<H> Segment<H> {
    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent segment, `None` when attached to the global frame.
    pub fn parent(&self) -> Option<SegmentId> {
        self.parent
    }

    /// Children in scene-graph order.
    pub fn children(&self) -> &[SegmentId] {
        &self.children
    }

    /// Scene object this segment was built from.
    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Tree of segments stored in an arena.
///
/// Segment 0 is the root. Segments are only ever appended, and a child is
/// always appended after its parent, so parents never change once set.
#[derive(Clone, Debug)]
pub struct Skeleton<H> {
    segments: Vec<Segment<H>>,
}

impl<H> Skeleton<H> {
    /// Start a tree with its root segment.
    pub(crate) fn with_root(name: String, handle: H) -> Self {
        Self {
            segments: vec![Segment {
                id: SegmentId::ROOT,
                name,
                parent: None,
                children: Vec::new(),
                handle,
                timeline: Timeline::new(),
            }],
        }
    }

    /// Append a segment under `parent`.
    pub(crate) fn push_child(&mut self, parent: SegmentId, name: String, handle: H) -> SegmentId {
        let id = SegmentId(self.segments.len());
        self.segments.push(Segment {
            id,
            name,
            parent: Some(parent),
            children: Vec::new(),
            handle,
            timeline: Timeline::new(),
        });
        self.segments[parent.0].children.push(id);
        id
    }

    pub(crate) fn set_timeline(&mut self, id: SegmentId, timeline: Timeline) {
        self.segments[id.0].timeline = timeline;
    }

    /// Number of segments, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: a skeleton has at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn root(&self) -> &Segment<H> {
        &self.segments[SegmentId::ROOT.0]
    }

    pub fn get(&self, id: SegmentId) -> Option<&Segment<H>> {
        self.segments.get(id.0)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Segment<H>> {
        self.segments.iter().find(|s| s.name == name)
    }

    pub fn parent_of(&self, id: SegmentId) -> Option<&Segment<H>> {
        self.get(id)?.parent.and_then(|p| self.get(p))
    }

    /// Name written as a segment's parent: the parent's name, or `GLOBAL`.
    pub fn parent_name(&self, id: SegmentId) -> &str {
        self.parent_of(id).map_or(GLOBAL_PARENT, |p| p.name())
    }

    pub fn children_of(&self, id: SegmentId) -> impl Iterator<Item = &Segment<H>> + '_ {
        self.get(id)
            .into_iter()
            .flat_map(|s| s.children.iter())
            .map(move |c| &self.segments[c.0])
    }

    /// Number of ancestors between a segment and the root.
    pub fn depth(&self, id: SegmentId) -> usize {
        let mut depth = 0;
        let mut cur = self.get(id).and_then(|s| s.parent);
        while let Some(p) = cur {
            depth += 1;
            cur = self.segments[p.0].parent;
        }
        depth
    }

    /// Segments in arena order.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment<H>> {
        self.segments.iter()
    }

    /// Depth-first pre-order walk from the root, children in scene order.
    pub fn pre_order(&self) -> PreOrder<'_, H> {
        PreOrder {
            skeleton: self,
            stack: vec![SegmentId::ROOT],
        }
    }

    /// Indented hierarchy listing, two spaces per level, no trailing newline.
    pub fn to_hierarchy_string(&self) -> String {
        self.pre_order()
            .map(|s| format!("{}{}", "  ".repeat(self.depth(s.id)), s.name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<H> Index<SegmentId> for Skeleton<H> {
    type Output = Segment<H>;

    fn index(&self, id: SegmentId) -> &Segment<H> {
        &self.segments[id.0]
    }
}

impl<H> fmt::Display for Skeleton<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hierarchy_string())
    }
}

/// Pre-order iterator over a [`Skeleton`].
pub struct PreOrder<'a, H> {
    skeleton: &'a Skeleton<H>,
    stack: Vec<SegmentId>,
}

impl<'a, H> Iterator for PreOrder<'a, H> {
    type Item = &'a Segment<H>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let segment = self.skeleton.get(id)?;
        self.stack.extend(segment.children.iter().rev());
        Some(segment)
    }
}
