//! Per-segment timelines.

use super::frame::Frame;

/// Frames of one segment, one per timeline index, contiguous from 0.
///
/// Index 0 is the base pose. Every other frame is written relative to it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    frames: Vec<Frame>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
        }
    }

    /// Append the next frame.
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Raw frame at a timeline index.
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// All raw frames.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Base pose (frame 0), raw.
    pub fn base(&self) -> Option<&Frame> {
        self.frames.first()
    }

    /// `frame[index] - frame[0]`.
    pub fn delta(&self, index: usize) -> Option<Frame> {
        let base = self.base()?;
        self.get(index).map(|f| *f - *base)
    }

    /// Deltas against the base pose for every frame, frame 0 included.
    pub fn deltas(&self) -> impl Iterator<Item = Frame> + '_ {
        let base = self.base().copied().unwrap_or(Frame::ZERO);
        self.frames.iter().map(move |f| *f - base)
    }
}

impl FromIterator<Frame> for Timeline {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}
