//! Export document: a sampled skeleton plus its header scalars.

use crate::core::{FrameRange, FrameRate};
use crate::skeleton::Skeleton;
use crate::util::{Error, Result};

/// Everything the writer needs, fixed once the skeleton is sampled.
#[derive(Clone, Debug)]
pub struct ExportDocument<H> {
    skeleton: Skeleton<H>,
    num_segments: usize,
    num_frames: usize,
    frame_rate: FrameRate,
    length_unit: String,
}

impl<H> ExportDocument<H> {
    /// Wrap a sampled skeleton.
    ///
    /// Every segment's timeline must hold exactly `range.len()` frames.
    pub fn new(
        skeleton: Skeleton<H>,
        range: FrameRange,
        frame_rate: FrameRate,
        length_unit: impl Into<String>,
    ) -> Result<Self> {
        let num_frames = range.len();
        if let Some(short) = skeleton.iter().find(|s| s.timeline().len() != num_frames) {
            return Err(Error::IncompleteTimeline {
                segment: short.name().to_string(),
                expected: num_frames,
                actual: short.timeline().len(),
            });
        }
        Ok(Self {
            num_segments: skeleton.len(),
            skeleton,
            num_frames,
            frame_rate,
            length_unit: length_unit.into(),
        })
    }

    pub fn skeleton(&self) -> &Skeleton<H> {
        &self.skeleton
    }

    /// All segments, root inclusive.
    pub fn num_segments(&self) -> usize {
        self.num_segments
    }

    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    pub fn frame_rate(&self) -> FrameRate {
        self.frame_rate
    }

    /// Calibration units label, as reported by the tool.
    pub fn length_unit(&self) -> &str {
        &self.length_unit
    }
}
