//! Frame range and frame rate for exported timelines.
//!
//! The authoring tool reports its playback range as floating point frame
//! numbers and its time unit as a name. Both are resolved here once per
//! export into the integer frame range and the rate written to the header.

use std::fmt;
use std::ops::Range;

use crate::util::{Error, Result};

/// Named time units and their frames-per-second.
const NAMED_TIME_UNITS: &[(&str, f64)] = &[
    ("game", 15.0),
    ("film", 24.0),
    ("pal", 25.0),
    ("ntsc", 30.0),
    ("show", 48.0),
    ("palf", 50.0),
    ("ntscf", 60.0),
];

/// Contiguous range of exported frames.
///
/// Timeline index 0 is the first authored playback frame, whatever its
/// scene frame number is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRange {
    start: i64,
    num_frames: usize,
}

impl FrameRange {
    /// Create a range of `num_frames` frames starting at scene frame `start`.
    pub fn new(start: i64, num_frames: usize) -> Result<Self> {
        if num_frames == 0 {
            return Err(Error::InvalidFrameRange {
                min: start as f64,
                max: start as f64 - 1.0,
                count: 0,
            });
        }
        Ok(Self { start, num_frames })
    }

    /// Resolve the tool's playback range into an inclusive frame range.
    ///
    /// `num_frames = round(max) - round(min) + 1`, rounding half to even.
    pub fn from_playback(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::InvalidFrameRange { min, max, count: 0 });
        }
        let start = min.round_ties_even() as i64;
        let end = max.round_ties_even() as i64;
        let count = end.saturating_sub(start).saturating_add(1);
        if count < 1 {
            return Err(Error::InvalidFrameRange { min, max, count });
        }
        Ok(Self {
            start,
            num_frames: count as usize,
        })
    }

    /// Scene frame number of timeline index 0.
    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Number of frames in the range (always at least 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.num_frames
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_frames == 0
    }

    /// Scene frame number for a timeline index.
    #[inline]
    pub fn scene_frame(&self, index: usize) -> i64 {
        self.start + index as i64
    }

    /// Timeline indices `0..len`.
    #[inline]
    pub fn indices(&self) -> Range<usize> {
        0..self.num_frames
    }
}

/// Frames per second written as `DataFrameRate`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameRate(f64);

impl FrameRate {
    /// Create from a positive, finite frames-per-second value.
    pub fn new(fps: f64) -> Result<Self> {
        if fps.is_finite() && fps > 0.0 {
            Ok(Self(fps))
        } else {
            Err(Error::UnknownTimeUnit(format!("{fps}fps")))
        }
    }

    /// Resolve a working time unit name (`ntsc`, `film`, `29.97fps`, ...).
    pub fn from_time_unit(unit: &str) -> Result<Self> {
        let unit = unit.trim();
        if let Some(&(_, fps)) = NAMED_TIME_UNITS.iter().find(|(name, _)| *name == unit) {
            return Ok(Self(fps));
        }
        let fps = unit
            .strip_suffix("fps")
            .and_then(|n| n.parse::<f64>().ok())
            .filter(|fps| fps.is_finite() && *fps > 0.0)
            .ok_or_else(|| Error::UnknownTimeUnit(unit.to_string()))?;
        Ok(Self(fps))
    }

    /// Frames per second.
    #[inline]
    pub fn fps(&self) -> f64 {
        self.0
    }

    /// Time in seconds of a timeline index, relative to index 0.
    #[inline]
    pub fn time_of(&self, index: usize) -> f64 {
        index as f64 / self.0
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
