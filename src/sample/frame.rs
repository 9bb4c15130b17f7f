//! Per-frame transform samples.

use std::ops::{Add, Sub};

use crate::util::{swap_xy, DVec3};

/// Transform as read from the authoring tool, in its native axis convention.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawSample {
    /// `translateX/Y/Z` in working units.
    pub translate: DVec3,
    /// `rotateX/Y/Z` in degrees.
    pub rotate: DVec3,
    /// `scaleX`, used as the uniform scale factor.
    pub scale: f64,
}

impl RawSample {
    pub fn new(translate: DVec3, rotate: DVec3, scale: f64) -> Self {
        Self { translate, rotate, scale }
    }
}

/// One transform sample in HTR convention.
///
/// Translation is in working units, rotation in degrees (Euler ZYX), scale
/// is dimensionless. Subtracting two frames gives their component-wise
/// delta; adding a delta back to the base frame restores the sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub translation: DVec3,
    pub rotation: DVec3,
    pub scale: f64,
}

impl Frame {
    /// All-zero frame, the delta of any frame against itself.
    pub const ZERO: Self = Self {
        translation: DVec3::ZERO,
        rotation: DVec3::ZERO,
        scale: 0.0,
    };

    /// Rest transform: no offset, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: DVec3::ZERO,
        rotation: DVec3::ZERO,
        scale: 1.0,
    };

    pub fn new(translation: DVec3, rotation: DVec3, scale: f64) -> Self {
        Self { translation, rotation, scale }
    }

    /// Convert a tool sample, swapping X and Y of translation and rotation.
    pub fn from_raw(raw: RawSample) -> Self {
        Self {
            translation: swap_xy(raw.translate),
            rotation: swap_xy(raw.rotate),
            scale: raw.scale,
        }
    }

    /// `Tx, Ty, Tz, Rx, Ry, Rz, SF` in output column order.
    pub fn components(&self) -> [f64; 7] {
        let t = self.translation;
        let r = self.rotation;
        [t.x, t.y, t.z, r.x, r.y, r.z, self.scale]
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Sub for Frame {
    type Output = Frame;

    fn sub(self, rhs: Frame) -> Frame {
        Frame {
            translation: self.translation - rhs.translation,
            rotation: self.rotation - rhs.rotation,
            scale: self.scale - rhs.scale,
        }
    }
}

impl Add for Frame {
    type Output = Frame;

    fn add(self, rhs: Frame) -> Frame {
        Frame {
            translation: self.translation + rhs.translation,
            rotation: self.rotation + rhs.rotation,
            scale: self.scale + rhs.scale,
        }
    }
}
