//! Core layer - timeline fundamentals shared by every stage.
//!
//! This module provides:
//! - [`FrameRange`] - The contiguous frame range being exported
//! - [`FrameRate`] - Frames per second resolved from the tool's time unit

mod time_sampling;

pub use time_sampling::{FrameRange, FrameRate};
