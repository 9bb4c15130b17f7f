//! Math type re-exports and axis-convention helpers.
//!
//! Transform samples are kept in double precision so that deltas against
//! the base pose stay exact for the values authoring tools usually key.

pub use glam::DVec3;

/// Swap the X and Y components, passing Z through.
///
/// Authoring tools report joint chains X-forward; HTR readers expect the
/// primary chain axis on Y.
#[inline]
pub fn swap_xy(v: DVec3) -> DVec3 {
    DVec3::new(v.y, v.x, v.z)
}
