//! World-frame <-> internal/model-file frame conversion.
//!
//! Model files are authored in a frame mirrored across the map's midpoint
//! relative to the world frame the rest of this crate (and its callers)
//! use. `WORLD_OFFSET` is the midpoint coordinate; converting is its own
//! inverse, so the same function is used both ways.

use crate::math::Vec3;

/// Map-space midpoint coordinate the internal frame is mirrored around.
pub const WORLD_OFFSET: f32 = 32768.0;

/// Converts a point between the world frame and the internal/model-file
/// frame. Self-inverse: `to_internal(to_internal(p)) == p`.
pub fn mirror_frame(p: Vec3) -> Vec3 {
    Vec3::new(
        2.0 * WORLD_OFFSET - p.x,
        2.0 * WORLD_OFFSET - p.y,
        p.z,
    )
}
