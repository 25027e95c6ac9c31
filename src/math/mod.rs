//! Shared vector/quaternion aliases and small geometric helpers.
//!
//! Short aliases over nalgebra's vector/quaternion types, used everywhere
//! else in the crate, plus the world-space tolerances the rest of the
//! collision kernel is tuned against.

mod aabb;
mod closest;
mod plane;
mod vec;

pub use aabb::Aabb;
pub use closest::{
    closest_point_on_segment, closest_point_on_triangle, closest_points_segment_segment,
};
pub use plane::Plane;
pub use vec::{safe_normalize, Quat, Vec3};

/// General geometric epsilon (meters).
pub const DIST_EPS: f32 = 1.0e-6;

/// "Very close" tolerance, looser than [`DIST_EPS`] — used where exact
/// equality would be too brittle (plane-fallback decisions, TOI brackets).
pub const LARGE_EPS: f32 = 1.0e-4;

/// Treated as touching when within this distance.
pub const TOUCH_EPS: f32 = 1.0e-3;

/// Minimum squared movement considered meaningful (m^2).
pub const MIN_MOVE_SQ: f32 = 1.0e-8;

/// Cosine of the steepest slope still considered walkable (50 degrees).
/// `normal.z >= WALKABLE_COS_MIN` passes.
pub const WALKABLE_COS_MIN: f32 = 0.642_787_6;

/// Maximum number of slide iterations per sweep-and-slide pass.
pub const DEFAULT_MAX_ITERATIONS: u32 = 4;

/// Below this dot-product magnitude, two normals are treated as parallel.
pub const PARALLEL_EPS: f32 = 1.0e-5;

/// Auto-step climb height.
pub const STEP_HEIGHT: f32 = 2.3;

/// Extra downward search slack applied on the mover's down pass, beyond
/// whatever vertical drop the tick already intends.
pub const STEP_DOWN: f32 = 4.0;

/// Downward acceleration (m/s^2).
pub const GRAVITY: f32 = 19.291_1;

/// Terminal fall speed (negative z, m/s).
pub const TERMINAL_VZ: f32 = -60.0;

/// Vertical speed applied on a jump trigger (m/s).
pub const JUMP_VZ: f32 = 7.955_77;

/// How close a predicted landing must be to the candidate plane to be
/// accepted as a snap, during free-fall descent.
pub const LANDING_TOLERANCE: f32 = 0.1;

/// Maximum penetration allowed at a down-snap candidate before the snap is
/// rejected in favor of the highest upward-facing penetrating contact.
pub const DOWN_SNAP_MAX_PENETRATION: f32 = 0.02;

/// Minimum net height gain across a tick's up/down passes to call it an
/// auto-step climb rather than settling back onto the same flat ground.
pub const GROUND_Z_RISE_THRESHOLD: f32 = 0.05;

/// Contact offset kept after depenetration, proportional to capsule radius.
pub fn base_skin(radius: f32) -> f32 {
    (0.02 * radius).clamp(0.001, 0.05)
}

/// Vertical snap slack used by ground-height queries, proportional to
/// capsule radius.
pub fn ground_z_bias(radius: f32) -> f32 {
    (0.05 * radius).clamp(0.01, 0.05)
}
