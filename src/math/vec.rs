use nalgebra as na;

/// World-space 3D vector. Z is up, matching the internal frame used by the
/// scene and stepper (see [`crate::coords`] for the world/internal mirror).
pub type Vec3 = na::Vector3<f32>;

/// Orientation, stored as a unit quaternion throughout the crate.
pub type Quat = na::UnitQuaternion<f32>;

/// Normalize `v`, returning `None` if it is too small to have a stable
/// direction. Callers fall back to a caller-supplied default direction
/// rather than propagating a `NaN` vector.
pub fn safe_normalize(v: Vec3) -> Option<Vec3> {
    let len_sq = v.norm_squared();
    if len_sq <= super::DIST_EPS * super::DIST_EPS {
        None
    } else {
        Some(v / len_sq.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_normalize_rejects_near_zero_vectors() {
        assert!(safe_normalize(Vec3::new(0.0, 0.0, 0.0)).is_none());
        assert!(safe_normalize(Vec3::new(1.0e-7, 0.0, 0.0)).is_none());
    }

    #[test]
    fn safe_normalize_preserves_direction() {
        let n = safe_normalize(Vec3::new(3.0, 0.0, 0.0)).unwrap();
        assert!((n - Vec3::new(1.0, 0.0, 0.0)).norm() < 1.0e-6);
    }
}
