use crate::error::PhysError;
use crate::math::{Aabb, Vec3};

/// A vertical capsule, feet-to-head. `p0` is the lower sphere center,
/// `p1` the upper sphere center; both already inset by `radius` from the
/// character's actual feet/head `z`.
#[derive(Debug, Clone, Copy)]
pub struct Capsule {
    pub p0: Vec3,
    pub p1: Vec3,
    pub radius: f32,
}

impl Capsule {
    /// Builds a capsule from a character's feet position, total height, and
    /// radius, rejecting degenerate configurations rather than silently
    /// clamping them.
    pub fn from_feet(feet: Vec3, height: f32, radius: f32) -> Result<Self, PhysError> {
        if radius <= 0.0 || height <= 2.0 * radius {
            return Err(PhysError::ConfigInvalid {
                what: "capsule radius/height".into(),
            });
        }
        Ok(Self {
            p0: Vec3::new(feet.x, feet.y, feet.z + radius),
            p1: Vec3::new(feet.x, feet.y, feet.z + height - radius),
            radius,
        })
    }

    pub fn translated(&self, delta: Vec3) -> Capsule {
        Capsule {
            p0: self.p0 + delta,
            p1: self.p1 + delta,
            radius: self.radius,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.p0, self.p0)
            .union_point(self.p1)
            .inflate(self.radius)
    }

    pub fn feet(&self) -> Vec3 {
        Vec3::new(self.p0.x, self.p0.y, self.p0.z - self.radius)
    }

    pub fn head(&self) -> Vec3 {
        Vec3::new(self.p1.x, self.p1.y, self.p1.z + self.radius)
    }

    pub fn center(&self) -> Vec3 {
        (self.p0 + self.p1) * 0.5
    }
}
