use crate::math::{Aabb, Plane, Vec3};

/// A single collidable triangle, carrying the flags the scene queries need
/// to filter hits (one-sided terrain vs. double-sided foliage, per-triangle
/// collision masks for doors/liquids/etc).
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub double_sided: bool,
    pub collision_mask: u32,
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self {
            v0,
            v1,
            v2,
            double_sided: false,
            collision_mask: u32::MAX,
        }
    }

    pub fn plane(&self) -> Plane {
        Plane::from_triangle(self.v0, self.v1, self.v2)
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.v0, self.v0)
            .union_point(self.v1)
            .union_point(self.v2)
    }

    pub fn passes_mask(&self, query_mask: u32) -> bool {
        self.collision_mask & query_mask != 0
    }
}
