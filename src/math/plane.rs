use super::{safe_normalize, Vec3};

/// A plane in point-normal form, `dot(normal, p) - d == 0`.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Plane {
    /// Builds a plane from a triangle's winding order. Falls back to `+Z`
    /// when the triangle is degenerate (zero-area), matching the "degenerate
    /// triangle fallback" behavior specced for the triangle-normal helper.
    pub fn from_triangle(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let raw = (v1 - v0).cross(&(v2 - v0));
        let normal = safe_normalize(raw).unwrap_or(Vec3::new(0.0, 0.0, 1.0));
        let d = normal.dot(&v0);
        Self { normal, d }
    }

    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.normal.dot(&p) - self.d
    }

    pub fn project(&self, p: Vec3) -> Vec3 {
        p - self.normal * self.signed_distance(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_triangle_falls_back_to_up_normal() {
        let p = Plane::from_triangle(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        );
        assert_eq!(p.normal, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn signed_distance_matches_plane_side() {
        let p = Plane {
            normal: Vec3::new(0.0, 0.0, 1.0),
            d: 1.0,
        };
        assert!((p.signed_distance(Vec3::new(0.0, 0.0, 3.0)) - 2.0).abs() < 1e-6);
    }
}
