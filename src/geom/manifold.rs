use crate::math::Vec3;
use smallvec::SmallVec;

/// Deduplicated set of contact normals accumulated across a sweep-and-slide
/// pass, used to project the remaining velocity so it doesn't re-enter any
/// touched surface. Bounded to avoid unbounded growth in degenerate corner
/// cases; the overall slide loop is separately capped by
/// `PhysConfig::max_slide_iterations`.
#[derive(Debug, Default)]
pub struct ContactManifold {
    normals: SmallVec<[Vec3; 4]>,
}

/// Normals whose cosine similarity is above this are treated as the same
/// surface and not added twice.
const DUPLICATE_COS: f32 = 0.999;

impl ContactManifold {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, normal: Vec3) {
        for existing in &self.normals {
            if existing.dot(&normal) > DUPLICATE_COS {
                return;
            }
        }
        self.normals.push(normal);
    }

    pub fn len(&self) -> usize {
        self.normals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normals.is_empty()
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Normal most directly opposing `dir` (lowest dot product), if any —
    /// used to gate head-on blocks against walls.
    pub fn worst_against(&self, dir: Vec3) -> Option<Vec3> {
        self.normals
            .iter()
            .copied()
            .min_by(|a, b| dir.dot(a).partial_cmp(&dir.dot(b)).unwrap())
    }

    /// Projects `velocity` onto every touched plane in turn (iterative
    /// Gauss-Seidel-style clipping), removing only the into-surface
    /// component so sliding along two planes at once still makes progress
    /// along their shared edge.
    pub fn project(&self, velocity: Vec3) -> Vec3 {
        let mut v = velocity;
        for normal in &self.normals {
            let into_surface = v.dot(normal);
            if into_surface < 0.0 {
                v -= *normal * into_surface;
            }
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_normals_are_not_added_twice() {
        let mut m = ContactManifold::new();
        m.push(Vec3::new(0.0, 0.0, 1.0));
        m.push(Vec3::new(0.0, 0.0, 1.0001).normalize());
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn project_removes_only_into_surface_component() {
        let mut m = ContactManifold::new();
        m.push(Vec3::new(0.0, 0.0, 1.0));
        let v = Vec3::new(1.0, 0.0, -2.0);
        let projected = m.project(v);
        assert!((projected.z).abs() < 1e-6);
        assert!((projected.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn corner_of_two_planes_still_allows_edge_slide() {
        let mut m = ContactManifold::new();
        m.push(Vec3::new(1.0, 0.0, 0.0));
        m.push(Vec3::new(0.0, 1.0, 0.0));
        let v = Vec3::new(-1.0, -1.0, -1.0);
        let projected = m.project(v);
        assert!(projected.x.abs() < 1e-6);
        assert!(projected.y.abs() < 1e-6);
        assert!((projected.z + 1.0).abs() < 1e-6);
    }
}
