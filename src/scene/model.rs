use super::TriangleSource;
use crate::bih::{build_bih, BihTree};
use crate::geom::Triangle;
use crate::math::Aabb;

/// An immutable mesh loaded once and shared across every instance that
/// places it in the world (a building, a tree, a rock). Triangles are
/// stored in model-local space; instances apply their own transform.
#[derive(Debug)]
pub struct Model {
    pub path: String,
    triangles: Vec<Triangle>,
    local_bih: BihTree,
}

impl Model {
    pub fn new(path: String, triangles: Vec<Triangle>) -> Self {
        let aabbs: Vec<Aabb> = triangles.iter().map(Triangle::aabb).collect();
        let local_bih = build_bih(&aabbs);
        Self {
            path,
            triangles,
            local_bih,
        }
    }

    pub fn local_bounds(&self) -> Aabb {
        self.local_bih.bounds()
    }
}

impl TriangleSource for Model {
    fn query<'a>(&'a self, aabb: &Aabb) -> Box<dyn Iterator<Item = u32> + 'a> {
        Box::new(self.local_bih.query_aabb(*aabb))
    }

    fn triangle(&self, index: u32) -> &Triangle {
        &self.triangles[index as usize]
    }

    fn len(&self) -> usize {
        self.triangles.len()
    }
}
