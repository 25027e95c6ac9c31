use std::sync::Arc;

use super::model::Model;
use super::{InstanceRef, TriangleSource};
use crate::bih::{build_bih, BihTree};
use crate::geom::Triangle;
use crate::math::{Aabb, Quat, Vec3};

/// Placement of a shared [`Model`] in the world.
#[derive(Debug, Clone)]
pub struct ModelInstance {
    pub model: Arc<Model>,
    pub position: Vec3,
    pub rotation: Quat,
    pub world_aabb: Aabb,
}

impl ModelInstance {
    pub fn new(model: Arc<Model>, position: Vec3, rotation: Quat) -> Self {
        let local = model.local_bounds();
        // Conservative world AABB: rotate all 8 corners of the local box.
        let mut world_aabb = Aabb::from_point(position + rotation * local.mins);
        for &corner in &corners(&local) {
            world_aabb = world_aabb.union_point(position + rotation * corner);
        }
        Self {
            model,
            position,
            rotation,
            world_aabb,
        }
    }

    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// Transforms a world-space query AABB into this instance's model
    /// space: undo the translation, then the rotation. Rotating a box
    /// changes its shape, so the result is a conservative re-bound of the
    /// eight rotated corners rather than a per-axis inverse.
    fn world_aabb_to_local(&self, aabb: &Aabb) -> Aabb {
        let inverse = self.rotation.inverse();
        let mut local: Option<Aabb> = None;
        for &corner in &corners(aabb) {
            let p = inverse * (corner - self.position);
            local = Some(match local {
                None => Aabb::from_point(p),
                Some(acc) => acc.union_point(p),
            });
        }
        local.unwrap_or_else(|| Aabb::from_point(inverse * (aabb.mins - self.position)))
    }

    fn triangle_world(&self, tri: &Triangle) -> Triangle {
        Triangle {
            v0: self.to_world(tri.v0),
            v1: self.to_world(tri.v1),
            v2: self.to_world(tri.v2),
            double_sided: tri.double_sided,
            collision_mask: tri.collision_mask,
        }
    }
}

fn corners(aabb: &Aabb) -> [Vec3; 8] {
    let (mn, mx) = (aabb.mins, aabb.maxs);
    [
        Vec3::new(mn.x, mn.y, mn.z),
        Vec3::new(mx.x, mn.y, mn.z),
        Vec3::new(mn.x, mx.y, mn.z),
        Vec3::new(mn.x, mn.y, mx.z),
        Vec3::new(mx.x, mx.y, mn.z),
        Vec3::new(mx.x, mn.y, mx.z),
        Vec3::new(mn.x, mx.y, mx.z),
        Vec3::new(mx.x, mx.y, mx.z),
    ]
}

/// A BIH of every model instance placed in a map, keyed so external callers
/// can hold a stable `(generation, index)` reference without risking a
/// reference cycle back into the tree.
#[derive(Debug)]
pub struct StaticMapTree {
    instances: Vec<ModelInstance>,
    bih: BihTree,
    generation: u32,
}

impl StaticMapTree {
    pub fn build(instances: Vec<ModelInstance>, generation: u32) -> Self {
        let aabbs: Vec<Aabb> = instances.iter().map(|i| i.world_aabb).collect();
        let bih = build_bih(&aabbs);
        Self {
            instances,
            bih,
            generation,
        }
    }

    pub fn instance(&self, reference: InstanceRef) -> Option<&ModelInstance> {
        if reference.generation != self.generation {
            return None;
        }
        self.instances.get(reference.index as usize)
    }

    /// World-space triangles from every instance whose AABB may overlap
    /// `aabb`, paired with the instance they came from.
    pub fn triangles_near(&self, aabb: &Aabb) -> Vec<(InstanceRef, Triangle)> {
        let mut out = Vec::new();
        for idx in self.bih.query_aabb(*aabb) {
            let instance = &self.instances[idx as usize];
            if !instance.world_aabb.intersects(aabb) {
                continue;
            }
            let local_aabb = instance.world_aabb_to_local(aabb);
            for tri_idx in instance.model.as_ref().query(&local_aabb) {
                let tri = instance.model.as_ref().triangle(tri_idx);
                out.push((
                    InstanceRef {
                        generation: self.generation,
                        index: idx,
                    },
                    instance.triangle_world(tri),
                ));
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }
}
