use std::collections::HashMap;

use parking_lot::Mutex;

use super::model::Model;
use crate::geom::Triangle;
use crate::math::{Aabb, Quat, Vec3};

/// Open/closed-style gate state a dynamic object (a door, a drawbridge)
/// can be in. Triangles tagged with a non-matching mask are skipped by
/// [`DynamicRegistry::query_triangles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Open,
    Closed,
}

/// A movable collidable object tracked outside the static scene: doors,
/// elevators, player-placed objects. Rebuilt in full on every pose update
/// rather than incrementally patched — these objects are few compared to
/// static geometry, so the simplicity is worth the cost.
#[derive(Debug, Clone)]
pub struct DynamicObject {
    pub guid: u64,
    pub model: std::sync::Arc<Model>,
    pub position: Vec3,
    pub rotation: Quat,
    pub gate_state: GateState,
    world_triangles: Vec<Triangle>,
    world_aabb: Aabb,
}

impl DynamicObject {
    pub fn new(
        guid: u64,
        model: std::sync::Arc<Model>,
        position: Vec3,
        rotation: Quat,
    ) -> Self {
        let mut obj = Self {
            guid,
            model,
            position,
            rotation,
            gate_state: GateState::Closed,
            world_triangles: Vec::new(),
            world_aabb: Aabb::from_point(position),
        };
        obj.rebuild();
        obj
    }

    pub fn update_pose(&mut self, position: Vec3, rotation: Quat) {
        self.position = position;
        self.rotation = rotation;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let local_bounds = self.model.local_bounds();
        let mut aabb = Aabb::from_point(self.to_world(local_bounds.mins));
        aabb = aabb.union_point(self.to_world(local_bounds.maxs));

        let full_aabb = Aabb::new(
            Vec3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
            Vec3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
        );
        use super::TriangleSource;
        let mut triangles = Vec::new();
        for idx in self.model.query(&full_aabb) {
            let tri = self.model.triangle(idx);
            let world = Triangle {
                v0: self.to_world(tri.v0),
                v1: self.to_world(tri.v1),
                v2: self.to_world(tri.v2),
                double_sided: tri.double_sided,
                collision_mask: tri.collision_mask,
            };
            aabb = aabb.union_point(world.v0).union_point(world.v1).union_point(world.v2);
            triangles.push(world);
        }

        self.world_triangles = triangles;
        self.world_aabb = aabb;
    }

    fn to_world(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    pub fn world_aabb(&self) -> Aabb {
        self.world_aabb
    }
}

/// Single-mutex registry of every dynamic object in a map. Deliberately
/// coarse-grained: the registry is small and touched far less often than
/// the read-mostly static scene, so a read-write split isn't worth the
/// complexity.
#[derive(Debug, Default)]
pub struct DynamicRegistry {
    objects: Mutex<HashMap<u64, DynamicObject>>,
}

impl DynamicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, object: DynamicObject) {
        self.objects.lock().insert(object.guid, object);
    }

    pub fn remove(&self, guid: u64) -> bool {
        self.objects.lock().remove(&guid).is_some()
    }

    pub fn update_pose(&self, guid: u64, position: Vec3, rotation: Quat) -> bool {
        let mut objects = self.objects.lock();
        if let Some(obj) = objects.get_mut(&guid) {
            obj.update_pose(position, rotation);
            true
        } else {
            false
        }
    }

    pub fn set_gate_state(&self, guid: u64, state: GateState) -> bool {
        let mut objects = self.objects.lock();
        if let Some(obj) = objects.get_mut(&guid) {
            obj.gate_state = state;
            true
        } else {
            false
        }
    }

    /// Triangles from every open-gated dynamic object overlapping `aabb`.
    /// Closed gates still collide; `only_closed_gates_block` callers that
    /// want open doors to be walk-through pass `skip_open_gates = true`.
    pub fn query_triangles(&self, aabb: &Aabb, skip_open_gates: bool) -> Vec<Triangle> {
        let objects = self.objects.lock();
        let mut out = Vec::new();
        for obj in objects.values() {
            if skip_open_gates && obj.gate_state == GateState::Open {
                continue;
            }
            if !obj.world_aabb().intersects(aabb) {
                continue;
            }
            for tri in &obj.world_triangles {
                let tri_aabb = tri.aabb();
                if tri_aabb.intersects(aabb) {
                    out.push(*tri);
                }
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.objects.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.lock().is_empty()
    }
}
