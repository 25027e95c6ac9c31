use std::collections::HashMap;

use parking_lot::RwLock;
use smallvec::SmallVec;

use super::dynamic::DynamicRegistry;
use super::static_scene::StaticMapTree;
use super::terrain::TerrainGrid;
use super::InstanceRef;
use crate::error::PhysError;
use crate::geom::{capsule_vs_triangle, sweep_capsule_vs_triangle, Capsule, Contact, ContactManifold};
use crate::math::{Aabb, Vec3};

/// A liquid depth/type reading at a single world-space column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidSample {
    pub liquid_type: LiquidType,
    pub surface_z: f32,
}

/// Sentinel `surface_z` meaning "no liquid at this column".
pub const NO_LIQUID_Z: f32 = -500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum LiquidType {
    None = 0,
    Water = 1,
    Ocean = 2,
    Magma = 3,
    Slime = 4,
    DarkWater = 5,
}

/// Per-map static data: model instances plus loaded terrain tiles, behind
/// one reader-writer lock so sweeps from many stepper calls run
/// concurrently while a map (re)load takes the writer briefly.
struct MapData {
    tree: StaticMapTree,
    terrain: TerrainGrid,
    liquids: Vec<(Aabb, LiquidSample)>,
}

/// Owns every loaded map's static geometry plus the dynamic object
/// registry, and answers the scene queries the stepper needs. No
/// background threads or global state: every method takes `&self` and the
/// caller decides when to load/unload maps.
#[derive(Default)]
pub struct SceneQuery {
    maps: HashMap<u32, RwLock<MapData>>,
    pub dynamic: DynamicRegistry,
}

/// Bundled result of a capsule sweep against the scene, combining the
/// nearest contact with everything the stepper needs to decide what to do
/// next: a deduplicated manifold, the detected ground/liquid state, and a
/// suggested slide direction.
#[derive(Debug, Clone)]
pub struct SweepResults {
    pub contact: Option<Contact>,
    pub manifold_normals: SmallVec<[Vec3; 4]>,
    pub stand_z: Option<f32>,
    pub suggested_skin: f32,
    pub liquid: Option<LiquidSample>,
    pub slide_dir: Vec3,
    pub toi: f32,
}

impl SceneQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_map(&mut self, map_id: u32, tree: StaticMapTree, terrain: TerrainGrid) {
        self.maps.insert(
            map_id,
            RwLock::new(MapData {
                tree,
                terrain,
                liquids: Vec::new(),
            }),
        );
    }

    pub fn unload_map(&mut self, map_id: u32) {
        self.maps.remove(&map_id);
    }

    pub fn set_liquids(&self, map_id: u32, liquids: Vec<(Aabb, LiquidSample)>) -> Result<(), PhysError> {
        let lock = self.maps.get(&map_id).ok_or(PhysError::MapNotLoaded { map_id })?;
        lock.write().liquids = liquids;
        Ok(())
    }

    fn candidate_triangles(
        &self,
        map_id: u32,
        aabb: &Aabb,
    ) -> Result<Vec<crate::geom::Triangle>, PhysError> {
        let lock = self.maps.get(&map_id).ok_or(PhysError::MapNotLoaded { map_id })?;
        let map = lock.read();
        let mut tris: Vec<_> = map.terrain.triangles_near(aabb);
        tris.extend(map.tree.triangles_near(aabb).into_iter().map(|(_, t)| t));
        drop(map);
        tris.extend(self.dynamic.query_triangles(aabb, true));
        Ok(tris)
    }

    /// Highest walkable surface directly below `from`, searched down to
    /// `max_distance`. Returns `None` if nothing is found (a hole, an
    /// unloaded tile, open sky below the map floor). `radius` sizes the
    /// vertical snap slack via [`crate::math::ground_z_bias`].
    pub fn ground_z(
        &self,
        map_id: u32,
        from: Vec3,
        max_distance: f32,
        radius: f32,
    ) -> Result<Option<f32>, PhysError> {
        let bias = crate::math::ground_z_bias(radius);
        let probe_aabb = Aabb::new(
            Vec3::new(from.x - 0.01, from.y - 0.01, from.z - max_distance),
            Vec3::new(from.x + 0.01, from.y + 0.01, from.z + bias),
        );
        let triangles = self.candidate_triangles(map_id, &probe_aabb)?;
        let mut best: Option<f32> = None;
        for tri in &triangles {
            if let Some(z) = vertical_hit_z(tri, from.x, from.y) {
                if z <= from.z + bias && z >= from.z - max_distance {
                    best = Some(best.map_or(z, |b: f32| b.max(z)));
                }
            }
        }
        Ok(best)
    }

    /// Straight-line visibility test between two world points, ignoring
    /// liquids and gate-open dynamic objects.
    pub fn line_of_sight(&self, map_id: u32, from: Vec3, to: Vec3) -> Result<bool, PhysError> {
        let seg_aabb = Aabb::from_point(from).union_point(to);
        let triangles = self.candidate_triangles(map_id, &seg_aabb)?;
        let dir = to - from;
        let len = dir.norm();
        if len <= crate::math::DIST_EPS {
            return Ok(true);
        }
        let dir_n = dir / len;
        for tri in &triangles {
            if let Some(t) = segment_triangle_toi(from, dir_n, len, tri) {
                if t > crate::math::DIST_EPS && t < len - crate::math::DIST_EPS {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Sweeps `capsule` by `delta`, returning the earliest contact and a
    /// manifold of every surface touched within the capsule's own
    /// radius-proportional skin of that point, plus ground/liquid context
    /// for the caller.
    pub fn sweep_capsule(
        &self,
        map_id: u32,
        capsule: &Capsule,
        delta: Vec3,
    ) -> Result<SweepResults, PhysError> {
        let skin = crate::math::base_skin(capsule.radius);
        let swept_aabb = capsule.aabb().union(&capsule.translated(delta).aabb());
        let triangles = self.candidate_triangles(map_id, &swept_aabb.inflate(skin))?;

        let mut earliest: Option<Contact> = None;
        for tri in &triangles {
            let c = sweep_capsule_vs_triangle(capsule, delta, tri, 1.0);
            if !c.hit {
                continue;
            }
            let better = match &earliest {
                None => true,
                Some(best) => c.toi.unwrap_or(0.0) < best.toi.unwrap_or(0.0),
            };
            if better {
                earliest = Some(c);
            }
        }

        let mut manifold = ContactManifold::new();
        let toi = earliest.and_then(|c| c.toi).unwrap_or(1.0);
        if let Some(contact) = &earliest {
            manifold.push(contact.normal);
            let landing = capsule.translated(delta * toi);
            for tri in &triangles {
                let c = capsule_vs_triangle(&landing, tri);
                if c.hit {
                    manifold.push(c.normal);
                }
            }
        }

        let liquid = self.liquid_at(map_id, capsule.feet())?;

        Ok(SweepResults {
            contact: earliest,
            manifold_normals: SmallVec::from_slice(manifold.normals()),
            stand_z: self.ground_z(map_id, capsule.feet(), 0.5, capsule.radius)?,
            suggested_skin: skin,
            liquid,
            slide_dir: manifold.project(delta),
            toi,
        })
    }

    pub fn overlap_capsule(&self, map_id: u32, capsule: &Capsule) -> Result<bool, PhysError> {
        let triangles = self.candidate_triangles(map_id, &capsule.aabb())?;
        Ok(triangles.iter().any(|t| capsule_vs_triangle(capsule, t).hit))
    }

    /// Deepest discrete penetration of `capsule` against nearby geometry —
    /// used to validate a down-snap candidate before accepting it.
    pub fn penetration_depth(&self, map_id: u32, capsule: &Capsule) -> Result<f32, PhysError> {
        let triangles = self.candidate_triangles(map_id, &capsule.aabb())?;
        let mut max_depth = 0.0f32;
        for tri in &triangles {
            let c = capsule_vs_triangle(capsule, tri);
            if c.hit && c.depth > max_depth {
                max_depth = c.depth;
            }
        }
        Ok(max_depth)
    }

    /// Among triangles `capsule` discretely overlaps with an upward-facing
    /// normal, the one with the highest contact point — the down pass's
    /// fallback when the raw swept candidate penetrates too deeply.
    pub fn best_upward_contact(&self, map_id: u32, capsule: &Capsule) -> Result<Option<Contact>, PhysError> {
        let triangles = self.candidate_triangles(map_id, &capsule.aabb())?;
        let mut best: Option<Contact> = None;
        for tri in &triangles {
            let c = capsule_vs_triangle(capsule, tri);
            if !c.hit || c.normal.z <= 0.0 {
                continue;
            }
            let better = match &best {
                None => true,
                Some(b) => c.point.z > b.point.z,
            };
            if better {
                best = Some(c);
            }
        }
        Ok(best)
    }

    pub fn liquid_at(&self, map_id: u32, point: Vec3) -> Result<Option<LiquidSample>, PhysError> {
        let lock = self.maps.get(&map_id).ok_or(PhysError::MapNotLoaded { map_id })?;
        let map = lock.read();
        for (aabb, sample) in &map.liquids {
            if aabb.contains_point(point) {
                return Ok(Some(*sample));
            }
        }
        Ok(None)
    }

    pub fn instance(&self, map_id: u32, reference: InstanceRef) -> Result<Option<String>, PhysError> {
        let lock = self.maps.get(&map_id).ok_or(PhysError::MapNotLoaded { map_id })?;
        let map = lock.read();
        Ok(map.tree.instance(reference).map(|i| i.model.path.clone()))
    }
}

/// Vertical ray (straight down, infinite) against a triangle; returns the
/// hit `z` if `(x, y)` falls within the triangle's XY projection.
fn vertical_hit_z(tri: &crate::geom::Triangle, x: f32, y: f32) -> Option<f32> {
    let plane = tri.plane();
    if plane.normal.z.abs() <= crate::math::DIST_EPS {
        return None;
    }
    let z = (plane.d - plane.normal.x * x - plane.normal.y * y) / plane.normal.z;
    let p = Vec3::new(x, y, z);
    if point_in_triangle_xy(p, tri.v0, tri.v1, tri.v2) {
        Some(z)
    } else {
        None
    }
}

fn point_in_triangle_xy(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> bool {
    let sign = |p1: Vec3, p2: Vec3, p3: Vec3| (p1.x - p3.x) * (p2.y - p3.y) - (p2.x - p3.x) * (p1.y - p3.y);
    let d1 = sign(p, a, b);
    let d2 = sign(p, b, c);
    let d3 = sign(p, c, a);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Ray-triangle intersection (Möller–Trumbore), used only for line-of-sight.
fn segment_triangle_toi(origin: Vec3, dir: Vec3, max_t: f32, tri: &crate::geom::Triangle) -> Option<f32> {
    let edge1 = tri.v1 - tri.v0;
    let edge2 = tri.v2 - tri.v0;
    let h = dir.cross(&edge2);
    let a = edge1.dot(&h);
    if a.abs() <= crate::math::DIST_EPS {
        return None;
    }
    let f = 1.0 / a;
    let s = origin - tri.v0;
    let u = f * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(&edge1);
    let v = f * dir.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = f * edge2.dot(&q);
    if t > crate::math::DIST_EPS && t <= max_t {
        Some(t)
    } else {
        None
    }
}
