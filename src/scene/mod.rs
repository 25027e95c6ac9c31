//! Static scene (model cache + per-tile terrain) and dynamic object
//! registry, unified behind a single query façade.

mod cache;
mod dynamic;
mod facade;
mod model;
mod static_scene;
mod terrain;

pub use cache::{read_scene_cache, write_scene_cache};
pub use dynamic::{DynamicObject, DynamicRegistry, GateState};
pub use facade::{LiquidSample, LiquidType, SceneQuery, SweepResults, NO_LIQUID_Z};
pub use model::Model;
pub use static_scene::{ModelInstance, StaticMapTree};
pub use terrain::TerrainGrid;

use crate::geom::Triangle;
use crate::math::Aabb;

/// A non-cyclic handle to a model instance inside a [`StaticMapTree`],
/// replacing the back-pointer/reference-cycle pattern named in the design
/// notes. `generation` is bumped whenever the tree is rebuilt so stale
/// handles from a previous load are rejected rather than silently
/// resolving to the wrong instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceRef {
    pub generation: u32,
    pub index: u32,
}

/// Capability trait standing in for a virtual "triangle mesh view" —
/// anything that can report which of its triangles fall in an AABB and
/// fetch a given triangle by index. Backed by [`Model`], [`TerrainGrid`]
/// tiles, and [`DynamicObject`].
pub trait TriangleSource {
    fn query<'a>(&'a self, aabb: &Aabb) -> Box<dyn Iterator<Item = u32> + 'a>;
    fn triangle(&self, index: u32) -> &Triangle;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
