//! External interface contract consumed by the sibling navmesh/pathfinding
//! subsystem. That subsystem — A* search over a precomputed navigation
//! mesh — is explicitly out of scope here; this module only proves out the
//! shape of the boundary: `line_of_sight` and `preload_map` are real core
//! responsibilities and are fully implemented, while `find_path` is the
//! degenerate direct-route case a full pathfinder falls back to when no
//! obstruction exists, not a stand-in A* implementation.

use thiserror::Error;

use crate::error::PhysError;
use crate::math::Vec3;
use crate::scene::{SceneQuery, StaticMapTree, TerrainGrid};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PathError {
    #[error("no direct route between the given points")]
    NoDirectRoute,
    #[error(transparent)]
    Scene(#[from] PhysError),
}

/// Degenerate two-point path: a direct line when it's unobstructed.
/// Real multi-waypoint search lives in the sibling navmesh subsystem, which
/// only consumes [`SceneQuery::line_of_sight`] and
/// [`SceneQuery::ground_z`] from this crate.
pub fn find_path(scene: &SceneQuery, map_id: u32, start: Vec3, end: Vec3) -> Result<Vec<Vec3>, PathError> {
    if scene.line_of_sight(map_id, start, end)? {
        Ok(vec![start, end])
    } else {
        Err(PathError::NoDirectRoute)
    }
}

pub fn line_of_sight(scene: &SceneQuery, map_id: u32, from: Vec3, to: Vec3) -> Result<bool, PhysError> {
    scene.line_of_sight(map_id, from, to)
}

/// Loads a map's static tree and terrain grid into `scene` so subsequent
/// queries succeed immediately. A no-op convenience over
/// [`SceneQuery::load_map`] kept here because the sibling pathfinding
/// subsystem's bootstrap calls it by this name.
pub fn preload_map(scene: &mut SceneQuery, map_id: u32, tree: StaticMapTree, terrain: TerrainGrid) {
    scene.load_map(map_id, tree, terrain);
}
