use std::collections::HashMap;

use super::TriangleSource;
use crate::bih::{build_bih, BihTree};
use crate::geom::Triangle;
use crate::math::Aabb;

/// Side length of a terrain tile in world units, matching the coarse grid
/// the static map tree and dynamic object registry both key off of.
pub const TILE_SIZE: f32 = 533.333_3;

#[derive(Debug)]
struct TerrainTile {
    triangles: Vec<Triangle>,
    bih: BihTree,
}

impl TriangleSource for TerrainTile {
    fn query<'a>(&'a self, aabb: &Aabb) -> Box<dyn Iterator<Item = u32> + 'a> {
        Box::new(self.bih.query_aabb(*aabb))
    }

    fn triangle(&self, index: u32) -> &Triangle {
        &self.triangles[index as usize]
    }

    fn len(&self) -> usize {
        self.triangles.len()
    }
}

/// Sparse grid of loaded terrain tiles for one map.
#[derive(Debug, Default)]
pub struct TerrainGrid {
    tiles: HashMap<(i32, i32), TerrainTile>,
}

fn tile_coord(x: f32, y: f32) -> (i32, i32) {
    ((x / TILE_SIZE).floor() as i32, (y / TILE_SIZE).floor() as i32)
}

impl TerrainGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_tile(&mut self, tx: i32, ty: i32, triangles: Vec<Triangle>) {
        let aabbs: Vec<Aabb> = triangles.iter().map(Triangle::aabb).collect();
        let bih = build_bih(&aabbs);
        self.tiles.insert((tx, ty), TerrainTile { triangles, bih });
    }

    pub fn unload_tile(&mut self, tx: i32, ty: i32) {
        self.tiles.remove(&(tx, ty));
    }

    pub fn is_tile_loaded(&self, tx: i32, ty: i32) -> bool {
        self.tiles.contains_key(&(tx, ty))
    }

    /// Triangles from every loaded tile overlapping `aabb`. An AABB
    /// spanning unloaded tiles simply contributes nothing from those tiles
    /// rather than erroring — callers that need to know about missing
    /// tiles check [`TerrainGrid::is_tile_loaded`] explicitly.
    pub fn triangles_near(&self, aabb: &Aabb) -> Vec<Triangle> {
        let (min_tx, min_ty) = tile_coord(aabb.mins.x, aabb.mins.y);
        let (max_tx, max_ty) = tile_coord(aabb.maxs.x, aabb.maxs.y);
        let mut out = Vec::new();
        for tx in min_tx..=max_tx {
            for ty in min_ty..=max_ty {
                if let Some(tile) = self.tiles.get(&(tx, ty)) {
                    for idx in tile.query(aabb) {
                        out.push(*tile.triangle(idx));
                    }
                }
            }
        }
        out
    }

    pub fn loaded_tile_count(&self) -> usize {
        self.tiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn unloaded_tile_contributes_no_triangles() {
        let grid = TerrainGrid::new();
        let aabb = Aabb::new(Vec3::new(0.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(grid.triangles_near(&aabb).is_empty());
        assert!(!grid.is_tile_loaded(0, 0));
    }

    #[test]
    fn loaded_tile_returns_overlapping_triangles() {
        let mut grid = TerrainGrid::new();
        grid.load_tile(
            0,
            0,
            vec![Triangle::new(
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            )],
        );
        let aabb = Aabb::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(2.0, 2.0, 1.0));
        assert_eq!(grid.triangles_near(&aabb).len(), 1);
    }
}
