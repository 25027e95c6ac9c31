use super::{BihNode, BihTree, LEAF_AXIS};
use crate::math::Aabb;

/// Primitives per leaf below which we stop splitting.
const MAX_LEAF_SIZE: usize = 4;

/// Builds a BIH over `aabbs` (one bounding box per primitive, indexed
/// `0..aabbs.len()`). Empty input produces an empty, always-miss tree.
pub fn build_bih(aabbs: &[Aabb]) -> BihTree {
    if aabbs.is_empty() {
        return BihTree {
            nodes: Vec::new(),
            items: Vec::new(),
            bounds: Aabb::new(
                crate::math::Vec3::new(0.0, 0.0, 0.0),
                crate::math::Vec3::new(0.0, 0.0, 0.0),
            ),
        };
    }

    let mut items: Vec<u32> = (0..aabbs.len() as u32).collect();
    let mut nodes = Vec::new();
    let bounds = aabbs
        .iter()
        .fold(aabbs[0], |acc, b| acc.union(b));

    let items_len = items.len();
    build_range(aabbs, &mut items, 0, items_len, bounds, &mut nodes);

    BihTree {
        nodes,
        items,
        bounds,
    }
}

fn centroid(aabb: &Aabb) -> crate::math::Vec3 {
    aabb.center()
}

/// Recursively partitions `items[start..end]` in place, appending nodes to
/// `nodes`, and returns the index of the node covering this range.
fn build_range(
    aabbs: &[Aabb],
    items: &mut [u32],
    start: usize,
    end: usize,
    bounds: Aabb,
    nodes: &mut Vec<BihNode>,
) -> u32 {
    let count = end - start;
    if count <= MAX_LEAF_SIZE {
        nodes.push(BihNode {
            axis: LEAF_AXIS,
            left_max: 0.0,
            right_min: 0.0,
            left: start as u32,
            right: end as u32,
        });
        return (nodes.len() - 1) as u32;
    }

    let axis = bounds.longest_axis();
    let slice = &mut items[start..end];
    slice.sort_unstable_by(|&a, &b| {
        let ca = centroid(&aabbs[a as usize]).axis_component(axis);
        let cb = centroid(&aabbs[b as usize]).axis_component(axis);
        ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mid = start + count / 2;

    let left_bounds = range_bounds(aabbs, items, start, mid);
    let right_bounds = range_bounds(aabbs, items, mid, end);
    let left_max = left_bounds.axis(axis).1;
    let right_min = right_bounds.axis(axis).0;

    // Reserve this node's slot before recursing so children get higher
    // indices, matching a preorder flat layout.
    let node_index = nodes.len();
    nodes.push(BihNode {
        axis: axis as u8,
        left_max,
        right_min,
        left: 0,
        right: 0,
    });

    let left_child = build_range(aabbs, items, start, mid, left_bounds, nodes);
    let right_child = build_range(aabbs, items, mid, end, right_bounds, nodes);
    nodes[node_index].left = left_child;
    nodes[node_index].right = right_child;

    node_index as u32
}

fn range_bounds(aabbs: &[Aabb], items: &[u32], start: usize, end: usize) -> Aabb {
    let mut b = aabbs[items[start] as usize];
    for &i in &items[start + 1..end] {
        b = b.union(&aabbs[i as usize]);
    }
    b
}

trait AxisComponent {
    fn axis_component(&self, axis: usize) -> f32;
}

impl AxisComponent for crate::math::Vec3 {
    fn axis_component(&self, axis: usize) -> f32 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    fn aabb_at(x: f32) -> Aabb {
        Aabb::new(Vec3::new(x, 0.0, 0.0), Vec3::new(x + 1.0, 1.0, 1.0))
    }

    #[test]
    fn build_empty_produces_empty_tree() {
        let tree = build_bih(&[]);
        assert!(tree.is_empty());
    }

    #[test]
    fn build_small_list_is_a_single_leaf() {
        let aabbs: Vec<_> = (0..3).map(|i| aabb_at(i as f32)).collect();
        let tree = build_bih(&aabbs);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.nodes.len(), 1);
    }

    #[test]
    fn build_large_list_splits_into_multiple_nodes() {
        let aabbs: Vec<_> = (0..40).map(|i| aabb_at(i as f32 * 2.0)).collect();
        let tree = build_bih(&aabbs);
        assert_eq!(tree.len(), 40);
        assert!(tree.nodes.len() > 1);
    }
}
