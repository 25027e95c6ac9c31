use super::{BihNode, BihTree, LEAF_AXIS};
use crate::math::Aabb;
use smallvec::SmallVec;

/// Lazy, single-pass iterator over primitive indices whose AABB may
/// intersect a query AABB. Explicit stack, no recursion and no generator —
/// each `next()` call resumes the traversal exactly where it left off.
pub struct BihQueryIter<'a> {
    tree: &'a BihTree,
    query: Aabb,
    stack: SmallVec<[u32; 32]>,
    /// Items from the current leaf not yet yielded.
    leaf_items: &'a [u32],
    leaf_cursor: usize,
}

impl<'a> BihQueryIter<'a> {
    pub fn new(tree: &'a BihTree, query: Aabb) -> Self {
        let mut stack = SmallVec::new();
        if !tree.nodes.is_empty() {
            stack.push(0u32);
        }
        Self {
            tree,
            query,
            stack,
            leaf_items: &[],
            leaf_cursor: 0,
        }
    }

    fn descend_to_next_leaf(&mut self) {
        while let Some(node_index) = self.stack.pop() {
            let node: BihNode = self.tree.nodes[node_index as usize];
            if node.axis == LEAF_AXIS {
                self.leaf_items = &self.tree.items[node.left as usize..node.right as usize];
                self.leaf_cursor = 0;
                return;
            }
            let axis = node.axis as usize;
            let (q_min, q_max) = self.query.axis(axis);
            if q_min <= node.left_max {
                self.stack.push(node.left);
            }
            if q_max >= node.right_min {
                self.stack.push(node.right);
            }
        }
        self.leaf_items = &[];
        self.leaf_cursor = 0;
    }
}

impl<'a> Iterator for BihQueryIter<'a> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        loop {
            if self.leaf_cursor < self.leaf_items.len() {
                let idx = self.leaf_items[self.leaf_cursor];
                self.leaf_cursor += 1;
                return Some(idx);
            }
            if self.stack.is_empty() {
                return None;
            }
            self.descend_to_next_leaf();
            if self.leaf_items.is_empty() && self.stack.is_empty() {
                return None;
            }
        }
    }
}

impl BihTree {
    /// All primitive indices whose AABB the BIH's split planes did not rule
    /// out against `query`. Callers must still verify the exact AABB (and
    /// the underlying shape) themselves; this is a broad-phase filter only.
    pub fn query_aabb<'a>(&'a self, query: Aabb) -> BihQueryIter<'a> {
        BihQueryIter::new(self, query)
    }
}

#[cfg(test)]
mod tests {
    use super::super::build::build_bih;
    use super::*;
    use crate::math::Vec3;

    fn aabb_at(x: f32) -> Aabb {
        Aabb::new(Vec3::new(x, 0.0, 0.0), Vec3::new(x + 1.0, 1.0, 1.0))
    }

    #[test]
    fn query_is_a_superset_of_the_exact_hits() {
        // `query_aabb` is a broad-phase over-approximation: it yields whole
        // leaves once the query box overlaps either split plane, with no
        // per-item filter. It must never miss a true hit, but it may also
        // yield a leafmate that doesn't actually intersect.
        let aabbs: Vec<_> = (0..40).map(|i| aabb_at(i as f32 * 2.0)).collect();
        let tree = build_bih(&aabbs);
        let query = Aabb::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(10.5, 1.0, 1.0));
        let hits: Vec<u32> = tree.query_aabb(query).collect();
        assert!(hits.contains(&5)); // aabb_at(10.0) is index 5
        let exact: Vec<u32> = aabbs
            .iter()
            .enumerate()
            .filter(|(_, a)| a.intersects(&query))
            .map(|(i, _)| i as u32)
            .collect();
        for idx in exact {
            assert!(hits.contains(&idx));
        }
    }

    #[test]
    fn query_outside_all_bounds_returns_nothing() {
        let aabbs: Vec<_> = (0..10).map(|i| aabb_at(i as f32)).collect();
        let tree = build_bih(&aabbs);
        let query = Aabb::new(Vec3::new(1000.0, 0.0, 0.0), Vec3::new(1001.0, 1.0, 1.0));
        assert_eq!(tree.query_aabb(query).count(), 0);
    }
}
