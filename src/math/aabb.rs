use super::Vec3;

/// Axis-aligned bounding box, min/max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub mins: Vec3,
    pub maxs: Vec3,
}

impl Aabb {
    pub fn new(mins: Vec3, maxs: Vec3) -> Self {
        Self { mins, maxs }
    }

    pub fn from_point(p: Vec3) -> Self {
        Self { mins: p, maxs: p }
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.zip_map(&other.mins, f32::min),
            maxs: self.maxs.zip_map(&other.maxs, f32::max),
        }
    }

    pub fn union_point(&self, p: Vec3) -> Aabb {
        self.union(&Aabb::from_point(p))
    }

    pub fn inflate(&self, amount: f32) -> Aabb {
        let pad = Vec3::new(amount, amount, amount);
        Aabb {
            mins: self.mins - pad,
            maxs: self.maxs + pad,
        }
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.mins.x <= other.maxs.x
            && self.maxs.x >= other.mins.x
            && self.mins.y <= other.maxs.y
            && self.maxs.y >= other.mins.y
            && self.mins.z <= other.maxs.z
            && self.maxs.z >= other.mins.z
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.mins.x
            && p.x <= self.maxs.x
            && p.y >= self.mins.y
            && p.y <= self.maxs.y
            && p.z >= self.mins.z
            && p.z <= self.maxs.z
    }

    pub fn center(&self) -> Vec3 {
        (self.mins + self.maxs) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.maxs - self.mins) * 0.5
    }

    /// Widest axis, used by the BIH builder to pick a split axis.
    pub fn longest_axis(&self) -> usize {
        let extents = self.maxs - self.mins;
        if extents.x >= extents.y && extents.x >= extents.z {
            0
        } else if extents.y >= extents.z {
            1
        } else {
            2
        }
    }

    pub fn axis(&self, axis: usize) -> (f32, f32) {
        match axis {
            0 => (self.mins.x, self.maxs.x),
            1 => (self.mins.y, self.maxs.y),
            _ => (self.mins.z, self.maxs.z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_grows_to_cover_both_boxes() {
        let a = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Vec3::new(-1.0, 2.0, 0.5), Vec3::new(0.5, 3.0, 2.0));
        let u = a.union(&b);
        assert_eq!(u.mins, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(u.maxs, Vec3::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn intersects_is_symmetric_and_touches_count() {
        let a = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(2.0, 2.0, 2.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        let c = Aabb::new(Vec3::new(1.01, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(!a.intersects(&c));
    }
}
