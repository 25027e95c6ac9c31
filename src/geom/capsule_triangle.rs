use super::capsule::Capsule;
use super::contact::{Contact, ContactRegion};
use super::triangle::Triangle;
use crate::math::{
    closest_point_on_triangle, closest_points_segment_segment, safe_normalize, Vec3,
};

/// Closest point on the capsule's inner segment to the triangle, found by
/// taking the minimum over: each endpoint's closest point on the triangle,
/// and the closest points between the segment and each triangle edge.
fn closest_segment_to_triangle(seg_a: Vec3, seg_b: Vec3, tri: &Triangle) -> (Vec3, Vec3) {
    let mut best_dist_sq = f32::INFINITY;
    let mut best = (seg_a, tri.v0);

    for &p in &[seg_a, seg_b] {
        let c = closest_point_on_triangle(p, tri.v0, tri.v1, tri.v2);
        let d = (p - c).norm_squared();
        if d < best_dist_sq {
            best_dist_sq = d;
            best = (p, c);
        }
    }

    for &(e0, e1) in &[(tri.v0, tri.v1), (tri.v1, tri.v2), (tri.v2, tri.v0)] {
        let (on_seg, on_edge, _, _) = closest_points_segment_segment(seg_a, seg_b, e0, e1);
        let d = (on_seg - on_edge).norm_squared();
        if d < best_dist_sq {
            best_dist_sq = d;
            best = (on_seg, on_edge);
        }
    }

    best
}

/// Discrete capsule-vs-triangle overlap test (spec §4.2 discrete case).
pub fn capsule_vs_triangle(capsule: &Capsule, tri: &Triangle) -> Contact {
    let (on_seg, on_tri) = closest_segment_to_triangle(capsule.p0, capsule.p1, tri);
    let delta = on_seg - on_tri;
    let dist_sq = delta.norm_squared();
    if dist_sq > capsule.radius * capsule.radius {
        return Contact::none();
    }

    let dist = dist_sq.sqrt();
    let plane = tri.plane();
    let normal = safe_normalize(delta).unwrap_or(plane.normal);

    let seg_len_sq = (capsule.p1 - capsule.p0).norm_squared();
    let region = if seg_len_sq <= crate::math::DIST_EPS {
        ContactRegion::LowerSphere
    } else {
        let t = (on_seg - capsule.p0).dot(&(capsule.p1 - capsule.p0)) / seg_len_sq;
        if t <= crate::math::DIST_EPS {
            ContactRegion::LowerSphere
        } else if t >= 1.0 - crate::math::DIST_EPS {
            ContactRegion::UpperSphere
        } else {
            ContactRegion::Cylinder
        }
    };

    Contact {
        hit: true,
        depth: capsule.radius - dist,
        normal,
        point: on_tri,
        toi: None,
        triangle_index: None,
        instance_id: None,
        region,
        start_penetrating: dist <= crate::math::DIST_EPS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capsule_resting_on_ground_plane_touches_cylinder() {
        let tri_a = Triangle::new(
            Vec3::new(-5.0, -5.0, 0.0),
            Vec3::new(5.0, -5.0, 0.0),
            Vec3::new(5.0, 5.0, 0.0),
        );
        let capsule = Capsule::from_feet(Vec3::new(0.0, 0.0, 0.0), 1.8, 0.3).unwrap();
        let c = capsule_vs_triangle(&capsule, &tri_a);
        assert!(c.hit);
        assert!(c.normal.z > 0.9);
    }

    #[test]
    fn capsule_far_above_ground_does_not_hit() {
        let tri_a = Triangle::new(
            Vec3::new(-5.0, -5.0, 0.0),
            Vec3::new(5.0, -5.0, 0.0),
            Vec3::new(5.0, 5.0, 0.0),
        );
        let capsule = Capsule::from_feet(Vec3::new(0.0, 0.0, 10.0), 1.8, 0.3).unwrap();
        let c = capsule_vs_triangle(&capsule, &tri_a);
        assert!(!c.hit);
    }
}
