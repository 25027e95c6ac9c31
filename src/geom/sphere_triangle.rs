use super::contact::{Contact, ContactRegion};
use super::triangle::Triangle;
use crate::math::{closest_point_on_triangle, safe_normalize, Vec3};

/// Discrete sphere-vs-triangle overlap test. `region` lets the capsule
/// solver tag which sphere (lower/upper) produced the contact.
pub fn sphere_vs_triangle(
    center: Vec3,
    radius: f32,
    tri: &Triangle,
    region: ContactRegion,
) -> Contact {
    let closest = closest_point_on_triangle(center, tri.v0, tri.v1, tri.v2);
    let delta = center - closest;
    let dist_sq = delta.norm_squared();
    if dist_sq > radius * radius {
        return Contact::none();
    }

    let dist = dist_sq.sqrt();
    let plane = tri.plane();
    let mut normal = safe_normalize(delta).unwrap_or(plane.normal);

    if !tri.double_sided && plane.signed_distance(center) < 0.0 && dist > crate::math::DIST_EPS {
        // Backface: still report the contact (sphere may be embedded) but
        // keep the plane's own normal so slide math pushes the sphere out
        // through the face it's behind rather than away from it.
        normal = plane.normal;
    }

    Contact {
        hit: true,
        depth: radius - dist,
        normal,
        point: closest,
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
    fn sphere_above_triangle_face_reports_upward_normal() {
        let tri = Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let c = sphere_vs_triangle(
            Vec3::new(0.2, 0.2, 0.3),
            0.5,
            &tri,
            ContactRegion::Cylinder,
        );
        assert!(c.hit);
        assert!(c.normal.z > 0.9);
        assert!(c.depth > 0.0);
    }

    #[test]
    fn sphere_far_from_triangle_does_not_hit() {
        let tri = Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        let c = sphere_vs_triangle(Vec3::new(10.0, 10.0, 10.0), 0.5, &tri, ContactRegion::Cylinder);
        assert!(!c.hit);
    }
}
