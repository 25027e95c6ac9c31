//! Triangle-level collision primitives: discrete and swept capsule/sphere
//! tests, and the contact manifold used to resolve a sweep-and-slide step.

mod capsule;
mod capsule_triangle;
mod contact;
mod manifold;
mod sphere_triangle;
mod sweep;
mod triangle;

pub use capsule::Capsule;
pub use capsule_triangle::capsule_vs_triangle;
pub use contact::{Contact, ContactRegion};
pub use manifold::ContactManifold;
pub use sphere_triangle::sphere_vs_triangle;
pub use sweep::sweep_capsule_vs_triangle;
pub use triangle::Triangle;

use crate::math::Vec3;

/// Pushes a capsule position back out of a penetrating contact, leaving
/// `skin` clearance along the contact normal. Used after both the discrete
/// corner-resolution pass and the final step of a slide when depth > 0.
pub fn resolve_capsule_hit(position: Vec3, contact: &Contact, skin: f32) -> Vec3 {
    if !contact.hit || contact.depth <= 0.0 {
        return position;
    }
    position + contact.normal * (contact.depth + skin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_capsule_hit_pushes_along_normal_by_depth_plus_skin() {
        let contact = Contact {
            hit: true,
            depth: 0.1,
            normal: Vec3::new(0.0, 0.0, 1.0),
            ..Contact::none()
        };
        let resolved = resolve_capsule_hit(Vec3::new(0.0, 0.0, 0.0), &contact, 0.02);
        assert!((resolved.z - 0.12).abs() < 1e-6);
    }
}
