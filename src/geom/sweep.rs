//! Analytic-ish capsule sweep against a single triangle.
//!
//! The capsule only ever translates (characters don't tumble), so a swept
//! test reduces to: walk the translation forward, and find the first `t`
//! at which the translated capsule starts touching the triangle. We refine
//! with a fixed number of substeps followed by bisection rather than a
//! closed-form root solve — the distance-to-triangle function along a
//! straight path is not guaranteed smooth across Voronoi-region boundaries,
//! so bisection between a known miss and a known hit is the robust choice.

use super::capsule::Capsule;
use super::capsule_triangle::capsule_vs_triangle;
use super::contact::Contact;
use super::triangle::Triangle;
use crate::math::Vec3;

/// Number of linear substeps used to bracket the first hit before bisection.
const SWEEP_SUBSTEPS: u32 = 8;
/// Bisection refinement iterations once a [miss, hit] bracket is found.
const BISECTION_ITERS: u32 = 12;

/// Sweeps `capsule` along `delta` (already scaled to the desired travel
/// distance) against `tri`, searching for the earliest time of impact in
/// `[0, max_toi]`. Returns `Contact::none()` if no impact is found.
pub fn sweep_capsule_vs_triangle(
    capsule: &Capsule,
    delta: Vec3,
    tri: &Triangle,
    max_toi: f32,
) -> Contact {
    let start = capsule_vs_triangle(capsule, tri);
    if start.hit {
        let mut c = start;
        c.toi = Some(0.0);
        c.start_penetrating = true;
        return c;
    }

    if delta.norm_squared() <= crate::math::MIN_MOVE_SQ {
        return Contact::none();
    }

    let mut prev_t = 0.0f32;
    let mut hit_t: Option<f32> = None;
    for i in 1..=SWEEP_SUBSTEPS {
        let t = max_toi * (i as f32 / SWEEP_SUBSTEPS as f32);
        let moved = capsule.translated(delta * t);
        if capsule_vs_triangle(&moved, tri).hit {
            hit_t = Some(t);
            break;
        }
        prev_t = t;
    }

    let mut hit_t = match hit_t {
        Some(t) => t,
        None => return Contact::none(),
    };

    let mut lo = prev_t;
    let mut hi = hit_t;
    for _ in 0..BISECTION_ITERS {
        let mid = 0.5 * (lo + hi);
        let moved = capsule.translated(delta * mid);
        if capsule_vs_triangle(&moved, tri).hit {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    hit_t = hi;

    let moved = capsule.translated(delta * hit_t);
    let mut contact = capsule_vs_triangle(&moved, tri);
    if !contact.hit {
        // Bisection landed exactly on the boundary; nudge forward slightly.
        let moved = capsule.translated(delta * (hit_t + crate::math::DIST_EPS));
        contact = capsule_vs_triangle(&moved, tri);
    }
    contact.toi = Some(hit_t / max_toi.max(crate::math::DIST_EPS));
    contact.start_penetrating = false;
    contact
}
