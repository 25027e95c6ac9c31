use crate::config::PhysConfig;
use crate::error::PhysError;
use crate::geom::{Capsule, Contact, ContactManifold};
use crate::math::{safe_normalize, Vec3};
use crate::scene::SceneQuery;

/// Cosine of 120 degrees — a contact dotted against the movement direction
/// at or below this is treated as a dead-on wall, not a glancing slide.
const HEAD_ON_COS: f32 = -0.5;

/// Outcome of the three-pass mover: the capsule's new feet position, the
/// manifold touched along the way, whether an auto-step climb was used, and
/// the validated ground contact (if any) found on the down pass.
pub struct ThreePassResult {
    pub feet: Vec3,
    pub manifold: ContactManifold,
    pub used_step: bool,
    pub blocked: bool,
    pub ground_contact: Option<Contact>,
    /// A down-pass contact existed but its slope was too steep to stand on.
    pub steep_contact: bool,
}

/// Sweeps a capsule through one tick's intended motion: lateral
/// `planar_delta` plus signed `vertical_delta` (already dt-scaled — the
/// caller has applied gravity/jump to get here). Three sub-sweeps: up
/// (climbing sensor / ascent), side (collide-and-slide), down (re-settle
/// and ground-snap validation). The down pass is skipped while ascending,
/// since a rising character has nothing below it to snap onto this tick.
pub fn move_three_pass(
    scene: &SceneQuery,
    map_id: u32,
    capsule: &Capsule,
    planar_delta: Vec3,
    vertical_delta: f32,
    config: &PhysConfig,
    skip_ground_snap: bool,
) -> Result<ThreePassResult, PhysError> {
    let has_lateral_intent = planar_delta.norm_squared() > crate::math::MIN_MOVE_SQ;

    // Pass 1: up — the climbing sensor for lateral auto-step, or plain
    // ascent when `vertical_delta` is positive (rising from a jump). A
    // caller trusting its own vertical velocity (TRUST_INPUT_VELOCITY)
    // applies that motion directly with no ground interaction at all.
    let auto_step_lift = if !skip_ground_snap && has_lateral_intent && vertical_delta <= 0.0 {
        config.step_height
    } else {
        0.0
    };
    let ascent = if skip_ground_snap { 0.0 } else { vertical_delta.max(0.0) };
    let up_distance = auto_step_lift.max(ascent);

    let (allowed_up, used_step) = if up_distance > crate::math::DIST_EPS {
        let up_sweep = scene.sweep_capsule(map_id, capsule, Vec3::new(0.0, 0.0, up_distance))?;
        let skin = crate::math::base_skin(capsule.radius);
        let allowed = (up_distance * up_sweep.toi.clamp(0.0, 1.0) - skin).max(0.0);
        let used_step = auto_step_lift > crate::math::DIST_EPS && allowed > crate::math::DIST_EPS;
        (allowed, used_step)
    } else {
        (0.0, false)
    };
    let raised = capsule.translated(Vec3::new(0.0, 0.0, allowed_up));

    // Pass 2: side — iterative sweep-and-slide at the raised height, with
    // a head-on block gate and angle-based attenuation against walls.
    let mut manifold = ContactManifold::new();
    let mut position = raised;
    let mut remaining = planar_delta;
    let mut blocked = false;
    for _ in 0..config.max_slide_iterations {
        if remaining.norm_squared() <= crate::math::MIN_MOVE_SQ {
            break;
        }
        let sweep = scene.sweep_capsule(map_id, &position, remaining)?;
        let travel = remaining * sweep.toi;
        position = position.translated(travel);
        match &sweep.contact {
            None => {
                remaining = Vec3::new(0.0, 0.0, 0.0);
            }
            Some(contact) => {
                manifold.push(contact.normal);
                for n in &sweep.manifold_normals {
                    manifold.push(*n);
                }

                let dir = safe_normalize(remaining).unwrap_or(Vec3::new(0.0, 0.0, 0.0));
                let worst = manifold.worst_against(dir);
                let worst_is_wall = worst.map_or(false, |n| n.z < config.max_slope_cos);

                if worst_is_wall && worst.map_or(false, |n| dir.dot(&n) <= HEAD_ON_COS) {
                    remaining = Vec3::new(0.0, 0.0, 0.0);
                    blocked = true;
                    continue;
                }

                let left = remaining * (1.0 - sweep.toi);
                let mut projected = manifold.project(left);
                if worst_is_wall {
                    if let Some(n) = worst {
                        let scale = (dir.dot(&n) + 1.0).max(0.0);
                        projected *= scale;
                    }
                }

                if projected.norm_squared() <= crate::math::MIN_MOVE_SQ {
                    blocked = blocked || manifold.len() >= 2;
                    remaining = Vec3::new(0.0, 0.0, 0.0);
                } else {
                    remaining = projected;
                }
            }
        }
    }

    // Pass 3: down — undo the step offset, then validate a ground snap.
    // Skipped entirely while ascending, or while the caller is trusting its
    // own vertical velocity; either way there is nothing to snap onto.
    if skip_ground_snap {
        let settled = position.translated(Vec3::new(0.0, 0.0, vertical_delta));
        return Ok(ThreePassResult {
            feet: settled.feet(),
            manifold,
            used_step,
            blocked,
            ground_contact: None,
            steep_contact: false,
        });
    }
    if vertical_delta > crate::math::DIST_EPS {
        return Ok(ThreePassResult {
            feet: position.feet(),
            manifold,
            used_step,
            blocked,
            ground_contact: None,
            steep_contact: false,
        });
    }

    // The search distance includes slack (the step-down offset, plus
    // whatever height Pass 1 lifted for the climbing sensor) so a ground
    // snap can be found slightly beyond this tick's real vertical motion.
    // When nothing is found within that search, only the real descent
    // actually happens this tick — the slack is a detection margin, not a
    // distance the character is allowed to travel for free.
    let descent_intent = (-vertical_delta).max(0.0);
    let search_distance = allowed_up + descent_intent + config.step_down;
    let down_sweep = scene.sweep_capsule(map_id, &position, Vec3::new(0.0, 0.0, -search_distance))?;
    let travel_distance = if down_sweep.contact.is_some() {
        search_distance * down_sweep.toi
    } else {
        allowed_up + descent_intent
    };
    let mut settled = position.translated(Vec3::new(0.0, 0.0, -travel_distance));
    let mut ground_contact = None;
    let mut steep_contact = false;

    if let Some(contact) = &down_sweep.contact {
        if contact.normal.z >= config.max_slope_cos {
            let skin = crate::math::base_skin(capsule.radius);
            let penetration = scene.penetration_depth(map_id, &settled)?;
            if penetration <= crate::math::DOWN_SNAP_MAX_PENETRATION {
                manifold.push(contact.normal);
                ground_contact = Some(contact.clone());
            } else if let Some(best) = scene.best_upward_contact(map_id, &position)? {
                let target_z = best.point.z + skin;
                settled = position.translated(Vec3::new(0.0, 0.0, target_z - position.feet().z));
                manifold.push(best.normal);
                ground_contact = Some(best);
            } else {
                settled = position;
            }
        } else {
            manifold.push(contact.normal);
            steep_contact = true;
        }
    }

    // A step only really happened if the character ends up meaningfully
    // higher than where it started; flat-ground movement also runs the
    // climbing-sensor probe but should not report STEPPED_UP.
    let net_rise = settled.feet().z - capsule.feet().z;
    let used_step = used_step && net_rise > crate::math::GROUND_Z_RISE_THRESHOLD;

    Ok(ThreePassResult {
        feet: settled.feet(),
        manifold,
        used_step,
        blocked,
        ground_contact,
        steep_contact,
    })
}
