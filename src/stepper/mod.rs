//! The character movement stepper: a pure function from (scene, capsule,
//! intent) to a new capsule position, following the three-pass (up/side/
//! down) sweep-and-slide pattern with ground/air/swim state classification.

mod environment;
mod flags;
mod intent;
mod three_pass;

pub use environment::{classify_environment, MoveState};
pub use flags::MoveFlags;
pub use intent::{
    clamp_translation_to_target, horizontal_direction, horizontal_intent_direction,
    select_ground_speed, select_swim_speed, yaw_from_planar_delta, InputBits, SpeedTable,
    StepInput, StepOutput, PHYSICS_FLAG_TRUST_INPUT_VELOCITY,
};
pub use three_pass::{move_three_pass, ThreePassResult};

use crate::config::PhysConfig;
use crate::error::PhysError;
use crate::geom::Capsule;
use crate::math::Vec3;
use crate::scene::{LiquidType, SceneQuery};

/// Stateless entry point. Every tick's context comes in through `input`;
/// nothing is cached between calls.
pub struct Stepper;

impl Stepper {
    /// Runs one full movement tick: intent derivation, environment
    /// classification, the ground/swim move, and flag synthesis (§4.7.1).
    pub fn step(
        scene: &SceneQuery,
        input: &StepInput,
        config: &PhysConfig,
    ) -> Result<StepOutput, PhysError> {
        let capsule = Capsule::from_feet(input.feet, input.capsule_height, input.capsule_radius)?;

        // Steps 1-2: environment classification from a ground probe +
        // liquid sample taken before this tick's motion is applied.
        let ground_before = scene.ground_z(
            input.map_id,
            input.feet,
            config.ground_probe_distance,
            input.capsule_radius,
        )?;
        let liquid = scene.liquid_at(input.map_id, input.feet)?;
        let mut state = classify_environment(input.feet, ground_before, liquid, config);

        // A rising-edge jump request forces Grounded -> Airborne even if
        // the ground probe would otherwise call this tick grounded.
        let jump_requested = input.in_flags.contains(MoveFlags::JUMPING) && state == MoveState::Grounded;
        if jump_requested {
            state = MoveState::Airborne;
        }

        let trust_velocity = input.physics_flags & PHYSICS_FLAG_TRUST_INPUT_VELOCITY != 0;

        let mut out_flags = input.in_flags;
        out_flags.unset(MoveFlags::JUMPING);
        out_flags.unset(MoveFlags::GROUNDED);
        out_flags.unset(MoveFlags::FALLING);
        out_flags.unset(MoveFlags::SWIMMING);
        out_flags.unset(MoveFlags::FALLINGFAR);
        out_flags.unset(MoveFlags::IN_LIQUID);
        out_flags.unset(MoveFlags::ON_STEEP_SLOPE);
        out_flags.unset(MoveFlags::STEPPED_UP);
        out_flags.unset(MoveFlags::BLOCKED);
        out_flags.unset(MoveFlags::MOVED);

        let (new_feet, vertical_velocity) = if state == MoveState::Swimming {
            out_flags.unset(MoveFlags::FALLING);
            // incompatible states cleared on entering swimming
            out_flags.unset(MoveFlags::ON_STEEP_SLOPE);
            out_flags.unset(MoveFlags::STEPPED_UP);

            let dir = horizontal_intent_direction(input.orientation, input.input_bits);
            let speed = select_swim_speed(input.input_bits, &input.speeds);
            let horizontal = dir * (speed * input.pitch.cos());
            let vertical = speed * input.pitch.sin();
            let swim_delta =
                Vec3::new(horizontal.x, horizontal.y, vertical) * input.dt_seconds;
            let sweep = scene.sweep_capsule(input.map_id, &capsule, swim_delta)?;
            let travel = swim_delta * sweep.toi;
            let moved = capsule.translated(travel);

            out_flags.set(MoveFlags::SWIMMING);
            out_flags.set(MoveFlags::IN_LIQUID);
            (moved.feet(), vertical)
        } else {
            let dir = horizontal_intent_direction(input.orientation, input.input_bits);
            let speed = select_ground_speed(input.input_bits, &input.speeds);
            let planar_delta = dir * speed * input.dt_seconds;

            let mut vertical_velocity = input.current_vertical_velocity;
            if jump_requested {
                vertical_velocity = config.jump_vz;
            }

            let grounded_resting = state == MoveState::Grounded;
            let vertical_delta = if trust_velocity {
                vertical_velocity * input.dt_seconds
            } else if grounded_resting {
                0.0
            } else {
                let delta = vertical_velocity * input.dt_seconds;
                vertical_velocity =
                    (vertical_velocity - config.gravity_mps2 * input.dt_seconds).max(config.terminal_vz);
                delta
            };

            let result = three_pass::move_three_pass(
                scene,
                input.map_id,
                &capsule,
                planar_delta,
                vertical_delta,
                config,
                trust_velocity,
            )?;

            if result.used_step {
                out_flags.set(MoveFlags::STEPPED_UP);
            }
            if result.blocked {
                out_flags.set(MoveFlags::BLOCKED);
            }

            if result.ground_contact.is_some() {
                out_flags.set(MoveFlags::GROUNDED);
                vertical_velocity = 0.0;
            } else {
                out_flags.set(MoveFlags::FALLING);
                if result.steep_contact {
                    out_flags.set(MoveFlags::ON_STEEP_SLOPE);
                }
                if vertical_velocity < 0.0 {
                    out_flags.set(MoveFlags::FALLINGFAR);
                }
            }

            if jump_requested {
                out_flags.set(MoveFlags::JUMPING);
            }

            (result.feet, vertical_velocity)
        };

        if liquid.is_some() {
            out_flags.set(MoveFlags::IN_LIQUID);
        }

        let displaced = new_feet - input.feet;
        if displaced.norm_squared() > crate::math::TOUCH_EPS * crate::math::TOUCH_EPS {
            out_flags.set(MoveFlags::MOVED);
        }

        let ground_after = scene.ground_z(
            input.map_id,
            new_feet,
            config.ground_probe_distance,
            input.capsule_radius,
        )?;
        let (liquid_z, liquid_type) = match scene.liquid_at(input.map_id, new_feet)? {
            Some(sample) => (sample.surface_z, sample.liquid_type),
            None => (crate::scene::NO_LIQUID_Z, LiquidType::None),
        };

        let velocity = Vec3::new(
            displaced.x / input.dt_seconds.max(crate::math::DIST_EPS),
            displaced.y / input.dt_seconds.max(crate::math::DIST_EPS),
            if out_flags.contains(MoveFlags::GROUNDED) {
                0.0
            } else {
                vertical_velocity
            },
        );

        Ok(StepOutput {
            new_feet,
            orientation: input.orientation,
            pitch: input.pitch,
            velocity,
            out_flags,
            ground_z: ground_after,
            liquid_z,
            liquid_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Triangle;
    use crate::scene::{ModelInstance, StaticMapTree, TerrainGrid};

    fn flat_ground_scene() -> SceneQuery {
        let mut scene = SceneQuery::new();
        let mut terrain = TerrainGrid::new();
        terrain.load_tile(
            0,
            0,
            vec![
                Triangle::new(
                    Vec3::new(-200.0, -200.0, 0.0),
                    Vec3::new(200.0, -200.0, 0.0),
                    Vec3::new(200.0, 200.0, 0.0),
                ),
                Triangle::new(
                    Vec3::new(-200.0, -200.0, 0.0),
                    Vec3::new(200.0, 200.0, 0.0),
                    Vec3::new(-200.0, 200.0, 0.0),
                ),
            ],
        );
        let tree = StaticMapTree::build(Vec::<ModelInstance>::new(), 0);
        scene.load_map(1, tree, terrain);
        scene
    }

    fn base_input() -> StepInput {
        StepInput {
            map_id: 1,
            feet: Vec3::new(0.0, 0.0, 0.02),
            capsule_radius: 0.3,
            capsule_height: 1.8,
            orientation: 0.0,
            pitch: 0.0,
            input_bits: InputBits::NONE,
            speeds: SpeedTable::uniform(0.0),
            dt_seconds: 0.05,
            current_vertical_velocity: 0.0,
            fall_time: 0.0,
            in_flags: MoveFlags::NONE,
            physics_flags: 0,
            transport_guid: None,
        }
    }

    #[test]
    fn standing_still_on_flat_ground_stays_grounded() {
        let scene = flat_ground_scene();
        let config = PhysConfig::default();
        let input = base_input();
        let output = Stepper::step(&scene, &input, &config).unwrap();
        assert!(output.out_flags.contains(MoveFlags::GROUNDED));
        assert!((output.new_feet.z - 0.0).abs() < 0.05);
    }

    #[test]
    fn falling_from_height_accelerates_downward() {
        let scene = flat_ground_scene();
        let config = PhysConfig::default();
        let mut input = base_input();
        input.feet = Vec3::new(0.0, 0.0, 50.0);
        input.dt_seconds = 0.1;
        let output = Stepper::step(&scene, &input, &config).unwrap();
        assert!(output.velocity.z < 0.0);
        assert!(output.out_flags.contains(MoveFlags::FALLING));
        assert!(output.out_flags.contains(MoveFlags::FALLINGFAR));
    }

    #[test]
    fn jump_bit_rising_edge_triggers_upward_velocity() {
        let scene = flat_ground_scene();
        let config = PhysConfig::default();
        let mut input = base_input();
        input.dt_seconds = 1.0 / 30.0;
        input.in_flags.set(MoveFlags::JUMPING);
        let output = Stepper::step(&scene, &input, &config).unwrap();
        assert!(output.out_flags.contains(MoveFlags::JUMPING));
        assert!(!output.out_flags.contains(MoveFlags::GROUNDED));
        let expected_vz = config.jump_vz - config.gravity_mps2 * input.dt_seconds;
        assert!((output.velocity.z - expected_vz).abs() < 1e-3);
    }
}
