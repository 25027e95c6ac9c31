//! Thin character-facing wrapper around [`Stepper`]. Per the design
//! decision recorded in `DESIGN.md` for the climbing-sensor duplication
//! named in the open questions, this mover does not run its own step-up
//! probe — it always delegates to the stepper's up-pass (the "climbing
//! sensor") and only adds call-site conveniences (move-to-target clamping,
//! jump triggering).

use crate::config::PhysConfig;
use crate::error::PhysError;
use crate::math::Vec3;
use crate::scene::SceneQuery;
use crate::stepper::{
    clamp_translation_to_target, InputBits, MoveFlags, SpeedTable, StepInput, StepOutput, Stepper,
};

/// Per-character state the caller owns and threads between ticks: the
/// stepper itself is stateless, but callers still need somewhere to keep
/// vertical velocity, airborne duration, and the current flags across
/// calls.
#[derive(Debug, Clone, Copy)]
pub struct CharacterState {
    pub feet: Vec3,
    pub vertical_velocity: f32,
    pub fall_time: f32,
    pub flags: MoveFlags,
}

impl CharacterState {
    pub fn new(feet: Vec3) -> Self {
        Self {
            feet,
            vertical_velocity: 0.0,
            fall_time: 0.0,
            flags: MoveFlags::NONE,
        }
    }
}

/// Derives an orientation/pitch/input-bits/speed-table intent equivalent
/// to a single raw velocity vector, so callers that only have a velocity
/// (the common case for NPC or scripted movement) don't need to build a
/// [`StepInput`] by hand.
fn intent_from_velocity(v: Vec3) -> (f32, f32, InputBits, SpeedTable) {
    let speed = v.norm();
    if speed <= crate::math::DIST_EPS {
        return (0.0, 0.0, InputBits::NONE, SpeedTable::uniform(0.0));
    }
    let orientation = v.y.atan2(v.x);
    let pitch = (v.z / speed).clamp(-1.0, 1.0).asin();
    (orientation, pitch, InputBits::FORWARD, SpeedTable::uniform(speed))
}

/// A capsule character with a fixed radius/height, moved one tick at a
/// time against a [`SceneQuery`].
pub struct CapsuleCharacterMover {
    pub map_id: u32,
    pub capsule_radius: f32,
    pub capsule_height: f32,
}

impl CapsuleCharacterMover {
    pub fn new(map_id: u32, capsule_radius: f32, capsule_height: f32) -> Self {
        Self {
            map_id,
            capsule_radius,
            capsule_height,
        }
    }

    /// Moves the character directly by `desired_velocity` for `dt_seconds`.
    pub fn step(
        &self,
        scene: &SceneQuery,
        state: &mut CharacterState,
        desired_velocity: Vec3,
        dt_seconds: f32,
        config: &PhysConfig,
    ) -> Result<StepOutput, PhysError> {
        let (orientation, pitch, input_bits, speeds) = intent_from_velocity(desired_velocity);
        let input = StepInput {
            map_id: self.map_id,
            feet: state.feet,
            capsule_radius: self.capsule_radius,
            capsule_height: self.capsule_height,
            orientation,
            pitch,
            input_bits,
            speeds,
            dt_seconds,
            current_vertical_velocity: state.vertical_velocity,
            fall_time: state.fall_time,
            in_flags: state.flags,
            physics_flags: 0,
            transport_guid: None,
        };
        let output = Stepper::step(scene, &input, config)?;
        state.feet = output.new_feet;
        state.vertical_velocity = output.velocity.z;
        state.flags = output.out_flags;
        state.fall_time = if output.out_flags.contains(MoveFlags::GROUNDED) {
            0.0
        } else {
            state.fall_time + dt_seconds
        };
        Ok(output)
    }

    /// Moves the character toward `target` at `speed_mps`, clamping the
    /// desired translation so the character doesn't overshoot.
    pub fn move_toward(
        &self,
        scene: &SceneQuery,
        state: &mut CharacterState,
        target: Vec3,
        speed_mps: f32,
        dt_seconds: f32,
        config: &PhysConfig,
    ) -> Result<StepOutput, PhysError> {
        let to_target = target - state.feet;
        let desired_translation = if to_target.norm() <= speed_mps * dt_seconds {
            to_target
        } else {
            clamp_translation_to_target(
                state.feet,
                target,
                to_target.normalize() * speed_mps * dt_seconds,
            )
        };
        let desired_velocity = if dt_seconds > crate::math::DIST_EPS {
            desired_translation / dt_seconds
        } else {
            Vec3::new(0.0, 0.0, 0.0)
        };
        self.step(scene, state, desired_velocity, dt_seconds, config)
    }

    /// Requests a jump: sets the rising-edge bit the stepper reads on the
    /// next call. No-op if the character isn't grounded on that tick — the
    /// stepper simply won't find a rising edge to trigger.
    pub fn jump(&self, state: &mut CharacterState) {
        state.flags.set(MoveFlags::JUMPING);
    }
}
