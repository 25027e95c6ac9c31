use crate::math::{safe_normalize, Vec3};

use super::flags::MoveFlags;

/// Discrete movement-input bits a caller sets on the way in. Distinct from
/// [`MoveFlags`] (§6.1 of the movement contract), which mixes input hints
/// (jump, ignore-dynamic) with state the core reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputBits(u32);

macro_rules! input_bits {
    ($($name:ident = $bit:expr),+ $(,)?) => {
        impl InputBits {
            $(pub const $name: InputBits = InputBits(1 << $bit);)+
        }
    };
}

input_bits! {
    FORWARD = 0,
    BACKWARD = 1,
    STRAFE_LEFT = 2,
    STRAFE_RIGHT = 3,
    WALK_MODE = 4,
}

impl InputBits {
    pub const NONE: InputBits = InputBits(0);

    pub fn set(&mut self, other: InputBits) {
        self.0 |= other.0;
    }

    pub fn contains(&self, other: InputBits) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn from_bits(bits: u32) -> InputBits {
        InputBits(bits)
    }
}

/// Physics flag recognized on `StepInput::physics_flags`: skip the down
/// pass's ground collision test entirely and apply the caller's vertical
/// velocity directly (server-authoritative flight/swim controllers that
/// already computed a trajectory elsewhere).
pub const PHYSICS_FLAG_TRUST_INPUT_VELOCITY: u32 = 1;

/// Named movement speeds (m/s), selected by input bits and swim state.
#[derive(Debug, Clone, Copy)]
pub struct SpeedTable {
    pub run: f32,
    pub walk: f32,
    pub run_back: f32,
    pub swim: f32,
    pub swim_back: f32,
    pub flight: f32,
}

impl SpeedTable {
    /// Every named speed set to the same value — used when a caller only
    /// has a single magnitude to offer (see `mover::intent_from_velocity`).
    pub fn uniform(speed: f32) -> Self {
        Self {
            run: speed,
            walk: speed,
            run_back: speed,
            swim: speed,
            swim_back: speed,
            flight: speed,
        }
    }
}

/// One tick's worth of movement request plus the capsule it applies to.
#[derive(Debug, Clone, Copy)]
pub struct StepInput {
    pub map_id: u32,
    pub feet: Vec3,
    pub capsule_radius: f32,
    pub capsule_height: f32,
    /// Facing direction, radians, used with `input_bits` to derive
    /// horizontal intent (§4.7.1 step 1).
    pub orientation: f32,
    /// Look pitch, radians; drives the swim path's vertical/horizontal
    /// split (§4.7.8). Positive looks up.
    pub pitch: f32,
    pub input_bits: InputBits,
    pub speeds: SpeedTable,
    pub dt_seconds: f32,
    pub current_vertical_velocity: f32,
    /// Seconds spent airborne so far; accepted for parity with the
    /// external contract but not consumed by this crate's fall-damage-free
    /// core — callers own fall-damage accounting.
    pub fall_time: f32,
    pub in_flags: MoveFlags,
    pub physics_flags: u32,
    /// Non-zero when standing on a moving platform. Composing transport
    /// velocity into the step is a sibling vehicle/mount subsystem's job;
    /// this core only threads the id through untouched.
    pub transport_guid: Option<u64>,
}

/// Result of one stepper call: the new capsule position, orientation/pitch
/// (echoed — this core never turns the character on its own), the velocity
/// implied by the realized displacement, and flags/ground/liquid state.
#[derive(Debug, Clone, Copy)]
pub struct StepOutput {
    pub new_feet: Vec3,
    pub orientation: f32,
    pub pitch: f32,
    pub velocity: Vec3,
    pub out_flags: MoveFlags,
    pub ground_z: Option<f32>,
    pub liquid_z: f32,
    pub liquid_type: crate::scene::LiquidType,
}

/// Clamps a desired horizontal translation to the remaining planar distance
/// to `target`, mirroring the "move toward" clamp used by the motion layer
/// this stepper composes with (a caller picking waypoints, not a concern of
/// the stepper itself).
pub fn clamp_translation_to_target(
    current: Vec3,
    target: Vec3,
    desired_translation: Vec3,
) -> Vec3 {
    let to_target = target - current;
    if desired_translation.norm_squared() <= to_target.norm_squared() {
        desired_translation
    } else {
        to_target
    }
}

pub fn yaw_from_planar_delta(delta: Vec3) -> Option<f32> {
    if delta.x.abs() <= crate::math::DIST_EPS && delta.y.abs() <= crate::math::DIST_EPS {
        return None;
    }
    Some(delta.y.atan2(delta.x))
}

pub fn planar(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, 0.0)
}

pub fn horizontal_direction(v: Vec3) -> Option<Vec3> {
    safe_normalize(planar(v))
}

/// Horizontal movement direction from a facing orientation plus discrete
/// input bits (§4.7.1 step 1). Zero when no input bits are set.
pub fn horizontal_intent_direction(orientation: f32, bits: InputBits) -> Vec3 {
    let forward = Vec3::new(orientation.cos(), orientation.sin(), 0.0);
    let right = Vec3::new(-orientation.sin(), orientation.cos(), 0.0);
    let mut dir = Vec3::new(0.0, 0.0, 0.0);
    if bits.contains(InputBits::FORWARD) {
        dir += forward;
    }
    if bits.contains(InputBits::BACKWARD) {
        dir -= forward;
    }
    if bits.contains(InputBits::STRAFE_RIGHT) {
        dir += right;
    }
    if bits.contains(InputBits::STRAFE_LEFT) {
        dir -= right;
    }
    safe_normalize(dir).unwrap_or(Vec3::new(0.0, 0.0, 0.0))
}

/// Selects the named speed for this tick: backward-only motion uses the
/// back speed, otherwise walk or run depending on `WALK_MODE`.
pub fn select_ground_speed(bits: InputBits, speeds: &SpeedTable) -> f32 {
    let backward_only = bits.contains(InputBits::BACKWARD) && !bits.contains(InputBits::FORWARD);
    if backward_only {
        speeds.run_back
    } else if bits.contains(InputBits::WALK_MODE) {
        speeds.walk
    } else {
        speeds.run
    }
}

pub fn select_swim_speed(bits: InputBits, speeds: &SpeedTable) -> f32 {
    let backward_only = bits.contains(InputBits::BACKWARD) && !bits.contains(InputBits::FORWARD);
    if backward_only {
        speeds.swim_back
    } else {
        speeds.swim
    }
}
