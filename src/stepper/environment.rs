use crate::config::PhysConfig;
use crate::math::Vec3;
use crate::scene::LiquidSample;

/// The three states the movement state machine can be in for a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveState {
    Grounded,
    Airborne,
    Swimming,
}

/// Classifies the character's environment from the ground probe and liquid
/// sample taken at the start of the step. Swimming takes priority over
/// ground contact once the character is deep enough in a liquid volume;
/// shallow wading still counts as grounded.
pub fn classify_environment(
    feet: Vec3,
    ground_z: Option<f32>,
    liquid: Option<LiquidSample>,
    config: &PhysConfig,
) -> MoveState {
    if let Some(sample) = liquid {
        let depth = sample.surface_z - feet.z;
        if depth >= config.swim_depth_tolerance {
            return MoveState::Swimming;
        }
    }

    match ground_z {
        Some(gz) if (feet.z - gz).abs() <= config.ground_probe_distance => MoveState::Grounded,
        _ => MoveState::Airborne,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::LiquidType;

    #[test]
    fn deep_liquid_overrides_grounded() {
        let config = PhysConfig::default();
        let liquid = LiquidSample {
            liquid_type: LiquidType::Water,
            surface_z: 10.0,
        };
        let state = classify_environment(Vec3::new(0.0, 0.0, 0.0), Some(0.0), Some(liquid), &config);
        assert_eq!(state, MoveState::Swimming);
    }

    #[test]
    fn no_ground_and_no_liquid_is_airborne() {
        let config = PhysConfig::default();
        let state = classify_environment(Vec3::new(0.0, 0.0, 100.0), None, None, &config);
        assert_eq!(state, MoveState::Airborne);
    }

    #[test]
    fn close_ground_is_grounded() {
        let config = PhysConfig::default();
        let state = classify_environment(Vec3::new(0.0, 0.0, 0.0), Some(0.01), None, &config);
        assert_eq!(state, MoveState::Grounded);
    }
}
