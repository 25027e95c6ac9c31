//! Engine configuration, constructed explicitly and passed in rather than
//! read from environment variables: an owned value threaded through
//! construction instead of `VMAP_PHYS_LOG_LEVEL`/`VMAP_PHYS_LOG_MASK`-style
//! globals.

use log::LevelFilter;

/// Diagnostic subsystem tags a caller can selectively enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogMask(u8);

impl LogMask {
    pub const MOVE: LogMask = LogMask(1 << 0);
    pub const SURF: LogMask = LogMask(1 << 1);
    pub const CYL: LogMask = LogMask(1 << 2);
    pub const STEP: LogMask = LogMask(1 << 3);
    pub const ALL: LogMask = LogMask(0b1111);
    pub const NONE: LogMask = LogMask(0);

    pub const fn contains(self, tag: LogMask) -> bool {
        self.0 & tag.0 == tag.0
    }

    pub const fn union(self, other: LogMask) -> LogMask {
        LogMask(self.0 | other.0)
    }
}

/// Logger configuration injected at engine construction.
#[derive(Debug, Clone, Copy)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub mask: LogMask,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Warn,
            mask: LogMask::ALL,
        }
    }
}

impl LogConfig {
    pub fn should_log(&self, tag: LogMask, level: log::Level) -> bool {
        level <= self.level && self.mask.contains(tag)
    }
}

/// Top-level tunables for the movement stepper and collision kernel.
/// Defaults mirror the tolerances laid out in `SPEC_FULL.md` §4.1: the
/// capsule's own radius drives the actual contact skin
/// (`crate::math::base_skin`) — `skin` here is only the fallback used where
/// no capsule is in scope.
#[derive(Debug, Clone, Copy)]
pub struct PhysConfig {
    pub skin: f32,
    pub max_slide_iterations: u32,
    pub max_slope_cos: f32,
    pub step_height: f32,
    pub step_down: f32,
    pub ground_probe_distance: f32,
    pub gravity_mps2: f32,
    pub terminal_vz: f32,
    pub jump_vz: f32,
    pub landing_tolerance: f32,
    pub swim_depth_tolerance: f32,
    pub log: LogConfig,
}

impl Default for PhysConfig {
    fn default() -> Self {
        Self {
            skin: crate::math::base_skin(0.3),
            max_slide_iterations: crate::math::DEFAULT_MAX_ITERATIONS,
            max_slope_cos: crate::math::WALKABLE_COS_MIN,
            step_height: crate::math::STEP_HEIGHT,
            step_down: crate::math::STEP_DOWN,
            ground_probe_distance: 0.30,
            gravity_mps2: crate::math::GRAVITY,
            terminal_vz: crate::math::TERMINAL_VZ,
            jump_vz: crate::math::JUMP_VZ,
            landing_tolerance: crate::math::LANDING_TOLERANCE,
            swim_depth_tolerance: 0.5,
            log: LogConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_mask_union_and_contains() {
        let mask = LogMask::MOVE.union(LogMask::STEP);
        assert!(mask.contains(LogMask::MOVE));
        assert!(mask.contains(LogMask::STEP));
        assert!(!mask.contains(LogMask::SURF));
    }

    #[test]
    fn default_config_matches_documented_tolerances() {
        let cfg = PhysConfig::default();
        assert!((cfg.gravity_mps2 - 19.291_1).abs() < 1e-4);
        assert!((cfg.step_height - 2.3).abs() < 1e-6);
        assert!((cfg.step_down - 4.0).abs() < 1e-6);
        assert!((cfg.terminal_vz + 60.0).abs() < 1e-6);
        assert!((cfg.jump_vz - 7.955_77).abs() < 1e-4);
        assert_eq!(cfg.max_slide_iterations, 4);
    }
}
