//! Capsule collision, bounding-interval scene queries, and the three-pass
//! character movement stepper used by the server-authoritative navigation
//! layer. Pathfinding (A* over a navmesh) and map/model file parsing are
//! sibling concerns outside this crate; see [`pathfinding`] for the
//! boundary this crate exposes to them.
//!
//! Public API policy: expose only what a server-side movement tick and its
//! sibling subsystems need — the math and geometry kernels underneath stay
//! private to this crate.

mod bih;
pub mod config;
pub mod coords;
pub mod error;
mod geom;
mod math;
pub mod mover;
pub mod pathfinding;
mod scene;
pub mod stepper;

pub use config::{LogConfig, LogMask, PhysConfig};
pub use coords::mirror_frame;
pub use error::PhysError;
pub use geom::{Capsule, Contact, ContactRegion, Triangle};
pub use math::{Aabb, Vec3};
pub use mover::{CapsuleCharacterMover, CharacterState};
pub use scene::{
    DynamicObject, DynamicRegistry, GateState, InstanceRef, LiquidSample, LiquidType, Model,
    ModelInstance, SceneQuery, StaticMapTree, SweepResults, TerrainGrid,
};
pub use stepper::{
    InputBits, MoveFlags, SpeedTable, StepInput, StepOutput, Stepper,
    PHYSICS_FLAG_TRUST_INPUT_VELOCITY,
};
