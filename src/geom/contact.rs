use crate::math::Vec3;
use crate::scene::InstanceRef;

/// Which part of the capsule the contact was found against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRegion {
    LowerSphere,
    UpperSphere,
    Cylinder,
}

/// The outcome of a single shape-vs-triangle (or shape-vs-shape) test.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub hit: bool,
    pub depth: f32,
    pub normal: Vec3,
    pub point: Vec3,
    /// Time of impact in `[0, 1]` along the sweep, for swept queries only.
    pub toi: Option<f32>,
    pub triangle_index: Option<u32>,
    pub instance_id: Option<InstanceRef>,
    pub region: ContactRegion,
    /// True if the shape already overlapped geometry at `t = 0`.
    pub start_penetrating: bool,
}

impl Contact {
    pub fn none() -> Self {
        Self {
            hit: false,
            depth: 0.0,
            normal: Vec3::new(0.0, 0.0, 1.0),
            point: Vec3::new(0.0, 0.0, 0.0),
            toi: None,
            triangle_index: None,
            instance_id: None,
            region: ContactRegion::Cylinder,
            start_penetrating: false,
        }
    }
}
