use scene::components::Orientation;

use super::{Gizmo, GizmoPart, Placement, X_COLOR, Y_COLOR, Z_COLOR};
use crate::op::GizmoOp;

/// Rotation rings, one per local frame axis.
///
/// Rings are modelled in the local XZ plane (normal +Y). The pitch ring is
/// rolled by 90° to face +X, the roll ring pitched by 90° to face +Z.
#[derive(Debug, Clone, PartialEq)]
pub struct RotateEntity {
    pub pitch: GizmoPart,
    pub yaw: GizmoPart,
    pub roll: GizmoPart,
    placement: Placement,
}

impl Default for RotateEntity {
    fn default() -> Self {
        Self::new(1.2)
    }
}

impl RotateEntity {
    pub fn new(size: f64) -> Self {
        let mut entity = Self {
            pitch: GizmoPart::new(GizmoOp::RotatePitch, X_COLOR, Orientation::new(0.0, 0.0, 90.0)),
            yaw: GizmoPart::new(GizmoOp::RotateYaw, Y_COLOR, Orientation::new(0.0, 0.0, 0.0)),
            roll: GizmoPart::new(GizmoOp::RotateRoll, Z_COLOR, Orientation::new(90.0, 0.0, 0.0)),
            placement: Placement::default(),
        };
        entity.set_size(size);
        entity
    }

    pub fn set_pitch(&mut self, a: f64) {
        self.pitch.set_pitch(a);
        self.yaw.set_pitch(a);
        self.roll.set_pitch(a + 90.0);
    }

    pub fn set_yaw(&mut self, a: f64) {
        self.pitch.set_yaw(a);
        self.yaw.set_yaw(a);
        self.roll.set_yaw(a);
    }

    pub fn set_roll(&mut self, a: f64) {
        self.pitch.set_roll(a + 90.0);
        self.yaw.set_roll(a);
        self.roll.set_roll(a);
    }
}

impl Gizmo for RotateEntity {
    fn parts(&self) -> [&GizmoPart; 3] {
        [&self.pitch, &self.yaw, &self.roll]
    }

    fn parts_mut(&mut self) -> [&mut GizmoPart; 3] {
        [&mut self.pitch, &mut self.yaw, &mut self.roll]
    }

    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }
}
