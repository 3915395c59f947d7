use foundation::math::Vec3;
use scene::components::Orientation;

use super::{Gizmo, GizmoPart, Placement, X_COLOR, Y_COLOR, Z_COLOR};
use crate::op::GizmoOp;

/// Translation arrows.
///
/// Arrows are modelled along their local +Y; the X arrow is rolled by 90°
/// and the Z arrow pitched by 90° so that each points along its axis.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveAxisEntity {
    pub x: GizmoPart,
    pub y: GizmoPart,
    pub z: GizmoPart,
    placement: Placement,
}

impl Default for MoveAxisEntity {
    fn default() -> Self {
        Self::new(1.5)
    }
}

impl MoveAxisEntity {
    pub fn new(size: f64) -> Self {
        let mut entity = Self {
            x: GizmoPart::new(GizmoOp::MoveX, X_COLOR, Orientation::new(0.0, 0.0, 90.0)),
            y: GizmoPart::new(GizmoOp::MoveY, Y_COLOR, Orientation::new(0.0, 0.0, 0.0)),
            z: GizmoPart::new(GizmoOp::MoveZ, Z_COLOR, Orientation::new(90.0, 0.0, 0.0)),
            placement: Placement::default(),
        };
        entity.set_size(size);
        entity
    }

    pub fn set_pitch(&mut self, a: f64) {
        self.x.set_pitch(a);
        self.y.set_pitch(a);
        self.z.set_pitch(a + 90.0);
    }

    pub fn set_yaw(&mut self, a: f64) {
        self.x.set_yaw(a);
        self.y.set_yaw(a);
        self.z.set_yaw(a);
    }

    /// The Z arrow keeps its roll.
    pub fn set_roll(&mut self, a: f64) {
        self.x.set_roll(a + 90.0);
        self.y.set_roll(a);
    }

    /// World direction of the Y arrow at the last placement.
    pub fn up_axis(&self) -> Vec3 {
        self.y
            .world_rotation(&self.placement)
            .rotate(Vec3::UNIT_Y)
            .normalize()
    }
}

impl Gizmo for MoveAxisEntity {
    fn parts(&self) -> [&GizmoPart; 3] {
        [&self.x, &self.y, &self.z]
    }

    fn parts_mut(&mut self) -> [&mut GizmoPart; 3] {
        [&mut self.x, &mut self.y, &mut self.z]
    }

    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }
}
