use scene::components::Orientation;

use super::{Gizmo, GizmoPart, Placement, X_COLOR, Y_COLOR, Z_COLOR};
use crate::op::GizmoOp;

/// Translation plane handles.
///
/// Handles are modelled lying in the local XZ plane. The XY handle is
/// pitched by 90° and the ZY handle rolled by 90°. Each handle takes the
/// color of the axis normal to it.
#[derive(Debug, Clone, PartialEq)]
pub struct MovePlaneEntity {
    pub xz: GizmoPart,
    pub xy: GizmoPart,
    pub zy: GizmoPart,
    placement: Placement,
}

impl Default for MovePlaneEntity {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl MovePlaneEntity {
    pub fn new(size: f64) -> Self {
        let mut entity = Self {
            xz: GizmoPart::new(GizmoOp::MoveXz, Y_COLOR, Orientation::new(0.0, 0.0, 0.0)),
            xy: GizmoPart::new(GizmoOp::MoveXy, Z_COLOR, Orientation::new(90.0, 0.0, 0.0)),
            zy: GizmoPart::new(GizmoOp::MoveZy, X_COLOR, Orientation::new(0.0, 0.0, 90.0)),
            placement: Placement::default(),
        };
        entity.set_size(size);
        entity
    }

    pub fn set_pitch(&mut self, a: f64) {
        self.xz.set_pitch(a);
        self.xy.set_pitch(a + 90.0);
        self.zy.set_pitch(a);
    }

    pub fn set_yaw(&mut self, a: f64) {
        self.xz.set_yaw(a);
        self.xy.set_yaw(a);
        self.zy.set_yaw(a);
    }

    pub fn set_roll(&mut self, a: f64) {
        self.xz.set_roll(a);
        self.xy.set_roll(a);
        self.zy.set_roll(a + 90.0);
    }
}

impl Gizmo for MovePlaneEntity {
    fn parts(&self) -> [&GizmoPart; 3] {
        [&self.xz, &self.xy, &self.zy]
    }

    fn parts_mut(&mut self) -> [&mut GizmoPart; 3] {
        [&mut self.xz, &mut self.xy, &mut self.zy]
    }

    fn placement(&self) -> &Placement {
        &self.placement
    }

    fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }
}
