//! Gizmo entities: passive shapes tagged with the operation they drive.
//!
//! Each composite holds exactly three named sub-parts. Their base angular
//! offsets are part of the visual contract and are spelled out per composite
//! rather than derived.

pub mod move_axis;
pub mod move_plane;
pub mod rotate;

pub use move_axis::*;
pub use move_plane::*;
pub use rotate::*;

use foundation::math::{Quat, Vec3};
use scene::components::Orientation;

use crate::op::GizmoOp;

pub type Rgb = [u8; 3];

pub const X_COLOR: Rgb = [237, 59, 59];
pub const Y_COLOR: Rgb = [89, 196, 61];
pub const Z_COLOR: Rgb = [56, 127, 235];
pub const SELECT_COLOR: Rgb = [255, 215, 0];

/// One manipulable sub-part (arrow, plane handle or ring).
#[derive(Debug, Clone, PartialEq)]
pub struct GizmoPart {
    pub op: GizmoOp,
    pub color: Rgb,
    pub select_color: Rgb,
    orientation: Orientation,
    size: f64,
    hovered: bool,
}

impl GizmoPart {
    pub fn new(op: GizmoOp, color: Rgb, orientation: Orientation) -> Self {
        Self {
            op,
            color,
            select_color: SELECT_COLOR,
            orientation,
            size: 1.0,
            hovered: false,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn set_pitch(&mut self, deg: f64) {
        self.orientation.pitch_deg = deg;
    }

    pub fn set_yaw(&mut self, deg: f64) {
        self.orientation.yaw_deg = deg;
    }

    pub fn set_roll(&mut self, deg: f64) {
        self.orientation.roll_deg = deg;
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = size;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Color to draw with, highlighted while hovered.
    pub fn current_color(&self) -> Rgb {
        if self.hovered {
            self.select_color
        } else {
            self.color
        }
    }

    /// Local-to-world rotation of this part at `placement`.
    pub fn world_rotation(&self, placement: &Placement) -> Quat {
        placement.frame.conjugate() * self.orientation.to_quat()
    }
}

/// Where a composite gizmo sits: a world position and the north frame there.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Placement {
    pub position: Vec3,
    /// Maps world directions into the local frame at `position`.
    pub frame: Quat,
}

/// A composite gizmo of three tagged sub-parts.
pub trait Gizmo {
    fn parts(&self) -> [&GizmoPart; 3];

    fn parts_mut(&mut self) -> [&mut GizmoPart; 3];

    fn placement(&self) -> &Placement;

    fn set_placement(&mut self, placement: Placement);

    fn set_size(&mut self, size: f64) {
        for part in self.parts_mut() {
            part.set_size(size);
        }
    }

    fn part(&self, op: GizmoOp) -> Option<&GizmoPart> {
        self.parts().into_iter().find(|p| p.op == op)
    }

    fn part_mut(&mut self, op: GizmoOp) -> Option<&mut GizmoPart> {
        self.parts_mut().into_iter().find(|p| p.op == op)
    }
}

#[cfg(test)]
pub(crate) fn assert_vec_parallel(a: Vec3, b: Vec3) {
    let cross = a.normalize().cross(b.normalize()).length();
    assert!(cross < 1e-9, "expected {a:?} parallel to {b:?} (|cross| {cross})");
}
