use foundation::math::Vec2;

use crate::gizmo::{Gizmo, Placement};
use crate::op::GizmoOp;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    MoveAxis,
    MovePlane,
    Rotate,
}

impl LayerKind {
    pub const ALL: [LayerKind; 3] = [LayerKind::MoveAxis, LayerKind::MovePlane, LayerKind::Rotate];

    pub fn name(self) -> &'static str {
        match self {
            LayerKind::MoveAxis => "move-axis",
            LayerKind::MovePlane => "move-plane",
            LayerKind::Rotate => "rotate-circles",
        }
    }
}

/// Pointer input the host routes to a gizmo layer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LayerEvent {
    Enter { op: GizmoOp },
    Leave { op: GizmoOp },
    Down { op: GizmoOp, pos: Vec2 },
    Up { op: GizmoOp },
}

/// Visual container for one composite gizmo.
#[derive(Debug, Clone, PartialEq)]
pub struct GizmoLayer<G> {
    kind: LayerKind,
    gizmo: G,
    visible: bool,
    attached: bool,
    depth_order: i32,
}

impl<G: Gizmo> GizmoLayer<G> {
    /// Layers start hidden and detached.
    pub fn new(kind: LayerKind, gizmo: G, depth_order: i32) -> Self {
        Self {
            kind,
            gizmo,
            visible: false,
            attached: false,
            depth_order,
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn depth_order(&self) -> i32 {
        self.depth_order
    }

    pub fn gizmo(&self) -> &G {
        &self.gizmo
    }

    pub fn gizmo_mut(&mut self) -> &mut G {
        &mut self.gizmo
    }
}

/// Kind-agnostic layer controls used by the scene's event routing.
pub trait LayerControl {
    fn is_visible(&self) -> bool;

    fn set_visible(&mut self, visible: bool);

    fn is_attached(&self) -> bool;

    fn set_attached(&mut self, attached: bool);

    /// Whether `op` belongs to one of this layer's sub-parts.
    fn owns(&self, op: GizmoOp) -> bool;

    /// Returns `false` if `op` is not part of this layer.
    fn set_hovered(&mut self, op: GizmoOp, hovered: bool) -> bool;

    fn place(&mut self, placement: Placement);

    fn accepts_input(&self) -> bool {
        self.is_attached() && self.is_visible()
    }
}

impl<G: Gizmo> LayerControl for GizmoLayer<G> {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            for part in self.gizmo.parts_mut() {
                part.set_hovered(false);
            }
        }
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    fn owns(&self, op: GizmoOp) -> bool {
        self.gizmo.part(op).is_some()
    }

    fn set_hovered(&mut self, op: GizmoOp, hovered: bool) -> bool {
        match self.gizmo.part_mut(op) {
            Some(part) => {
                part.set_hovered(hovered);
                true
            }
            None => false,
        }
    }

    fn place(&mut self, placement: Placement) {
        self.gizmo.set_placement(placement);
    }
}
