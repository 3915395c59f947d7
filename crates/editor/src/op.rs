use serde::{Deserialize, Serialize};

/// Drag operation bound to a gizmo sub-part.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GizmoOp {
    MoveX,
    MoveY,
    MoveZ,
    MoveXz,
    MoveXy,
    MoveZy,
    RotatePitch,
    RotateYaw,
    RotateRoll,
    Scale,
    ScaleX,
    ScaleY,
    ScaleZ,
}

impl GizmoOp {
    pub const ALL: [GizmoOp; 13] = [
        GizmoOp::MoveX,
        GizmoOp::MoveY,
        GizmoOp::MoveZ,
        GizmoOp::MoveXz,
        GizmoOp::MoveXy,
        GizmoOp::MoveZy,
        GizmoOp::RotatePitch,
        GizmoOp::RotateYaw,
        GizmoOp::RotateRoll,
        GizmoOp::Scale,
        GizmoOp::ScaleX,
        GizmoOp::ScaleY,
        GizmoOp::ScaleZ,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GizmoOp::MoveX => "move_x",
            GizmoOp::MoveY => "move_y",
            GizmoOp::MoveZ => "move_z",
            GizmoOp::MoveXz => "move_xz",
            GizmoOp::MoveXy => "move_xy",
            GizmoOp::MoveZy => "move_zy",
            GizmoOp::RotatePitch => "rotate_pitch",
            GizmoOp::RotateYaw => "rotate_yaw",
            GizmoOp::RotateRoll => "rotate_roll",
            GizmoOp::Scale => "scale",
            GizmoOp::ScaleX => "scale_x",
            GizmoOp::ScaleY => "scale_y",
            GizmoOp::ScaleZ => "scale_z",
        }
    }
}

impl std::fmt::Display for GizmoOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOp(pub String);

impl std::fmt::Display for UnknownOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown gizmo operation: {}", self.0)
    }
}

impl std::error::Error for UnknownOp {}

impl std::str::FromStr for GizmoOp {
    type Err = UnknownOp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GizmoOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOp(s.to_string()))
    }
}
