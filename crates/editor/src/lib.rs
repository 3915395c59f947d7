//! Gizmo-based pose editing for entities placed on a globe.
//!
//! The [`EditorScene`] owns selection and the active drag. Poses live in the
//! scene crate's `World`; camera and planet queries go through a
//! [`GlobeHost`].

pub mod config;
pub mod editor_scene;
pub mod fields;
pub mod gizmo;
pub mod handlers;
pub mod host;
pub mod layer;
pub mod op;

pub use config::EditorConfig;
pub use editor_scene::{EditorEvent, EditorScene, EditorState};
pub use fields::{PoseEditError, PoseField, PoseReadout, UnknownPoseField, apply_pose_field, ground};
pub use host::{GlobeHost, StaticGlobe};
pub use layer::{GizmoLayer, LayerControl, LayerEvent, LayerKind};
pub use op::{GizmoOp, UnknownOp};
