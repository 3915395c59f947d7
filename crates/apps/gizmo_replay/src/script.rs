//! Replay scripts: a camera, a globe, one entity and a list of input steps.

use editor::{
    EditorConfig, EditorScene, EditorState, GizmoOp, LayerEvent, LayerKind, PoseEditError,
    PoseField, PoseReadout, StaticGlobe, apply_pose_field, ground,
};
use foundation::math::{Ellipsoid, Geodetic, Vec2, Vec3};
use runtime::frame::Frame;
use scene::camera::PerspectiveCamera;
use scene::components::{ComponentProperties, Orientation, Transform};
use scene::world::World;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Defaults to a view from three times the entity's distance.
    #[serde(default)]
    pub camera: Option<CameraSpec>,
    #[serde(default)]
    pub ellipsoid: EllipsoidSpec,
    pub entity: EntitySpec,
    #[serde(default = "default_dt")]
    pub dt_s: f64,
    pub steps: Vec<Step>,
}

fn default_dt() -> f64 {
    1.0 / 60.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraSpec {
    pub eye: [f64; 3],
    pub target: [f64; 3],
    #[serde(default = "default_up")]
    pub up: [f64; 3],
    #[serde(default = "default_fov")]
    pub fov_deg: f64,
    #[serde(default = "default_viewport")]
    pub viewport: [f64; 2],
}

fn default_up() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}

fn default_fov() -> f64 {
    45.0
}

fn default_viewport() -> [f64; 2] {
    [1280.0, 720.0]
}

impl CameraSpec {
    fn to_camera(&self) -> PerspectiveCamera {
        let [ex, ey, ez] = self.eye;
        let [tx, ty, tz] = self.target;
        let [ux, uy, uz] = self.up;
        PerspectiveCamera::look_at(Vec3::new(ex, ey, ez), Vec3::new(tx, ty, tz), Vec3::new(ux, uy, uz))
            .with_fov_y(self.fov_deg.to_radians())
            .with_viewport(self.viewport[0], self.viewport[1])
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EllipsoidSpec {
    #[default]
    Wgs84,
    /// Sphere radius in meters.
    Sphere(f64),
}

impl EllipsoidSpec {
    fn to_ellipsoid(self) -> Ellipsoid {
        match self {
            EllipsoidSpec::Wgs84 => Ellipsoid::WGS84,
            EllipsoidSpec::Sphere(radius) => Ellipsoid::sphere(radius),
        }
    }
}

/// Start pose; longitude and latitude in degrees.
#[derive(Debug, Clone, Deserialize)]
pub struct EntitySpec {
    pub lon: f64,
    pub lat: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub pitch: f64,
    #[serde(default)]
    pub yaw: f64,
    #[serde(default)]
    pub roll: f64,
    #[serde(default)]
    pub no_edit: bool,
}

/// A pointer position: either pixels or a geodetic point projected through
/// the camera.
#[derive(Debug, Copy, Clone, Default, Deserialize)]
pub struct Pointer {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    #[serde(default)]
    pub height: f64,
}

impl Pointer {
    fn resolve(&self, globe: &StaticGlobe, step: usize) -> Result<Vec2, ReplayError> {
        match (self.x, self.y, self.lon, self.lat) {
            (Some(x), Some(y), _, _) => Ok(Vec2::new(x, y)),
            (_, _, Some(lon), Some(lat)) => {
                let world = globe
                    .ellipsoid
                    .geodetic_to_cartesian(Geodetic::from_lon_lat_deg(lon, lat, self.height));
                globe.project(world).ok_or(ReplayError::BehindCamera { step })
            }
            _ => Err(ReplayError::MissingPointer { step }),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Click the scripted entity.
    Select,
    Unselect,
    Enter {
        layer: LayerKind,
        op: GizmoOp,
    },
    Leave {
        layer: LayerKind,
        op: GizmoOp,
    },
    Down {
        layer: LayerKind,
        op: GizmoOp,
        #[serde(flatten)]
        at: Pointer,
    },
    Move {
        #[serde(flatten)]
        at: Pointer,
    },
    Up {
        layer: LayerKind,
        op: GizmoOp,
    },
    Sync,
    Edit {
        field: PoseField,
        value: f64,
    },
    Ground,
    Unbind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReplayError {
    /// A pointer step named neither `x`/`y` nor `lon`/`lat`.
    MissingPointer { step: usize },
    /// A geodetic pointer projects behind the camera.
    BehindCamera { step: usize },
    Pose(PoseEditError),
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::MissingPointer { step } => {
                write!(f, "step {step}: pointer needs x/y or lon/lat")
            }
            ReplayError::BehindCamera { step } => {
                write!(f, "step {step}: pointer is behind the camera")
            }
            ReplayError::Pose(e) => write!(f, "pose edit failed: {e}"),
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<PoseEditError> for ReplayError {
    fn from(e: PoseEditError) -> Self {
        ReplayError::Pose(e)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedEvent {
    pub frame: u64,
    pub event: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub pose: PoseReadout,
    pub events: Vec<LoggedEvent>,
    pub state: String,
    pub navigation_active: bool,
}

fn state_name(state: EditorState) -> String {
    match state {
        EditorState::Idle => "idle".to_string(),
        EditorState::Selected => "selected".to_string(),
        EditorState::Dragging(op) => format!("dragging {op}"),
    }
}

fn default_camera(target: Vec3) -> PerspectiveCamera {
    let up = if target.normalize().cross(Vec3::UNIT_Z).length() < 1e-6 {
        Vec3::UNIT_Y
    } else {
        Vec3::UNIT_Z
    };
    PerspectiveCamera::look_at(target * 3.0, target, up)
}

pub fn replay(script: &Script, config: &EditorConfig) -> Result<Report, ReplayError> {
    let ellipsoid = script.ellipsoid.to_ellipsoid();
    let spec = &script.entity;
    let start =
        ellipsoid.geodetic_to_cartesian(Geodetic::from_lon_lat_deg(spec.lon, spec.lat, spec.height));
    let camera = match &script.camera {
        Some(camera) => camera.to_camera(),
        None => default_camera(start),
    };
    let mut globe = StaticGlobe::new(camera, ellipsoid);

    let mut world = World::new();
    let entity = world.spawn_with(
        Transform::translate(start).with_orientation(Orientation::new(spec.pitch, spec.yaw, spec.roll)),
    );
    if spec.no_edit {
        world.set_properties(entity, ComponentProperties::no_edit());
    }

    let mut editor = EditorScene::new(config);
    editor.bind();
    let mut frame = Frame::new(0, script.dt_s);

    for (index, step) in script.steps.iter().enumerate() {
        debug!(index, ?step, "replaying");
        match step {
            Step::Select => {
                editor.handle_click(&world, Some(entity));
            }
            Step::Unselect => editor.unselect(),
            Step::Enter { layer, op } => {
                editor.handle_layer_event(*layer, LayerEvent::Enter { op: *op }, &world, &mut globe)
            }
            Step::Leave { layer, op } => {
                editor.handle_layer_event(*layer, LayerEvent::Leave { op: *op }, &world, &mut globe)
            }
            Step::Down { layer, op, at } => {
                let pos = at.resolve(&globe, index)?;
                editor.handle_layer_event(
                    *layer,
                    LayerEvent::Down { op: *op, pos },
                    &world,
                    &mut globe,
                );
            }
            Step::Move { at } => {
                let pos = at.resolve(&globe, index)?;
                editor.handle_pointer_move(pos, &mut world, &globe);
            }
            Step::Up { layer, op } => {
                editor.handle_layer_event(*layer, LayerEvent::Up { op: *op }, &world, &mut globe)
            }
            Step::Sync => {
                frame = frame.next();
                editor.sync(frame, &world, &mut globe);
            }
            Step::Edit { field, value } => {
                apply_pose_field(&mut world, &globe, entity, *field, *value)?
            }
            Step::Ground => ground(&mut world, &globe, entity)?,
            Step::Unbind => editor.unbind(&mut globe),
        }
    }

    let pose = PoseReadout::read(&world, &globe, entity)?;
    let events: Vec<LoggedEvent> = editor
        .events()
        .map(|e| LoggedEvent {
            frame: e.frame_index,
            event: e.payload.to_string(),
        })
        .collect();
    info!(steps = script.steps.len(), events = events.len(), "replay finished");

    Ok(Report {
        pose,
        events,
        state: state_name(editor.state()),
        navigation_active: globe.navigation_active(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{ReplayError, Script, replay};
    use editor::EditorConfig;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn parse(json: &str) -> Script {
        serde_json::from_str(json).expect("script")
    }

    #[test]
    fn move_x_drag_script() {
        let script = parse(
            r#"{
                "entity": { "lon": 10.0, "lat": 20.0, "height": 100.0 },
                "steps": [
                    { "step": "select" },
                    { "step": "sync" },
                    { "step": "down", "layer": "move_axis", "op": "move_x", "lon": 10.0, "lat": 20.0, "height": 100.0 },
                    { "step": "move", "lon": 15.0, "lat": 20.0, "height": 100.0 },
                    { "step": "up", "layer": "move_axis", "op": "move_x" },
                    { "step": "sync" }
                ]
            }"#,
        );

        let report = replay(&script, &EditorConfig::default()).expect("replay");
        assert_close(report.pose.lon, 15.0, 1e-6);
        assert_close(report.pose.lat, 20.0, 1e-7);
        assert_close(report.pose.height, 100.0, 1e-3);
        assert_eq!(report.state, "selected");
        assert!(report.navigation_active);

        let log: Vec<(u64, &str)> = report
            .events
            .iter()
            .map(|e| (e.frame, e.event.as_str()))
            .collect();
        assert_eq!(log, vec![(0, "select entity#0"), (1, "move entity#0")]);
    }

    #[test]
    fn edits_and_ground() {
        let script = parse(
            r#"{
                "ellipsoid": { "sphere": 1000000.0 },
                "entity": { "lon": -30.0, "lat": 45.0, "height": 500.0, "yaw": 10.0 },
                "steps": [
                    { "step": "edit", "field": "yaw", "value": 25.0 },
                    { "step": "edit", "field": "scale", "value": 2.0 },
                    { "step": "ground" }
                ]
            }"#,
        );

        let report = replay(&script, &EditorConfig::default()).expect("replay");
        assert_eq!(report.pose.yaw, 25.0);
        assert_eq!(report.pose.scale, [2.0, 2.0, 2.0]);
        assert_close(report.pose.height, 0.0, 1e-6);
        assert_eq!(report.state, "idle");
        assert!(report.events.is_empty());
    }

    #[test]
    fn locked_entity_is_never_selected() {
        let script = parse(
            r#"{
                "entity": { "lon": 0.0, "lat": 0.0, "no_edit": true },
                "steps": [ { "step": "select" }, { "step": "sync" } ]
            }"#,
        );
        let report = replay(&script, &EditorConfig::default()).expect("replay");
        assert_eq!(report.state, "idle");
        assert!(report.events.is_empty());
    }

    #[test]
    fn pointer_needs_coordinates() {
        let script = parse(
            r#"{
                "entity": { "lon": 0.0, "lat": 0.0 },
                "steps": [
                    { "step": "select" },
                    { "step": "down", "layer": "rotate", "op": "rotate_yaw", "x": 10.0 }
                ]
            }"#,
        );
        assert_eq!(
            replay(&script, &EditorConfig::default()).err(),
            Some(ReplayError::MissingPointer { step: 1 })
        );
    }

    #[test]
    fn unknown_fields_fail_to_parse() {
        let err = serde_json::from_str::<Script>(
            r#"{ "entity": { "lon": 0.0, "lat": 0.0 },
                 "steps": [ { "step": "edit", "field": "altitude", "value": 1.0 } ] }"#,
        )
        .expect_err("unknown pose field");
        assert!(err.to_string().contains("altitude"), "{err}");
    }
}
