//! Drag operation handlers.
//!
//! Each handler compares the anchor ray (eye through the button-down
//! position) with the current pointer ray and returns the new pose value, or
//! `None` when a required intersection misses. A miss never produces a
//! partial update.

use foundation::math::{Geodetic, Plane, Quat, Ray, Sphere, Vec2, Vec3};
use scene::components::Orientation;
use tracing::trace;

use crate::host::GlobeHost;
use crate::op::GizmoOp;

/// Rays for one pointer-move, both starting at the eye.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragInput {
    pub eye: Vec3,
    pub click_dir: Vec3,
    pub drag_dir: Vec3,
}

impl DragInput {
    pub fn from_screen<H: GlobeHost + ?Sized>(host: &H, click: Vec2, current: Vec2) -> Self {
        Self {
            eye: host.eye(),
            click_dir: host.unproject(click),
            drag_dir: host.unproject(current),
        }
    }

    fn click_ray(&self) -> Ray {
        Ray::new(self.eye, self.click_dir)
    }

    fn drag_ray(&self) -> Ray {
        Ray::new(self.eye, self.drag_dir)
    }
}

/// Entity pose captured at button-down.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Anchor {
    pub position: Vec3,
    pub orientation: Orientation,
}

/// The single pose component a handler writes back.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PoseUpdate {
    Position(Vec3),
    Pitch(f64),
    Yaw(f64),
    Roll(f64),
}

/// Dispatch `op` to its handler.
///
/// `gizmo_up` is the world direction of the translation gizmo's Y arrow.
pub fn run<H: GlobeHost + ?Sized>(
    op: GizmoOp,
    host: &H,
    input: &DragInput,
    anchor: &Anchor,
    gizmo_up: Vec3,
) -> Option<PoseUpdate> {
    let update = match op {
        GizmoOp::MoveX => move_x(host, input, anchor).map(PoseUpdate::Position),
        GizmoOp::MoveZ => move_z(host, input, anchor).map(PoseUpdate::Position),
        GizmoOp::MoveXz => sphere_drag(input, anchor).map(PoseUpdate::Position),
        GizmoOp::MoveY => move_y(host, input, anchor, gizmo_up).map(PoseUpdate::Position),
        GizmoOp::RotatePitch => {
            rotate(host, input, anchor, Vec3::UNIT_X, false)
                .map(|delta| PoseUpdate::Pitch(anchor.orientation.pitch_deg + delta))
        }
        GizmoOp::RotateYaw => {
            rotate(host, input, anchor, Vec3::UNIT_Y, true)
                .map(|delta| PoseUpdate::Yaw(anchor.orientation.yaw_deg + delta))
        }
        GizmoOp::RotateRoll => {
            rotate(host, input, anchor, Vec3::UNIT_Z, false)
                .map(|delta| PoseUpdate::Roll(anchor.orientation.roll_deg + delta))
        }
        GizmoOp::MoveXy
        | GizmoOp::MoveZy
        | GizmoOp::Scale
        | GizmoOp::ScaleX
        | GizmoOp::ScaleY
        | GizmoOp::ScaleZ => {
            trace!(%op, "operation has no handler");
            return None;
        }
    };

    if update.is_none() {
        trace!(%op, "drag ray missed, pose unchanged");
    }
    update
}

/// Rotate the anchor about the globe center so that the anchor ray's hit on
/// the anchor-radius sphere lands on the current ray's hit.
fn sphere_drag(input: &DragInput, anchor: &Anchor) -> Option<Vec3> {
    let sphere = Sphere::at_origin(anchor.position.length());
    let click_hit = input.click_ray().hit_sphere(&sphere)?;
    let drag_hit = input.drag_ray().hit_sphere(&sphere)?;
    let q = Quat::rotation_between(click_hit, drag_hit);
    Some(q.rotate(anchor.position))
}

/// Only longitude follows the pointer.
fn move_x<H: GlobeHost + ?Sized>(host: &H, input: &DragInput, anchor: &Anchor) -> Option<Vec3> {
    let candidate = host.cartesian_to_geodetic(sphere_drag(input, anchor)?);
    let start = host.cartesian_to_geodetic(anchor.position);
    Some(host.geodetic_to_cartesian(Geodetic::new(
        start.lat_rad,
        candidate.lon_rad,
        start.alt_m,
    )))
}

/// Only latitude follows the pointer.
fn move_z<H: GlobeHost + ?Sized>(host: &H, input: &DragInput, anchor: &Anchor) -> Option<Vec3> {
    let candidate = host.cartesian_to_geodetic(sphere_drag(input, anchor)?);
    let start = host.cartesian_to_geodetic(anchor.position);
    Some(host.geodetic_to_cartesian(Geodetic::new(
        candidate.lat_rad,
        start.lon_rad,
        start.alt_m,
    )))
}

fn move_y<H: GlobeHost + ?Sized>(
    host: &H,
    input: &DragInput,
    anchor: &Anchor,
    gizmo_up: Vec3,
) -> Option<Vec3> {
    let up = gizmo_up.try_normalize()?;
    let plane = Plane::new(anchor.position, up.cross(host.camera_right()))?;
    let click_hit = input.click_ray().hit_plane(&plane)?;
    let drag_hit = input.drag_ray().hit_plane(&plane)?;
    let lift = (drag_hit - anchor.position).dot(up) - (click_hit - anchor.position).dot(up);
    Some(anchor.position + up * lift)
}

/// Signed angle (degrees) swept about `local_axis` in the north frame at the
/// anchor.
///
/// Pitch and roll take their sign from `click x drag`, yaw from
/// `drag x click`; the ring visuals are calibrated to that.
fn rotate<H: GlobeHost + ?Sized>(
    host: &H,
    input: &DragInput,
    anchor: &Anchor,
    local_axis: Vec3,
    reversed: bool,
) -> Option<f64> {
    let normal = host
        .frame_rotation_at(anchor.position)
        .conjugate()
        .rotate(local_axis);
    let plane = Plane::new(anchor.position, normal)?;
    let click = (input.click_ray().hit_plane(&plane)? - anchor.position).try_normalize()?;
    let drag = (input.drag_ray().hit_plane(&plane)? - anchor.position).try_normalize()?;

    let magnitude = click.dot(drag).clamp(-1.0, 1.0).acos().to_degrees();
    let axis = if reversed {
        drag.cross(click)
    } else {
        click.cross(drag)
    };
    Some(sign(axis.dot(plane.normal)) * magnitude)
}

/// Like `f64::signum`, but zero stays zero.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Anchor, DragInput, PoseUpdate, run, sign};
    use crate::host::{GlobeHost, StaticGlobe};
    use crate::op::GizmoOp;
    use foundation::math::{Ellipsoid, Geodetic, Quat, Vec2, Vec3};
    use scene::camera::PerspectiveCamera;
    use scene::components::Orientation;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn wgs84_point(lon: f64, lat: f64, height: f64) -> Vec3 {
        Ellipsoid::WGS84.geodetic_to_cartesian(Geodetic::from_lon_lat_deg(lon, lat, height))
    }

    /// Globe seen from three times the anchor's distance, looking at the anchor.
    fn looking_at(anchor: Vec3) -> StaticGlobe {
        let camera = PerspectiveCamera::look_at(anchor * 3.0, anchor, Vec3::UNIT_Z)
            .with_viewport(1024.0, 768.0);
        StaticGlobe::new(camera, Ellipsoid::WGS84)
    }

    fn screen_drag(globe: &StaticGlobe, from: Vec3, to: Vec3) -> DragInput {
        let click = globe.project(from).expect("anchor on screen");
        let current = globe.project(to).expect("target on screen");
        DragInput::from_screen(globe, click, current)
    }

    fn anchor_at(position: Vec3) -> Anchor {
        Anchor {
            position,
            orientation: Orientation::new(5.0, 30.0, -10.0),
        }
    }

    fn position(update: Option<PoseUpdate>) -> Vec3 {
        match update {
            Some(PoseUpdate::Position(p)) => p,
            other => panic!("expected a position update, got {other:?}"),
        }
    }

    #[test]
    fn move_x_reaches_target_longitude() {
        let p0 = wgs84_point(10.0, 20.0, 100.0);
        let globe = looking_at(p0);
        let input = screen_drag(&globe, p0, wgs84_point(15.0, 20.0, 100.0));

        let moved = position(run(GizmoOp::MoveX, &globe, &input, &anchor_at(p0), Vec3::ZERO));
        let geo = globe.cartesian_to_geodetic(moved);
        assert_close(geo.lon_deg(), 15.0, 1e-6);
        assert_close(geo.lat_deg(), 20.0, 1e-7);
        assert_close(geo.alt_m, 100.0, 1e-3);
    }

    #[test]
    fn move_x_holds_latitude_on_diagonal_drag() {
        let p0 = wgs84_point(10.0, 20.0, 100.0);
        let globe = looking_at(p0);
        let input = screen_drag(&globe, p0, wgs84_point(12.0, 23.0, 100.0));

        let moved = position(run(GizmoOp::MoveX, &globe, &input, &anchor_at(p0), Vec3::ZERO));
        let geo = globe.cartesian_to_geodetic(moved);
        assert!(geo.lon_deg() > 10.5, "longitude should follow the drag: {geo:?}");
        assert_close(geo.lat_deg(), 20.0, 1e-7);
        assert_close(geo.alt_m, 100.0, 1e-3);
    }

    #[test]
    fn move_z_holds_longitude_and_height() {
        let p0 = wgs84_point(10.0, 20.0, 100.0);
        let globe = looking_at(p0);
        let input = screen_drag(&globe, p0, wgs84_point(11.0, 25.0, 100.0));

        let moved = position(run(GizmoOp::MoveZ, &globe, &input, &anchor_at(p0), Vec3::ZERO));
        let geo = globe.cartesian_to_geodetic(moved);
        assert!(geo.lat_deg() > 24.0, "latitude should follow the drag: {geo:?}");
        assert_close(geo.lon_deg(), 10.0, 1e-7);
        assert_close(geo.alt_m, 100.0, 1e-3);
    }

    #[test]
    fn move_xz_follows_both_coordinates_on_anchor_shell() {
        let sphere = Ellipsoid::sphere(6_371_000.0);
        let p0 = sphere.geodetic_to_cartesian(Geodetic::from_lon_lat_deg(-40.0, -5.0, 2_000.0));
        let p1 = sphere.geodetic_to_cartesian(Geodetic::from_lon_lat_deg(-37.0, -2.0, 2_000.0));
        let camera = PerspectiveCamera::look_at(p0 * 3.0, p0, Vec3::UNIT_Z);
        let globe = StaticGlobe::new(camera, sphere);
        let input = screen_drag(&globe, p0, p1);

        let moved = position(run(GizmoOp::MoveXz, &globe, &input, &anchor_at(p0), Vec3::ZERO));
        assert_close(moved.length(), p0.length(), 1e-6);
        let geo = globe.cartesian_to_geodetic(moved);
        assert_close(geo.lon_deg(), -37.0, 1e-6);
        assert_close(geo.lat_deg(), -2.0, 1e-6);
    }

    #[test]
    fn move_y_lifts_along_gizmo_up() {
        let p0 = wgs84_point(10.0, 20.0, 100.0);
        let (globe, up) = side_view(p0);
        let input = screen_drag(&globe, p0, p0 + up * 50.0);

        let moved = position(run(GizmoOp::MoveY, &globe, &input, &anchor_at(p0), up));
        assert_close((moved - p0).dot(up), 50.0, 1e-6);
        assert_close((moved - p0 - up * 50.0).length(), 0.0, 1e-6);
    }

    fn ring_drag(globe: &StaticGlobe, anchor: Vec3, local_axis: Vec3, delta_deg: f64) -> DragInput {
        let to_world = globe.frame_rotation_at(anchor).conjugate();
        let normal = to_world.rotate(local_axis);
        let in_plane = to_world.rotate(if local_axis == Vec3::UNIT_X {
            Vec3::UNIT_Z
        } else {
            Vec3::UNIT_X
        });
        let start = anchor + in_plane * 100.0;
        let end = anchor
            + Quat::from_axis_angle(normal, delta_deg.to_radians()).rotate(in_plane) * 100.0;
        let eye = anchor + normal * 400.0 + in_plane * 30.0;
        DragInput {
            eye,
            click_dir: start - eye,
            drag_dir: end - eye,
        }
    }

    #[test]
    fn rotation_adds_swept_angle_with_documented_signs() {
        let p0 = wgs84_point(10.0, 20.0, 100.0);
        let globe = looking_at(p0);
        let anchor = anchor_at(p0);

        let pitch = run(
            GizmoOp::RotatePitch,
            &globe,
            &ring_drag(&globe, p0, Vec3::UNIT_X, 25.0),
            &anchor,
            Vec3::ZERO,
        );
        match pitch {
            Some(PoseUpdate::Pitch(deg)) => assert_close(deg, 5.0 + 25.0, 1e-3),
            other => panic!("expected pitch, got {other:?}"),
        }

        let roll = run(
            GizmoOp::RotateRoll,
            &globe,
            &ring_drag(&globe, p0, Vec3::UNIT_Z, -40.0),
            &anchor,
            Vec3::ZERO,
        );
        match roll {
            Some(PoseUpdate::Roll(deg)) => assert_close(deg, -10.0 - 40.0, 1e-3),
            other => panic!("expected roll, got {other:?}"),
        }

        // Yaw uses the opposite cross product order.
        let yaw = run(
            GizmoOp::RotateYaw,
            &globe,
            &ring_drag(&globe, p0, Vec3::UNIT_Y, 25.0),
            &anchor,
            Vec3::ZERO,
        );
        match yaw {
            Some(PoseUpdate::Yaw(deg)) => assert_close(deg, 30.0 - 25.0, 1e-3),
            other => panic!("expected yaw, got {other:?}"),
        }
    }

    #[test]
    fn misses_produce_no_update() {
        let p0 = wgs84_point(10.0, 20.0, 100.0);
        let globe = looking_at(p0);
        let away = DragInput {
            eye: globe.eye(),
            click_dir: p0 - globe.eye(),
            drag_dir: globe.eye(),
        };
        let anchor = anchor_at(p0);
        for op in [
            GizmoOp::MoveX,
            GizmoOp::MoveZ,
            GizmoOp::MoveXz,
            GizmoOp::RotatePitch,
            GizmoOp::RotateYaw,
            GizmoOp::RotateRoll,
        ] {
            assert_eq!(run(op, &globe, &away, &anchor, Vec3::ZERO), None, "{op}");
        }
        // Degenerate up axis.
        assert_eq!(run(GizmoOp::MoveY, &globe, &away, &anchor, Vec3::ZERO), None);
    }

    /// Side view of the anchor: the lift plane faces the camera.
    fn side_view(p0: Vec3) -> (StaticGlobe, Vec3) {
        let up = Ellipsoid::WGS84.surface_normal(p0);
        let (east, _, _) = foundation::math::enu_basis(Ellipsoid::WGS84.cartesian_to_geodetic(p0));
        let camera = PerspectiveCamera::look_at(p0 + east * 1_000.0, p0, up).with_viewport(800.0, 600.0);
        (StaticGlobe::new(camera, Ellipsoid::WGS84), up)
    }

    #[test]
    fn move_y_misses_when_either_ray_leaves_the_plane() {
        let p0 = wgs84_point(10.0, 20.0, 100.0);
        let (globe, up) = side_view(p0);
        let anchor = anchor_at(p0);
        let eye = globe.eye();
        let toward = p0 + up * 20.0 - eye;
        let away = eye - p0;

        let drag_away = DragInput {
            eye,
            click_dir: toward,
            drag_dir: away,
        };
        let click_away = DragInput {
            eye,
            click_dir: away,
            drag_dir: toward,
        };
        assert_eq!(run(GizmoOp::MoveY, &globe, &drag_away, &anchor, up), None);
        assert_eq!(run(GizmoOp::MoveY, &globe, &click_away, &anchor, up), None);

        let hit = DragInput {
            eye,
            click_dir: p0 - eye,
            drag_dir: toward,
        };
        assert!(run(GizmoOp::MoveY, &globe, &hit, &anchor, up).is_some());
    }

    #[test]
    fn tiny_sphere_drag_still_moves() {
        let sphere = Ellipsoid::sphere(6_371_000.0);
        let p0 = sphere.geodetic_to_cartesian(Geodetic::from_lon_lat_deg(10.0, 0.0, 0.0));
        let p1 = sphere.geodetic_to_cartesian(Geodetic::from_lon_lat_deg(10.05, 0.0, 0.0));
        let camera = PerspectiveCamera::look_at(p0 * 3.0, p0, Vec3::UNIT_Z)
            .with_viewport(1024.0, 768.0);
        let globe = StaticGlobe::new(camera, sphere);
        let input = screen_drag(&globe, p0, p1);

        let moved = position(run(GizmoOp::MoveXz, &globe, &input, &anchor_at(p0), Vec3::ZERO));
        let geo = globe.cartesian_to_geodetic(moved);
        assert_close(geo.lon_deg(), 10.05, 1e-7);
        assert_close(geo.lat_deg(), 0.0, 1e-7);

        let moved = position(run(GizmoOp::MoveX, &globe, &input, &anchor_at(p0), Vec3::ZERO));
        assert_close(globe.cartesian_to_geodetic(moved).lon_deg(), 10.05, 1e-7);
    }

    #[test]
    fn unimplemented_ops_are_no_ops() {
        let p0 = wgs84_point(0.0, 0.0, 0.0);
        let globe = looking_at(p0);
        let input = DragInput::from_screen(&globe, Vec2::new(500.0, 380.0), Vec2::new(520.0, 390.0));
        for op in [
            GizmoOp::MoveXy,
            GizmoOp::MoveZy,
            GizmoOp::Scale,
            GizmoOp::ScaleX,
            GizmoOp::ScaleY,
            GizmoOp::ScaleZ,
        ] {
            assert_eq!(run(op, &globe, &input, &anchor_at(p0), Vec3::UNIT_Z), None, "{op}");
        }
    }

    #[test]
    fn sign_keeps_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-3.0), -1.0);
        assert_eq!(sign(1e-30), 1.0);
    }
}
