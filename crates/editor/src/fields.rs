//! Numeric pose field edits, as driven by a property panel.

use scene::entity::EntityId;
use scene::world::World;
use serde::{Deserialize, Serialize};

use crate::host::GlobeHost;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseField {
    Lon,
    Lat,
    Height,
    X,
    Y,
    Z,
    Pitch,
    Yaw,
    Roll,
    AbsolutePitch,
    AbsoluteYaw,
    AbsoluteRoll,
    Scale,
    ScaleX,
    ScaleY,
    ScaleZ,
}

impl PoseField {
    pub const ALL: [PoseField; 16] = [
        PoseField::Lon,
        PoseField::Lat,
        PoseField::Height,
        PoseField::X,
        PoseField::Y,
        PoseField::Z,
        PoseField::Pitch,
        PoseField::Yaw,
        PoseField::Roll,
        PoseField::AbsolutePitch,
        PoseField::AbsoluteYaw,
        PoseField::AbsoluteRoll,
        PoseField::Scale,
        PoseField::ScaleX,
        PoseField::ScaleY,
        PoseField::ScaleZ,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PoseField::Lon => "lon",
            PoseField::Lat => "lat",
            PoseField::Height => "height",
            PoseField::X => "x",
            PoseField::Y => "y",
            PoseField::Z => "z",
            PoseField::Pitch => "pitch",
            PoseField::Yaw => "yaw",
            PoseField::Roll => "roll",
            PoseField::AbsolutePitch => "absolute_pitch",
            PoseField::AbsoluteYaw => "absolute_yaw",
            PoseField::AbsoluteRoll => "absolute_roll",
            PoseField::Scale => "scale",
            PoseField::ScaleX => "scale_x",
            PoseField::ScaleY => "scale_y",
            PoseField::ScaleZ => "scale_z",
        }
    }
}

impl std::fmt::Display for PoseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPoseField(pub String);

impl std::fmt::Display for UnknownPoseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown pose field: {}", self.0)
    }
}

impl std::error::Error for UnknownPoseField {}

impl std::str::FromStr for PoseField {
    type Err = UnknownPoseField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PoseField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownPoseField(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PoseEditError {
    /// The entity does not exist or carries no pose.
    UnknownEntity(EntityId),
    /// Non-finite values would poison the pose.
    NotFinite { field: PoseField, value: f64 },
}

impl std::fmt::Display for PoseEditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoseEditError::UnknownEntity(entity) => write!(f, "no pose for {entity}"),
            PoseEditError::NotFinite { field, value } => {
                write!(f, "{field} must be finite, got {value}")
            }
        }
    }
}

impl std::error::Error for PoseEditError {}

/// Write one numeric field of `entity`'s pose.
///
/// Longitude and latitude are degrees; `scale` sets all three axes. The
/// absolute angles are converted back into the north frame at the entity.
pub fn apply_pose_field<H: GlobeHost + ?Sized>(
    world: &mut World,
    host: &H,
    entity: EntityId,
    field: PoseField,
    value: f64,
) -> Result<(), PoseEditError> {
    if !value.is_finite() {
        return Err(PoseEditError::NotFinite { field, value });
    }
    let transform = world
        .transform_mut(entity)
        .ok_or(PoseEditError::UnknownEntity(entity))?;

    match field {
        PoseField::Lon | PoseField::Lat | PoseField::Height => {
            let mut geo = host.cartesian_to_geodetic(transform.position);
            match field {
                PoseField::Lon => geo.lon_rad = value.to_radians(),
                PoseField::Lat => geo.lat_rad = value.to_radians(),
                _ => geo.alt_m = value,
            }
            transform.position = host.geodetic_to_cartesian(geo);
        }
        PoseField::X => transform.position.x = value,
        PoseField::Y => transform.position.y = value,
        PoseField::Z => transform.position.z = value,
        PoseField::Pitch => transform.orientation.pitch_deg = value,
        PoseField::Yaw => transform.orientation.yaw_deg = value,
        PoseField::Roll => transform.orientation.roll_deg = value,
        PoseField::AbsolutePitch | PoseField::AbsoluteYaw | PoseField::AbsoluteRoll => {
            let frame = host.frame_rotation_at(transform.position);
            let mut absolute = transform.absolute_orientation(frame);
            match field {
                PoseField::AbsolutePitch => absolute.pitch_deg = value,
                PoseField::AbsoluteYaw => absolute.yaw_deg = value,
                _ => absolute.roll_deg = value,
            }
            transform.set_absolute_orientation(frame, absolute);
        }
        PoseField::Scale => transform.set_uniform_scale(value),
        PoseField::ScaleX => transform.scale.x = value,
        PoseField::ScaleY => transform.scale.y = value,
        PoseField::ScaleZ => transform.scale.z = value,
    }
    Ok(())
}

/// Put the entity on the ellipsoid surface.
///
/// There is no terrain provider, so ground level is height 0.
pub fn ground<H: GlobeHost + ?Sized>(
    world: &mut World,
    host: &H,
    entity: EntityId,
) -> Result<(), PoseEditError> {
    apply_pose_field(world, host, entity, PoseField::Height, 0.0)
}

/// Everything a property panel shows for one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoseReadout {
    pub lon: f64,
    pub lat: f64,
    pub height: f64,
    pub position: [f64; 3],
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
    pub absolute_pitch: f64,
    pub absolute_yaw: f64,
    pub absolute_roll: f64,
    pub scale: [f64; 3],
}

impl PoseReadout {
    pub fn read<H: GlobeHost + ?Sized>(
        world: &World,
        host: &H,
        entity: EntityId,
    ) -> Result<Self, PoseEditError> {
        let transform = world
            .transform(entity)
            .ok_or(PoseEditError::UnknownEntity(entity))?;
        let geo = host.cartesian_to_geodetic(transform.position);
        let absolute =
            transform.absolute_orientation(host.frame_rotation_at(transform.position));

        Ok(Self {
            lon: geo.lon_deg(),
            lat: geo.lat_deg(),
            height: geo.alt_m,
            position: transform.position.as_array(),
            pitch: transform.orientation.pitch_deg,
            yaw: transform.orientation.yaw_deg,
            roll: transform.orientation.roll_deg,
            absolute_pitch: absolute.pitch_deg,
            absolute_yaw: absolute.yaw_deg,
            absolute_roll: absolute.roll_deg,
            scale: transform.scale.as_array(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{PoseEditError, PoseField, PoseReadout, UnknownPoseField, apply_pose_field, ground};
    use crate::host::StaticGlobe;
    use foundation::handles::Handle;
    use foundation::math::{Ellipsoid, Geodetic, Vec3};
    use scene::camera::PerspectiveCamera;
    use scene::components::{Orientation, Transform};
    use scene::entity::EntityId;
    use scene::world::World;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn globe() -> StaticGlobe {
        let camera = PerspectiveCamera::look_at(Vec3::new(2.0e7, 0.0, 0.0), Vec3::ZERO, Vec3::UNIT_Z);
        StaticGlobe::new(camera, Ellipsoid::WGS84)
    }

    fn posed_world(globe: &StaticGlobe) -> (World, EntityId) {
        let mut world = World::new();
        let p0 = globe
            .ellipsoid
            .geodetic_to_cartesian(Geodetic::from_lon_lat_deg(10.0, 20.0, 100.0));
        let entity = world.spawn_with(
            Transform::translate(p0).with_orientation(Orientation::new(5.0, 40.0, -3.0)),
        );
        (world, entity)
    }

    #[test]
    fn field_names_parse() {
        for field in PoseField::ALL {
            assert_eq!(field.as_str().parse::<PoseField>(), Ok(field));
        }
        assert_eq!(
            "altitude".parse::<PoseField>(),
            Err(UnknownPoseField("altitude".to_string()))
        );
    }

    #[test]
    fn geodetic_fields_move_one_coordinate() {
        let globe = globe();
        let (mut world, entity) = posed_world(&globe);

        apply_pose_field(&mut world, &globe, entity, PoseField::Lon, 12.5).expect("lon");
        apply_pose_field(&mut world, &globe, entity, PoseField::Height, 250.0).expect("height");

        let readout = PoseReadout::read(&world, &globe, entity).expect("readout");
        assert_close(readout.lon, 12.5, 1e-9);
        assert_close(readout.lat, 20.0, 1e-7);
        assert_close(readout.height, 250.0, 1e-3);

        ground(&mut world, &globe, entity).expect("ground");
        let readout = PoseReadout::read(&world, &globe, entity).expect("readout");
        assert_close(readout.height, 0.0, 1e-3);
        assert_close(readout.lon, 12.5, 1e-9);
    }

    #[test]
    fn absolute_angles_round_trip_through_local_frame() {
        let globe = globe();
        let (mut world, entity) = posed_world(&globe);

        apply_pose_field(&mut world, &globe, entity, PoseField::AbsoluteYaw, 70.0).expect("yaw");
        let readout = PoseReadout::read(&world, &globe, entity).expect("readout");
        assert_close(readout.absolute_yaw, 70.0, 1e-9);

        let local = world.transform(entity).expect("pose").orientation;
        assert_ne!(local, Orientation::new(5.0, 40.0, -3.0));
    }

    #[test]
    fn scale_fields() {
        let globe = globe();
        let (mut world, entity) = posed_world(&globe);

        apply_pose_field(&mut world, &globe, entity, PoseField::Scale, 2.0).expect("scale");
        apply_pose_field(&mut world, &globe, entity, PoseField::ScaleY, 3.0).expect("scale_y");

        let readout = PoseReadout::read(&world, &globe, entity).expect("readout");
        assert_eq!(readout.scale, [2.0, 3.0, 2.0]);
    }

    #[test]
    fn errors_leave_world_untouched() {
        let globe = globe();
        let (mut world, entity) = posed_world(&globe);
        let before = world.transform(entity);
        let stranger = EntityId(Handle::new(42, 0));

        assert_eq!(
            apply_pose_field(&mut world, &globe, stranger, PoseField::X, 1.0),
            Err(PoseEditError::UnknownEntity(stranger))
        );
        assert!(matches!(
            apply_pose_field(&mut world, &globe, entity, PoseField::Roll, f64::NAN),
            Err(PoseEditError::NotFinite { field: PoseField::Roll, .. })
        ));
        assert_eq!(world.transform(entity), before);
    }

    #[test]
    fn readout_serializes_field_names() {
        let globe = globe();
        let (world, entity) = posed_world(&globe);
        let readout = PoseReadout::read(&world, &globe, entity).expect("readout");

        let json = serde_json::to_value(&readout).expect("serialize");
        assert_eq!(json["pitch"], 5.0);
        assert_eq!(json["yaw"], 40.0);
        assert!(json["absolute_roll"].is_number());
        assert_eq!(json["scale"], serde_json::json!([1.0, 1.0, 1.0]));
    }
}
