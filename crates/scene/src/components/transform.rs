use foundation::math::{Quat, Vec3};

/// Pitch/yaw/roll in degrees.
///
/// Composition order is yaw (about +Y), then pitch (about +X), then roll
/// (about +Z): `q = yaw * pitch * roll`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Orientation {
    pub pitch_deg: f64,
    pub yaw_deg: f64,
    pub roll_deg: f64,
}

impl Orientation {
    pub fn new(pitch_deg: f64, yaw_deg: f64, roll_deg: f64) -> Self {
        Self {
            pitch_deg,
            yaw_deg,
            roll_deg,
        }
    }

    pub fn to_quat(self) -> Quat {
        let yaw = Quat::from_axis_angle(Vec3::UNIT_Y, self.yaw_deg.to_radians());
        let pitch = Quat::from_axis_angle(Vec3::UNIT_X, self.pitch_deg.to_radians());
        let roll = Quat::from_axis_angle(Vec3::UNIT_Z, self.roll_deg.to_radians());
        yaw * pitch * roll
    }

    /// Inverse of [`Orientation::to_quat`] for pitch in `[-90, 90]`.
    pub fn from_quat(q: Quat) -> Self {
        let m = q.normalize().to_mat3();
        let pitch = (-m[1][2]).clamp(-1.0, 1.0).asin();
        let yaw = m[0][2].atan2(m[2][2]);
        let roll = m[1][0].atan2(m[1][1]);
        Self::new(pitch.to_degrees(), yaw.to_degrees(), roll.to_degrees())
    }
}

/// Entity pose.
///
/// `orientation` is local to the north-aligned frame at `position`; the
/// absolute variant is relative to world axes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub orientation: Orientation,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Orientation::default(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn set_uniform_scale(&mut self, s: f64) {
        self.scale = Vec3::new(s, s, s);
    }

    /// Orientation relative to world axes.
    ///
    /// `frame` maps world directions into the local frame at `position`.
    pub fn absolute_orientation(&self, frame: Quat) -> Orientation {
        Orientation::from_quat(frame.conjugate() * self.orientation.to_quat())
    }

    pub fn set_absolute_orientation(&mut self, frame: Quat, absolute: Orientation) {
        self.orientation = Orientation::from_quat(frame * absolute.to_quat());
    }
}
