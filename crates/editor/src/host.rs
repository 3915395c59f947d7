//! Camera/planet collaborator consumed by the editor.

use foundation::math::{Ellipsoid, Geodetic, Quat, Vec2, Vec3, north_frame_rotation};
use scene::camera::PerspectiveCamera;

/// Everything the editor needs from the hosting globe view.
pub trait GlobeHost {
    /// Current camera eye position (world space).
    fn eye(&self) -> Vec3;

    /// Camera ray direction for a screen coordinate.
    fn unproject(&self, screen: Vec2) -> Vec3;

    /// Camera right vector (world space).
    fn camera_right(&self) -> Vec3;

    /// North-aligned frame at a world point, mapping world directions into
    /// the local frame (x = east, y = up, z = south).
    fn frame_rotation_at(&self, position: Vec3) -> Quat;

    fn cartesian_to_geodetic(&self, position: Vec3) -> Geodetic;

    fn geodetic_to_cartesian(&self, geodetic: Geodetic) -> Vec3;

    /// Hand background camera navigation back to the host, or take it away
    /// for the duration of a drag.
    fn set_navigation_active(&mut self, active: bool);
}

/// A host with a fixed camera over an ellipsoid.
///
/// Used by the replay tool and tests; a real viewer implements
/// [`GlobeHost`] over its own camera controller.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticGlobe {
    pub camera: PerspectiveCamera,
    pub ellipsoid: Ellipsoid,
    navigation_active: bool,
    navigation_toggles: u32,
}

impl StaticGlobe {
    pub fn new(camera: PerspectiveCamera, ellipsoid: Ellipsoid) -> Self {
        Self {
            camera,
            ellipsoid,
            navigation_active: true,
            navigation_toggles: 0,
        }
    }

    pub fn navigation_active(&self) -> bool {
        self.navigation_active
    }

    /// Number of times navigation changed state.
    pub fn navigation_toggles(&self) -> u32 {
        self.navigation_toggles
    }

    /// Screen position of a world point, for driving scripted drags.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        self.camera.project(world)
    }
}

impl GlobeHost for StaticGlobe {
    fn eye(&self) -> Vec3 {
        self.camera.eye
    }

    fn unproject(&self, screen: Vec2) -> Vec3 {
        self.camera.unproject(screen)
    }

    fn camera_right(&self) -> Vec3 {
        self.camera.right()
    }

    fn frame_rotation_at(&self, position: Vec3) -> Quat {
        north_frame_rotation(&self.ellipsoid, position)
    }

    fn cartesian_to_geodetic(&self, position: Vec3) -> Geodetic {
        self.ellipsoid.cartesian_to_geodetic(position)
    }

    fn geodetic_to_cartesian(&self, geodetic: Geodetic) -> Vec3 {
        self.ellipsoid.geodetic_to_cartesian(geodetic)
    }

    fn set_navigation_active(&mut self, active: bool) {
        if self.navigation_active != active {
            self.navigation_toggles += 1;
        }
        self.navigation_active = active;
    }
}
