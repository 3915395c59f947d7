//! Rays, planes and spheres.
//!
//! Intersection tests return `None` on a miss; callers treat a miss as "no
//! update this frame" rather than an error.

use super::Vec3;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    /// First intersection with `plane` in front of the origin.
    ///
    /// Misses when the ray is parallel to the plane or the plane lies behind
    /// the origin.
    pub fn hit_plane(&self, plane: &Plane) -> Option<Vec3> {
        let dir = self.dir.try_normalize()?;
        let denom = plane.normal.dot(dir);
        if denom.abs() < 1e-12 {
            return None;
        }
        let t = plane.normal.dot(plane.point - self.origin) / denom;
        if t < 0.0 || !t.is_finite() {
            return None;
        }
        Some(self.origin + dir * t)
    }

    /// Nearest intersection with `sphere` in front of the origin.
    ///
    /// From inside the sphere this is the exit point.
    pub fn hit_sphere(&self, sphere: &Sphere) -> Option<Vec3> {
        let dir = self.dir.try_normalize()?;
        let oc = self.origin - sphere.center;
        let b = oc.dot(dir);
        let c = oc.length_squared() - sphere.radius * sphere.radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        let near = -b - sq;
        let far = -b + sq;
        let t = if near >= 0.0 {
            near
        } else if far >= 0.0 {
            far
        } else {
            return None;
        };
        Some(self.origin + dir * t)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    /// Unit normal.
    pub normal: Vec3,
}

impl Plane {
    /// Plane through `point` with the given normal, `None` for a zero normal.
    pub fn new(point: Vec3, normal: Vec3) -> Option<Self> {
        Some(Self {
            point,
            normal: normal.try_normalize()?,
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f64,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn at_origin(radius: f64) -> Self {
        Self::new(Vec3::ZERO, radius)
    }
}
