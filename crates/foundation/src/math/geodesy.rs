use super::{Ecef, Vec3};

/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 semi-minor axis (meters).
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);

/// Geodetic coordinates in radians and meters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Geodetic {
    pub lat_rad: f64,
    pub lon_rad: f64,
    pub alt_m: f64,
}

impl Geodetic {
    pub fn new(lat_rad: f64, lon_rad: f64, alt_m: f64) -> Self {
        Self {
            lat_rad,
            lon_rad,
            alt_m,
        }
    }

    /// Build from longitude/latitude in degrees, the order UI fields use.
    pub fn from_lon_lat_deg(lon_deg: f64, lat_deg: f64, alt_m: f64) -> Self {
        Self::new(lat_deg.to_radians(), lon_deg.to_radians(), alt_m)
    }

    pub fn lon_deg(&self) -> f64 {
        self.lon_rad.to_degrees()
    }

    pub fn lat_deg(&self) -> f64 {
        self.lat_rad.to_degrees()
    }
}

/// Oblate ellipsoid of revolution around the Z axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ellipsoid {
    /// Equatorial radius (meters).
    pub a: f64,
    /// Polar radius (meters).
    pub b: f64,
}

impl Ellipsoid {
    pub const WGS84: Self = Self {
        a: WGS84_A,
        b: WGS84_B,
    };

    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    pub fn sphere(radius: f64) -> Self {
        Self::new(radius, radius)
    }

    /// First eccentricity squared.
    pub fn e2(&self) -> f64 {
        (self.a * self.a - self.b * self.b) / (self.a * self.a)
    }

    /// Second eccentricity squared.
    pub fn ep2(&self) -> f64 {
        (self.a * self.a - self.b * self.b) / (self.b * self.b)
    }

    pub fn geodetic_to_ecef(&self, geo: Geodetic) -> Ecef {
        let (sin_lat, cos_lat) = geo.lat_rad.sin_cos();
        let (sin_lon, cos_lon) = geo.lon_rad.sin_cos();
        let e2 = self.e2();

        let n = self.a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let x = (n + geo.alt_m) * cos_lat * cos_lon;
        let y = (n + geo.alt_m) * cos_lat * sin_lon;
        let z = (n * (1.0 - e2) + geo.alt_m) * sin_lat;

        Ecef::new(x, y, z)
    }

    /// Bowring's closed form; height is evaluated along the normal so the
    /// poles need no special case.
    pub fn ecef_to_geodetic(&self, ecef: Ecef) -> Geodetic {
        let e2 = self.e2();
        let ep2 = self.ep2();
        let p = (ecef.x * ecef.x + ecef.y * ecef.y).sqrt();
        let lon = ecef.y.atan2(ecef.x);

        let theta = (ecef.z * self.a).atan2(p * self.b);
        let (sin_theta, cos_theta) = theta.sin_cos();

        let lat = (ecef.z + ep2 * self.b * sin_theta * sin_theta * sin_theta)
            .atan2(p - e2 * self.a * cos_theta * cos_theta * cos_theta);

        let (sin_lat, cos_lat) = lat.sin_cos();
        let alt = p * cos_lat + ecef.z * sin_lat - self.a * (1.0 - e2 * sin_lat * sin_lat).sqrt();

        Geodetic::new(lat, lon, alt)
    }

    pub fn cartesian_to_geodetic(&self, position: Vec3) -> Geodetic {
        self.ecef_to_geodetic(Ecef::from(position))
    }

    pub fn geodetic_to_cartesian(&self, geo: Geodetic) -> Vec3 {
        self.geodetic_to_ecef(geo).into()
    }

    /// Outward geodetic surface normal at `geo`.
    pub fn geodetic_normal(&self, geo: Geodetic) -> Vec3 {
        let (sin_lat, cos_lat) = geo.lat_rad.sin_cos();
        let (sin_lon, cos_lon) = geo.lon_rad.sin_cos();
        Vec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
    }

    pub fn surface_normal(&self, position: Vec3) -> Vec3 {
        self.geodetic_normal(self.cartesian_to_geodetic(position))
    }
}
