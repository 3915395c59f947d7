use super::{Ellipsoid, Geodetic, Quat, Vec3};

/// Unit east, north and up directions at `origin`.
pub fn enu_basis(origin: Geodetic) -> (Vec3, Vec3, Vec3) {
    let (sin_lat, cos_lat) = origin.lat_rad.sin_cos();
    let (sin_lon, cos_lon) = origin.lon_rad.sin_cos();

    let east = Vec3::new(-sin_lon, cos_lon, 0.0);
    let north = Vec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
    let up = Vec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);
    (east, north, up)
}

/// North-aligned frame rotation at `position`, mapping world directions into
/// the local frame.
///
/// Local axes: x = east, y = up (geodetic normal), z = south. The conjugate
/// maps local axes back to world directions.
pub fn north_frame_rotation(ellipsoid: &Ellipsoid, position: Vec3) -> Quat {
    let (east, _north, up) = enu_basis(ellipsoid.cartesian_to_geodetic(position));
    let south = east.cross(up);
    Quat::from_basis(east, up, south).conjugate()
}
