use crate::config::RouteConfig;
use crate::geometry::vector::{scale, Vec3};

/// Converts a polar/azimuth pair in degrees plus an altitude into the
/// Earth-centred Cartesian frame.
///
/// Polar angle is shifted by 90° so that polar 0 lies on the equatorial plane,
/// and azimuth by 180°. Altitude is divided by `config.altitude_scale` and added
/// to the occluder radius.
pub fn polar_to_cartesian(polar_deg: f64, azimuth_deg: f64, altitude: f64, config: &RouteConfig) -> Vec3 {
    let polar = (polar_deg + 90.0).to_radians();
    let azimuth = (azimuth_deg + 180.0).to_radians();
    let radius = config.occluder_radius + altitude / config.altitude_scale;

    let (sin_polar, cos_polar) = polar.sin_cos();
    let (sin_azimuth, cos_azimuth) = azimuth.sin_cos();

    let direction = [sin_polar * cos_azimuth, sin_polar * sin_azimuth, cos_polar];
    scale(direction, radius)
}

/// Position of a ground endpoint: the same transform at `config.ground_altitude`.
pub fn ground_position(polar_deg: f64, azimuth_deg: f64, config: &RouteConfig) -> Vec3 {
    polar_to_cartesian(polar_deg, azimuth_deg, config.ground_altitude, config)
}
