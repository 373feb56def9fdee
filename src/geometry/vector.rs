use log::warn;
use thiserror::Error;

/// Cartesian triple in the Earth-centred frame.
pub type Vec3 = [f64; 3];

/// Below this length a vector has no usable direction.
pub const DEGENERATE_EPSILON: f64 = 1e-15;

/// Direction returned by [`normalize_or_fallback`] for degenerate input.
pub const FALLBACK_UNIT: Vec3 = [1.0, 0.0, 0.0];

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("degenerate vector of length {length:e} cannot be normalized")]
    Degenerate { length: f64 },
}

pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn scale(v: Vec3, k: f64) -> Vec3 {
    [v[0] * k, v[1] * k, v[2] * k]
}

pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn length(v: Vec3) -> f64 {
    dot(v, v).sqrt()
}

/// Straight-line distance from `a` to `b`.
pub fn distance(a: Vec3, b: Vec3) -> f64 {
    length(sub(b, a))
}

/// Unit vector along `v`, or [`GeometryError::Degenerate`] when `v` is too short
/// to carry a direction.
pub fn normalize(v: Vec3) -> Result<Vec3, GeometryError> {
    let len = length(v);
    if len < DEGENERATE_EPSILON {
        return Err(GeometryError::Degenerate { length: len });
    }
    Ok([v[0] / len, v[1] / len, v[2] / len])
}

/// Like [`normalize`], but substitutes [`FALLBACK_UNIT`] for degenerate input.
///
/// The fallback has no geometric meaning; callers that care about direction
/// should match on [`normalize`] instead.
pub fn normalize_or_fallback(v: Vec3) -> Vec3 {
    match normalize(v) {
        Ok(unit) => unit,
        Err(err) => {
            warn!("{}; using fallback direction {:?}", err, FALLBACK_UNIT);
            FALLBACK_UNIT
        }
    }
}
