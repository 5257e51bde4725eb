//! Equirectangular (panoramic) projection.
//!
//! The normalized coordinate is a pair of angular offsets in radians: `x` is
//! the longitude and `y` the latitude relative to the forward direction. The
//! two scale parameters `[sx, sy]` give the pixel extent of a full turn of
//! longitude (`2π`) and of the latitude range (`π`):
//!
//! ```text
//! u = width/2  + sx·x / (2π)
//! v = height/2 + sy·y / π
//! ```
//!
//! The forward direction lands on the image centre. `project` does not wrap:
//! `x` and `x + 2π` land exactly `sx` pixels apart, which is one image width
//! when `sx == width`. Use [`wrap_longitude`] to pick the periodic
//! representative before projecting.

use crate::camera::Resolution;
use nalgebra::{Matrix2, Vector2};
use std::f64::consts::{PI, TAU};

fn centre(resolution: &Resolution) -> Vector2<f64> {
    Vector2::new(
        0.5 * resolution.width as f64,
        0.5 * resolution.height as f64,
    )
}

/// Pixels per radian along each axis.
fn gain(params: &[f64]) -> Vector2<f64> {
    Vector2::new(params[0] / TAU, params[1] / PI)
}

pub fn project(params: &[f64], resolution: &Resolution, point: &Vector2<f64>) -> Vector2<f64> {
    centre(resolution) + gain(params).component_mul(point)
}

pub fn project_with_jac(
    params: &[f64],
    resolution: &Resolution,
    point: &Vector2<f64>,
) -> (Vector2<f64>, Matrix2<f64>) {
    let gain = gain(params);
    (
        centre(resolution) + gain.component_mul(point),
        Matrix2::from_diagonal(&gain),
    )
}

pub fn unproject(params: &[f64], resolution: &Resolution, pixel: &Vector2<f64>) -> Vector2<f64> {
    (pixel - centre(resolution)).component_div(&gain(params))
}

/// Folds a longitude offset into `[-π, π)`.
pub fn wrap_longitude(longitude: f64) -> f64 {
    (longitude + PI).rem_euclid(TAU) - PI
}
