//! Field-of-View (FOV) distortion.
//!
//! # Mathematical Model
//!
//! ```text
//! r      = |p|
//! factor = atan(2·r·tan(ω/2)) / (r·ω)
//! p_d    = factor·p
//! ```
//!
//! The distorted radius `r_d = atan(2·r·tan(ω/2)) / ω` inverts in closed form:
//!
//! ```text
//! r = tan(r_d·ω) / (2·tan(ω/2))
//! ```
//!
//! which is valid while `r_d·|ω| < π/2`. Distorted radii at or past that bound
//! are never produced by [`FovDistortion::distort`]; unprojecting them falls
//! back to the Newton solve, which reports non-convergence. Both `r → 0` and
//! `ω → 0` are removable singularities and use their Taylor expansions.

use crate::camera::undistort::{self, Unprojection};
use nalgebra::{Matrix2, Vector2};
use std::f64::consts::FRAC_PI_2;

/// Below this `|ω|` the model is treated through its `ω → 0` expansion.
const OMEGA_EPS: f64 = 1e-6;
/// Below this `r²` the factor is evaluated through its `r → 0` expansion.
const RADIUS2_EPS: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FovDistortion {
    pub omega: f64,
}

impl FovDistortion {
    pub fn new(omega: f64) -> Self {
        Self { omega }
    }

    /// Returns `factor(r)` and `factor'(r)/r` for a squared radius.
    fn factor(&self, r2: f64) -> (f64, f64) {
        let w = self.omega;
        let w2 = w * w;
        if w.abs() < OMEGA_EPS {
            return (1.0 + w2 / 12.0 - w2 * r2 / 3.0, -2.0 * w2 / 3.0);
        }

        let tan_half = (0.5 * w).tan();
        let gain = 2.0 * tan_half / w;
        if r2 < RADIUS2_EPS {
            let t2 = tan_half * tan_half;
            return (
                gain * (1.0 - 4.0 * t2 * r2 / 3.0),
                -gain * 8.0 * t2 / 3.0,
            );
        }

        let r = r2.sqrt();
        let z = 2.0 * r * tan_half;
        let factor = z.atan() / (r * w);
        let datan_dr = 2.0 * tan_half / (1.0 + z * z);
        let dfactor_dr = (datan_dr / w - factor) / r;
        (factor, dfactor_dr / r)
    }

    pub fn distort(&self, point: &Vector2<f64>) -> Vector2<f64> {
        point * self.factor(point.norm_squared()).0
    }

    pub fn distort_with_jac(&self, point: &Vector2<f64>) -> (Vector2<f64>, Matrix2<f64>) {
        let (factor, dfactor_over_r) = self.factor(point.norm_squared());
        let jacobian =
            Matrix2::identity() * factor + (point * point.transpose()) * dfactor_over_r;
        (point * factor, jacobian)
    }

    /// Inverse of [`FovDistortion::distort`], closed form inside the model's
    /// domain.
    pub fn undistort(&self, distorted: &Vector2<f64>) -> Unprojection {
        let w = self.omega;
        if w.abs() < OMEGA_EPS {
            let (factor, _) = self.factor(distorted.norm_squared());
            return Unprojection::exact(distorted / factor);
        }

        let rd2 = distorted.norm_squared();
        if rd2.sqrt() * w.abs() >= FRAC_PI_2 {
            return undistort::solve(distorted, |p| self.distort_with_jac(p));
        }

        let tan_half = (0.5 * w).tan();
        let scale = if rd2 < RADIUS2_EPS {
            // tan(rd·ω)/(2·rd·tan(ω/2)) to second order in rd
            w / (2.0 * tan_half) * (1.0 + rd2 * w * w / 3.0)
        } else {
            let rd = rd2.sqrt();
            (rd * w).tan() / (2.0 * tan_half * rd)
        };
        Unprojection::exact(distorted * scale)
    }
}
