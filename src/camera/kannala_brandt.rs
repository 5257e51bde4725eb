//! Implements the Kannala-Brandt (equidistant fisheye) distortion used by
//! OPENCV_FISHEYE, SIMPLE_RADIAL_FISHEYE, RADIAL_FISHEYE and the first stage of
//! THIN_PRISM_FISHEYE.
//!
//! A normalized point `p` at radius `r = |p|` is seen under the angle
//! `θ = atan(r)` from the optical axis. The lens maps that angle to
//!
//! ```text
//! θ_d = θ·(1 + k1·θ² + k2·θ⁴ + k3·θ⁶ + k4·θ⁸)
//! p_d = (θ_d / r)·p
//! ```
//!
//! On the optical axis the map is the identity.

use nalgebra::{Matrix2, Vector2};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KannalaBrandtDistortion {
    pub coefficients: [f64; 4], // k1, k2, k3, k4
}

impl KannalaBrandtDistortion {
    pub fn new(coefficients: [f64; 4]) -> Self {
        Self { coefficients }
    }

    /// The pure equidistant remap `p_d = (atan(r)/r)·p`.
    pub fn equidistant() -> Self {
        Self::default()
    }

    /// Applies the fisheye remap to a normalized point.
    pub fn distort(&self, point: &Vector2<f64>) -> Vector2<f64> {
        self.distort_with_jac(point).0
    }

    /// Applies the fisheye remap and returns `∂p_d/∂p` alongside it.
    ///
    /// The map is radial, `p_d = g(r)·p`, so its Jacobian is
    /// `g·I + (g'(r)/r)·p·pᵀ`.
    pub fn distort_with_jac(&self, point: &Vector2<f64>) -> (Vector2<f64>, Matrix2<f64>) {
        let r2 = point.norm_squared();
        let r = r2.sqrt();
        if r < f64::EPSILON {
            return (*point, Matrix2::identity());
        }

        let [k1, k2, k3, k4] = self.coefficients;
        let theta = r.atan();
        let theta2 = theta * theta;
        let theta4 = theta2 * theta2;
        let theta6 = theta4 * theta2;
        let theta8 = theta4 * theta4;

        let theta_d = theta * (1.0 + k1 * theta2 + k2 * theta4 + k3 * theta6 + k4 * theta8);
        let dtheta_d_dtheta =
            1.0 + 3.0 * k1 * theta2 + 5.0 * k2 * theta4 + 7.0 * k3 * theta6 + 9.0 * k4 * theta8;
        let dtheta_dr = 1.0 / (1.0 + r2);

        let scale = theta_d / r;
        let dscale_dr = (dtheta_d_dtheta * dtheta_dr - scale) / r;

        let jacobian = Matrix2::identity() * scale + (point * point.transpose()) * (dscale_dr / r);
        (point * scale, jacobian)
    }
}
