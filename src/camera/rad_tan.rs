//! Implements the Radial-Tangential (RadTan) distortion shared by the
//! SIMPLE_RADIAL, RADIAL, OPENCV and FULL_OPENCV models, and by the second
//! stage of THIN_PRISM_FISHEYE.
//!
//! All of these models are special cases of one polynomial map acting on a
//! normalized point `(x, y)` with `r² = x² + y²`:
//!
//! ```text
//! radial = (1 + k1·r² + k2·r⁴ + k3·r⁶ + k4·r⁸) / (1 + d1·r² + d2·r⁴ + d3·r⁶)
//! x_d    = x·radial + 2·p1·x·y + p2·(r² + 2·x²) + s1·r²
//! y_d    = y·radial + p1·(r² + 2·y²) + 2·p2·x·y + s2·r²
//! ```
//!
//! Coefficients a model does not own are zero.

use nalgebra::{Matrix2, Vector2};

/// Coefficients of the radial-tangential distortion polynomial.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RadTanDistortion {
    /// Numerator coefficients on `r², r⁴, r⁶, r⁸`.
    pub radial: [f64; 4],
    /// Denominator coefficients on `r², r⁴, r⁶` (rational model).
    pub rational: [f64; 3],
    /// Tangential coefficients `p1, p2`.
    pub tangential: [f64; 2],
    /// Thin-prism coefficients `s1, s2`.
    pub prism: [f64; 2],
}

impl RadTanDistortion {
    /// SIMPLE_RADIAL: one radial coefficient.
    pub fn simple_radial(k: f64) -> Self {
        Self {
            radial: [k, 0.0, 0.0, 0.0],
            ..Self::default()
        }
    }

    /// RADIAL: two radial coefficients.
    pub fn radial(k1: f64, k2: f64) -> Self {
        Self {
            radial: [k1, k2, 0.0, 0.0],
            ..Self::default()
        }
    }

    /// OPENCV: `[k1, k2, p1, p2]`.
    pub fn opencv(k: &[f64; 4]) -> Self {
        Self {
            radial: [k[0], k[1], 0.0, 0.0],
            tangential: [k[2], k[3]],
            ..Self::default()
        }
    }

    /// FULL_OPENCV: `[k1, k2, p1, p2, k3, k4, k5, k6]`, with `k4..k6` in the denominator.
    pub fn full_opencv(k: &[f64; 8]) -> Self {
        Self {
            radial: [k[0], k[1], k[4], 0.0],
            rational: [k[5], k[6], k[7]],
            tangential: [k[2], k[3]],
            ..Self::default()
        }
    }

    /// Second stage of THIN_PRISM_FISHEYE: `[k1, k2, p1, p2, k3, k4, sx1, sy1]`.
    pub fn thin_prism(k: &[f64; 8]) -> Self {
        Self {
            radial: [k[0], k[1], k[4], k[5]],
            tangential: [k[2], k[3]],
            prism: [k[6], k[7]],
            ..Self::default()
        }
    }

    /// Applies the distortion to a normalized point.
    pub fn distort(&self, point: &Vector2<f64>) -> Vector2<f64> {
        self.distort_with_jac(point).0
    }

    /// Applies the distortion and returns `∂(x_d, y_d)/∂(x, y)` alongside it.
    pub fn distort_with_jac(&self, point: &Vector2<f64>) -> (Vector2<f64>, Matrix2<f64>) {
        let [k1, k2, k3, k4] = self.radial;
        let [d1, d2, d3] = self.rational;
        let [p1, p2] = self.tangential;
        let [s1, s2] = self.prism;

        let x = point.x;
        let y = point.y;
        let xy = x * y;
        let r2 = x * x + y * y;
        let r4 = r2 * r2;
        let r6 = r4 * r2;
        let r8 = r4 * r4;

        let numerator = 1.0 + k1 * r2 + k2 * r4 + k3 * r6 + k4 * r8;
        let denominator = 1.0 + d1 * r2 + d2 * r4 + d3 * r6;
        let radial = numerator / denominator;

        // Derivative of the radial factor with respect to r², quotient rule.
        let d_numerator = k1 + 2.0 * k2 * r2 + 3.0 * k3 * r4 + 4.0 * k4 * r6;
        let d_denominator = d1 + 2.0 * d2 * r2 + 3.0 * d3 * r4;
        let d_radial = (d_numerator * denominator - numerator * d_denominator)
            / (denominator * denominator);

        let x_distorted = x * radial + 2.0 * p1 * xy + p2 * (r2 + 2.0 * x * x) + s1 * r2;
        let y_distorted = y * radial + p1 * (r2 + 2.0 * y * y) + 2.0 * p2 * xy + s2 * r2;

        // d(r²)/dx = 2x, d(r²)/dy = 2y
        let j00 = radial + 2.0 * x * x * d_radial + 2.0 * p1 * y + 6.0 * p2 * x + 2.0 * s1 * x;
        let j01 = 2.0 * xy * d_radial + 2.0 * p1 * x + 2.0 * p2 * y + 2.0 * s1 * y;
        let j10 = 2.0 * xy * d_radial + 2.0 * p1 * x + 2.0 * p2 * y + 2.0 * s2 * x;
        let j11 = radial + 2.0 * y * y * d_radial + 6.0 * p1 * y + 2.0 * p2 * x + 2.0 * s2 * y;

        (
            Vector2::new(x_distorted, y_distorted),
            Matrix2::new(j00, j01, j10, j11),
        )
    }
}
