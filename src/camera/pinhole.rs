//! Implements the pinhole (affine intrinsic) stage shared by every
//! pinhole-family model.
//!
//! After distortion, a normalized point `(x_d, y_d)` is mapped to pixels with
//! `u = fx·x_d + cx` and `v = fy·y_d + cy`. Single-focal models store one `f`
//! and use it for both axes. SIMPLE_PINHOLE and PINHOLE are this stage alone.

use crate::camera::{Intrinsics, ModelKind, Resolution};
use nalgebra::{Matrix2, Vector2};

impl Intrinsics {
    /// Reads the intrinsic block out of a model's parameter vector.
    ///
    /// For [`ModelKind::Equirectangular`] the focal pair reports the two scale
    /// parameters and the principal point is the image centre.
    ///
    /// The caller guarantees `params.len() == model.arity()`.
    pub fn from_params(model: ModelKind, params: &[f64], resolution: &Resolution) -> Self {
        match model {
            ModelKind::Equirectangular => Intrinsics {
                fx: params[0],
                fy: params[1],
                cx: 0.5 * resolution.width as f64,
                cy: 0.5 * resolution.height as f64,
            },
            _ if model.has_single_focal() => Intrinsics {
                fx: params[0],
                fy: params[0],
                cx: params[1],
                cy: params[2],
            },
            _ => Intrinsics {
                fx: params[0],
                fy: params[1],
                cx: params[2],
                cy: params[3],
            },
        }
    }

    /// Maps a distorted normalized point to pixel coordinates.
    pub fn to_pixel(&self, normalized: &Vector2<f64>) -> Vector2<f64> {
        Vector2::new(
            self.fx * normalized.x + self.cx,
            self.fy * normalized.y + self.cy,
        )
    }

    /// Maps a pixel back to a distorted normalized point.
    pub fn to_normalized(&self, pixel: &Vector2<f64>) -> Vector2<f64> {
        Vector2::new((pixel.x - self.cx) / self.fx, (pixel.y - self.cy) / self.fy)
    }

    /// Chains `∂(u, v)/∂(x_d, y_d) = diag(fx, fy)` onto a distortion Jacobian.
    pub fn chain_jacobian(&self, jacobian: &Matrix2<f64>) -> Matrix2<f64> {
        Matrix2::from_diagonal(&Vector2::new(self.fx, self.fy)) * jacobian
    }
}

/// Contains unit tests for the pinhole stage.
#[cfg(test)]
mod tests {
    use super::*;

    const RESOLUTION: Resolution = Resolution {
        width: 640,
        height: 480,
    };

    #[test]
    fn test_pinhole_project_unproject() {
        let intrinsics =
            Intrinsics::from_params(ModelKind::Pinhole, &[500.0, 510.0, 320.0, 240.0], &RESOLUTION);

        // Expected: u = 500 * 0.1 + 320 = 370, v = 510 * 0.2 + 240 = 342
        let pixel = intrinsics.to_pixel(&Vector2::new(0.1, 0.2));
        assert!((pixel.x - 370.0).abs() < 1e-12);
        assert!((pixel.y - 342.0).abs() < 1e-12);

        let normalized = intrinsics.to_normalized(&pixel);
        assert!((normalized.x - 0.1).abs() < 1e-15);
        assert!((normalized.y - 0.2).abs() < 1e-15);
    }

    #[test]
    fn test_single_focal_layout() {
        let intrinsics = Intrinsics::from_params(
            ModelKind::SimpleRadial,
            &[450.0, 300.0, 200.0, -0.1],
            &RESOLUTION,
        );
        assert_eq!(
            intrinsics,
            Intrinsics {
                fx: 450.0,
                fy: 450.0,
                cx: 300.0,
                cy: 200.0
            }
        );
    }

    #[test]
    fn test_equirectangular_layout() {
        let intrinsics =
            Intrinsics::from_params(ModelKind::Equirectangular, &[1920.0, 960.0], &RESOLUTION);
        assert_eq!(intrinsics.fx, 1920.0);
        assert_eq!(intrinsics.fy, 960.0);
        assert_eq!(intrinsics.cx, 320.0);
        assert_eq!(intrinsics.cy, 240.0);
    }

    #[test]
    fn test_chain_jacobian_scales_rows() {
        let intrinsics = Intrinsics {
            fx: 2.0,
            fy: 3.0,
            cx: 0.0,
            cy: 0.0,
        };
        let chained = intrinsics.chain_jacobian(&Matrix2::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(chained, Matrix2::new(2.0, 4.0, 9.0, 12.0));
    }
}
