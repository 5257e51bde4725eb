//! Sampling and numerical helpers for exercising camera models.

use crate::camera::{Camera, Resolution};
use nalgebra::{Matrix2, Vector2};

/// Generate a grid of sample points that are evenly distributed across the image
///
/// # Arguments
///
/// * `resolution` - The image size in pixels
/// * `n` - The approximate number of points to generate
///
/// # Returns
///
/// A vector of pixel coordinates, one at the centre of each grid cell
pub fn sample_points(resolution: &Resolution, n: usize) -> Vec<Vector2<f64>> {
    let width = resolution.width as f64;
    let height = resolution.height as f64;

    // Calculate the number of cells in each dimension
    let num_cells_x = ((n as f64 * (width / height)).sqrt().round() as usize).max(1);
    let num_cells_y = ((n as f64 * (height / width)).sqrt().round() as usize).max(1);

    // Calculate the dimensions of each cell
    let cell_width = width / num_cells_x as f64;
    let cell_height = height / num_cells_y as f64;

    let mut points = Vec::with_capacity(num_cells_x * num_cells_y);
    for i in 0..num_cells_y {
        for j in 0..num_cells_x {
            let x = (j as f64 + 0.5) * cell_width;
            let y = (i as f64 + 0.5) * cell_height;
            points.push(Vector2::new(x, y));
        }
    }

    points
}

/// Central finite-difference estimate of `∂project/∂point`.
///
/// Reserved for checking the analytic Jacobians; `project_with_jac` never
/// differentiates numerically.
pub fn numerical_jacobian(camera: &Camera, point: &Vector2<f64>, step: f64) -> Matrix2<f64> {
    let mut jacobian = Matrix2::zeros();
    for i in 0..2 {
        let mut plus = *point;
        let mut minus = *point;
        plus[i] += step;
        minus[i] -= step;
        let column = (camera.project(&plus) - camera.project(&minus)) / (2.0 * step);
        jacobian.set_column(i, &column);
    }
    jacobian
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_points() {
        let resolution = Resolution {
            width: 800,
            height: 600,
        };
        let n = 100;

        let points = sample_points(&resolution, n);

        // Test that the number of points is approximately n
        // (It might not be exactly n due to rounding)
        let expected_count = (n as f64 * 0.8) as usize..=(n as f64 * 1.2) as usize;
        assert!(
            expected_count.contains(&points.len()),
            "Expected around {} points, got {}",
            n,
            points.len()
        );

        // Test that all points are within the image bounds
        for point in &points {
            assert!(
                point.x >= 0.0 && point.x < 800.0,
                "Point x-coordinate outside image bounds: {}",
                point.x
            );
            assert!(
                point.y >= 0.0 && point.y < 600.0,
                "Point y-coordinate outside image bounds: {}",
                point.y
            );
        }
    }

    #[test]
    fn test_sample_points_degenerate_request() {
        let resolution = Resolution {
            width: 1000,
            height: 10,
        };
        let points = sample_points(&resolution, 1);
        assert!(!points.is_empty());
    }

    #[test]
    fn test_numerical_jacobian_of_pinhole() {
        let camera = Camera::new("PINHOLE", &[500.0, 400.0, 320.0, 240.0], 640, 480).unwrap();
        let jacobian = numerical_jacobian(&camera, &Vector2::new(0.2, -0.1), 1e-6);
        assert!((jacobian[(0, 0)] - 500.0).abs() < 1e-5);
        assert!((jacobian[(1, 1)] - 400.0).abs() < 1e-5);
        assert!(jacobian[(0, 1)].abs() < 1e-5);
        assert!(jacobian[(1, 0)].abs() < 1e-5);
    }
}
