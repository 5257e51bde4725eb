//! Iterative inversion of distortion maps without a closed-form inverse.
//!
//! Newton's method on the residual `distort(p) - target`, starting from the
//! distorted point itself and linearized with the analytic distortion
//! Jacobian. The loop is bounded by [`MAX_ITERATIONS`]. It converges when the
//! residual drops below [`TOLERANCE`], or when the Newton step falls below the
//! resolution of `f64` at the current magnitude; otherwise the last finite
//! iterate is returned with `converged == false`. The reported residual is
//! always measured at the returned point.

use log::trace;
use nalgebra::{Matrix2, Vector2};

/// Residual norm, in normalized image units, below which the solve has converged.
pub const TOLERANCE: f64 = 1e-12;

/// Hard cap on Newton iterations per call.
pub const MAX_ITERATIONS: usize = 100;

/// Result of an unprojection together with its convergence report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unprojection {
    /// The recovered normalized coordinate (best effort when not converged).
    pub point: Vector2<f64>,
    /// Whether the residual reached [`TOLERANCE`] (always `true` for closed-form inverses).
    pub converged: bool,
    /// Newton steps taken; `0` for closed-form inverses.
    pub iterations: usize,
    /// Norm of `distort(point) - target` in normalized units, evaluated at
    /// the returned `point`.
    pub residual: f64,
}

impl Unprojection {
    /// Wraps the result of a closed-form inverse.
    pub fn exact(point: Vector2<f64>) -> Self {
        Unprojection {
            point,
            converged: true,
            iterations: 0,
            residual: 0.0,
        }
    }
}

/// Solves `distort(p) == target` for `p`.
///
/// `distort` returns the distorted point together with `∂distort/∂p`. When a
/// step lands where `distort` is no longer finite (a pole of a rational
/// model, or overflow), the previous iterate is returned instead.
pub fn solve<F>(target: &Vector2<f64>, distort: F) -> Unprojection
where
    F: Fn(&Vector2<f64>) -> (Vector2<f64>, Matrix2<f64>),
{
    let mut point = *target;
    let mut iterations = 0;
    let mut previous: Option<(Vector2<f64>, f64)> = None;

    loop {
        let (estimate, jacobian) = distort(&point);
        let error = estimate - target;
        let residual = error.norm();

        if !residual.is_finite() {
            if let Some((last_point, last_residual)) = previous {
                trace!(
                    "Undistortion of {:?} left the finite domain after {} iterations",
                    target.as_slice(),
                    iterations
                );
                return Unprojection {
                    point: last_point,
                    converged: false,
                    iterations: iterations - 1,
                    residual: last_residual,
                };
            }
        }

        if residual < TOLERANCE {
            return Unprojection {
                point,
                converged: true,
                iterations,
                residual,
            };
        }

        let not_converged = |point: Vector2<f64>, iterations: usize, reason: &str| {
            trace!(
                "Undistortion of {:?} stopped after {} iterations ({}), residual {:e}",
                target.as_slice(),
                iterations,
                reason,
                residual
            );
            Unprojection {
                point,
                converged: false,
                iterations,
                residual,
            }
        };

        if iterations == MAX_ITERATIONS {
            return not_converged(point, iterations, "iteration cap");
        }

        let Some(inverse) = jacobian.try_inverse() else {
            return not_converged(point, iterations, "singular Jacobian");
        };

        let delta = inverse * error;
        if !delta.iter().all(|v| v.is_finite()) {
            return not_converged(point, iterations, "non-finite step");
        }

        previous = Some((point, residual));
        point -= delta;
        iterations += 1;

        // The step is below what f64 can still resolve at this magnitude.
        if delta.norm() <= f64::EPSILON * (1.0 + point.norm()) {
            let residual = (distort(&point).0 - target).norm();
            if residual.is_finite() {
                return Unprojection {
                    point,
                    converged: true,
                    iterations,
                    residual,
                };
            }
        }
    }
}
