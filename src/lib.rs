//! COLMAP-style camera models
//!
//! A Rust library that converts between normalized image-plane coordinates and
//! pixel coordinates for a closed family of parametric camera models:
//! - Pinhole (SIMPLE_PINHOLE, PINHOLE)
//! - Radial-Tangential distortion (SIMPLE_RADIAL, RADIAL, OPENCV, FULL_OPENCV)
//! - Fisheye (OPENCV_FISHEYE, SIMPLE_RADIAL_FISHEYE, RADIAL_FISHEYE, THIN_PRISM_FISHEYE)
//! - Field-of-View (FOV)
//! - Equirectangular panoramas (EQUIRECTANGULAR)
//!
//! Each model provides forward projection, unprojection (closed form or a bounded
//! Newton solve) and the analytic 2x2 Jacobian of the projection, which is what
//! pose estimation and bundle adjustment consume.

pub mod camera;
pub mod geometry;

// Re-export commonly used types
pub use camera::{
    Camera, CameraConfig, CameraModelError, Intrinsics, ModelKind, ModelSelector, Resolution,
    Unprojection,
};
