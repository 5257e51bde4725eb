//! Camera models.
//!
//! A [`Camera`] is an immutable value holding a model kind, its parameter
//! vector and the image size. It converts between normalized image-plane
//! coordinates and pixel coordinates with [`Camera::project`],
//! [`Camera::unproject`] and [`Camera::project_with_jac`], dispatching on the
//! closed [`ModelKind`] registry.
//!
//! Pinhole-family models are evaluated as a distortion map on the normalized
//! plane followed by the affine intrinsic map ([`Intrinsics`]):
//!
//! | model family                                  | distortion stage                    |
//! |-----------------------------------------------|-------------------------------------|
//! | SIMPLE_PINHOLE, PINHOLE                       | identity                            |
//! | SIMPLE_RADIAL, RADIAL, OPENCV, FULL_OPENCV    | [`RadTanDistortion`]                |
//! | OPENCV_FISHEYE, SIMPLE_RADIAL_FISHEYE, RADIAL_FISHEYE | [`KannalaBrandtDistortion`] |
//! | THIN_PRISM_FISHEYE                            | equidistant remap, then thin prism  |
//! | FOV                                           | [`FovDistortion`]                   |
//!
//! EQUIRECTANGULAR is a direct angular map, see [`equirectangular`].

use log::{debug, warn};
use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod equirectangular;
pub mod fov;
pub mod kannala_brandt;
pub mod model;
pub mod pinhole;
pub mod rad_tan;
pub mod undistort;

pub use equirectangular::wrap_longitude;
pub use fov::FovDistortion;
pub use kannala_brandt::KannalaBrandtDistortion;
pub use model::{ModelKind, ModelSelector};
pub use rad_tan::RadTanDistortion;
pub use undistort::Unprojection;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intrinsics {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CameraModelError {
    #[error("Unknown camera model: {0}")]
    UnknownModel(String),
    #[error("Unknown camera model id: {0}")]
    UnknownModelId(i32),
    #[error("{model} expects {expected} parameters, got {actual}")]
    ParameterCount {
        model: ModelKind,
        expected: usize,
        actual: usize,
    },
    #[error("Image dimensions must be positive, got {width}x{height}")]
    InvalidDimension { width: i64, height: i64 },
    #[error("Focal length must be positive")]
    FocalLengthMustBePositive,
    #[error("Invalid camera parameters: {0}")]
    InvalidParams(String),
    #[error("Failed to parse YAML: {0}")]
    YamlError(String),
}

impl From<serde_yaml::Error> for CameraModelError {
    fn from(err: serde_yaml::Error) -> Self {
        CameraModelError::YamlError(err.to_string())
    }
}

/// Common validation functions for camera construction
pub mod validation {
    use super::*;

    /// Checks the parameter count, finiteness and focal lengths of a parameter vector.
    pub fn validate_params(model: ModelKind, params: &[f64]) -> Result<(), CameraModelError> {
        if params.len() != model.arity() {
            return Err(CameraModelError::ParameterCount {
                model,
                expected: model.arity(),
                actual: params.len(),
            });
        }
        if let Some((name, value)) = model
            .param_names()
            .iter()
            .zip(params)
            .find(|(_, value)| !value.is_finite())
        {
            return Err(CameraModelError::InvalidParams(format!(
                "{} = {} is not finite",
                name, value
            )));
        }
        let focal_count = if model.has_single_focal() { 1 } else { 2 };
        if params[..focal_count].iter().any(|f| *f <= 0.0) {
            return Err(CameraModelError::FocalLengthMustBePositive);
        }
        Ok(())
    }

    /// Converts signed image dimensions into a [`Resolution`].
    pub fn validate_resolution(width: i64, height: i64) -> Result<Resolution, CameraModelError> {
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok(Resolution {
                width: w,
                height: h,
            }),
            _ => Err(CameraModelError::InvalidDimension { width, height }),
        }
    }
}

/// A parametric camera: model kind, parameter vector and image size.
///
/// Cameras are immutable once built. Every operation is a pure function of the
/// stored parameters and its input, so a `Camera` can be shared across threads
/// and queried concurrently without synchronization. Producing different
/// parameters means building a new camera ([`Camera::with_params`],
/// [`Camera::rescale`]).
///
/// # Examples
///
/// ```rust
/// use colmap_cameras::Camera;
/// use nalgebra::Vector2;
///
/// let camera = Camera::new("OPENCV", &[500.0, 500.0, 320.0, 240.0, -0.1, 0.01, 0.0, 0.0], 640, 480)
///     .unwrap();
/// let pixel = camera.project(&Vector2::new(0.1, -0.05));
/// let normalized = camera.unproject(&pixel);
/// assert!((normalized - Vector2::new(0.1, -0.05)).norm() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CameraConfig", into = "CameraConfig")]
pub struct Camera {
    model: ModelKind,
    params: Vec<f64>,
    resolution: Resolution,
}

impl Camera {
    /// Builds a camera from a model name or id, its parameters and the image size.
    ///
    /// # Errors
    ///
    /// * [`CameraModelError::UnknownModel`] / [`CameraModelError::UnknownModelId`]
    ///   if the model is not in the registry.
    /// * [`CameraModelError::ParameterCount`] if `params.len()` differs from the model's arity.
    /// * [`CameraModelError::InvalidDimension`] if `width` or `height` is not positive.
    /// * [`CameraModelError::InvalidParams`] if a parameter is not finite.
    /// * [`CameraModelError::FocalLengthMustBePositive`] for a non-positive focal length or scale.
    pub fn new<S: ModelSelector>(
        model: S,
        params: &[f64],
        width: i64,
        height: i64,
    ) -> Result<Self, CameraModelError> {
        let model = model.resolve().inspect_err(|err| {
            warn!("Rejected camera: {}", err);
        })?;
        Self::build(model, params.to_vec(), width, height)
    }

    fn build(
        model: ModelKind,
        params: Vec<f64>,
        width: i64,
        height: i64,
    ) -> Result<Self, CameraModelError> {
        let checked = validation::validate_params(model, &params)
            .and_then(|_| validation::validate_resolution(width, height));
        let resolution = match checked {
            Ok(resolution) => resolution,
            Err(err) => {
                warn!("Rejected {} camera: {}", model, err);
                return Err(err);
            }
        };

        let camera = Camera {
            model,
            params,
            resolution,
        };
        debug!("Created camera {}", camera);
        Ok(camera)
    }

    /// Returns a camera with the same model and size but new parameters.
    pub fn with_params(&self, params: &[f64]) -> Result<Self, CameraModelError> {
        Self::build(
            self.model,
            params.to_vec(),
            self.resolution.width.into(),
            self.resolution.height.into(),
        )
    }

    /// Returns a camera for the image resized by `scale`.
    ///
    /// Focal lengths and principal point (or the equirectangular scales) are
    /// multiplied by `scale`, distortion coefficients are kept, and the image
    /// size is rounded to the nearest pixel.
    pub fn rescale(&self, scale: f64) -> Result<Self, CameraModelError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(CameraModelError::InvalidParams(format!(
                "scale must be positive and finite, got {}",
                scale
            )));
        }

        let scaled = match self.model {
            ModelKind::Equirectangular => 2,
            model if model.has_single_focal() => 3,
            _ => 4,
        };
        let mut params = self.params.clone();
        params[..scaled].iter_mut().for_each(|p| *p *= scale);

        let width = (self.resolution.width as f64 * scale).round() as i64;
        let height = (self.resolution.height as f64 * scale).round() as i64;
        Self::build(self.model, params, width, height)
    }

    pub fn model(&self) -> ModelKind {
        self.model
    }

    pub fn model_id(&self) -> i32 {
        self.model.id()
    }

    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }

    pub fn width(&self) -> u32 {
        self.resolution.width
    }

    pub fn height(&self) -> u32 {
        self.resolution.height
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn params(&self) -> &[f64] {
        &self.params
    }

    pub fn num_params(&self) -> usize {
        self.params.len()
    }

    /// Comma-separated parameter names, e.g. `"fx, fy, cx, cy"`.
    pub fn params_info(&self) -> String {
        self.model.param_names().join(", ")
    }

    /// The intrinsic block of the parameter vector, see [`Intrinsics::from_params`].
    pub fn intrinsics(&self) -> Intrinsics {
        Intrinsics::from_params(self.model, &self.params, &self.resolution)
    }

    /// A single representative focal length.
    ///
    /// Single-focal models return `f`, models with `fx, fy` return their mean,
    /// and EQUIRECTANGULAR returns its horizontal scale `sx`.
    pub fn focal(&self) -> f64 {
        match self.model {
            ModelKind::Equirectangular => self.params[0],
            model if model.has_single_focal() => self.params[0],
            _ => 0.5 * (self.params[0] + self.params[1]),
        }
    }

    pub fn focal_x(&self) -> f64 {
        self.intrinsics().fx
    }

    pub fn focal_y(&self) -> f64 {
        self.intrinsics().fy
    }

    pub fn principal_point(&self) -> Vector2<f64> {
        let intrinsics = self.intrinsics();
        Vector2::new(intrinsics.cx, intrinsics.cy)
    }

    /// Distortion stage on the normalized plane, with its Jacobian.
    fn distort_with_jac(&self, point: &Vector2<f64>) -> (Vector2<f64>, Matrix2<f64>) {
        let k = &self.params;
        match self.model {
            ModelKind::SimplePinhole | ModelKind::Pinhole | ModelKind::Equirectangular => {
                (*point, Matrix2::identity())
            }
            ModelKind::SimpleRadial => RadTanDistortion::simple_radial(k[3]).distort_with_jac(point),
            ModelKind::Radial => RadTanDistortion::radial(k[3], k[4]).distort_with_jac(point),
            ModelKind::OpenCv => {
                RadTanDistortion::opencv(&[k[4], k[5], k[6], k[7]]).distort_with_jac(point)
            }
            ModelKind::FullOpenCv => RadTanDistortion::full_opencv(&[
                k[4], k[5], k[6], k[7], k[8], k[9], k[10], k[11],
            ])
            .distort_with_jac(point),
            ModelKind::OpenCvFisheye => {
                KannalaBrandtDistortion::new([k[4], k[5], k[6], k[7]]).distort_with_jac(point)
            }
            ModelKind::SimpleRadialFisheye => {
                KannalaBrandtDistortion::new([k[3], 0.0, 0.0, 0.0]).distort_with_jac(point)
            }
            ModelKind::RadialFisheye => {
                KannalaBrandtDistortion::new([k[3], k[4], 0.0, 0.0]).distort_with_jac(point)
            }
            ModelKind::ThinPrismFisheye => {
                let (remapped, j_remap) =
                    KannalaBrandtDistortion::equidistant().distort_with_jac(point);
                let (distorted, j_prism) = RadTanDistortion::thin_prism(&[
                    k[4], k[5], k[6], k[7], k[8], k[9], k[10], k[11],
                ])
                .distort_with_jac(&remapped);
                (distorted, j_prism * j_remap)
            }
            ModelKind::Fov => FovDistortion::new(k[4]).distort_with_jac(point),
        }
    }

    /// Maps a normalized coordinate to pixel coordinates.
    ///
    /// Total on finite input; the result may fall outside the image.
    pub fn project(&self, point: &Vector2<f64>) -> Vector2<f64> {
        match self.model {
            ModelKind::Equirectangular => {
                equirectangular::project(&self.params, &self.resolution, point)
            }
            _ => self.intrinsics().to_pixel(&self.distort_with_jac(point).0),
        }
    }

    /// Projects a point and returns `∂(u, v)/∂(x, y)` alongside the pixel.
    pub fn project_with_jac(&self, point: &Vector2<f64>) -> (Vector2<f64>, Matrix2<f64>) {
        if self.model == ModelKind::Equirectangular {
            return equirectangular::project_with_jac(&self.params, &self.resolution, point);
        }
        let intrinsics = self.intrinsics();
        let (distorted, jacobian) = self.distort_with_jac(point);
        (
            intrinsics.to_pixel(&distorted),
            intrinsics.chain_jacobian(&jacobian),
        )
    }

    /// Maps a pixel back to a normalized coordinate.
    ///
    /// For iterative models this is the best available estimate; use
    /// [`Camera::unproject_with_status`] to learn whether the solve converged.
    pub fn unproject(&self, pixel: &Vector2<f64>) -> Vector2<f64> {
        self.unproject_with_status(pixel).point
    }

    /// Unprojects a pixel and reports how the inverse was obtained.
    pub fn unproject_with_status(&self, pixel: &Vector2<f64>) -> Unprojection {
        if self.model == ModelKind::Equirectangular {
            return Unprojection::exact(equirectangular::unproject(
                &self.params,
                &self.resolution,
                pixel,
            ));
        }

        let distorted = self.intrinsics().to_normalized(pixel);
        match self.model {
            ModelKind::SimplePinhole | ModelKind::Pinhole => Unprojection::exact(distorted),
            ModelKind::Fov => FovDistortion::new(self.params[4]).undistort(&distorted),
            _ => undistort::solve(&distorted, |p| self.distort_with_jac(p)),
        }
    }

    pub fn project_points(&self, points: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
        points.iter().map(|p| self.project(p)).collect()
    }

    pub fn unproject_points(&self, pixels: &[Vector2<f64>]) -> Vec<Vector2<f64>> {
        pixels.iter().map(|p| self.unproject(p)).collect()
    }

    /// Parses a camera description such as
    ///
    /// ```yaml
    /// model: OPENCV
    /// width: 640
    /// height: 480
    /// params: [500.0, 500.0, 320.0, 240.0, -0.1, 0.01, 0.0, 0.0]
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CameraModelError> {
        let config: CameraConfig = serde_yaml::from_str(yaml)?;
        Camera::try_from(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, CameraModelError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}x{} {:?}",
            self.model, self.resolution.width, self.resolution.height, self.params
        )
    }
}

/// Model reference in a serialized camera: a name or a numeric id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelField {
    Id(i32),
    Name(String),
}

/// Serialized form of a [`Camera`]. Converting it into a camera runs the full
/// construction validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub model: ModelField,
    pub width: i64,
    pub height: i64,
    pub params: Vec<f64>,
}

impl TryFrom<CameraConfig> for Camera {
    type Error = CameraModelError;

    fn try_from(config: CameraConfig) -> Result<Self, Self::Error> {
        let model = match &config.model {
            ModelField::Id(id) => ModelKind::from_id(*id)?,
            ModelField::Name(name) => name.parse()?,
        };
        Camera::build(model, config.params, config.width, config.height)
    }
}

impl From<Camera> for CameraConfig {
    fn from(camera: Camera) -> Self {
        CameraConfig {
            model: ModelField::Name(camera.model.name().to_string()),
            width: camera.resolution.width.into(),
            height: camera.resolution.height.into(),
            params: camera.params,
        }
    }
}

/// Contains unit tests for camera construction, accessors and dispatch.
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn opencv_camera() -> Camera {
        Camera::new(
            "OPENCV",
            &[500.0, 510.0, 320.0, 240.0, -0.1, 0.02, 0.001, -0.0005],
            640,
            480,
        )
        .unwrap()
    }

    #[test]
    fn test_construction_by_name_and_id() {
        let by_name = opencv_camera();
        let by_id = Camera::new(4, by_name.params(), 640, 480).unwrap();
        let by_kind = Camera::new(ModelKind::OpenCv, by_name.params(), 640, 480).unwrap();
        assert_eq!(by_name, by_id);
        assert_eq!(by_name, by_kind);
        assert_eq!(by_name.model_id(), 4);
        assert_eq!(by_name.model_name(), "OPENCV");
        assert_eq!(by_name.width(), 640);
        assert_eq!(by_name.height(), 480);
        assert_eq!(by_name.num_params(), 8);
    }

    #[test]
    fn test_unknown_model() {
        let err = Camera::new("PANORAMA", &[1.0], 10, 10).unwrap_err();
        assert_eq!(err, CameraModelError::UnknownModel("PANORAMA".to_string()));
        let err = Camera::new(42, &[1.0], 10, 10).unwrap_err();
        assert_eq!(err, CameraModelError::UnknownModelId(42));
    }

    #[test]
    fn test_parameter_count() {
        let err = Camera::new("PINHOLE", &[500.0, 500.0, 320.0], 640, 480).unwrap_err();
        assert_eq!(
            err,
            CameraModelError::ParameterCount {
                model: ModelKind::Pinhole,
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_invalid_dimensions() {
        let params = [500.0, 320.0, 240.0];
        for (w, h) in [(0, 480), (640, 0), (-640, 480), (640, -1), (1 << 40, 480)] {
            let err = Camera::new("SIMPLE_PINHOLE", &params, w, h).unwrap_err();
            assert_eq!(
                err,
                CameraModelError::InvalidDimension {
                    width: w,
                    height: h
                }
            );
        }
    }

    #[test]
    fn test_invalid_params() {
        let err = Camera::new("FOV", &[400.0, 400.0, 320.0, f64::NAN, 0.9], 640, 480).unwrap_err();
        assert!(matches!(err, CameraModelError::InvalidParams(msg) if msg.starts_with("cy")));

        let err = Camera::new("PINHOLE", &[0.0, 500.0, 320.0, 240.0], 640, 480).unwrap_err();
        assert_eq!(err, CameraModelError::FocalLengthMustBePositive);
    }

    #[test]
    fn test_focal_rules() {
        let simple = Camera::new("SIMPLE_RADIAL", &[450.0, 320.0, 240.0, 0.01], 640, 480).unwrap();
        assert_eq!(simple.focal(), 450.0);
        assert_eq!(simple.focal_x(), 450.0);
        assert_eq!(simple.focal_y(), 450.0);

        let camera = opencv_camera();
        assert_eq!(camera.focal(), 505.0);
        assert_eq!(camera.focal_x(), 500.0);
        assert_eq!(camera.focal_y(), 510.0);
        assert_eq!(camera.principal_point(), Vector2::new(320.0, 240.0));

        let pano = Camera::new("EQUIRECTANGULAR", &[1920.0, 960.0], 1920, 960).unwrap();
        assert_eq!(pano.focal(), 1920.0);
        assert_eq!(pano.principal_point(), Vector2::new(960.0, 480.0));
    }

    #[test]
    fn test_params_info() {
        assert_eq!(opencv_camera().params_info(), "fx, fy, cx, cy, k1, k2, p1, p2");
    }

    #[test]
    fn test_with_params_builds_new_camera() {
        let camera = opencv_camera();
        let changed = camera
            .with_params(&[600.0, 600.0, 320.0, 240.0, 0.0, 0.0, 0.0, 0.0])
            .unwrap();
        assert_eq!(camera.params()[0], 500.0);
        assert_eq!(changed.params()[0], 600.0);
        assert_eq!(changed.resolution(), camera.resolution());
        assert!(camera.with_params(&[600.0]).is_err());
    }

    #[test]
    fn test_rescale() {
        let camera = opencv_camera();
        let half = camera.rescale(0.5).unwrap();
        assert_eq!(half.width(), 320);
        assert_eq!(half.height(), 240);
        assert_eq!(&half.params()[..4], &[250.0, 255.0, 160.0, 120.0]);
        assert_eq!(&half.params()[4..], &camera.params()[4..]);

        let simple = Camera::new("RADIAL", &[400.0, 320.0, 240.0, 0.1, 0.01], 640, 480).unwrap();
        assert_eq!(simple.rescale(2.0).unwrap().params(), &[800.0, 640.0, 480.0, 0.1, 0.01]);

        assert!(matches!(
            camera.rescale(1e-4),
            Err(CameraModelError::InvalidDimension { .. })
        ));
        assert!(camera.rescale(-1.0).is_err());
    }

    #[test]
    fn test_rescaled_camera_projects_to_scaled_pixels() {
        let camera = opencv_camera();
        let doubled = camera.rescale(2.0).unwrap();
        let point = Vector2::new(0.2, -0.15);
        assert_abs_diff_eq!(doubled.project(&point), camera.project(&point) * 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_yaml_round_trip() {
        let camera = opencv_camera();
        let yaml = camera.to_yaml_string().unwrap();
        assert!(yaml.contains("model: OPENCV"));
        let restored = Camera::from_yaml_str(&yaml).unwrap();
        assert_eq!(camera, restored);
    }

    #[test]
    fn test_yaml_accepts_model_id_and_validates() {
        let camera =
            Camera::from_yaml_str("model: 11\nwidth: 1920\nheight: 960\nparams: [1920.0, 960.0]\n")
                .unwrap();
        assert_eq!(camera.model(), ModelKind::Equirectangular);

        let err = Camera::from_yaml_str("model: PINHOLE\nwidth: 640\nheight: 480\nparams: [1.0]\n")
            .unwrap_err();
        assert!(matches!(err, CameraModelError::ParameterCount { .. }));

        let err = Camera::from_yaml_str("model: [").unwrap_err();
        assert!(matches!(err, CameraModelError::YamlError(_)));
    }

    #[test]
    fn test_display() {
        let camera = Camera::new("PINHOLE", &[500.0, 500.0, 320.0, 240.0], 640, 480).unwrap();
        assert_eq!(camera.to_string(), "PINHOLE 640x480 [500.0, 500.0, 320.0, 240.0]");
    }

    #[test]
    fn test_project_agrees_with_project_with_jac() {
        let pano = Camera::new("EQUIRECTANGULAR", &[1920.0, 960.0], 1920, 960).unwrap();
        let camera = opencv_camera();
        for point in [Vector2::new(0.4, -0.3), Vector2::new(-1.2, 0.9)] {
            assert_eq!(pano.project(&point), pano.project_with_jac(&point).0);
            assert_eq!(camera.project(&point), camera.project_with_jac(&point).0);
        }
        assert_eq!(
            pano.project(&Vector2::new(0.4, -0.3)),
            equirectangular::project(pano.params(), &pano.resolution(), &Vector2::new(0.4, -0.3))
        );
    }

    #[test]
    fn test_fov_beyond_field_of_view_is_flagged() {
        let camera = Camera::new("FOV", &[400.0, 400.0, 320.0, 240.0, 0.9], 640, 480).unwrap();
        let status = camera.unproject_with_status(&Vector2::new(1120.0, 240.0));
        assert!(!status.converged);
        assert!(status.point.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_pinhole_unprojection_is_exact() {
        let camera = Camera::new("PINHOLE", &[500.0, 500.0, 320.0, 240.0], 640, 480).unwrap();
        let status = camera.unproject_with_status(&Vector2::new(370.0, 340.0));
        assert!(status.converged);
        assert_eq!(status.iterations, 0);
        assert_abs_diff_eq!(status.point, Vector2::new(0.1, 0.2), epsilon = 1e-15);
    }

    #[test]
    fn test_iterative_unprojection_reports_convergence() {
        let camera = opencv_camera();
        let point = Vector2::new(0.3, -0.2);
        let status = camera.unproject_with_status(&camera.project(&point));
        assert!(status.converged);
        assert!(status.iterations >= 1);
        assert!(status.residual < undistort::TOLERANCE);
        assert_abs_diff_eq!(status.point, point, epsilon = 1e-10);
    }

    #[test]
    fn test_batch_helpers() {
        let camera = opencv_camera();
        let points = vec![Vector2::new(0.0, 0.0), Vector2::new(0.1, 0.1)];
        let pixels = camera.project_points(&points);
        assert_eq!(pixels.len(), 2);
        assert_abs_diff_eq!(pixels[0], Vector2::new(320.0, 240.0), epsilon = 1e-12);
        let recovered = camera.unproject_points(&pixels);
        for (a, b) in points.iter().zip(&recovered) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-10);
        }
    }
}
