//! The closed registry of supported camera models.
//!
//! Every model kind owns a fixed numeric id, a canonical upper-case name and a
//! fixed parameter layout. Ids follow the COLMAP numbering for the COLMAP model
//! family; [`ModelKind::Equirectangular`] is appended after it as id 11. Id 7
//! stays FOV, so bindings that numbered the panorama model 7 must map it to 11.

use crate::camera::CameraModelError;
use std::fmt;
use std::str::FromStr;

/// Enumerates the supported projection families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    SimplePinhole,
    Pinhole,
    SimpleRadial,
    Radial,
    OpenCv,
    OpenCvFisheye,
    FullOpenCv,
    Fov,
    SimpleRadialFisheye,
    RadialFisheye,
    ThinPrismFisheye,
    Equirectangular,
}

impl ModelKind {
    /// All model kinds, ordered by id.
    pub const ALL: [ModelKind; 12] = [
        ModelKind::SimplePinhole,
        ModelKind::Pinhole,
        ModelKind::SimpleRadial,
        ModelKind::Radial,
        ModelKind::OpenCv,
        ModelKind::OpenCvFisheye,
        ModelKind::FullOpenCv,
        ModelKind::Fov,
        ModelKind::SimpleRadialFisheye,
        ModelKind::RadialFisheye,
        ModelKind::ThinPrismFisheye,
        ModelKind::Equirectangular,
    ];

    /// Resolves a model name or id into a [`ModelKind`].
    ///
    /// # Errors
    ///
    /// * [`CameraModelError::UnknownModel`] for a name outside the registry.
    /// * [`CameraModelError::UnknownModelId`] for an id outside the registry.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use colmap_cameras::camera::ModelKind;
    ///
    /// assert_eq!(ModelKind::resolve("OPENCV").unwrap(), ModelKind::OpenCv);
    /// assert_eq!(ModelKind::resolve(11).unwrap(), ModelKind::Equirectangular);
    /// assert!(ModelKind::resolve("PANORAMIC").is_err());
    /// ```
    pub fn resolve<S: ModelSelector>(selector: S) -> Result<ModelKind, CameraModelError> {
        selector.resolve()
    }

    /// Looks up a model by its numeric id.
    pub fn from_id(id: i32) -> Result<ModelKind, CameraModelError> {
        usize::try_from(id)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(CameraModelError::UnknownModelId(id))
    }

    /// Numeric id of the model.
    pub fn id(self) -> i32 {
        match self {
            ModelKind::SimplePinhole => 0,
            ModelKind::Pinhole => 1,
            ModelKind::SimpleRadial => 2,
            ModelKind::Radial => 3,
            ModelKind::OpenCv => 4,
            ModelKind::OpenCvFisheye => 5,
            ModelKind::FullOpenCv => 6,
            ModelKind::Fov => 7,
            ModelKind::SimpleRadialFisheye => 8,
            ModelKind::RadialFisheye => 9,
            ModelKind::ThinPrismFisheye => 10,
            ModelKind::Equirectangular => 11,
        }
    }

    /// Canonical upper-case model name.
    pub fn name(self) -> &'static str {
        match self {
            ModelKind::SimplePinhole => "SIMPLE_PINHOLE",
            ModelKind::Pinhole => "PINHOLE",
            ModelKind::SimpleRadial => "SIMPLE_RADIAL",
            ModelKind::Radial => "RADIAL",
            ModelKind::OpenCv => "OPENCV",
            ModelKind::OpenCvFisheye => "OPENCV_FISHEYE",
            ModelKind::FullOpenCv => "FULL_OPENCV",
            ModelKind::Fov => "FOV",
            ModelKind::SimpleRadialFisheye => "SIMPLE_RADIAL_FISHEYE",
            ModelKind::RadialFisheye => "RADIAL_FISHEYE",
            ModelKind::ThinPrismFisheye => "THIN_PRISM_FISHEYE",
            ModelKind::Equirectangular => "EQUIRECTANGULAR",
        }
    }

    /// Parameter names in storage order.
    pub fn param_names(self) -> &'static [&'static str] {
        match self {
            ModelKind::SimplePinhole => &["f", "cx", "cy"],
            ModelKind::Pinhole => &["fx", "fy", "cx", "cy"],
            ModelKind::SimpleRadial | ModelKind::SimpleRadialFisheye => &["f", "cx", "cy", "k"],
            ModelKind::Radial | ModelKind::RadialFisheye => &["f", "cx", "cy", "k1", "k2"],
            ModelKind::OpenCv => &["fx", "fy", "cx", "cy", "k1", "k2", "p1", "p2"],
            ModelKind::OpenCvFisheye => &["fx", "fy", "cx", "cy", "k1", "k2", "k3", "k4"],
            ModelKind::FullOpenCv => &[
                "fx", "fy", "cx", "cy", "k1", "k2", "p1", "p2", "k3", "k4", "k5", "k6",
            ],
            ModelKind::Fov => &["fx", "fy", "cx", "cy", "omega"],
            ModelKind::ThinPrismFisheye => &[
                "fx", "fy", "cx", "cy", "k1", "k2", "p1", "p2", "k3", "k4", "sx1", "sy1",
            ],
            ModelKind::Equirectangular => &["sx", "sy"],
        }
    }

    /// Number of parameters the model requires.
    pub fn arity(self) -> usize {
        self.param_names().len()
    }

    /// Whether the model stores a single focal length `f` instead of `fx, fy`.
    pub fn has_single_focal(self) -> bool {
        matches!(
            self,
            ModelKind::SimplePinhole
                | ModelKind::SimpleRadial
                | ModelKind::Radial
                | ModelKind::SimpleRadialFisheye
                | ModelKind::RadialFisheye
        )
    }

    /// Whether `unproject` needs the iterative Newton solve for this model.
    pub fn is_iterative(self) -> bool {
        !matches!(
            self,
            ModelKind::SimplePinhole
                | ModelKind::Pinhole
                | ModelKind::Fov
                | ModelKind::Equirectangular
        )
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = CameraModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CameraModelError::UnknownModel(s.to_string()))
    }
}

/// Anything that can name a camera model: a model name, a numeric id, or a
/// [`ModelKind`] itself.
pub trait ModelSelector {
    fn resolve(self) -> Result<ModelKind, CameraModelError>;
}

impl ModelSelector for ModelKind {
    fn resolve(self) -> Result<ModelKind, CameraModelError> {
        Ok(self)
    }
}

impl ModelSelector for &str {
    fn resolve(self) -> Result<ModelKind, CameraModelError> {
        self.parse()
    }
}

impl ModelSelector for &String {
    fn resolve(self) -> Result<ModelKind, CameraModelError> {
        self.parse()
    }
}

impl ModelSelector for String {
    fn resolve(self) -> Result<ModelKind, CameraModelError> {
        self.parse()
    }
}

impl ModelSelector for i32 {
    fn resolve(self) -> Result<ModelKind, CameraModelError> {
        ModelKind::from_id(self)
    }
}
