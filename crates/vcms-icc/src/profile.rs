//! ICC profile wrapper.

use crate::{IccError, IccResult, Intent, ToneCurve, Xyz};
use lcms2::{CIExyY, CIExyYTRIPLE, ColorSpaceSignature, Profile as LcmsProfile, ThreadContext};
use std::path::Path;
use vcms_primaries::{Chromaticity, Primaries};

/// Degree of chromatic adaptation in absolute colorimetric links.
///
/// `0.0`: the observer is not adapted, so the source white point survives
/// into display colorimetry.
pub const ADAPTATION_STATE: f64 = 0.0;

/// Little CMS context with [`ADAPTATION_STATE`] and no plugins.
pub(crate) fn context() -> ThreadContext {
    let mut context = ThreadContext::new();
    context.set_adaptation_state(ADAPTATION_STATE);
    context
}

/// An ICC color profile.
///
/// Either the calibrated display, loaded from disk, or a source profile
/// synthesized from video primaries and a tone curve.
///
/// # Example
///
/// ```rust,no_run
/// use vcms_icc::Profile;
/// use std::path::Path;
///
/// let display = Profile::from_file(Path::new("monitor.icc")).unwrap();
/// println!("Description: {}", display.description());
/// ```
pub struct Profile {
    pub(crate) inner: LcmsProfile<ThreadContext>,
    // Dropped after `inner`
    _context: ThreadContext,
}

impl Profile {
    /// Loads a profile from an ICC file.
    ///
    /// # Errors
    ///
    /// Returns [`IccError::LoadFailed`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> IccResult<Self> {
        let context = context();
        let inner = LcmsProfile::<ThreadContext>::new_file_context(&context, path)
            .map_err(|e| IccError::LoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(Self {
            inner,
            _context: context,
        })
    }

    /// Creates a matrix/TRC RGB profile.
    ///
    /// All three channels share `curve`.
    pub fn rgb(white: Chromaticity, primaries: &Primaries, curve: &ToneCurve) -> IccResult<Self> {
        let white = xy_y(white);
        let triple = CIExyYTRIPLE {
            Red: xy_y(primaries.r),
            Green: xy_y(primaries.g),
            Blue: xy_y(primaries.b),
        };
        let curve = lcms2::ToneCurve::new_tabulated_float(curve.table());
        let curves = [&curve, &curve, &curve];

        let context = context();
        let inner = LcmsProfile::<ThreadContext>::new_rgb_context(&context, &white, &triple, &curves)
            .map_err(|e| IccError::CreateFailed(format!("{}: {}", primaries.name, e)))?;
        Ok(Self {
            inner,
            _context: context,
        })
    }

    /// Creates a linear-light RGB profile.
    pub fn linear(white: Chromaticity, primaries: &Primaries) -> IccResult<Self> {
        Self::rgb(white, primaries, &ToneCurve::linear())
    }

    /// Returns the profile description.
    pub fn description(&self) -> String {
        self.inner
            .info(lcms2::InfoType::Description, lcms2::Locale::none())
            .unwrap_or_default()
    }

    /// Returns the color space signature.
    pub fn color_space(&self) -> String {
        format!("{:?}", self.inner.color_space())
    }

    /// Returns true if this is an RGB profile.
    pub fn is_rgb(&self) -> bool {
        matches!(self.inner.color_space(), ColorSpaceSignature::RgbData)
    }

    /// Detects the black point of the device described by this profile.
    ///
    /// `None` when the profile does not allow detection.
    pub fn black_point(&self, intent: Intent) -> Option<Xyz> {
        self.inner
            .detect_black_point(intent.into())
            .map(|xyz| Xyz::new(xyz.X, xyz.Y, xyz.Z))
    }

    /// Exports the profile as ICC data.
    pub fn to_icc(&self) -> IccResult<Vec<u8>> {
        self.inner
            .icc()
            .map_err(|e| IccError::CreateFailed(e.to_string()))
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("description", &self.description())
            .field("color_space", &self.color_space())
            .finish()
    }
}

fn xy_y(c: Chromaticity) -> CIExyY {
    CIExyY {
        x: c.x,
        y: c.y,
        Y: 1.0,
    }
}
