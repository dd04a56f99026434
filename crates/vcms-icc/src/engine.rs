//! Color engine abstraction.
//!
//! The color manager only needs a handful of engine operations: build an RGB
//! profile, open a display profile, detect its black point, link two profiles
//! and push a batch of 16-bit pixels through the link. [`ColorEngine`] names
//! exactly those, so that a matrix-only engine can stand in for Little CMS in
//! tests.

use crate::{IccError, IccResult, Intent, Profile, ToneCurve, Transform};
use std::path::Path;
use tracing::debug;
use vcms_primaries::{Chromaticity, Primaries};

/// CIE XYZ tristimulus value, Y relative to the profile white.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Xyz {
    /// X
    pub x: f64,
    /// Y (luminance)
    pub y: f64,
    /// Z
    pub z: f64,
}

impl Xyz {
    /// Absolute black.
    pub const ZERO: Xyz = Xyz::new(0.0, 0.0, 0.0);

    /// Creates a value.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Operations the color manager needs from a color management engine.
pub trait ColorEngine {
    /// Profile handle.
    type Profile;
    /// Linked transform handle.
    type Transform;

    /// Builds an RGB profile from primaries, a white point and a shared curve.
    fn rgb_profile(
        &self,
        white: Chromaticity,
        primaries: &Primaries,
        curve: &ToneCurve,
    ) -> IccResult<Self::Profile>;

    /// Opens a display profile from disk. Only RGB profiles are accepted.
    fn open_profile(&self, path: &Path) -> IccResult<Self::Profile>;

    /// Black point of `profile`, [`Xyz::ZERO`] when it cannot be detected.
    fn black_point(&self, profile: &Self::Profile) -> Xyz;

    /// Links `source` to `display`.
    fn link(
        &self,
        source: &Self::Profile,
        display: &Self::Profile,
        intent: Intent,
    ) -> IccResult<Self::Transform>;

    /// Transforms `input` into `output`; both hold the same number of pixels.
    fn apply(
        &self,
        transform: &Self::Transform,
        input: &[[u16; 3]],
        output: &mut [[u16; 3]],
    ) -> IccResult<()>;
}

/// Little CMS 2 engine.
///
/// Profiles and links are created in unadapted contexts, see
/// [`ADAPTATION_STATE`](crate::ADAPTATION_STATE).
#[derive(Debug, Clone, Copy, Default)]
pub struct Lcms;

impl ColorEngine for Lcms {
    type Profile = Profile;
    type Transform = Transform;

    fn rgb_profile(
        &self,
        white: Chromaticity,
        primaries: &Primaries,
        curve: &ToneCurve,
    ) -> IccResult<Profile> {
        Profile::rgb(white, primaries, curve)
    }

    fn open_profile(&self, path: &Path) -> IccResult<Profile> {
        let profile = Profile::from_file(path)?;
        if !profile.is_rgb() {
            return Err(IccError::ColorSpaceMismatch {
                expected: "RgbData".into(),
                actual: profile.color_space(),
            });
        }
        debug!(path = %path.display(), description = %profile.description(), "Opened display profile");
        Ok(profile)
    }

    fn black_point(&self, profile: &Profile) -> Xyz {
        profile.black_point(Intent::Perceptual).unwrap_or(Xyz::ZERO)
    }

    fn link(&self, source: &Profile, display: &Profile, intent: Intent) -> IccResult<Transform> {
        Transform::new(source, display, intent)
    }

    fn apply(
        &self,
        transform: &Transform,
        input: &[[u16; 3]],
        output: &mut [[u16; 3]],
    ) -> IccResult<()> {
        transform.apply(input, output)
    }
}
