//! # vcms-icc
//!
//! ICC transform building for video color management.
//!
//! Synthesizes the profile of an idealized video source (standard primaries,
//! a white point and a display tone curve), links it to the calibrated
//! display profile and applies the link to 16-bit RGB. Built on Little CMS 2.
//!
//! # Usage
//!
//! ```rust,no_run
//! use vcms_icc::{build_transform, create_source_profile, create_tone_curve};
//! use vcms_icc::{ColorEngine, Intent, Lcms, Trc};
//! use vcms_primaries::{VideoPrimaries, Whitepoint};
//! use std::path::Path;
//!
//! let display = Lcms.open_profile(Path::new("monitor.icc")).unwrap();
//! let black = Lcms.black_point(&display);
//! let curve = create_tone_curve(Trc::Bt1886, black).unwrap();
//! let source =
//!     create_source_profile(&Lcms, VideoPrimaries::Bt709, &curve, Whitepoint::D65).unwrap();
//! let transform =
//!     build_transform(&Lcms, &source, &display, Intent::AbsoluteColorimetric).unwrap();
//! let out = transform.apply_pixel([32768, 32768, 32768]);
//! ```
//!
//! # Engines
//!
//! Everything above the profile level goes through [`ColorEngine`]; [`Lcms`]
//! is the production implementation.
//!
//! Each Little CMS profile and transform owns a private context with
//! chromatic adaptation switched off ([`ADAPTATION_STATE`]). Absolute
//! colorimetric links therefore reproduce the source white point on the
//! display instead of mapping it to display white.
//!
//! # Dependencies
//!
//! - `vcms-primaries` - Primaries and white points
//! - `lcms2` - Little CMS 2 bindings
//!
//! # Used By
//!
//! - `vcms` - Color manager facade

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod builder;
mod engine;
mod error;
mod profile;
mod tone;
mod transform;

pub use builder::{
    build_transform, create_reference_display, create_source_profile, create_tone_curve,
    detect_black_point,
};
pub use engine::{ColorEngine, Lcms, Xyz};
pub use error::{IccError, IccResult};
pub use profile::{ADAPTATION_STATE, Profile};
pub use tone::{TABLE_SIZE, ToneCurve, Trc, TrcType};
pub use transform::Transform;

use serde::{Deserialize, Serialize};

/// Rendering intent for color transformations.
///
/// Determines how out-of-gamut colors and white point differences are
/// handled when mapping video to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Compresses the source gamut to fit the display.
    Perceptual,

    /// Maps source white to display white, clips out-of-gamut colors.
    RelativeColorimetric,

    /// Maintains saturation at the expense of accuracy.
    Saturation,

    /// Reproduces source colors exactly, including the white point.
    #[default]
    AbsoluteColorimetric,
}

impl From<Intent> for lcms2::Intent {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::Perceptual => lcms2::Intent::Perceptual,
            Intent::RelativeColorimetric => lcms2::Intent::RelativeColorimetric,
            Intent::Saturation => lcms2::Intent::Saturation,
            Intent::AbsoluteColorimetric => lcms2::Intent::AbsoluteColorimetric,
        }
    }
}
