//! Configuration tokens and resolved configuration keys.
//!
//! A renderer holds a [`CmsToken`] next to its LUT and asks the color manager
//! whether the pair is still current. The answer compares the token and the
//! [`ConfigKey`]: every resolved input that affects the LUT output.

use crate::settings::{CmsMode, CmsSettings};
use std::fmt;
use std::path::PathBuf;
use vcms_icc::{Intent, TrcType};
use vcms_primaries::{VideoPrimaries, Whitepoint};

/// Primaries assumed when the video does not report any.
pub const FALLBACK_PRIMARIES: VideoPrimaries = VideoPrimaries::Bt709;

/// Identifies one successful LUT generation.
///
/// Tokens from one color manager increase monotonically. Callers compare
/// them, never interpret them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CmsToken(pub(crate) u64);

impl CmsToken {
    /// Raw value, for logging.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CmsToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Inputs of a LUT, per mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LutSource {
    /// Prebuilt `.3dlut` file.
    LutFile {
        /// File path
        path: PathBuf,
    },
    /// Transform from a synthesized source profile to the display profile.
    IccProfile {
        /// Display profile path, empty for the reference display
        profile: PathBuf,
        /// Source white point
        whitepoint: Whitepoint,
        /// Source primaries, resolved
        primaries: VideoPrimaries,
        /// Tone curve construction
        trc: TrcType,
        /// Gamma x 100
        gamma: u32,
        /// Cube resolution
        resolution: usize,
        /// Rendering intent
        intent: Intent,
    },
}

/// Every resolved input that affects the LUT output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigKey {
    /// Video primaries, never [`VideoPrimaries::Auto`].
    pub video_primaries: VideoPrimaries,
    /// Mode-specific inputs.
    pub source: LutSource,
}

impl ConfigKey {
    /// Resolves `settings` for a stream with `video` primaries.
    ///
    /// `Auto` video primaries become [`FALLBACK_PRIMARIES`]; `Auto` source
    /// primaries follow the resolved video primaries.
    pub fn resolve(settings: &CmsSettings, video: VideoPrimaries) -> Self {
        let video_primaries = video.resolve(FALLBACK_PRIMARIES);
        let source = match settings.mode {
            CmsMode::LutFile => LutSource::LutFile {
                path: settings.lut_file.clone(),
            },
            CmsMode::IccProfile => LutSource::IccProfile {
                profile: settings.icc_profile.clone(),
                whitepoint: settings.whitepoint,
                primaries: settings.primaries.resolve(video_primaries),
                trc: settings.gamma_mode,
                gamma: settings.gamma,
                resolution: settings.resolution,
                intent: settings.intent,
            },
        };
        Self {
            video_primaries,
            source,
        }
    }

    /// Whether resolving `settings` for `video` would give this key.
    ///
    /// Compares in place, without building a key.
    pub fn matches(&self, settings: &CmsSettings, video: VideoPrimaries) -> bool {
        let video_primaries = video.resolve(FALLBACK_PRIMARIES);
        if self.video_primaries != video_primaries {
            return false;
        }
        match (&self.source, settings.mode) {
            (LutSource::LutFile { path }, CmsMode::LutFile) => *path == settings.lut_file,
            (
                LutSource::IccProfile {
                    profile,
                    whitepoint,
                    primaries,
                    trc,
                    gamma,
                    resolution,
                    intent,
                },
                CmsMode::IccProfile,
            ) => {
                *profile == settings.icc_profile
                    && *whitepoint == settings.whitepoint
                    && *primaries == settings.primaries.resolve(video_primaries)
                    && *trc == settings.gamma_mode
                    && *gamma == settings.gamma
                    && *resolution == settings.resolution
                    && *intent == settings.intent
            }
            _ => false,
        }
    }

    /// Mode this key was resolved for.
    pub fn mode(&self) -> CmsMode {
        match self.source {
            LutSource::LutFile { .. } => CmsMode::LutFile,
            LutSource::IccProfile { .. } => CmsMode::IccProfile,
        }
    }
}

/// The configuration of the last successfully generated LUT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Token handed out with the LUT.
    pub token: CmsToken,
    /// Cube resolution of the LUT.
    pub clut_size: usize,
    /// Inputs the LUT was generated from.
    pub key: ConfigKey,
}
