//! # vcms
//!
//! Display color management for video playback.
//!
//! Given the primaries of a video stream and the user's display calibration
//! settings, [`ColorManager`] produces a 16-bit 3D LUT that maps decoded
//! video RGB to display RGB, and a [`CmsToken`] the renderer uses to ask
//! cheaply whether that LUT is still current.
//!
//! The LUT comes from one of two places:
//!
//! - a prebuilt `.3dlut` file from calibration software ([`CmsMode::LutFile`])
//! - a transform from a synthesized video source profile to the display's
//!   ICC profile, sampled on a uniform grid ([`CmsMode::IccProfile`])
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vcms::{CmsSettings, ColorManager, Lcms, SharedSettings, VideoPrimaries, Whitepoint};
//!
//! let settings = Arc::new(SharedSettings::new(CmsSettings::from_file("cms.yaml").unwrap()));
//! let cms = ColorManager::new(settings.clone(), Lcms);
//!
//! let lut = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();
//! assert!(cms.check_configuration(lut.token, VideoPrimaries::Bt709));
//!
//! // Any settings change invalidates the token
//! settings.update(|s| s.whitepoint = Whitepoint::D93);
//! assert!(!cms.check_configuration(lut.token, VideoPrimaries::Bt709));
//! ```
//!
//! # Dependencies
//!
//! - `vcms-primaries` - Primaries and white points
//! - `vcms-lut` - LUT cube and `.3dlut` files
//! - `vcms-icc` - Tone curves, profiles and transforms
//!
//! # Used By
//!
//! - `vcms-cli` - Command line tool

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
mod error;
pub mod manager;
pub mod sampler;
pub mod settings;

pub use config::{CmsToken, ConfigKey, Configuration, FALLBACK_PRIMARIES, LutSource};
pub use error::{CmsError, CmsResult, ErrorKind};
pub use manager::{ColorManager, VideoLut};
pub use settings::{CmsMode, CmsSettings, SettingsSource, SharedSettings};

pub use vcms_icc::{ColorEngine, Intent, Lcms, Trc, TrcType};
pub use vcms_lut::Clut3D;
pub use vcms_primaries::{VideoPrimaries, Whitepoint};
