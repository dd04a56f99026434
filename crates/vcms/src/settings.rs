//! Display color management settings.
//!
//! Settings are owned by the application's settings layer; the color manager
//! only reads them through [`SettingsSource`].
//!
//! # YAML
//!
//! ```yaml
//! enabled: true
//! mode: icc_profile
//! icc_profile: /etc/color/monitor.icc
//! whitepoint: d65
//! primaries: auto
//! gamma_mode: bt1886
//! gamma: 240
//! resolution: 64
//! intent: absolute_colorimetric
//! ```
//!
//! Every field is optional.

use crate::CmsResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use vcms_icc::{Intent, Trc, TrcType};
use vcms_primaries::{VideoPrimaries, Whitepoint};

/// Default cube resolution in ICC mode.
pub const DEFAULT_RESOLUTION: usize = 64;

/// Default gamma setting (gamma x 100).
pub const DEFAULT_GAMMA: u32 = 240;

/// Where the correction comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CmsMode {
    /// Load a prebuilt `.3dlut` file.
    LutFile,
    /// Build the LUT from the display's ICC profile.
    #[default]
    IccProfile,
}

/// User-facing color management settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsSettings {
    /// Master switch.
    pub enabled: bool,
    /// Correction source.
    pub mode: CmsMode,
    /// `.3dlut` file, used in [`CmsMode::LutFile`].
    pub lut_file: PathBuf,
    /// Display ICC profile. Empty for a reference BT.1886 display.
    pub icc_profile: PathBuf,
    /// Source white point.
    pub whitepoint: Whitepoint,
    /// Source primaries; `auto` follows the video.
    pub primaries: VideoPrimaries,
    /// Tone curve construction.
    pub gamma_mode: TrcType,
    /// Gamma x 100.
    pub gamma: u32,
    /// Cube resolution in ICC mode.
    pub resolution: usize,
    /// Rendering intent in ICC mode.
    pub intent: Intent,
}

impl Default for CmsSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: CmsMode::default(),
            lut_file: PathBuf::new(),
            icc_profile: PathBuf::new(),
            whitepoint: Whitepoint::default(),
            primaries: VideoPrimaries::default(),
            gamma_mode: TrcType::default(),
            gamma: DEFAULT_GAMMA,
            resolution: DEFAULT_RESOLUTION,
            intent: Intent::default(),
        }
    }
}

impl CmsSettings {
    /// Loads settings from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> CmsResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Parses settings from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> CmsResult<Self> {
        let settings: CmsSettings = serde_yaml::from_str(yaml)?;
        Ok(settings)
    }

    /// Tone curve selected by `gamma_mode` and `gamma`.
    pub fn trc(&self) -> Trc {
        Trc::from_settings(self.gamma_mode, self.gamma)
    }
}

/// Read access to the current settings.
///
/// Called on every validity check, so [`with_settings`](Self::with_settings)
/// must not clone or allocate.
pub trait SettingsSource {
    /// Runs `f` on the current settings.
    fn with_settings<R>(&self, f: impl FnOnce(&CmsSettings) -> R) -> R;

    /// Copy of the current settings.
    fn settings(&self) -> CmsSettings {
        self.with_settings(CmsSettings::clone)
    }

    /// Whether color management is switched on.
    fn is_enabled(&self) -> bool {
        self.with_settings(|s| s.enabled)
    }
}

impl SettingsSource for CmsSettings {
    fn with_settings<R>(&self, f: impl FnOnce(&CmsSettings) -> R) -> R {
        f(self)
    }
}

impl<T: SettingsSource> SettingsSource for Arc<T> {
    fn with_settings<R>(&self, f: impl FnOnce(&CmsSettings) -> R) -> R {
        (**self).with_settings(f)
    }
}

/// Settings store updated by the settings layer and read by the color manager.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use vcms::{CmsSettings, SettingsSource, SharedSettings, Whitepoint};
///
/// let shared = Arc::new(SharedSettings::new(CmsSettings::default()));
/// shared.update(|s| s.whitepoint = Whitepoint::D93);
/// assert_eq!(shared.settings().whitepoint, Whitepoint::D93);
/// ```
#[derive(Debug, Default)]
pub struct SharedSettings {
    inner: RwLock<CmsSettings>,
}

impl SharedSettings {
    /// Creates a store holding `settings`.
    pub fn new(settings: CmsSettings) -> Self {
        Self {
            inner: RwLock::new(settings),
        }
    }

    /// Replaces all settings.
    pub fn replace(&self, settings: CmsSettings) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = settings;
    }

    /// Modifies settings in place.
    pub fn update(&self, f: impl FnOnce(&mut CmsSettings)) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut *guard);
    }
}

impl SettingsSource for SharedSettings {
    fn with_settings<R>(&self, f: impl FnOnce(&CmsSettings) -> R) -> R {
        f(&*self.inner.read().unwrap_or_else(PoisonError::into_inner))
    }
}
