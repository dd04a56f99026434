//! The color manager facade.
//!
//! # Concurrency
//!
//! Renderers call [`ColorManager::check_configuration`] often and
//! [`ColorManager::video_3d_lut`] rarely. The published [`Configuration`]
//! lives behind an `RwLock` that is only write-locked for the instant a new
//! token is minted and stored. The display profile cache sits behind a
//! `Mutex` held for a whole generation, which also serializes generations.
//! Sampling never holds the configuration lock.

use crate::config::{ConfigKey, Configuration, CmsToken, LutSource};
use crate::settings::SettingsSource;
use crate::{CmsResult, sampler};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{debug, info, warn};
use vcms_icc::{
    ColorEngine, Lcms, Trc, Xyz, build_transform, create_reference_display, create_source_profile,
    create_tone_curve, detect_black_point,
};
use vcms_lut::{Clut3D, threedlut};
use vcms_primaries::{VideoPrimaries, Whitepoint};

/// A generated LUT and the token that tracks its validity.
#[derive(Debug)]
pub struct VideoLut {
    /// Validity token.
    pub token: CmsToken,
    /// The cube; ownership passes to the caller.
    pub clut: Clut3D,
}

/// Published state: token counter and last good configuration.
#[derive(Debug, Default)]
struct Snapshot {
    minted: u64,
    current: Option<Configuration>,
}

/// What a cached display profile was built from.
///
/// An empty `profile` path stands for the synthesized reference display.
/// Any change rebuilds the display, including a file display whose path is
/// unchanged, so a recalibrated profile is picked up.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DisplayKey {
    profile: PathBuf,
    primaries: VideoPrimaries,
    whitepoint: Whitepoint,
}

struct Display<P> {
    key: DisplayKey,
    profile: P,
    black: Xyz,
}

/// Produces display-corrected 3D LUTs for video and tracks their validity.
///
/// One instance per display pipeline, shared by handle.
///
/// # Example
///
/// ```rust,no_run
/// use vcms::{CmsSettings, ColorManager, Lcms, VideoPrimaries};
///
/// let settings = CmsSettings::from_file("cms.yaml").unwrap();
/// let cms = ColorManager::new(settings, Lcms);
///
/// let lut = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();
/// // ... upload lut.clut to the GPU, keep lut.token ...
/// assert!(cms.check_configuration(lut.token, VideoPrimaries::Bt709));
/// ```
pub struct ColorManager<S: SettingsSource, E: ColorEngine = Lcms> {
    settings: S,
    engine: E,
    snapshot: RwLock<Snapshot>,
    display: Mutex<Option<Display<E::Profile>>>,
}

impl<S: SettingsSource, E: ColorEngine> ColorManager<S, E> {
    /// Creates a color manager reading `settings` and building with `engine`.
    pub fn new(settings: S, engine: E) -> Self {
        Self {
            settings,
            engine,
            snapshot: RwLock::new(Snapshot::default()),
            display: Mutex::new(None),
        }
    }

    /// Whether color management is switched on.
    pub fn is_enabled(&self) -> bool {
        self.settings.is_enabled()
    }

    /// The settings source.
    pub fn settings(&self) -> &S {
        &self.settings
    }

    /// The color engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The configuration of the last successful generation.
    pub fn configuration(&self) -> Option<Configuration> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current
            .clone()
    }

    /// Generates the LUT for a stream with `primaries`.
    ///
    /// On success a fresh token is published and returned with the cube. On
    /// failure nothing changes: the previous token stays valid.
    pub fn video_3d_lut(&self, primaries: VideoPrimaries) -> CmsResult<VideoLut> {
        let key = self
            .settings
            .with_settings(|settings| ConfigKey::resolve(settings, primaries));
        debug!(video = %key.video_primaries, mode = ?key.mode(), "Generating video 3D LUT");

        let mut display = lock(&self.display);
        let clut = match self.generate(&key, &mut display) {
            Ok(clut) => clut,
            Err(e) => {
                warn!("Failed to generate video 3D LUT: {}", e);
                return Err(e);
            }
        };

        let token = self.publish(key, clut.size());
        info!(%token, size = clut.size(), "Video 3D LUT ready");
        Ok(VideoLut { token, clut })
    }

    /// Whether a LUT issued with `token` still matches the current settings
    /// for a stream with `primaries`.
    ///
    /// Cheap enough for every frame: nothing is cloned or allocated.
    pub fn check_configuration(&self, token: CmsToken, primaries: VideoPrimaries) -> bool {
        let snapshot = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        match &snapshot.current {
            Some(current) if current.token == token => self
                .settings
                .with_settings(|settings| current.key.matches(settings, primaries)),
            _ => false,
        }
    }

    fn publish(&self, key: ConfigKey, clut_size: usize) -> CmsToken {
        let mut snapshot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        snapshot.minted += 1;
        let token = CmsToken(snapshot.minted);
        snapshot.current = Some(Configuration {
            token,
            clut_size,
            key,
        });
        token
    }

    fn generate(
        &self,
        key: &ConfigKey,
        display: &mut Option<Display<E::Profile>>,
    ) -> CmsResult<Clut3D> {
        match &key.source {
            LutSource::LutFile { path } => {
                let header = threedlut::probe(path)?;
                debug!(path = %path.display(), resolution = header.resolution, "Loading 3dlut");
                Ok(threedlut::read(path)?)
            }
            LutSource::IccProfile {
                profile,
                whitepoint,
                primaries,
                trc,
                gamma,
                resolution,
                intent,
            } => {
                let display_key = DisplayKey {
                    profile: profile.clone(),
                    primaries: *primaries,
                    whitepoint: *whitepoint,
                };
                let display = self.load_display(display, display_key)?;

                let curve = create_tone_curve(Trc::from_settings(*trc, *gamma), display.black)?;
                let source = create_source_profile(&self.engine, *primaries, &curve, *whitepoint)?;
                let transform = build_transform(&self.engine, &source, &display.profile, *intent)?;
                drop(source);

                sampler::sample(&self.engine, &transform, *resolution)
            }
        }
    }

    /// Returns the cached display profile, rebuilding it if `key` changed.
    fn load_display<'a>(
        &self,
        cache: &'a mut Option<Display<E::Profile>>,
        key: DisplayKey,
    ) -> CmsResult<&'a Display<E::Profile>> {
        let display = match cache.take() {
            Some(display) if display.key == key => {
                debug!("Reusing display profile");
                display
            }
            _ => {
                let profile = if key.profile.as_os_str().is_empty() {
                    create_reference_display(&self.engine, key.primaries, key.whitepoint)?
                } else {
                    self.open_display(&key.profile)?
                };
                let black = detect_black_point(&self.engine, &profile);
                Display {
                    key,
                    profile,
                    black,
                }
            }
        };
        Ok(cache.insert(display))
    }

    fn open_display(&self, path: &Path) -> CmsResult<E::Profile> {
        let profile = self.engine.open_profile(path)?;
        info!(path = %path.display(), "Loaded display profile");
        Ok(profile)
    }
}

impl<S: SettingsSource + std::fmt::Debug, E: ColorEngine + std::fmt::Debug> std::fmt::Debug
    for ColorManager<S, E>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorManager")
            .field("settings", &self.settings)
            .field("engine", &self.engine)
            .field("configuration", &self.configuration())
            .finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
