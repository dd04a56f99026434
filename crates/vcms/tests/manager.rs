//! Token lifecycle and display caching, with a matrix engine.

mod common;

use common::{MatrixEngine, icc_settings, near};
use std::sync::Arc;
use std::time::Duration;
use vcms::{
    CmsMode, CmsSettings, ColorManager, ErrorKind, Intent, SettingsSource, SharedSettings, TrcType,
    VideoPrimaries, Whitepoint,
};

type Manager = ColorManager<Arc<SharedSettings>, MatrixEngine>;

fn manager(resolution: usize) -> (Arc<SharedSettings>, Manager) {
    let settings = Arc::new(SharedSettings::new(icc_settings(resolution)));
    let cms = ColorManager::new(settings.clone(), MatrixEngine::default());
    (settings, cms)
}

#[test]
fn token_valid_after_generation() {
    let (_, cms) = manager(9);
    assert!(cms.configuration().is_none());

    let lut = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();
    assert!(cms.check_configuration(lut.token, VideoPrimaries::Bt709));
    assert_eq!(lut.clut.size(), 9);

    let config = cms.configuration().unwrap();
    assert_eq!(config.token, lut.token);
    assert_eq!(config.clut_size, 9);
}

#[test]
fn tokens_increase_monotonically() {
    let (_, cms) = manager(5);
    let mut last = None;
    for _ in 0..5 {
        let lut = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();
        if let Some(prev) = last {
            assert!(lut.token > prev);
            assert!(!cms.check_configuration(prev, VideoPrimaries::Bt709));
        }
        last = Some(lut.token);
    }
}

#[test]
fn primaries_change_invalidates() {
    let (_, cms) = manager(5);
    let first = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();

    // Same token, different stream
    assert!(!cms.check_configuration(first.token, VideoPrimaries::Bt470bg));

    let second = cms.video_3d_lut(VideoPrimaries::Bt470bg).unwrap();
    assert!(!cms.check_configuration(first.token, VideoPrimaries::Bt709));
    assert!(!cms.check_configuration(first.token, VideoPrimaries::Bt470bg));
    assert!(cms.check_configuration(second.token, VideoPrimaries::Bt470bg));
    assert_ne!(first.clut, second.clut);
}

#[test]
fn auto_primaries_resolve_to_bt709() {
    let (_, cms) = manager(5);
    let auto = cms.video_3d_lut(VideoPrimaries::Auto).unwrap();
    assert!(cms.check_configuration(auto.token, VideoPrimaries::Bt709));
    assert!(cms.check_configuration(auto.token, VideoPrimaries::Auto));

    let explicit = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();
    assert_eq!(auto.clut, explicit.clut);
}

#[test]
fn fixed_source_primaries_ignore_stream() {
    let (settings, cms) = manager(5);
    settings.update(|s| s.primaries = VideoPrimaries::Smpte170m);

    let a = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();
    let b = cms.video_3d_lut(VideoPrimaries::Bt470m).unwrap();
    assert_eq!(a.clut, b.clut);
}

#[test]
fn settings_change_invalidates() {
    let (settings, cms) = manager(5);
    let lut = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();
    let original = settings.settings();

    let changes: [Box<dyn Fn(&mut CmsSettings)>; 7] = [
        Box::new(|s: &mut CmsSettings| s.whitepoint = Whitepoint::D93),
        Box::new(|s: &mut CmsSettings| s.gamma = 220),
        Box::new(|s: &mut CmsSettings| s.gamma_mode = TrcType::OutputOffset),
        Box::new(|s: &mut CmsSettings| s.mode = CmsMode::LutFile),
        Box::new(|s: &mut CmsSettings| s.icc_profile = "/etc/color/other.icc".into()),
        Box::new(|s: &mut CmsSettings| s.intent = Intent::Perceptual),
        Box::new(|s: &mut CmsSettings| s.resolution = 17),
    ];
    for change in changes.iter() {
        settings.update(|s| change(s));
        assert!(!cms.check_configuration(lut.token, VideoPrimaries::Bt709));

        // Nothing was regenerated, so restoring the settings restores validity
        settings.replace(original.clone());
        assert!(cms.check_configuration(lut.token, VideoPrimaries::Bt709));
    }
}

#[test]
fn failure_keeps_previous_configuration() {
    let (settings, cms) = manager(5);
    let lut = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();

    settings.update(|s| {
        s.gamma_mode = TrcType::Absolute;
        s.gamma = 0;
    });
    let err = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Profile);
    assert_eq!(cms.configuration().unwrap().token, lut.token);

    settings.update(|s| {
        s.gamma_mode = TrcType::Bt1886;
        s.gamma = 240;
    });
    assert!(cms.check_configuration(lut.token, VideoPrimaries::Bt709));
}

#[test]
fn bad_resolution_is_a_settings_error() {
    let (settings, cms) = manager(5);
    settings.update(|s| s.resolution = 1);
    let err = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Settings);
    assert!(cms.configuration().is_none());
}

#[test]
fn display_profile_rebuilt_on_white_or_primaries_change() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.icc");
    let b = dir.path().join("b.icc");
    std::fs::write(&a, b"a").unwrap();
    std::fs::write(&b, b"b").unwrap();

    let (settings, cms) = manager(3);
    settings.update(|s| s.icc_profile = a.clone());

    cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();
    cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();
    assert_eq!(cms_engine_opened(&cms), 1);

    // Auto source primaries follow the stream
    cms.video_3d_lut(VideoPrimaries::Bt470bg).unwrap();
    assert_eq!(cms_engine_opened(&cms), 2);

    settings.update(|s| s.whitepoint = Whitepoint::D93);
    cms.video_3d_lut(VideoPrimaries::Bt470bg).unwrap();
    assert_eq!(cms_engine_opened(&cms), 3);

    // Curve changes reuse the display
    settings.update(|s| s.gamma = 220);
    cms.video_3d_lut(VideoPrimaries::Bt470bg).unwrap();
    assert_eq!(cms_engine_opened(&cms), 3);

    settings.update(|s| s.icc_profile = b.clone());
    cms.video_3d_lut(VideoPrimaries::Bt470bg).unwrap();
    assert_eq!(cms_engine_opened(&cms), 4);
}

/// Source that only lends its settings out.
struct Borrowed(CmsSettings);

impl SettingsSource for Borrowed {
    fn with_settings<R>(&self, f: impl FnOnce(&CmsSettings) -> R) -> R {
        f(&self.0)
    }

    fn settings(&self) -> CmsSettings {
        panic!("settings copied")
    }
}

#[test]
fn checks_borrow_settings() {
    let cms = ColorManager::new(Borrowed(icc_settings(3)), MatrixEngine::default());
    let lut = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();

    assert!(cms.is_enabled());
    for _ in 0..1000 {
        assert!(cms.check_configuration(lut.token, VideoPrimaries::Bt709));
    }
    assert!(!cms.check_configuration(lut.token, VideoPrimaries::Bt470bg));
}

#[test]
fn missing_display_profile_fails() {
    let (settings, cms) = manager(3);
    let lut = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();

    settings.update(|s| s.icc_profile = "/nonexistent/display.icc".into());
    let err = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Profile);
    assert_eq!(cms.configuration().unwrap().token, lut.token);
}

#[test]
fn reference_display_round_trips_matching_source() {
    let (_, cms) = manager(9);
    let lut = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();

    // Source and reference display agree, so the cube is near identity
    let identity = vcms::Clut3D::identity(9).unwrap();
    for (got, want) in lut.clut.entries().zip(identity.entries()) {
        assert!(near(got, want, 48), "{:?} vs {:?}", got, want);
    }
    assert_eq!(cms_engine_opened(&cms), 0);
}

#[test]
fn raised_black_lifts_shadows() {
    let settings = icc_settings(5);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("display.icc");
    std::fs::write(&path, b"icc").unwrap();
    let settings = CmsSettings {
        icc_profile: path,
        ..settings
    };

    let flat = ColorManager::new(settings.clone(), MatrixEngine::default());
    let lifted = ColorManager::new(
        settings,
        MatrixEngine {
            black_y: 0.01,
            ..Default::default()
        },
    );

    let a = flat.video_3d_lut(VideoPrimaries::Bt709).unwrap();
    let b = lifted.video_3d_lut(VideoPrimaries::Bt709).unwrap();
    assert!(b.clut.get(0, 0, 0)[1] > a.clut.get(0, 0, 0)[1]);
    assert!(near(b.clut.get(4, 4, 4), [65535; 3], 16));
}

#[test]
fn checks_during_regeneration_see_whole_configurations() {
    let settings = Arc::new(SharedSettings::new(icc_settings(5)));
    let engine = MatrixEngine {
        delay: Duration::from_millis(5),
        ..Default::default()
    };
    let cms = Arc::new(ColorManager::new(settings, engine));
    let first = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap().token;

    let renderers: Vec<_> = (0..4)
        .map(|_| {
            let cms = Arc::clone(&cms);
            std::thread::spawn(move || {
                let mut seen = first;
                for _ in 0..200 {
                    let config = cms.configuration().unwrap();
                    assert!(config.token >= seen);
                    assert_eq!(config.clut_size, 5);
                    assert_eq!(config.key.video_primaries, VideoPrimaries::Bt709);
                    seen = config.token;
                }
            })
        })
        .collect();

    let mut last = first;
    for _ in 0..10 {
        last = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap().token;
    }
    for r in renderers {
        r.join().unwrap();
    }

    assert!(cms.check_configuration(last, VideoPrimaries::Bt709));
    assert!(!cms.check_configuration(first, VideoPrimaries::Bt709));
}

fn cms_engine_opened(cms: &Manager) -> usize {
    cms.engine().opened()
}
