//! ICC-profile mode against Little CMS.

mod common;

use common::{icc_settings, near};
use std::sync::Arc;
use vcms::{
    CmsSettings, ColorManager, ErrorKind, Lcms, SettingsSource, SharedSettings, VideoPrimaries,
    Whitepoint,
};
use vcms_icc::{Profile, ToneCurve, Trc};
use vcms_primaries::{BT470M, BT709, D65_XY};

#[test]
fn reference_display_bt709() {
    let cms = ColorManager::new(icc_settings(17), Lcms);
    let lut = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();

    assert_eq!(lut.clut.size(), 17);
    assert_eq!(lut.clut.entry_count(), 4913);
    assert_eq!(cms.configuration().unwrap().clut_size, 17);

    assert!(near(lut.clut.get(0, 0, 0), [0; 3], 64), "black -> {:?}", lut.clut.get(0, 0, 0));
    assert!(near(lut.clut.get(16, 16, 16), [65535; 3], 300));
    assert!(cms.check_configuration(lut.token, VideoPrimaries::Bt709));
}

#[test]
fn display_profile_from_file() {
    let (_dir, path) = write_d65_display();

    let settings = CmsSettings {
        icc_profile: path,
        ..icc_settings(9)
    };
    let cms = ColorManager::new(settings, Lcms);

    let bt709 = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();
    let pal = cms.video_3d_lut(VideoPrimaries::Bt470bg).unwrap();
    assert!(near(bt709.clut.get(8, 8, 8), [65535; 3], 300));

    // BT.470BG green differs from BT.709 green
    assert_ne!(bt709.clut.get(0, 8, 0), pal.clut.get(0, 8, 0));
    assert!(cms.check_configuration(pal.token, VideoPrimaries::Bt470bg));
}

#[test]
fn whitepoint_reaches_display_white() {
    let (_dir, path) = write_d65_display();
    let settings = Arc::new(SharedSettings::new(CmsSettings {
        icc_profile: path,
        ..icc_settings(9)
    }));
    let cms = ColorManager::new(Arc::clone(&settings), Lcms);

    let d65 = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();
    assert!(near(d65.clut.get(8, 8, 8), [65535; 3], 300));

    settings.update(|s| s.whitepoint = Whitepoint::D93);
    assert!(!cms.check_configuration(d65.token, VideoPrimaries::Bt709));
    let d93 = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();

    let white = d93.clut.get(8, 8, 8);
    assert!(white[2] > white[0] + 2000, "D93 white -> {:?}", white);
    let grey = d93.clut.get(4, 4, 4);
    assert!(grey[2] > grey[0], "D93 grey -> {:?}", grey);
}

#[test]
fn recalibrated_display_file_is_reloaded() {
    let (_dir, path) = write_d65_display();
    let settings = Arc::new(SharedSettings::new(CmsSettings {
        icc_profile: path.clone(),
        ..icc_settings(9)
    }));
    let cms = ColorManager::new(Arc::clone(&settings), Lcms);
    cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();

    // New measurement written over the old file
    let curve = ToneCurve::new(Trc::Bt1886, 0.0).unwrap();
    let wide = Profile::rgb(D65_XY, &BT470M, &curve).unwrap();
    std::fs::write(&path, wide.to_icc().unwrap()).unwrap();
    settings.update(|s| s.whitepoint = Whitepoint::D93);

    let cached = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap();
    let fresh = ColorManager::new(settings.settings(), Lcms)
        .video_3d_lut(VideoPrimaries::Bt709)
        .unwrap();
    assert_eq!(cached.clut, fresh.clut);
}

#[test]
fn unreadable_display_profile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.icc");
    std::fs::write(&path, b"definitely not ICC").unwrap();

    let cms = ColorManager::new(
        CmsSettings {
            icc_profile: path,
            ..icc_settings(5)
        },
        Lcms,
    );
    let err = cms.video_3d_lut(VideoPrimaries::Bt709).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Profile);
    assert!(cms.configuration().is_none());
}

fn write_d65_display() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("d65.icc");
    let curve = ToneCurve::new(Trc::Bt1886, 0.0).unwrap();
    let display = Profile::rgb(D65_XY, &BT709, &curve).unwrap();
    std::fs::write(&path, display.to_icc().unwrap()).unwrap();
    (dir, path)
}
