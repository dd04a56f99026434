//! Shared test fixtures.

#![allow(dead_code)]

use glam::{DMat3, DVec3};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use vcms::{CmsMode, CmsSettings, Intent, TrcType};
use vcms_icc::{ColorEngine, IccError, IccResult, ToneCurve, Trc, Xyz};
use vcms_lut::Clut3D;
use vcms_primaries::{BT709, Chromaticity, D65_XY, Primaries, rgb_to_xyz_matrix};

/// Matrix/curve profile.
#[derive(Debug, Clone)]
pub struct MatrixProfile {
    pub to_xyz: DMat3,
    pub curve: ToneCurve,
}

/// Source decode, matrix, display encode.
#[derive(Debug)]
pub struct MatrixLink {
    source: MatrixProfile,
    xyz_to_display: DMat3,
    display_curve: ToneCurve,
}

/// Colorimetric engine built from 3x3 matrices and tone curves.
///
/// Display profiles "open" from any existing file as a BT.709 D65 BT.1886
/// display, so tests do not need real ICC data.
#[derive(Debug, Default)]
pub struct MatrixEngine {
    pub black_y: f64,
    pub delay: Duration,
    pub opened: AtomicUsize,
    pub batches: AtomicUsize,
}

impl MatrixEngine {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn batches(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }
}

impl ColorEngine for MatrixEngine {
    type Profile = MatrixProfile;
    type Transform = MatrixLink;

    fn rgb_profile(
        &self,
        white: Chromaticity,
        primaries: &Primaries,
        curve: &ToneCurve,
    ) -> IccResult<MatrixProfile> {
        Ok(MatrixProfile {
            to_xyz: rgb_to_xyz_matrix(primaries, white),
            curve: curve.clone(),
        })
    }

    fn open_profile(&self, path: &Path) -> IccResult<MatrixProfile> {
        if !path.is_file() {
            return Err(IccError::LoadFailed(path.display().to_string()));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        self.rgb_profile(D65_XY, &BT709, &ToneCurve::new(Trc::Bt1886, 0.0)?)
    }

    fn black_point(&self, _profile: &MatrixProfile) -> Xyz {
        Xyz::new(0.0, self.black_y, 0.0)
    }

    fn link(
        &self,
        source: &MatrixProfile,
        display: &MatrixProfile,
        _intent: Intent,
    ) -> IccResult<MatrixLink> {
        if display.to_xyz.determinant().abs() < 1e-12 {
            return Err(IccError::TransformFailed("singular display matrix".into()));
        }
        Ok(MatrixLink {
            source: source.clone(),
            xyz_to_display: display.to_xyz.inverse(),
            display_curve: display.curve.clone(),
        })
    }

    fn apply(
        &self,
        link: &MatrixLink,
        input: &[[u16; 3]],
        output: &mut [[u16; 3]],
    ) -> IccResult<()> {
        if input.len() != output.len() {
            return Err(IccError::ApplyFailed("length mismatch".into()));
        }
        self.batches.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);

        for (src, dst) in input.iter().zip(output.iter_mut()) {
            let decode = |v: u16| link.source.curve.eval(v as f32 / 65535.0) as f64;
            let linear = DVec3::new(decode(src[0]), decode(src[1]), decode(src[2]));
            let display = link.xyz_to_display * (link.source.to_xyz * linear);
            let encode = |v: f64| {
                let e = invert(&link.display_curve, v.clamp(0.0, 1.0) as f32);
                (e * 65535.0).round() as u16
            };
            *dst = [encode(display.x), encode(display.y), encode(display.z)];
        }
        Ok(())
    }
}

/// Inverse of a monotonic curve by bisection.
fn invert(curve: &ToneCurve, y: f32) -> f32 {
    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    for _ in 0..30 {
        let mid = 0.5 * (lo + hi);
        if curve.eval(mid) < y {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

/// ICC-mode settings against the reference display.
pub fn icc_settings(resolution: usize) -> CmsSettings {
    CmsSettings {
        enabled: true,
        mode: CmsMode::IccProfile,
        gamma_mode: TrcType::Bt1886,
        gamma: 240,
        resolution,
        ..Default::default()
    }
}

/// LUT-file-mode settings.
pub fn lut_settings(path: &Path) -> CmsSettings {
    CmsSettings {
        enabled: true,
        mode: CmsMode::LutFile,
        lut_file: path.to_path_buf(),
        ..Default::default()
    }
}

/// A non-identity cube with distinct values everywhere.
pub fn graded_cube(size: usize) -> Clut3D {
    let mut entries = Vec::with_capacity(size * size * size);
    for b in 0..size {
        for g in 0..size {
            for r in 0..size {
                entries.push([
                    (r * 1000 + g) as u16,
                    (g * 1000 + b) as u16,
                    (b * 1000 + r) as u16,
                ]);
            }
        }
    }
    Clut3D::from_entries(entries, size).unwrap()
}

pub fn near(a: [u16; 3], b: [u16; 3], tol: i32) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(&x, &y)| (x as i32 - y as i32).abs() <= tol)
}
