//! # vcms-primaries
//!
//! Video color primaries, reference whitepoints, and RGB-XYZ matrix generation.
//!
//! The video renderer describes an incoming stream by one of a handful of
//! broadcast primaries sets. This crate maps each of them to its standard CIE
//! xy chromaticities so a source profile can be synthesized for it.
//!
//! # Included Primaries
//!
//! | Primaries | Standard | Typical Source |
//! |-----------|----------|----------------|
//! | BT.709 | ITU-R BT.709 | HDTV |
//! | 170M | SMPTE 170M | SDTV (NTSC) |
//! | BT.470M | ITU-R BT.470 System M | 1953 NTSC |
//! | BT.470BG | ITU-R BT.470 System B/G | PAL/SECAM |
//! | 240M | SMPTE 240M | 1988 HDTV |
//!
//! # Usage
//!
//! ```rust
//! use vcms_primaries::{VideoPrimaries, Whitepoint, rgb_to_xyz_matrix};
//! use glam::DVec3;
//!
//! let video = VideoPrimaries::Auto.resolve(VideoPrimaries::Bt709);
//! let primaries = video.primaries().unwrap();
//!
//! let m = rgb_to_xyz_matrix(&primaries, Whitepoint::D65.chromaticity());
//! let white = m * DVec3::ONE;
//! assert!((white.y - 1.0).abs() < 1e-6);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - Matrix math
//! - [`serde`] - Settings (de)serialization of the enumerations
//!
//! # Used By
//!
//! - `vcms-icc` - Source profile synthesis
//! - `vcms` - Configuration keys and settings

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A CIE 1931 xy chromaticity coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chromaticity {
    /// x coordinate
    pub x: f64,
    /// y coordinate
    pub y: f64,
}

impl Chromaticity {
    /// Creates a chromaticity from its x and y coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// XYZ tristimulus with Y normalized to 1.
    #[inline]
    pub fn to_xyz(self) -> DVec3 {
        if self.y.abs() < 1e-10 {
            DVec3::ZERO
        } else {
            DVec3::new(self.x / self.y, 1.0, (1.0 - self.x - self.y) / self.y)
        }
    }
}

/// Chromaticities of the three RGB primaries of a color space.
///
/// The whitepoint is kept separate: a source profile pairs any primaries set
/// with the whitepoint chosen in the display settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary
    pub r: Chromaticity,
    /// Green primary
    pub g: Chromaticity,
    /// Blue primary
    pub b: Chromaticity,
    /// Primaries name
    pub name: &'static str,
}

// ============================================================================
// Standard Primaries
// ============================================================================

/// ITU-R BT.709 primaries (HDTV).
pub const BT709: Primaries = Primaries {
    r: Chromaticity::new(0.640, 0.330),
    g: Chromaticity::new(0.300, 0.600),
    b: Chromaticity::new(0.150, 0.060),
    name: "BT.709",
};

/// SMPTE 170M primaries (SDTV).
pub const SMPTE_170M: Primaries = Primaries {
    r: Chromaticity::new(0.630, 0.340),
    g: Chromaticity::new(0.310, 0.595),
    b: Chromaticity::new(0.155, 0.070),
    name: "SMPTE 170M",
};

/// ITU-R BT.470 System M primaries (NTSC 1953).
pub const BT470M: Primaries = Primaries {
    r: Chromaticity::new(0.670, 0.330),
    g: Chromaticity::new(0.210, 0.710),
    b: Chromaticity::new(0.140, 0.080),
    name: "BT.470M",
};

/// ITU-R BT.470 System B/G primaries (PAL/SECAM).
pub const BT470BG: Primaries = Primaries {
    r: Chromaticity::new(0.640, 0.330),
    g: Chromaticity::new(0.290, 0.600),
    b: Chromaticity::new(0.150, 0.060),
    name: "BT.470BG",
};

/// SMPTE 240M primaries (1988 HDTV). Same chromaticities as 170M.
pub const SMPTE_240M: Primaries = Primaries {
    r: Chromaticity::new(0.630, 0.340),
    g: Chromaticity::new(0.310, 0.595),
    b: Chromaticity::new(0.155, 0.070),
    name: "SMPTE 240M",
};

// ============================================================================
// Video Primaries
// ============================================================================

/// Primaries of an incoming video signal, or of the ICC-mode source space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VideoPrimaries {
    /// Not specified; resolved by the color manager.
    #[default]
    #[serde(rename = "auto")]
    Auto,
    /// ITU-R BT.709.
    #[serde(rename = "bt709")]
    Bt709,
    /// SMPTE 170M.
    #[serde(rename = "smpte170m")]
    Smpte170m,
    /// ITU-R BT.470 System M.
    #[serde(rename = "bt470m")]
    Bt470m,
    /// ITU-R BT.470 System B/G.
    #[serde(rename = "bt470bg")]
    Bt470bg,
    /// SMPTE 240M.
    #[serde(rename = "smpte240m")]
    Smpte240m,
}

impl VideoPrimaries {
    /// All concrete (non-auto) primaries.
    pub const ALL: [VideoPrimaries; 5] = [
        VideoPrimaries::Bt709,
        VideoPrimaries::Smpte170m,
        VideoPrimaries::Bt470m,
        VideoPrimaries::Bt470bg,
        VideoPrimaries::Smpte240m,
    ];

    /// Chromaticities for these primaries, `None` for [`VideoPrimaries::Auto`].
    pub const fn primaries(self) -> Option<Primaries> {
        match self {
            VideoPrimaries::Auto => None,
            VideoPrimaries::Bt709 => Some(BT709),
            VideoPrimaries::Smpte170m => Some(SMPTE_170M),
            VideoPrimaries::Bt470m => Some(BT470M),
            VideoPrimaries::Bt470bg => Some(BT470BG),
            VideoPrimaries::Smpte240m => Some(SMPTE_240M),
        }
    }

    /// Replaces `Auto` with `fallback`, leaving concrete values untouched.
    #[inline]
    pub const fn resolve(self, fallback: VideoPrimaries) -> VideoPrimaries {
        match self {
            VideoPrimaries::Auto => fallback,
            other => other,
        }
    }

    /// Returns true for [`VideoPrimaries::Auto`].
    #[inline]
    pub const fn is_auto(self) -> bool {
        matches!(self, VideoPrimaries::Auto)
    }

    /// Short identifier as used in settings files.
    pub const fn as_str(self) -> &'static str {
        match self {
            VideoPrimaries::Auto => "auto",
            VideoPrimaries::Bt709 => "bt709",
            VideoPrimaries::Smpte170m => "smpte170m",
            VideoPrimaries::Bt470m => "bt470m",
            VideoPrimaries::Bt470bg => "bt470bg",
            VideoPrimaries::Smpte240m => "smpte240m",
        }
    }
}

impl fmt::Display for VideoPrimaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown primaries or whitepoint name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownName(pub String);

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown name: {}", self.0)
    }
}

impl std::error::Error for UnknownName {}

impl FromStr for VideoPrimaries {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['.', '-', '_'], "").as_str() {
            "auto" => Ok(VideoPrimaries::Auto),
            "bt709" | "rec709" => Ok(VideoPrimaries::Bt709),
            "smpte170m" | "170m" => Ok(VideoPrimaries::Smpte170m),
            "bt470m" => Ok(VideoPrimaries::Bt470m),
            "bt470bg" => Ok(VideoPrimaries::Bt470bg),
            "smpte240m" | "240m" => Ok(VideoPrimaries::Smpte240m),
            _ => Err(UnknownName(s.to_string())),
        }
    }
}

// ============================================================================
// Whitepoints
// ============================================================================

/// Reference white for ICC-profile mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Whitepoint {
    /// CIE D65 (~6500K), the broadcast reference.
    #[default]
    #[serde(rename = "d65")]
    D65,
    /// D93 (~9300K), used by some East Asian broadcast monitors.
    #[serde(rename = "d93")]
    D93,
}

/// D65 white point chromaticity.
pub const D65_XY: Chromaticity = Chromaticity::new(0.3127, 0.3290);

/// D93 white point chromaticity.
pub const D93_XY: Chromaticity = Chromaticity::new(0.2831, 0.2971);

impl Whitepoint {
    /// Chromaticity of this whitepoint.
    pub const fn chromaticity(self) -> Chromaticity {
        match self {
            Whitepoint::D65 => D65_XY,
            Whitepoint::D93 => D93_XY,
        }
    }

    /// Short identifier as used in settings files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Whitepoint::D65 => "d65",
            Whitepoint::D93 => "d93",
        }
    }
}

impl fmt::Display for Whitepoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Whitepoint {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "d65" => Ok(Whitepoint::D65),
            "d93" => Ok(Whitepoint::D93),
            _ => Err(UnknownName(s.to_string())),
        }
    }
}

// ============================================================================
// Matrix Generation
// ============================================================================

/// Computes the RGB to XYZ matrix for a set of primaries and a whitepoint.
///
/// # Algorithm
///
/// 1. Convert xy chromaticities to XYZ (with Y=1)
/// 2. Compute scaling factors so white maps to the whitepoint
/// 3. Multiply primaries by scaling factors
pub fn rgb_to_xyz_matrix(primaries: &Primaries, white: Chromaticity) -> DMat3 {
    let r_xyz = primaries.r.to_xyz();
    let g_xyz = primaries.g.to_xyz();
    let b_xyz = primaries.b.to_xyz();
    let w_xyz = white.to_xyz();

    let m = DMat3::from_cols(r_xyz, g_xyz, b_xyz);
    let m_inv = if m.determinant().abs() < 1e-12 {
        DMat3::IDENTITY
    } else {
        m.inverse()
    };
    let s = m_inv * w_xyz;

    DMat3::from_cols(r_xyz * s.x, g_xyz * s.y, b_xyz * s.z)
}
