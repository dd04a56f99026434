//! Tone reproduction curves for synthesized source profiles.
//!
//! The curve describes how the idealized video signal becomes light on the
//! calibrated display. Four constructions are supported:
//!
//! | Type | Formula | Gamma |
//! |------|---------|-------|
//! | BT.1886 | `a * (x + b)^2.4` | fixed 2.4 |
//! | Input offset | `a * (x + b)^g` | caller |
//! | Output offset | `k + (1 - k) * x^g` | caller |
//! | Absolute | `x^g` | caller |
//!
//! where `k` is the display black level and `a`, `b` are derived from it so
//! that 0 maps to black and 1 maps to white (ITU-R BT.1886 Annex 1).

use crate::{IccError, IccResult};
use serde::{Deserialize, Serialize};

/// Number of entries in a tabulated tone curve.
pub const TABLE_SIZE: usize = 1024;

/// Highest black level accepted; darker than this is clamped.
const MAX_BLACK: f64 = 0.999;

/// Tone curve construction, as stored in the display settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrcType {
    /// ITU-R BT.1886 with the reference 2.4 gamma.
    #[default]
    Bt1886,
    /// BT.1886-style input offset with a custom gamma.
    InputOffset,
    /// Black level added on the output side.
    OutputOffset,
    /// Pure power law, black level ignored.
    Absolute,
}

/// A tone curve construction with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trc {
    /// BT.1886, gamma 2.4.
    Bt1886,
    /// Offset applied to the input signal.
    InputOffset {
        /// Exponent
        gamma: f64,
    },
    /// Offset applied to the output light.
    OutputOffset {
        /// Exponent
        gamma: f64,
    },
    /// Pure power law.
    Absolute {
        /// Exponent
        gamma: f64,
    },
}

impl Trc {
    /// BT.1886 reference gamma.
    pub const BT1886_GAMMA: f64 = 2.4;

    /// Builds a curve description from settings, gamma given as gamma x 100.
    ///
    /// BT.1886 ignores the gamma setting.
    pub fn from_settings(kind: TrcType, gamma_x100: u32) -> Self {
        let gamma = gamma_x100 as f64 / 100.0;
        match kind {
            TrcType::Bt1886 => Trc::Bt1886,
            TrcType::InputOffset => Trc::InputOffset { gamma },
            TrcType::OutputOffset => Trc::OutputOffset { gamma },
            TrcType::Absolute => Trc::Absolute { gamma },
        }
    }

    /// Settings kind of this curve.
    pub fn kind(&self) -> TrcType {
        match self {
            Trc::Bt1886 => TrcType::Bt1886,
            Trc::InputOffset { .. } => TrcType::InputOffset,
            Trc::OutputOffset { .. } => TrcType::OutputOffset,
            Trc::Absolute { .. } => TrcType::Absolute,
        }
    }

    /// Effective exponent.
    pub fn gamma(&self) -> f64 {
        match *self {
            Trc::Bt1886 => Self::BT1886_GAMMA,
            Trc::InputOffset { gamma } | Trc::OutputOffset { gamma } | Trc::Absolute { gamma } => {
                gamma
            }
        }
    }
}

/// A tabulated tone curve over `[0, 1]`.
///
/// # Example
///
/// ```rust
/// use vcms_icc::{ToneCurve, Trc};
///
/// let curve = ToneCurve::new(Trc::Bt1886, 0.0).unwrap();
/// assert_eq!(curve.eval(0.0), 0.0);
/// assert!((curve.eval(1.0) - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ToneCurve {
    trc: Trc,
    table: Vec<f32>,
}

impl ToneCurve {
    /// Builds the curve for `trc` on a display whose black level is `black_y`
    /// (luminance relative to white).
    ///
    /// # Errors
    ///
    /// Returns [`IccError::InvalidCurve`] if the gamma is not finite or lies
    /// outside `(0, 10]`.
    pub fn new(trc: Trc, black_y: f64) -> IccResult<Self> {
        let gamma = trc.gamma();
        if !gamma.is_finite() || gamma <= 0.0 || gamma > 10.0 {
            return Err(IccError::InvalidCurve(format!("gamma {} out of range", gamma)));
        }
        let black = if black_y.is_finite() {
            black_y.clamp(0.0, MAX_BLACK)
        } else {
            0.0
        };

        let table = match trc {
            Trc::Bt1886 | Trc::InputOffset { .. } => {
                let k = black.powf(1.0 / gamma);
                let a = (1.0 - k).powf(gamma);
                let b = k / (1.0 - k);
                tabulate(|x| a * (x + b).powf(gamma))
            }
            Trc::OutputOffset { .. } => tabulate(|x| black + (1.0 - black) * x.powf(gamma)),
            Trc::Absolute { .. } => tabulate(|x| x.powf(gamma)),
        };

        Ok(Self { trc, table })
    }

    /// Identity curve (gamma 1.0).
    pub fn linear() -> Self {
        Self {
            trc: Trc::Absolute { gamma: 1.0 },
            table: tabulate(|x| x),
        }
    }

    /// Curve description this table was built from.
    #[inline]
    pub fn trc(&self) -> Trc {
        self.trc
    }

    /// Tabulated values, [`TABLE_SIZE`] entries.
    #[inline]
    pub fn table(&self) -> &[f32] {
        &self.table
    }

    /// Evaluates the curve with linear interpolation; input is clamped to `[0, 1]`.
    pub fn eval(&self, x: f32) -> f32 {
        let n = (self.table.len() - 1) as f32;
        let pos = x.clamp(0.0, 1.0) * n;
        let i = (pos.floor() as usize).min(self.table.len() - 2);
        let t = pos - i as f32;
        self.table[i] * (1.0 - t) + self.table[i + 1] * t
    }
}

fn tabulate(f: impl Fn(f64) -> f64) -> Vec<f32> {
    (0..TABLE_SIZE)
        .map(|i| f(i as f64 / (TABLE_SIZE - 1) as f64) as f32)
        .collect()
}
