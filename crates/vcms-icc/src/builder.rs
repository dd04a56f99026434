//! Source profile synthesis and transform linking.

use crate::{ColorEngine, IccError, IccResult, Intent, ToneCurve, Trc, Xyz};
use tracing::debug;
use vcms_primaries::{VideoPrimaries, Whitepoint};

/// Builds the tone curve for `trc` on a display with black point `black`.
pub fn create_tone_curve(trc: Trc, black: Xyz) -> IccResult<ToneCurve> {
    ToneCurve::new(trc, black.y)
}

/// Synthesizes the profile of the idealized video source.
///
/// # Errors
///
/// [`IccError::CreateFailed`] for [`VideoPrimaries::Auto`], which must be
/// resolved by the caller, or when the engine rejects the profile.
pub fn create_source_profile<E: ColorEngine>(
    engine: &E,
    primaries: VideoPrimaries,
    curve: &ToneCurve,
    whitepoint: Whitepoint,
) -> IccResult<E::Profile> {
    let chroma = primaries.primaries().ok_or_else(|| {
        IccError::CreateFailed("source primaries must be resolved before use".into())
    })?;
    debug!(%primaries, %whitepoint, trc = ?curve.trc(), "Creating source profile");
    engine.rgb_profile(whitepoint.chromaticity(), &chroma, curve)
}

/// Synthesizes a reference BT.1886 display with zero black.
///
/// Used in place of a display profile when none is configured.
pub fn create_reference_display<E: ColorEngine>(
    engine: &E,
    primaries: VideoPrimaries,
    whitepoint: Whitepoint,
) -> IccResult<E::Profile> {
    let curve = ToneCurve::new(Trc::Bt1886, 0.0)?;
    create_source_profile(engine, primaries, &curve, whitepoint)
}

/// Black point of the display, Y relative to display white.
pub fn detect_black_point<E: ColorEngine>(engine: &E, display: &E::Profile) -> Xyz {
    let black = engine.black_point(display);
    debug!(x = black.x, y = black.y, z = black.z, "Display black point");
    black
}

/// Links the source profile to the display profile.
///
/// Failures propagate; no identity transform is substituted.
pub fn build_transform<E: ColorEngine>(
    engine: &E,
    source: &E::Profile,
    display: &E::Profile,
    intent: Intent,
) -> IccResult<E::Transform> {
    debug!(?intent, "Linking source to display");
    engine.link(source, display, intent)
}
