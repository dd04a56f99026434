//! 16-bit color transforms between ICC profiles.

use crate::profile::context;
use crate::{IccError, IccResult, Intent, Profile};
use lcms2::{PixelFormat, ThreadContext, Transform as LcmsTransform};

/// A color transform from a source profile to a display profile.
///
/// Works on 16-bit RGB triples, the precision of the lookup tables it fills.
/// Absolute colorimetric links do not adapt the observer (see
/// [`ADAPTATION_STATE`](crate::ADAPTATION_STATE)), so a source white that
/// differs from the display white stays visible.
///
/// # Example
///
/// ```rust
/// use vcms_icc::{Intent, Profile, Transform};
/// use vcms_primaries::{BT709, D65_XY};
///
/// let src = Profile::linear(D65_XY, &BT709).unwrap();
/// let dst = Profile::linear(D65_XY, &BT709).unwrap();
/// let transform = Transform::new(&src, &dst, Intent::AbsoluteColorimetric).unwrap();
///
/// let white = transform.apply_pixel([65535, 65535, 65535]);
/// assert!(white.iter().all(|&v| v > 65000));
/// ```
pub struct Transform {
    inner: LcmsTransform<[u16; 3], [u16; 3], ThreadContext>,
    // Dropped after `inner`
    _context: ThreadContext,
}

impl Transform {
    /// Links two profiles.
    ///
    /// # Errors
    ///
    /// Returns [`IccError::TransformFailed`] if the profiles cannot be linked.
    pub fn new(source: &Profile, dest: &Profile, intent: Intent) -> IccResult<Self> {
        let context = context();
        let inner = LcmsTransform::new_context(
            &context,
            &source.inner,
            PixelFormat::RGB_16,
            &dest.inner,
            PixelFormat::RGB_16,
            intent.into(),
        )
        .map_err(|e| IccError::TransformFailed(e.to_string()))?;

        Ok(Self {
            inner,
            _context: context,
        })
    }

    /// Transforms pixels from source to destination buffer.
    ///
    /// # Errors
    ///
    /// Returns [`IccError::ApplyFailed`] if the buffers differ in length.
    pub fn apply(&self, source: &[[u16; 3]], dest: &mut [[u16; 3]]) -> IccResult<()> {
        if source.len() != dest.len() {
            return Err(IccError::ApplyFailed(format!(
                "{} input pixels, {} output slots",
                source.len(),
                dest.len()
            )));
        }
        self.inner.transform_pixels(source, dest);
        Ok(())
    }

    /// Transforms a single RGB pixel.
    pub fn apply_pixel(&self, rgb: [u16; 3]) -> [u16; 3] {
        let mut out = [[0u16; 3]];
        self.inner.transform_pixels(&[rgb], &mut out);
        out[0]
    }
}

impl std::fmt::Debug for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transform").finish_non_exhaustive()
    }
}
