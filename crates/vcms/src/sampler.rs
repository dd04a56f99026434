//! Sampling a linked transform into a 3D LUT.

use crate::{CmsError, CmsResult};
use tracing::debug;
use vcms_icc::ColorEngine;
use vcms_lut::{Clut3D, MAX_SIZE, MIN_SIZE, grid_value};

/// Input triples of a cube of `resolution`, in [`Clut3D`] order.
pub fn grid_input(resolution: usize) -> Vec<[u16; 3]> {
    let mut input = Vec::with_capacity(resolution * resolution * resolution);
    for b in 0..resolution {
        for g in 0..resolution {
            for r in 0..resolution {
                input.push([
                    grid_value(r, resolution),
                    grid_value(g, resolution),
                    grid_value(b, resolution),
                ]);
            }
        }
    }
    input
}

/// Samples `transform` on a uniform grid of `resolution` points per axis.
///
/// The whole grid goes through the engine as one batch.
///
/// # Errors
///
/// [`CmsError::Settings`] for a resolution outside `2..=256`; the engine's
/// error if the batch fails. No partial grid is returned.
pub fn sample<E: ColorEngine>(
    engine: &E,
    transform: &E::Transform,
    resolution: usize,
) -> CmsResult<Clut3D> {
    if !(MIN_SIZE..=MAX_SIZE).contains(&resolution) {
        return Err(CmsError::Settings(format!(
            "resolution {} outside {}..={}",
            resolution, MIN_SIZE, MAX_SIZE
        )));
    }

    let input = grid_input(resolution);
    let mut output = vec![[0u16; 3]; input.len()];
    engine.apply(transform, &input, &mut output)?;
    debug!(resolution, entries = output.len(), "Sampled transform");

    Ok(Clut3D::from_entries(output, resolution)?)
}
