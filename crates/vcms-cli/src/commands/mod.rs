//! CLI command implementations

pub mod bake;
pub mod identity;
pub mod probe;

use anyhow::{Context, Result};
use std::path::Path;
use vcms::Clut3D;
use vcms_lut::threedlut;

/// Save LUT to path
pub fn save_lut(path: &Path, lut: &Clut3D, params: &str) -> Result<()> {
    threedlut::write(path, lut, params)
        .with_context(|| format!("Failed to write: {}", path.display()))
}
