//! Identity LUT command

use crate::IdentityArgs;
use anyhow::{Context, Result};
use vcms::Clut3D;

pub fn run(args: IdentityArgs, verbose: u8) -> Result<()> {
    let lut = Clut3D::identity(args.size).context("Invalid LUT size")?;
    super::save_lut(&args.output, &lut, "identity")?;

    if verbose > 0 {
        println!("Wrote {}^3 identity LUT to {}", args.size, args.output.display());
    }
    Ok(())
}
