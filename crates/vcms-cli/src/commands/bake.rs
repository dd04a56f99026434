//! LUT baking command

use crate::BakeArgs;
use anyhow::{Context, Result};
use tracing::info;
use vcms::{CmsMode, CmsSettings, ColorManager, Lcms};

pub fn run(args: BakeArgs, verbose: u8) -> Result<()> {
    let settings = match &args.config {
        Some(path) => CmsSettings::from_file(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?,
        None => CmsSettings::default(),
    };

    if verbose > 0 {
        match settings.mode {
            CmsMode::LutFile => println!("Loading {}", settings.lut_file.display()),
            CmsMode::IccProfile => println!(
                "Baking {}^3 LUT: {} source, {} white, {:?} curve",
                settings.resolution, args.primaries, settings.whitepoint, settings.trc()
            ),
        }
    }

    let params = format!(
        "vcms {} primaries={} mode={:?}",
        env!("CARGO_PKG_VERSION"),
        args.primaries,
        settings.mode
    );

    let cms = ColorManager::new(settings, Lcms);
    let lut = cms
        .video_3d_lut(args.primaries)
        .context("Failed to generate LUT")?;

    super::save_lut(&args.output, &lut.clut, &params)?;
    info!(output = %args.output.display(), size = lut.clut.size(), "Baked LUT");

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}
