//! LUT file inspection command

use crate::ProbeArgs;
use anyhow::{Context, Result, bail};
use tracing::debug;
use vcms_lut::threedlut;

pub fn run(args: ProbeArgs, verbose: u8) -> Result<()> {
    let mut failed = 0usize;

    for path in &args.input {
        match threedlut::probe(path) {
            Ok(header) => {
                println!("{}", path.display());
                println!("  version:     {}", header.version);
                println!("  resolution:  {}", header.resolution);
                println!("  bit depth:   {}", header.bit_depth);
                println!("  data offset: {}", header.data_offset);
                println!("  size:        {} bytes", header.file_len());

                if verbose > 0 {
                    let params = threedlut::read_params(path)
                        .with_context(|| format!("Failed to read: {}", path.display()))?;
                    if !params.is_empty() {
                        println!("  parameters:  {}", params.trim_end());
                    }
                }
            }
            Err(e) => {
                debug!(path = %path.display(), "Probe failed");
                eprintln!("{}: {}", path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} file(s) invalid", failed, args.input.len());
    }
    Ok(())
}
