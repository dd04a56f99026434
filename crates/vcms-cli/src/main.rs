//! vcms - display color management LUT tool
//!
//! Inspects `.3dlut` files and bakes display-correction LUTs from settings.

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vcms_primaries::VideoPrimaries;

mod commands;

#[derive(Parser)]
#[command(name = "vcms")]
#[command(author, version, about = "Display color management LUT tool")]
#[command(long_about = "
Inspect and bake display-correction 3D LUTs for video playback.

Examples:
  vcms probe display.3dlut               # Show header
  vcms bake -c cms.yaml -o display.3dlut # Bake from settings
  vcms bake -p bt470bg -o pal.3dlut      # Reference display, PAL source
  vcms identity -s 33 -o identity.3dlut  # Pass-through LUT
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the header of .3dlut files
    #[command(visible_alias = "p")]
    Probe(ProbeArgs),

    /// Bake a display-correction LUT from settings
    #[command(visible_alias = "b")]
    Bake(BakeArgs),

    /// Write an identity LUT
    Identity(IdentityArgs),
}

#[derive(Args)]
struct ProbeArgs {
    /// Input .3dlut file(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

#[derive(Args)]
struct BakeArgs {
    /// Settings file (YAML); defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Video primaries of the stream
    #[arg(short, long, default_value = "bt709")]
    primaries: VideoPrimaries,

    /// Output .3dlut file
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct IdentityArgs {
    /// Cube resolution
    #[arg(short, long, default_value = "64")]
    size: usize,

    /// Output .3dlut file
    #[arg(short, long)]
    output: PathBuf,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Probe(args) => commands::probe::run(args, cli.verbose),
        Commands::Bake(args) => commands::bake::run(args, cli.verbose),
        Commands::Identity(args) => commands::identity::run(args, cli.verbose),
    }
}
