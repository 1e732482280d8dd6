use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "alien-invaders")]
#[command(version, about = "Hold the defense line against a marching alien formation")]
pub struct Args {
    /// Seed for alien fire; drawn at random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frame period in milliseconds
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..=1000))]
    pub tick_ms: u64,

    /// Start with sound cues switched off
    #[arg(long)]
    pub muted: bool,

    /// Write logs here (filter with RUST_LOG); logging is off otherwise
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
