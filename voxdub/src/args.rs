use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// English to Hindi speech dubbing service
#[derive(Debug, Parser)]
#[command(name = "voxdub", about = "Dub English speech into Hindi speech over HTTP")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "voxdub.toml", env = "VOXDUB_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "VOXDUB_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter, e.g. `info` or `voxdub_pipeline=debug`
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log: String,
}
