use std::path::PathBuf;

use clap::Parser;

/// Restyle portrait regenerator
#[derive(Debug, Parser)]
#[command(name = "restyle", about = "Turn one portrait into ten styled variants")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "restyle.toml", env = "RESTYLE_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "RESTYLE_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
