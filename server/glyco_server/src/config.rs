//! Command-line configuration and logger bootstrap.

use clap::Parser;
use glyco_ai::{ArtifactPaths, DEFAULT_ARTIFACT_DIR};
use log::LevelFilter;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "glyco_server",
    version,
    about = "Serve the diabetes risk classifier over HTTP",
    long_about = "Loads the trained artifacts once at startup and serves:\n\n\
        \n  GET  /          HTML form for manual testing\
        \n  POST /predict   JSON prediction endpoint\
        \n  GET  /health    liveness probe"
)]
pub struct Cli {
    /// Directory holding diabetes_model.json, scaler.json, le_gender.json and column_means.json
    #[arg(long, value_name = "DIR", default_value = DEFAULT_ARTIFACT_DIR)]
    pub artifacts: PathBuf,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::in_dir(&self.artifacts)
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Install `env_logger`. `RUST_LOG`, when set, overrides the `-v` level.
pub fn init_logging(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    let _ = builder.try_init();
}
