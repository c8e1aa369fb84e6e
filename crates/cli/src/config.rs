//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

use stockroom_observability::{LogConfig, LogFormat};

/// Interactive inventory tracker.
#[derive(Parser, Debug, Clone)]
#[command(name = "stockroom", version, about)]
pub struct Args {
    /// Catalog file to load before the menu starts
    #[arg(short, long, env = "STOCKROOM_LOAD")]
    pub load: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Log line format on stderr (text or json)
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,
}

impl Args {
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level.clone(),
            format: self.log_format,
        }
    }
}
