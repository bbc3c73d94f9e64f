use std::path::PathBuf;

use clap::Parser;

pub use crate::Command;

/// Encrypt short messages to a secp256k1 public key
#[derive(Parser, Debug)]
#[command(name = "ecies-box", author, version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file
    #[arg(long = "config", global = true, env = "ECIES_BOX_CONFIG")]
    pub config_path: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); overrides the config file
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}
