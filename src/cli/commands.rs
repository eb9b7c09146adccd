//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

/// playlake batch ETL
#[derive(Parser, Debug)]
#[command(name = "playlake")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML). Without this flag, `etl.yaml` is used if
    /// present, otherwise built-in defaults apply.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input root URL, overriding the config (s3://bucket/prefix/ or a local path)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output root URL, overriding the config
    #[arg(short, long)]
    pub output: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
