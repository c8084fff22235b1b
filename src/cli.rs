//! CLI argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Heuristic Big-O complexity analyzer
#[derive(Parser, Debug)]
#[command(name = "bigo-engine")]
#[command(about = "Estimates per-function time and space complexity of a Python source file")]
#[command(version)]
pub struct Cli {
    /// Path to the Python file to analyze
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text", value_enum)]
    pub format: OutputFormat,

    /// Print only the call hierarchy section
    #[arg(long)]
    pub hierarchy: bool,

    /// Show verbose diagnostics on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Structured JSON output
    Json,
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
