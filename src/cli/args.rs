// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// formcheck - Form validation orchestrator
///
/// Validates a form document against the rules in formcheck.toml using an
/// external validation engine.
#[derive(Parser, Debug)]
#[command(name = "formcheck")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Validate form documents against configured rules", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "FORMCHECK_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate a form document
    Check(CheckArgs),

    /// Initialize formcheck configuration
    Init(InitArgs),

    /// Print version information
    Version,
}

/// Arguments for the check command.
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// JSON form document (`{"elements": [...]}`), or `-` for stdin
    pub document: PathBuf,

    /// Validate a single field as if it had lost focus
    #[arg(short, long)]
    pub field: Option<String>,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Configuration preset
    #[arg(long)]
    pub preset: Option<ConfigPreset>,
}

/// Configuration presets for init.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigPreset {
    /// Rules table only
    Minimal,
    /// Rules plus an external validator (recommended)
    Standard,
    /// Every option with comments
    Full,
}

impl CheckArgs {
    /// Whether the document is read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.document.as_os_str() == "-"
    }
}
