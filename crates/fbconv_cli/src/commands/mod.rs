//! CLI command definitions.
//!
//! Each subcommand exercises one part of the metadata and naming core
//! against a configuration file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use thiserror::Error;

use fbconv_meta::LoadedConfig;

pub mod dump_config;
pub mod plan;
pub mod render;
pub mod transform;

/// fbconv - e-book metadata and naming toolkit
#[derive(Parser)]
#[command(name = "fbconv")]
#[command(version, about = "fbconv - e-book metadata and naming toolkit")]
#[command(long_about = r#"
fbconv renders book titles, author names and output file names from
configurable templates and resolves per-book metadata overwrites.

TEMPLATES:
  #keyword      → replaced by the keyword value
  { ... }       → optional fragment, dropped when no keyword inside has a value
  \{  \}        → literal braces

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Configuration error
  4 - Template error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (JSON, YAML or TOML), or `-` for JSON on stdin
    #[arg(short, long, global = true, env = "FBCONV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Expand a template with keyword values
    Render(render::RenderArgs),

    /// Show overwrites and rendered names for every book in a directory
    Plan(plan::PlanArgs),

    /// Show or apply a named text transformation
    Transform(transform::TransformArgs),

    /// Print the effective configuration, or write it to a file
    #[command(name = "dump-config")]
    DumpConfig(dump_config::DumpConfigArgs),
}

/// Command line value that cannot be used.
#[derive(Debug, Error)]
#[error("Invalid argument: {0}")]
pub struct ArgumentError(pub String);

/// Load configuration, or defaults when no file was given.
pub fn load_config(path: Option<&std::path::Path>) -> Result<LoadedConfig> {
    LoadedConfig::load(path).with_context(|| match path {
        Some(p) => format!("Unable to read configuration {}", p.display()),
        None => "Unable to prepare default configuration".to_string(),
    })
}
