//! fbconv CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Configuration error
//! - 4: Template error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};
use fbconv_meta::ConfigError;
use fbconv_templates::{FormatError, FormatsError};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const CONFIG_ERROR: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "fbconv=debug"
    } else if cli.quiet {
        "fbconv=warn"
    } else {
        "fbconv=info"
    };

    let mut filter = EnvFilter::from_default_env();
    for directive in [level, "warn"] {
        if let Ok(directive) = directive.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }

    // Logging may already be initialized, continue either way
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Render(args) => commands::render::execute(args),
        Commands::Plan(args) => commands::plan::execute(args, config),
        Commands::Transform(args) => commands::transform::execute(args, config),
        Commands::DumpConfig(args) => commands::dump_config::execute(args, config),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(categorize_error(&e))
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<ConfigError>().is_some() {
        ExitCodes::CONFIG_ERROR
    } else if e.downcast_ref::<FormatsError>().is_some() || e.downcast_ref::<FormatError>().is_some()
    {
        ExitCodes::TEMPLATE_ERROR
    } else if e.downcast_ref::<commands::ArgumentError>().is_some() {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
