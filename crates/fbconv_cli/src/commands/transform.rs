//! Transform command - Show or apply a named text transformation.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::{load_config, ArgumentError};

#[derive(Args)]
pub struct TransformArgs {
    /// Transformation name from the configuration
    name: String,

    /// Text to transform; without it the from/to pair is printed
    text: Option<String>,
}

pub fn execute(args: TransformArgs, config: Option<&Path>) -> Result<()> {
    let loaded = load_config(config)?;

    let Some(transformation) = loaded.transformations().lookup(&args.name) else {
        let known = loaded.transformations().names().join(", ");
        return Err(ArgumentError(format!(
            "no usable transformation '{}' (available: {})",
            args.name,
            if known.is_empty() { "none" } else { known.as_str() }
        ))
        .into());
    };

    match args.text {
        Some(text) => println!("{}", transformation.apply(&text)),
        None => {
            info!("Transformation '{}'", args.name);
            println!("from: {:?}", transformation.from);
            println!("to:   {:?}", transformation.to);
        }
    }
    Ok(())
}
