//! Render command - Expand a template with keyword values.

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, warn};

use fbconv_templates::{KeywordMap, Template, SENTINEL};

use super::ArgumentError;

#[derive(Args)]
pub struct RenderArgs {
    /// Template to expand, e.g. "#l{ #f}{ #m}"
    template: String,

    /// Keyword value as KEY=VALUE; the leading '#' on KEY is optional
    #[arg(short, long = "keyword", value_name = "KEY=VALUE")]
    keywords: Vec<String>,
}

/// Split `KEY=VALUE`, adding the sentinel to KEY when missing.
fn parse_keyword(arg: &str) -> Result<(String, String), ArgumentError> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| ArgumentError(format!("expected KEY=VALUE, got '{}'", arg)))?;
    let name = key.strip_prefix(SENTINEL).unwrap_or(key);
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(ArgumentError(format!("invalid keyword name '{}'", key)));
    }
    Ok((format!("{}{}", SENTINEL, name), value.to_string()))
}

pub fn execute(args: RenderArgs) -> Result<()> {
    let template = Template::parse(&args.template)
        .with_context(|| format!("Unable to parse template '{}'", args.template))?;

    let mut values = KeywordMap::new();
    for arg in &args.keywords {
        let (key, value) = parse_keyword(arg)?;
        debug!("{} = {:?}", key, value);
        values.insert(key, value);
    }

    for token in template.tokens() {
        if !values.contains(token) {
            warn!("No value for {}, it will be kept as written", token);
        }
    }

    println!("{}", template.render(&values));
    Ok(())
}
