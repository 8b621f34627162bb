//! Plan command - Resolve overwrites and rendered names for a source tree.
//!
//! Document paths are taken relative to the source directory, the same way
//! overwrite names are written in the configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, info};
use walkdir::WalkDir;

use fbconv_meta::{normalize_path, LoadedConfig};
use fbconv_templates::Formats;

use super::{load_config, ArgumentError};

#[derive(Args)]
pub struct PlanArgs {
    /// Source directory to scan
    dir: PathBuf,

    /// File extensions to include
    #[arg(short, long = "ext", default_values = ["fb2", "zip"])]
    extensions: Vec<String>,
}

/// Names rendered from a matched overwrite.
#[derive(Debug, PartialEq, Eq)]
pub struct Rendered {
    pub title: String,
    pub authors: Vec<String>,
    pub file_name: Option<String>,
}

/// One document found in the source tree.
#[derive(Debug, PartialEq, Eq)]
pub struct PlanEntry {
    /// Forward-slash path relative to the source directory
    pub path: String,
    pub overwrite: Option<Rendered>,
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(&e)))
}

/// Walk `dir` and resolve every matching document, sorted by path.
pub fn build_plan(
    dir: &Path,
    extensions: &[String],
    loaded: &LoadedConfig,
    formats: &Formats,
) -> Result<Vec<PlanEntry>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let source = entry.path();
        if !entry.file_type().is_file() || !has_extension(source, extensions) {
            continue;
        }

        let relative = source
            .strip_prefix(dir)
            .with_context(|| format!("{} is outside {}", source.display(), dir.display()))?;
        let path = normalize_path(&relative.to_string_lossy());

        let overwrite = loaded.overwrites().lookup(&path).map(|meta| Rendered {
            title: formats.title(meta),
            authors: formats.authors_meta(meta),
            file_name: formats.file_name(meta),
        });
        debug!("{}: overwrite {}", path, if overwrite.is_some() { "found" } else { "absent" });

        entries.push(PlanEntry { path, overwrite });
    }

    Ok(entries)
}

pub fn execute(args: PlanArgs, config: Option<&Path>) -> Result<()> {
    if !args.dir.is_dir() {
        return Err(ArgumentError(format!("not a directory: {}", args.dir.display())).into());
    }

    let loaded = load_config(config)?;
    let formats = Formats::compile(loaded.document())?;

    let plan = build_plan(&args.dir, &args.extensions, &loaded, &formats)?;
    info!(
        "{} documents, {} with overwrites",
        plan.len(),
        plan.iter().filter(|e| e.overwrite.is_some()).count()
    );

    for entry in &plan {
        match &entry.overwrite {
            None => println!("{}: no overwrite", entry.path),
            Some(rendered) => {
                println!("{}:", entry.path);
                println!("   title:  {}", rendered.title);
                if !rendered.authors.is_empty() {
                    println!("   author: {}", rendered.authors.join("; "));
                }
                if let Some(name) = &rendered.file_name {
                    println!("   file:   {}", name);
                }
            }
        }
    }

    Ok(())
}
