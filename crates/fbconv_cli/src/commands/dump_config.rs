//! Dump-config command - Print the effective configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use fbconv_meta::LoadedConfig;

use super::load_config;

#[derive(Args)]
pub struct DumpConfigArgs {
    /// Write to this file instead of stdout
    file: Option<PathBuf>,
}

pub fn execute(args: DumpConfigArgs, config: Option<&Path>) -> Result<()> {
    let loaded = load_config(config)?;
    write_dump(&loaded, args.file.as_deref())
}

/// Write the effective configuration as JSON to `dest`, or stdout.
fn write_dump(loaded: &LoadedConfig, dest: Option<&Path>) -> Result<()> {
    let json = loaded.to_pretty_json()?;
    match dest {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("Unable to write configuration to {}", path.display()))?;
            info!("Configuration written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fbconv_meta::{ConfigFormat, ConfigLoader};
    use tempfile::tempdir;

    #[test]
    fn test_dump_to_file_lists_surviving_overwrites() {
        let json = r##"{
            "document": {"title_format": "#title"},
            "overwrites": [
                {"name": "a.fb2", "meta": {"title": "first"}},
                {"name": "a.fb2", "meta": {"title": "second"}}
            ]
        }"##;
        let loaded = LoadedConfig::new(ConfigLoader::from_str(json, ConfigFormat::Json).unwrap());
        let dir = tempdir().unwrap();
        let dest = dir.path().join("effective.json");

        write_dump(&loaded, Some(&dest)).unwrap();

        let reloaded = ConfigLoader::load(&dest).unwrap();
        assert_eq!(reloaded.document.title_format, "#title");
        assert_eq!(reloaded.overwrites.len(), 1);
        assert_eq!(reloaded.overwrites[0].meta.title, "first");
    }

    #[test]
    fn test_dump_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("missing").join("out.json");
        let loaded = LoadedConfig::new(ConfigLoader::defaults());

        let err = write_dump(&loaded, Some(&dest)).unwrap_err();
        assert!(err.to_string().contains("Unable to write configuration"));
    }
}
