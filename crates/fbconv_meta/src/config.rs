//! Configuration model and loading.
//!
//! Configuration is read once, before any document is processed, and is
//! never mutated afterwards. [`LoadedConfig`] bundles the parsed values with
//! the lookup tables built from them.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::models::MetaInfo;
use crate::overwrite::OverwriteTable;
use crate::transform::TransformationTable;

pub const DEFAULT_TITLE_FORMAT: &str = "{(#ABBRseries{ - #padnumber}) }#title";
pub const DEFAULT_AUTHOR_FORMAT: &str = "#l{ #f}{ #m}";
pub const DEFAULT_SERIES_NUMBER_POSITIONS: usize = 2;
pub const MAX_SERIES_NUMBER_POSITIONS: usize = 32;

/// Configuration path meaning "read JSON from standard input".
pub const STDIN_PATH: &str = "-";

/// Document formatting options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Template for the displayed book title
    pub title_format: String,
    /// Template for author names
    pub author_format: String,
    /// Template for author names written to output metadata
    pub author_format_meta: String,
    /// Template for author names used in file names
    pub author_format_file_name: String,
    /// Template for output file names, empty to keep source names
    pub file_name_format: String,
    /// Width of the zero-padded series number
    pub series_number_positions: usize,
    /// Named text transformations
    #[serde(rename = "transform")]
    pub transformations: HashMap<String, HashMap<String, String>>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title_format: DEFAULT_TITLE_FORMAT.to_string(),
            author_format: DEFAULT_AUTHOR_FORMAT.to_string(),
            author_format_meta: String::new(),
            author_format_file_name: String::new(),
            file_name_format: String::new(),
            series_number_positions: DEFAULT_SERIES_NUMBER_POSITIONS,
            transformations: HashMap::new(),
        }
    }
}

/// One `overwrites` list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverwriteEntry {
    pub name: String,
    #[serde(default)]
    pub meta: MetaInfo,
}

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub document: DocumentConfig,
    pub overwrites: Vec<OverwriteEntry>,
}

impl Config {
    /// Fill fields whose defaults depend on other fields.
    fn resolve_defaults(mut self) -> Self {
        let doc = &mut self.document;
        if doc.author_format_meta.is_empty() {
            doc.author_format_meta = doc.author_format.clone();
        }
        if doc.author_format_file_name.is_empty() {
            doc.author_format_file_name = doc.author_format.clone();
        }
        self
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.document.series_number_positions > MAX_SERIES_NUMBER_POSITIONS {
            return Err(ConfigError::InvalidEntry {
                entry: "document.series_number_positions".to_string(),
                message: format!(
                    "{} exceeds the maximum of {}",
                    self.document.series_number_positions, MAX_SERIES_NUMBER_POSITIONS
                ),
            });
        }
        for (i, entry) in self.overwrites.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(ConfigError::InvalidEntry {
                    entry: format!("overwrites[{}]", i),
                    message: "name cannot be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Effective configuration as pretty-printed JSON.
    pub fn to_pretty_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick a format from the file extension; JSON unless YAML or TOML.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => ConfigFormat::Yaml,
            "toml" => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

/// Reader for configuration files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse configuration text.
    pub fn from_str(content: &str, format: ConfigFormat) -> ConfigResult<Config> {
        let config: Config = match format {
            ConfigFormat::Json => serde_json::from_str(content)?,
            // An empty YAML document deserializes to unit, not a map
            ConfigFormat::Yaml if content.trim().is_empty() => Config::default(),
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };
        config.validate()?;
        Ok(config.resolve_defaults())
    }

    /// Parse configuration from a reader.
    pub fn from_reader(mut reader: impl Read, format: ConfigFormat) -> ConfigResult<Config> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::from_str(&content, format)
    }

    /// Read configuration from a file, or JSON from stdin when `path` is `-`.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Config> {
        let path = path.as_ref();
        if is_stdin(path) {
            debug!("Reading configuration from stdin");
            return Self::from_reader(io::stdin().lock(), ConfigFormat::Json);
        }
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        debug!("Reading configuration from {:?}", path);

        let content = fs::read_to_string(path)?;
        Self::from_str(&content, ConfigFormat::from_path(path))
    }

    /// Built-in defaults.
    pub fn defaults() -> Config {
        Config::default().resolve_defaults()
    }
}

fn is_stdin(path: &Path) -> bool {
    path == Path::new(STDIN_PATH)
}

/// Make a relative cover image path relative to `base` instead.
fn resolve_cover_image(meta: &mut MetaInfo, base: &Path) {
    if !meta.cover_image.is_empty() && Path::new(&meta.cover_image).is_relative() {
        meta.cover_image = base.join(&meta.cover_image).to_string_lossy().into_owned();
    }
}

/// Configuration with its lookup tables, shared read-only by all workers.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// Directory relative overwrite cover images are resolved against
    pub base_dir: Option<PathBuf>,
    overwrites: OverwriteTable,
    transformations: TransformationTable,
}

impl LoadedConfig {
    pub fn new(config: Config) -> Self {
        Self::with_base_dir(config, None)
    }

    /// Build the tables, resolving relative overwrite cover images against
    /// `base_dir` when one is given.
    pub fn with_base_dir(config: Config, base_dir: Option<PathBuf>) -> Self {
        let overwrites = OverwriteTable::from_entries(config.overwrites.iter().map(|e| {
            let mut meta = e.meta.clone();
            if let Some(base) = &base_dir {
                resolve_cover_image(&mut meta, base);
            }
            (e.name.as_str(), meta)
        }));
        let transformations =
            TransformationTable::from_config(config.document.transformations.clone());

        info!(
            "Configuration ready: {} overwrites, {} transformations",
            overwrites.len(),
            transformations.names().len()
        );

        Self {
            config,
            base_dir,
            overwrites,
            transformations,
        }
    }

    /// Load from a file (`-` for stdin), or use defaults when no path is
    /// given.
    ///
    /// The base directory is the configuration file's directory, or the
    /// working directory for stdin.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => {
                let config = ConfigLoader::load(path)?;
                let base_dir = if is_stdin(path) {
                    std::env::current_dir().ok()
                } else {
                    path.canonicalize()
                        .ok()
                        .and_then(|p| p.parent().map(Path::to_path_buf))
                };
                Ok(Self::with_base_dir(config, base_dir))
            }
            None => Ok(Self::new(ConfigLoader::defaults())),
        }
    }

    /// Configuration as actually used: `overwrites` lists the entries that
    /// survived de-duplication, with normalized names.
    pub fn effective_config(&self) -> Config {
        Config {
            document: self.config.document.clone(),
            overwrites: self
                .overwrites
                .iter()
                .map(|(name, meta)| OverwriteEntry {
                    name: name.to_string(),
                    meta: meta.clone(),
                })
                .collect(),
        }
    }

    /// Effective configuration as pretty-printed JSON.
    pub fn to_pretty_json(&self) -> ConfigResult<String> {
        self.effective_config().to_pretty_json()
    }

    pub fn document(&self) -> &DocumentConfig {
        &self.config.document
    }

    pub fn overwrites(&self) -> &OverwriteTable {
        &self.overwrites
    }

    pub fn transformations(&self) -> &TransformationTable {
        &self.transformations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigLoader::defaults();
        assert_eq!(config.document.title_format, DEFAULT_TITLE_FORMAT);
        assert_eq!(config.document.author_format, DEFAULT_AUTHOR_FORMAT);
        assert_eq!(config.document.author_format_meta, DEFAULT_AUTHOR_FORMAT);
        assert_eq!(config.document.author_format_file_name, DEFAULT_AUTHOR_FORMAT);
        assert_eq!(config.document.series_number_positions, 2);
        assert!(config.overwrites.is_empty());
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.YML")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), ConfigFormat::Json);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ConfigLoader::from_str(
            r##"{"document": {"author_format": "#f #l"}}"##,
            ConfigFormat::Json,
        )
        .unwrap();
        assert_eq!(config.document.title_format, DEFAULT_TITLE_FORMAT);
        assert_eq!(config.document.author_format, "#f #l");
        assert_eq!(config.document.author_format_meta, "#f #l");
        assert_eq!(config.document.author_format_file_name, "#f #l");
    }

    #[test]
    fn test_explicit_author_variants_are_kept() {
        let yaml = r##"
document:
  author_format: "#l #f"
  author_format_file_name: "#l"
"##;
        let config = ConfigLoader::from_str(yaml, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.document.author_format_meta, "#l #f");
        assert_eq!(config.document.author_format_file_name, "#l");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = ConfigLoader::from_str("", ConfigFormat::Yaml).unwrap();
        assert_eq!(config, ConfigLoader::defaults());
    }

    #[test]
    fn test_empty_overwrite_name_is_rejected() {
        let json = r#"{"overwrites": [{"name": " ", "meta": {"title": "x"}}]}"#;
        let err = ConfigLoader::from_str(json, ConfigFormat::Json).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEntry { .. }));
    }

    #[test]
    fn test_series_number_positions_bound() {
        let json = r#"{"document": {"series_number_positions": 70000}}"#;
        let err = ConfigLoader::from_str(json, ConfigFormat::Json).unwrap_err();
        match err {
            ConfigError::InvalidEntry { entry, .. } => {
                assert_eq!(entry, "document.series_number_positions")
            }
            other => panic!("unexpected error: {other}"),
        }

        let json = format!(
            r#"{{"document": {{"series_number_positions": {}}}}}"#,
            MAX_SERIES_NUMBER_POSITIONS
        );
        assert!(ConfigLoader::from_str(&json, ConfigFormat::Json).is_ok());
    }

    #[test]
    fn test_from_reader_parses_json() {
        let input = br##"{"document": {"title_format": "#title"}}"##;
        let config = ConfigLoader::from_reader(&input[..], ConfigFormat::Json).unwrap();
        assert_eq!(config.document.title_format, "#title");
        assert_eq!(config.document.author_format_meta, DEFAULT_AUTHOR_FORMAT);
    }

    #[test]
    fn test_stdin_path_detection() {
        assert!(is_stdin(Path::new("-")));
        assert!(!is_stdin(Path::new("./-")));
        assert!(!is_stdin(Path::new("config.json")));
    }

    #[test]
    fn test_effective_config_lists_surviving_overwrites() {
        let json = r#"{"overwrites": [
            {"name": "b\\c.fb2", "meta": {"title": "kept"}},
            {"name": "b/c.fb2", "meta": {"title": "discarded"}},
            {"name": "*", "meta": {"language": "ru"}}
        ]}"#;
        let loaded = LoadedConfig::new(ConfigLoader::from_str(json, ConfigFormat::Json).unwrap());

        let effective = loaded.effective_config();
        assert_eq!(effective.overwrites.len(), 2);
        assert_eq!(effective.overwrites[0].name, "*");
        assert_eq!(effective.overwrites[1].name, "b/c.fb2");
        assert_eq!(effective.overwrites[1].meta.title, "kept");

        let dump = loaded.to_pretty_json().unwrap();
        assert!(!dump.contains("discarded"));
        assert_eq!(loaded.config.overwrites.len(), 3);
    }

    #[test]
    fn test_relative_cover_resolved_against_base_dir() {
        let json = r#"{"overwrites": [
            {"name": "a.fb2", "meta": {"cover_image": "covers/a.jpg"}},
            {"name": "b.fb2", "meta": {"title": "no cover"}}
        ]}"#;
        let config = ConfigLoader::from_str(json, ConfigFormat::Json).unwrap();
        let base = std::env::temp_dir().join("fbconv-config");
        let loaded = LoadedConfig::with_base_dir(config.clone(), Some(base.clone()));

        let cover = &loaded.overwrites().lookup("a.fb2").unwrap().cover_image;
        assert_eq!(Path::new(cover), base.join("covers/a.jpg"));
        assert!(loaded.overwrites().lookup("b.fb2").unwrap().cover_image.is_empty());

        let unresolved = LoadedConfig::new(config);
        assert_eq!(unresolved.overwrites().lookup("a.fb2").unwrap().cover_image, "covers/a.jpg");
    }

    #[test]
    fn test_absolute_cover_is_kept() {
        let absolute = std::env::temp_dir().join("cover.jpg");
        let mut meta = MetaInfo {
            cover_image: absolute.to_string_lossy().into_owned(),
            ..Default::default()
        };
        resolve_cover_image(&mut meta, Path::new("unused"));
        assert_eq!(Path::new(&meta.cover_image), absolute);
    }

    #[test]
    fn test_loaded_config_builds_tables() {
        let json = r#"{
            "document": {"transform": {"dialogue": {"from": "- ", "to": "-- "}}},
            "overwrites": [
                {"name": "a\\b.fb2", "meta": {"title": "first"}},
                {"name": "a/b.fb2", "meta": {"title": "second"}}
            ]
        }"#;
        let loaded = LoadedConfig::new(ConfigLoader::from_str(json, ConfigFormat::Json).unwrap());
        assert_eq!(loaded.overwrites().len(), 1);
        assert_eq!(loaded.overwrites().lookup("a/b.fb2").unwrap().title, "first");
        assert!(loaded.transformations().lookup("dialogue").is_some());
    }
}
