//! # fbconv_meta
//!
//! Metadata overwrites, text transformations and configuration for fbconv.
//!
//! Everything here is built once while configuration is loaded and then
//! shared read-only between conversion workers:
//!
//! - [`OverwriteTable`] resolves the most specific metadata overwrite for a
//!   document path, falling back to the `*` entry
//! - [`TransformationTable`] returns named from/to text substitutions
//! - [`LoadedConfig`] bundles the parsed configuration with both tables
//!
//! ## Example
//!
//! ```rust,no_run
//! use fbconv_meta::LoadedConfig;
//! use std::path::Path;
//!
//! let loaded = LoadedConfig::load(Some(Path::new("fbconv.yaml"))).unwrap();
//! if let Some(meta) = loaded.overwrites().lookup("library/series/book.fb2") {
//!     println!("overwriting title with {}", meta.title);
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod overwrite;
pub mod transform;

pub use config::{
    Config, ConfigFormat, ConfigLoader, DocumentConfig, LoadedConfig, OverwriteEntry,
    MAX_SERIES_NUMBER_POSITIONS, STDIN_PATH,
};
pub use error::{ConfigError, ConfigResult};
pub use models::{AuthorName, MetaInfo};
pub use overwrite::{normalize_path, OverwriteTable, WILDCARD};
pub use transform::{Transformation, TransformationTable};
