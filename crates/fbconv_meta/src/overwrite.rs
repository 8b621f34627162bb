//! Per-document metadata overwrites.
//!
//! Overwrites are keyed by the document's path relative to the conversion
//! source, always stored with forward slashes. A lookup starts from the full
//! path and drops leading segments one at a time, so an entry for
//! `series/book.fb2` is found for `library/series/book.fb2`, and an entry
//! for `book.fb2` covers every book with that file name. The `*` entry
//! applies to everything not matched more specifically.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::models::MetaInfo;

/// Key that matches any document.
pub const WILDCARD: &str = "*";

/// Convert a path to forward-slash form.
pub fn normalize_path(path: &str) -> String {
    path.chars()
        .map(|c| {
            if c == '\\' || c == std::path::MAIN_SEPARATOR {
                '/'
            } else {
                c
            }
        })
        .collect()
}

/// Table of metadata overwrites, immutable once built.
#[derive(Debug, Clone, Default)]
pub struct OverwriteTable {
    entries: HashMap<String, MetaInfo>,
}

impl OverwriteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, meta)` pairs in registration order.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, MetaInfo)>,
        S: AsRef<str>,
    {
        let mut table = Self::new();
        for (name, meta) in entries {
            table.register(name.as_ref(), meta);
        }
        table
    }

    /// Register an overwrite under `name`.
    ///
    /// The first registration of a normalized key wins; later ones are
    /// discarded and `false` is returned.
    pub fn register(&mut self, name: &str, meta: MetaInfo) -> bool {
        let key = normalize_path(name);
        if self.entries.contains_key(&key) {
            warn!("Ignoring duplicate overwrite for '{}'", key);
            return false;
        }
        self.entries.insert(key, meta);
        true
    }

    /// Find the most specific overwrite for a document path.
    pub fn lookup(&self, path: &str) -> Option<&MetaInfo> {
        if self.entries.is_empty() {
            return None;
        }

        let normalized = normalize_path(path);
        let mut key = normalized.as_str();
        loop {
            if let Some(meta) = self.entries.get(key) {
                debug!("Overwrite '{}' matched for {}", key, path);
                return Some(meta);
            }
            match key.find('/') {
                Some(pos) => key = &key[pos + 1..],
                None => break,
            }
        }

        let meta = self.entries.get(WILDCARD);
        if meta.is_some() {
            debug!("Wildcard overwrite matched for {}", path);
        }
        meta
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over registered `(key, meta)` pairs, keys sorted.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaInfo)> {
        let mut pairs: Vec<_> = self.entries.iter().map(|(k, v)| (k.as_str(), v)).collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs.into_iter()
    }
}
