//! Named text transformations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A raw text substitution applied during conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transformation {
    pub from: String,
    #[serde(default)]
    pub to: String,
}

impl Transformation {
    /// Replace every occurrence of `from` in `text` with `to`.
    pub fn apply(&self, text: &str) -> String {
        text.replace(&self.from, &self.to)
    }
}

/// Transformations by name. Entries without a `from` value are never
/// returned.
#[derive(Debug, Clone, Default)]
pub struct TransformationTable {
    entries: HashMap<String, HashMap<String, String>>,
}

impl TransformationTable {
    /// Build from the configuration's `transform` section.
    pub fn from_config(entries: HashMap<String, HashMap<String, String>>) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, name: &str) -> Option<Transformation> {
        let entry = self.entries.get(name)?;
        let from = entry.get("from").filter(|f| !f.is_empty())?;
        Some(Transformation {
            from: from.clone(),
            to: entry.get("to").cloned().unwrap_or_default(),
        })
    }

    /// Names with a usable transformation, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .keys()
            .map(String::as_str)
            .filter(|n| self.lookup(n).is_some())
            .collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn table() -> TransformationTable {
        let mut map = HashMap::new();
        map.insert("dialogue".to_string(), entry(&[("from", "- "), ("to", "\u{2014} ")]));
        map.insert("strip".to_string(), entry(&[("from", "***")]));
        map.insert("broken".to_string(), entry(&[("from", ""), ("to", "x")]));
        map.insert("no_from".to_string(), entry(&[("to", "x")]));
        TransformationTable::from_config(map)
    }

    #[test]
    fn test_lookup_valid_entry() {
        let t = table().lookup("dialogue").unwrap();
        assert_eq!(t.from, "- ");
        assert_eq!(t.to, "\u{2014} ");
        assert_eq!(t.apply("- Hello"), "\u{2014} Hello");
    }

    #[test]
    fn test_missing_to_is_empty() {
        let t = table().lookup("strip").unwrap();
        assert_eq!(t.to, "");
        assert_eq!(t.apply("a***b"), "ab");
    }

    #[test]
    fn test_empty_or_missing_from_is_absent() {
        let table = table();
        assert!(table.lookup("broken").is_none());
        assert!(table.lookup("no_from").is_none());
        assert!(table.lookup("unknown").is_none());
    }

    #[test]
    fn test_names_skip_invalid_entries() {
        assert_eq!(table().names(), vec!["dialogue", "strip"]);
    }
}
