//! Keyword maps for title, author and file name templates.
//!
//! Title keywords: `#title`, `#series`, `#abbrseries`, `#ABBRseries`,
//! `#number`, `#padnumber`, `#date`, `#lang`, `#bookid`, `#genre`,
//! `#genres`.
//!
//! Author keywords: `#f`, `#m`, `#l` and the initials `#fi`, `#mi`.
//!
//! File name keywords: the title keywords plus `#author` (first author) and
//! `#authors` (all authors, comma separated).

use std::collections::HashMap;

use fbconv_meta::{AuthorName, MetaInfo};

use crate::template::Template;

/// Placeholder token (including `#`) to substitution value. An empty value
/// is present-but-empty, which is different from an absent key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordMap {
    values: HashMap<String, String>,
}

impl KeywordMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Add all entries of `other`, replacing existing keys.
    pub fn extend(&mut self, other: KeywordMap) {
        self.values.extend(other.values);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeywordMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for KeywordMap {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

fn initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| format!("{}.", c))
        .unwrap_or_default()
}

/// Keywords for a single author name.
pub fn author_keywords(author: &AuthorName) -> KeywordMap {
    KeywordMap::from_pairs([
        ("#f", author.first.clone()),
        ("#m", author.middle.clone()),
        ("#l", author.last.clone()),
        ("#fi", initial(&author.first)),
        ("#mi", initial(&author.middle)),
    ])
}

/// First letter of every word in `series`.
fn abbreviate(series: &str) -> String {
    series
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

/// Left-pad `n` with zeros to `width` digits; never truncates.
fn zero_pad(n: u32, width: usize) -> String {
    let digits = n.to_string();
    "0".repeat(width.saturating_sub(digits.len())) + &digits
}

/// Keywords describing the book itself.
pub fn title_keywords(meta: &MetaInfo, series_number_positions: usize) -> KeywordMap {
    let abbr = abbreviate(&meta.series);
    let (number, padnumber) = match meta.series_number {
        0 => (String::new(), String::new()),
        n => (n.to_string(), zero_pad(n, series_number_positions)),
    };

    KeywordMap::from_pairs([
        ("#title", meta.title.clone()),
        ("#series", meta.series.clone()),
        ("#abbrseries", abbr.to_lowercase()),
        ("#ABBRseries", abbr.to_uppercase()),
        ("#number", number),
        ("#padnumber", padnumber),
        ("#date", meta.date.clone()),
        ("#lang", meta.lang.clone()),
        ("#bookid", meta.id.clone()),
        ("#genre", meta.genres.first().cloned().unwrap_or_default()),
        ("#genres", meta.genres.join(", ")),
    ])
}

/// Keywords for output file names; authors are rendered with
/// `author_format`.
pub fn file_name_keywords(
    meta: &MetaInfo,
    series_number_positions: usize,
    author_format: &Template,
) -> KeywordMap {
    let authors: Vec<String> = meta
        .authors
        .iter()
        .map(|a| author_format.render(&author_keywords(a)))
        .filter(|a| !a.is_empty())
        .collect();

    let mut keywords = title_keywords(meta, series_number_positions);
    keywords.insert("#author", authors.first().cloned().unwrap_or_default());
    keywords.insert("#authors", authors.join(", "));
    keywords
}
