//! Book metadata records.
//!
//! [`MetaInfo`] is used both for the overwrite bundles listed in the
//! configuration and for metadata extracted from a parsed document, so an
//! overwrite can be laid on top of extracted data with [`MetaInfo::overlay`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Parsed author name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorName {
    #[serde(default, rename = "first_name")]
    pub first: String,
    #[serde(default, rename = "middle_name")]
    pub middle: String,
    #[serde(default, rename = "last_name")]
    pub last: String,
}

impl AuthorName {
    pub fn new(
        first: impl Into<String>,
        middle: impl Into<String>,
        last: impl Into<String>,
    ) -> Self {
        Self {
            first: first.into(),
            middle: middle.into(),
            last: last.into(),
        }
    }

    /// True when no name part is set.
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.middle.is_empty() && self.last.is_empty()
    }
}

impl fmt::Display for AuthorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [&self.first, &self.middle, &self.last]
            .into_iter()
            .map(String::as_str)
            .filter(|p| !p.is_empty())
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// Book meta-information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaInfo {
    /// Book identifier
    #[serde(default)]
    pub id: String,
    /// Book title
    #[serde(default)]
    pub title: String,
    /// Language code (e.g., "ru", "en")
    #[serde(default, rename = "language")]
    pub lang: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub authors: Vec<AuthorName>,
    /// Series name
    #[serde(default, rename = "sequence")]
    pub series: String,
    /// Position in series, 0 when unknown
    #[serde(default, rename = "sequence_number")]
    pub series_number: u32,
    #[serde(default)]
    pub date: String,
    /// Path to a replacement cover image
    #[serde(default)]
    pub cover_image: String,
}

impl MetaInfo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author: AuthorName) -> Self {
        self.authors.push(author);
        self
    }

    pub fn with_series(mut self, name: impl Into<String>, number: u32) -> Self {
        self.series = name.into();
        self.series_number = number;
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genres.push(genre.into());
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Lay this record over `base`: every field set here replaces the
    /// corresponding field of `base`, unset fields keep the base value.
    pub fn overlay(&self, base: &MetaInfo) -> MetaInfo {
        fn pick(over: &str, base: &str) -> String {
            (if over.is_empty() { base } else { over }).to_string()
        }
        fn pick_list<T: Clone>(over: &[T], base: &[T]) -> Vec<T> {
            (if over.is_empty() { base } else { over }).to_vec()
        }

        MetaInfo {
            id: pick(&self.id, &base.id),
            title: pick(&self.title, &base.title),
            lang: pick(&self.lang, &base.lang),
            genres: pick_list(&self.genres, &base.genres),
            authors: pick_list(&self.authors, &base.authors),
            series: pick(&self.series, &base.series),
            series_number: if self.series_number == 0 {
                base.series_number
            } else {
                self.series_number
            },
            date: pick(&self.date, &base.date),
            cover_image: pick(&self.cover_image, &base.cover_image),
        }
    }
}
