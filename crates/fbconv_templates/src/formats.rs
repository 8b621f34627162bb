//! Configured templates, compiled once per run.

use fbconv_meta::{AuthorName, DocumentConfig, MetaInfo};
use tracing::debug;

use crate::error::FormatsError;
use crate::keywords::{author_keywords, file_name_keywords, title_keywords};
use crate::template::Template;

/// Every template from [`DocumentConfig`], parsed.
#[derive(Debug, Clone)]
pub struct Formats {
    title: Template,
    author: Template,
    author_meta: Template,
    author_file_name: Template,
    file_name: Option<Template>,
    series_number_positions: usize,
}

fn compile(field: &'static str, source: &str) -> Result<Template, FormatsError> {
    debug!("Compiling {} template '{}'", field, source);
    Template::parse(source).map_err(|source_err| FormatsError {
        field,
        template: source.to_string(),
        source: source_err,
    })
}

impl Formats {
    /// Parse all configured templates; the first malformed one is an error.
    pub fn compile(doc: &DocumentConfig) -> Result<Self, FormatsError> {
        let or_author = |s: &str| {
            if s.is_empty() {
                doc.author_format.clone()
            } else {
                s.to_string()
            }
        };

        Ok(Self {
            title: compile("title_format", &doc.title_format)?,
            author: compile("author_format", &doc.author_format)?,
            author_meta: compile("author_format_meta", &or_author(&doc.author_format_meta))?,
            author_file_name: compile(
                "author_format_file_name",
                &or_author(&doc.author_format_file_name),
            )?,
            file_name: match doc.file_name_format.as_str() {
                "" => None,
                s => Some(compile("file_name_format", s)?),
            },
            series_number_positions: doc.series_number_positions,
        })
    }

    /// Displayed book title.
    pub fn title(&self, meta: &MetaInfo) -> String {
        self.title
            .render(&title_keywords(meta, self.series_number_positions))
    }

    /// Displayed author name.
    pub fn author(&self, author: &AuthorName) -> String {
        self.author.render(&author_keywords(author))
    }

    /// Author names for output metadata, one per non-empty author.
    pub fn authors_meta(&self, meta: &MetaInfo) -> Vec<String> {
        meta.authors
            .iter()
            .map(|a| self.author_meta.render(&author_keywords(a)))
            .filter(|a| !a.is_empty())
            .collect()
    }

    /// Output file name stem, or `None` when no file name format is set.
    ///
    /// The result is not sanitized for the filesystem.
    pub fn file_name(&self, meta: &MetaInfo) -> Option<String> {
        self.file_name.as_ref().map(|template| {
            template.render(&file_name_keywords(
                meta,
                self.series_number_positions,
                &self.author_file_name,
            ))
        })
    }
}
