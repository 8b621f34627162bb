//! # fbconv_templates
//!
//! Title, author and file name templates for fbconv.
//!
//! A template mixes literal text with `#keyword` placeholders and optional
//! `{ ... }` fragments that vanish when none of their placeholders produced
//! a value. This lets one format string describe conditional punctuation:
//!
//! ```rust
//! use fbconv_templates::{KeywordMap, Template};
//!
//! let template = Template::parse("{(#series{ - #number}) }#title").unwrap();
//!
//! let mut values = KeywordMap::new();
//! values.insert("#title", "Hard to Be a God");
//! values.insert("#series", "");
//! values.insert("#number", "");
//! assert_eq!(template.render(&values), "Hard to Be a God");
//!
//! values.insert("#series", "Noon");
//! assert_eq!(template.render(&values), "(Noon) Hard to Be a God");
//! ```
//!
//! [`Formats`] compiles every template of a
//! [`DocumentConfig`](fbconv_meta::DocumentConfig) up front, so a malformed
//! template is reported once per run instead of once per book.

pub mod error;
pub mod formats;
pub mod keywords;
pub mod template;

pub use error::{FormatError, FormatsError, TemplateResult};
pub use formats::Formats;
pub use keywords::{author_keywords, file_name_keywords, title_keywords, KeywordMap};
pub use template::{expand, Template, SENTINEL};
