//! Template parsing and expansion.
//!
//! Template grammar:
//!
//! - `#name` is a placeholder: `#` followed by the longest run of word
//!   characters (letters, digits, `_`). It is replaced by the value mapped
//!   to the whole token, or left as written when the token is unknown.
//! - `{ ... }` is an optional fragment. Its expansion is kept only when at
//!   least one placeholder inside it (at any depth) produced a non-empty
//!   value; otherwise the whole fragment disappears. Fragments nest.
//! - `\{` and `\}` are literal braces.
//!
//! ```
//! use fbconv_templates::{expand, KeywordMap};
//!
//! let values = KeywordMap::from_pairs([("#l", "Tolstoy"), ("#f", "Leo"), ("#m", "")]);
//! assert_eq!(expand("#l{ #f}{ #m}", &values).unwrap(), "Tolstoy Leo");
//! ```

use std::fmt;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use crate::error::{FormatError, TemplateResult};
use crate::keywords::KeywordMap;

/// Placeholder sentinel.
pub const SENTINEL: char = '#';
const ESCAPE: char = '\\';
const OPEN: char = '{';
const CLOSE: char = '}';

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Literal(String),
    Token(String),
    Fragment(Vec<Node>),
}

/// A parsed template, ready to be rendered any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    nodes: Vec<Node>,
}

impl Template {
    /// Parse a template, rejecting unterminated fragments and dangling
    /// escape markers.
    pub fn parse(source: &str) -> TemplateResult<Self> {
        let mut parser = Parser {
            chars: source.char_indices().peekable(),
        };
        let nodes = parser.sequence(None)?;
        Ok(Self {
            source: source.to_string(),
            nodes,
        })
    }

    /// Expand the template with `values`.
    pub fn render(&self, values: &KeywordMap) -> String {
        let mut out = String::with_capacity(self.source.len());
        render_nodes(&self.nodes, values, &mut out);
        out
    }

    /// Template text as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Distinct placeholder tokens in order of first appearance.
    pub fn tokens(&self) -> Vec<&str> {
        fn collect<'a>(nodes: &'a [Node], acc: &mut Vec<&'a str>) {
            for node in nodes {
                match node {
                    Node::Token(t) if !acc.contains(&t.as_str()) => acc.push(t),
                    Node::Fragment(inner) => collect(inner, acc),
                    _ => {}
                }
            }
        }
        let mut tokens = Vec::new();
        collect(&self.nodes, &mut tokens);
        tokens
    }
}

impl FromStr for Template {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parse and expand `template` in one step.
pub fn expand(template: &str, values: &KeywordMap) -> TemplateResult<String> {
    Ok(Template::parse(template)?.render(values))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

struct Parser<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl Parser<'_> {
    /// Parse up to the `}` closing the fragment opened at `open`, or to the
    /// end of input at top level.
    fn sequence(&mut self, open: Option<usize>) -> TemplateResult<Vec<Node>> {
        let mut nodes = Vec::new();
        let mut literal = String::new();

        while let Some((pos, c)) = self.chars.next() {
            match c {
                ESCAPE => match self.chars.peek() {
                    Some(&(_, brace @ (OPEN | CLOSE))) => {
                        literal.push(brace);
                        self.chars.next();
                    }
                    Some(_) => literal.push(ESCAPE),
                    None => return Err(FormatError::DanglingEscape { position: pos }),
                },
                OPEN => {
                    flush(&mut literal, &mut nodes);
                    let inner = self.sequence(Some(pos))?;
                    nodes.push(Node::Fragment(inner));
                }
                CLOSE if open.is_some() => {
                    flush(&mut literal, &mut nodes);
                    return Ok(nodes);
                }
                SENTINEL => {
                    let mut token = String::from(SENTINEL);
                    while let Some(&(_, w)) = self.chars.peek() {
                        if !is_word_char(w) {
                            break;
                        }
                        token.push(w);
                        self.chars.next();
                    }
                    if token.len() == SENTINEL.len_utf8() {
                        literal.push(SENTINEL);
                    } else {
                        flush(&mut literal, &mut nodes);
                        nodes.push(Node::Token(token));
                    }
                }
                _ => literal.push(c),
            }
        }

        match open {
            Some(position) => Err(FormatError::UnterminatedFragment { position }),
            None => {
                flush(&mut literal, &mut nodes);
                Ok(nodes)
            }
        }
    }
}

fn flush(literal: &mut String, nodes: &mut Vec<Node>) {
    if !literal.is_empty() {
        nodes.push(Node::Literal(std::mem::take(literal)));
    }
}

/// Render `nodes` into `out`; returns whether any non-empty value was
/// substituted, counting kept nested fragments.
fn render_nodes(nodes: &[Node], values: &KeywordMap, out: &mut String) -> bool {
    let mut substituted = false;
    for node in nodes {
        match node {
            Node::Literal(text) => out.push_str(text),
            Node::Token(token) => match values.get(token) {
                Some(value) => {
                    out.push_str(value);
                    substituted |= !value.is_empty();
                }
                None => out.push_str(token),
            },
            Node::Fragment(inner) => {
                let mut fragment = String::new();
                if render_nodes(inner, values, &mut fragment) {
                    out.push_str(&fragment);
                    substituted = true;
                }
            }
        }
    }
    substituted
}
