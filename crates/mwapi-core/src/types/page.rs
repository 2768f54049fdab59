//! Remote page references.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use super::Namespace;

/// Characters escaped in the path form of a title.
///
/// Mirrors the set MediaWiki itself leaves readable in article URLs:
/// `:`, `/`, `(`, `)`, `,` and friends stay literal.
const TITLE_PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// A reference to a titled page in a namespace.
///
/// Constructing a `Page` performs no I/O and does not imply that the page
/// exists; existence is always queried live through a
/// [`SiteAccessor`](crate::SiteAccessor).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    title: String,
    namespace: Namespace,
}

impl Page {
    /// Create a page reference.
    pub fn new(title: impl Into<String>, namespace: impl Into<Namespace>) -> Self {
        Self {
            title: title.into(),
            namespace: namespace.into(),
        }
    }

    /// Returns the title as given.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the namespace.
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Returns the title with its canonical namespace prefix.
    ///
    /// The prefix is skipped when the title already carries it, and for
    /// namespaces without a canonical name.
    pub fn full_title(&self) -> String {
        match self.namespace.canonical_name() {
            Some(prefix) if !prefix.is_empty() && !self.has_prefix(prefix) => {
                format!("{}:{}", prefix, self.title)
            }
            _ => self.title.clone(),
        }
    }

    /// Returns the full title in its URL path form.
    pub fn url_title(&self) -> String {
        let underscored = self.full_title().trim().replace(' ', "_");
        utf8_percent_encode(&underscored, TITLE_PATH).to_string()
    }

    /// Returns the browser URL of the page under an article base such as
    /// `https://test.wikipedia.org/wiki/`.
    pub fn url(&self, article_base: &Url) -> String {
        let base = article_base.as_str();
        if base.ends_with('/') {
            format!("{}{}", base, self.url_title())
        } else {
            format!("{}/{}", base, self.url_title())
        }
    }

    fn has_prefix(&self, prefix: &str) -> bool {
        self.title
            .split_once(':')
            .is_some_and(|(head, _)| head.trim().replace('_', " ").eq_ignore_ascii_case(prefix))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_title())
    }
}
