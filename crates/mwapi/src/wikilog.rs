//! Event logging to wiki pages and local files.

use std::io;
use std::path::{Component, Path, PathBuf};

use serde_json::Value;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};
use url::Url;

use mwapi_core::{Page, Result};

use crate::api::append_edit;
use crate::client::ApiClient;

/// Default edit summary for log appends.
pub const DEFAULT_SUMMARY: &str = "Updating logs";

/// Appends events to log pages on the wiki.
///
/// Log pages are addressed as `<prefix><name>`, so a prefix of
/// `User:ExampleBot/logs/` puts each log on a subpage of the bot's user page.
#[derive(Debug, Clone)]
pub struct OnWikiLog {
    client: ApiClient,
    prefix: String,
    summary: String,
}

impl OnWikiLog {
    /// Create an on-wiki log under the given title prefix.
    pub fn new(client: ApiClient, prefix: impl Into<String>) -> Self {
        Self {
            client,
            prefix: prefix.into(),
            summary: DEFAULT_SUMMARY.to_string(),
        }
    }

    /// Set the default edit summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Returns the full title of a log page.
    pub fn log_title(&self, log_page: &str) -> String {
        format!("{}{}", self.prefix, log_page)
    }

    /// Append `event` to the log page with the default summary.
    pub async fn append(&self, event: &str, log_page: &str) -> Result<Value> {
        self.append_with_summary(event, log_page, &self.summary).await
    }

    /// Append `event` to the log page with a custom summary.
    #[instrument(skip(self, event))]
    pub async fn append_with_summary(
        &self,
        event: &str,
        log_page: &str,
        summary: &str,
    ) -> Result<Value> {
        let title = self.log_title(log_page);
        debug!(%title, "appending to on-wiki log");
        self.client
            .post(&append_edit(&title, event, summary))
            .await
    }
}

/// Appends page titles and URLs to files in a local directory.
#[derive(Debug, Clone)]
pub struct LocalLog {
    dir: PathBuf,
    article_base: Url,
}

impl LocalLog {
    /// Create a local log writing into `dir`, linking pages under
    /// `article_base` (e.g. `https://test.wikipedia.org/wiki/`).
    pub fn new(dir: impl Into<PathBuf>, article_base: Url) -> Self {
        Self {
            dir: dir.into(),
            article_base,
        }
    }

    /// Returns the line written for a page.
    pub fn entry(&self, page: &Page) -> String {
        format!("{} <{}>\n", page.full_title(), page.url(&self.article_base))
    }

    /// Returns the path of a log file inside the log directory.
    ///
    /// `file` must be a bare file name; anything that could resolve
    /// outside the directory is rejected with `InvalidInput`.
    pub fn path_for(&self, file: &str) -> io::Result<PathBuf> {
        let mut components = Path::new(file).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.dir.join(name)),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("log file must be a plain file name, got '{}'", file),
            )),
        }
    }

    /// Append a page's title and URL to `<dir>/<file>`, creating it if
    /// needed.
    #[instrument(skip(self, page), fields(page = %page))]
    pub async fn append(&self, page: &Page, file: &str) -> io::Result<()> {
        let path = self.path_for(file)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let mut out = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        out.write_all(self.entry(page).as_bytes()).await?;
        out.flush().await?;

        debug!(path = %path.display(), "appended to local log");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mwapi_core::Namespace;
    use tempfile::TempDir;

    fn local_log(dir: &TempDir) -> LocalLog {
        LocalLog::new(
            dir.path(),
            Url::parse("https://test.wikipedia.org/wiki/").unwrap(),
        )
    }

    #[test]
    fn entry_has_title_and_url() {
        let dir = TempDir::new().unwrap();
        let page = Page::new("Sandbox page", Namespace::USER);
        assert_eq!(
            local_log(&dir).entry(&page),
            "User:Sandbox page <https://test.wikipedia.org/wiki/User:Sandbox_page>\n"
        );
    }

    #[tokio::test]
    async fn append_accumulates_lines() {
        let dir = TempDir::new().unwrap();
        let log = local_log(&dir);
        log.append(&Page::new("One", 0), "reviewed.txt").await.unwrap();
        log.append(&Page::new("Two", 0), "reviewed.txt").await.unwrap();

        let written = std::fs::read_to_string(dir.path().join("reviewed.txt")).unwrap();
        assert_eq!(
            written,
            "One <https://test.wikipedia.org/wiki/One>\nTwo <https://test.wikipedia.org/wiki/Two>\n"
        );
    }

    #[tokio::test]
    async fn append_rejects_paths_outside_dir() {
        let dir = TempDir::new().unwrap();
        let log = LocalLog::new(
            dir.path().join("logs"),
            Url::parse("https://test.wikipedia.org/wiki/").unwrap(),
        );
        let page = Page::new("One", 0);

        for name in ["../escaped.txt", "nested/reviewed.txt", "/tmp/reviewed.txt", "..", ""] {
            let err = log.append(&page, name).await.unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "{}", name);
        }
        assert!(!dir.path().join("escaped.txt").exists());
        assert!(!dir.path().join("logs").exists());
    }
}
