//! Remote-site accessor trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::Result;
use crate::types::Page;

/// Live queries about pages and the remote site.
///
/// Nothing here is cached: every call asks the site again.
#[async_trait]
pub trait SiteAccessor: Send + Sync {
    /// Check whether the page currently exists.
    async fn page_exists(&self, page: &Page) -> Result<bool>;

    /// Returns the site's current server time.
    async fn server_time(&self) -> Result<DateTime<Utc>>;
}
