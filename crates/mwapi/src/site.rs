//! API-backed page existence and server time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, instrument};

use mwapi_core::{ApiError, ApiErrorKind, Page, Payload, Result, SiteAccessor, Verb};

use crate::api::{Dispatcher, page_info_query, site_info_query};

/// A [`SiteAccessor`] that answers by querying the API.
#[derive(Debug, Clone)]
pub struct ApiSite {
    dispatcher: Dispatcher,
}

impl ApiSite {
    /// Create an accessor over a dispatcher.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    fn malformed(&self, message: &str, data: Value) -> mwapi_core::Error {
        self.dispatcher.fail(
            ApiError::new(ApiErrorKind::MalformedResponse, message).with_payload(Payload::Json(data)),
        )
    }
}

#[async_trait]
impl SiteAccessor for ApiSite {
    #[instrument(skip(self, page), fields(page = %page))]
    async fn page_exists(&self, page: &Page) -> Result<bool> {
        let data = self
            .dispatcher
            .dispatch(Verb::Get, &page_info_query(page), None)
            .await?;

        // Absent pages come back flagged rather than omitted.
        let exists = data
            .pointer("/query/pages/0")
            .map(|p| p.get("missing").is_none() && p.get("invalid").is_none());

        match exists {
            Some(exists) => {
                debug!(exists, "page existence checked");
                Ok(exists)
            }
            None => Err(self.malformed("no page entry in info query", data)),
        }
    }

    #[instrument(skip(self))]
    async fn server_time(&self) -> Result<DateTime<Utc>> {
        let data = self
            .dispatcher
            .dispatch(Verb::Get, &site_info_query(), None)
            .await?;

        let time = data
            .pointer("/query/general/time")
            .and_then(Value::as_str)
            .map(DateTime::parse_from_rfc3339);

        match time {
            Some(Ok(time)) => Ok(time.with_timezone(&Utc)),
            Some(Err(e)) => Err(self.malformed(&format!("unparseable server time: {}", e), data)),
            None => Err(self.malformed("no server time in site info", data)),
        }
    }
}
