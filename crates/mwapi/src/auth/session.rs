//! Signed HTTP transport bound to one endpoint.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use tracing::{debug, instrument, trace};

use mwapi_core::{ApiUrl, RawResponse, RequestParams, Result, Transport, TransportError, Verb};

use super::authorization::Authorization;
use super::oauth::Signer;

/// Transport options for a [`Session`].
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Per-request timeout enforced by the HTTP client.
    pub timeout: Option<Duration>,
    /// User-Agent override; defaults to `mwapi/<version>`.
    pub user_agent: Option<String>,
}

/// A long-lived, OAuth-signed transport for one API endpoint.
///
/// Every request is signed with the session's [`Authorization`]. The
/// session keeps no per-request state beyond the HTTP client's connection
/// pool, so it is cheap to clone and safe to share across tasks.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    api: ApiUrl,
    client: reqwest::Client,
    signer: Signer,
}

impl Session {
    /// Create a session. No network I/O happens here.
    pub fn new(api: ApiUrl, authorization: Authorization, options: SessionOptions) -> Result<Self> {
        let user_agent = options
            .user_agent
            .unwrap_or_else(|| concat!("mwapi/", env!("CARGO_PKG_VERSION")).to_string());

        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(transport_error)?;

        Ok(Self {
            inner: Arc::new(SessionInner {
                api,
                client,
                signer: Signer::new(authorization),
            }),
        })
    }

    /// Returns the endpoint this session talks to.
    pub fn api(&self) -> &ApiUrl {
        &self.inner.api
    }

    #[instrument(skip(self, params, body), fields(api = %self.inner.api))]
    async fn send(
        &self,
        verb: Verb,
        params: &RequestParams,
        body: Option<&RequestParams>,
    ) -> std::result::Result<RawResponse, TransportError> {
        let url = self.inner.api.as_url();
        let query = params.to_pairs();
        let form = body.map(RequestParams::to_pairs).unwrap_or_default();
        debug!(%verb, "signed API request");
        trace!(?query, "query parameters");

        let mut signed = query.clone();
        signed.extend(form.iter().cloned());
        let header = self.inner.signer.sign(verb, url, &signed);

        let request = match verb {
            Verb::Get => self.inner.client.get(url.clone()).query(&query),
            Verb::Post => self.inner.client.post(url.clone()).query(&query).form(&form),
        };

        let response = request
            .header(AUTHORIZATION, header)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_error)?;
        trace!(status, bytes = body.len(), "API response");

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

#[async_trait]
impl Transport for Session {
    async fn get(&self, params: &RequestParams) -> std::result::Result<RawResponse, TransportError> {
        self.send(Verb::Get, params, None).await
    }

    async fn post(
        &self,
        params: &RequestParams,
        body: &RequestParams,
    ) -> std::result::Result<RawResponse, TransportError> {
        self.send(Verb::Post, params, Some(body)).await
    }
}

/// Classify a reqwest failure.
pub(crate) fn transport_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("api", &self.inner.api)
            .field("access_key", &self.inner.signer.authorization().access_key())
            .field("secrets", &"[REDACTED]")
            .finish()
    }
}
