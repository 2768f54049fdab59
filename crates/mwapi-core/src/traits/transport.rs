//! Signed transport trait.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::types::{RawResponse, RequestParams};

/// A transport that issues already-signed requests against one fixed
/// API endpoint.
///
/// Implementations only move bytes: status checks, JSON decoding and
/// error classification belong to the caller. A failure to obtain any
/// response at all is a [`TransportError`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a GET with the given query parameters.
    async fn get(&self, params: &RequestParams) -> Result<RawResponse, TransportError>;

    /// Perform a POST with query parameters and a form-encoded body.
    async fn post(
        &self,
        params: &RequestParams,
        body: &RequestParams,
    ) -> Result<RawResponse, TransportError>;
}
