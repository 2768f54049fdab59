//! mwapi - OAuth-signed MediaWiki API client.
//!
//! This library provides a small, strongly-typed layer over a single
//! MediaWiki `api.php` endpoint. All calls flow through an [`ApiClient`],
//! which signs requests with OAuth 1.0a credentials, attaches fresh action
//! tokens to POSTs, and classifies failures into typed errors.
//!
//! # Example
//!
//! ```no_run
//! use mwapi::{ApiClient, ApiUrl, Authorization, RequestParams};
//!
//! # async fn example() -> Result<(), mwapi::Error> {
//! let api = ApiUrl::new("https://test.wikipedia.org/w/api.php")?;
//! let auth = Authorization::new("client-key", "client-secret", "access-key", "access-secret");
//! let client = ApiClient::new(api, auth)?;
//!
//! let edit = RequestParams::new()
//!     .with("action", "edit")
//!     .with("title", "Sandbox")
//!     .with("appendtext", "\nHello")
//!     .with("summary", "test edit");
//! let result = client.post(&edit).await?;
//! println!("{}", result["edit"]["result"]);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod diagnostics;
pub mod site;
pub mod wikilog;

// Re-export primary types at crate root for convenience
pub use api::{Dispatcher, EMPTY_TOKEN, TokenProvider};
pub use auth::{Authorization, Session, SessionOptions};
pub use client::{ApiClient, ApiClientBuilder};
pub use diagnostics::ErrorReporter;
pub use mwapi_core::{
    ApiError, ApiErrorKind, ApiUrl, Error, InvalidInputError, InvalidStateError, Namespace,
    NotFoundError, Page, ParamValue, Payload, RawResponse, RequestParams, Result, SiteAccessor,
    TokenType, Transport, TransportError, Verb,
};
pub use site::ApiSite;
pub use wikilog::{LocalLog, OnWikiLog};
