//! mwapi-core - Core MediaWiki API types and traits.
//!
//! This crate holds the vocabulary shared by every part of the toolkit:
//! the error taxonomy, request parameters, token types, page references,
//! and the [`Transport`] and [`SiteAccessor`] seams that concrete clients
//! implement.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{
    ApiError, ApiErrorKind, Error, InvalidInputError, InvalidStateError, NotFoundError,
    TransportError,
};
pub use traits::{SiteAccessor, Transport};
pub use types::{
    ApiUrl, Namespace, Page, ParamValue, Payload, RawResponse, RequestParams, TokenType, Verb,
};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
