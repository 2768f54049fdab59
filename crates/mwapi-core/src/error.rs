//! Error types for the mwapi toolkit.
//!
//! Failures are split the way callers need to branch on them: transport
//! problems, protocol-level API failures, session precondition failures,
//! and the expected "page does not exist" outcome.

use std::fmt;
use thiserror::Error;

use crate::types::Payload;

/// The unified error type for mwapi operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, request building).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API answered, but not with a usable result.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The session is not in a state that allows the operation.
    #[error("invalid state: {0}")]
    InvalidState(#[from] InvalidStateError),

    /// A page required to exist does not.
    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),

    /// Input validation errors (bad URL, bad token type name).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Check whether this error is the expected nonexistent-page outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// The four ways an API exchange can fail after the transport succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// The response status was in the error range.
    HttpStatus,
    /// The response body was not decodable JSON.
    MalformedResponse,
    /// The decoded JSON carried a top-level `error` key.
    ApiReported,
    /// A token query answered without the requested token field.
    MissingToken,
}

impl ApiErrorKind {
    /// Returns a stable name for the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiErrorKind::HttpStatus => "HTTPStatus",
            ApiErrorKind::MalformedResponse => "MalformedResponse",
            ApiErrorKind::ApiReported => "APIReportedError",
            ApiErrorKind::MissingToken => "MissingToken",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An API-level failure with its raw diagnostic payload.
#[derive(Debug)]
pub struct ApiError {
    kind: ApiErrorKind,
    status: Option<u16>,
    message: String,
    payload: Option<Payload>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            payload: None,
        }
    }

    /// Attach the HTTP status of the failing response.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach the raw diagnostic payload.
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Returns the failure kind.
    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    /// Returns the HTTP status, if the failure came from one.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the diagnostic payload, if any.
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Returns the API's own error code (`error.code`), if reported.
    pub fn code(&self) -> Option<&str> {
        match &self.payload {
            Some(Payload::Json(value)) => value.get("error")?.get("code")?.as_str(),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.kind)?;
        if let Some(status) = self.status {
            write!(f, " HTTP {}", status)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// The session cannot perform the requested operation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct InvalidStateError {
    message: String,
}

impl InvalidStateError {
    /// Create a new invalid-state error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A page that was required to exist does not.
#[derive(Debug, Error)]
#[error("page '{title}' does not exist")]
pub struct NotFoundError {
    /// The full title that was looked up.
    pub title: String,
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API endpoint URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Unknown token type name.
    #[error("unknown token type '{value}'")]
    TokenType { value: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
