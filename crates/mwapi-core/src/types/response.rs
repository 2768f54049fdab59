//! Raw exchange types shared by transports and the dispatcher.

use serde_json::Value;
use std::fmt;

/// The two HTTP verbs the API is driven with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
}

impl Verb {
    /// Returns the HTTP method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An undecoded HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Create a raw response.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check whether the status is in the error range.
    pub fn is_error_status(&self) -> bool {
        self.status >= 400
    }
}

/// The raw content of a failed exchange, kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Decoded JSON.
    Json(Value),
    /// Bytes that could not be decoded.
    Raw(Vec<u8>),
}

impl Payload {
    /// Check whether there is anything worth recording.
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Json(value) => value.is_null(),
            Payload::Raw(bytes) => bytes.is_empty(),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Json(value) => write!(f, "{}", value),
            Payload::Raw(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
        }
    }
}
