//! OAuth consumer and access credentials.

use std::fmt;

use mwapi_core::{ApiUrl, Result};

use super::session::{Session, SessionOptions};

/// OAuth 1.0a credentials for an owner-only consumer.
///
/// The four values match the output of the wiki's OAuth consumer
/// registration dialog.
///
/// # Security
///
/// Secrets are never exposed in Debug output, and Display shows only the
/// access key.
///
/// # Example
///
/// ```
/// use mwapi::Authorization;
///
/// let auth = Authorization::new("ck", "cs", "ak", "as");
/// assert_eq!(auth.to_string(), "<Authorization with access key ak>");
/// ```
#[derive(Clone)]
pub struct Authorization {
    client_key: String,
    client_secret: String,
    access_key: String,
    access_secret: String,
}

impl Authorization {
    /// Create new credentials.
    pub fn new(
        client_key: impl Into<String>,
        client_secret: impl Into<String>,
        access_key: impl Into<String>,
        access_secret: impl Into<String>,
    ) -> Self {
        Self {
            client_key: client_key.into(),
            client_secret: client_secret.into(),
            access_key: access_key.into(),
            access_secret: access_secret.into(),
        }
    }

    /// Returns the consumer (client) key.
    pub fn client_key(&self) -> &str {
        &self.client_key
    }

    /// Returns the access key.
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Returns the consumer secret.
    ///
    /// # Security
    ///
    /// Use this only when computing signatures. Never log or display it.
    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Returns the access secret.
    pub(crate) fn access_secret(&self) -> &str {
        &self.access_secret
    }

    /// Create a signed session against the given endpoint.
    ///
    /// No network call is made; the first request happens on first use.
    pub fn session(&self, api: &ApiUrl) -> Result<Session> {
        Session::new(api.clone(), self.clone(), SessionOptions::default())
    }

    /// Create a signed session with explicit transport options.
    pub fn session_with(&self, api: &ApiUrl, options: SessionOptions) -> Result<Session> {
        Session::new(api.clone(), self.clone(), options)
    }
}

impl fmt::Debug for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authorization")
            .field("client_key", &self.client_key)
            .field("client_secret", &"[REDACTED]")
            .field("access_key", &self.access_key)
            .field("access_secret", &"[REDACTED]")
            .finish()
    }
}

impl fmt::Display for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Authorization with access key {}>", self.access_key)
    }
}
