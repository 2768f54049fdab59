//! Action token retrieval.

use serde_json::Value;
use tracing::{debug, instrument};

use mwapi_core::{ApiError, ApiErrorKind, InvalidStateError, Payload, Result, TokenType, Verb};

use super::dispatch::Dispatcher;
use super::params::token_query;

/// The token MediaWiki issues to sessions that may not act: the two
/// characters `+\`.
pub const EMPTY_TOKEN: &str = "+\\";

/// Fetches action tokens through a [`Dispatcher`].
///
/// Tokens are never cached; every call asks the API again.
#[derive(Debug, Clone)]
pub struct TokenProvider {
    dispatcher: Dispatcher,
}

impl TokenProvider {
    /// Create a token provider.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Fetch a fresh token of the given type.
    ///
    /// # Errors
    ///
    /// - [`mwapi_core::Error::Api`] with kind `MissingToken` if the response
    ///   lacks `query.tokens.<type>token`
    /// - [`mwapi_core::Error::InvalidState`] if the API hands out the empty
    ///   token, meaning the session is not authorized to act
    /// - any error from the underlying dispatch
    #[instrument(skip(self), fields(token_type = %token_type))]
    pub async fn fetch(&self, token_type: TokenType) -> Result<String> {
        let query = self
            .dispatcher
            .dispatch(Verb::Get, &token_query(token_type), None)
            .await?;

        let field = token_type.response_field();
        let token = query
            .get("query")
            .and_then(|q| q.get("tokens"))
            .and_then(|t| t.get(&field))
            .and_then(Value::as_str)
            .map(str::to_owned);

        let Some(token) = token else {
            return Err(self.dispatcher.fail(
                ApiError::new(ApiErrorKind::MissingToken, format!("no {} obtained", field))
                    .with_payload(Payload::Json(query)),
            ));
        };

        if token.is_empty() || token == EMPTY_TOKEN {
            return Err(InvalidStateError::new(format!("empty {} token", token_type)).into());
        }

        debug!("token obtained");
        Ok(token)
    }
}
