//! Response validation and classification.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, trace, warn};

use mwapi_core::{
    ApiError, ApiErrorKind, Error, Payload, RawResponse, RequestParams, Result, Transport, Verb,
};

use crate::diagnostics::ErrorReporter;

use super::params::default_params;

/// Sends requests through a [`Transport`] and validates the responses.
///
/// Every request carries `format=json` unless the caller sets `format`
/// itself. A response is accepted only if its status is below 400, its body
/// decodes as JSON, and the JSON has no top-level `error` key; anything
/// else becomes an [`ApiError`] that is handed to the [`ErrorReporter`]
/// before it is returned.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    reporter: ErrorReporter,
}

impl Dispatcher {
    /// Create a dispatcher over a transport.
    pub fn new(transport: Arc<dyn Transport>, reporter: ErrorReporter) -> Self {
        Self {
            transport,
            reporter,
        }
    }

    /// Returns the diagnostics reporter.
    pub fn reporter(&self) -> &ErrorReporter {
        &self.reporter
    }

    /// Send a request and decode the response.
    ///
    /// `body` is only used for [`Verb::Post`].
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] if no response was obtained
    /// - [`Error::Api`] with kind `HttpStatus`, `MalformedResponse` or
    ///   `ApiReported` if the response was unusable
    #[instrument(skip(self, params, body))]
    pub async fn dispatch(
        &self,
        verb: Verb,
        params: &RequestParams,
        body: Option<&RequestParams>,
    ) -> Result<Value> {
        let params = params.merged_over(&default_params());
        trace!(%params, "dispatching");

        let response = match verb {
            Verb::Get => self.transport.get(&params).await?,
            Verb::Post => {
                let empty = RequestParams::new();
                self.transport.post(&params, body.unwrap_or(&empty)).await?
            }
        };

        self.decode(response)
    }

    fn decode(&self, response: RawResponse) -> Result<Value> {
        let status = response.status;

        if response.is_error_status() {
            return Err(self.fail(
                ApiError::new(ApiErrorKind::HttpStatus, format!("response status {}", status))
                    .with_status(status)
                    .with_payload(Payload::Raw(response.body)),
            ));
        }

        let data: Value = match serde_json::from_slice(&response.body) {
            Ok(data) => data,
            Err(e) => {
                return Err(self.fail(
                    ApiError::new(ApiErrorKind::MalformedResponse, format!("no JSON found: {}", e))
                        .with_status(status)
                        .with_payload(Payload::Raw(response.body)),
                ));
            }
        };

        if let Some(message) = data.get("error").map(reported_message) {
            return Err(self.fail(
                ApiError::new(ApiErrorKind::ApiReported, message)
                    .with_status(status)
                    .with_payload(Payload::Json(data)),
            ));
        }

        debug!(status, "API response accepted");
        Ok(data)
    }

    /// Report an API failure and convert it into the crate error.
    pub(crate) fn fail(&self, error: ApiError) -> Error {
        warn!(kind = %error.kind(), message = error.message(), "API failure");
        self.reporter.report(&error);
        Error::Api(error)
    }
}

fn reported_message(error: &Value) -> String {
    let code = error.get("code").and_then(Value::as_str);
    let info = error.get("info").and_then(Value::as_str);
    match (code, info) {
        (Some(code), Some(info)) => format!("'error' field in response: {}: {}", code, info),
        (Some(code), None) => format!("'error' field in response: {}", code),
        _ => "'error' field in response".to_string(),
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("reporter", &self.reporter)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mwapi_core::TransportError;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records the parameters it was called with and answers with a
    /// canned response.
    struct RecordingTransport {
        response: RawResponse,
        seen: Mutex<Vec<(Verb, RequestParams, Option<RequestParams>)>>,
    }

    impl RecordingTransport {
        fn new(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                response: RawResponse::new(status, body.as_bytes()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn last(&self) -> (Verb, RequestParams, Option<RequestParams>) {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn get(
            &self,
            params: &RequestParams,
        ) -> std::result::Result<RawResponse, TransportError> {
            self.seen
                .lock()
                .unwrap()
                .push((Verb::Get, params.clone(), None));
            Ok(self.response.clone())
        }

        async fn post(
            &self,
            params: &RequestParams,
            body: &RequestParams,
        ) -> std::result::Result<RawResponse, TransportError> {
            self.seen
                .lock()
                .unwrap()
                .push((Verb::Post, params.clone(), Some(body.clone())));
            Ok(self.response.clone())
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl Transport for FailingTransport {
        async fn get(&self, _: &RequestParams) -> std::result::Result<RawResponse, TransportError> {
            Err(TransportError::Timeout)
        }

        async fn post(
            &self,
            _: &RequestParams,
            _: &RequestParams,
        ) -> std::result::Result<RawResponse, TransportError> {
            Err(TransportError::Connection {
                message: "refused".to_string(),
            })
        }
    }

    fn dispatcher(transport: Arc<dyn Transport>) -> Dispatcher {
        Dispatcher::new(transport, ErrorReporter::disabled())
    }

    #[tokio::test]
    async fn adds_format_json() {
        let transport = RecordingTransport::new(200, "{}");
        let params = RequestParams::new().with("action", "query");
        dispatcher(transport.clone())
            .dispatch(Verb::Get, &params, None)
            .await
            .unwrap();

        let (verb, sent, body) = transport.last();
        assert_eq!(verb, Verb::Get);
        assert_eq!(sent.to_string(), "format=json&action=query");
        assert!(body.is_none());
    }

    #[tokio::test]
    async fn caller_format_wins() {
        let transport = RecordingTransport::new(200, "{}");
        let params = RequestParams::new().with("format", "jsonfm");
        dispatcher(transport.clone())
            .dispatch(Verb::Get, &params, None)
            .await
            .unwrap();

        let (_, sent, _) = transport.last();
        assert_eq!(sent.to_string(), "format=jsonfm");
    }

    #[tokio::test]
    async fn post_passes_body_separately() {
        let transport = RecordingTransport::new(200, "{}");
        let params = RequestParams::new().with("action", "edit");
        let body = RequestParams::new().with("token", "abc+\\");
        dispatcher(transport.clone())
            .dispatch(Verb::Post, &params, Some(&body))
            .await
            .unwrap();

        let (verb, sent, sent_body) = transport.last();
        assert_eq!(verb, Verb::Post);
        assert!(!sent.contains_key("token"));
        assert_eq!(sent_body, Some(body));
    }

    #[tokio::test]
    async fn success_is_returned_unchanged() {
        let body = r#"{"query":{"pages":[{"title":"Sandbox","ns":0}]},"batchcomplete":true}"#;
        let transport = RecordingTransport::new(200, body);
        let data = dispatcher(transport)
            .dispatch(Verb::Get, &RequestParams::new(), None)
            .await
            .unwrap();
        assert_eq!(data, serde_json::from_str::<Value>(body).unwrap());
    }

    #[tokio::test]
    async fn error_status_is_http_status() {
        let transport = RecordingTransport::new(404, "Not Found");
        let err = dispatcher(transport)
            .dispatch(Verb::Get, &RequestParams::new(), None)
            .await
            .unwrap_err();

        let api = err.as_api().unwrap();
        assert_eq!(api.kind(), ApiErrorKind::HttpStatus);
        assert_eq!(api.status(), Some(404));
        assert_eq!(api.payload(), Some(&Payload::Raw(b"Not Found".to_vec())));
    }

    #[tokio::test]
    async fn undecodable_body_is_malformed() {
        let transport = RecordingTransport::new(200, "not valid json{");
        let err = dispatcher(transport)
            .dispatch(Verb::Get, &RequestParams::new(), None)
            .await
            .unwrap_err();

        let api = err.as_api().unwrap();
        assert_eq!(api.kind(), ApiErrorKind::MalformedResponse);
        assert_eq!(api.payload(), Some(&Payload::Raw(b"not valid json{".to_vec())));
    }

    #[tokio::test]
    async fn error_key_is_api_reported() {
        let transport = RecordingTransport::new(200, r#"{"error": {"code": "badtoken"}}"#);
        let err = dispatcher(transport)
            .dispatch(Verb::Get, &RequestParams::new(), None)
            .await
            .unwrap_err();

        let api = err.as_api().unwrap();
        assert_eq!(api.kind(), ApiErrorKind::ApiReported);
        assert_eq!(api.code(), Some("badtoken"));
        assert_eq!(
            api.payload(),
            Some(&Payload::Json(json!({"error": {"code": "badtoken"}})))
        );
    }

    #[tokio::test]
    async fn transport_failures_propagate() {
        let err = dispatcher(Arc::new(FailingTransport))
            .dispatch(Verb::Get, &RequestParams::new(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Timeout)));

        let err = dispatcher(Arc::new(FailingTransport))
            .dispatch(Verb::Post, &RequestParams::new(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Connection { .. })));
    }

    #[test]
    fn reported_message_includes_code_and_info() {
        let message = reported_message(&json!({"code": "badtoken", "info": "Invalid CSRF token."}));
        assert_eq!(message, "'error' field in response: badtoken: Invalid CSRF token.");
    }
}
