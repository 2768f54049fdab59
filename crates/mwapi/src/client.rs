//! The API client: composition root for signed, validated requests.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use mwapi_core::{
    ApiUrl, Namespace, NotFoundError, Page, RequestParams, Result, SiteAccessor, TokenType,
    Transport, Verb,
};

use crate::api::{Dispatcher, TokenProvider};
use crate::auth::Authorization;
use crate::diagnostics::ErrorReporter;
use crate::site::ApiSite;

/// A client for one MediaWiki API endpoint.
///
/// Construct one client at the process entry point and hand it (or clones
/// of it) to everything that talks to the wiki. Clones share the same
/// transport and are cheap.
///
/// # Example
///
/// ```no_run
/// use mwapi::{ApiClient, ApiUrl, Authorization, RequestParams, TokenType};
///
/// # async fn example() -> Result<(), mwapi::Error> {
/// let api = ApiUrl::new("https://test.wikipedia.org/w/api.php")?;
/// let client = ApiClient::new(api, Authorization::new("ck", "cs", "ak", "as"))?;
///
/// let token = client.get_token(TokenType::Watch).await?;
/// let page = client.get_page("Sandbox", 0, true).await?;
/// println!("{} exists; watch token {}", page, token);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    dispatcher: Dispatcher,
    tokens: TokenProvider,
    site: Arc<dyn SiteAccessor>,
}

impl ApiClient {
    /// Create a client with a signed session and default diagnostics.
    pub fn new(api: ApiUrl, authorization: Authorization) -> Result<Self> {
        let session = authorization.session(&api)?;
        Ok(Self::builder(session).build())
    }

    /// Start building a client over any transport.
    pub fn builder(transport: impl Transport + 'static) -> ApiClientBuilder {
        ApiClientBuilder {
            transport: Arc::new(transport),
            reporter: ErrorReporter::default(),
            site: None,
        }
    }

    /// Returns the request dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    /// Returns the diagnostics reporter.
    pub fn reporter(&self) -> &ErrorReporter {
        self.inner.dispatcher.reporter()
    }

    /// Send a GET request.
    ///
    /// `format=json` is added unless `params` sets `format`.
    #[instrument(skip(self, params))]
    pub async fn get(&self, params: &RequestParams) -> Result<Value> {
        self.inner.dispatcher.dispatch(Verb::Get, params, None).await
    }

    /// Send a POST request authorized with a fresh CSRF token.
    pub async fn post(&self, params: &RequestParams) -> Result<Value> {
        self.post_with_token(params, TokenType::Csrf).await
    }

    /// Send a POST request authorized with a fresh token of the given type.
    ///
    /// `params` become the query string; the form body carries only the
    /// token. A `token` in `params` is dropped so the request carries
    /// exactly one.
    #[instrument(skip(self, params), fields(token_type = %token_type))]
    pub async fn post_with_token(
        &self,
        params: &RequestParams,
        token_type: TokenType,
    ) -> Result<Value> {
        let mut query = params.clone();
        if query.remove("token").is_some() {
            warn!("ignoring caller-supplied token parameter");
        }

        let token = self.inner.tokens.fetch(token_type).await?;
        let body = RequestParams::new().with("token", token);
        debug!("posting with fresh token");
        self.inner
            .dispatcher
            .dispatch(Verb::Post, &query, Some(&body))
            .await
    }

    /// Fetch a fresh token of the given type.
    pub async fn get_token(&self, token_type: TokenType) -> Result<String> {
        self.inner.tokens.fetch(token_type).await
    }

    /// Returns a page reference, optionally requiring that it exists.
    ///
    /// Without `must_exist` no request is made and the page may not exist;
    /// use [`page_exists`](Self::page_exists) to check.
    ///
    /// # Errors
    ///
    /// Returns [`mwapi_core::Error::NotFound`] if `must_exist` is set and the
    /// page does not exist.
    #[instrument(skip(self, namespace))]
    pub async fn get_page(
        &self,
        title: &str,
        namespace: impl Into<Namespace>,
        must_exist: bool,
    ) -> Result<Page> {
        let page = Page::new(title, namespace);
        if must_exist && !self.page_exists(&page).await? {
            info!(page = %page, "required page does not exist");
            return Err(NotFoundError {
                title: page.full_title(),
            }
            .into());
        }
        Ok(page)
    }

    /// Check whether a page currently exists.
    pub async fn page_exists(&self, page: &Page) -> Result<bool> {
        self.inner.site.page_exists(page).await
    }

    /// Returns the site's current server time.
    pub async fn site_time(&self) -> Result<DateTime<Utc>> {
        self.inner.site.server_time().await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("dispatcher", &self.inner.dispatcher)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    transport: Arc<dyn Transport>,
    reporter: ErrorReporter,
    site: Option<Arc<dyn SiteAccessor>>,
}

impl ApiClientBuilder {
    /// Set the diagnostics reporter.
    pub fn reporter(mut self, reporter: ErrorReporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Use an external accessor for existence checks and server time
    /// instead of querying the API directly.
    pub fn site_accessor(mut self, site: impl SiteAccessor + 'static) -> Self {
        self.site = Some(Arc::new(site));
        self
    }

    /// Build the client.
    pub fn build(self) -> ApiClient {
        let dispatcher = Dispatcher::new(self.transport, self.reporter);
        let tokens = TokenProvider::new(dispatcher.clone());
        let site: Arc<dyn SiteAccessor> = match self.site {
            Some(site) => site,
            None => Arc::new(ApiSite::new(dispatcher.clone())),
        };

        ApiClient {
            inner: Arc::new(ClientInner {
                dispatcher,
                tokens,
                site,
            }),
        }
    }
}
