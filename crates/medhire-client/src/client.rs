use std::sync::Arc;
use std::time::Duration;

use medhire_config::ApiConfig;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::error::ApiError;
use crate::http::read_response;
use crate::request::{ApiRequest, RequestBody};
use crate::transport::Transport;

/// HTTP client for the recruiter API.
///
/// Every request carries the cookie jar, so the backend can authenticate
/// through its session cookie whether or not a token is held client-side.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    origin: reqwest::Url,
    jar: Arc<Jar>,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the base URL does not parse or
    /// the underlying `reqwest::Client` cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = config.normalized_base_url().to_string();
        let origin = reqwest::Url::parse(&base_url)
            .map_err(|e| ApiError::InvalidRequest(format!("base URL '{base_url}': {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("http client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            origin,
            jar,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current `Cookie` header value for the API origin, if any cookies are set.
    #[must_use]
    pub fn cookie_header(&self) -> Option<String> {
        self.jar
            .cookies(&self.origin)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    /// Re-seed the jar from a header previously returned by [`Self::cookie_header`].
    pub fn restore_cookies(&self, header: &str) {
        for pair in header.split(';').map(str::trim).filter(|p| p.contains('=')) {
            self.jar.add_cookie_str(pair, &self.origin);
        }
    }

    async fn execute(&self, endpoint: &str, request: ApiRequest) -> Result<Value, ApiError> {
        let url = format!("{}{endpoint}", self.base_url);
        let mut builder = self.http.request(request.method.into(), &url);

        if let Some(query) = &request.query {
            builder = builder.query(query);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(form) => builder.multipart(form.into_reqwest()?),
        };

        let resp = builder.send().await?;
        read_response(resp).await
    }
}

impl Transport for ApiClient {
    async fn send(&self, endpoint: &str, request: ApiRequest) -> Result<Value, ApiError> {
        let method = request.method;
        let result = self.execute(endpoint, request).await;
        if let Err(error) = &result {
            tracing::warn!(
                method = method.as_str(),
                endpoint,
                message = %error,
                "recruiter API request failed"
            );
        }
        result
    }
}
