//! HTTP plumbing between the stores and the blog API.
//!
//! [`Transport`] is the seam the stores talk through: [`HttpTransport`] sends
//! real requests with `reqwest`, while tests substitute a scripted fake.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

/// A single API call, described independently of any HTTP library.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path segments below the base URL, e.g. `["blogs", "42"]`.
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    /// Session token; attached as the `Authorization` header when present.
    pub token: Option<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| s.to_string()).collect(),
            query: Vec::new(),
            token: None,
            body: None,
        }
    }

    pub fn get(segments: &[&str]) -> Self {
        Self::new(Method::GET, segments)
    }

    pub fn post(segments: &[&str]) -> Self {
        Self::new(Method::POST, segments)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn token(mut self, token: Option<&str>) -> Self {
        self.token = token.map(str::to_string);
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// `/blogs/42`, used for logging and fakes.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// Raw response: status plus decoded JSON body (`Null` when the body was empty).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// Turn an error status into [`ClientError::Api`], keeping the server's `message`.
    pub fn into_result(self) -> ClientResult<Value> {
        if self.status.is_success() {
            return Ok(self.body);
        }
        let message = self
            .body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        Err(ClientError::Api {
            status: self.status,
            message,
        })
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse>;
}

/// `reqwest`-backed transport. No retries and no timeout beyond the client default.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    auth_scheme: String,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            auth_scheme: config.auth_scheme.clone(),
        })
    }

    pub fn url_for(&self, request: &ApiRequest) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(&request.segments);
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let url = self.url_for(&request)?;
        tracing::debug!(method = %request.method, %url, "api request");

        let mut builder = self.client.request(request.method.clone(), url);
        if let Some(token) = &request.token {
            builder = builder.header(AUTHORIZATION, format!("{} {}", self.auth_scheme, token));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                // Error pages are often HTML; the status alone still classifies them.
                Err(_) if !status.is_success() => Value::Null,
                Err(e) => return Err(e.into()),
            }
        };

        tracing::debug!(%status, path = %request.path(), "api response");
        Ok(ApiResponse { status, body })
    }
}
