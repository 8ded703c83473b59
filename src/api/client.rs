use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::models::{
    Category, Credentials, Envelope, NewComment, PostDetail, PostForm, PostSummary,
    ProfileUpdate, Registration, Session,
};
use super::transport::{ApiRequest, Transport};
use crate::error::{ClientError, ClientResult};

/// Fixed number of posts per listing page.
pub const PAGE_SIZE: u32 = 10;

/// Typed endpoints of the blog API. Every method is exactly one round trip.
#[derive(Clone)]
pub struct BlogApi {
    transport: Arc<dyn Transport>,
}

#[derive(Deserialize)]
struct AuthResponse {
    token: String,
    #[serde(default)]
    data: Option<Map<String, Value>>,
    #[serde(default)]
    user: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
struct UpdateResponse {
    #[serde(default)]
    new: Option<Map<String, Value>>,
    #[serde(default)]
    data: Option<Map<String, Value>>,
}

impl BlogApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn call(&self, request: ApiRequest) -> ClientResult<Value> {
        let method = request.method.clone();
        let path = request.path();
        let result = self.transport.send(request).await?.into_result();
        if let Err(e) = &result {
            tracing::warn!(%method, %path, error = %e, "api call failed");
        }
        result
    }

    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<T> {
        let body = self.call(request).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// `POST /users`. The new user arrives under `data`, next to the token.
    pub async fn register(&self, registration: &Registration) -> ClientResult<Session> {
        let request = ApiRequest::post(&["users"]).json(serde_json::to_value(registration)?);
        let response: AuthResponse = self.fetch(request).await?;
        let user = response.data.or(response.user).unwrap_or_default();
        Ok(Session::from_user(&response.token, user)?)
    }

    /// `POST /auth/login`. The user arrives under `user`, next to the token.
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<Session> {
        let request = ApiRequest::post(&["auth", "login"]).json(serde_json::to_value(credentials)?);
        let response: AuthResponse = self.fetch(request).await?;
        let user = response.user.or(response.data).unwrap_or_default();
        Ok(Session::from_user(&response.token, user)?)
    }

    /// `GET /auth/logout`.
    pub async fn logout(&self, token: Option<&str>) -> ClientResult<()> {
        self.call(ApiRequest::get(&["auth", "logout"]).token(token))
            .await?;
        Ok(())
    }

    /// `PATCH /users/{id}`. Returns the user fields the server echoed back.
    pub async fn update_user(
        &self,
        id: &str,
        token: Option<&str>,
        update: &ProfileUpdate,
    ) -> ClientResult<Map<String, Value>> {
        let request = ApiRequest::new(Method::PATCH, &["users", id])
            .token(token)
            .json(serde_json::to_value(update)?);
        let response: UpdateResponse = self.fetch(request).await?;
        Ok(response.new.or(response.data).unwrap_or_default())
    }

    /// `GET /blogs?limit=10&page=N`, or the unfiltered `GET /blogs` without a page.
    pub async fn list_posts(&self, page: Option<u32>) -> ClientResult<Envelope<Vec<PostSummary>>> {
        let request = match page {
            Some(page) => ApiRequest::get(&["blogs"])
                .query("limit", PAGE_SIZE)
                .query("page", page),
            None => ApiRequest::get(&["blogs"]),
        };
        self.fetch(request).await
    }

    /// `GET /blogs/{id}`, authenticated when a token is available.
    pub async fn get_post(&self, id: &str, token: Option<&str>) -> ClientResult<PostDetail> {
        let envelope: Envelope<PostDetail> =
            self.fetch(ApiRequest::get(&["blogs", id]).token(token)).await?;
        Ok(envelope.data)
    }

    pub async fn create_post(&self, token: Option<&str>, form: &PostForm) -> ClientResult<()> {
        let request = ApiRequest::post(&["blogs"])
            .token(token)
            .json(serde_json::to_value(form)?);
        self.call(request).await?;
        Ok(())
    }

    pub async fn update_post(
        &self,
        token: Option<&str>,
        id: &str,
        form: &PostForm,
    ) -> ClientResult<()> {
        let request = ApiRequest::new(Method::PUT, &["blogs", id])
            .token(token)
            .json(serde_json::to_value(form)?);
        self.call(request).await?;
        Ok(())
    }

    pub async fn delete_post(&self, token: Option<&str>, id: &str) -> ClientResult<()> {
        self.call(ApiRequest::new(Method::DELETE, &["blogs", id]).token(token))
            .await?;
        Ok(())
    }

    /// `POST /blogs/{id}/postlike`. Whether this likes or unlikes is up to the server.
    pub async fn like_post(&self, token: Option<&str>, id: &str) -> ClientResult<()> {
        self.call(ApiRequest::post(&["blogs", id, "postlike"]).token(token))
            .await?;
        Ok(())
    }

    pub async fn add_comment(&self, token: Option<&str>, comment: &NewComment) -> ClientResult<()> {
        let request = ApiRequest::post(&["comments"])
            .token(token)
            .json(serde_json::to_value(comment)?);
        self.call(request).await?;
        Ok(())
    }

    pub async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        let envelope: Envelope<Vec<Category>> =
            self.fetch(ApiRequest::get(&["categories"])).await?;
        Ok(envelope.data)
    }
}

impl std::fmt::Debug for BlogApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlogApi").finish_non_exhaustive()
    }
}

/// Convenience for callers that only need the error side of a validation check.
pub(crate) fn require_id(id: &str) -> ClientResult<()> {
    if id.trim().is_empty() {
        Err(ClientError::validation("Post id is required"))
    } else {
        Ok(())
    }
}
