//! Posts, categories and pagination as last fetched from the API.
//!
//! Every operation is one request followed by a wholesale replacement of the
//! slice of state it owns. Failures are surfaced through the notifier and leave
//! the previous state in place.

pub mod pagination;

use std::sync::Arc;

use crate::api::client::require_id;
use crate::api::models::{Category, NewComment, PostDetail, PostForm, PostSummary};
use crate::api::BlogApi;
use crate::error::{ClientError, ClientResult};
use crate::forms::definitions::check_post_form;
use crate::notify::Notifier;
use crate::routes::Route;

pub use pagination::PaginationMeta;

pub const POST_CREATED: &str = "Blog created successfully!";
pub const POST_UPDATED: &str = "Blog updated successfully!";
pub const POST_DELETED: &str = "Blog deleted successfully!";
pub const COMMENT_CREATED: &str = "Comment created successfully!";
pub const EMPTY_COMMENT: &str = "Please add the comment";

pub struct ContentStore {
    api: BlogApi,
    notifier: Arc<dyn Notifier>,
    posts: Vec<PostSummary>,
    current: Option<PostDetail>,
    categories: Vec<Category>,
    pagination: PaginationMeta,
    page: u32,
    /// Explicit page whose listing is held. `None` before any load and after the default listing.
    loaded_page: Option<u32>,
}

impl ContentStore {
    pub fn new(api: BlogApi, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            posts: Vec::new(),
            current: None,
            categories: Vec::new(),
            pagination: PaginationMeta::default(),
            page: 1,
            loaded_page: None,
        }
    }

    pub fn posts(&self) -> &[PostSummary] {
        &self.posts
    }

    pub fn current_post(&self) -> Option<&PostDetail> {
        self.current.as_ref()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn pagination(&self) -> &PaginationMeta {
        &self.pagination
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Fetch a listing page. `None` asks for the server's default listing.
    pub async fn list_posts(&mut self, page: Option<u32>) -> ClientResult<&[PostSummary]> {
        let result = self.api.list_posts(page).await;
        let envelope = self.notifier.surface(result)?;

        let current_page = page.unwrap_or(1);
        self.pagination = PaginationMeta::from_details(envelope.details.as_ref(), current_page);
        self.posts = envelope.data;
        self.page = current_page;
        self.loaded_page = page;
        tracing::debug!(
            page = current_page,
            total_pages = self.pagination.total_pages,
            count = self.posts.len(),
            "posts loaded"
        );
        Ok(&self.posts)
    }

    /// Page change rule: a new page number always reloads the listing.
    ///
    /// Setting the page already shown is a no-op once that page has loaded. The
    /// server's default listing never counts as page 1. On failure the previous
    /// page number is kept so it still matches the posts held.
    pub async fn set_page(&mut self, page: u32) -> ClientResult<()> {
        if page == 0 {
            return self
                .notifier
                .surface(Err(ClientError::validation("Page numbers start at 1")));
        }
        if self.loaded_page == Some(page) {
            return Ok(());
        }
        self.list_posts(Some(page)).await.map(|_| ())
    }

    /// Fetch a post in detail form, replacing the one currently held.
    pub async fn get_post(&mut self, token: Option<&str>, id: &str) -> ClientResult<&PostDetail> {
        let result = match require_id(id) {
            Ok(()) => self.api.get_post(id, token).await,
            Err(e) => Err(e),
        };
        let post = self.notifier.surface(result)?;
        Ok(&*self.current.insert(post))
    }

    /// Create a post. The listing is not touched; the caller navigates to a view that refetches.
    pub async fn create_post(&mut self, token: Option<&str>, form: &PostForm) -> ClientResult<Route> {
        let result = match check_post_form(form) {
            Ok(()) => self.api.create_post(token, form).await,
            Err(e) => Err(e),
        };
        self.notifier.surface(result)?;
        self.notifier.success(POST_CREATED);
        Ok(Route::Home)
    }

    pub async fn update_post(
        &mut self,
        token: Option<&str>,
        form: &PostForm,
        id: &str,
    ) -> ClientResult<Route> {
        let result = match require_id(id).and_then(|_| check_post_form(form)) {
            Ok(()) => self.api.update_post(token, id, form).await,
            Err(e) => Err(e),
        };
        self.notifier.surface(result)?;
        self.notifier.success(POST_UPDATED);
        Ok(Route::Home)
    }

    pub async fn delete_post(&mut self, token: Option<&str>, id: &str) -> ClientResult<Route> {
        let result = match require_id(id) {
            Ok(()) => self.api.delete_post(token, id).await,
            Err(e) => Err(e),
        };
        self.notifier.surface(result)?;
        if self.current.as_ref().is_some_and(|p| p.id == id) {
            self.current = None;
        }
        self.notifier.success(POST_DELETED);
        Ok(Route::Home)
    }

    /// Post a comment, then reload the post so the comment arrives with its expanded author.
    pub async fn add_comment(
        &mut self,
        token: Option<&str>,
        post_id: &str,
        text: &str,
    ) -> ClientResult<&PostDetail> {
        if let Err(e) = require_id(post_id) {
            return self.notifier.surface(Err(e));
        }
        if text.trim().is_empty() {
            return self
                .notifier
                .surface(Err(ClientError::validation(EMPTY_COMMENT)));
        }
        let comment = NewComment {
            blog_id: post_id.to_string(),
            comment: text.to_string(),
        };
        let result = self.api.add_comment(token, &comment).await;
        self.notifier.surface(result)?;
        self.notifier.success(COMMENT_CREATED);
        self.get_post(token, post_id).await
    }

    /// Like or unlike (the server decides), then reload the post for the authoritative like list.
    pub async fn add_like(&mut self, token: Option<&str>, post_id: &str) -> ClientResult<&PostDetail> {
        let result = match require_id(post_id) {
            Ok(()) => self.api.like_post(token, post_id).await,
            Err(e) => Err(e),
        };
        self.notifier.surface(result)?;
        self.get_post(token, post_id).await
    }

    pub async fn list_categories(&mut self) -> ClientResult<&[Category]> {
        let result = self.api.list_categories().await;
        self.categories = self.notifier.surface(result)?;
        Ok(&self.categories)
    }
}
