use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Image used for new posts until the author picks one.
pub const DEFAULT_POST_IMAGE: &str =
    "https://www.timsahajans.com.tr/data/uploads/Blog-Nedir-Cesitleri-Nelerdir.jpg";

/// The authenticated user plus credential token, as held client-side.
///
/// Unknown fields returned by the API are kept in `extra` so the persisted copy
/// mirrors what the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    pub token: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    /// Build a session from a user record and the token issued alongside it.
    pub fn from_user(token: &str, user: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let mut record = user;
        record.insert("token".to_string(), Value::String(token.to_string()));
        serde_json::from_value(Value::Object(record))
    }

    /// Overlay fields echoed by the server. The token is never replaced.
    pub fn merged_with(&self, update: &Map<String, Value>) -> Result<Self, serde_json::Error> {
        let mut record = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in update {
            if key == "token" {
                continue;
            }
            record.insert(key.clone(), value.clone());
        }
        serde_json::from_value(Value::Object(record))
    }

    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Body of `POST /users`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Partial user sent with `PATCH /users/{id}`. Absent fields are left alone server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Post as returned by the bulk listing: references are opaque ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub author_id: String,
    #[serde(rename = "categoryId")]
    pub category_id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "isPublish", default = "default_true")]
    pub published: bool,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(rename = "countOfVisitors", default)]
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post as returned by `GET /blogs/{id}`: author, category and comments are expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub author: Author,
    #[serde(rename = "categoryId")]
    pub category: Category,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "isPublish", default = "default_true")]
    pub published: bool,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(rename = "countOfVisitors", default)]
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "blogId")]
    pub post_id: String,
    #[serde(rename = "userId")]
    pub author: Author,
    #[serde(rename = "comment")]
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /comments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub blog_id: String,
    pub comment: String,
}

/// Editable fields of a post, sent with `POST /blogs` and `PUT /blogs/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostForm {
    pub category_id: String,
    pub title: String,
    pub content: String,
    pub image: String,
}

impl Default for PostForm {
    fn default() -> Self {
        Self {
            category_id: String::new(),
            title: String::new(),
            content: String::new(),
            image: DEFAULT_POST_IMAGE.to_string(),
        }
    }
}

impl PostForm {
    /// Prefill an edit form from the post being viewed.
    pub fn from_detail(post: &PostDetail) -> Self {
        Self {
            category_id: post.category.id.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            image: post.image.clone(),
        }
    }
}

/// A post in whichever shape it was fetched.
#[derive(Debug, Clone, PartialEq)]
pub enum Post {
    Summary(PostSummary),
    Detail(PostDetail),
}

impl Post {
    pub fn id(&self) -> &str {
        match self {
            Post::Summary(p) => &p.id,
            Post::Detail(p) => &p.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Post::Summary(p) => &p.title,
            Post::Detail(p) => &p.title,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Post::Summary(p) => &p.content,
            Post::Detail(p) => &p.content,
        }
    }

    pub fn image(&self) -> &str {
        match self {
            Post::Summary(p) => &p.image,
            Post::Detail(p) => &p.image,
        }
    }

    pub fn likes(&self) -> &[String] {
        match self {
            Post::Summary(p) => &p.likes,
            Post::Detail(p) => &p.likes,
        }
    }

    pub fn comment_count(&self) -> usize {
        match self {
            Post::Summary(p) => p.comments.len(),
            Post::Detail(p) => p.comments.len(),
        }
    }

    pub fn view_count(&self) -> u64 {
        match self {
            Post::Summary(p) => p.view_count,
            Post::Detail(p) => p.view_count,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Post::Summary(p) => p.created_at,
            Post::Detail(p) => p.created_at,
        }
    }

    /// Only the detail form knows who wrote the post.
    pub fn author(&self) -> Option<&Author> {
        match self {
            Post::Summary(_) => None,
            Post::Detail(p) => Some(&p.author),
        }
    }
}

/// Either a page number or `false` when there is no such page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageLink {
    Page(u32),
    Flag(bool),
}

impl Default for PageLink {
    fn default() -> Self {
        PageLink::Flag(false)
    }
}

impl PageLink {
    pub fn exists(&self) -> bool {
        match self {
            PageLink::Page(_) => true,
            PageLink::Flag(flag) => *flag,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next: PageLink,
    #[serde(default)]
    pub previous: PageLink,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDetails {
    #[serde(default)]
    pub total_records: u64,
    #[serde(default)]
    pub pages: PageLinks,
}

/// Response wrapper used by every API endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub details: Option<ListDetails>,
    #[serde(default)]
    pub error: Option<Value>,
}
