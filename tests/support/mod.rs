//! In-process fake of the blog REST API, served on an ephemeral port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Map, Value};

use quill::auth::storage::SessionStorage;
use quill::config::ApiConfig;
use quill::notify::RecordingNotifier;
use quill::state::App;

pub const PASSWORD: &str = "password1";
const CREATED_AT: &str = "2024-01-01T09:00:00.000Z";

pub struct Blog {
    pub user: Value,
    pub posts: Vec<Value>,
    pub comments: Vec<Value>,
    /// `METHOD /path` of every request, in arrival order.
    pub hits: Vec<String>,
    /// `Authorization` header values seen on authenticated routes.
    pub auth_headers: Vec<String>,
    pub fail_logout: bool,
}

impl Default for Blog {
    fn default() -> Self {
        Self {
            user: json!({
                "_id": "u1",
                "username": "ada",
                "email": "ada@example.com",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "isAdmin": false
            }),
            posts: Vec::new(),
            comments: Vec::new(),
            hits: Vec::new(),
            auth_headers: Vec::new(),
            fail_logout: false,
        }
    }
}

impl Blog {
    pub fn seed_posts(&mut self, count: usize) {
        for n in 1..=count {
            self.posts.push(json!({
                "_id": format!("p{}", n),
                "userId": "u1",
                "categoryId": "c1",
                "title": format!("Post {}", n),
                "content": format!("<p>Body of post {}</p>", n),
                "image": "https://img.example.com/x.png",
                "isPublish": true,
                "comments": [],
                "likes": [],
                "countOfVisitors": 0,
                "createdAt": CREATED_AT,
                "updatedAt": CREATED_AT
            }));
        }
    }

    pub fn hit_count(&self, prefix: &str) -> usize {
        self.hits.iter().filter(|h| h.starts_with(prefix)).count()
    }

    fn record(&mut self, hit: String, headers: &HeaderMap) {
        if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
            self.auth_headers.push(auth.to_string());
        }
        self.hits.push(hit);
    }

    fn author(&self) -> Value {
        json!({
            "_id": self.user["_id"],
            "username": self.user["username"],
            "firstName": self.user["firstName"],
            "lastName": self.user["lastName"]
        })
    }

    fn expand(&self, post: &Value) -> Value {
        let mut detail = post.clone();
        detail["userId"] = self.author();
        detail["categoryId"] = json!({ "_id": post["categoryId"], "name": "Tech" });
        let ids: Vec<&Value> = post["comments"].as_array().map(|c| c.iter().collect()).unwrap_or_default();
        detail["comments"] = Value::Array(
            self.comments
                .iter()
                .filter(|c| ids.contains(&&c["_id"]))
                .map(|c| {
                    let mut c = c.clone();
                    c["userId"] = self.author();
                    c
                })
                .collect(),
        );
        detail
    }
}

pub type Shared = Arc<Mutex<Blog>>;

type Reply = (StatusCode, Json<Value>);

fn reply(status: StatusCode, body: Value) -> Reply {
    (status, Json(body))
}

fn not_found() -> Reply {
    reply(StatusCode::NOT_FOUND, json!({ "message": "Blog not found" }))
}

async fn register(State(blog): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    let mut blog = blog.lock().unwrap();
    blog.record("POST /users".into(), &headers);
    if let (Value::Object(user), Value::Object(fields)) = (&mut blog.user, body) {
        for (key, value) in fields {
            if key != "password" {
                user.insert(key, value);
            }
        }
    }
    let user = blog.user.clone();
    reply(StatusCode::CREATED, json!({ "token": "tok-registered", "data": user }))
}

async fn login(State(blog): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    let mut blog = blog.lock().unwrap();
    blog.record("POST /auth/login".into(), &headers);
    if body["password"] != PASSWORD {
        return reply(StatusCode::UNAUTHORIZED, json!({ "message": "Please enter valid email and password" }));
    }
    let user = blog.user.clone();
    reply(StatusCode::OK, json!({ "token": "tok-1", "user": user }))
}

async fn logout(State(blog): State<Shared>, headers: HeaderMap) -> Reply {
    let mut blog = blog.lock().unwrap();
    blog.record("GET /auth/logout".into(), &headers);
    if blog.fail_logout {
        return reply(StatusCode::INTERNAL_SERVER_ERROR, json!({ "message": "Logout failed" }));
    }
    reply(StatusCode::OK, json!({ "message": "Logged out" }))
}

async fn update_user(
    State(blog): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Map<String, Value>>,
) -> Reply {
    let mut blog = blog.lock().unwrap();
    blog.record(format!("PATCH /users/{}", id), &headers);
    if let Value::Object(user) = &mut blog.user {
        for (key, value) in body {
            if key != "password" {
                user.insert(key, value);
            }
        }
    }
    let user = blog.user.clone();
    reply(StatusCode::ACCEPTED, json!({ "error": false, "new": user }))
}

async fn list_posts(
    State(blog): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Reply {
    let mut blog = blog.lock().unwrap();
    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(20);
    blog.record(format!("GET /blogs?page={}", page), &headers);

    let total = blog.posts.len();
    let data: Vec<Value> = blog.posts.iter().skip((page - 1) * limit).take(limit).cloned().collect();
    let next = if page * limit < total { json!(page + 1) } else { json!(false) };
    let previous = if page > 1 { json!(page - 1) } else { json!(false) };
    reply(
        StatusCode::OK,
        json!({
            "error": false,
            "data": data,
            "details": { "totalRecords": total, "pages": { "next": next, "previous": previous } }
        }),
    )
}

async fn get_post(State(blog): State<Shared>, Path(id): Path<String>, headers: HeaderMap) -> Reply {
    let mut blog = blog.lock().unwrap();
    blog.record(format!("GET /blogs/{}", id), &headers);
    let Some(index) = blog.posts.iter().position(|p| p["_id"] == id.as_str()) else {
        return not_found();
    };
    let visitors = blog.posts[index]["countOfVisitors"].as_u64().unwrap_or(0);
    blog.posts[index]["countOfVisitors"] = json!(visitors + 1);
    let detail = blog.expand(&blog.posts[index]);
    reply(StatusCode::OK, json!({ "error": false, "data": detail }))
}

async fn create_post(State(blog): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    let mut blog = blog.lock().unwrap();
    blog.record("POST /blogs".into(), &headers);
    let id = format!("p{}", blog.posts.len() + 1);
    let post = json!({
        "_id": id,
        "userId": "u1",
        "categoryId": body["categoryId"],
        "title": body["title"],
        "content": body["content"],
        "image": body["image"],
        "isPublish": true,
        "comments": [],
        "likes": [],
        "countOfVisitors": 0,
        "createdAt": CREATED_AT,
        "updatedAt": CREATED_AT
    });
    blog.posts.push(post.clone());
    reply(StatusCode::CREATED, json!({ "error": false, "data": post }))
}

async fn update_post(
    State(blog): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut blog = blog.lock().unwrap();
    blog.record(format!("PUT /blogs/{}", id), &headers);
    let Some(post) = blog.posts.iter_mut().find(|p| p["_id"] == id.as_str()) else {
        return not_found();
    };
    for key in ["categoryId", "title", "content", "image"] {
        post[key] = body[key].clone();
    }
    let post = post.clone();
    reply(StatusCode::ACCEPTED, json!({ "error": false, "data": post }))
}

async fn delete_post(State(blog): State<Shared>, Path(id): Path<String>, headers: HeaderMap) -> Reply {
    let mut blog = blog.lock().unwrap();
    blog.record(format!("DELETE /blogs/{}", id), &headers);
    let before = blog.posts.len();
    blog.posts.retain(|p| p["_id"] != id.as_str());
    if blog.posts.len() == before {
        return not_found();
    }
    reply(StatusCode::OK, json!({ "error": false }))
}

async fn like_post(State(blog): State<Shared>, Path(id): Path<String>, headers: HeaderMap) -> Reply {
    let mut blog = blog.lock().unwrap();
    blog.record(format!("POST /blogs/{}/postlike", id), &headers);
    let user_id = blog.user["_id"].clone();
    let Some(post) = blog.posts.iter_mut().find(|p| p["_id"] == id.as_str()) else {
        return not_found();
    };
    if let Some(likes) = post["likes"].as_array_mut() {
        match likes.iter().position(|l| *l == user_id) {
            Some(index) => {
                likes.remove(index);
            }
            None => likes.push(user_id),
        }
    }
    reply(StatusCode::OK, json!({ "error": false }))
}

async fn add_comment(State(blog): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    let mut blog = blog.lock().unwrap();
    blog.record("POST /comments".into(), &headers);
    let id = format!("k{}", blog.comments.len() + 1);
    let blog_id = body["blogId"].clone();
    let comment = json!({
        "_id": id,
        "blogId": blog_id,
        "userId": blog.user["_id"],
        "comment": body["comment"],
        "createdAt": "2024-01-02T10:00:00.000Z"
    });
    blog.comments.push(comment.clone());
    if let Some(post) = blog.posts.iter_mut().find(|p| p["_id"] == blog_id) {
        if let Some(ids) = post["comments"].as_array_mut() {
            ids.push(json!(id));
        }
    }
    reply(StatusCode::CREATED, json!({ "error": false, "data": comment }))
}

async fn categories(State(blog): State<Shared>, headers: HeaderMap) -> Reply {
    blog.lock().unwrap().record("GET /categories".into(), &headers);
    reply(
        StatusCode::OK,
        json!({ "error": false, "data": [{ "_id": "c1", "name": "Tech" }, { "_id": "c2", "name": "Travel" }] }),
    )
}

pub fn router(blog: Shared) -> Router {
    Router::new()
        .route("/users", post(register))
        .route("/users/{id}", patch(update_user))
        .route("/auth/login", post(login))
        .route("/auth/logout", get(logout))
        .route("/blogs", get(list_posts).post(create_post))
        .route("/blogs/{id}", get(get_post).put(update_post).delete(delete_post))
        .route("/blogs/{id}/postlike", post(like_post))
        .route("/comments", post(add_comment))
        .route("/categories", get(categories))
        .with_state(blog)
}

/// Start the fake API and return its base URL and shared state.
pub async fn spawn(blog: Blog) -> (String, Shared) {
    let shared: Shared = Arc::new(Mutex::new(blog));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake api");
    let addr = listener.local_addr().expect("fake api addr");
    let app = router(shared.clone());
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve fake api") });
    (format!("http://{}", addr), shared)
}

pub struct Client {
    pub app: App,
    pub storage: Arc<dyn SessionStorage>,
    pub notifier: Arc<RecordingNotifier>,
    pub blog: Shared,
    pub base_url: String,
    pub session_path: std::path::PathBuf,
    _dir: tempfile::TempDir,
}

/// A client wired to a fresh fake API with a file-backed session in a temp dir.
pub async fn client(blog: Blog) -> Client {
    let (base_url, shared) = spawn(blog).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let session_path = dir.path().join("session.json");
    connect(base_url, shared, dir, session_path)
}

/// Another client sharing the same fake API and session file, as after a restart.
pub fn reopen(previous: &Client) -> App {
    build_app(&previous.base_url, &previous.session_path, previous.notifier.clone())
}

fn connect(base_url: String, blog: Shared, dir: tempfile::TempDir, session_path: std::path::PathBuf) -> Client {
    let notifier = Arc::new(RecordingNotifier::new());
    let app = build_app(&base_url, &session_path, notifier.clone());
    let storage = app.storage.clone();
    Client {
        app,
        storage,
        notifier,
        blog,
        base_url,
        session_path,
        _dir: dir,
    }
}

fn build_app(base_url: &str, session_path: &std::path::Path, notifier: Arc<RecordingNotifier>) -> App {
    let mut config = quill::config::Config::default();
    config.api = ApiConfig {
        base_url: base_url.to_string(),
        auth_scheme: "Token".to_string(),
    };
    config.storage.session_path = Some(session_path.to_path_buf());
    App::from_config(&config, notifier).expect("build app")
}
