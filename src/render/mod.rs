//! Terminal rendering of posts: the card, the listing and its pager.

pub mod sanitize;

use askama::Template;
use chrono::{DateTime, Utc};

use crate::api::models::{Post, PostSummary, Session};
use crate::content::PaginationMeta;
use crate::error::ClientResult;
use crate::forms::{FormState, InputKind};

pub use sanitize::{html_to_text, truncate_line};

pub const EMPTY_LISTING: &str = "No Posts , Add one";
pub const NO_COMMENTS: &str = "No comments add one";

const PREVIEW_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardMode {
    /// One line of content, no owner actions, no comments.
    Preview,
    Full,
}

pub struct CommentLine {
    pub author: String,
    pub date: String,
    pub text: String,
}

#[derive(Template)]
#[template(path = "card.txt")]
pub struct CardTemplate {
    pub id: String,
    pub title: String,
    pub author: String,
    pub published: String,
    pub body: String,
    pub likes: usize,
    pub liked: bool,
    pub comment_count: usize,
    pub views: u64,
    pub full: bool,
    pub owner: bool,
    pub comments: Vec<CommentLine>,
}

/// `Mon Jan 01 2024`
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%a %b %d %Y").to_string()
}

/// The session owns the post. Only a detail post carries its author.
pub fn is_owner(post: &Post, session: Option<&Session>) -> bool {
    match (post.author(), session) {
        (Some(author), Some(session)) => author.id == session.id,
        _ => false,
    }
}

pub fn is_liked(post: &Post, session: Option<&Session>) -> bool {
    session.is_some_and(|s| post.likes().iter().any(|id| *id == s.id))
}

impl CardTemplate {
    pub fn new(post: &Post, session: Option<&Session>, mode: CardMode) -> Self {
        let full = mode == CardMode::Full;
        let text = html_to_text(post.content());
        let body = if full {
            text
        } else {
            truncate_line(&text, PREVIEW_WIDTH)
        };

        let (author, comments) = match post {
            Post::Detail(detail) if full => (
                display_author(&detail.author.first_name, &detail.author.last_name, &detail.author.username),
                detail
                    .comments
                    .iter()
                    .map(|c| CommentLine {
                        author: c.author.username.clone(),
                        date: format_date(c.created_at),
                        text: html_to_text(&c.text),
                    })
                    .collect(),
            ),
            _ => (String::new(), Vec::new()),
        };

        Self {
            id: post.id().to_string(),
            title: html_to_text(post.title()),
            author,
            published: format_date(post.created_at()),
            body,
            likes: post.likes().len(),
            liked: is_liked(post, session),
            comment_count: post.comment_count(),
            views: post.view_count(),
            full,
            owner: full && is_owner(post, session),
            comments,
        }
    }
}

fn display_author(first: &str, last: &str, username: &str) -> String {
    let full = format!("{} {}", first, last);
    match full.trim() {
        "" => username.to_string(),
        name => name.to_string(),
    }
}

pub fn render_card(post: &Post, session: Option<&Session>, mode: CardMode) -> ClientResult<String> {
    Ok(CardTemplate::new(post, session, mode).render()?)
}

/// Pager, e.g. `Page 2 of 5 (posts 11-20 of 41) | prev: 1 | next: 3`, with a
/// second line listing every page when there is more than one.
pub fn render_pager(meta: &PaginationMeta) -> String {
    let mut line = match meta.record_range() {
        Some((start, end)) => format!(
            "Page {} of {} (posts {}-{} of {})",
            meta.current_page, meta.total_pages, start, end, meta.total_count
        ),
        None => format!(
            "Page {} of {} ({} posts)",
            meta.current_page, meta.total_pages, meta.total_count
        ),
    };
    if let Some(first) = meta.first() {
        line.push_str(&format!(" | first: {}", first));
    }
    if let Some(prev) = meta.previous() {
        line.push_str(&format!(" | prev: {}", prev));
    }
    if let Some(next) = meta.next() {
        line.push_str(&format!(" | next: {}", next));
    }
    if let Some(last) = meta.last() {
        line.push_str(&format!(" | last: {}", last));
    }
    if meta.total_pages > 1 {
        let pages: Vec<String> = meta
            .page_numbers()
            .into_iter()
            .map(|n| {
                if n == meta.current_page {
                    format!("[{}]", n)
                } else {
                    n.to_string()
                }
            })
            .collect();
        line.push_str(&format!("\nPages: {}", pages.join(" ")));
    }
    line
}

/// Inline errors of a submitted form, one `label: message` line per field.
///
/// Empty text fields get their placeholder as an example; password
/// placeholders are masks, not examples. The footer link follows the errors.
pub fn render_form_errors(form: &FormState) -> String {
    let mut lines = Vec::new();
    for (field, message) in form.visible_errors() {
        let example = field
            .placeholder
            .filter(|_| field.kind != InputKind::Password)
            .filter(|_| form.values().get(field.name).is_empty());
        match example {
            Some(example) => lines.push(format!("  {}: {} (e.g. {})", field.label, message, example)),
            None => lines.push(format!("  {}: {}", field.label, message)),
        }
    }
    if let Some(footer) = &form.spec().footer {
        lines.push(format!("{} {}: {}", footer.text, footer.link_text, footer.route));
    }
    lines.join("\n")
}

/// Preview cards for a listing page followed by the pager.
pub fn render_post_list(
    posts: &[PostSummary],
    meta: &PaginationMeta,
    session: Option<&Session>,
) -> ClientResult<String> {
    if posts.is_empty() {
        return Ok(EMPTY_LISTING.to_string());
    }
    let mut cards = Vec::with_capacity(posts.len());
    for summary in posts {
        let post = Post::Summary(summary.clone());
        cards.push(render_card(&post, session, CardMode::Preview)?);
    }
    cards.push(render_pager(meta));
    Ok(cards.join("\n\n"))
}
