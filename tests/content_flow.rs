mod support;

use quill::api::models::{Credentials, PostForm};
use quill::content::{COMMENT_CREATED, EMPTY_COMMENT, POST_CREATED};
use quill::notify::NoticeLevel;
use quill::render::{self, EMPTY_LISTING};
use quill::routes::Route;
use support::{Blog, PASSWORD};

fn seeded(count: usize) -> Blog {
    let mut blog = Blog::default();
    blog.seed_posts(count);
    blog
}

async fn logged_in(blog: Blog) -> support::Client {
    let mut client = support::client(blog).await;
    client
        .app
        .session
        .login(&Credentials {
            email: "ada@example.com".into(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap();
    client
}

#[tokio::test]
async fn forty_one_posts_paginate_into_five_pages() {
    let mut client = support::client(seeded(41)).await;

    client.app.content.set_page(2).await.unwrap();
    let posts = client.app.content.posts();
    assert_eq!(posts.len(), 10);
    assert_eq!(posts.first().unwrap().id, "p11");
    assert_eq!(posts.last().unwrap().id, "p20");

    let meta = *client.app.content.pagination();
    assert_eq!(meta.total_count, 41);
    assert_eq!(meta.total_pages, 5);
    assert_eq!(meta.current_page, 2);
    assert!(meta.has_next);
    assert!(meta.has_previous);

    client.app.content.set_page(5).await.unwrap();
    assert_eq!(client.app.content.posts().len(), 1);
    assert!(!client.app.content.pagination().has_next);
}

#[tokio::test]
async fn same_page_is_not_refetched() {
    let mut client = support::client(seeded(12)).await;
    client.app.content.set_page(1).await.unwrap();
    client.app.content.set_page(1).await.unwrap();
    assert_eq!(client.blog.lock().unwrap().hit_count("GET /blogs?page=1"), 1);
}

#[tokio::test]
async fn empty_listing_renders_the_empty_state() {
    let mut client = support::client(Blog::default()).await;
    client.app.content.list_posts(Some(1)).await.unwrap();
    let out = render::render_post_list(
        client.app.content.posts(),
        client.app.content.pagination(),
        None,
    )
    .unwrap();
    assert_eq!(out, EMPTY_LISTING);
}

#[tokio::test]
async fn create_then_list_shows_the_new_post() {
    let mut client = logged_in(Blog::default()).await;
    let token = client.app.session.token().map(str::to_owned);

    let route = client
        .app
        .content
        .create_post(
            token.as_deref(),
            &PostForm {
                category_id: "c1".into(),
                title: "Hello world".into(),
                content: "<p>First!</p>".into(),
                ..PostForm::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(route, Route::Home);
    assert_eq!(client.notifier.last().unwrap().message, POST_CREATED);

    client.app.content.list_posts(Some(1)).await.unwrap();
    assert_eq!(client.app.content.posts()[0].title, "Hello world");
    assert!(client
        .blog
        .lock()
        .unwrap()
        .auth_headers
        .contains(&"Token tok-1".to_string()));
}

#[tokio::test]
async fn invalid_post_form_never_reaches_the_server() {
    let mut client = logged_in(Blog::default()).await;
    let token = client.app.session.token().map(str::to_owned);

    let err = client
        .app
        .content
        .create_post(
            token.as_deref(),
            &PostForm {
                category_id: "c1".into(),
                title: "Hi".into(),
                content: "<p>x</p>".into(),
                ..PostForm::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(client.blog.lock().unwrap().hit_count("POST /blogs"), 0);
}

#[tokio::test]
async fn empty_comment_makes_no_request() {
    let mut client = logged_in(seeded(1)).await;
    let token = client.app.session.token().map(str::to_owned);

    let err = client
        .app
        .content
        .add_comment(token.as_deref(), "p1", "   ")
        .await
        .unwrap_err();
    assert!(err.is_validation());
    let notice = client.notifier.last().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, EMPTY_COMMENT);

    let blog = client.blog.lock().unwrap();
    assert_eq!(blog.hit_count("POST /comments"), 0);
    assert_eq!(blog.hit_count("GET /blogs/p1"), 0);
}

#[tokio::test]
async fn comment_refetches_the_post_with_the_expanded_author() {
    let mut client = logged_in(seeded(1)).await;
    let token = client.app.session.token().map(str::to_owned);

    let post = client
        .app
        .content
        .add_comment(token.as_deref(), "p1", "Great read")
        .await
        .unwrap();
    assert_eq!(post.comments.len(), 1);
    assert_eq!(post.comments[0].text, "Great read");
    assert_eq!(post.comments[0].author.username, "ada");
    assert_eq!(client.notifier.last().unwrap().message, COMMENT_CREATED);
    assert_eq!(client.blog.lock().unwrap().hit_count("GET /blogs/p1"), 1);
}

#[tokio::test]
async fn like_toggles_through_the_server() {
    let mut client = logged_in(seeded(1)).await;
    let token = client.app.session.token().map(str::to_owned);

    let post = client.app.content.add_like(token.as_deref(), "p1").await.unwrap();
    assert_eq!(post.likes, vec!["u1".to_string()]);

    let post = client.app.content.add_like(token.as_deref(), "p1").await.unwrap();
    assert!(post.likes.is_empty());
}

#[tokio::test]
async fn owner_card_offers_edit_and_delete() {
    let mut client = logged_in(seeded(1)).await;
    let token = client.app.session.token().map(str::to_owned);

    let post = client
        .app
        .content
        .get_post(token.as_deref(), "p1")
        .await
        .unwrap()
        .clone();
    let card = render::render_card(
        &quill::api::models::Post::Detail(post),
        client.app.session.current(),
        render::CardMode::Full,
    )
    .unwrap();
    assert!(card.contains("quill edit p1"));
    assert!(card.contains(render::NO_COMMENTS));
    assert!(card.contains("1 visitors"));
}

#[tokio::test]
async fn delete_of_missing_post_keeps_state() {
    let mut client = logged_in(seeded(2)).await;
    let token = client.app.session.token().map(str::to_owned);
    client.app.content.get_post(token.as_deref(), "p2").await.unwrap();

    let err = client
        .app
        .content
        .delete_post(token.as_deref(), "p9")
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Blog not found");
    assert_eq!(client.app.content.current_post().unwrap().id, "p2");

    let route = client
        .app
        .content
        .delete_post(token.as_deref(), "p2")
        .await
        .unwrap();
    assert_eq!(route, Route::Home);
    assert!(client.app.content.current_post().is_none());
}

#[tokio::test]
async fn categories_are_replaced_wholesale() {
    let mut client = support::client(Blog::default()).await;
    let names: Vec<String> = client
        .app
        .content
        .list_categories()
        .await
        .unwrap()
        .iter()
        .map(|c| c.name.clone())
        .collect();
    assert_eq!(names, vec!["Tech", "Travel"]);
}
