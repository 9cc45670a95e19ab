mod common;

use http::StatusCode;
use serde_json::{Value, json};

async fn create_post(app: &common::TestApp, token: &str) -> uuid::Uuid {
    let (status, body) = app
        .post(
            "/posts/create",
            Some(token),
            Some(json!({"title": "Delays", "content": "Again ?", "tags": ["sncf", " ", "sncf"]})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["post"]["tags"], json!(["sncf"]));
    common::id_of(&body["post"])
}

fn counters(body: &Value) -> (i64, i64) {
    (
        body["post"]["likes"].as_i64().unwrap(),
        body["post"]["dislikes"].as_i64().unwrap(),
    )
}

#[tokio::test]
async fn reactions_toggle_and_switch() {
    let app = common::spawn();
    let (alice, token) = app.signup("alice").await;
    let post = create_post(&app, &token).await;

    let (status, body) = app.post(&format!("/posts/like/{post}"), Some(&*token), None).await;
    assert_eq!(status, StatusCode::ACCEPTED, "{body}");
    assert_eq!(counters(&body), (1, 0));
    assert_eq!(body["post"]["liked_by"], json!([alice]));

    let (_, body) = app.post(&format!("/posts/dislike/{post}"), Some(&*token), None).await;
    assert_eq!(counters(&body), (0, 1));
    assert_eq!(body["post"]["liked_by"], json!([]));

    let (_, body) = app.post(&format!("/posts/dislike/{post}"), Some(&*token), None).await;
    assert_eq!(counters(&body), (0, 0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_likes_count_every_user_once() {
    let app = common::spawn();
    let (_, author) = app.signup("author").await;
    let post = create_post(&app, &author).await;

    let mut tokens = Vec::new();
    for i in 0..6 {
        tokens.push(app.signup(&format!("fan{i}")).await.1);
    }
    let path = format!("/posts/like/{post}");
    let handles: Vec<_> = tokens
        .into_iter()
        .map(|t| {
            let app = app.clone();
            let path = path.clone();
            tokio::spawn(async move { app.post(&path, Some(&*t), None).await.0 })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::ACCEPTED);
    }

    let (_, body) = app.post(&format!("/posts/get/{post}"), None, None).await;
    assert_eq!(counters(&body), (6, 0));
    assert_eq!(body["post"]["liked_by"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn only_author_or_admin_edits() {
    let app = common::spawn();
    let (_, author) = app.signup("author").await;
    let (_, other) = app.signup("other").await;
    let (_, admin) = app.admin("root").await;
    let post = create_post(&app, &author).await;

    let (status, _) = app
        .post(&format!("/posts/update/{post}"), Some(&*other), Some(json!({"title": "mine"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .post(&format!("/posts/update/{post}"), Some(&*admin), Some(json!({"title": "Moderated"})))
        .await;
    assert_eq!(status, StatusCode::ACCEPTED, "{body}");
    assert_eq!(body["post"]["title"], "Moderated");
    assert_eq!(body["post"]["content"], "Again ?");
}

#[tokio::test]
async fn deleting_a_post_deletes_its_comments() {
    let app = common::spawn();
    let (_, author) = app.signup("author").await;
    let (_, reader) = app.signup("reader").await;
    let post = create_post(&app, &author).await;

    let (status, body) = app
        .post(&format!("/posts/comment/{post}"), Some(&*reader), Some(json!({"content": "+1"})))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let comment = common::id_of(&body["comment"]);

    let (_, body) = app.post(&format!("/posts/comments/{post}"), None, None).await;
    assert_eq!(body["comments"].as_array().unwrap().len(), 1);

    let (status, body) = app.post(&format!("/posts/delete/{post}"), Some(&*author), None).await;
    assert_eq!(status, StatusCode::ACCEPTED, "{body}");
    assert_eq!(body["deleted_comments"], json!([comment]));

    let (status, _) = app.post(&format!("/comments/get/{comment}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.post(&format!("/posts/get/{post}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // a deleted post takes no reactions or comments
    let (status, _) = app.post(&format!("/posts/like/{post}"), Some(&*reader), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app
        .post(&format!("/posts/comment/{post}"), Some(&*reader), Some(json!({"content": "late"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn comment_owner_rules() {
    let app = common::spawn();
    let (_, author) = app.signup("author").await;
    let (_, reader) = app.signup("reader").await;
    let post = create_post(&app, &author).await;
    let (_, body) = app
        .post(&format!("/posts/comment/{post}"), Some(&*reader), Some(json!({"content": "first"})))
        .await;
    let comment = common::id_of(&body["comment"]);

    let (status, _) = app
        .post(&format!("/comments/update/{comment}"), Some(&*author), Some(json!({"content": "edited"})))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .post(&format!("/comments/update/{comment}"), Some(&*reader), Some(json!({"content": "edited"})))
        .await;
    assert_eq!(status, StatusCode::ACCEPTED, "{body}");
    assert_eq!(body["comment"]["content"], "edited");

    let (status, _) = app
        .post(&format!("/comments/delete/{comment}"), Some(&*reader), None)
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let (_, body) = app.post("/comments/get", None, None).await;
    assert_eq!(body["comments"], json!([]));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = common::spawn();
    let (_, token) = app.signup("alice").await;
    let req = http::Request::builder()
        .method("POST")
        .uri("/posts/create")
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], 1);
}

#[tokio::test]
async fn health_reports_backend() {
    let app = common::spawn();
    let req = http::Request::builder()
        .uri("/health")
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], "memory");
}
