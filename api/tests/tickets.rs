mod common;

use http::StatusCode;
use serde_json::json;

use railroad_api::domain::users::user::Role;

#[tokio::test]
async fn passenger_books_then_employee_validates_once() {
    let app = common::spawn();
    let (_, admin) = app.admin("root").await;
    let (alice, alice_token) = app.signup("alice").await;
    let (clerk, clerk_token) = app.signup("clerk").await;
    app.promote(clerk, Role::Employee).await;
    let a = app.seed_station("A").await;
    let b = app.seed_station("B").await;
    let train = app.seed_train(&admin, a, b).await;

    let (status, body) = app
        .post("/tickets/book", Some(&*alice_token), Some(json!({"train": train})))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["ticket"]["user"], json!(alice));
    assert!(body["ticket"]["validated_at"].is_null());
    let ticket = common::id_of(&body["ticket"]);

    // passengers cannot stamp their own ticket
    let (status, _) = app
        .post(&format!("/tickets/validate/{ticket}"), Some(&*alice_token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .post(&format!("/tickets/validate/{ticket}"), Some(&*clerk_token), None)
        .await;
    assert_eq!(status, StatusCode::ACCEPTED, "{body}");
    let first = body["ticket"]["validated_at"].clone();
    assert!(first.is_string());

    let (_, body) = app
        .post(&format!("/tickets/validate/{ticket}"), Some(&*clerk_token), None)
        .await;
    assert_eq!(body["ticket"]["validated_at"], first);
}

#[tokio::test]
async fn booking_for_someone_else_needs_employee() {
    let app = common::spawn();
    let (_, admin) = app.admin("root").await;
    let (alice, alice_token) = app.signup("alice").await;
    let (bob, _) = app.signup("bob").await;
    let a = app.seed_station("A").await;
    let b = app.seed_station("B").await;
    let train = app.seed_train(&admin, a, b).await;

    let (status, _) = app
        .post(
            "/tickets/book",
            Some(&*alice_token),
            Some(json!({"user": bob, "train": train})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .post(
            "/tickets/book",
            Some(&*admin),
            Some(json!({"user": alice, "train": train})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["ticket"]["user"], json!(alice));
}

#[tokio::test]
async fn booking_a_deleted_train_fails() {
    let app = common::spawn();
    let (_, admin) = app.admin("root").await;
    let (_, token) = app.signup("alice").await;
    let a = app.seed_station("A").await;
    let b = app.seed_station("B").await;
    let train = app.seed_train(&admin, a, b).await;
    app.post(&format!("/trains/delete/{train}"), Some(&*admin), None)
        .await;

    let (status, body) = app
        .post("/tickets/book", Some(&*token), Some(json!({"train": train})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_message"], "Can't find train or user !");

    let (status, body) = app.post("/tickets/get", Some(&*admin), None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["tickets"], json!([]));
}

#[tokio::test]
async fn booking_for_a_missing_or_deleted_user_fails() {
    let app = common::spawn();
    let (_, admin) = app.admin("root").await;
    let (gone, gone_token) = app.signup("gone").await;
    let a = app.seed_station("A").await;
    let b = app.seed_station("B").await;
    let train = app.seed_train(&admin, a, b).await;
    let (status, _) = app.post("/users/delete", Some(&*gone_token), None).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    for user in [gone, uuid::Uuid::new_v4()] {
        let (status, body) = app
            .post(
                "/tickets/book",
                Some(&*admin),
                Some(json!({"user": user, "train": train})),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{body}");
        assert_eq!(body["error_message"], "Can't find train or user !");
    }

    let (status, body) = app.post("/tickets/get", Some(&*admin), None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["tickets"], json!([]));
}

#[tokio::test]
async fn ticket_reads_are_for_employees() {
    let app = common::spawn();
    let (_, token) = app.signup("alice").await;
    let (status, _) = app.post("/tickets/get", Some(&*token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, admin) = app.admin("root").await;
    let (status, body) = app.post("/tickets/get", Some(&*admin), None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["tickets"], json!([]));
}
