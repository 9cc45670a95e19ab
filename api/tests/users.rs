mod common;

use http::StatusCode;
use serde_json::json;

use railroad_api::domain::users::user::Role;

#[tokio::test]
async fn promotion_unlocks_employee_routes_without_new_token() {
    let app = common::spawn();
    let (id, token) = app.signup("alice").await;

    let (status, body) = app.post("/users/get", Some(&*token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], 1);
    assert_eq!(body["message"], "Error while getting users !");

    app.promote(id, Role::Employee).await;

    let (status, body) = app.post("/users/get", Some(&*token), None).await;
    assert_eq!(status, StatusCode::ACCEPTED, "{body}");
    assert_eq!(body["error"], 0);
    assert_eq!(body["users"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .post(
            "/users/login",
            None,
            Some(json!({"email": "alice@railroad.test", "password": "s3cret"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "employee");
    let fresh = body["token"].as_str().unwrap();
    let (status, _) = app.post("/users/get", Some(fresh), None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    // still not an admin
    let (status, _) = app.post(&format!("/users/set/admin/{id}"), Some(fresh), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_sets_roles_through_the_api() {
    let app = common::spawn();
    let (_, admin) = app.admin("root").await;
    let (bob, bob_token) = app.signup("bob").await;

    let (status, body) = app
        .post(&format!("/users/set/employee/{bob}"), Some(&*admin), None)
        .await;
    assert_eq!(status, StatusCode::ACCEPTED, "{body}");
    assert_eq!(body["user"]["role"], "employee");

    // an employee still cannot promote anyone
    let (status, _) = app
        .post(&format!("/users/set/admin/{bob}"), Some(&*bob_token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn missing_or_bad_tokens_are_unauthorized() {
    let app = common::spawn();
    let (status, body) = app.post("/users/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_message"], "No token provided !");

    let (status, body) = app.post("/users/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_message"], "Invalid token !");
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = common::spawn();
    app.signup("carol").await;
    let (status, body) = app
        .post(
            "/users/register",
            None,
            Some(json!({"pseudo": "carol2", "email": "carol@railroad.test", "password": "x"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], 1);
}

#[tokio::test]
async fn wrong_password_fails_login() {
    let app = common::spawn();
    app.signup("dave").await;
    let (status, body) = app
        .post(
            "/users/login",
            None,
            Some(json!({"email": "dave@railroad.test", "password": "nope"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_message"], "Invalid email or password !");
}

#[tokio::test]
async fn partial_update_keeps_omitted_fields() {
    let app = common::spawn();
    let (_, token) = app.signup("erin").await;
    let (status, body) = app
        .post("/users/update", Some(&*token), Some(json!({"pseudo": "erin2"})))
        .await;
    assert_eq!(status, StatusCode::ACCEPTED, "{body}");
    assert_eq!(body["user"]["pseudo"], "erin2");
    assert_eq!(body["user"]["email"], "erin@railroad.test");

    // the password did not change either
    let (status, _) = app
        .post(
            "/users/login",
            None,
            Some(json!({"email": "erin@railroad.test", "password": "s3cret"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn deleted_account_disappears_and_cannot_log_in() {
    let app = common::spawn();
    let (_, admin) = app.admin("root").await;
    let (frank, token) = app.signup("frank").await;

    let (status, _) = app.post("/users/delete", Some(&*token), None).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, _) = app
        .post(&format!("/users/get/{frank}"), Some(&*admin), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.post("/users/get", Some(&*admin), None).await;
    let users = body["users"].as_array().unwrap();
    assert!(users.iter().all(|u| common::id_of(u) != frank));

    let (status, _) = app
        .post(
            "/users/login",
            None,
            Some(json!({"email": "frank@railroad.test", "password": "s3cret"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // the old token no longer carries any right
    let (status, _) = app.post("/users/me", Some(&*token), None).await;
    assert_ne!(status, StatusCode::ACCEPTED);
}

#[tokio::test]
async fn malformed_path_id_is_not_found() {
    let app = common::spawn();
    let (_, admin) = app.admin("root").await;
    let (status, body) = app.post("/users/get/not-a-uuid", Some(&*admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], 1);
}
