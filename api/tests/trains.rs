mod common;

use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::json;

use railroad_api::bootstrap::config::Config;

const BOUNDARY: &str = "railroad-test-boundary";

fn station_form(name: &str, open: &str, close: &str, image: &[u8]) -> Body {
    let mut body = Vec::new();
    for (field, value) in [("name", name), ("open_hour", open), ("close_hour", close)] {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"s.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(image);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    Body::from(body)
}

fn multipart_request(path: &str, token: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(body)
        .unwrap()
}

#[tokio::test]
async fn admin_creates_station_from_multipart_form() {
    let app = common::spawn();
    let (_, admin) = app.admin("root").await;

    let req = multipart_request(
        "/trainstations/create",
        &admin,
        station_form("Lyon Part-Dieu", "5:30", "23:45", b"\x89PNG"),
    );
    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["trainstation"]["name"], "Lyon Part-Dieu");
    assert_eq!(body["trainstation"]["open_hour"], "05:30");
    assert_eq!(body["trainstation"]["image"], "iVBORw==");
}

#[tokio::test]
async fn station_rejects_bad_hours_and_plain_users() {
    let app = common::spawn();
    let (_, admin) = app.admin("root").await;
    let (_, user) = app.signup("bob").await;

    let req = multipart_request(
        "/trainstations/create",
        &admin,
        station_form("Nowhere", "25:00", "23:00", b"img"),
    );
    let (status, _) = app.send(req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = multipart_request(
        "/trainstations/create",
        &user,
        station_form("Nowhere", "06:00", "23:00", b"img"),
    );
    let (status, _) = app.send(req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn oversized_images_are_payload_too_large() {
    let app = common::spawn_with(Config {
        upload_max_bytes: 1000,
        ..Config::default()
    });
    let (_, admin) = app.admin("root").await;

    // over the image limit, inside the request limit
    let req = multipart_request(
        "/trainstations/create",
        &admin,
        station_form("Big", "06:00", "23:00", &vec![7u8; 1500]),
    );
    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE, "{body}");
    assert_eq!(body["error"], 1);
    assert_eq!(body["message"], "Image too large !");

    // over the request limit itself
    let req = multipart_request(
        "/trainstations/create",
        &admin,
        station_form("Huge", "06:00", "23:00", &vec![7u8; 200_000]),
    );
    let (status, body) = app.send(req).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE, "{body}");
    assert_eq!(body["error"], 1);

    let (_, body) = app.post("/trainstations/get", None, None).await;
    assert_eq!(body["trainstations"], json!([]));
}

#[tokio::test]
async fn train_needs_live_stations() {
    let app = common::spawn();
    let (_, admin) = app.admin("root").await;
    let a = app.seed_station("A").await;

    let (status, body) = app
        .post(
            "/trains/create",
            Some(&*admin),
            Some(json!({
                "name": "Ghost",
                "start_station": a,
                "end_station": uuid::Uuid::new_v4(),
                "departure_time": "2030-01-01T08:00:00Z"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");
    assert_eq!(body["error"], 1);
}

#[tokio::test]
async fn deleting_a_station_deactivates_its_trains() {
    let app = common::spawn();
    let (_, admin) = app.admin("root").await;
    let a = app.seed_station("A").await;
    let b = app.seed_station("B").await;
    let c = app.seed_station("C").await;
    let ab = app.seed_train(&admin, a, b).await;
    let bc = app.seed_train(&admin, b, c).await;

    let (status, body) = app
        .post(&format!("/trainstations/delete/{a}"), Some(&*admin), None)
        .await;
    assert_eq!(status, StatusCode::ACCEPTED, "{body}");
    assert_eq!(body["deactivated_trains"], json!([ab]));

    let (_, body) = app.post(&format!("/trains/get/{ab}"), None, None).await;
    assert_eq!(body["train"]["active"], false);
    let (_, body) = app.post(&format!("/trains/get/{bc}"), None, None).await;
    assert_eq!(body["train"]["active"], true);

    // the station is gone from reads, the train is not
    let (status, _) = app
        .post(&format!("/trainstations/get/{a}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .post(&format!("/trains/set/activate/{ab}"), Some(&*admin), None)
        .await;
    assert_eq!(status, StatusCode::ACCEPTED, "{body}");
    assert_eq!(body["train"]["active"], true);
}

#[tokio::test]
async fn partial_train_update_keeps_other_fields() {
    let app = common::spawn();
    let (_, admin) = app.admin("root").await;
    let a = app.seed_station("A").await;
    let b = app.seed_station("B").await;
    let id = app.seed_train(&admin, a, b).await;

    let (status, body) = app
        .post(
            &format!("/trains/update/{id}"),
            Some(&*admin),
            Some(json!({"name": "Intercité 3611"})),
        )
        .await;
    assert_eq!(status, StatusCode::ACCEPTED, "{body}");
    assert_eq!(body["train"]["name"], "Intercité 3611");
    assert_eq!(body["train"]["start_station"], json!(a));
    assert_eq!(body["train"]["end_station"], json!(b));
}

#[tokio::test]
async fn deleted_train_leaves_listing() {
    let app = common::spawn();
    let (_, admin) = app.admin("root").await;
    let a = app.seed_station("A").await;
    let b = app.seed_station("B").await;
    let keep = app.seed_train(&admin, a, b).await;
    let gone = app.seed_train(&admin, b, a).await;

    let (status, _) = app
        .post(&format!("/trains/delete/{gone}"), Some(&*admin), None)
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, body) = app.post("/trains/get", None, None).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let ids: Vec<_> = body["trains"]
        .as_array()
        .unwrap()
        .iter()
        .map(common::id_of)
        .collect();
    assert_eq!(ids, vec![keep]);
}

#[tokio::test]
async fn list_honours_sort_and_limit() {
    let app = common::spawn();
    for name in ["Caen", "Arras", "Brest"] {
        app.seed_station(name).await;
    }
    let (status, body) = app
        .post("/trainstations/get?sort=name&limit=2", None, None)
        .await;
    assert_eq!(status, StatusCode::ACCEPTED, "{body}");
    let names: Vec<_> = body["trainstations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Arras", "Brest"]);
}
