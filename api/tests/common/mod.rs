#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use railroad_api::application::ports::trainstation_repository::TrainstationRepository;
use railroad_api::application::ports::user_repository::UserRepository;
use railroad_api::bootstrap::app_context::{AppContext, AppServices};
use railroad_api::bootstrap::config::Config;
use railroad_api::domain::trainstations::trainstation::NewTrainstation;
use railroad_api::domain::users::user::Role;

#[derive(Clone)]
pub struct TestApp {
    pub ctx: AppContext,
    pub router: Router,
}

pub fn spawn() -> TestApp {
    spawn_with(Config::default())
}

pub fn spawn_with(cfg: Config) -> TestApp {
    let ctx = AppContext::new(cfg.clone(), AppServices::in_memory(&cfg));
    let router = railroad_api::presentation::http::router(ctx.clone());
    TestApp { ctx, router }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("POST").uri(path);
        if let Some(t) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let req = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(req).await
    }

    /// Registers then logs in; returns the user id and a bearer token.
    pub async fn signup(&self, pseudo: &str) -> (Uuid, String) {
        let email = format!("{pseudo}@railroad.test");
        let (status, body) = self
            .post(
                "/users/register",
                None,
                Some(serde_json::json!({"pseudo": pseudo, "email": email, "password": "s3cret"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let (status, body) = self
            .post(
                "/users/login",
                None,
                Some(serde_json::json!({"email": email, "password": "s3cret"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        let id = body["user"]["id"].as_str().unwrap().parse().unwrap();
        (id, body["token"].as_str().unwrap().to_string())
    }

    pub async fn promote(&self, id: Uuid, role: Role) {
        self.ctx.user_repo().set_role(id, role).await.unwrap().unwrap();
    }

    pub async fn admin(&self, pseudo: &str) -> (Uuid, String) {
        let (id, token) = self.signup(pseudo).await;
        self.promote(id, Role::Admin).await;
        (id, token)
    }

    pub async fn seed_station(&self, name: &str) -> Uuid {
        self.ctx
            .trainstation_repo()
            .create(&NewTrainstation {
                name: name.into(),
                open_hour: "06:00".into(),
                close_hour: "23:00".into(),
                image: vec![0x89, 0x50, 0x4e, 0x47],
            })
            .await
            .unwrap()
            .id
    }

    pub async fn seed_train(&self, admin_token: &str, start: Uuid, end: Uuid) -> Uuid {
        let (status, body) = self
            .post(
                "/trains/create",
                Some(admin_token),
                Some(serde_json::json!({
                    "name": "TGV 6201",
                    "start_station": start,
                    "end_station": end,
                    "departure_time": "2030-01-01T08:00:00Z"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["train"]["id"].as_str().unwrap().parse().unwrap()
    }
}

pub fn id_of(value: &Value) -> Uuid {
    value["id"].as_str().unwrap().parse().unwrap()
}
