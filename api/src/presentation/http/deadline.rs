use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::presentation::http::response::ApiError;

/// Answers 408 with the usual error envelope once `limit` elapses. The
/// handler future is dropped, which cancels any store call it was awaiting.
pub async fn enforce_deadline(
    State(limit): State<Duration>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    match tokio::time::timeout(limit, next.run(req)).await {
        Ok(resp) => resp,
        Err(_) => {
            tracing::warn!(%path, limit_ms = limit.as_millis() as u64, "request_deadline_exceeded");
            ApiError::new(
                StatusCode::REQUEST_TIMEOUT,
                "Error while processing the request !",
                "Request timed out !",
            )
            .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::middleware::from_fn_with_state;
    use axum::routing::post;
    use tower::ServiceExt;

    fn app(limit: Duration) -> Router {
        Router::new()
            .route(
                "/slow",
                post(|| async {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    "done"
                }),
            )
            .route("/fast", post(|| async { "done" }))
            .layer(from_fn_with_state(limit, enforce_deadline))
    }

    fn call(path: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri(path)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn slow_handler_gets_enveloped_timeout() {
        let resp = app(Duration::from_millis(20))
            .oneshot(call("/slow"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["error"], 1);
        assert_eq!(v["error_message"], "Request timed out !");
    }

    #[tokio::test]
    async fn fast_handler_passes_through() {
        let resp = app(Duration::from_secs(5))
            .oneshot(call("/fast"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
