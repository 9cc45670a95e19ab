//! Response envelope shared by every route: `{error, message}` on success
//! plus a resource field, `{error: 1, message, error_message}` on failure.

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::error::ServiceError;
use crate::domain::listing::{ListQuery, SortField};

pub const OK: u8 = 0;
pub const FAILED: u8 = 1;

/// Envelope of a success that carries no resource.
#[derive(Debug, Serialize, ToSchema)]
pub struct Ack {
    pub error: u8,
    pub message: String,
}

impl Ack {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: OK,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: u8,
    pub message: String,
    pub error_message: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub error_message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error_message: error_message.into(),
        }
    }

    pub fn unauthorized(error_message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized !", error_message)
    }

    pub fn bad_request(error_message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad request !", error_message)
    }

    /// Maps a use-case failure; `action` names what was attempted
    /// ("creating the train").
    pub fn from_service(err: ServiceError, action: &str) -> Self {
        let message = format!("Error while {action} !");
        match err {
            ServiceError::Validation(msg) | ServiceError::NotFound(msg) => {
                Self::new(StatusCode::NOT_FOUND, message, msg)
            }
            ServiceError::Auth(msg) => Self::new(StatusCode::UNAUTHORIZED, message, msg),
            ServiceError::Permission(msg) => Self::new(StatusCode::FORBIDDEN, message, msg),
            ServiceError::Store(cause) => {
                tracing::error!(error = ?cause, action, "store_failure");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    message,
                    "Internal server error",
                )
            }
        }
    }
}

/// `map_err(failed("updating the user"))`
pub fn failed(action: &'static str) -> impl Fn(ServiceError) -> ApiError {
    move |err| ApiError::from_service(err, action)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: FAILED,
            message: self.message,
            error_message: self.error_message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

// Keeps the status axum picked: a body over the route limit is a 413.
impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        let status = err.status();
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::new(status, "Request too large !", err.body_text())
        } else {
            ApiError::bad_request(err.body_text())
        }
    }
}

// An id that cannot be parsed cannot name a record.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::new(
            StatusCode::NOT_FOUND,
            "Not found !",
            rejection.body_text(),
        )
    }
}

/// `axum::Json` with envelope-shaped rejections.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` with envelope-shaped rejections.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct PathId<T>(pub T);

/// `axum::extract::Query` with envelope-shaped rejections.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Comma separated field names, `-` prefix for descending.
    pub sort: Option<String>,
    /// Page size, 10 by default, at most 100.
    pub limit: Option<String>,
}

impl ListParams {
    pub fn to_query<F: SortField>(&self) -> ListQuery<F> {
        ListQuery::parse(self.sort.as_deref(), self.limit.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ServiceError) -> StatusCode {
        ApiError::from_service(err, "testing").status
    }

    #[test]
    fn service_errors_map_to_statuses() {
        assert_eq!(status_of(ServiceError::validation("x")), StatusCode::NOT_FOUND);
        assert_eq!(status_of(ServiceError::not_found("x")), StatusCode::NOT_FOUND);
        assert_eq!(status_of(ServiceError::Auth("x".into())), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(ServiceError::permission("x")), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(ServiceError::Store(anyhow::anyhow!("db down"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_failures_hide_their_cause() {
        let err = ApiError::from_service(ServiceError::Store(anyhow::anyhow!("password=hunter2")), "x");
        assert!(!err.error_message.contains("hunter2"));
    }

    #[tokio::test]
    async fn error_body_carries_envelope_fields() {
        let resp = ApiError::from_service(ServiceError::not_found("Train 1 not found !"), "getting the train")
            .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["error"], 1);
        assert_eq!(v["message"], "Error while getting the train !");
        assert_eq!(v["error_message"], "Train 1 not found !");
    }
}
