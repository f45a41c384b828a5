//! Constant JSON bodies for error responses.
//!
//! Bodies never echo request content back to the client.

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

pub const JSON_UNAUTHORIZED: &str = r#"{"message":"Unauthorized"}"#;
pub const JSON_BAD_CREDENTIALS: &str = r#"{"message":"Bad credentials"}"#;
pub const JSON_NOT_FOUND: &str = r#"{"error":"Not Found"}"#;
pub const JSON_BAD_REQUEST: &str = r#"{"error":"Bad Request"}"#;
pub const JSON_CONFLICT: &str = r#"{"error":"Conflict"}"#;
pub const JSON_INTERNAL_ERROR: &str = r#"{"error":"Internal Server Error"}"#;

/// Write a pre-rendered JSON body with the given status.
pub fn json_bytes(status: StatusCode, body: &'static str) -> Response {
    (
        status,
        [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response()
}

pub fn unauthorized() -> Response {
    json_bytes(StatusCode::UNAUTHORIZED, JSON_UNAUTHORIZED)
}

pub fn bad_credentials() -> Response {
    json_bytes(StatusCode::UNAUTHORIZED, JSON_BAD_CREDENTIALS)
}

pub fn not_found() -> Response {
    json_bytes(StatusCode::NOT_FOUND, JSON_NOT_FOUND)
}

pub fn bad_request() -> Response {
    json_bytes(StatusCode::BAD_REQUEST, JSON_BAD_REQUEST)
}

pub fn conflict() -> Response {
    json_bytes(StatusCode::CONFLICT, JSON_CONFLICT)
}

pub fn internal_error() -> Response {
    json_bytes(StatusCode::INTERNAL_SERVER_ERROR, JSON_INTERNAL_ERROR)
}
