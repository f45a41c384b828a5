//! `POST /api/authorize`: exchange credentials for a session cookie.
//!
//! Every attempt increments the login attempt counter exactly once. Failures
//! all produce the same body so callers cannot tell a wrong username from a
//! wrong password or a malformed payload.

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::{header::SET_COOKIE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, info};

use crate::gatehouse::{
    cookie::session_cookie,
    responses,
    store::{Credentials, LoginError, LoginOutcome, RouterMetrics, RouterStore},
    Principal,
};

#[utoipa::path(
    post,
    path = "/api/authorize",
    request_body = Credentials,
    responses(
        (status = 200, description = "Session established; the session cookie is set.", body = Principal),
        (status = 401, description = "Bad credentials."),
        (status = 500, description = "Session could not be created."),
    ),
    tag = "auth"
)]
pub async fn authorize(
    Extension(store): Extension<RouterStore>,
    Extension(metrics): Extension<RouterMetrics>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Response {
    let record = |outcome: LoginOutcome| metrics.login_attempts.increment(outcome.as_str());

    let credentials = match payload {
        Ok(Json(credentials)) => credentials,
        Err(rejection) => {
            debug!("Rejected login payload: {rejection}");
            record(LoginOutcome::Failure);
            return responses::bad_credentials();
        }
    };

    let principal = match store.login_store.verify(&credentials) {
        Ok(principal) => principal,
        Err(LoginError::InvalidCredentials) => {
            debug!(username = %credentials.username, "bad credentials");
            record(LoginOutcome::Failure);
            return responses::bad_credentials();
        }
        Err(err) => {
            error!("Failed to verify credentials: {err}");
            record(LoginOutcome::Failure);
            return responses::bad_credentials();
        }
    };

    let cookie = match new_session_cookie(&store, &principal) {
        Ok(cookie) => cookie,
        Err(err) => {
            error!("Failed to create session: {err}");
            record(LoginOutcome::Failure);
            return responses::internal_error();
        }
    };

    record(LoginOutcome::Success);
    info!(username = %principal.username, "login succeeded");

    (StatusCode::OK, [(SET_COOKIE, cookie)], Json(principal)).into_response()
}

fn new_session_cookie(store: &RouterStore, principal: &Principal) -> anyhow::Result<HeaderValue> {
    let sessions = &store.session_store;
    let token = sessions.issue(principal)?;
    let cookie = session_cookie(&token, sessions.ttl(), sessions.secure_cookies())?;
    Ok(cookie)
}
