//! Request middleware: the session gate and the optional request logger.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::{sync::Arc, time::Instant};
use tracing::{debug, error};

use super::{
    cookie::extract_session_token,
    responses,
    store::{SessionError, SessionStore},
};

/// Resolve the session cookie and attach the [`Principal`](super::Principal)
/// to the request, or stop with 401 before the wrapped handler runs.
pub async fn authorized(
    State(sessions): State<Arc<dyn SessionStore>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = extract_session_token(request.headers()) else {
        debug!(path = %request.uri().path(), "missing session cookie");
        return responses::unauthorized();
    };

    match sessions.resolve(&token) {
        Ok(principal) => {
            request.extensions_mut().insert(principal);
            next.run(request).await
        }
        Err(SessionError::Backend(err)) => {
            error!("Failed to resolve session: {err}");
            responses::unauthorized()
        }
        Err(err) => {
            debug!(path = %request.uri().path(), "rejected session: {err}");
            responses::unauthorized()
        }
    }
}

/// Log method, path and duration once the wrapped handler has answered.
pub async fn log_requests(request: Request<Body>, next: Next) -> impl IntoResponse {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    debug!(
        duration = ?start.elapsed(),
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        "request"
    );

    response
}
