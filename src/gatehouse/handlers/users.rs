//! Protected user endpoints.
//!
//! Each handler is one user store call. Store errors map to fixed JSON
//! bodies: not found is 404, rejected input is 400, a taken username is 409
//! and anything else is 500.

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::gatehouse::{
    responses,
    store::{NewUser, RouterStore, User, UserPatch, UserStoreError},
    Principal,
};

impl IntoResponse for UserStoreError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => responses::not_found(),
            Self::Invalid(_) => responses::bad_request(),
            Self::Conflict => responses::conflict(),
            Self::Backend(err) => {
                error!("User store failure: {err}");
                responses::internal_error()
            }
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "The authenticated principal.", body = Principal),
        (status = 401, description = "Missing or invalid session cookie."),
    ),
    tag = "users"
)]
pub async fn authorized_user(Extension(principal): Extension<Principal>) -> Json<Principal> {
    Json(principal)
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users ordered by username.", body = [User]),
        (status = 401, description = "Missing or invalid session cookie."),
    ),
    tag = "users"
)]
pub async fn user_list(Extension(store): Extension<RouterStore>) -> Response {
    match store.user_store.list() {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User created.", body = User),
        (status = 400, description = "Invalid input."),
        (status = 401, description = "Missing or invalid session cookie."),
        (status = 409, description = "Username already taken."),
    ),
    tag = "users"
)]
pub async fn user_create(
    Extension(store): Extension<RouterStore>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Response {
    let Ok(Json(new_user)) = payload else {
        return responses::bad_request();
    };

    match store.user_store.create(new_user) {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/users/{username}",
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "User record.", body = User),
        (status = 401, description = "Missing or invalid session cookie."),
        (status = 404, description = "User not found."),
    ),
    tag = "users"
)]
pub async fn user(
    Path(username): Path<String>,
    Extension(store): Extension<RouterStore>,
) -> Response {
    match store.user_store.get(&username) {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/api/users/{username}",
    params(
        ("username" = String, Path, description = "Username")
    ),
    request_body = UserPatch,
    responses(
        (status = 200, description = "User updated.", body = User),
        (status = 400, description = "Invalid input."),
        (status = 401, description = "Missing or invalid session cookie."),
        (status = 404, description = "User not found."),
    ),
    tag = "users"
)]
pub async fn user_update(
    Path(username): Path<String>,
    Extension(store): Extension<RouterStore>,
    payload: Result<Json<UserPatch>, JsonRejection>,
) -> Response {
    let Ok(Json(patch)) = payload else {
        return responses::bad_request();
    };

    match store.user_store.update(&username, patch) {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/users/{username}",
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 204, description = "User deleted."),
        (status = 401, description = "Missing or invalid session cookie."),
        (status = 404, description = "User not found."),
    ),
    tag = "users"
)]
pub async fn user_delete(
    Path(username): Path<String>,
    Extension(store): Extension<RouterStore>,
) -> Response {
    match store.user_store.delete(&username) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
