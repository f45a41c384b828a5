use utoipa::OpenApi;

use super::{
    handlers::{authorize, users},
    store::{Credentials, NewUser, User, UserPatch},
    Principal,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        authorize::authorize,
        users::authorized_user,
        users::user_list,
        users::user_create,
        users::user,
        users::user_update,
        users::user_delete,
    ),
    components(schemas(Credentials, Principal, User, NewUser, UserPatch)),
    tags(
        (name = "auth", description = "Session login"),
        (name = "users", description = "Session-protected user management"),
    )
)]
struct ApiDoc;

/// `OpenAPI` document for the JSON endpoints. Static assets are not described.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_info_from_cargo() {
        let doc = openapi();
        assert_eq!(doc.info.title, env!("CARGO_PKG_NAME"));
        assert_eq!(doc.info.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn openapi_tags_and_paths() {
        let doc = openapi();
        let tags = doc.tags.clone().unwrap_or_default();
        assert!(tags.iter().any(|tag| tag.name == "auth"));
        assert!(tags.iter().any(|tag| tag.name == "users"));
        for path in [
            "/api/authorize",
            "/api/user",
            "/api/users",
            "/api/users/{username}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
