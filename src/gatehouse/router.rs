//! Route composition.
//!
//! The outer tree serves the front-end and the login endpoint and hands
//! everything else under `/api` to the session gate. Only requests that pass
//! the gate reach the protected tree, which does the final method and path
//! dispatch. Both trees are built once and are read-only afterwards.
//!
//! Fallbacks differ on purpose: an unknown front-end path gets the landing
//! page so client-side routes survive a reload, while an unknown API path
//! behind the gate gets a JSON 404.

use axum::{
    extract::{Extension, Request},
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{any, get, get_service, post},
    Router,
};
use std::{future::Future, pin::Pin};
use tower::{ServiceBuilder, ServiceExt};

use super::{
    handlers::{
        authorize, authorized_user, home, user, user_create, user_delete, user_list,
        user_update, Assets,
    },
    middleware::authorized,
    responses,
    store::{RouterMetrics, RouterStore},
};

pub const PATH_PREFIX_API: &str = "/api";

/// Build the outer dispatch tree.
pub fn router(assets: Assets, metrics: RouterMetrics, store: RouterStore) -> Router {
    let files = get_service(assets.service()).fallback(home);

    let protected = ServiceBuilder::new()
        .layer(from_fn_with_state(store.session_store.clone(), authorized))
        .service(auth_router());

    Router::new()
        .route("/", any(home))
        .route("/favicon.ico", files.clone())
        .route("/favicon.png", files.clone())
        .route("/js/*path", files.clone())
        .route("/css/*path", files.clone())
        .route("/img/*path", files)
        .route(
            &format!("{PATH_PREFIX_API}/authorize"),
            post(authorize).fallback_service(protected.clone()),
        )
        .route_service(PATH_PREFIX_API, protected.clone())
        .route_service(&format!("{PATH_PREFIX_API}/*path"), protected.clone())
        .fallback(move |assets: Extension<Assets>, request: Request| {
            let protected = protected.clone();
            async move {
                // `/api/` and `/api/authorize/` miss both `/api` routes above
                if is_api_path(request.uri().path()) {
                    let response: Pin<Box<dyn Future<Output = _> + Send>> =
                        Box::pin(protected.oneshot(request));
                    response.await.into_response()
                } else {
                    home(assets).await.into_response()
                }
            }
        })
        .layer(Extension(assets))
        .layer(Extension(metrics))
        .layer(Extension(store))
}

fn is_api_path(path: &str) -> bool {
    path.strip_prefix(PATH_PREFIX_API)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Build the protected dispatch tree. It expects a `Principal` extension, so
/// it must only be reachable through the session gate.
pub fn auth_router() -> Router {
    let not_found = || async { responses::not_found() };

    Router::new()
        .route(
            &format!("{PATH_PREFIX_API}/user"),
            get(authorized_user).fallback(not_found),
        )
        .route(
            &format!("{PATH_PREFIX_API}/users"),
            get(user_list).post(user_create).fallback(not_found),
        )
        .route(
            &format!("{PATH_PREFIX_API}/users/:username"),
            get(user)
                .put(user_update)
                .delete(user_delete)
                .fallback(not_found),
        )
        .fallback(not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gatehouse::{
        cookie::SESSION_COOKIE_NAME,
        responses::{JSON_NOT_FOUND, JSON_UNAUTHORIZED},
        store::{
            AtomicCounter, MemoryLoginStore, MemorySessionStore, MemoryUserStore, SessionStore,
        },
        Principal,
    };
    use anyhow::Result;
    use axum::{
        body::{to_bytes, Body},
        http::{header::COOKIE, Method, Request, StatusCode},
        response::Response,
    };
    use std::{sync::Arc, time::Duration};
    use tower::ServiceExt;

    const INDEX: &str = "<html>landing</html>";

    struct TestApp {
        app: Router,
        sessions: Arc<MemorySessionStore>,
    }

    impl TestApp {
        fn new() -> Self {
            let sessions = Arc::new(MemorySessionStore::new(Duration::from_secs(60)));
            let store = RouterStore {
                login_store: Arc::new(MemoryLoginStore::new()),
                user_store: Arc::new(MemoryUserStore::new()),
                session_store: sessions.clone(),
            };
            let metrics = RouterMetrics {
                login_attempts: Arc::new(AtomicCounter::new()),
            };
            let assets = Assets::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets"), INDEX);
            Self {
                app: router(assets, metrics, store),
                sessions,
            }
        }

        fn session_cookie(&self) -> Result<String> {
            let token = self.sessions.issue(&Principal::new("alice"))?;
            Ok(format!("{SESSION_COOKIE_NAME}={token}"))
        }

        async fn send(&self, method: Method, uri: &str, cookie: Option<&str>) -> Result<Response> {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(cookie) = cookie {
                builder = builder.header(COOKIE, cookie);
            }
            Ok(self.app.clone().oneshot(builder.body(Body::empty())?).await?)
        }
    }

    async fn body_string(response: Response) -> Result<String> {
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        Ok(String::from_utf8(body.to_vec())?)
    }

    #[tokio::test]
    async fn landing_page_at_root_and_for_unknown_paths() -> Result<()> {
        let app = TestApp::new();
        for (method, uri) in [
            (Method::GET, "/"),
            (Method::GET, "/nonexistent"),
            (Method::GET, "/settings/profile"),
            (Method::POST, "/"),
            (Method::GET, "/apiary"),
        ] {
            let response = app.send(method, uri, None).await?;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert_eq!(body_string(response).await?, INDEX, "{uri}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn serves_files_from_asset_directories() -> Result<()> {
        let app = TestApp::new();

        let response = app.send(Method::GET, "/css/app.css", None).await?;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await?.contains("font-family"));

        let response = app.send(Method::GET, "/js/app.js", None).await?;
        assert_eq!(response.status(), StatusCode::OK);

        for uri in ["/favicon.ico", "/favicon.png", "/img/logo.svg"] {
            let expected = std::fs::read(format!("{}/assets{uri}", env!("CARGO_MANIFEST_DIR")))?;
            let response = app.send(Method::GET, uri, None).await?;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            let body = to_bytes(response.into_body(), usize::MAX).await?;
            assert_eq!(body.as_ref(), expected.as_slice(), "{uri}");
        }

        let response = app.send(Method::GET, "/js/missing.js", None).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn api_paths_require_a_session() -> Result<()> {
        let app = TestApp::new();
        for (method, uri) in [
            (Method::GET, "/api"),
            (Method::GET, "/api/user"),
            (Method::GET, "/api/users"),
            (Method::POST, "/api/users"),
            (Method::GET, "/api/users/alice"),
            (Method::DELETE, "/api/users/alice"),
            (Method::GET, "/api/nonexistent"),
            (Method::GET, "/api/authorize"),
            (Method::GET, "/api/"),
            (Method::POST, "/api/authorize/"),
            (Method::DELETE, "/api/authorize/"),
            (Method::GET, "/api//"),
        ] {
            let response = app.send(method, uri, None).await?;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(body_string(response).await?, JSON_UNAUTHORIZED, "{uri}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn unmatched_api_paths_behind_the_gate_are_json_404() -> Result<()> {
        let app = TestApp::new();
        let cookie = app.session_cookie()?;
        for (method, uri) in [
            (Method::GET, "/api"),
            (Method::GET, "/api/nonexistent"),
            (Method::GET, "/api/users/alice/roles"),
            (Method::GET, "/api/authorize"),
            (Method::PATCH, "/api/users/alice"),
            (Method::DELETE, "/api/users"),
            (Method::GET, "/api/"),
            (Method::POST, "/api/authorize/"),
            (Method::DELETE, "/api/authorize/"),
        ] {
            let response = app.send(method, uri, Some(&cookie)).await?;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body_string(response).await?, JSON_NOT_FOUND, "{uri}");
        }
        Ok(())
    }

    #[test]
    fn api_path_prefix_is_segment_aware() {
        for path in ["/api", "/api/", "/api/authorize/", "/api/users/alice"] {
            assert!(is_api_path(path), "{path}");
        }
        for path in ["/", "/apiary", "/apis/v1", "/js/api"] {
            assert!(!is_api_path(path), "{path}");
        }
    }

    #[tokio::test]
    async fn current_principal_comes_from_the_session() -> Result<()> {
        let app = TestApp::new();
        let cookie = app.session_cookie()?;
        let response = app.send(Method::GET, "/api/user", Some(&cookie)).await?;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await?, r#"{"username":"alice"}"#);
        Ok(())
    }
}
