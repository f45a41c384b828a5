use crate::gatehouse::{
    self,
    handlers::Assets,
    middleware::log_requests,
    router,
    store::{
        MemoryLoginStore, MemorySessionStore, MemoryUserStore, NewUser, RecorderCounter,
        RouterMetrics, RouterStore, UserStore,
    },
};
use anyhow::{Context, Result};
use axum::middleware::from_fn;
use secrecy::SecretString;
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub assets: PathBuf,
    pub session_ttl_seconds: u64,
    pub cookie_secure: bool,
    pub log_requests: bool,
    pub admin_username: String,
    pub admin_password: SecretString,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the asset bundle cannot be loaded, the admin account
/// cannot be seeded, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let assets = Assets::from_dir(&args.assets)?;
    debug!("Serving assets from {}", assets.root().display());

    let store = build_store(&args)?;
    let metrics = RouterMetrics {
        login_attempts: Arc::new(RecorderCounter::default()),
    };

    let mut app = router(assets, metrics, store);
    if args.log_requests {
        app = app.layer(from_fn(log_requests));
    }

    gatehouse::new(args.port, app).await
}

/// Wire the in-memory stores and seed the admin account into both the login
/// and the user store.
fn build_store(args: &Args) -> Result<RouterStore> {
    let login_store = MemoryLoginStore::new()
        .with_account(args.admin_username.clone(), args.admin_password.clone());

    let user_store = MemoryUserStore::new();
    user_store
        .create(NewUser {
            username: args.admin_username.clone(),
            name: None,
            email: None,
        })
        .with_context(|| format!("Failed to seed admin user {}", args.admin_username))?;

    let session_store = MemorySessionStore::new(Duration::from_secs(args.session_ttl_seconds))
        .with_secure_cookies(args.cookie_secure);

    Ok(RouterStore {
        login_store: Arc::new(login_store),
        user_store: Arc::new(user_store),
        session_store: Arc::new(session_store),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gatehouse::{
        store::{Credentials, SessionStore},
        Principal,
    };

    fn args(admin_username: &str) -> Args {
        Args {
            port: 8080,
            assets: PathBuf::from("assets"),
            session_ttl_seconds: 60,
            cookie_secure: true,
            log_requests: false,
            admin_username: admin_username.to_string(),
            admin_password: SecretString::from("hunter2"),
        }
    }

    #[test]
    fn build_store_seeds_admin() -> Result<()> {
        let store = build_store(&args("root"))?;

        let principal = store.login_store.verify(&Credentials {
            username: "root".to_string(),
            password: "hunter2".to_string(),
        })?;
        assert_eq!(principal, Principal::new("root"));
        assert_eq!(store.user_store.get("root")?.username, "root");

        assert_eq!(store.session_store.ttl(), Duration::from_secs(60));
        assert!(store.session_store.secure_cookies());
        Ok(())
    }

    #[test]
    fn build_store_rejects_invalid_admin_username() {
        assert!(build_store(&args("not valid")).is_err());
    }

    #[test]
    fn args_debug_hides_password() {
        assert!(!format!("{:?}", args("root")).contains("hunter2"));
    }
}
