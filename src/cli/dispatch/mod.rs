use crate::cli::{
    actions::{server::Args, Action},
    commands::{
        ARG_ADMIN_PASSWORD, ARG_ADMIN_USERNAME, ARG_ASSETS, ARG_COOKIE_SECURE, ARG_LOG_REQUESTS,
        ARG_PORT, ARG_SESSION_TTL,
    },
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if a required argument is missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let admin_password = matches
        .get_one::<String>(ARG_ADMIN_PASSWORD)
        .cloned()
        .context("missing required argument: --admin-password")?;

    Ok(Action::Server(Args {
        port: matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080),
        assets: matches
            .get_one::<String>(ARG_ASSETS)
            .map_or_else(|| PathBuf::from("assets"), PathBuf::from),
        session_ttl_seconds: matches
            .get_one::<u64>(ARG_SESSION_TTL)
            .copied()
            .unwrap_or(43200),
        cookie_secure: matches.get_flag(ARG_COOKIE_SECURE),
        log_requests: matches.get_flag(ARG_LOG_REQUESTS),
        admin_username: matches
            .get_one::<String>(ARG_ADMIN_USERNAME)
            .cloned()
            .unwrap_or_else(|| "admin".to_string()),
        admin_password: SecretString::from(admin_password),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    #[test]
    fn handler_builds_server_args() -> Result<()> {
        temp_env::with_vars(
            [
                ("GATEHOUSE_PORT", None::<&str>),
                ("GATEHOUSE_ASSETS", None),
                ("GATEHOUSE_SESSION_TTL", None),
                ("GATEHOUSE_COOKIE_SECURE", None),
                ("GATEHOUSE_LOG_REQUESTS", None),
                ("GATEHOUSE_ADMIN_USERNAME", None),
                ("GATEHOUSE_ADMIN_PASSWORD", Some("hunter2")),
            ],
            || {
                let matches = commands::new().get_matches_from(vec![
                    "gatehouse",
                    "--port",
                    "9090",
                    "--assets",
                    "/srv/www",
                    "--log-requests",
                ]);
                let Action::Server(args) = handler(&matches)?;
                assert_eq!(args.port, 9090);
                assert_eq!(args.assets, PathBuf::from("/srv/www"));
                assert_eq!(args.session_ttl_seconds, 43200);
                assert!(!args.cookie_secure);
                assert!(args.log_requests);
                assert_eq!(args.admin_username, "admin");
                assert_eq!(args.admin_password.expose_secret(), "hunter2");
                Ok(())
            },
        )
    }
}
