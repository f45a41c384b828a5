pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

pub const ARG_PORT: &str = "port";
pub const ARG_ASSETS: &str = "assets";
pub const ARG_SESSION_TTL: &str = "session-ttl";
pub const ARG_COOKIE_SECURE: &str = "cookie-secure";
pub const ARG_LOG_REQUESTS: &str = "log-requests";
pub const ARG_ADMIN_USERNAME: &str = "admin-username";
pub const ARG_ADMIN_PASSWORD: &str = "admin-password";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("gatehouse")
        .about("Static front-end and session-gated user API")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("GATEHOUSE_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_ASSETS)
                .long("assets")
                .help("Directory holding index.html and the js, css and img folders")
                .default_value("assets")
                .env("GATEHOUSE_ASSETS"),
        )
        .arg(
            Arg::new(ARG_SESSION_TTL)
                .long("session-ttl")
                .help("Session lifetime in seconds")
                .default_value("43200")
                .env("GATEHOUSE_SESSION_TTL")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_COOKIE_SECURE)
                .long("cookie-secure")
                .help("Mark the session cookie Secure (front-end served over HTTPS)")
                .env("GATEHOUSE_COOKIE_SECURE")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_LOG_REQUESTS)
                .long("log-requests")
                .help("Log method, path and duration of every request at debug level")
                .env("GATEHOUSE_LOG_REQUESTS")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_ADMIN_USERNAME)
                .long("admin-username")
                .help("Username of the seeded admin account")
                .default_value("admin")
                .env("GATEHOUSE_ADMIN_USERNAME"),
        )
        .arg(
            Arg::new(ARG_ADMIN_PASSWORD)
                .long("admin-password")
                .help("Password of the seeded admin account")
                .env("GATEHOUSE_ADMIN_PASSWORD")
                .hide_env_values(true)
                .required(true),
        );

    logging::with_args(command)
}
