use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_VERBOSITY: &str = "verbosity";

/// Level names indexed by verbosity count; anything past the end is trace.
const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accept `GATEHOUSE_LOG_LEVEL` as a level name or its verbosity count.
fn parse_level(level: &str) -> Result<u8, String> {
    let level = level.trim().to_ascii_lowercase();
    let index = match level.parse::<usize>() {
        Ok(count) if count < LEVELS.len() => Some(count),
        Ok(_) => None,
        Err(_) => LEVELS.iter().position(|name| *name == level),
    };

    index
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| format!("invalid log level '{level}', expected one of: {}", LEVELS.join(", ")))
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Raise log verbosity: -v warn, -vv info, -vvv debug, -vvvv trace (default: error)")
            .env("GATEHOUSE_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(ValueParser::from(parse_level)),
    )
}
