use crate::cli::{
    actions::Action,
    commands::{self, logging},
    dispatch, telemetry,
};
use anyhow::Result;
use clap::ArgMatches;
use tracing::debug;

fn log_level(matches: &ArgMatches) -> Option<tracing::Level> {
    logging::level_for(
        matches
            .get_one::<u8>(logging::ARG_VERBOSITY)
            .copied()
            .unwrap_or(0),
    )
}

/// Parses the command line, sets up logging and returns the action to run.
///
/// # Errors
///
/// Returns an error if telemetry cannot be initialized, or the API URL and
/// session file are missing.
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    telemetry::init(log_level(&matches))?;

    let globals = dispatch::globals(&matches)?;
    debug!(
        api_url = %globals.api_url,
        session_file = %globals.session_file.display(),
        "pmb {}",
        env!("CARGO_PKG_VERSION")
    );

    dispatch::handler(&matches, globals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_flags() {
        temp_env::with_var("PMB_LOG_LEVEL", None::<&str>, || {
            let matches = commands::new().get_matches_from(vec!["pmb", "me"]);
            assert_eq!(log_level(&matches), None);

            let matches = commands::new().get_matches_from(vec!["pmb", "-vvv", "me"]);
            assert_eq!(log_level(&matches), Some(tracing::Level::DEBUG));
        });
    }

    #[test]
    fn test_log_level_from_env() {
        temp_env::with_var("PMB_LOG_LEVEL", Some("warn"), || {
            let matches = commands::new().get_matches_from(vec!["pmb", "logout"]);
            assert_eq!(log_level(&matches), Some(tracing::Level::WARN));
        });
    }
}
