pub mod logging;
pub mod login;
pub mod nilai;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SESSION_FILE: &str = "session-file";
pub const ARG_PATH: &str = "path";

pub const CMD_ME: &str = "me";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_GUARD: &str = "guard";

pub const DEFAULT_SESSION_FILE: &str = ".pmb-session.json";

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

    let command = Command::new("pmb")
        .about("PMB Pascasarjana admissions client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Backend API base URL, `/api` is appended when missing")
                .env(crate::config::ENV_API_URL)
                .default_value(crate::config::DEFAULT_API_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long(ARG_SESSION_FILE)
                .help("File the login session is kept in between runs")
                .env("PMB_SESSION_FILE")
                .default_value(DEFAULT_SESSION_FILE)
                .global(true),
        )
        .subcommand(login::command())
        .subcommand(Command::new(CMD_ME).about("Fetch and print the logged-in identity"))
        .subcommand(Command::new(CMD_LOGOUT).about("End the session"))
        .subcommand(
            Command::new(CMD_GUARD)
                .about("Show whether the session may open a page")
                .arg(
                    Arg::new(ARG_PATH)
                        .help("Destination path, for example /admin/users")
                        .required(true),
                ),
        )
        .subcommand(nilai::template_command())
        .subcommand(nilai::upload_command());

    logging::with_args(command)
}
