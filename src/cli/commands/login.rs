use clap::{Arg, Command};

pub const CMD_LOGIN: &str = "login";
pub const CMD_APPLICANT: &str = "applicant";
pub const CMD_STAFF: &str = "staff";

pub const ARG_NOMOR_PENDAFTARAN: &str = "nomor-pendaftaran";
pub const ARG_KODE_AKSES: &str = "kode-akses";
pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";

#[must_use]
pub fn command() -> Command {
    Command::new(CMD_LOGIN)
        .about("Log in and store the session")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CMD_APPLICANT)
                .about("Log in as an applicant")
                .arg(
                    Arg::new(ARG_NOMOR_PENDAFTARAN)
                        .long(ARG_NOMOR_PENDAFTARAN)
                        .short('n')
                        .help("Registration number")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_KODE_AKSES)
                        .long(ARG_KODE_AKSES)
                        .short('k')
                        .help("Access code issued at registration")
                        .env("PMB_KODE_AKSES")
                        .hide_env_values(true)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new(CMD_STAFF)
                .about("Log in as administrator or study-program staff")
                .arg(
                    Arg::new(ARG_USERNAME)
                        .long(ARG_USERNAME)
                        .short('u')
                        .help("Staff username")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_PASSWORD)
                        .long(ARG_PASSWORD)
                        .short('p')
                        .help("Staff password")
                        .env("PMB_PASSWORD")
                        .hide_env_values(true)
                        .required(true),
                ),
        )
}
