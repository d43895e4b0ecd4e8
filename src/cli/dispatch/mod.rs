use crate::{
    cli::{
        actions::{
            Action, guard,
            nilai::{TemplateArgs, UploadArgs},
            session::{Credentials, LoginArgs},
        },
        commands::{self, login, nilai},
        globals::GlobalArgs,
    },
    types::{AdminCredentials, LoginCredentials},
};
use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use secrecy::SecretString;
use std::path::PathBuf;

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: --{id}"))
}

/// API URL and session file shared by every command.
///
/// # Errors
/// Returns an error if either argument is missing.
pub fn globals(matches: &ArgMatches) -> Result<GlobalArgs> {
    let api_url = required(matches, commands::ARG_API_URL)?;
    let session_file = required(matches, commands::ARG_SESSION_FILE)?;
    Ok(GlobalArgs::new(api_url, PathBuf::from(session_file)))
}

fn credentials(matches: &ArgMatches) -> Result<Credentials> {
    match matches.subcommand() {
        Some((login::CMD_APPLICANT, sub_m)) => Ok(Credentials::Applicant(LoginCredentials {
            nomor_pendaftaran: required(sub_m, login::ARG_NOMOR_PENDAFTARAN)?,
            kode_akses: SecretString::from(required(sub_m, login::ARG_KODE_AKSES)?),
        })),
        Some((login::CMD_STAFF, sub_m)) => Ok(Credentials::Staff(AdminCredentials {
            username: required(sub_m, login::ARG_USERNAME)?,
            password: SecretString::from(required(sub_m, login::ARG_PASSWORD)?),
        })),
        _ => Err(anyhow!("login requires `applicant` or `staff`")),
    }
}

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &ArgMatches, globals: GlobalArgs) -> Result<Action> {
    match matches.subcommand() {
        Some((login::CMD_LOGIN, sub_m)) => Ok(Action::Login(LoginArgs {
            globals,
            credentials: credentials(sub_m)?,
        })),
        Some((commands::CMD_ME, _)) => Ok(Action::Me(globals)),
        Some((commands::CMD_LOGOUT, _)) => Ok(Action::Logout(globals)),
        Some((commands::CMD_GUARD, sub_m)) => Ok(Action::Guard(guard::Args {
            globals,
            path: required(sub_m, commands::ARG_PATH)?,
        })),
        Some((nilai::CMD_TEMPLATE, sub_m)) => Ok(Action::Template(TemplateArgs {
            globals,
            include_status: !sub_m.get_flag(nilai::ARG_WITHOUT_STATUS),
            out: PathBuf::from(required(sub_m, nilai::ARG_OUT)?),
        })),
        Some((nilai::CMD_UPLOAD_NILAI, sub_m)) => Ok(Action::UploadNilai(UploadArgs {
            globals,
            file: PathBuf::from(required(sub_m, nilai::ARG_FILE)?),
        })),
        _ => Err(anyhow!("no command given, see --help")),
    }
}
