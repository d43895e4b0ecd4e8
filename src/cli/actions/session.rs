use super::failure;
use crate::{
    auth::AuthService,
    cli::globals::GlobalArgs,
    types::{AdminCredentials, Identity, LoginCredentials},
};
use anyhow::{Result, bail};
use tracing::debug;

#[derive(Debug)]
pub enum Credentials {
    Applicant(LoginCredentials),
    Staff(AdminCredentials),
}

#[derive(Debug)]
pub struct LoginArgs {
    pub globals: GlobalArgs,
    pub credentials: Credentials,
}

/// Logs in and keeps the session in the session file.
/// # Errors
/// Returns an error if the backend rejects the login.
pub async fn login(args: LoginArgs) -> Result<()> {
    let auth = AuthService::new(args.globals.connect()?);
    debug!(session_file = %args.globals.session_file.display(), "logging in");

    let identity: Identity = match &args.credentials {
        Credentials::Applicant(credentials) => {
            let response = auth.login_as_applicant(credentials).await;
            if !response.success {
                return Err(failure(&response));
            }
            match response.into_data() {
                Some(data) => data.user.into(),
                None => bail!("login response carried no user"),
            }
        }
        Credentials::Staff(credentials) => {
            let response = auth.login_as_staff(credentials).await;
            if !response.success {
                return Err(failure(&response));
            }
            match response.into_data() {
                Some(data) => data.user.into(),
                None => bail!("login response carried no user"),
            }
        }
    };

    println!("Logged in as {} ({})", identity.display_name(), identity.role());
    Ok(())
}

/// Refreshes and prints the stored identity.
/// # Errors
/// Returns an error if there is no session or the backend no longer accepts it.
pub async fn me(globals: &GlobalArgs) -> Result<()> {
    let auth = AuthService::new(globals.connect()?);
    if auth.session().get_token().is_none() {
        bail!("not logged in");
    }

    let Some(identity) = auth.fetch_current_identity().await else {
        bail!("session expired, log in again");
    };

    println!("{}", serde_json::to_string_pretty(&identity)?);
    Ok(())
}

/// Ends the session locally and, when reachable, on the backend.
/// # Errors
/// Returns an error if the session file cannot be opened.
pub async fn logout(globals: &GlobalArgs) -> Result<()> {
    let auth = AuthService::new(globals.connect()?);
    auth.logout().await;
    println!("Logged out");
    Ok(())
}
