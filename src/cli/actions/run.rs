use crate::cli::actions::{Action, guard, nilai, session};
use anyhow::Result;

// Single dispatch point for all CLI actions.
/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Login(args) => session::login(args).await,
        Action::Me(globals) => session::me(&globals).await,
        Action::Logout(globals) => session::logout(&globals).await,
        Action::Guard(args) => guard::execute(&args),
        Action::Template(args) => nilai::template(args).await,
        Action::UploadNilai(args) => nilai::upload(args).await,
    }
}
