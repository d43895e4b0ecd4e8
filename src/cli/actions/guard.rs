use crate::{
    cli::globals::GlobalArgs,
    guard::{Decision, RouteGuard},
};
use anyhow::Result;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub path: String,
}

/// Prints the guard decision for `path` against the stored session.
/// # Errors
/// Returns an error if the session file cannot be opened.
pub fn execute(args: &Args) -> Result<()> {
    let client = args.globals.connect()?;
    let guard = RouteGuard::new(client.session().clone());

    match guard.check(&args.path) {
        Decision::Allow => println!("allow {}", args.path),
        Decision::Redirect(target) => println!("redirect {target}"),
    }
    Ok(())
}
