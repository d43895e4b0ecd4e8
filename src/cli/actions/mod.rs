pub mod guard;
pub mod nilai;
pub mod session;

mod run;

use crate::{cli::globals::GlobalArgs, client::Envelope};
use anyhow::anyhow;

#[derive(Debug)]
pub enum Action {
    Login(session::LoginArgs),
    Me(GlobalArgs),
    Logout(GlobalArgs),
    Guard(guard::Args),
    Template(nilai::TemplateArgs),
    UploadNilai(nilai::UploadArgs),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}

/// Error for a failed envelope, with field messages listed after the summary.
fn failure<T>(envelope: &Envelope<T>) -> anyhow::Error {
    let mut message = envelope
        .message
        .clone()
        .unwrap_or_else(|| crate::client::DEFAULT_FAILURE_MESSAGE.to_string());

    if let Some(errors) = &envelope.errors {
        let mut fields: Vec<_> = errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        for (field, messages) in fields {
            message.push_str(&format!("\n  {field}: {}", messages.join(", ")));
        }
    }

    anyhow!(message)
}
