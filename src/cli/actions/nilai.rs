use super::failure;
use crate::{
    api::{StaffApi, file_part},
    cli::globals::GlobalArgs,
};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug)]
pub struct TemplateArgs {
    pub globals: GlobalArgs,
    pub include_status: bool,
    pub out: PathBuf,
}

#[derive(Debug)]
pub struct UploadArgs {
    pub globals: GlobalArgs,
    pub file: PathBuf,
}

/// Downloads the score template into `out`.
/// # Errors
/// Returns an error if the download fails or the file cannot be written.
pub async fn template(args: TemplateArgs) -> Result<()> {
    let staff = StaffApi::new(args.globals.connect()?);

    let download = staff
        .download_template(args.include_status)
        .await
        .context("Failed to download template")?;
    let path = download.save_in(&args.out)?;

    info!(bytes = download.bytes.len(), "template saved");
    println!("{}", path.display());
    Ok(())
}

/// Uploads a filled-in score sheet and prints the per-row outcome.
/// # Errors
/// Returns an error if the file cannot be read or the upload is rejected.
pub async fn upload(args: UploadArgs) -> Result<()> {
    let staff = StaffApi::new(args.globals.connect()?);
    let part = file_part(&args.file).await?;

    let response = staff.upload_nilai_file(part).await;
    if !response.success {
        return Err(failure(&response));
    }

    if let Some(result) = response.data {
        println!("{} updated, {} failed", result.success, result.failed);
        for error in &result.errors {
            let row = error.row.map(|row| format!("row {row}: ")).unwrap_or_default();
            let nomor = error
                .nomor_pendaftaran
                .as_deref()
                .map(|nomor| format!("{nomor}: "))
                .unwrap_or_default();
            println!("  {row}{nomor}{}", error.message);
        }
    } else if let Some(message) = response.message {
        println!("{message}");
    }
    Ok(())
}
