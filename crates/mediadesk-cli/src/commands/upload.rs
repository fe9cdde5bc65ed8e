//! File upload CLI command.

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::warn;

use mediadesk_core::error::AppError;
use mediadesk_core::result::AppResult;
use mediadesk_entity::UploadBlob;

use super::{Session, parse_folder};
use super::file::print_files;
use crate::output;

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Local files to upload together
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Target folder ID, or `root`
    #[arg(long, default_value = "root")]
    pub folder: String,
}

/// Execute the upload command
pub async fn execute(args: &UploadArgs, session: &Session) -> AppResult<()> {
    let folder_id = parse_folder(&args.folder)?;
    let library = &session.library;
    library.open().await?;

    let mut blobs = Vec::with_capacity(args.files.len());
    for path in &args.files {
        blobs.push(read_blob(path).await?);
    }
    let total: u64 = blobs.iter().map(UploadBlob::size).sum();
    output::print_status(&format!(
        "Uploading {} file(s), {}...",
        blobs.len(),
        output::format_size(total)
    ));

    let mut progress = library.subscribe_upload_progress();
    let reporter = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let percent = *progress.borrow_and_update();
            eprint!("\r  {percent:>3}%");
            if percent >= 100 {
                break;
            }
        }
        eprintln!();
    });

    let result = library.upload_to(folder_id, blobs).await;
    if result.is_ok() {
        if let Err(err) = reporter.await {
            warn!(error = %err, "Upload progress reporter failed");
        }
    } else {
        reporter.abort();
    }
    library.acknowledge_upload();

    let created = result?;
    print_files(&created, session.format);
    Ok(())
}

async fn read_blob(path: &Path) -> AppResult<UploadBlob> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AppError::validation(format!("Not a file path: {}", path.display())))?
        .to_string();

    let data = tokio::fs::read(path).await.map_err(|e| {
        AppError::validation(format!("Failed to read '{}': {e}", path.display()))
    })?;

    Ok(UploadBlob::guessed(file_name, data))
}
