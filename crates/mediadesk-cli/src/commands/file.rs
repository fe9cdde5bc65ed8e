//! File management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use mediadesk_core::error::AppError;
use mediadesk_core::result::AppResult;
use mediadesk_core::types::{FolderId, folder_param};
use mediadesk_entity::{FileFilter, FileType, MediaFile, UpdateFileMetadata};

use super::{Session, parse_file_id, parse_folder};
use crate::output::{self, OutputFormat};

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FileArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FileCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FileCommand {
    /// List the files of a folder
    List {
        /// Folder ID, or `root`
        #[arg(long, default_value = "root")]
        folder: String,
        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,
        /// Only files of this type (image, video, document, other)
        #[arg(short = 't', long = "type")]
        file_type: Option<FileType>,
    },
    /// Edit file metadata
    Update {
        /// File ID
        id: String,
        /// New display name
        #[arg(short, long)]
        name: Option<String>,
        /// Alternative text
        #[arg(long)]
        alt_text: Option<String>,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete one file
    Delete {
        /// File ID
        id: String,
    },
    /// Delete several files of one folder
    DeleteMany {
        /// Folder the files are listed in, or `root`
        #[arg(long, default_value = "root")]
        folder: String,
        /// Delete every file in the folder
        #[arg(short, long, conflicts_with = "ids")]
        all: bool,
        /// File IDs
        #[arg(required_unless_present = "all")]
        ids: Vec<String>,
    },
    /// Print where a file can be downloaded
    DownloadUrl {
        /// File ID
        id: String,
    },
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct FileRow {
    /// File ID
    id: String,
    /// Name
    name: String,
    /// Type
    #[tabled(rename = "type")]
    file_type: String,
    /// Size
    size: String,
    /// Folder
    folder: String,
    /// Uploaded at
    uploaded_at: String,
}

impl From<&MediaFile> for FileRow {
    fn from(f: &MediaFile) -> Self {
        Self {
            id: f.id.to_string(),
            name: f.name.clone(),
            file_type: f.file_type.as_str().to_string(),
            size: output::format_size(f.size_bytes),
            folder: folder_param(f.folder_id),
            uploaded_at: f.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Print files as rows, or as full records in JSON mode.
pub(crate) fn print_files(files: &[MediaFile], format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(files),
        OutputFormat::Table => {
            let rows: Vec<FileRow> = files.iter().map(FileRow::from).collect();
            output::print_list(&rows, format);
        }
    }
}

/// Execute file commands
pub async fn execute(args: &FileArgs, session: &Session) -> AppResult<()> {
    let library = &session.library;

    match &args.command {
        FileCommand::List {
            folder,
            search,
            file_type,
        } => {
            open_folder(session, parse_folder(folder)?).await?;
            let mut filter = FileFilter::all();
            if let Some(search) = search {
                filter = filter.with_search(search.clone());
            }
            if let Some(file_type) = file_type {
                filter = filter.with_type(*file_type);
            }
            library.set_filter(filter).await;
            print_files(&library.visible_files().await, session.format);
        }
        FileCommand::Update {
            id,
            name,
            alt_text,
            description,
        } => {
            let id = parse_file_id(id)?;
            let update = UpdateFileMetadata {
                name: name.clone(),
                alt_text: alt_text.clone(),
                description: description.clone(),
            };
            if update.is_empty() {
                return Err(AppError::validation(
                    "Nothing to update: pass --name, --alt-text or --description",
                ));
            }
            let updated = library.update_file(id, &update).await?;
            if session.format == OutputFormat::Json {
                output::print_json(&updated);
            }
        }
        FileCommand::Delete { id } => {
            let id = parse_file_id(id)?;
            library.delete_file(id).await?;
        }
        FileCommand::DeleteMany { folder, all, ids } => {
            open_folder(session, parse_folder(folder)?).await?;
            if *all {
                library.select_all_visible().await;
            } else {
                for raw in ids {
                    library.toggle_selection(parse_file_id(raw)?).await?;
                }
            }

            let Some(summary) = library.delete_selected().await else {
                return Ok(());
            };
            if session.format == OutputFormat::Json {
                output::print_json(&serde_json::json!({
                    "deleted": summary.succeeded,
                    "failed": summary
                        .failed
                        .iter()
                        .map(|f| serde_json::json!({ "id": f.id, "error": f.error.message }))
                        .collect::<Vec<_>>(),
                }));
            } else {
                for failure in &summary.failed {
                    output::print_error(&format!("{}: {}", failure.id, failure.error.message));
                }
            }
            if !summary.is_complete() {
                return Err(AppError::network(format!(
                    "{} of {} file(s) could not be deleted",
                    summary.failed_count(),
                    summary.succeeded_count() + summary.failed_count(),
                )));
            }
        }
        FileCommand::DownloadUrl { id } => {
            let url = session.api.download_url(parse_file_id(id)?)?;
            match session.format {
                OutputFormat::Json => output::print_json(&serde_json::json!({ "url": url.as_str() })),
                OutputFormat::Table => println!("{url}"),
            }
        }
    }

    Ok(())
}

async fn open_folder(session: &Session, folder: Option<FolderId>) -> AppResult<()> {
    session.library.open().await?;
    if folder.is_some() {
        session.library.navigate(folder).await?;
    }
    Ok(())
}
