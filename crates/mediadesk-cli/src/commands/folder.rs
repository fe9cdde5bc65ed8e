//! Folder management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use mediadesk_core::result::AppResult;
use mediadesk_core::types::folder_param;
use mediadesk_entity::{Folder, FolderNode};
use mediadesk_library::Crumb;

use super::{Session, parse_folder, parse_folder_id};
use crate::output::{self, OutputFormat};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List folders
    List {
        /// Only children of this folder (`root` for top level)
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// Show the folder tree
    Tree,
    /// Create a new folder
    Create {
        /// Folder name
        name: String,
        /// Parent folder ID (omit for root)
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// Delete a folder with everything beneath it
    Delete {
        /// Folder ID
        id: String,
    },
    /// Move a folder under a new parent
    Move {
        /// Folder ID
        id: String,
        /// New parent folder ID, or `root`
        #[arg(short, long)]
        parent: String,
    },
    /// Print the breadcrumb path of a folder
    Path {
        /// Folder ID
        id: String,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Folder ID
    id: String,
    /// Name
    name: String,
    /// Parent folder
    parent: String,
    /// Files
    files: u64,
    /// Created at
    created_at: String,
}

impl From<&Folder> for FolderRow {
    fn from(f: &Folder) -> Self {
        Self {
            id: f.id.to_string(),
            name: f.name.clone(),
            parent: folder_param(f.parent_id),
            files: f.file_count,
            created_at: f.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// One breadcrumb step
#[derive(Debug, Serialize, Tabled)]
struct CrumbRow {
    /// Folder ID, or `root`
    id: String,
    /// Name
    name: String,
}

impl From<&Crumb> for CrumbRow {
    fn from(crumb: &Crumb) -> Self {
        match crumb {
            Crumb::Root => Self {
                id: folder_param(None),
                name: "Root".to_string(),
            },
            Crumb::Folder { id, name } => Self {
                id: id.to_string(),
                name: name.clone(),
            },
        }
    }
}

/// Execute folder commands
pub async fn execute(args: &FolderArgs, session: &Session) -> AppResult<()> {
    let library = &session.library;
    library.open().await?;

    match &args.command {
        FolderCommand::List { parent } => {
            let parent = parent.as_deref().map(parse_folder).transpose()?;
            let rows: Vec<FolderRow> = library
                .folders()
                .await
                .iter()
                .filter(|f| parent.is_none_or(|p| f.parent_id == p))
                .map(FolderRow::from)
                .collect();
            output::print_list(&rows, session.format);
        }
        FolderCommand::Tree => {
            let forest = library.folder_forest().await;
            match session.format {
                OutputFormat::Json => output::print_json(&forest),
                OutputFormat::Table => {
                    println!("/");
                    print_nodes(&forest);
                }
            }
        }
        FolderCommand::Create { name, parent } => {
            let parent = match parent {
                Some(raw) => parse_folder(raw)?,
                None => None,
            };
            let folder = library.create_folder(name, parent).await?;
            report_folder(&folder, session.format);
        }
        FolderCommand::Delete { id } => {
            let id = parse_folder_id(id)?;
            library.delete_folder(id).await?;
        }
        FolderCommand::Move { id, parent } => {
            let id = parse_folder_id(id)?;
            let parent = parse_folder(parent)?;
            let folder = library.move_folder(id, parent).await?;
            report_folder(&folder, session.format);
        }
        FolderCommand::Path { id } => {
            let id = parse_folder_id(id)?;
            let trail = library.trail(Some(id)).await;
            let rows: Vec<CrumbRow> = trail.iter().map(CrumbRow::from).collect();
            match session.format {
                OutputFormat::Json => output::print_json(&rows),
                OutputFormat::Table => {
                    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
                    println!("{}", names.join(" / "));
                }
            }
        }
    }

    Ok(())
}

fn report_folder(folder: &Folder, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(folder),
        OutputFormat::Table => output::print_kv("id", &folder.id.to_string()),
    }
}

fn print_nodes(nodes: &[FolderNode]) {
    for node in nodes {
        let indent = "  ".repeat(node.depth + 1);
        println!("{indent}├── {}/ ({} files)", node.name, node.file_count);
        print_nodes(&node.children);
    }
}
