//! CLI command definitions and dispatch.

pub mod file;
pub mod folder;
pub mod serve;
pub mod stats;
pub mod upload;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use mediadesk_client::HttpMediaApi;
use mediadesk_core::config::AppConfig;
use mediadesk_core::error::AppError;
use mediadesk_core::result::AppResult;
use mediadesk_core::types::{FileId, FolderId, UserId, parse_folder_param};
use mediadesk_library::{AutoConfirm, Confirmer, LibraryContext, MediaLibrary, Notifier};

use crate::output::OutputFormat;
use crate::prompt::{ConsoleNotifier, DialoguerConfirmer};

/// MediaDesk: media library administration
#[derive(Debug, Parser)]
#[command(name = "mediadesk", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file (extension optional)
    #[arg(short, long, global = true, default_value = "config/default")]
    pub config: String,

    /// MediaDesk server URL, overriding `client.base_url`
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Acting user ID sent as `x-user-id`
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the MediaDesk server
    Serve(serve::ServeArgs),
    /// Folder management
    Folder(folder::FolderArgs),
    /// File management
    File(file::FileArgs),
    /// Upload local files as one batch
    Upload(upload::UploadArgs),
    /// Library-wide statistics
    Stats,
}

/// A connected library plus the settings commands print with.
pub struct Session {
    /// Raw client, for calls the library does not wrap.
    pub api: Arc<HttpMediaApi>,
    /// Library view over `api`.
    pub library: MediaLibrary<HttpMediaApi>,
    /// Output format
    pub format: OutputFormat,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, notifier: Arc<ConsoleNotifier>) -> AppResult<()> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, self.load_config()?).await,
            Commands::Folder(args) => folder::execute(args, &self.session(notifier)?).await,
            Commands::File(args) => file::execute(args, &self.session(notifier)?).await,
            Commands::Upload(args) => upload::execute(args, &self.session(notifier)?).await,
            Commands::Stats => stats::execute(&self.session(notifier)?).await,
        }
    }

    /// Load configuration and apply command-line overrides.
    pub fn load_config(&self) -> AppResult<AppConfig> {
        let env = std::env::var("MEDIADESK_ENV").unwrap_or_else(|_| "development".to_string());
        let mut config = AppConfig::load_from(&self.config, &env)?;
        if let Some(server) = &self.server {
            config.client.base_url = server.clone();
        }
        Ok(config)
    }

    fn session(&self, notifier: Arc<ConsoleNotifier>) -> AppResult<Session> {
        let config = self.load_config()?;
        let user_id = self.user.as_deref().map(parse_user_id).transpose()?;

        let mut api = HttpMediaApi::new(&config.client)?;
        let confirmer: Arc<dyn Confirmer> = if self.yes {
            Arc::new(AutoConfirm::yes())
        } else {
            Arc::new(DialoguerConfirmer)
        };
        let mut ctx = LibraryContext::new(notifier as Arc<dyn Notifier>, confirmer);
        if let Some(user_id) = user_id {
            api = api.with_user(user_id);
            ctx = ctx.with_user(user_id);
        }

        tracing::debug!(server = %api.base_url(), "Connecting to MediaDesk");
        let api = Arc::new(api);
        let library = MediaLibrary::new(Arc::clone(&api), ctx)
            .with_upload_timeout(config.client.upload_timeout());

        Ok(Session {
            api,
            library,
            format: self.format,
        })
    }
}

/// Parse a folder argument: a UUID or `root`.
pub fn parse_folder(raw: &str) -> AppResult<Option<FolderId>> {
    parse_folder_param(raw)
}

/// Parse a folder UUID that may not be `root`.
pub fn parse_folder_id(raw: &str) -> AppResult<FolderId> {
    parse_folder(raw)?.ok_or_else(|| AppError::validation("Expected a folder ID, not 'root'"))
}

/// Parse a file UUID.
pub fn parse_file_id(raw: &str) -> AppResult<FileId> {
    raw.trim()
        .parse()
        .map_err(|e| AppError::validation(format!("Invalid file ID '{raw}': {e}")))
}

fn parse_user_id(raw: &str) -> AppResult<UserId> {
    raw.trim()
        .parse()
        .map_err(|e| AppError::validation(format!("Invalid user ID '{raw}': {e}")))
}
