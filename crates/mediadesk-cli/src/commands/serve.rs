//! Run a MediaDesk server from the CLI.

use clap::Args;

use mediadesk_core::config::AppConfig;
use mediadesk_core::result::AppResult;

use crate::output;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the per-file upload limit, in megabytes
    #[arg(long)]
    pub max_upload_mb: Option<u64>,
}

impl ServeArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(mb) = self.max_upload_mb {
            config.upload.max_upload_size_bytes = mb.saturating_mul(1024 * 1024);
        }
    }
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> AppResult<()> {
    args.apply(&mut config);

    println!("MediaDesk server");
    output::print_kv("Listening on", &config.server.bind_address());
    output::print_kv(
        "Upload limit",
        &format!(
            "{} per file, {} files per batch",
            output::format_size(config.upload.max_upload_size_bytes),
            config.upload.max_batch_files
        ),
    );

    mediadesk_api::run_server(config).await
}
