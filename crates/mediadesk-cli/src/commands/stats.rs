//! Library statistics.

use mediadesk_core::result::AppResult;
use mediadesk_entity::FileType;

use super::Session;
use crate::output::{self, OutputFormat};

/// Execute the stats command
pub async fn execute(session: &Session) -> AppResult<()> {
    let stats = session.library.refresh_stats().await?;

    match session.format {
        OutputFormat::Json => output::print_json(&stats),
        OutputFormat::Table => {
            println!("Media library");
            output::print_kv("Files", &stats.total_files.to_string());
            output::print_kv("Total size", &output::format_size(stats.total_size));
            for file_type in FileType::ALL {
                output::print_kv(
                    file_type.as_str(),
                    &stats.files_by_type.get(file_type).to_string(),
                );
            }
        }
    }
    Ok(())
}
