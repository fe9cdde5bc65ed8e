//! Multipart upload bodies that report how much has been handed to the socket.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use futures::stream;
use reqwest::Body;
use reqwest::multipart::{Form, Part};

use mediadesk_core::error::{AppError, ErrorKind};
use mediadesk_core::result::AppResult;
use mediadesk_core::types::folder_param;
use mediadesk_entity::UploadBatch;
use mediadesk_library::ProgressReporter;

/// Size of the slices a file body is streamed in.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Build the multipart form for `batch`.
///
/// Every file part is streamed in [`CHUNK_SIZE`] slices; each slice handed
/// to the transport advances `progress` by its share of the batch.
pub fn build_form(batch: UploadBatch, progress: ProgressReporter) -> AppResult<Form> {
    let total = batch.total_size();
    let sent = Arc::new(AtomicU64::new(0));

    let mut form = Form::new().text("folder_id", folder_param(batch.folder_id));

    for blob in batch.files {
        let mime = blob.resolved_mime();
        let length = blob.size();
        let body = progress_body(blob.data, sent.clone(), total, progress.clone());
        let part = Part::stream_with_length(body, length)
            .file_name(blob.file_name.clone())
            .mime_str(&mime)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Validation,
                    format!("Invalid content type '{mime}' for '{}'", blob.file_name),
                    e,
                )
            })?;
        form = form.part("files", part);
    }

    Ok(form)
}

fn progress_body(
    data: Bytes,
    sent: Arc<AtomicU64>,
    total: u64,
    progress: ProgressReporter,
) -> Body {
    let chunks = split(data, CHUNK_SIZE);
    let chunks = stream::iter(chunks.into_iter().map(move |chunk| {
        let done = sent.fetch_add(chunk.len() as u64, Ordering::AcqRel) + chunk.len() as u64;
        progress.report_fraction(done, total);
        Ok::<Bytes, std::io::Error>(chunk)
    }));
    Body::wrap_stream(chunks)
}

/// Zero-copy slices of at most `size` bytes.
fn split(data: Bytes, size: usize) -> Vec<Bytes> {
    let mut chunks = Vec::with_capacity(data.len().div_ceil(size.max(1)));
    let mut offset = 0;
    while offset < data.len() {
        let end = (offset + size).min(data.len());
        chunks.push(data.slice(offset..end));
        offset = end;
    }
    chunks
}
