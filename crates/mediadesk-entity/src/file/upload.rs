//! Local blobs handed to the upload flow.

use bytes::Bytes;

use mediadesk_core::types::FolderId;

use super::file_type::FileType;

/// One local file waiting to be uploaded.
#[derive(Debug, Clone)]
pub struct UploadBlob {
    /// File name as picked by the user.
    pub file_name: String,
    /// Declared MIME type, if the source provided one.
    pub mime_type: Option<String>,
    /// File content.
    pub data: Bytes,
}

impl UploadBlob {
    /// Create a blob with an explicit MIME type.
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: Some(mime_type.into()),
            data: data.into(),
        }
    }

    /// Create a blob whose MIME type is guessed from its name.
    pub fn guessed(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            data: data.into(),
        }
    }

    /// The declared MIME type, or one guessed from the file name.
    ///
    /// `application/octet-stream` counts as "not declared".
    pub fn resolved_mime(&self) -> String {
        match self.mime_type.as_deref() {
            Some(mime) if !mime.is_empty() && mime != "application/octet-stream" => mime.to_string(),
            _ => mime_guess::from_path(&self.file_name)
                .first_or_octet_stream()
                .to_string(),
        }
    }

    /// Classification of the resolved MIME type.
    pub fn file_type(&self) -> FileType {
        FileType::from_mime(&self.resolved_mime())
    }

    /// Content length in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// A batch of files committed together into one folder.
#[derive(Debug, Clone, Default)]
pub struct UploadBatch {
    /// Target folder (None for root).
    pub folder_id: Option<FolderId>,
    /// Files in the order they were picked.
    pub files: Vec<UploadBlob>,
}

impl UploadBatch {
    /// Create a batch for the given folder.
    pub fn new(folder_id: Option<FolderId>, files: Vec<UploadBlob>) -> Self {
        Self { folder_id, files }
    }

    /// Total payload size in bytes.
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(UploadBlob::size).sum()
    }

    /// Whether the batch carries no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
