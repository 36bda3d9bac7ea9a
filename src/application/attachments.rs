//! Attachment upload / download / removal

use crate::domain::Attachment;
use crate::error::{NotepinError, Result};
use crate::infrastructure::{ApiClient, AttachmentBlob};
use std::fs;
use std::path::Path;

pub struct AttachmentService {
    api: ApiClient,
}

impl AttachmentService {
    pub fn new(api: ApiClient) -> Self {
        AttachmentService { api }
    }

    /// Upload each file in turn; stops at the first failure
    pub async fn upload(&self, note_id: i64, paths: &[&Path]) -> Result<Vec<Attachment>> {
        let mut uploaded = Vec::with_capacity(paths.len());
        for path in paths {
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| {
                    NotepinError::InvalidInput(format!("not a file path: {}", path.display()))
                })?
                .to_string();
            let bytes = fs::read(path)?;
            let mime = mime_for(&filename);

            let attachment = self
                .api
                .upload_attachment(note_id, &filename, mime, bytes)
                .await?;
            tracing::info!(note_id, id = attachment.id, filename = %attachment.filename, "attachment uploaded");
            uploaded.push(attachment);
        }
        Ok(uploaded)
    }

    pub async fn fetch(&self, id: i64) -> Result<AttachmentBlob> {
        self.api.fetch_attachment(id).await.map_err(|e| match e.status() {
            Some(404) => NotepinError::AttachmentNotFound(id),
            _ => e.into(),
        })
    }

    /// Download into `dest`, returning the number of bytes written
    pub async fn save_to(&self, id: i64, dest: &Path) -> Result<usize> {
        let blob = self.fetch(id).await?;
        fs::write(dest, &blob.bytes)?;
        tracing::info!(id, dest = %dest.display(), mime = %blob.mime_type, "attachment saved");
        Ok(blob.bytes.len())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.api.delete_attachment(id).await?;
        tracing::info!(id, "attachment deleted");
        Ok(())
    }
}

/// Mime type sent with an upload, from the file extension
pub fn mime_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "pdf" => "application/pdf",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "txt" | "md" => "text/plain",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}
