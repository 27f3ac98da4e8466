//! Loading attachments and writing exports on the local filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, Attachment, ExportFile};

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Read a file into an attachment, inferring its MIME type from the extension.
pub fn load_attachment(path: &Path) -> Result<Attachment, AppError> {
    let bytes = fs::read(path)
        .map_err(|source| AppError::AttachmentRead { path: path.display().to_string(), source })?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(Attachment::new(name, mime_for_path(path), bytes))
}

pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => FALLBACK_MIME_TYPE,
    }
}

/// Write an export snapshot into `dir`, creating the directory when missing.
pub fn write_export(dir: &Path, export: &ExportFile) -> Result<PathBuf, AppError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export.file_name);
    fs::write(&path, &export.contents)?;
    Ok(path)
}
