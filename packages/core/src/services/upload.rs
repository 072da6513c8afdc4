use std::path::Path;

use reqwest::multipart::Part;

use crate::error::AppError;
use crate::validation::{validate_image_file, Field};

/// An image read into memory so it can be re-sent if a request has to be
/// retried after a token refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Read an image from disk. Non-image files are rejected up front.
    pub async fn image_from_path(field: Field, path: &Path) -> Result<Self, AppError> {
        validate_image_file(field, path)?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| AppError::Config(format!("cannot read {}: {}", path.display(), err)))?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }

    pub fn to_part(&self) -> Result<Part, AppError> {
        Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime)
            .map_err(|err| AppError::Parse(format!("invalid mime type {}: {}", self.mime, err)))
    }
}
