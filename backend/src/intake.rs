use actix_multipart::{Field, Multipart};
use futures::{StreamExt, TryStreamExt};
use sha2::{Digest, Sha256};
use shared::validation::{is_accepted_mime_type, validate_image_file_with_limit};
use shared::{FileMeta, InvalidFileError};

use crate::error::ApiError;

pub const IMAGE_FIELD: &str = "image";

/// An image as received from the client, before classification.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn meta(&self) -> FileMeta {
        FileMeta {
            name: self.file_name.clone(),
            mime_type: self.mime_type.clone(),
            size: self.bytes.len() as u64,
        }
    }

    pub fn hash(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}

/// Reads the `image` part of a multipart upload, giving up as soon as it
/// exceeds `limit` bytes. Other parts are drained and ignored.
pub async fn read_upload(mut payload: Multipart, limit: u64) -> Result<UploadedImage, ApiError> {
    let mut upload = None;

    while let Some(mut field) = payload.try_next().await? {
        let is_image = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .map(|name| name == IMAGE_FIELD)
            .unwrap_or(false);

        if !is_image || upload.is_some() {
            while field.next().await.is_some() {}
            continue;
        }

        upload = Some(read_image_field(&mut field, limit).await?);
    }

    upload.ok_or(ApiError::MissingImage)
}

async fn read_image_field(field: &mut Field, limit: u64) -> Result<UploadedImage, ApiError> {
    let file_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .unwrap_or("upload")
        .to_string();
    let mime_type = field
        .content_type()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    // Unsupported types are refused before any bytes are buffered.
    if !is_accepted_mime_type(&mime_type) {
        return Err(InvalidFileError::UnsupportedType {
            name: file_name,
            mime_type,
        }
        .into());
    }

    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk?;
        bytes.extend_from_slice(&data);
        if bytes.len() as u64 > limit {
            return Err(InvalidFileError::TooLarge {
                name: file_name,
                size: bytes.len() as u64,
                limit,
            }
            .into());
        }
    }

    Ok(UploadedImage {
        file_name,
        mime_type,
        bytes,
    })
}

/// Applies the shared file contract, then checks that the bytes really are the
/// declared image format.
pub fn validate_upload(upload: &UploadedImage, limit: u64) -> Result<(), InvalidFileError> {
    validate_image_file_with_limit(&upload.meta(), limit)?;

    let detected = image::guess_format(&upload.bytes)
        .map(|format| format.to_mime_type())
        .map_err(|_| InvalidFileError::ContentMismatch {
            name: upload.file_name.clone(),
            declared: upload.mime_type.clone(),
            detected: "unknown data".to_string(),
        })?;

    if !detected.eq_ignore_ascii_case(&upload.mime_type) {
        return Err(InvalidFileError::ContentMismatch {
            name: upload.file_name.clone(),
            declared: upload.mime_type.clone(),
            detected: detected.to_string(),
        });
    }
    Ok(())
}
