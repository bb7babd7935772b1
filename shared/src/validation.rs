use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ACCEPTED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// What intake knows about a file before reading its contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidFileError {
    #[error("{name} is not a supported image ({mime_type}). Use JPG, PNG, GIF or WEBP.")]
    UnsupportedType { name: String, mime_type: String },
    #[error("{name} is {size} bytes; images must be at most {limit} bytes.")]
    TooLarge { name: String, size: u64, limit: u64 },
    #[error("{name} is empty.")]
    Empty { name: String },
    #[error("{name} claims to be {declared} but its contents look like {detected}.")]
    ContentMismatch {
        name: String,
        declared: String,
        detected: String,
    },
}

pub fn is_accepted_mime_type(mime_type: &str) -> bool {
    ACCEPTED_MIME_TYPES
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(mime_type))
}

pub fn validate_image_file(meta: &FileMeta) -> Result<(), InvalidFileError> {
    validate_image_file_with_limit(meta, MAX_IMAGE_BYTES)
}

pub fn validate_image_file_with_limit(meta: &FileMeta, limit: u64) -> Result<(), InvalidFileError> {
    if !is_accepted_mime_type(&meta.mime_type) {
        return Err(InvalidFileError::UnsupportedType {
            name: meta.name.clone(),
            mime_type: meta.mime_type.clone(),
        });
    }
    if meta.size == 0 {
        return Err(InvalidFileError::Empty {
            name: meta.name.clone(),
        });
    }
    if meta.size > limit {
        return Err(InvalidFileError::TooLarge {
            name: meta.name.clone(),
            size: meta.size,
            limit,
        });
    }
    Ok(())
}
