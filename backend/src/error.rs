use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use shared::{ErrorKind, ErrorResponse, InvalidFileError};
use std::time::Duration;

use crate::classifier::ClassificationError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidFile(#[from] InvalidFileError),
    #[error("No image was uploaded. Send a multipart form with an `image` part.")]
    MissingImage,
    #[error("Malformed upload: {0}")]
    Multipart(String),
    #[error("Classification failed: {0}")]
    Classification(#[from] ClassificationError),
    #[error("Classification did not finish within {} seconds", .0.as_secs())]
    Timeout(Duration),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::InvalidFile(InvalidFileError::TooLarge { .. }) => ErrorKind::FileTooLarge,
            ApiError::InvalidFile(InvalidFileError::Empty { .. }) => ErrorKind::EmptyFile,
            ApiError::InvalidFile(_) => ErrorKind::InvalidFileType,
            ApiError::MissingImage => ErrorKind::MissingImage,
            ApiError::Multipart(_) => ErrorKind::BadRequest,
            ApiError::Classification(_) => ErrorKind::ClassificationFailure,
            ApiError::Timeout(_) => ErrorKind::ClassificationTimeout,
        }
    }
}

impl From<actix_multipart::MultipartError> for ApiError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        ApiError::Multipart(err.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::InvalidFileType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ErrorKind::FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorKind::EmptyFile | ErrorKind::MissingImage | ErrorKind::BadRequest => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::ClassificationFailure => StatusCode::BAD_GATEWAY,
            ErrorKind::ClassificationTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.kind(), self.to_string()))
    }
}
