use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use shared::{ClassifyResponse, ErrorResponse, IntakeError};

pub const CLASSIFY_ENDPOINT: &str = "/api/classify";

fn failure(message: impl Into<String>, retryable: bool) -> IntakeError {
    IntakeError::Classification {
        message: message.into(),
        retryable,
    }
}

/// Uploads the image as the `image` part of a multipart form.
pub async fn classify_image(file: &GlooFile) -> Result<ClassifyResponse, IntakeError> {
    let form_data =
        web_sys::FormData::new().map_err(|_| failure("Could not prepare the upload form.", false))?;
    let raw_file: &web_sys::File = file.as_ref();
    form_data
        .append_with_blob_and_filename("image", raw_file, &file.name())
        .map_err(|_| failure("Could not attach the image to the upload form.", false))?;

    let request = Request::post(CLASSIFY_ENDPOINT)
        .body(form_data)
        .map_err(|e| failure(format!("Failed to build request: {}", e), false))?;

    let response = request
        .send()
        .await
        .map_err(|e| failure(format!("Network error: {}", e), true))?;

    if response.ok() {
        return response
            .json::<ClassifyResponse>()
            .await
            .map_err(|e| failure(format!("Failed to parse response: {}", e), true));
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(error) => Err(IntakeError::from(error)),
        Err(_) => Err(failure(format!("Server error: {} - {}", status, body), status >= 500)),
    }
}
