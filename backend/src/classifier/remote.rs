use super::{ClassificationError, Classifier, Prediction};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use shared::{ClassificationResult, Confidence};
use std::time::Duration;
use url::Url;

pub const REMOTE_MODEL_VERSION: &str = "remote";

#[derive(Debug, Deserialize)]
struct RemotePrediction {
    label: String,
    confidence: f32,
    #[serde(default)]
    model_version: Option<String>,
}

/// Forwards images to an inference service: `POST {endpoint}/classify` with a
/// multipart `image` part, answered by `{label, confidence[, model_version]}`.
pub struct RemoteClassifier {
    client: Client,
    classify_url: Url,
}

impl RemoteClassifier {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, ClassificationError> {
        let client = Client::builder().timeout(timeout).build()?;
        let classify_url = classify_url(endpoint)?;
        Ok(Self {
            client,
            classify_url,
        })
    }
}

fn classify_url(mut endpoint: Url) -> Result<Url, ClassificationError> {
    if !endpoint.path().ends_with('/') {
        let path = format!("{}/", endpoint.path());
        endpoint.set_path(&path);
    }
    endpoint
        .join("classify")
        .map_err(|e| ClassificationError::Unavailable(format!("bad inference endpoint: {}", e)))
}

fn sniff_mime_type(image: &[u8]) -> &'static str {
    image::guess_format(image)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

#[async_trait]
impl Classifier for RemoteClassifier {
    async fn classify(&self, image: &[u8]) -> Result<Prediction, ClassificationError> {
        let part = Part::bytes(image.to_vec())
            .file_name("upload")
            .mime_str(sniff_mime_type(image))?;
        let form = Form::new().part("image", part);

        let response = self
            .client
            .post(self.classify_url.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassificationError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let prediction: RemotePrediction = response
            .json()
            .await
            .map_err(|e| ClassificationError::InvalidResponse(e.to_string()))?;

        if prediction.label.trim().is_empty() {
            return Err(ClassificationError::InvalidResponse("empty label".into()));
        }
        let confidence = Confidence::from_percentage(prediction.confidence).ok_or_else(|| {
            ClassificationError::InvalidResponse(format!(
                "confidence {} outside 0..=100",
                prediction.confidence
            ))
        })?;

        Ok(Prediction {
            result: ClassificationResult {
                label: prediction.label,
                confidence,
            },
            model_version: prediction.model_version.filter(|version| !version.trim().is_empty()),
        })
    }

    fn model_version(&self) -> &str {
        REMOTE_MODEL_VERSION
    }
}
