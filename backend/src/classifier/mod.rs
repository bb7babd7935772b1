pub mod remote;
pub mod stub;

use crate::config::{ClassifierConfig, ClassifierKind, ConfigError};
use async_trait::async_trait;
use shared::ClassificationResult;
use std::sync::Arc;

pub use remote::RemoteClassifier;
pub use stub::RandomClassifier;

#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("Inference request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Inference service returned {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("Invalid inference response: {0}")]
    InvalidResponse(String),
    #[error("Classifier unavailable: {0}")]
    Unavailable(String),
}

/// One classification, plus the model version when the classifier reports
/// it per response.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub result: ClassificationResult,
    pub model_version: Option<String>,
}

impl From<ClassificationResult> for Prediction {
    fn from(result: ClassificationResult) -> Self {
        Self {
            result,
            model_version: None,
        }
    }
}

/// Anything that turns image bytes into a rice variety label.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, image: &[u8]) -> Result<Prediction, ClassificationError>;

    /// Fallback version for predictions that don't carry their own.
    fn model_version(&self) -> &str;
}

pub fn build_classifier(config: &ClassifierConfig) -> Result<Arc<dyn Classifier>, ConfigError> {
    match config.kind {
        ClassifierKind::Stub => Ok(Arc::new(RandomClassifier::new(config.stub_delay()))),
        ClassifierKind::Remote => {
            let endpoint = config.inference_endpoint()?;
            let classifier = RemoteClassifier::new(endpoint, config.inference_timeout()).map_err(|e| {
                ConfigError::InvalidValue {
                    key: "INFERENCE_URL".to_string(),
                    value: e.to_string(),
                }
            })?;
            Ok(Arc::new(classifier))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_the_configured_classifier() {
        let stub = build_classifier(&ClassifierConfig::default()).unwrap();
        assert_eq!(stub.model_version(), stub::STUB_MODEL_VERSION);

        let remote_config = ClassifierConfig {
            kind: ClassifierKind::Remote,
            inference_url: Some("http://127.0.0.1:7000".into()),
            ..ClassifierConfig::default()
        };
        let remote = build_classifier(&remote_config).unwrap();
        assert_eq!(remote.model_version(), remote::REMOTE_MODEL_VERSION);

        let missing = ClassifierConfig {
            kind: ClassifierKind::Remote,
            ..ClassifierConfig::default()
        };
        assert!(build_classifier(&missing).is_err());
    }
}
