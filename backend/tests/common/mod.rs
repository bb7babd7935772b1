#![allow(dead_code)]

use async_trait::async_trait;
use backend::classifier::{ClassificationError, Classifier, Prediction};
use shared::{ClassificationResult, Confidence};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const BOUNDARY: &str = "----grain-test-boundary";
pub const JPEG_BYTES: [u8; 12] = [
    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01,
];

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

/// Builds a multipart body with a single file part.
pub fn file_part_body(field: &str, file_name: &str, mime_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", mime_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Answers with a fixed result and counts how often it was asked.
pub struct FixedClassifier {
    pub label: String,
    pub confidence: u8,
    pub reported_version: Option<String>,
    pub calls: AtomicUsize,
}

impl FixedClassifier {
    pub fn new(label: &str, confidence: u8) -> Self {
        Self {
            label: label.to_string(),
            confidence,
            reported_version: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn reporting_version(mut self, version: &str) -> Self {
        self.reported_version = Some(version.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Classifier for FixedClassifier {
    async fn classify(&self, _image: &[u8]) -> Result<Prediction, ClassificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Prediction {
            result: ClassificationResult {
                label: self.label.clone(),
                confidence: Confidence::new(self.confidence).unwrap(),
            },
            model_version: self.reported_version.clone(),
        })
    }

    fn model_version(&self) -> &str {
        "fixed-test"
    }
}

pub struct FailingClassifier;

#[async_trait]
impl Classifier for FailingClassifier {
    async fn classify(&self, _image: &[u8]) -> Result<Prediction, ClassificationError> {
        Err(ClassificationError::Unavailable("model not loaded".into()))
    }

    fn model_version(&self) -> &str {
        "failing-test"
    }
}

pub struct HangingClassifier;

#[async_trait]
impl Classifier for HangingClassifier {
    async fn classify(&self, _image: &[u8]) -> Result<Prediction, ClassificationError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(ClassificationError::Unavailable("woke up".into()))
    }

    fn model_version(&self) -> &str {
        "hanging-test"
    }
}
