pub mod banding;
pub mod intake;
pub mod presenter;
pub mod validation;
pub mod variety;

use derive_more::Display;
use serde::{Deserialize, Serialize};

pub use banding::{ColorTier, ConfidenceBand};
pub use intake::{Completion, Intake, IntakeError, IntakePhase, IntakeSnapshot, WorkflowController};
pub use presenter::{present, ResultView};
pub use validation::{validate_image_file, FileMeta, InvalidFileError};
pub use variety::{info_for, RiceVariety, RiceVarietyInfo};

/// Integer confidence percentage, always within 0..=100.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[display(fmt = "{}%", _0)]
#[serde(try_from = "u8", into = "u8")]
pub struct Confidence(u8);

impl Confidence {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    /// Rounds to the nearest integer, then range-checks. `None` for NaN or
    /// anything that does not round into 0..=100.
    pub fn from_percentage(value: f32) -> Option<Self> {
        let rounded = value.round();
        if !rounded.is_finite() || !(0.0..=f32::from(Self::MAX)).contains(&rounded) {
            return None;
        }
        Some(Self(rounded as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Confidence {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Confidence::new(value).ok_or_else(|| format!("confidence {} exceeds 100", value))
    }
}

impl From<Confidence> for u8 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClassificationResult {
    pub label: String,
    pub confidence: Confidence,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClassifyResponse {
    #[serde(flatten)]
    pub result: ClassificationResult,
    pub model_version: String,
    pub processing_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_hash: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidFileType,
    FileTooLarge,
    EmptyFile,
    MissingImage,
    BadRequest,
    ClassificationFailure,
    ClassificationTimeout,
}

impl ErrorKind {
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            ErrorKind::ClassificationFailure | ErrorKind::ClassificationTimeout
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
    pub retryable: bool,
}

impl ErrorResponse {
    pub fn new(kind: ErrorKind, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            kind,
            retryable: kind.is_retryable(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct VarietySummary {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub model_version: String,
}
