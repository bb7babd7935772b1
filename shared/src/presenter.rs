use crate::banding::{ColorTier, ConfidenceBand};
use crate::intake::Completion;
use crate::variety::{info_for, RiceVariety, RiceVarietyInfo};
use crate::Confidence;

/// Everything the result view displays, derived without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub label: String,
    /// `None` when the label is not a known variety and the fallback entry is shown.
    pub recognized: Option<RiceVariety>,
    pub info: &'static RiceVarietyInfo,
    pub confidence: Confidence,
    pub band: ConfidenceBand,
    pub tier: ColorTier,
    pub preview_url: Option<String>,
}

pub fn present(label: &str, confidence: Confidence, preview_url: Option<&str>) -> ResultView {
    ResultView {
        label: label.to_string(),
        recognized: RiceVariety::from_label(label),
        info: info_for(label),
        confidence,
        band: ConfidenceBand::for_confidence(confidence),
        tier: ColorTier::for_confidence(confidence),
        preview_url: preview_url.map(str::to_string),
    }
}

impl ResultView {
    pub fn from_completion(completion: &Completion) -> Self {
        present(
            &completion.result.label,
            completion.result.confidence,
            completion.preview.as_deref(),
        )
    }

    pub fn description(&self) -> &'static str {
        self.info.description
    }

    /// Width of the confidence bar, in percent.
    pub fn meter_width(&self) -> String {
        format!("{}%", self.confidence.value())
    }
}
