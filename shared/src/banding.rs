use crate::Confidence;
use strum_macros::Display;

/// Qualitative label for a confidence value, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum ConfidenceBand {
    Moderate,
    Good,
    High,
    #[strum(serialize = "Very High")]
    VeryHigh,
    Excellent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ColorTier {
    Orange,
    Yellow,
    Green,
}

impl ConfidenceBand {
    pub fn for_confidence(confidence: Confidence) -> Self {
        match confidence.value() {
            95.. => ConfidenceBand::Excellent,
            85.. => ConfidenceBand::VeryHigh,
            75.. => ConfidenceBand::High,
            60.. => ConfidenceBand::Good,
            _ => ConfidenceBand::Moderate,
        }
    }
}

impl ColorTier {
    pub fn for_confidence(confidence: Confidence) -> Self {
        match confidence.value() {
            90.. => ColorTier::Green,
            75.. => ColorTier::Yellow,
            _ => ColorTier::Orange,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ColorTier::Green => "tier-green",
            ColorTier::Yellow => "tier-yellow",
            ColorTier::Orange => "tier-orange",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(value: u8) -> Confidence {
        Confidence::new(value).unwrap()
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(ConfidenceBand::for_confidence(c(95)), ConfidenceBand::Excellent);
        assert_eq!(ConfidenceBand::for_confidence(c(94)), ConfidenceBand::VeryHigh);
        assert_eq!(ConfidenceBand::for_confidence(c(85)), ConfidenceBand::VeryHigh);
        assert_eq!(ConfidenceBand::for_confidence(c(84)), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::for_confidence(c(75)), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::for_confidence(c(74)), ConfidenceBand::Good);
        assert_eq!(ConfidenceBand::for_confidence(c(60)), ConfidenceBand::Good);
        assert_eq!(ConfidenceBand::for_confidence(c(59)), ConfidenceBand::Moderate);
        assert_eq!(ConfidenceBand::for_confidence(c(0)), ConfidenceBand::Moderate);
        assert_eq!(ConfidenceBand::for_confidence(c(100)), ConfidenceBand::Excellent);
    }

    #[test]
    fn band_labels_render_as_displayed() {
        assert_eq!(ConfidenceBand::VeryHigh.to_string(), "Very High");
        assert_eq!(ConfidenceBand::Excellent.to_string(), "Excellent");
        assert_eq!(ColorTier::Yellow.to_string(), "yellow");
    }

    #[test]
    fn banding_is_monotonic_over_the_whole_range() {
        let mut previous_band = ConfidenceBand::Moderate;
        let mut previous_tier = ColorTier::Orange;
        for value in 0..=100u8 {
            let band = ConfidenceBand::for_confidence(c(value));
            let tier = ColorTier::for_confidence(c(value));
            assert!(band >= previous_band, "band dropped at {}", value);
            assert!(tier >= previous_tier, "tier dropped at {}", value);
            previous_band = band;
            previous_tier = tier;
        }
    }

    #[test]
    fn color_tier_boundaries() {
        assert_eq!(ColorTier::for_confidence(c(90)), ColorTier::Green);
        assert_eq!(ColorTier::for_confidence(c(89)), ColorTier::Yellow);
        assert_eq!(ColorTier::for_confidence(c(75)), ColorTier::Yellow);
        assert_eq!(ColorTier::for_confidence(c(74)), ColorTier::Orange);
    }
}
