use super::{ClassificationError, Classifier, Prediction};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::{ClassificationResult, Confidence, RiceVariety};
use std::sync::Mutex;
use std::time::Duration;

pub const STUB_MODEL_VERSION: &str = "stub-random-1";

/// Stand-in for a real model: waits, then picks a variety uniformly at random
/// with a plausible-looking confidence.
pub struct RandomClassifier {
    delay: Duration,
    labels: Vec<RiceVariety>,
    rng: Mutex<StdRng>,
}

impl RandomClassifier {
    pub fn new(delay: Duration) -> Self {
        Self::with_rng(delay, StdRng::from_os_rng())
    }

    pub fn seeded(delay: Duration, seed: u64) -> Self {
        Self::with_rng(delay, StdRng::seed_from_u64(seed))
    }

    fn with_rng(delay: Duration, rng: StdRng) -> Self {
        Self {
            delay,
            labels: RiceVariety::all(),
            rng: Mutex::new(rng),
        }
    }

    fn draw(&self) -> Result<(RiceVariety, Confidence), ClassificationError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| ClassificationError::Unavailable("random source poisoned".into()))?;

        let variety = self.labels[rng.random_range(0..self.labels.len())];
        let base: u8 = rng.random_range(75..100);
        let adjusted = if rng.random_bool(0.5) {
            base.saturating_add(5)
        } else {
            base - 5
        };
        let confidence = Confidence::new(adjusted.min(99))
            .ok_or_else(|| ClassificationError::InvalidResponse(format!("confidence {}", adjusted)))?;
        Ok((variety, confidence))
    }
}

#[async_trait]
impl Classifier for RandomClassifier {
    async fn classify(&self, _image: &[u8]) -> Result<Prediction, ClassificationError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let (variety, confidence) = self.draw()?;
        log::info!(
            "Classified image as: {} with {} confidence",
            variety,
            confidence
        );

        Ok(ClassificationResult {
            label: variety.name().to_string(),
            confidence,
        }
        .into())
    }

    fn model_version(&self) -> &str {
        STUB_MODEL_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn draws_stay_within_stub_bounds() {
        let classifier = RandomClassifier::seeded(Duration::ZERO, 42);
        let mut seen = HashSet::new();
        for _ in 0..2000 {
            let (variety, confidence) = classifier.draw().unwrap();
            assert!((70..=99).contains(&confidence.value()), "{}", confidence);
            seen.insert(variety);
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn seeded_classifiers_are_deterministic() {
        let a = RandomClassifier::seeded(Duration::ZERO, 7);
        let b = RandomClassifier::seeded(Duration::ZERO, 7);
        for _ in 0..20 {
            assert_eq!(a.draw().unwrap(), b.draw().unwrap());
        }
    }

    #[actix_web::test]
    async fn classify_waits_for_the_configured_delay() {
        let classifier = RandomClassifier::seeded(Duration::from_millis(30), 1);
        let started = std::time::Instant::now();
        let result = classifier.classify(&[0xFF, 0xD8, 0xFF]).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
        assert!(RiceVariety::from_label(&result.result.label).is_some());
        assert_eq!(result.model_version, None);
        assert_eq!(classifier.model_version(), STUB_MODEL_VERSION);
    }
}
