// ============================================================
// Layer 2 — Pitch Evaluation Use Case
// ============================================================
// The decision pipeline for a single pitch:
//
//   Step 1: Quality gate      → GibberishRejected
//   Step 2: Length check      → TooWeak (trimmed < 40 chars)
//   Step 3: Model inference   → Classified(label, confidence)
//
// The classifier is only consulted when both gates pass.

use anyhow::{Context, Result};

use crate::domain::{
    pitch::{ClassificationResult, PitchOutcome},
    quality::is_gibberish,
    traits::PitchClassifier,
};

/// Pitches shorter than this (after trimming) are too weak to classify.
pub const MIN_PITCH_CHARS: usize = 40;

pub struct PitchEvaluator<C> {
    classifier: C,
}

impl<C: PitchClassifier> PitchEvaluator<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn evaluate(&self, pitch: &str) -> Result<PitchOutcome> {
        if is_gibberish(pitch) {
            tracing::debug!("Rejected as gibberish: {:?}", pitch);
            return Ok(PitchOutcome::GibberishRejected);
        }

        let length = pitch.trim().chars().count();
        if length < MIN_PITCH_CHARS {
            tracing::debug!("Too weak: {} chars", length);
            return Ok(PitchOutcome::TooWeak);
        }

        let probabilities = self.classifier.classify(pitch)?;
        let result = ClassificationResult::from_distribution(&probabilities)
            .context("Classifier returned an empty probability distribution")?;

        tracing::debug!("Classified as {} ({:.1}%)", result.label, result.confidence);
        Ok(PitchOutcome::Classified(result))
    }
}
