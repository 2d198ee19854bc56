// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The two seams the rest of the system is built around:
//
//   PitchClassifier — anything that turns text into a class
//                     probability distribution
//   PitchSource     — anything that yields dataset rows
//
// The decision pipeline only ever talks to these traits, so the
// real burn model can be swapped for a mock in tests without
// loading any weights.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::pitch::PitchRecord;

// ─── PitchClassifier ──────────────────────────────────────────────────────────
/// A pretrained binary text classifier.
///
/// Implementations:
///   - Inferencer      → burn transformer + HuggingFace tokenizer
///   - LazyClassifier  → loads any classifier on first use, then delegates
pub trait PitchClassifier {
    /// Return the probability of each class for the given text.
    /// Index 0 is "realistic", index 1 is "overpromising".
    fn classify(&self, text: &str) -> Result<Vec<f32>>;
}

impl<C: PitchClassifier + ?Sized> PitchClassifier for &C {
    fn classify(&self, text: &str) -> Result<Vec<f32>> {
        (**self).classify(text)
    }
}

// ─── PitchSource ──────────────────────────────────────────────────────────────
/// Any component that can load the labelled pitch dataset.
///
/// Implementations:
///   - DatasetLoader → spreadsheet (.xlsx/.xls/.ods) or .csv file
pub trait PitchSource {
    fn load_all(&self) -> Result<Vec<PitchRecord>>;
}
