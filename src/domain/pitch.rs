// ============================================================
// Layer 3 — Pitch Domain Types
// ============================================================
// A pitch is just text. It either comes from a dataset row
// (company name + pitch) or is typed in by the user.
//
// Evaluating a pitch ends in exactly one of three outcomes:
//
//   GibberishRejected → failed the quality gate
//   TooWeak           → plausible text, but under 40 characters
//   Classified        → the model labelled it
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use std::fmt;

/// One row of the labelled pitch dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitchRecord {
    pub company_name:  String,
    pub company_pitch: String,
}

impl PitchRecord {
    pub fn new(company_name: impl Into<String>, company_pitch: impl Into<String>) -> Self {
        Self {
            company_name:  company_name.into(),
            company_pitch: company_pitch.into(),
        }
    }
}

/// The two classes the pretrained model distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// Class index 0
    Realistic,
    /// Class index 1
    Overpromising,
}

impl Label {
    /// Map a model class index onto a label.
    /// Index 1 is the positive "overpromising" class; everything else is realistic.
    pub fn from_class_index(index: usize) -> Self {
        match index {
            1 => Label::Overpromising,
            _ => Label::Realistic,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Realistic     => write!(f, "Realistic"),
            Label::Overpromising => write!(f, "Overpromising"),
        }
    }
}

/// The model's verdict for a single pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationResult {
    pub label: Label,

    /// Probability of the chosen class, as a percentage in [0, 100]
    pub confidence: f32,
}

impl ClassificationResult {
    /// Pick the most probable class from a probability distribution.
    ///
    /// Ties resolve to the lowest class index. Returns None for an
    /// empty distribution.
    pub fn from_distribution(probabilities: &[f32]) -> Option<Self> {
        let (index, probability) = probabilities
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (i, p)| match best {
                Some((_, best_p)) if best_p >= p => best,
                _ => Some((i, p)),
            })?;

        Some(Self {
            label:      Label::from_class_index(index),
            confidence: (probability * 100.0).clamp(0.0, 100.0),
        })
    }
}

/// Terminal state of the decision pipeline for one pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PitchOutcome {
    GibberishRejected,
    TooWeak,
    Classified(ClassificationResult),
}

impl PitchOutcome {
    pub fn classification(&self) -> Option<&ClassificationResult> {
        match self {
            PitchOutcome::Classified(result) => Some(result),
            _ => None,
        }
    }
}
