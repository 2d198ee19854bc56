// ============================================================
// Layer 2 — Pitch Desk (classifier stage)
// ============================================================
// Everything the classifier stage does once a user is onboarded:
//
//   - holds the Session (name + role) for the run
//   - loads the labelled dataset once (failure is fatal)
//   - searches the dataset by company name and evaluates
//     every matching pitch
//   - evaluates ad hoc pitches typed by the user
//
// The classifier is injected. In production it is a
// LazyClassifier around the burn Inferencer, so the model is
// read from disk the first time a pitch clears both gates and
// kept for the rest of the process.
//
// Reference: Rust Book §10 (Generic Types), §17 (Trait Objects)

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::evaluate_use_case::PitchEvaluator;
use crate::data::search::find_by_company;
use crate::domain::{
    pitch::{PitchOutcome, PitchRecord},
    session::Session,
    traits::{PitchClassifier, PitchSource},
};
use crate::infra::{cached_classifier::LazyClassifier, model_store::ModelStore};
use crate::ml::inferencer::{InferBackend, Inferencer};

// ─── Desk Configuration ──────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct DeskConfig {
    /// HuggingFace model directory written by `save_pretrained`
    pub model_dir: PathBuf,

    /// Labelled pitch spreadsheet (.xlsx/.xls/.ods/.csv)
    pub dataset: PathBuf,

    /// Print the model's confidence next to the label
    pub show_confidence: bool,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            model_dir:       PathBuf::from("distilbert_model"),
            dataset:         PathBuf::from("YC_labeled_realistic_vs_overpromisinggg.xlsx"),
            show_confidence: false,
        }
    }
}

/// Build the production classifier: burn model on the Wgpu backend,
/// loaded from `model_dir` on first use.
pub fn lazy_model_classifier(
    model_dir: PathBuf,
) -> LazyClassifier<Inferencer<InferBackend>, impl Fn() -> Result<Inferencer<InferBackend>>> {
    LazyClassifier::new(move || {
        let store = ModelStore::new(model_dir.clone());
        Inferencer::<InferBackend>::from_store(&store, Default::default())
            .with_context(|| format!("Cannot load pitch classifier from '{}'", model_dir.display()))
    })
}

/// One dataset match and what the pipeline made of it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    pub record:  &'a PitchRecord,
    pub outcome: PitchOutcome,
}

pub struct PitchDesk<C> {
    session:   Session,
    evaluator: PitchEvaluator<C>,
    records:   Vec<PitchRecord>,
}

impl<C: PitchClassifier> PitchDesk<C> {
    pub fn new(session: Session, evaluator: PitchEvaluator<C>) -> Self {
        Self { session, evaluator, records: Vec::new() }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn dataset_len(&self) -> usize {
        self.records.len()
    }

    /// Load the labelled dataset. An error here ends the classifier stage.
    pub fn load_dataset(&mut self, source: &dyn PitchSource) -> Result<usize> {
        self.records = source.load_all()?;
        Ok(self.records.len())
    }

    /// Run the decision pipeline on an ad hoc pitch.
    pub fn evaluate(&self, pitch: &str) -> Result<PitchOutcome> {
        tracing::debug!("{} ({}) submitted a pitch", self.session.name(), self.session.role());
        self.evaluator.evaluate(pitch)
    }

    /// Find companies by name and evaluate each of their pitches.
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit<'_>>> {
        let matches = find_by_company(&self.records, query);
        tracing::debug!("Query {:?} matched {} companies", query.trim(), matches.len());

        let mut hits = Vec::with_capacity(matches.len());
        for record in matches {
            let outcome = self.evaluator.evaluate(&record.company_pitch)?;
            hits.push(SearchHit { record, outcome });
        }
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::evaluate_use_case::tests::{MockClassifier, GOOD_PITCH};
    use crate::domain::{pitch::Label, session::Role};

    struct InMemory(Vec<PitchRecord>);

    impl PitchSource for InMemory {
        fn load_all(&self) -> Result<Vec<PitchRecord>> {
            Ok(self.0.clone())
        }
    }

    struct Broken;

    impl PitchSource for Broken {
        fn load_all(&self) -> Result<Vec<PitchRecord>> {
            anyhow::bail!("file is not a spreadsheet")
        }
    }

    fn desk(probabilities: Vec<f32>) -> PitchDesk<MockClassifier> {
        let session = Session::new("Mark", Role::Investor).unwrap();
        PitchDesk::new(session, PitchEvaluator::new(MockClassifier::new(probabilities)))
    }

    fn dataset() -> InMemory {
        InMemory(vec![
            PitchRecord::new("FarmLink", GOOD_PITCH),
            PitchRecord::new("Linkly", "ok"),
            PitchRecord::new("Breadly", "We sell tasty local bread daily."),
        ])
    }

    #[test]
    fn test_search_evaluates_each_match() {
        let mut desk = desk(vec![0.3, 0.7]);
        assert_eq!(desk.load_dataset(&dataset()).unwrap(), 3);

        let hits = desk.search("LINK").unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].record.company_name, "FarmLink");
        assert_eq!(hits[0].outcome.classification().map(|r| r.label), Some(Label::Overpromising));
        assert_eq!(hits[1].outcome, PitchOutcome::GibberishRejected);
    }

    #[test]
    fn test_short_dataset_pitch_is_too_weak() {
        let mut desk = desk(vec![0.9, 0.1]);
        desk.load_dataset(&dataset()).unwrap();
        let hits = desk.search("bread").unwrap();
        assert_eq!(hits[0].outcome, PitchOutcome::TooWeak);
    }

    #[test]
    fn test_no_matches() {
        let mut desk = desk(vec![0.9, 0.1]);
        desk.load_dataset(&dataset()).unwrap();
        assert!(desk.search("stripe").unwrap().is_empty());
        assert!(desk.search("").unwrap().is_empty());
    }

    #[test]
    fn test_dataset_failure_is_reported() {
        let mut desk = desk(vec![0.9, 0.1]);
        let err = desk.load_dataset(&Broken).unwrap_err();
        assert!(err.to_string().contains("not a spreadsheet"));
        assert_eq!(desk.dataset_len(), 0);
    }

    #[test]
    fn test_ad_hoc_pitch_uses_session_desk() {
        let desk = desk(vec![0.9, 0.1]);
        assert_eq!(desk.session().name(), "Mark");
        let outcome = desk.evaluate(GOOD_PITCH).unwrap();
        assert_eq!(outcome.classification().map(|r| r.label), Some(Label::Realistic));
    }

    #[test]
    fn test_lazy_model_is_not_loaded_for_rejected_pitches() {
        let dir = tempfile::tempdir().unwrap();
        let classifier = lazy_model_classifier(dir.path().join("missing_model"));
        let evaluator = PitchEvaluator::new(&classifier);
        assert_eq!(evaluator.evaluate("ok").unwrap(), PitchOutcome::GibberishRejected);
        assert!(!classifier.is_loaded());
        // a pitch that clears both gates tries to load the missing model
        assert!(evaluator.evaluate(GOOD_PITCH).is_err());
    }
}
