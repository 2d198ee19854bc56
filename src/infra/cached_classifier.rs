// ============================================================
// Layer 6 — Lazily Loaded Classifier
// ============================================================
// Model loading is the only slow, blocking step in the app.
// LazyClassifier defers it until the first pitch actually needs
// a prediction, then keeps the loaded model for the rest of the
// process. Pitches rejected by the quality gate never trigger a
// load.
//
// It is constructed explicitly and handed to the evaluator, so
// tests can inject any loader they like.
//
// A failed load is not cached: the next call tries again.

use anyhow::Result;
use once_cell::unsync::OnceCell;

use crate::domain::traits::PitchClassifier;

pub struct LazyClassifier<C, F> {
    cell:   OnceCell<C>,
    loader: F,
}

impl<C, F> LazyClassifier<C, F>
where
    C: PitchClassifier,
    F: Fn() -> Result<C>,
{
    pub fn new(loader: F) -> Self {
        Self { cell: OnceCell::new(), loader }
    }

    /// The loaded classifier, loading it on first access.
    pub fn get(&self) -> Result<&C> {
        self.cell.get_or_try_init(|| {
            tracing::info!("Loading pitch classifier");
            (self.loader)()
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<C, F> PitchClassifier for LazyClassifier<C, F>
where
    C: PitchClassifier,
    F: Fn() -> Result<C>,
{
    fn classify(&self, text: &str) -> Result<Vec<f32>> {
        self.get()?.classify(text)
    }
}
