// ============================================================
// Layer 5 — Inferencer
// ============================================================
use anyhow::{ensure, Context, Result};
use burn::prelude::*;
use tokenizers::Tokenizer;

use crate::domain::traits::PitchClassifier;
use crate::infra::{model_store::ModelStore, tokenizer_store::TokenizerStore};
use crate::ml::model::PitchClassifierModel;

pub type InferBackend = burn::backend::Wgpu;

// BERT vocabulary defaults, used when the tokenizer has no such tokens
const DEFAULT_CLS_ID: u32 = 101;
const DEFAULT_SEP_ID: u32 = 102;

pub struct Inferencer<B: Backend> {
    model:       PitchClassifierModel<B>,
    tokenizer:   Tokenizer,
    max_seq_len: usize,
    cls_id:      u32,
    sep_id:      u32,
    device:      B::Device,
}

impl<B: Backend> Inferencer<B> {
    /// Pair a model with its tokenizer. Fails when the tokenizer can
    /// produce an id outside the model's embedding table.
    pub fn new(
        model:     PitchClassifierModel<B>,
        tokenizer: Tokenizer,
        device:    B::Device,
    ) -> Result<Self> {
        let cls_id = tokenizer.token_to_id("[CLS]").unwrap_or(DEFAULT_CLS_ID);
        let sep_id = tokenizer.token_to_id("[SEP]").unwrap_or(DEFAULT_SEP_ID);

        let vocab_size = model.vocab_size();
        let max_token_id = tokenizer.get_vocab(true).into_values().max().unwrap_or(0);
        ensure!(
            (max_token_id as usize) < vocab_size,
            "tokenizer vocabulary (max id {max_token_id}) does not fit the model's {vocab_size} embeddings"
        );
        ensure!(
            (cls_id as usize) < vocab_size && (sep_id as usize) < vocab_size,
            "[CLS]/[SEP] ids ({cls_id}/{sep_id}) do not fit the model's {vocab_size} embeddings"
        );

        let max_seq_len = model.max_positions();
        Ok(Self { model, tokenizer, max_seq_len, cls_id, sep_id, device })
    }

    /// Load architecture, weights and tokenizer from a model directory.
    pub fn from_store(store: &ModelStore, device: B::Device) -> Result<Self> {
        let cfg   = store.load_config()?;
        let model = store.load_model(cfg.architecture().init::<B>(&device))?;
        let tokenizer = TokenizerStore::new(store.dir()).load()?;
        let inferencer = Self::new(model, tokenizer, device)
            .with_context(|| format!("Mismatched model directory '{}'", store.dir().display()))?;
        tracing::info!(
            "Model loaded from '{}' ({} layers, dim={})",
            store.dir().display(), cfg.n_layers, cfg.dim
        );
        Ok(inferencer)
    }

    /// [CLS] text [SEP], truncated to max_seq_len with the [SEP] kept.
    pub fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let enc = self.tokenizer.encode(text, false)
            .map_err(|e| anyhow::anyhow!("Tokenise: {e}"))?;

        let body_len = self.max_seq_len.saturating_sub(2);
        let mut input_ids: Vec<u32> = Vec::with_capacity(body_len + 2);
        input_ids.push(self.cls_id);
        input_ids.extend(enc.get_ids().iter().take(body_len));
        input_ids.push(self.sep_id);
        Ok(input_ids)
    }

    /// Softmax distribution over the model's classes for one text.
    pub fn predict_probabilities(&self, text: &str) -> Result<Vec<f32>> {
        let input_ids = self.encode(text)?;
        let input_flat: Vec<i32> = input_ids.iter().map(|&x| x as i32).collect();
        let input_tensor = Tensor::<B, 1, Int>::from_ints(
            input_flat.as_slice(), &self.device,
        ).unsqueeze::<2>();

        let probs = self.model
            .probabilities(input_tensor)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Cannot read class probabilities: {e:?}"))?;

        tracing::debug!("{} tokens → probabilities {:?}", input_ids.len(), probs);
        Ok(probs)
    }
}

impl<B: Backend> PitchClassifier for Inferencer<B> {
    fn classify(&self, text: &str) -> Result<Vec<f32>> {
        self.predict_probabilities(text)
    }
}
