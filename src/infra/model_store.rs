// ============================================================
// Layer 6 — Model Store
// ============================================================
// Reads a fine-tuned DistilBERT sequence classifier from the
// directory HuggingFace `save_pretrained` writes:
//
//   distilbert_model/
//     config.json                          ← DistilBertConfig
//     model.safetensors | pytorch_model.bin ← weights
//     tokenizer.json | vocab.txt           ← see tokenizer_store.rs
//
// The config is read first so the exact architecture can be
// rebuilt, then the checkpoint tensors are renamed onto the burn
// module tree and applied. PyTorch's [out, in] Linear weights and
// LayerNorm weight/bias names are adapted on the way in. Missing
// tensors or shape mismatches fail the load.
//
// Reference: Burn Book §5 (Records and Checkpointing)
//            burn-store crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{bail, ensure, Context, Result};
use burn::prelude::*;
use burn_store::{ModuleSnapshot, PyTorchToBurnAdapter, PytorchStore, SafetensorsStore};
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::ml::model::{PitchClassifierConfig, PitchClassifierModel};

const CONFIG_FILE: &str = "config.json";
const SAFETENSORS_FILE: &str = "model.safetensors";
const PYTORCH_FILE: &str = "pytorch_model.bin";

/// Checkpoint key → burn module path, applied in order.
const CHECKPOINT_KEY_REMAP: &[(&str, &str)] = &[
    (r"^distilbert\.", ""),
    (r"^transformer\.layer\.", "layers."),
    (r"^embeddings\.LayerNorm\.", "embeddings.layer_norm."),
    (r"\.attention\.q_lin\.", ".attention.query."),
    (r"\.attention\.k_lin\.", ".attention.key."),
    (r"\.attention\.v_lin\.", ".attention.value."),
    (r"\.attention\.out_lin\.", ".attention.output."),
];

fn default_activation() -> String {
    "gelu".to_string()
}

/// The subset of a HuggingFace DistilBertConfig the model needs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub model_type:              Option<String>,
    pub vocab_size:              usize,
    pub max_position_embeddings: usize,
    pub dim:                     usize,
    pub n_heads:                 usize,
    pub n_layers:                usize,
    pub hidden_dim:              usize,
    #[serde(default = "default_activation")]
    pub activation:              String,
    #[serde(default)]
    pub id2label:                BTreeMap<String, String>,
}

impl ModelConfig {
    /// Class count; configs saved without `id2label` are binary.
    pub fn num_labels(&self) -> usize {
        if self.id2label.is_empty() { 2 } else { self.id2label.len() }
    }

    /// The burn module config for inference (dropout disabled).
    pub fn architecture(&self) -> PitchClassifierConfig {
        PitchClassifierConfig::new(
            self.vocab_size, self.max_position_embeddings, self.dim,
            self.n_heads, self.n_layers, self.hidden_dim, self.num_labels(),
        )
    }

    fn validate(&self) -> Result<()> {
        if let Some(model_type) = &self.model_type {
            ensure!(model_type == "distilbert", "expected a distilbert model, got '{model_type}'");
        }
        ensure!(self.num_labels() == 2, "expected a binary classifier, got {} labels", self.num_labels());
        ensure!(self.activation == "gelu", "unsupported activation '{}'", self.activation);
        ensure!(self.max_position_embeddings >= 2, "max_position_embeddings must leave room for [CLS] and [SEP]");
        ensure!(
            self.n_heads > 0 && self.dim % self.n_heads == 0,
            "dim ({}) must be divisible by n_heads ({})",
            self.dim, self.n_heads
        );
        Ok(())
    }
}

/// Read access to a model directory.
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load and validate config.json.
    pub fn load_config(&self) -> Result<ModelConfig> {
        let path = self.dir.join(CONFIG_FILE);

        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read model config from '{}'", path.display()))?;

        let cfg: ModelConfig = serde_json::from_str(&json)
            .with_context(|| format!("Invalid model config '{}'", path.display()))?;
        cfg.validate()
            .with_context(|| format!("Unusable model config '{}'", path.display()))?;
        Ok(cfg)
    }

    /// Load checkpoint weights into a freshly initialised model of the
    /// same architecture. Safetensors wins when both files exist.
    pub fn load_model<B: Backend>(
        &self,
        mut model: PitchClassifierModel<B>,
    ) -> Result<PitchClassifierModel<B>> {
        let safetensors = self.dir.join(SAFETENSORS_FILE);
        let pytorch     = self.dir.join(PYTORCH_FILE);

        let (path, result) = if safetensors.is_file() {
            let mut store = CHECKPOINT_KEY_REMAP.iter().fold(
                SafetensorsStore::from_file(&safetensors).with_from_adapter(PyTorchToBurnAdapter),
                |store, (from, to)| store.with_key_remapping(*from, *to),
            );
            let result = model.load_from(&mut store).map_err(|e| anyhow::anyhow!("{e}"));
            (safetensors, result)
        } else if pytorch.is_file() {
            let mut store = CHECKPOINT_KEY_REMAP.iter().fold(
                PytorchStore::from_file(&pytorch),
                |store, (from, to)| store.with_key_remapping(*from, *to),
            );
            let result = model.load_from(&mut store).map_err(|e| anyhow::anyhow!("{e}"));
            (pytorch, result)
        } else {
            bail!(
                "No model weights in '{}' (expected {} or {})",
                self.dir.display(), SAFETENSORS_FILE, PYTORCH_FILE
            );
        };

        let applied = result
            .with_context(|| format!("Cannot load model weights '{}'", path.display()))?;
        tracing::debug!(
            "Applied {} tensors from '{}' ({} unused)",
            applied.applied.len(), path.display(), applied.unused.len()
        );
        Ok(model)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::infra::tokenizer_store::tests::write_word_level_tokenizer;
    use crate::ml::model::tests::TestBackend;
    use burn_store::{BurnToPyTorchAdapter, ModuleStore};

    const VOCAB: &[&str] = &[
        "we", "are", "building", "an", "affordable", "platform", "that", "helps",
        "small", "farmers", "sell", "their", "produce", "directly", ".",
    ];

    /// Burn module path → HuggingFace checkpoint key.
    const EXPORT_KEY_REMAP: &[(&str, &str)] = &[
        (r"\.attention\.query\.", ".attention.q_lin."),
        (r"\.attention\.key\.", ".attention.k_lin."),
        (r"\.attention\.value\.", ".attention.v_lin."),
        (r"\.attention\.output\.", ".attention.out_lin."),
        (r"^embeddings\.layer_norm\.", "embeddings.LayerNorm."),
        (r"^layers\.", "transformer.layer."),
        (r"^(embeddings|transformer)\.", "distilbert.$1."),
    ];

    pub(crate) fn fixture_config(vocab_size: usize, max_position_embeddings: usize) -> serde_json::Value {
        serde_json::json!({
            "model_type": "distilbert",
            "architectures": ["DistilBertForSequenceClassification"],
            "vocab_size": vocab_size,
            "max_position_embeddings": max_position_embeddings,
            "dim": 8,
            "n_heads": 2,
            "n_layers": 1,
            "hidden_dim": 16,
            "activation": "gelu",
            "dropout": 0.1,
            "seq_classif_dropout": 0.2,
            "id2label": { "0": "LABEL_0", "1": "LABEL_1" },
        })
    }

    /// Write config.json and a randomly initialised model.safetensors in
    /// the HuggingFace layout.
    pub(crate) fn write_model_files(dir: &Path, config: &serde_json::Value) -> ModelConfig {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(CONFIG_FILE), serde_json::to_string_pretty(config).unwrap()).unwrap();

        let cfg = ModelStore::new(dir).load_config().unwrap();
        let model: PitchClassifierModel<TestBackend> = cfg.architecture().init(&Default::default());
        export_checkpoint(&model, dir);
        cfg
    }

    /// Save a model as model.safetensors with HuggingFace tensor names.
    fn export_checkpoint(model: &PitchClassifierModel<TestBackend>, dir: &Path) {
        let mut store = EXPORT_KEY_REMAP.iter().fold(
            SafetensorsStore::from_file(dir.join(SAFETENSORS_FILE))
                .with_to_adapter(BurnToPyTorchAdapter)
                .overwrite(true),
            |store, (from, to)| store.with_key_remapping(*from, *to),
        );
        model.save_into(&mut store).unwrap();
    }

    /// Write a complete model directory whose tokenizer fits the model.
    pub(crate) fn write_fixture_model(dir: &Path, max_position_embeddings: usize) -> ModelConfig {
        let vocab_size = write_word_level_tokenizer(dir, VOCAB);
        write_model_files(dir, &fixture_config(vocab_size, max_position_embeddings))
    }

    #[test]
    fn test_reads_huggingface_config() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = write_fixture_model(dir.path(), 32);
        assert_eq!(cfg.dim, 8);
        assert_eq!(cfg.max_position_embeddings, 32);
        assert_eq!(cfg.num_labels(), 2);
    }

    #[test]
    fn test_num_labels_defaults_to_two() {
        let json = r#"{"vocab_size":10,"max_position_embeddings":8,"dim":4,"n_heads":2,"n_layers":1,"hidden_dim":8}"#;
        let cfg: ModelConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.num_labels(), 2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_binary_model() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = fixture_config(10, 8);
        config["id2label"] = serde_json::json!({ "0": "a", "1": "b", "2": "c" });
        fs::write(dir.path().join(CONFIG_FILE), config.to_string()).unwrap();
        assert!(ModelStore::new(dir.path()).load_config().is_err());
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("missing"));
        let err = store.load_config().unwrap_err();
        assert!(err.to_string().contains("Cannot read model config"));
    }

    #[test]
    fn test_checkpoint_uses_huggingface_names() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_model(dir.path(), 16);
        let mut store = SafetensorsStore::from_file(dir.path().join(SAFETENSORS_FILE));
        let keys = store.keys().unwrap();
        for key in [
            "distilbert.embeddings.word_embeddings.weight",
            "distilbert.embeddings.LayerNorm.weight",
            "distilbert.transformer.layer.0.attention.q_lin.weight",
            "distilbert.transformer.layer.0.ffn.lin1.bias",
            "distilbert.transformer.layer.0.output_layer_norm.bias",
            "pre_classifier.weight",
            "classifier.bias",
        ] {
            assert!(keys.iter().any(|k| k == key), "missing {key} in {keys:?}");
        }
    }

    #[test]
    fn test_weights_survive_checkpoint_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = write_fixture_model(dir.path(), 16);
        let device = Default::default();

        let original: PitchClassifierModel<TestBackend> = cfg.architecture().init(&device);
        export_checkpoint(&original, dir.path());
        let loaded: PitchClassifierModel<TestBackend> = ModelStore::new(dir.path())
            .load_model(cfg.architecture().init(&device))
            .unwrap();

        let ids = Tensor::<TestBackend, 1, Int>::from_ints([101, 104, 105, 102], &device)
            .unsqueeze::<2>();
        let expected = original.probabilities(ids.clone()).into_data().to_vec::<f32>().unwrap();
        let actual   = loaded.probabilities(ids).into_data().to_vec::<f32>().unwrap();
        for (e, a) in expected.iter().zip(&actual) {
            assert!((e - a).abs() < 1e-5, "{expected:?} != {actual:?}");
        }
    }

    #[test]
    fn test_missing_weights() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), fixture_config(10, 8).to_string()).unwrap();
        let store = ModelStore::new(dir.path());
        let cfg = store.load_config().unwrap();
        let model: PitchClassifierModel<TestBackend> = cfg.architecture().init(&Default::default());
        let err = store.load_model(model).unwrap_err();
        assert!(err.to_string().contains("No model weights"));
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_model(dir.path(), 16);
        let store = ModelStore::new(dir.path());
        let mut cfg = store.load_config().unwrap();
        cfg.hidden_dim = 32;
        let model: PitchClassifierModel<TestBackend> = cfg.architecture().init(&Default::default());
        assert!(store.load_model(model).is_err());
    }
}
