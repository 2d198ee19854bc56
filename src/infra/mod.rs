// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything needed to get a pretrained model off disk and keep
// it around:
//
//   model_store.rs       — Reads a HuggingFace DistilBERT
//                          config.json and its safetensors or
//                          PyTorch weights
//
//   tokenizer_store.rs   — Loads tokenizer.json, or rebuilds the
//                          WordPiece tokenizer from vocab.txt
//
//   cached_classifier.rs — Loads a classifier on first use and
//                          holds it for the process lifetime
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)
//            burn-store crate documentation

/// Model architecture config and weights loading
pub mod model_store;

/// Tokenizer loading
pub mod tokenizer_store;

/// Load-once classifier wrapper
pub mod cached_classifier;
