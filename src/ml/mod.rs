// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer builds tensors — only this one.
//
// What's in this layer:
//
//   model.rs      — The pretrained classifier architecture
//                   • DistilBERT embeddings (word + position, LayerNorm)
//                   • Stacked post-norm self-attention blocks
//                   • [CLS]-pooled classification head
//                   • Softmax over the two pitch classes
//
//   inferencer.rs — The inference engine
//                   Loads weights + tokenizer from a model
//                   directory, tokenises a pitch, runs the
//                   forward pass, returns class probabilities
//
// The model is consumed as-is. There is no training code.
//
// Reference: Burn Book §3 (Building Blocks)
//            Sanh et al. (2019) DistilBERT

/// Transformer encoder sequence-classification model
pub mod model;

/// Inference engine — loads a model directory and scores pitches
pub mod inferencer;
