// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers for each stage of
// the app.
//
// Rules for this layer:
//   - No tensor code here (that's Layer 5)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Name + role collection, ending in a Session
pub mod onboarding_use_case;

// The gibberish → length → model decision pipeline
pub mod evaluate_use_case;

// The classifier stage: dataset search and ad hoc pitches
pub mod desk_use_case;
