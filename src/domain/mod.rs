// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust types and traits that define what the system is
// about: who is using it, what a pitch is, what the model can
// say about one, and the quality gate in front of the model.
//
// Rules for this layer:
//   - NO burn types
//   - NO file I/O
//   - Only plain structs, enums, traits, and pure functions
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Pitch text, dataset rows, labels, and pipeline outcomes
pub mod pitch;

// The gibberish heuristic
pub mod quality;

// The onboarded user
pub mod session;

// Core abstractions (traits) that other layers implement
pub mod traits;
