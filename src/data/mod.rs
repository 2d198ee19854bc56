// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a dataset file on disk and the pitch
// records the classifier stage searches through.
//
//   .xlsx / .csv file
//       │
//       ▼
//   DatasetLoader   → reads the first sheet into a raw table
//       │
//       ▼
//   Preprocessor    → normalises headers and cell text
//       │
//       ▼
//   Vec<PitchRecord>
//       │
//       ▼
//   find_by_company → case-insensitive company lookup
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Loads the pitch dataset from a spreadsheet or CSV file
pub mod loader;

/// Cleans cell text and normalises column headers
pub mod preprocessor;

/// Case-insensitive company-name search
pub mod search;
