// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Cleans strings read out of spreadsheet cells.
//
// Spreadsheets exported from Excel or Google Sheets often carry:
//   - Non-breaking spaces (U+00A0)
//   - Zero-width spaces (U+200B) from copy-pasting
//   - Byte order marks (U+FEFF) at the start of CSV exports
//   - Carriage returns (\r) from Windows line endings
//   - Stray control characters
//
// Three entry points, from lightest to heaviest:
//   normalize_chars → map invisible/odd characters only
//                     (used for pitch text, so the quality gate
//                      sees the author's spacing and casing)
//   clean           → normalize_chars + collapse spaces + trim
//                     (used for company names)
//   normalize_header→ clean + lowercase + spaces to underscores
//                     ("Company Pitch" → "company_pitch")
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

pub struct Preprocessor;

impl Preprocessor {
    /// Create a new Preprocessor instance
    pub fn new() -> Self {
        Self
    }

    /// Map problematic Unicode characters to plain equivalents,
    /// leaving everything else (including runs of spaces) untouched.
    pub fn normalize_chars(&self, text: &str) -> String {
        text.chars()
            .filter_map(|c| match c {
                // Tab → space
                '\t' => Some(' '),
                // Non-breaking space → regular space
                '\u{00A0}' => Some(' '),
                // Zero-width space and byte order mark → dropped
                '\u{200B}' | '\u{FEFF}' => None,
                // Windows carriage return → Unix newline
                '\r' => Some('\n'),
                // Any other control character (except newline) → space
                c if c.is_control() && c != '\n' => Some(' '),
                c => Some(c),
            })
            .collect()
    }

    /// Normalise characters, collapse every whitespace run into a
    /// single space and trim both ends.
    pub fn clean(&self, text: &str) -> String {
        self.normalize_chars(text)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Turn a column header into its lookup key.
    pub fn normalize_header(&self, header: &str) -> String {
        self.clean(header).to_lowercase().replace(' ', "_")
    }
}

/// Implement Default so Preprocessor can be created with Preprocessor::default()
impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
