// ============================================================
// Layer 3 — Quality Gate
// ============================================================
// A pure heuristic that decides whether a piece of text is
// plausible enough to be treated as a startup pitch.
//
// Six independent signals are checked. A text is gibberish
// when ANY of them fires:
//
//   1. fewer than 5 words
//   2. more than half of the words look "weird"
//      (≤ 2 chars, or not purely ASCII letters)
//   3. fewer than 5 distinct characters (case-insensitive)
//   4. more than half of all characters are uppercase
//   5. no sentence-ending punctuation (. ! ?)
//   6. fewer than 20% of characters are vowels
//
// Character counts are over Unicode scalar values of the raw,
// untrimmed text. Whitespace counts as a character.
//
// Reference: Rust Book §8 (Strings), §13 (Iterators)

use std::collections::HashSet;

const MIN_WORDS: usize = 5;
const MAX_WEIRD_WORD_RATIO: f64 = 0.5;
const MIN_DISTINCT_CHARS: usize = 5;
const MAX_UPPERCASE_RATIO: f64 = 0.5;
const MIN_VOWEL_RATIO: f64 = 0.2;
const SENTENCE_ENDINGS: [char; 3] = ['.', '!', '?'];
const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// One reason a text failed the quality gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualitySignal {
    TooFewWords,
    MostlyWeirdWords,
    LowCharacterVariety,
    MostlyUppercase,
    NoSentencePunctuation,
    LowVowelRatio,
}

impl QualitySignal {
    /// All signals in evaluation order.
    pub const ALL: [QualitySignal; 6] = [
        QualitySignal::TooFewWords,
        QualitySignal::MostlyWeirdWords,
        QualitySignal::LowCharacterVariety,
        QualitySignal::MostlyUppercase,
        QualitySignal::NoSentencePunctuation,
        QualitySignal::LowVowelRatio,
    ];

    /// Human-readable explanation, used by the `check` command.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::TooFewWords           => "fewer than 5 words",
            Self::MostlyWeirdWords      => "more than half of the words are very short or not plain letters",
            Self::LowCharacterVariety   => "fewer than 5 distinct characters",
            Self::MostlyUppercase       => "more than half of the characters are uppercase",
            Self::NoSentencePunctuation => "no sentence-ending punctuation (. ! ?)",
            Self::LowVowelRatio         => "vowels make up less than 20% of the text",
        }
    }

    fn fires(&self, text: &TextStats<'_>) -> bool {
        match self {
            Self::TooFewWords           => text.words.len() < MIN_WORDS,
            Self::MostlyWeirdWords      => text.weird_word_ratio() > MAX_WEIRD_WORD_RATIO,
            Self::LowCharacterVariety   => text.distinct_chars() < MIN_DISTINCT_CHARS,
            Self::MostlyUppercase       => text.uppercase_chars() as f64 > text.char_count as f64 * MAX_UPPERCASE_RATIO,
            Self::NoSentencePunctuation => !text.raw.contains(SENTENCE_ENDINGS),
            Self::LowVowelRatio         => text.vowel_ratio() < MIN_VOWEL_RATIO,
        }
    }
}

/// Returns true when the text does not look like a real pitch.
///
/// Signals are evaluated in order and the first one that fires
/// short-circuits the check.
pub fn is_gibberish(text: &str) -> bool {
    let stats = TextStats::new(text);
    QualitySignal::ALL.iter().any(|signal| signal.fires(&stats))
}

/// Every signal that fires for a text, not just the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualityReport {
    pub signals: Vec<QualitySignal>,
}

impl QualityReport {
    pub fn evaluate(text: &str) -> Self {
        let stats = TextStats::new(text);
        let signals = QualitySignal::ALL
            .into_iter()
            .filter(|signal| signal.fires(&stats))
            .collect();
        Self { signals }
    }

    pub fn is_clean(&self) -> bool {
        self.signals.is_empty()
    }
}

// ─── TextStats ────────────────────────────────────────────────────────────────
// Borrowed view over the text with the word split computed once.
struct TextStats<'a> {
    raw:        &'a str,
    words:      Vec<&'a str>,
    char_count: usize,
}

impl<'a> TextStats<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            raw,
            words:      raw.split_whitespace().collect(),
            char_count: raw.chars().count(),
        }
    }

    fn weird_word_ratio(&self) -> f64 {
        if self.words.is_empty() {
            return 0.0;
        }
        let weird = self.words.iter().filter(|w| is_weird_word(w)).count();
        weird as f64 / self.words.len() as f64
    }

    fn distinct_chars(&self) -> usize {
        self.raw
            .chars()
            .flat_map(char::to_lowercase)
            .collect::<HashSet<_>>()
            .len()
    }

    fn uppercase_chars(&self) -> usize {
        self.raw.chars().filter(|c| c.is_uppercase()).count()
    }

    fn vowel_ratio(&self) -> f64 {
        let vowels = self.raw
            .chars()
            .flat_map(char::to_lowercase)
            .filter(|c| VOWELS.contains(c))
            .count();
        vowels as f64 / self.char_count.max(1) as f64
    }
}

/// A word is weird when it is at most two characters long or is
/// anything other than a run of ASCII letters.
fn is_weird_word(word: &str) -> bool {
    word.chars().count() <= 2 || !word.chars().all(|c| c.is_ascii_alphabetic())
}
