// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads the HuggingFace tokenizer that ships with the model.
// It must be the same vocabulary the classifier was trained
// with, so it always lives in the model directory.
//
//   tokenizer.json  → loaded as-is (fast tokenizer export)
//   vocab.txt       → rebuilt as the BERT WordPiece pipeline
//                     (BertNormalizer + BertPreTokenizer), which is
//                     what a slow DistilBertTokenizer saves
//
// tokenizer_config.json may turn lower-casing off.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokenizers::{
    models::wordpiece::WordPiece,
    normalizers::BertNormalizer,
    pre_tokenizers::bert::BertPreTokenizer,
    Tokenizer,
};

const TOKENIZER_FILE: &str = "tokenizer.json";
const VOCAB_FILE: &str = "vocab.txt";
const TOKENIZER_CONFIG_FILE: &str = "tokenizer_config.json";

fn default_lower_case() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct TokenizerConfig {
    #[serde(default = "default_lower_case")]
    do_lower_case: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self { do_lower_case: default_lower_case() }
    }
}

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    /// Load tokenizer.json, or build a WordPiece tokenizer from vocab.txt.
    pub fn load(&self) -> Result<Tokenizer> {
        let json  = self.dir.join(TOKENIZER_FILE);
        let vocab = self.dir.join(VOCAB_FILE);

        if json.is_file() {
            return Tokenizer::from_file(&json)
                .map_err(|e| anyhow!("Cannot load tokenizer from '{}': {}", json.display(), e));
        }
        if vocab.is_file() {
            return self.load_word_piece(&vocab);
        }
        Err(anyhow!(
            "Cannot load tokenizer from '{}': neither {} nor {} found",
            self.dir.display(), TOKENIZER_FILE, VOCAB_FILE
        ))
    }

    fn load_word_piece(&self, vocab: &Path) -> Result<Tokenizer> {
        let vocab_path = vocab.to_str()
            .with_context(|| format!("Non UTF-8 vocabulary path '{}'", vocab.display()))?;
        let model = WordPiece::from_file(vocab_path)
            .build()
            .map_err(|e| anyhow!("Cannot load tokenizer from '{}': {}", vocab.display(), e))?;

        let config = self.tokenizer_config()?;
        let mut tokenizer = Tokenizer::new(model);
        tokenizer
            .with_normalizer(BertNormalizer::new(true, true, None, config.do_lower_case))
            .with_pre_tokenizer(BertPreTokenizer);
        Ok(tokenizer)
    }

    fn tokenizer_config(&self) -> Result<TokenizerConfig> {
        let path = self.dir.join(TOKENIZER_CONFIG_FILE);
        if !path.is_file() {
            return Ok(TokenizerConfig::default());
        }
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid tokenizer config '{}'", path.display()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Write a word-level tokenizer in HuggingFace JSON format.
    /// Special tokens use BERT ids; words start at 104.
    /// Returns the vocabulary size needed to embed every id.
    pub(crate) fn write_word_level_tokenizer(dir: &Path, words: &[&str]) -> usize {
        std::fs::create_dir_all(dir).unwrap();

        let mut vocab = serde_json::json!({
            "[PAD]":  0,
            "[UNK]":  1,
            "[CLS]":  101,
            "[SEP]":  102,
            "[MASK]": 103,
        });
        let mut next_id = 104usize;
        for word in words {
            if vocab.get(*word).is_none() {
                vocab[*word] = serde_json::json!(next_id);
                next_id += 1;
            }
        }

        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [
                {"id": 0,   "content": "[PAD]",  "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 1,   "content": "[UNK]",  "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 101, "content": "[CLS]",  "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 102, "content": "[SEP]",  "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 103, "content": "[MASK]", "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
            ],
            "normalizer": {
                "type": "BertNormalizer",
                "clean_text": true,
                "handle_chinese_chars": true,
                "strip_accents": null,
                "lowercase": true
            },
            "pre_tokenizer": { "type": "Whitespace" },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": "[UNK]"
            }
        });

        std::fs::write(
            dir.join(TOKENIZER_FILE),
            serde_json::to_string_pretty(&tokenizer_json).unwrap(),
        ).unwrap();
        next_id
    }

    #[test]
    fn test_load_written_tokenizer() {
        let dir = tempfile::tempdir().unwrap();
        write_word_level_tokenizer(dir.path(), &["pitch", "deck"]);
        let tokenizer = TokenizerStore::new(dir.path()).load().unwrap();
        assert_eq!(tokenizer.token_to_id("[CLS]"), Some(101));
        assert_eq!(tokenizer.token_to_id("pitch"), Some(104));

        let enc = tokenizer.encode("Pitch DECK unknown", false).unwrap();
        assert_eq!(enc.get_ids(), &[104, 105, 1]);
    }

    #[test]
    fn test_word_piece_from_vocab_txt() {
        let dir = tempfile::tempdir().unwrap();
        let vocab = ["[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]", "we", "farm", "##ers", "sell", "."];
        std::fs::write(dir.path().join(VOCAB_FILE), vocab.join("\n")).unwrap();

        let tokenizer = TokenizerStore::new(dir.path()).load().unwrap();
        assert_eq!(tokenizer.token_to_id("[CLS]"), Some(2));

        let enc = tokenizer.encode("We sell to FARMERS.", false).unwrap();
        assert_eq!(enc.get_ids(), &[5, 8, 1, 6, 7, 9]);
    }

    #[test]
    fn test_vocab_txt_respects_do_lower_case() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(VOCAB_FILE), "[UNK]\nwe\nWe").unwrap();
        std::fs::write(dir.path().join(TOKENIZER_CONFIG_FILE), r#"{"do_lower_case": false}"#).unwrap();

        let tokenizer = TokenizerStore::new(dir.path()).load().unwrap();
        let enc = tokenizer.encode("We", false).unwrap();
        assert_eq!(enc.get_ids(), &[2]);
    }

    #[test]
    fn test_missing_tokenizer() {
        let dir = tempfile::tempdir().unwrap();
        let err = TokenizerStore::new(dir.path()).load().unwrap_err();
        assert!(err.to_string().contains("Cannot load tokenizer"));
    }
}
