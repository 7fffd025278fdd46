//! Keyword extraction by frequency.
//!
//! Ranks the distinct non-stopword words of a text by how often they occur.
//! Ties keep first-occurrence order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use super::tokenizer::{Tokenize, UnicodeTokenizer};

/// Default number of keywords returned when the caller does not ask for a count.
pub const DEFAULT_MAX_KEYWORDS: usize = 10;

/// A ranked keyword with its raw frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordResult {
    pub keyword: String,
    pub frequency: usize,
}

/// Frequency-based keyword extractor.
pub struct KeywordExtractor {
    tokenizer: Arc<dyn Tokenize>,
    /// Words must be strictly longer than this (in chars)
    min_word_length: usize,
    max_keywords: usize,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    /// Create a new keyword extractor with default settings
    pub fn new() -> Self {
        Self::with_config(Arc::new(UnicodeTokenizer::new()), 3, DEFAULT_MAX_KEYWORDS)
    }

    /// Create a keyword extractor with a custom tokenizer and limits
    pub fn with_config(
        tokenizer: Arc<dyn Tokenize>,
        min_word_length: usize,
        max_keywords: usize,
    ) -> Self {
        Self {
            tokenizer,
            min_word_length,
            max_keywords,
        }
    }

    fn qualifies(&self, word: &str) -> bool {
        word.chars().count() > self.min_word_length && !self.tokenizer.is_stopword(word)
    }

    /// Extract the top N keywords with their frequencies
    pub fn extract(&self, text: &str, top_k: Option<usize>) -> Vec<KeywordResult> {
        let max_results = top_k.unwrap_or(self.max_keywords);
        let lowered = text.to_lowercase();

        // Insertion order doubles as the first-seen tie-break.
        let mut counts: Vec<KeywordResult> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for word in self.tokenizer.words(&lowered) {
            if !self.qualifies(&word) {
                continue;
            }
            match index.get(&word) {
                Some(&i) => counts[i].frequency += 1,
                None => {
                    index.insert(word.clone(), counts.len());
                    counts.push(KeywordResult {
                        keyword: word,
                        frequency: 1,
                    });
                }
            }
        }

        // sort_by is stable
        counts.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        counts.truncate(max_results);
        counts
    }

    /// Extract keywords and return just the strings
    pub fn extract_keywords(&self, text: &str, top_k: Option<usize>) -> Vec<String> {
        self.extract(text, top_k)
            .into_iter()
            .map(|k| k.keyword)
            .collect()
    }
}
