//! Text complexity scoring.
//!
//! Classifies readability from average sentence length (words per sentence)
//! and average word length (chars per word).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::tokenizer::{Tokenize, UnicodeTokenizer};

/// Coarse readability tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl ComplexityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ComplexityLevel::Low => "low",
            ComplexityLevel::Medium => "medium",
            ComplexityLevel::High => "high",
        }
    }

    /// First matching threshold wins, most demanding first.
    pub fn classify(avg_sentence_length: f64, avg_word_length: f64) -> Self {
        if avg_sentence_length > 20.0 && avg_word_length > 6.0 {
            ComplexityLevel::High
        } else if avg_sentence_length > 15.0 && avg_word_length > 5.0 {
            ComplexityLevel::Medium
        } else {
            ComplexityLevel::Low
        }
    }
}

/// Readability metrics for a text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexityProfile {
    pub complexity_level: ComplexityLevel,
    /// Words per sentence, rounded to 2 decimals
    pub avg_sentence_length: f64,
    /// Characters per word, rounded to 2 decimals
    pub avg_word_length: f64,
    pub total_sentences: usize,
    pub total_words: usize,
}

impl Default for ComplexityProfile {
    fn default() -> Self {
        Self {
            complexity_level: ComplexityLevel::Low,
            avg_sentence_length: 0.0,
            avg_word_length: 0.0,
            total_sentences: 0,
            total_words: 0,
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Complexity analyzer over an injected tokenizer
pub struct ComplexityAnalyzer {
    tokenizer: Arc<dyn Tokenize>,
}

impl Default for ComplexityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplexityAnalyzer {
    pub fn new() -> Self {
        Self::with_tokenizer(Arc::new(UnicodeTokenizer::new()))
    }

    pub fn with_tokenizer(tokenizer: Arc<dyn Tokenize>) -> Self {
        Self { tokenizer }
    }

    /// Analyze text and return its complexity profile
    pub fn analyze(&self, text: &str) -> ComplexityProfile {
        let tokenized = self.tokenizer.tokenize(text);
        let total_sentences = tokenized.sentences.len();
        let total_words = tokenized.words.len();

        let avg_sentence_length = if total_sentences > 0 {
            total_words as f64 / total_sentences as f64
        } else {
            0.0
        };

        let avg_word_length = if total_words > 0 {
            let total_chars: usize = tokenized.words.iter().map(|w| w.chars().count()).sum();
            total_chars as f64 / total_words as f64
        } else {
            0.0
        };

        ComplexityProfile {
            complexity_level: ComplexityLevel::classify(avg_sentence_length, avg_word_length),
            avg_sentence_length: round2(avg_sentence_length),
            avg_word_length: round2(avg_word_length),
            total_sentences,
            total_words,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_text_is_low() {
        let analyzer = ComplexityAnalyzer::new();

        let profile = analyzer.analyze("Cats sit. Dogs run.");
        assert_eq!(profile.complexity_level, ComplexityLevel::Low);
        assert_eq!(profile.total_sentences, 2);
        assert_eq!(profile.total_words, 4);
        assert_eq!(profile.avg_sentence_length, 2.0);
        assert_eq!(profile.avg_word_length, 3.5);
    }

    #[test]
    fn test_long_technical_sentence_is_high() {
        let analyzer = ComplexityAnalyzer::new();

        let text = "Comprehensive understanding of distributed consensus algorithms requires \
                    substantial familiarity with asynchronous communication, probabilistic \
                    reasoning, cryptographic primitives, formal verification techniques, \
                    fault tolerance strategies, replication protocols, linearizability \
                    guarantees, and performance characteristics across heterogeneous \
                    infrastructure deployments.";
        let profile = analyzer.analyze(text);

        assert_eq!(profile.total_sentences, 1);
        assert!(profile.avg_sentence_length > 20.0);
        assert!(profile.avg_word_length > 6.0);
        assert_eq!(profile.complexity_level, ComplexityLevel::High);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        let analyzer = ComplexityAnalyzer::new();

        // 13 chars over 3 words = 4.333...
        let profile = analyzer.analyze("Trees node root.");
        assert_eq!(profile.avg_word_length, 4.33);
    }

    #[test]
    fn test_empty_text() {
        let analyzer = ComplexityAnalyzer::new();

        let profile = analyzer.analyze("");
        assert_eq!(profile, ComplexityProfile::default());
    }

    #[test]
    fn test_classification_thresholds() {
        assert_eq!(ComplexityLevel::classify(21.0, 6.1), ComplexityLevel::High);
        assert_eq!(ComplexityLevel::classify(20.0, 6.1), ComplexityLevel::Medium);
        assert_eq!(ComplexityLevel::classify(16.0, 5.5), ComplexityLevel::Medium);
        assert_eq!(ComplexityLevel::classify(15.0, 5.5), ComplexityLevel::Low);
        assert_eq!(ComplexityLevel::classify(30.0, 5.0), ComplexityLevel::Low);
    }
}
