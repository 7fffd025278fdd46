//! Sentence and word segmentation.
//!
//! The analyzers only depend on the [`Tokenize`] capability, so any segmenter can be
//! plugged in. [`UnicodeTokenizer`] is the default and follows UAX #29.

use std::collections::HashSet;
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

/// English stopwords (NLTK list).
const STOPWORDS_EN: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS_EN.iter().copied().collect());

/// Output of a combined tokenization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenized {
    pub sentences: Vec<String>,
    pub words: Vec<String>,
}

/// Capability the analyzers need from a tokenizer.
pub trait Tokenize: Send + Sync {
    /// Split text into trimmed, non-empty sentences.
    fn sentences(&self, text: &str) -> Vec<String>;

    /// Split text into words, without punctuation tokens.
    fn words(&self, text: &str) -> Vec<String>;

    /// Whether a (lower-cased) word is a stopword.
    fn is_stopword(&self, word: &str) -> bool;

    fn tokenize(&self, text: &str) -> Tokenized {
        Tokenized {
            sentences: self.sentences(text),
            words: self.words(text),
        }
    }
}

/// UAX #29 tokenizer backed by `unicode-segmentation`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTokenizer;

impl UnicodeTokenizer {
    pub fn new() -> Self {
        Self
    }
}

/// Join hard-wrapped lines with spaces. Blank lines stay as paragraph breaks.
///
/// UAX #29 ends a sentence at every line feed, which would split wrapped prose.
fn unwrap_lines(text: &str) -> String {
    let mut joined = String::with_capacity(text.len());
    let mut paragraph_break = false;
    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            paragraph_break = !joined.is_empty();
            continue;
        }
        if !joined.is_empty() {
            joined.push(if paragraph_break { '\n' } else { ' ' });
        }
        joined.push_str(line);
        paragraph_break = false;
    }
    joined
}

impl Tokenize for UnicodeTokenizer {
    fn sentences(&self, text: &str) -> Vec<String> {
        unwrap_lines(text)
            .unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn words(&self, text: &str) -> Vec<String> {
        text.unicode_words().map(str::to_string).collect()
    }

    fn is_stopword(&self, word: &str) -> bool {
        STOPWORDS.contains(word.to_lowercase().as_str())
    }
}
