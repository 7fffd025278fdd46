//! Topic extraction from syllabus text.
//!
//! Two strategies:
//! - structural: `Unit 1:` / `Module 2.` / `Chapter 3` / `Section 4` headings open units and
//!   the lines under them become subtopics
//! - pattern: used when the text has no heading at all; every sentence becomes a flat topic
//!   classified by regex patterns

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, LazyLock};

use super::keywords::KeywordExtractor;
use super::tokenizer::{Tokenize, UnicodeTokenizer};

/// Title of the implicit unit collecting lines seen before the first heading
pub const OVERVIEW_TITLE: &str = "Course Overview";
const OVERVIEW_CONTENT: &str = "General course information";

/// Lines must be longer than this to become a subtopic of a heading unit
const MIN_SUBTOPIC_CHARS: usize = 5;
/// Sentences must be longer than this to become a pattern-mode topic
const MIN_SENTENCE_CHARS: usize = 10;
const MAX_PATTERN_TOPICS: usize = 10;
const PATTERN_TOPIC_KEYWORDS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 50;

/// Kind of an extracted topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicKind {
    Unit,
    Topic,
    Overview,
    General,
    Introduction,
    Theory,
    Practical,
    Advanced,
    Assessment,
}

impl fmt::Display for TopicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl TopicKind {
    pub fn label(&self) -> &'static str {
        match self {
            TopicKind::Unit => "unit",
            TopicKind::Topic => "topic",
            TopicKind::Overview => "overview",
            TopicKind::General => "general",
            TopicKind::Introduction => "introduction",
            TopicKind::Theory => "theory",
            TopicKind::Practical => "practical",
            TopicKind::Advanced => "advanced",
            TopicKind::Assessment => "assessment",
        }
    }
}

/// A unit, subtopic, or flat topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TopicKind,
    pub content: String,
    /// Only filled in pattern mode
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub subtopics: Vec<Topic>,
}

impl Topic {
    fn new(id: String, title: String, kind: TopicKind, content: String) -> Self {
        Self {
            id,
            title,
            kind,
            content,
            keywords: Vec::new(),
            subtopics: Vec::new(),
        }
    }
}

/// Which strategy produced the topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    Structural,
    Pattern,
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionMode::Structural => write!(f, "structural"),
            ExtractionMode::Pattern => write!(f, "pattern"),
        }
    }
}

/// Ordered topics plus the strategy that produced them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicExtraction {
    pub mode: ExtractionMode,
    pub topics: Vec<Topic>,
}

impl TopicExtraction {
    /// Number of subtopics across all units
    pub fn subtopic_count(&self) -> usize {
        self.topics.iter().map(|t| t.subtopics.len()).sum()
    }
}

/// Truncate to `max_chars` characters, marking the cut with an ellipsis
pub fn truncate_title(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

// NOTE: expect() is acceptable here, the patterns are constant
static UNIT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(unit|module|chapter|section)\s+\d+[:.]?\s*")
        .expect("Invalid regex: unit header")
});

// Order matters: the first kind with a matching pattern wins.
static SENTENCE_PATTERNS: LazyLock<Vec<(TopicKind, Regex)>> = LazyLock::new(|| {
    vec![
        (
            TopicKind::Introduction,
            Regex::new(r"\b(introduction|introductory|overview|basics|fundamentals?|getting started|preliminar(y|ies))\b")
                .expect("Invalid regex: introduction pattern"),
        ),
        (
            TopicKind::Theory,
            Regex::new(r"\b(theory|theories|theoretical|theorems?|concepts?|principles?|models?|definitions?)\b")
                .expect("Invalid regex: theory pattern"),
        ),
        (
            TopicKind::Practical,
            Regex::new(r"\b(practical|practicals|lab|labs|laboratory|hands-on|exercises?|projects?|implementation|case stud(y|ies))\b")
                .expect("Invalid regex: practical pattern"),
        ),
        (
            TopicKind::Advanced,
            Regex::new(r"\b(advanced|complex|optimization|research|specialized|in-depth)\b")
                .expect("Invalid regex: advanced pattern"),
        ),
        (
            TopicKind::Assessment,
            Regex::new(r"\b(exams?|examination|assessments?|quiz(zes)?|tests?|evaluation|grading|assignments?|midterm|final)\b")
                .expect("Invalid regex: assessment pattern"),
        ),
    ]
});

/// Whether a line starts with a unit heading
pub fn is_unit_header(line: &str) -> bool {
    UNIT_HEADER.is_match(line)
}

/// Classify a sentence by the first matching pattern group
pub fn classify_sentence(sentence: &str) -> TopicKind {
    let lowered = sentence.to_lowercase();
    SENTENCE_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(&lowered))
        .map(|(kind, _)| *kind)
        .unwrap_or(TopicKind::General)
}

/// Topic extractor with structural and pattern strategies
pub struct TopicExtractor {
    tokenizer: Arc<dyn Tokenize>,
    keyword_extractor: KeywordExtractor,
}

impl Default for TopicExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicExtractor {
    pub fn new() -> Self {
        Self::with_tokenizer(Arc::new(UnicodeTokenizer::new()))
    }

    pub fn with_tokenizer(tokenizer: Arc<dyn Tokenize>) -> Self {
        let keyword_extractor =
            KeywordExtractor::with_config(tokenizer.clone(), 3, PATTERN_TOPIC_KEYWORDS);
        Self {
            tokenizer,
            keyword_extractor,
        }
    }

    /// Extract topics from line-normalized text.
    ///
    /// Structural mode is used whenever at least one heading exists; otherwise the
    /// pattern strategy runs over the whole text.
    pub fn extract(&self, text: &str) -> TopicExtraction {
        match self.extract_structural(text) {
            Some(topics) => TopicExtraction {
                mode: ExtractionMode::Structural,
                topics,
            },
            None => TopicExtraction {
                mode: ExtractionMode::Pattern,
                topics: self.extract_by_pattern(text),
            },
        }
    }

    /// Heading-based extraction. Returns `None` when no line is a heading.
    pub fn extract_structural(&self, text: &str) -> Option<Vec<Topic>> {
        let mut overview: Option<Topic> = None;
        let mut units: Vec<Topic> = Vec::new();

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if is_unit_header(line) {
                let id = format!("unit_{}", units.len() + 1);
                units.push(Topic::new(id, line.to_string(), TopicKind::Unit, line.to_string()));
                continue;
            }

            match units.last_mut() {
                Some(unit) => {
                    if line.chars().count() > MIN_SUBTOPIC_CHARS {
                        push_subtopic(unit, line);
                    }
                }
                None => {
                    let unit = overview.get_or_insert_with(|| {
                        Topic::new(
                            "unit_0".to_string(),
                            OVERVIEW_TITLE.to_string(),
                            TopicKind::Overview,
                            OVERVIEW_CONTENT.to_string(),
                        )
                    });
                    push_subtopic(unit, line);
                }
            }
        }

        if units.is_empty() {
            return None;
        }

        let mut topics: Vec<Topic> = overview.into_iter().collect();
        topics.extend(units);
        Some(topics)
    }

    /// Sentence classification fallback producing a flat topic list
    pub fn extract_by_pattern(&self, text: &str) -> Vec<Topic> {
        self.tokenizer
            .sentences(text)
            .into_iter()
            .filter(|s| s.trim().chars().count() > MIN_SENTENCE_CHARS)
            .take(MAX_PATTERN_TOPICS)
            .enumerate()
            .map(|(i, sentence)| {
                let mut topic = Topic::new(
                    (i + 1).to_string(),
                    truncate_title(&sentence, TITLE_MAX_CHARS),
                    classify_sentence(&sentence),
                    sentence.clone(),
                );
                topic.keywords = self
                    .keyword_extractor
                    .extract_keywords(&sentence, Some(PATTERN_TOPIC_KEYWORDS));
                topic
            })
            .collect()
    }
}

fn push_subtopic(unit: &mut Topic, line: &str) {
    let id = format!("{}_sub_{}", unit.id, unit.subtopics.len() + 1);
    unit.subtopics
        .push(Topic::new(id, line.to_string(), TopicKind::Topic, line.to_string()));
}
