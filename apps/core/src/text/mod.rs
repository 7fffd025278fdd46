//! # Text Module
//!
//! Deterministic syllabus text analysis, no models involved.
//!
//! ## Components
//! - `normalizer`: noise and whitespace stripping
//! - `tokenizer`: sentence/word segmentation capability and stopwords
//! - `keywords`: frequency keyword extraction
//! - `complexity`: readability tiering
//! - `topics`: structural (heading) and pattern (sentence) topic extraction

pub mod complexity;
pub mod keywords;
pub mod normalizer;
pub mod tokenizer;
pub mod topics;

pub use complexity::{ComplexityAnalyzer, ComplexityLevel, ComplexityProfile};
pub use keywords::{KeywordExtractor, KeywordResult};
pub use normalizer::{normalize, normalize_lines};
pub use tokenizer::{Tokenize, Tokenized, UnicodeTokenizer};
pub use topics::{ExtractionMode, Topic, TopicExtraction, TopicExtractor, TopicKind};
