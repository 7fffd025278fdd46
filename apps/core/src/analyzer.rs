//! Study Analyzer - Main orchestrator for both pipelines.
//!
//! Mindmap pipeline: normalize, extract topics and keywords, score complexity,
//! build the tree, derive study suggestions.
//!
//! Suggestions pipeline: aggregate performance, rank recommendations, add
//! course advice and improvement areas.

use chrono::Utc;
use rand::Rng;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::advisor::{
    course_recommendations, improvement_areas, overall_suggestion, PerformanceAnalyzer,
    RecommendationEngine,
};
use crate::config::AdvisorConfig;
use crate::mindmap::{study_suggestions, MindmapBuilder};
use crate::models::StudentRecord;
use crate::report::{MindmapReport, MindmapReportMetadata, SuggestionReport, SyllabusAnalysis};
use crate::text::{
    normalize, normalize_lines, ComplexityAnalyzer, KeywordExtractor, Tokenize, TopicExtractor,
    UnicodeTokenizer,
};

const REPORTED_TOPICS: usize = 5;
const REPORTED_KEYWORDS: usize = 10;
/// Keywords shorter than or equal to this are ignored
const MIN_KEYWORD_CHARS: usize = 3;

/// Stateless analyzer; every call depends only on its arguments
pub struct StudyAnalyzer {
    keyword_extractor: KeywordExtractor,
    complexity_analyzer: ComplexityAnalyzer,
    topic_extractor: TopicExtractor,
    mindmap_builder: MindmapBuilder,
    performance_analyzer: PerformanceAnalyzer,
    recommendation_engine: RecommendationEngine,
    max_keywords: usize,
}

impl Default for StudyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl StudyAnalyzer {
    pub fn new() -> Self {
        Self::with_config(&AdvisorConfig::default())
    }

    pub fn with_config(config: &AdvisorConfig) -> Self {
        Self::with_tokenizer(Arc::new(UnicodeTokenizer::new()), config)
    }

    /// Build every stage over one shared tokenizer
    pub fn with_tokenizer(tokenizer: Arc<dyn Tokenize>, config: &AdvisorConfig) -> Self {
        Self {
            keyword_extractor: KeywordExtractor::with_config(
                Arc::clone(&tokenizer),
                MIN_KEYWORD_CHARS,
                config.max_keywords,
            ),
            complexity_analyzer: ComplexityAnalyzer::with_tokenizer(Arc::clone(&tokenizer)),
            topic_extractor: TopicExtractor::with_tokenizer(tokenizer),
            mindmap_builder: MindmapBuilder::new()
                .with_keyword_links(config.keyword_link_strategy()),
            performance_analyzer: PerformanceAnalyzer::new(),
            recommendation_engine: RecommendationEngine::new()
                .with_max_recommendations(config.max_recommendations)
                .with_demo_exam(config.demo_exams),
            max_keywords: config.max_keywords,
        }
    }

    /// Turn a syllabus into a mindmap with its analysis and study suggestions
    #[instrument(skip(self, syllabus_text), fields(text_length = syllabus_text.len()))]
    pub fn generate_mindmap(&self, syllabus_text: &str, days_remaining: Option<u32>) -> MindmapReport {
        let start = Instant::now();

        // Headings need line structure; keywords work on the flattened text
        let extraction = self.topic_extractor.extract(&normalize_lines(syllabus_text));
        let keywords = self
            .keyword_extractor
            .extract_keywords(&normalize(syllabus_text), Some(self.max_keywords));
        let complexity = self.complexity_analyzer.analyze(syllabus_text);

        let mindmap = self.mindmap_builder.build(&extraction.topics, &keywords);
        let suggestions =
            study_suggestions(&extraction.topics, complexity.complexity_level, days_remaining);

        info!(
            "Mindmap generated: mode={}, {} nodes, {} edges, complexity={}",
            extraction.mode,
            mindmap.metadata.total_nodes,
            mindmap.metadata.total_edges,
            complexity.complexity_level
        );

        MindmapReport {
            id: Uuid::new_v4(),
            mindmap,
            analysis: SyllabusAnalysis {
                complexity,
                topics: extraction.topics.into_iter().take(REPORTED_TOPICS).collect(),
                keywords: keywords.into_iter().take(REPORTED_KEYWORDS).collect(),
            },
            suggestions,
            metadata: MindmapReportMetadata {
                course_name: None,
                department: None,
                text_length: syllabus_text.chars().count(),
                extraction_mode: extraction.mode,
            },
            processing_time_ms: start.elapsed().as_millis() as u64,
            generated_at: Utc::now(),
        }
    }

    /// Analyze a student record and produce ranked advice
    #[instrument(skip_all, fields(student_id = %record.student_id))]
    pub fn generate_suggestions<R: Rng + ?Sized>(
        &self,
        record: &StudentRecord,
        rng: &mut R,
    ) -> SuggestionReport {
        let start = Instant::now();

        let profile = self.performance_analyzer.analyze(record);
        let outcome = self.recommendation_engine.recommend(&profile, rng);
        let courses = course_recommendations(&profile, record.department.as_deref());
        let areas = improvement_areas(&profile);
        let overall = overall_suggestion(profile.performance_level).to_string();

        info!(
            "Suggestions generated: level={}, {} recommendations, demo_data={}",
            profile.performance_level,
            outcome.recommendations.len(),
            outcome.demo_data
        );

        SuggestionReport {
            id: Uuid::new_v4(),
            student_id: record.student_id.clone(),
            performance_analysis: profile,
            study_recommendations: outcome.recommendations,
            course_recommendations: courses,
            improvement_areas: areas,
            overall_suggestion: overall,
            demo_data: outcome.demo_data,
            processing_time_ms: start.elapsed().as_millis() as u64,
            generated_at: Utc::now(),
        }
    }
}
