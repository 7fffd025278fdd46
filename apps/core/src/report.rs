//! Report envelopes returned by the two pipelines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::advisor::{ImprovementArea, PerformanceProfile};
use crate::mindmap::MindmapGraph;
use crate::text::{ComplexityProfile, ExtractionMode, Topic};

/// Analysis attached to a mindmap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyllabusAnalysis {
    pub complexity: ComplexityProfile,
    /// First five top-level topics
    pub topics: Vec<Topic>,
    /// First ten keywords, most frequent first
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MindmapReportMetadata {
    pub course_name: Option<String>,
    pub department: Option<String>,
    /// Characters in the raw syllabus
    pub text_length: usize,
    pub extraction_mode: ExtractionMode,
}

/// Complete result of a mindmap request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MindmapReport {
    pub id: Uuid,
    pub mindmap: MindmapGraph,
    pub analysis: SyllabusAnalysis,
    pub suggestions: Vec<String>,
    pub metadata: MindmapReportMetadata,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,

    pub generated_at: DateTime<Utc>,
}

/// Complete result of a suggestions request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionReport {
    pub id: Uuid,
    pub student_id: String,
    pub performance_analysis: PerformanceProfile,
    pub study_recommendations: Vec<String>,
    pub course_recommendations: Vec<String>,
    pub improvement_areas: Vec<ImprovementArea>,
    pub overall_suggestion: String,
    /// True when a placeholder exam stood in for missing exam data
    pub demo_data: bool,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,

    pub generated_at: DateTime<Utc>,
}

/// Results of a batch, each list in request order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub mindmaps: Vec<BatchItem<MindmapReport>>,
    pub suggestions: Vec<BatchItem<SuggestionReport>>,
}

/// One batch entry: either a report or the reason it was rejected
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchItem<T> {
    Ok(T),
    Error(String),
}

impl<T> BatchItem<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, BatchItem::Ok(_))
    }

    pub fn ok(&self) -> Option<&T> {
        match self {
            BatchItem::Ok(report) => Some(report),
            BatchItem::Error(_) => None,
        }
    }
}
