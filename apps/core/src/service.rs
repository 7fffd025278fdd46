//! Request boundary: validation, batching and JSON loading around the analyzer.

use futures::future::{join, join_all};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::analyzer::StudyAnalyzer;
use crate::config::AdvisorConfig;
use crate::error::AppError;
use crate::models::{BatchRequest, MindmapRequest, StudentRecord};
use crate::report::{BatchItem, BatchReport, MindmapReport, SuggestionReport};

/// Path argument that means "read standard input"
pub const STDIN_SOURCE: &str = "-";

/// A cheap, cloneable handle to the analyzer.
///
/// Every request is validated before it reaches the pipeline. Clones share one
/// analyzer, which holds no mutable state.
#[derive(Clone)]
pub struct AdvisorService {
    analyzer: Arc<StudyAnalyzer>,
    config: Arc<AdvisorConfig>,
}

impl Default for AdvisorService {
    fn default() -> Self {
        Self::new(AdvisorConfig::default())
    }
}

impl AdvisorService {
    pub fn new(config: AdvisorConfig) -> Self {
        Self {
            analyzer: Arc::new(StudyAnalyzer::with_config(&config)),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Validates a mindmap request and runs the mindmap pipeline.
    ///
    /// # Errors
    ///
    /// `AppError::Validation` when a field is out of range or the syllabus is
    /// shorter than `min_syllabus_chars` after trimming.
    #[instrument(skip(self, request))]
    pub fn mindmap(&self, request: &MindmapRequest) -> Result<MindmapReport, AppError> {
        request.validate()?;

        let length = request.syllabus_text.trim().chars().count();
        if length < self.config.min_syllabus_chars {
            return Err(AppError::Validation(format!(
                "syllabus_text must be at least {} characters, got {}",
                self.config.min_syllabus_chars, length
            )));
        }

        let mut report = self
            .analyzer
            .generate_mindmap(&request.syllabus_text, request.days_remaining);
        report.metadata.course_name = request.course_name.clone();
        report.metadata.department = request.department.clone();
        Ok(report)
    }

    /// Validates a student record and runs the suggestions pipeline.
    ///
    /// # Errors
    ///
    /// `AppError::Validation` for out-of-range scores or attendance, an empty
    /// student id, or an exam further out than the accepted horizon.
    pub fn suggestions(&self, record: &StudentRecord) -> Result<SuggestionReport, AppError> {
        self.suggestions_for_stream(record, 0)
    }

    #[instrument(skip(self, record), fields(student_id = %record.student_id))]
    fn suggestions_for_stream(
        &self,
        record: &StudentRecord,
        stream: u64,
    ) -> Result<SuggestionReport, AppError> {
        record.validate()?;
        record
            .check_exam_horizon()
            .map_err(|e| AppError::Validation(format!("upcoming_exams: {}", e)))?;

        let mut rng = self.rng(stream);
        Ok(self.analyzer.generate_suggestions(record, &mut rng))
    }

    /// Seeded runs give each batch entry its own stream so results do not depend on scheduling
    fn rng(&self, stream: u64) -> StdRng {
        match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
            None => StdRng::from_entropy(),
        }
    }

    /// Runs every request of a batch concurrently on the blocking pool.
    ///
    /// Results come back in input order. A rejected request becomes a
    /// `BatchItem::Error` and does not affect the others.
    ///
    /// # Errors
    ///
    /// `AppError::Internal` only if a worker task panics or is cancelled.
    pub async fn process_batch(&self, batch: BatchRequest) -> Result<BatchReport, AppError> {
        info!(
            "Processing batch: {} mindmaps, {} suggestions",
            batch.mindmaps.len(),
            batch.suggestions.len()
        );

        let mindmap_tasks = batch.mindmaps.into_iter().map(|request| {
            let service = self.clone();
            tokio::task::spawn_blocking(move || service.mindmap(&request))
        });
        let suggestion_tasks = batch
            .suggestions
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let service = self.clone();
                tokio::task::spawn_blocking(move || {
                    service.suggestions_for_stream(&record, index as u64)
                })
            });

        let (mindmaps, suggestions) = join(join_all(mindmap_tasks), join_all(suggestion_tasks)).await;

        let report = BatchReport {
            mindmaps: mindmaps
                .into_iter()
                .map(|joined| joined.map(into_item))
                .collect::<Result<_, _>>()?,
            suggestions: suggestions
                .into_iter()
                .map(|joined| joined.map(into_item))
                .collect::<Result<_, _>>()?,
        };

        debug!(
            "Batch done: {}/{} mindmaps ok, {}/{} suggestions ok",
            report.mindmaps.iter().filter(|i| i.is_ok()).count(),
            report.mindmaps.len(),
            report.suggestions.iter().filter(|i| i.is_ok()).count(),
            report.suggestions.len()
        );
        Ok(report)
    }
}

fn into_item<T>(result: Result<T, AppError>) -> BatchItem<T> {
    match result {
        Ok(report) => BatchItem::Ok(report),
        Err(e) => {
            warn!("Batch entry rejected: {}", e);
            BatchItem::Error(e.to_string())
        }
    }
}

/// Reads a JSON document from a file, or from stdin when `source` is `-`.
pub fn load_json<T: DeserializeOwned>(source: &str) -> Result<T, AppError> {
    let raw = if source == STDIN_SOURCE {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(Path::new(source))?
    };
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    const SYLLABUS: &str = "Unit 1: Foundations\nSets, relations and functions\nUnit 2: Graphs\nPaths, cycles and trees in depth";

    fn mindmap_request(text: &str) -> MindmapRequest {
        MindmapRequest {
            syllabus_text: text.to_string(),
            course_name: Some("Discrete Mathematics".to_string()),
            department: None,
            days_remaining: None,
        }
    }

    fn record(value: serde_json::Value) -> StudentRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_mindmap_copies_request_metadata() {
        let service = AdvisorService::default();
        let report = service.mindmap(&mindmap_request(SYLLABUS)).unwrap();

        assert_eq!(report.metadata.course_name.as_deref(), Some("Discrete Mathematics"));
        assert_eq!(report.mindmap.metadata.topics_count, 2);
    }

    #[test]
    fn test_short_syllabus_rejected() {
        let service = AdvisorService::default();
        let result = service.mindmap(&mindmap_request("Unit 1: Intro"));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_invalid_record_rejected() {
        let service = AdvisorService::default();

        let bad_score = record(json!({"student_id": "S1", "exam_scores": [{"score": 101}]}));
        assert!(matches!(service.suggestions(&bad_score), Err(AppError::Validation(_))));

        let far_exam = record(json!({
            "student_id": "S1",
            "upcoming_exams": [{"course": "Algebra", "days_remaining": 4000}],
        }));
        assert!(matches!(service.suggestions(&far_exam), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_seeded_service_is_reproducible() {
        let config = AdvisorConfig {
            rng_seed: Some(17),
            ..AdvisorConfig::default()
        };
        let service = AdvisorService::new(config);
        let student = record(json!({"student_id": "S1", "attendance": 88}));

        let first = service.suggestions(&student).unwrap();
        let second = service.suggestions(&student).unwrap();
        assert_eq!(first.study_recommendations, second.study_recommendations);
    }

    #[tokio::test]
    async fn test_batch_preserves_order_and_isolates_errors() {
        let service = AdvisorService::default();
        let batch = BatchRequest {
            mindmaps: vec![
                mindmap_request(SYLLABUS),
                mindmap_request("too short"),
                mindmap_request(&SYLLABUS.replace("Foundations", "Logic")),
            ],
            suggestions: vec![
                record(json!({"student_id": "A"})),
                record(json!({"student_id": ""})),
                record(json!({"student_id": "C"})),
            ],
        };

        let report = service.process_batch(batch).await.unwrap();

        assert_eq!(report.mindmaps.len(), 3);
        assert!(report.mindmaps[0].is_ok());
        assert!(!report.mindmaps[1].is_ok());
        let third = report.mindmaps[2].ok().unwrap();
        assert_eq!(third.mindmap.nodes[1].label, "Unit 1: Logic");

        let ids: Vec<Option<&str>> = report
            .suggestions
            .iter()
            .map(|item| item.ok().map(|r| r.student_id.as_str()))
            .collect();
        assert_eq!(ids, vec![Some("A"), None, Some("C")]);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let report = AdvisorService::default()
            .process_batch(BatchRequest::default())
            .await
            .unwrap();
        assert!(report.mindmaps.is_empty());
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_load_json_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", json!({"student_id": "STU042", "attendance": {"Math": 70}})).unwrap();

        let loaded: StudentRecord = load_json(file.path().to_str().unwrap()).unwrap();
        assert_eq!(loaded.student_id, "STU042");
    }

    #[test]
    fn test_load_json_errors() {
        let missing = load_json::<StudentRecord>("/definitely/not/here.json");
        assert!(matches!(missing, Err(AppError::Io(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let malformed = load_json::<StudentRecord>(file.path().to_str().unwrap());
        assert!(matches!(malformed, Err(AppError::Serialization(_))));
    }
}
