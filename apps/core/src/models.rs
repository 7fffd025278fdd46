use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{Validate, ValidationError};

/// Upper bound on any "days until exam" value accepted at the boundary.
const MAX_DAYS_REMAINING: u32 = 3650;

/// A syllabus to turn into a mindmap.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MindmapRequest {
    /// Raw syllabus text, newlines included.
    pub syllabus_text: String,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    /// Days until the exam this syllabus is studied for.
    #[serde(default)]
    #[validate(range(max = 3650))]
    pub days_remaining: Option<u32>,
}

/// A letter grade for one course.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GradeEntry {
    #[serde(default)]
    pub course: Option<String>,
    /// Letter code such as `A+`, `B`, `F`. Unknown codes count as zero points.
    #[serde(default)]
    pub grade: String,
}

/// A single exam result, in percent.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExamScore {
    #[serde(default)]
    pub exam: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub score: f64,
}

/// Attendance as one overall percentage or a per-course mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attendance {
    Overall(f64),
    PerCourse(BTreeMap<String, f64>),
}

impl Attendance {
    /// Mean attendance, or `None` when the mapping is empty.
    pub fn average(&self) -> Option<f64> {
        match self {
            Attendance::Overall(value) => Some(*value),
            Attendance::PerCourse(per_course) if per_course.is_empty() => None,
            Attendance::PerCourse(per_course) => {
                Some(per_course.values().sum::<f64>() / per_course.len() as f64)
            }
        }
    }
}

fn validate_attendance(attendance: &Attendance) -> Result<(), ValidationError> {
    let in_range = |v: &f64| (0.0..=100.0).contains(v);
    let valid = match attendance {
        Attendance::Overall(value) => in_range(value),
        Attendance::PerCourse(per_course) => per_course.values().all(in_range),
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("attendance_out_of_range"))
    }
}

/// An exam the student is registered for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamRef {
    pub course: String,
    #[serde(default)]
    pub date: Option<String>,
    /// Missing values sort last when picking the nearest exam.
    #[serde(default)]
    pub days_remaining: Option<u32>,
    #[serde(default)]
    pub total_marks: Option<f64>,
}

/// Syllabus excerpt tied to an upcoming exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusArea {
    pub course: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub content_summary: Option<String>,
}

/// Raw performance record submitted for suggestions.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StudentRecord {
    #[validate(length(min = 1))]
    pub student_id: String,
    #[serde(default)]
    #[validate(nested)]
    pub grades: Vec<GradeEntry>,
    #[serde(default)]
    #[validate(custom(function = "validate_attendance"))]
    pub attendance: Option<Attendance>,
    #[serde(default)]
    #[validate(nested)]
    pub exam_scores: Vec<ExamScore>,
    #[serde(default)]
    #[validate(range(min = 1, max = 12))]
    pub current_semester: Option<u32>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    #[validate(range(max = 3650))]
    pub days_remaining: Option<u32>,
    #[serde(default)]
    pub upcoming_exams: Vec<ExamRef>,
    #[serde(default)]
    pub syllabus_focus_areas: Vec<FocusArea>,
}

impl StudentRecord {
    /// Exams with an implausible countdown are rejected before analysis.
    pub fn check_exam_horizon(&self) -> Result<(), ValidationError> {
        let too_far = self
            .upcoming_exams
            .iter()
            .filter_map(|e| e.days_remaining)
            .any(|d| d > MAX_DAYS_REMAINING);
        if too_far {
            Err(ValidationError::new("exam_too_far"))
        } else {
            Ok(())
        }
    }
}

/// Several requests processed in one call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub mindmaps: Vec<MindmapRequest>,
    #[serde(default)]
    pub suggestions: Vec<StudentRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attendance_scalar_or_mapping() {
        let scalar: Attendance = serde_json::from_value(json!(90)).unwrap();
        assert_eq!(scalar.average(), Some(90.0));

        let mapping: Attendance =
            serde_json::from_value(json!({"Math": 80.0, "Physics": 90.0})).unwrap();
        assert_eq!(mapping.average(), Some(85.0));

        let empty: Attendance = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.average(), None);
    }

    #[test]
    fn test_student_record_defaults() {
        let record: StudentRecord = serde_json::from_value(json!({"student_id": "STU001"})).unwrap();
        assert!(record.grades.is_empty());
        assert!(record.attendance.is_none());
        assert!(record.upcoming_exams.is_empty());
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_student_record_validation() {
        let record: StudentRecord = serde_json::from_value(json!({
            "student_id": "STU001",
            "exam_scores": [{"score": 140}],
        }))
        .unwrap();
        assert!(record.validate().is_err());

        let record: StudentRecord = serde_json::from_value(json!({
            "student_id": "STU001",
            "attendance": {"Math": 120.0},
        }))
        .unwrap();
        assert!(record.validate().is_err());

        let record: StudentRecord = serde_json::from_value(json!({"student_id": ""})).unwrap();
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_exam_horizon() {
        let record: StudentRecord = serde_json::from_value(json!({
            "student_id": "STU001",
            "upcoming_exams": [{"course": "Algebra", "days_remaining": 5000}],
        }))
        .unwrap();
        assert!(record.check_exam_horizon().is_err());
    }

    #[test]
    fn test_mindmap_request_validation() {
        let request: MindmapRequest = serde_json::from_value(json!({
            "syllabus_text": "Unit 1: Intro",
            "days_remaining": 9999,
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }
}
