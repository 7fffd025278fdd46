//! Performance aggregation.
//!
//! Turns a raw student record into a [`PerformanceProfile`]: grade point average,
//! attendance, exam average, a coarse level, and strength/weakness tags.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{ExamRef, FocusArea, StudentRecord};
use crate::text::complexity::round2;

/// Letter grade to grade points. Unknown letters are worth 0.
const GRADE_POINTS: &[(&str, f64)] = &[
    ("A+", 10.0),
    ("A", 9.0),
    ("B+", 8.0),
    ("B", 7.0),
    ("C+", 6.0),
    ("C", 5.0),
    ("D", 4.0),
    ("F", 0.0),
];

pub const STRENGTH_GPA: &str = "Strong academic performance";
pub const STRENGTH_ATTENDANCE: &str = "Excellent attendance record";
pub const STRENGTH_EXAMS: &str = "Good exam performance";
pub const WEAKNESS_GPA: &str = "Academic performance needs improvement";
pub const WEAKNESS_ATTENDANCE: &str = "Poor attendance affecting performance";
pub const WEAKNESS_EXAMS: &str = "Exam scores need improvement";

pub fn grade_points(grade: &str) -> f64 {
    let code = grade.trim().to_uppercase();
    GRADE_POINTS
        .iter()
        .find(|(letter, _)| *letter == code)
        .map(|(_, points)| *points)
        .unwrap_or(0.0)
}

/// Coarse academic standing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLevel {
    Excellent,
    Good,
    Average,
    NeedsImprovement,
}

impl fmt::Display for PerformanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl PerformanceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            PerformanceLevel::Excellent => "excellent",
            PerformanceLevel::Good => "good",
            PerformanceLevel::Average => "average",
            PerformanceLevel::NeedsImprovement => "needs_improvement",
        }
    }

    /// First tuple whose three thresholds all hold wins, most demanding first.
    pub fn classify(gpa: f64, attendance: f64, exam_score: f64) -> Self {
        if gpa >= 8.5 && attendance >= 85.0 && exam_score >= 85.0 {
            PerformanceLevel::Excellent
        } else if gpa >= 7.0 && attendance >= 75.0 && exam_score >= 70.0 {
            PerformanceLevel::Good
        } else if gpa >= 5.5 && attendance >= 65.0 && exam_score >= 60.0 {
            PerformanceLevel::Average
        } else {
            PerformanceLevel::NeedsImprovement
        }
    }

    pub fn is_at_least_good(&self) -> bool {
        matches!(self, PerformanceLevel::Excellent | PerformanceLevel::Good)
    }
}

/// Inputs that were absent and replaced by a policy default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Grades,
    Attendance,
    ExamScores,
}

/// Values assumed when a metric is missing from the record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultPolicy {
    pub gpa: f64,
    pub attendance: f64,
    pub exam_score: f64,
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        Self {
            gpa: 7.5,
            attendance: 0.0,
            exam_score: 75.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceProfile {
    pub gpa: f64,
    pub avg_attendance: f64,
    pub avg_exam_score: f64,
    pub performance_level: PerformanceLevel,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub total_courses: usize,
    pub days_remaining: Option<u32>,
    pub upcoming_exams: Vec<ExamRef>,
    pub syllabus_focus_areas: Vec<FocusArea>,
    /// Metrics that were absent and filled from [`DefaultPolicy`]
    pub missing_metrics: Vec<Metric>,
}

/// Aggregates a student record into a profile
#[derive(Debug, Clone, Default)]
pub struct PerformanceAnalyzer {
    defaults: DefaultPolicy,
}

impl PerformanceAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(defaults: DefaultPolicy) -> Self {
        Self { defaults }
    }

    pub fn analyze(&self, record: &StudentRecord) -> PerformanceProfile {
        let mut missing_metrics = Vec::new();

        let gpa = mean(record.grades.iter().map(|g| grade_points(&g.grade))).unwrap_or_else(|| {
            missing_metrics.push(Metric::Grades);
            self.defaults.gpa
        });

        let avg_attendance = record
            .attendance
            .as_ref()
            .and_then(|a| a.average())
            .unwrap_or_else(|| {
                missing_metrics.push(Metric::Attendance);
                self.defaults.attendance
            });

        let avg_exam_score = mean(record.exam_scores.iter().map(|s| s.score)).unwrap_or_else(|| {
            missing_metrics.push(Metric::ExamScores);
            self.defaults.exam_score
        });

        let performance_level = PerformanceLevel::classify(gpa, avg_attendance, avg_exam_score);
        let (strengths, weaknesses) = tag_metrics(gpa, avg_attendance, avg_exam_score);

        PerformanceProfile {
            gpa: round2(gpa),
            avg_attendance: round2(avg_attendance),
            avg_exam_score: round2(avg_exam_score),
            performance_level,
            strengths,
            weaknesses,
            total_courses: record.grades.len(),
            days_remaining: record.days_remaining,
            upcoming_exams: record.upcoming_exams.clone(),
            syllabus_focus_areas: record.syllabus_focus_areas.clone(),
            missing_metrics,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Per-metric tags, independent of the performance level thresholds.
fn tag_metrics(gpa: f64, attendance: f64, exam_score: f64) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    if gpa >= 8.0 {
        strengths.push(STRENGTH_GPA.to_string());
    } else if gpa < 6.0 {
        weaknesses.push(WEAKNESS_GPA.to_string());
    }

    if attendance >= 85.0 {
        strengths.push(STRENGTH_ATTENDANCE.to_string());
    } else if attendance < 70.0 {
        weaknesses.push(WEAKNESS_ATTENDANCE.to_string());
    }

    if exam_score >= 80.0 {
        strengths.push(STRENGTH_EXAMS.to_string());
    } else if exam_score < 60.0 {
        weaknesses.push(WEAKNESS_EXAMS.to_string());
    }

    (strengths, weaknesses)
}
