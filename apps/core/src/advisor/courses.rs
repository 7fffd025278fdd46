//! Course-level advice: elective guidance, improvement areas and the overall summary.

use serde::{Deserialize, Serialize};

use super::performance::{PerformanceLevel, PerformanceProfile};

const MAX_COURSE_RECOMMENDATIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

/// A metric below its target, with concrete steps to close the gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementArea {
    pub area: String,
    pub current_score: f64,
    pub target_score: f64,
    pub priority: Priority,
    pub suggestions: Vec<String>,
}

impl ImprovementArea {
    fn new(area: &str, current: f64, target: f64, priority: Priority, suggestions: &[&str]) -> Self {
        Self {
            area: area.to_string(),
            current_score: current,
            target_score: target,
            priority,
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub fn course_recommendations(profile: &PerformanceProfile, department: Option<&str>) -> Vec<String> {
    let mut recommendations: Vec<String> = if profile.performance_level.is_at_least_good() {
        vec![
            "Consider taking advanced electives in your area of interest".to_string(),
            "Explore interdisciplinary courses to broaden your knowledge".to_string(),
            "Look into honors or accelerated programs".to_string(),
        ]
    } else {
        vec![
            "Focus on core subjects before taking electives".to_string(),
            "Consider a lighter course load to improve performance".to_string(),
            "Take prerequisite courses if struggling with advanced topics".to_string(),
        ]
    };

    let department = department.unwrap_or_default().to_lowercase();
    if department.contains("computer") {
        recommendations.push("Consider programming and software development courses".to_string());
    } else if department.contains("business") {
        recommendations.push("Focus on analytical and communication skills courses".to_string());
    }

    recommendations.truncate(MAX_COURSE_RECOMMENDATIONS);
    recommendations
}

pub fn improvement_areas(profile: &PerformanceProfile) -> Vec<ImprovementArea> {
    let mut areas = Vec::new();

    if profile.gpa < 7.0 {
        areas.push(ImprovementArea::new(
            "Academic Performance",
            profile.gpa,
            7.5,
            Priority::High,
            &[
                "Attend all lectures and tutorials",
                "Complete assignments on time",
                "Seek help when needed",
            ],
        ));
    }

    if profile.avg_attendance < 80.0 {
        areas.push(ImprovementArea::new(
            "Class Attendance",
            profile.avg_attendance,
            85.0,
            Priority::High,
            &[
                "Set reminders for classes",
                "Understand the importance of regular attendance",
                "Communicate with professors about any issues",
            ],
        ));
    }

    if profile.avg_exam_score < 70.0 {
        areas.push(ImprovementArea::new(
            "Exam Performance",
            profile.avg_exam_score,
            75.0,
            Priority::Medium,
            &[
                "Practice with past papers",
                "Improve time management during exams",
                "Review exam techniques and strategies",
            ],
        ));
    }

    areas
}

pub fn overall_suggestion(level: PerformanceLevel) -> &'static str {
    match level {
        PerformanceLevel::Excellent => "You're performing excellently! Continue your current approach and consider taking on leadership roles or advanced challenges.",
        PerformanceLevel::Good => "You're doing well! With some focused improvements, you can achieve excellent performance.",
        PerformanceLevel::Average => "Your performance is average. Focus on developing better study habits and seeking help when needed.",
        PerformanceLevel::NeedsImprovement => "Your performance needs significant improvement. Consider meeting with academic advisors and developing a comprehensive improvement plan.",
    }
}
