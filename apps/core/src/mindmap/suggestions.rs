//! Study suggestions derived from syllabus analysis.

use std::collections::HashSet;

use crate::text::{ComplexityLevel, Topic, TopicKind};

const MAX_STUDY_SUGGESTIONS: usize = 5;
/// At or below this many days, pacing switches from weekly planning to revision
const SHORT_HORIZON_DAYS: u32 = 7;

const GENERAL_SUGGESTIONS: &[&str] = &[
    "Create a study schedule covering all major topics.",
    "Use active learning techniques like summarizing and self-testing.",
    "Form study groups to discuss complex concepts.",
];

/// Build up to five study suggestions for a syllabus.
///
/// Order: pacing (when a deadline is known), complexity advice, topic-type advice,
/// then general advice.
pub fn study_suggestions(
    topics: &[Topic],
    complexity: ComplexityLevel,
    days_remaining: Option<u32>,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if let Some(days) = days_remaining {
        suggestions.push(pacing_suggestion(days, topics.len()));
    }

    match complexity {
        ComplexityLevel::High => {
            suggestions.push("This syllabus appears complex. Consider breaking it into smaller study sessions.".to_string());
            suggestions.push("Focus on understanding fundamental concepts before moving to advanced topics.".to_string());
        }
        ComplexityLevel::Medium => {
            suggestions.push("This syllabus has moderate complexity. Regular study sessions should be sufficient.".to_string());
        }
        ComplexityLevel::Low => {
            suggestions.push("This syllabus appears straightforward. You can cover it with consistent daily study.".to_string());
        }
    }

    let kinds: HashSet<TopicKind> = topics.iter().map(|t| t.kind).collect();
    if kinds.contains(&TopicKind::Practical) {
        suggestions.push("This course includes practical components. Allocate time for hands-on practice.".to_string());
    }
    if kinds.contains(&TopicKind::Theory) {
        suggestions.push("Strong theoretical foundation is important for this course.".to_string());
    }
    if kinds.contains(&TopicKind::Advanced) {
        suggestions.push("Some advanced topics are covered. Ensure you have mastered the basics first.".to_string());
    }

    suggestions.extend(GENERAL_SUGGESTIONS.iter().map(|s| s.to_string()));
    suggestions.truncate(MAX_STUDY_SUGGESTIONS);
    suggestions
}

fn pacing_suggestion(days: u32, unit_count: usize) -> String {
    if days <= SHORT_HORIZON_DAYS {
        return format!(
            "Only {} day(s) left: revise the core units instead of starting new material.",
            days
        );
    }
    let weeks = days.div_ceil(7) as usize;
    let per_week = unit_count.max(1).div_ceil(weeks);
    format!(
        "With {} days left, aim to cover about {} unit(s) per week and keep the last week for revision.",
        days, per_week
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(kind: TopicKind) -> Topic {
        Topic {
            id: "1".to_string(),
            title: "t".to_string(),
            kind,
            content: "t".to_string(),
            keywords: vec![],
            subtopics: vec![],
        }
    }

    #[test]
    fn test_low_complexity_plus_general() {
        let suggestions = study_suggestions(&[], ComplexityLevel::Low, None);
        assert_eq!(suggestions.len(), 4);
        assert!(suggestions[0].contains("straightforward"));
        assert_eq!(suggestions[1], GENERAL_SUGGESTIONS[0]);
    }

    #[test]
    fn test_capped_at_five() {
        let topics = vec![
            topic(TopicKind::Practical),
            topic(TopicKind::Theory),
            topic(TopicKind::Advanced),
        ];
        let suggestions = study_suggestions(&topics, ComplexityLevel::High, None);
        assert_eq!(suggestions.len(), MAX_STUDY_SUGGESTIONS);
        assert!(suggestions[2].contains("practical"));
        assert!(suggestions[3].contains("theoretical"));
        assert!(suggestions[4].contains("advanced topics are covered"));
    }

    #[test]
    fn test_pacing_comes_first() {
        let topics = vec![topic(TopicKind::Unit); 6];

        let soon = study_suggestions(&topics, ComplexityLevel::Medium, Some(3));
        assert!(soon[0].starts_with("Only 3 day(s) left"));

        // 21 days = 3 weeks, 6 units -> 2 per week
        let later = study_suggestions(&topics, ComplexityLevel::Medium, Some(21));
        assert!(later[0].contains("about 2 unit(s) per week"));
        assert_eq!(later.len(), MAX_STUDY_SUGGESTIONS);
    }
}
