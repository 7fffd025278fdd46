//! Tiered study recommendations.
//!
//! Tiers run in a fixed order and each appends lines tagged with the group they
//! belong to:
//! 1. urgency: nearest upcoming exam, bucketed by days remaining (+ syllabus strategy)
//! 2. performance: one line keyed by level, only when tier 1 produced nothing
//! 3. fail-safe: two generic lines if the list is still empty
//! 4. variety: two random tips from a fixed pool
//!
//! Final order is `urgent ++ syllabus_strategy ++ shuffle(base ++ tips)`, truncated.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::performance::{PerformanceLevel, PerformanceProfile};
use crate::models::{ExamRef, FocusArea};

pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 6;
/// Sort key for exams without a countdown, so they lose to any real date
const UNKNOWN_DAYS: u32 = 999;
const FOCUS_TOPICS: usize = 3;
const VARIETY_TIPS: usize = 2;
pub const STRATEGY_PREFIX: &str = "Strategy: ";

const TIP_POOL: &[&str] = &[
    "Use the Pomodoro technique: 25 minutes of focus, then a 5 minute break.",
    "Teach a concept to a friend to check that you really understand it.",
    "Sleep at least 7 hours, memory consolidates while you rest.",
    "Test yourself with flashcards instead of rereading notes.",
    "Space your revision of each topic over several days.",
    "Keep your phone out of reach while studying.",
    "Summarize each lecture in five bullet points the same day.",
    "Mix problem types in one session to build flexible recall.",
    "Set one concrete goal before every study session.",
    "Review your mistakes from past tests and note why they happened.",
];

const FAILSAFE_LINES: &[&str] = &[
    "Review your course material regularly and keep notes organized.",
    "Reach out to your instructors early if any topic feels unclear.",
];

const DEMO_COURSE: &str = "Sample Course";

/// Group a recommendation is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    Urgent,
    SyllabusStrategy,
    Base,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Line {
    tier: RecommendationTier,
    text: String,
}

impl Line {
    fn new(tier: RecommendationTier, text: impl Into<String>) -> Self {
        Self {
            tier,
            text: text.into(),
        }
    }
}

/// Ranked recommendation strings plus whether demo data was injected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationOutcome {
    pub recommendations: Vec<String>,
    pub demo_data: bool,
}

#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    max_recommendations: usize,
    inject_demo_exam: bool,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self {
            max_recommendations: DEFAULT_MAX_RECOMMENDATIONS,
            inject_demo_exam: false,
        }
    }

    pub fn with_max_recommendations(mut self, max: usize) -> Self {
        self.max_recommendations = max;
        self
    }

    /// Synthesize a placeholder exam when the profile has none. The outcome is
    /// flagged with `demo_data` so callers can tell it apart from real input.
    pub fn with_demo_exam(mut self, enabled: bool) -> Self {
        self.inject_demo_exam = enabled;
        self
    }

    pub fn recommend<R: Rng + ?Sized>(
        &self,
        profile: &PerformanceProfile,
        rng: &mut R,
    ) -> RecommendationOutcome {
        let demo_data = self.inject_demo_exam && profile.upcoming_exams.is_empty();
        let (exams, focus_areas) = if demo_data {
            demo_exam()
        } else {
            (
                profile.upcoming_exams.clone(),
                profile.syllabus_focus_areas.clone(),
            )
        };

        let mut lines = urgency_tier(&exams, &focus_areas);
        if lines.is_empty() {
            lines = performance_tier(profile.performance_level);
        }
        fill_failsafe(&mut lines);

        let tips: Vec<String> = TIP_POOL
            .choose_multiple(rng, VARIETY_TIPS)
            .map(|s| s.to_string())
            .collect();

        RecommendationOutcome {
            recommendations: assemble(lines, tips, self.max_recommendations, rng),
            demo_data,
        }
    }
}

fn assemble<R: Rng + ?Sized>(
    lines: Vec<Line>,
    tips: Vec<String>,
    max: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut urgent = Vec::new();
    let mut strategy = Vec::new();
    let mut mixed = Vec::new();
    for line in lines {
        match line.tier {
            RecommendationTier::Urgent => urgent.push(line.text),
            RecommendationTier::SyllabusStrategy => strategy.push(line.text),
            RecommendationTier::Base => mixed.push(line.text),
        }
    }
    mixed.extend(tips);
    mixed.shuffle(rng);

    let mut ordered = urgent;
    ordered.extend(strategy);
    ordered.extend(mixed);
    ordered.truncate(max);
    ordered
}

fn urgency_tier(exams: &[ExamRef], focus_areas: &[FocusArea]) -> Vec<Line> {
    // min_by_key keeps the first exam on ties
    let Some(exam) = exams
        .iter()
        .min_by_key(|e| e.days_remaining.unwrap_or(UNKNOWN_DAYS))
    else {
        return Vec::new();
    };

    let course = exam.course.trim();
    let focus = focus_areas
        .iter()
        .find(|f| f.course.trim().eq_ignore_ascii_case(course));
    let topics: Vec<&str> = focus
        .map(|f| {
            f.topics
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let urgent = |text: String| Line::new(RecommendationTier::Urgent, text);
    let mut lines = Vec::new();

    match exam.days_remaining {
        Some(days) if days <= 3 => {
            lines.push(urgent(format!(
                "URGENT: {} exam in {} day(s). Stop new material and revise what matters most.",
                course, days
            )));
            if topics.is_empty() {
                lines.push(urgent(format!(
                    "Exam prep: review your notes and summaries for {} and work through past papers.",
                    course
                )));
            } else {
                let top: Vec<&str> = topics.iter().take(FOCUS_TOPICS).copied().collect();
                lines.push(urgent(format!(
                    "Exam focus for {}: {}.",
                    course,
                    top.join(", ")
                )));
            }
        }
        Some(days) if days <= 7 => {
            lines.push(urgent(format!(
                "Exam next week: {} in {} days. Switch to a daily revision routine.",
                course, days
            )));
            if topics.is_empty() {
                lines.push(urgent(format!(
                    "Exam prep: draw up a revision timetable for {} and give every unit a slot.",
                    course
                )));
            } else {
                lines.push(urgent(format!(
                    "Exam plan for {}: {}.",
                    course,
                    daily_plan(&topics, days)
                )));
            }
        }
        Some(days) if days <= 14 => {
            lines.push(urgent(format!(
                "Exam in 2 weeks: {} in {} days.",
                course, days
            )));
            lines.push(urgent(format!(
                "Exam prep: tackle the hardest {} topics first while there is time to ask for help.",
                course
            )));
        }
        Some(days) => {
            lines.push(urgent(format!(
                "Exam in {} days for {}: plan one unit per study block and revisit each weekly.",
                days, course
            )));
        }
        None => {
            lines.push(urgent(format!(
                "Exam for {} has no date yet: build a long-range plan and revisit units weekly.",
                course
            )));
        }
    }

    if let Some(summary) = focus
        .and_then(|f| f.content_summary.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        lines.push(Line::new(
            RecommendationTier::SyllabusStrategy,
            format!("{}{}", STRATEGY_PREFIX, summary),
        ));
    }

    lines
}

/// Spread topics over the remaining days, e.g. `Day 1: A, B; Day 2: C`
fn daily_plan(topics: &[&str], days: u32) -> String {
    let days = days.max(1) as usize;
    let per_day = topics.len().div_ceil(days).max(1);
    topics
        .chunks(per_day)
        .enumerate()
        .map(|(i, chunk)| format!("Day {}: {}", i + 1, chunk.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// One general line per level, used when no exam is coming up
fn performance_tier(level: PerformanceLevel) -> Vec<Line> {
    vec![Line::new(RecommendationTier::Base, performance_line(level))]
}

/// Guarantee a non-empty list before tips are mixed in
fn fill_failsafe(lines: &mut Vec<Line>) {
    if lines.is_empty() {
        lines.extend(
            FAILSAFE_LINES
                .iter()
                .map(|s| Line::new(RecommendationTier::Base, *s)),
        );
    }
}

fn performance_line(level: PerformanceLevel) -> &'static str {
    match level {
        PerformanceLevel::Excellent => {
            "Explore advanced topics and research opportunities beyond the syllabus."
        }
        PerformanceLevel::NeedsImprovement => {
            "Avoid building a backlog: revisit every lecture within a day of attending it."
        }
        PerformanceLevel::Good | PerformanceLevel::Average => {
            "Stay consistent: steady daily study beats last-minute cramming."
        }
    }
}

fn demo_exam() -> (Vec<ExamRef>, Vec<FocusArea>) {
    let exam = ExamRef {
        course: DEMO_COURSE.to_string(),
        date: None,
        days_remaining: Some(5),
        total_marks: Some(100.0),
    };
    let focus = FocusArea {
        course: DEMO_COURSE.to_string(),
        topics: vec![
            "Core definitions".to_string(),
            "Worked examples".to_string(),
            "Past paper questions".to_string(),
        ],
        content_summary: Some("Work through the units in order and self-test after each one.".to_string()),
    };
    (vec![exam], vec![focus])
}
