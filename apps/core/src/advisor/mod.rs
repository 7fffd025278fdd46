//! # Advisor Module
//!
//! Student performance analysis and ranked study advice.

pub mod courses;
pub mod performance;
pub mod recommendations;

pub use courses::{course_recommendations, improvement_areas, overall_suggestion, ImprovementArea, Priority};
pub use performance::{
    grade_points, DefaultPolicy, Metric, PerformanceAnalyzer, PerformanceLevel, PerformanceProfile,
};
pub use recommendations::{RecommendationEngine, RecommendationOutcome, RecommendationTier};
