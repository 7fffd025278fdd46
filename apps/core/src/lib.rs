//! Syllabus mindmaps and student study recommendations.
//!
//! [`StudyAnalyzer`] runs the two pure pipelines; [`AdvisorService`] wraps it
//! with request validation and concurrent batch processing.

pub mod advisor;
pub mod analyzer;
pub mod config;
pub mod error;
pub mod mindmap;
pub mod models;
pub mod report;
pub mod service;
pub mod text;

pub use analyzer::StudyAnalyzer;
pub use config::AdvisorConfig;
pub use error::AppError;
pub use service::{load_json, AdvisorService};

#[cfg(test)]
mod tests;
