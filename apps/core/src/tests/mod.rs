//! Test Module
//!
//! Cross-module test suite for the studymap core.
//!
//! ## Test Categories
//! - `mindmap_tests`: topic extraction, keyword ranking, complexity and graph shape
//! - `advisor_tests`: performance aggregation and recommendation ordering
//! - `integration_tests`: full request workflows through the service
