//! # Mindmap Module
//!
//! Turns extracted syllabus topics into a central → unit → subtopic tree and
//! derives study suggestions from the analysis.

pub mod builder;
pub mod graph;
pub mod suggestions;

pub use builder::{KeywordLinkStrategy, MindmapBuilder};
pub use graph::{Edge, MindmapGraph, MindmapMetadata, Node, NodeKind, CENTRAL_NODE_ID};
pub use suggestions::study_suggestions;
