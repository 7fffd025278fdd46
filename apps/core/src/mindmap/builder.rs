//! Converts extracted topics into a mindmap tree.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::graph::{MindmapGraph, Node, NodeKind, CENTRAL_NODE_ID};
use crate::text::Topic;

/// Keywords attached as nodes by the legacy strategy
const MAX_LINKED_KEYWORDS: usize = 10;

/// Longest subtopic label, ellipsis included
pub const LABEL_MAX_CHARS: usize = 50;
const ELLIPSIS: &str = "...";

/// Optional graph augmentation with keyword nodes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordLinkStrategy {
    #[default]
    Disabled,
    /// Hang each keyword under the level-1 node whose content mentions it most,
    /// or under the central node when none does
    SubstringOverlap,
}

/// Builds the central → unit → subtopic tree
#[derive(Debug, Clone, Default)]
pub struct MindmapBuilder {
    keyword_links: KeywordLinkStrategy,
}

impl MindmapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keyword_links(mut self, strategy: KeywordLinkStrategy) -> Self {
        self.keyword_links = strategy;
        self
    }

    pub fn build(&self, topics: &[Topic], keywords: &[String]) -> MindmapGraph {
        let mut graph = MindmapGraph::with_central();

        for unit in topics {
            graph.add_node(Node {
                id: unit.id.clone(),
                label: unit.title.clone(),
                kind: unit.kind.into(),
                level: 1,
                content: unit.content.clone(),
            });
            graph.add_edge(CENTRAL_NODE_ID, &unit.id);

            for sub in &unit.subtopics {
                graph.add_node(Node {
                    id: sub.id.clone(),
                    label: subtopic_label(&sub.title),
                    kind: NodeKind::Topic,
                    level: 2,
                    content: sub.content.clone(),
                });
                graph.add_edge(&unit.id, &sub.id);
            }
        }

        if self.keyword_links == KeywordLinkStrategy::SubstringOverlap {
            link_keywords(&mut graph, topics, keywords);
        }

        graph.refresh_metadata(topics.len(), keywords.len());
        debug_assert!(graph.is_rooted_tree());
        debug!(
            "Mindmap built: {} nodes, {} edges",
            graph.metadata.total_nodes, graph.metadata.total_edges
        );

        graph
    }
}

/// Cut a subtopic title down to `LABEL_MAX_CHARS`, ending in "..." when shortened
fn subtopic_label(title: &str) -> String {
    if title.chars().count() <= LABEL_MAX_CHARS {
        return title.to_string();
    }
    let head: String = title
        .chars()
        .take(LABEL_MAX_CHARS - ELLIPSIS.len())
        .collect();
    format!("{}{}", head, ELLIPSIS)
}

fn link_keywords(graph: &mut MindmapGraph, topics: &[Topic], keywords: &[String]) {
    for keyword in keywords.iter().take(MAX_LINKED_KEYWORDS) {
        let needle = keyword.to_lowercase();
        if needle.is_empty() {
            continue;
        }

        // Strictly greater keeps the first best topic on ties
        let mut best: Option<(&str, usize)> = None;
        for topic in topics {
            let hits = topic.content.to_lowercase().matches(needle.as_str()).count();
            if hits > 0 && best.map_or(true, |(_, max)| hits > max) {
                best = Some((topic.id.as_str(), hits));
            }
        }

        let node_id = format!("keyword_{}", keyword);
        let added = graph.add_node(Node {
            id: node_id.clone(),
            label: keyword.clone(),
            kind: NodeKind::Keyword,
            level: 2,
            content: String::new(),
        });
        if added {
            let parent = best.map_or(CENTRAL_NODE_ID, |(id, _)| id);
            graph.add_edge(parent, &node_id);
        }
    }
}
