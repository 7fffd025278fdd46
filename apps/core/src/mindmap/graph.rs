//! Mindmap graph data structures.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

use crate::text::TopicKind;

/// Id of the root node every mindmap is anchored at
pub const CENTRAL_NODE_ID: &str = "central";
pub const CENTRAL_NODE_LABEL: &str = "Course Overview";

/// Node type as rendered by the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Central,
    Keyword,
    Unit,
    Topic,
    General,
    Introduction,
    Theory,
    Practical,
    Advanced,
    Assessment,
}

impl From<TopicKind> for NodeKind {
    fn from(kind: TopicKind) -> Self {
        match kind {
            // the implicit overview renders as an ordinary unit
            TopicKind::Unit | TopicKind::Overview => NodeKind::Unit,
            TopicKind::Topic => NodeKind::Topic,
            TopicKind::General => NodeKind::General,
            TopicKind::Introduction => NodeKind::Introduction,
            TopicKind::Theory => NodeKind::Theory,
            TopicKind::Practical => NodeKind::Practical,
            TopicKind::Advanced => NodeKind::Advanced,
            TopicKind::Assessment => NodeKind::Assessment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Depth below the central node
    pub level: u8,
    pub content: String,
}

/// Directed edge, parent to child
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

/// Counts reported alongside the graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindmapMetadata {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub topics_count: usize,
    pub keywords_count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MindmapGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub metadata: MindmapMetadata,
    /// Node id to position in `nodes`; rebuilt when out of sync (e.g. after deserializing)
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl PartialEq for MindmapGraph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.edges == other.edges && self.metadata == other.metadata
    }
}

impl Eq for MindmapGraph {}

impl MindmapGraph {
    /// Graph holding only the central node
    pub fn with_central() -> Self {
        let mut graph = Self::default();
        graph.add_node(Node {
            id: CENTRAL_NODE_ID.to_string(),
            label: CENTRAL_NODE_LABEL.to_string(),
            kind: NodeKind::Central,
            level: 0,
            content: String::new(),
        });
        graph
    }

    /// Add a node; returns false (and leaves the graph unchanged) if the id exists
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.index.len() != self.nodes.len() {
            self.rebuild_index();
        }
        if self.index.contains_key(&node.id) {
            return false;
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
    }

    pub fn add_edge(&mut self, source: &str, target: &str) {
        self.edges.push(Edge {
            source: source.to_string(),
            target: target.to_string(),
        });
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        if self.index.len() == self.nodes.len() {
            return self.index.get(id).map(|&i| &self.nodes[i]);
        }
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Ids of the direct children of a node, in edge order
    pub fn children(&self, id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.source == id)
            .map(|e| e.target.as_str())
            .collect()
    }

    /// True when every node other than the central one has exactly one parent edge,
    /// every edge joins known nodes, and everything is reachable from the central node.
    pub fn is_rooted_tree(&self) -> bool {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        if ids.len() != self.nodes.len() || !ids.contains(CENTRAL_NODE_ID) {
            return false;
        }

        let mut parents: HashMap<&str, usize> = HashMap::new();
        for edge in &self.edges {
            if !ids.contains(edge.source.as_str()) || !ids.contains(edge.target.as_str()) {
                return false;
            }
            *parents.entry(edge.target.as_str()).or_insert(0) += 1;
        }
        if parents.contains_key(CENTRAL_NODE_ID) {
            return false;
        }
        let single_parent = self
            .nodes
            .iter()
            .filter(|n| n.id != CENTRAL_NODE_ID)
            .all(|n| parents.get(n.id.as_str()) == Some(&1));
        if !single_parent {
            return false;
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue = VecDeque::from([CENTRAL_NODE_ID]);
        while let Some(id) = queue.pop_front() {
            if seen.insert(id) {
                queue.extend(self.children(id));
            }
        }
        seen.len() == self.nodes.len()
    }

    pub(crate) fn refresh_metadata(&mut self, topics_count: usize, keywords_count: usize) {
        self.metadata = MindmapMetadata {
            total_nodes: self.nodes.len(),
            total_edges: self.edges.len(),
            topics_count,
            keywords_count,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, level: u8) -> Node {
        Node {
            id: id.to_string(),
            label: id.to_string(),
            kind: NodeKind::Topic,
            level,
            content: String::new(),
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut graph = MindmapGraph::with_central();
        assert!(graph.add_node(node("a", 1)));
        assert!(!graph.add_node(node("a", 2)));
        assert_eq!(graph.nodes.len(), 2);
    }

    #[test]
    fn test_large_graph_lookup_and_duplicates() {
        let mut graph = MindmapGraph::with_central();
        for i in 0..5000 {
            let id = format!("n{}", i);
            assert!(graph.add_node(node(&id, 1)));
            graph.add_edge(CENTRAL_NODE_ID, &id);
        }
        assert!(!graph.add_node(node("n4999", 2)));
        assert!(!graph.add_node(node(CENTRAL_NODE_ID, 1)));
        assert_eq!(graph.nodes.len(), 5001);
        assert_eq!(graph.node("n2500").unwrap().level, 1);
        assert!(graph.node("n5000").is_none());
        assert!(graph.is_rooted_tree());
    }

    #[test]
    fn test_deserialized_graph_still_rejects_duplicates() {
        let mut original = MindmapGraph::with_central();
        original.add_node(node("a", 1));
        original.add_edge(CENTRAL_NODE_ID, "a");

        let json = serde_json::to_string(&original).unwrap();
        let mut restored: MindmapGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);
        assert_eq!(restored.node("a").unwrap().level, 1);
        assert!(!restored.add_node(node("a", 1)));
        assert!(restored.add_node(node("b", 1)));
        assert_eq!(restored.node("b").unwrap().id, "b");
    }

    #[test]
    fn test_overview_topic_renders_as_unit() {
        assert_eq!(NodeKind::from(TopicKind::Overview), NodeKind::Unit);
        assert_eq!(
            serde_json::to_value(NodeKind::from(TopicKind::Overview)).unwrap(),
            "unit"
        );
        assert_eq!(NodeKind::from(TopicKind::Practical), NodeKind::Practical);
    }

    #[test]
    fn test_rooted_tree_detection() {
        let mut graph = MindmapGraph::with_central();
        graph.add_node(node("a", 1));
        graph.add_node(node("b", 2));
        graph.add_edge(CENTRAL_NODE_ID, "a");
        graph.add_edge("a", "b");
        assert!(graph.is_rooted_tree());
        assert_eq!(graph.children(CENTRAL_NODE_ID), vec!["a"]);

        // second parent
        graph.add_edge(CENTRAL_NODE_ID, "b");
        assert!(!graph.is_rooted_tree());
    }

    #[test]
    fn test_orphan_breaks_tree() {
        let mut graph = MindmapGraph::with_central();
        graph.add_node(node("lonely", 1));
        assert!(!graph.is_rooted_tree());
    }

    #[test]
    fn test_cycle_breaks_tree() {
        let mut graph = MindmapGraph::with_central();
        graph.add_node(node("a", 1));
        graph.add_node(node("b", 1));
        graph.add_edge("a", "b");
        graph.add_edge("b", "a");
        assert!(!graph.is_rooted_tree());
    }
}
