//! Typed circuit graph.
//!
//! A circuit is a directed graph whose nodes are inputs, constants, gates and
//! outputs, connected by edges from a source node to a target node. Every node
//! kind carries only the fields valid for that kind, see [`NodeKind`].
//!
//! # Example
//!
//! ```
//! use logic_rs::gate::GateType;
//! use logic_rs::graph::Graph;
//!
//! let mut builder = Graph::builder();
//! let a = builder.input("a", "A");
//! let b = builder.input("b", "B");
//! let g = builder.gate("g", GateType::And);
//! let y = builder.output("y", "Y");
//! builder.connect(&a, &g).connect(&b, &g).connect(&g, &y);
//! let graph = builder.build();
//!
//! assert_eq!(graph.len(), 4);
//! assert_eq!(graph.edges().len(), 3);
//! ```

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use log::warn;
use serde::Serialize;

use crate::error::AnalysisError;
use crate::gate::GateType;

/// Unique node identifier, as assigned by the editor.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId::new(id)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum NodeKind {
    /// Primary input with its default bit, used when no override is given.
    Input { default: bool },
    /// Fixed bit, never overridden.
    Constant { value: bool },
    /// Logic gate. `None` marks an unrecognised gate type, which evaluates to 0.
    Gate { gate: Option<GateType> },
    /// Circuit output, driven by its single incoming edge.
    Output,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// Logical name. Several inputs may share a label and then denote the same variable.
    pub label: String,
    pub kind: NodeKind,
}

impl Node {
    pub fn is_input(&self) -> bool {
        matches!(self.kind, NodeKind::Input { .. })
    }

    pub fn is_output(&self) -> bool {
        matches!(self.kind, NodeKind::Output)
    }

    /// Number of incoming edges the node expects, if any.
    pub fn arity(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Input { .. } | NodeKind::Constant { .. } => Some(0),
            NodeKind::Gate { gate } => gate.map(GateType::arity),
            NodeKind::Output => Some(1),
        }
    }

    /// The label, or the node id when the label is blank.
    pub fn name(&self) -> &str {
        if self.label.trim().is_empty() {
            self.id.as_str()
        } else {
            &self.label
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    /// Only used to order the inputs of a gate deterministically.
    pub target_port: Option<String>,
}

/// An immutable circuit graph.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index: HashMap<NodeId, usize>,
    duplicates: Vec<NodeId>,
}

impl Graph {
    /// Creates a graph from nodes and edges.
    ///
    /// Later nodes repeating an earlier id are dropped (and reported by [`Graph::validate`]).
    /// Edges are kept as given; dangling ones are ignored when adjacency is built.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        let mut kept = Vec::with_capacity(nodes.len());
        let mut duplicates = Vec::new();
        for node in nodes {
            if index.contains_key(&node.id) {
                warn!("dropping node with duplicate id '{}'", node.id);
                duplicates.push(node.id);
                continue;
            }
            index.insert(node.id.clone(), kept.len());
            kept.push(node);
        }
        Self {
            nodes: kept,
            edges,
            index,
            duplicates,
        }
    }

    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }
}

// Getters
impl Graph {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn position(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.position(id).map(|i| &self.nodes[i])
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_input())
    }

    pub fn outputs(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_output())
    }
}

/// In/out adjacency over node positions.
///
/// `incoming[v]` lists the source positions feeding `v`, sorted by
/// `(target_port, source id)`. `outgoing[u]` lists one entry per edge leaving `u`.
#[derive(Debug, Clone)]
pub struct Adjacency {
    pub incoming: Vec<Vec<usize>>,
    pub outgoing: Vec<Vec<usize>>,
}

impl Graph {
    pub fn adjacency(&self) -> Adjacency {
        let n = self.nodes.len();
        let mut incoming: Vec<Vec<(Option<&str>, &NodeId, usize)>> = vec![Vec::new(); n];
        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); n];

        for edge in self.edges.iter() {
            let (Some(u), Some(v)) = (self.position(&edge.source), self.position(&edge.target)) else {
                warn!("ignoring dangling edge {} -> {}", edge.source, edge.target);
                continue;
            };
            incoming[v].push((edge.target_port.as_deref(), &edge.source, u));
            outgoing[u].push(v);
        }

        let incoming = incoming
            .into_iter()
            .map(|mut sources| {
                sources.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
                sources.into_iter().map(|(_, _, u)| u).collect()
            })
            .collect();

        Adjacency { incoming, outgoing }
    }

    /// Checks the graph against the strict well-formedness rules.
    ///
    /// Rejects duplicate node ids, dangling edges, gates of unknown type,
    /// and nodes whose number of incoming edges differs from their arity.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if let Some(id) = self.duplicates.first() {
            return Err(AnalysisError::InvalidGraph(format!("duplicate node id '{}'", id)));
        }
        for edge in self.edges.iter() {
            for end in [&edge.source, &edge.target] {
                if self.position(end).is_none() {
                    return Err(AnalysisError::InvalidGraph(format!(
                        "edge {} -> {} references missing node '{}'",
                        edge.source, edge.target, end
                    )));
                }
            }
        }
        let adjacency = self.adjacency();
        for (node, sources) in self.nodes.iter().zip(adjacency.incoming.iter()) {
            let Some(arity) = node.arity() else {
                return Err(AnalysisError::InvalidGraph(format!(
                    "gate '{}' has unknown gate type",
                    node.id
                )));
            };
            if sources.len() != arity {
                return Err(AnalysisError::InvalidGraph(format!(
                    "node '{}' expects {} incoming edge(s), found {}",
                    node.id,
                    arity,
                    sources.len()
                )));
            }
        }
        Ok(())
    }
}

/// Incremental construction of a [`Graph`] in code.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    pub fn node(&mut self, id: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> NodeId {
        let id = NodeId::new(id);
        self.nodes.push(Node {
            id: id.clone(),
            label: label.into(),
            kind,
        });
        id
    }

    /// Adds an input defaulting to 0.
    pub fn input(&mut self, id: impl Into<String>, label: impl Into<String>) -> NodeId {
        self.node(id, label, NodeKind::Input { default: false })
    }

    pub fn input_with_default(&mut self, id: impl Into<String>, label: impl Into<String>, default: bool) -> NodeId {
        self.node(id, label, NodeKind::Input { default })
    }

    pub fn constant(&mut self, id: impl Into<String>, value: bool) -> NodeId {
        let label = if value { "1" } else { "0" };
        self.node(id, label, NodeKind::Constant { value })
    }

    pub fn gate(&mut self, id: impl Into<String>, gate: GateType) -> NodeId {
        self.node(id, gate.name(), NodeKind::Gate { gate: Some(gate) })
    }

    pub fn output(&mut self, id: impl Into<String>, label: impl Into<String>) -> NodeId {
        self.node(id, label, NodeKind::Output)
    }

    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> &mut Self {
        self.edges.push(Edge {
            source: source.clone(),
            target: target.clone(),
            target_port: None,
        });
        self
    }

    pub fn connect_port(&mut self, source: &NodeId, target: &NodeId, port: impl Into<String>) -> &mut Self {
        self.edges.push(Edge {
            source: source.clone(),
            target: target.clone(),
            target_port: Some(port.into()),
        });
        self
    }

    pub fn build(self) -> Graph {
        Graph::new(self.nodes, self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn id(s: &str) -> NodeId {
        NodeId::new(s)
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let mut builder = Graph::builder();
        builder.input("a", "A");
        builder.input("a", "B");
        let graph = builder.build();
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.node(&id("a")).map(|n| n.label.as_str()), Some("A"));
        assert!(graph.validate().is_err());
    }

    #[test]
    fn test_adjacency_orders_by_port_then_source() {
        let mut builder = Graph::builder();
        let a = builder.input("a", "A");
        let b = builder.input("b", "B");
        let c = builder.input("c", "C");
        let g = builder.gate("g", GateType::And);
        builder
            .connect_port(&c, &g, "1")
            .connect_port(&a, &g, "2")
            .connect_port(&b, &g, "1");
        let graph = builder.build();
        let adjacency = graph.adjacency();
        let g = graph.position(&g).unwrap();
        let names: Vec<_> = adjacency.incoming[g].iter().map(|&u| graph.nodes()[u].id.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
    }

    #[test]
    fn test_dangling_edge_ignored() {
        let mut builder = Graph::builder();
        let a = builder.input("a", "A");
        let y = builder.output("y", "Y");
        builder.connect(&id("ghost"), &y).connect(&a, &y);
        let graph = builder.build();
        let adjacency = graph.adjacency();
        assert_eq!(adjacency.incoming[1], vec![0]);
        assert_eq!(adjacency.outgoing[0], vec![1]);
        assert!(matches!(graph.validate(), Err(AnalysisError::InvalidGraph(_))));
    }

    #[test]
    fn test_validate_arity() {
        let mut builder = Graph::builder();
        let a = builder.input("a", "A");
        let g = builder.gate("g", GateType::And);
        let y = builder.output("y", "Y");
        builder.connect(&a, &g).connect(&g, &y);
        let graph = builder.build();
        let err = graph.validate().unwrap_err();
        assert!(err.to_string().contains("expects 2"), "{}", err);
    }

    #[test]
    fn test_validate_ok() {
        let mut builder = Graph::builder();
        let a = builder.input("a", "A");
        let g = builder.gate("g", GateType::Not);
        let y = builder.output("y", "Y");
        builder.connect(&a, &g).connect(&g, &y);
        assert!(builder.build().validate().is_ok());
    }

    #[test]
    fn test_blank_label_falls_back_to_id() {
        let mut builder = Graph::builder();
        builder.input("in0", "  ");
        let graph = builder.build();
        assert_eq!(graph.nodes()[0].name(), "in0");
    }
}
