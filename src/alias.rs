//! Resolution of physical input nodes to logical variables.
//!
//! Several input nodes may carry the same label; they denote one variable and
//! must always be forced to the same bit. [`Variables`] groups node ids under
//! their label once, before any enumeration, so evaluation never sees aliasing.

use std::collections::BTreeMap;

use log::warn;

use crate::graph::{Graph, NodeId, NodeKind};

/// Distinct input variables of a graph, in canonical (lexicographic) order.
///
/// Position `i` in this order is the `i`-th most significant bit of a row index.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Variables {
    groups: BTreeMap<String, Vec<NodeId>>,
}

impl Variables {
    pub fn of(graph: &Graph) -> Self {
        let mut groups: BTreeMap<String, Vec<NodeId>> = BTreeMap::new();
        for node in graph.inputs() {
            groups.entry(node.name().to_string()).or_default().push(node.id.clone());
        }
        for ids in groups.values_mut() {
            ids.sort();
        }
        for node in graph.nodes() {
            if let NodeKind::Constant { value } = node.kind {
                if groups.contains_key(node.name()) {
                    warn!(
                        "constant '{}' shares label '{}' with an input but keeps its fixed value {}",
                        node.id,
                        node.name(),
                        u8::from(value)
                    );
                }
            }
        }
        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Physical node ids sharing the given label.
    pub fn nodes(&self, name: &str) -> &[NodeId] {
        self.groups.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Variables paired with their physical nodes, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NodeId])> {
        self.groups.iter().map(|(name, ids)| (name.as_str(), ids.as_slice()))
    }
}
