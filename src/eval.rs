//! Topological evaluation of a circuit.
//!
//! Nodes are ordered with Kahn's algorithm: zero in-degree nodes are queued,
//! and processing a node releases its successors once all their incoming
//! edges are consumed. If fewer nodes are ordered than the graph holds, the
//! graph has a cycle and evaluation fails without any partial result.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use logic_rs::eval::evaluate;
//! use logic_rs::gate::GateType;
//! use logic_rs::graph::{Graph, NodeId};
//!
//! let mut builder = Graph::builder();
//! let a = builder.input("a", "A");
//! let b = builder.input("b", "B");
//! let g = builder.gate("g", GateType::And);
//! let y = builder.output("y", "Y");
//! builder.connect(&a, &g).connect(&b, &g).connect(&g, &y);
//! let graph = builder.build();
//!
//! let overrides = HashMap::from([(a, true), (b, true)]);
//! let outputs = evaluate(&graph, &overrides).unwrap();
//! assert_eq!(outputs["Y"], true);
//! ```

use std::collections::{BTreeMap, HashMap, VecDeque};

use log::{debug, warn};

use crate::error::AnalysisError;
use crate::graph::{Adjacency, Graph, NodeId, NodeKind};

/// Final bit of every output, keyed by output label.
pub type OutputMap = BTreeMap<String, bool>;

/// Node positions in topological order, or the ids of the nodes left on a cycle.
pub fn topological_order(graph: &Graph, adjacency: &Adjacency) -> Result<Vec<usize>, AnalysisError> {
    let n = graph.len();
    let mut in_degree: Vec<usize> = adjacency.incoming.iter().map(Vec::len).collect();
    let mut queue: VecDeque<usize> = (0..n).filter(|&v| in_degree[v] == 0).collect();
    let mut order = Vec::with_capacity(n);

    while let Some(u) = queue.pop_front() {
        order.push(u);
        for &v in adjacency.outgoing[u].iter() {
            in_degree[v] -= 1;
            if in_degree[v] == 0 {
                queue.push_back(v);
            }
        }
    }

    if order.len() < n {
        let mut unordered: Vec<String> = (0..n)
            .filter(|&v| in_degree[v] > 0)
            .map(|v| graph.nodes()[v].id.to_string())
            .collect();
        unordered.sort();
        debug!("topological_order: cycle through {:?}", unordered);
        return Err(AnalysisError::CycleDetected { unordered });
    }

    Ok(order)
}

/// Evaluates the graph under the given input overrides.
///
/// Inputs take `overrides[id]` when present, their default bit otherwise.
/// Overrides naming non-input nodes are ignored.
pub fn evaluate(graph: &Graph, overrides: &HashMap<NodeId, bool>) -> Result<OutputMap, AnalysisError> {
    debug!("evaluate(nodes = {}, overrides = {})", graph.len(), overrides.len());
    let adjacency = graph.adjacency();
    let order = topological_order(graph, &adjacency)?;
    Ok(evaluate_ordered(graph, &adjacency, &order, overrides))
}

/// Evaluation over a precomputed topological order.
///
/// Lets the enumerator sort the graph once and reuse the order for every row.
pub(crate) fn evaluate_ordered(
    graph: &Graph,
    adjacency: &Adjacency,
    order: &[usize],
    overrides: &HashMap<NodeId, bool>,
) -> OutputMap {
    let nodes = graph.nodes();
    let mut values = vec![false; nodes.len()];

    for &v in order {
        let node = &nodes[v];
        let sources = &adjacency.incoming[v];
        values[v] = match node.kind {
            NodeKind::Input { default } => overrides.get(&node.id).copied().unwrap_or(default),
            NodeKind::Constant { value } => value,
            NodeKind::Gate { gate: Some(gate) } => {
                let mut inputs: Vec<bool> = sources.iter().map(|&u| values[u]).collect();
                if inputs.len() < gate.arity() {
                    warn!(
                        "gate '{}' has {} of {} inputs, missing ones read 0",
                        node.id,
                        inputs.len(),
                        gate.arity()
                    );
                    inputs.resize(gate.arity(), false);
                }
                gate.apply(&inputs)
            }
            NodeKind::Gate { gate: None } => false,
            NodeKind::Output => sources.first().map(|&u| values[u]).unwrap_or(false),
        };
    }

    let mut outputs: Vec<(&str, &NodeId, usize)> = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.is_output())
        .map(|(v, node)| (node.name(), &node.id, v))
        .collect();
    outputs.sort();

    let mut result = OutputMap::new();
    for (name, _, v) in outputs {
        // Outputs sharing a label: the one with the smallest id wins.
        result.entry(name.to_string()).or_insert(values[v]);
    }
    result
}
