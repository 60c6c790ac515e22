//! Loose graph descriptions as emitted by the circuit editor.
//!
//! The editor ships plain records:
//!
//! ```text
//! { "nodes": [ { "id", "kind", "label", "gateType"?, "value"? } ],
//!   "edges": [ { "source", "target", "targetPort"? } ] }
//! ```
//!
//! [`GraphDescription::into_graph`] turns them into a typed [`Graph`]. In
//! lenient mode malformed records fall back to 0-valued defaults with a
//! warning; in strict mode they are rejected.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AnalysisError;
use crate::gate::GateType;
use crate::graph::{Edge, Graph, Node, NodeId, NodeKind};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDescription {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,
    pub kind: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_port: Option<Value>,
}

impl GraphDescription {
    pub fn from_json(text: &str) -> Result<Self, AnalysisError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn into_graph(self, strict: bool) -> Result<Graph, AnalysisError> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for record in self.nodes {
            match record.into_node(strict)? {
                Some(node) => nodes.push(node),
                None => continue,
            }
        }
        let edges = self.edges.into_iter().map(EdgeRecord::into_edge).collect();
        let graph = Graph::new(nodes, edges);
        if strict {
            graph.validate()?;
        }
        Ok(graph)
    }
}

impl NodeRecord {
    fn into_node(self, strict: bool) -> Result<Option<Node>, AnalysisError> {
        let kind = match self.kind.to_ascii_lowercase().as_str() {
            "input" => NodeKind::Input {
                default: coerce_bit(&self.id, self.value.as_ref(), strict)?,
            },
            "constant" => {
                if strict && self.value.is_none() {
                    return Err(AnalysisError::InvalidGraph(format!("constant '{}' has no value", self.id)));
                }
                NodeKind::Constant {
                    value: coerce_bit(&self.id, self.value.as_ref(), strict)?,
                }
            }
            "gate" => NodeKind::Gate {
                gate: parse_gate(&self.id, self.gate_type.as_deref(), strict)?,
            },
            "output" => NodeKind::Output,
            other => {
                if strict {
                    return Err(AnalysisError::UnknownNodeKind(other.to_string()));
                }
                warn!("skipping node '{}' of unknown kind '{}'", self.id, other);
                return Ok(None);
            }
        };
        Ok(Some(Node {
            id: NodeId::new(self.id),
            label: self.label,
            kind,
        }))
    }
}

impl EdgeRecord {
    fn into_edge(self) -> Edge {
        let target_port = self.target_port.and_then(|port| match port {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => Some(other.to_string()),
        });
        Edge {
            source: NodeId::new(self.source),
            target: NodeId::new(self.target),
            target_port,
        }
    }
}

/// Coerces a loose `value` to a bit: booleans as-is, non-zero numbers and
/// `"1"`/`"true"` strings to 1, absent values to 0.
fn coerce_bit(id: &str, value: Option<&Value>, strict: bool) -> Result<bool, AnalysisError> {
    let bit = match value {
        None | Some(Value::Null) => Some(false),
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::Number(n)) => n.as_f64().map(|x| x != 0.0),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" => Some(true),
            "0" | "false" | "" => Some(false),
            _ => None,
        },
        Some(_) => None,
    };
    match bit {
        Some(bit) => Ok(bit),
        None if strict => Err(AnalysisError::InvalidGraph(format!(
            "node '{}' has non-binary value {}",
            id,
            value.map(Value::to_string).unwrap_or_default()
        ))),
        None => {
            warn!("node '{}' has non-binary value, using 0", id);
            Ok(false)
        }
    }
}

fn parse_gate(id: &str, gate_type: Option<&str>, strict: bool) -> Result<Option<GateType>, AnalysisError> {
    match gate_type.map(str::parse::<GateType>) {
        Some(Ok(gate)) => Ok(Some(gate)),
        Some(Err(msg)) if strict => Err(AnalysisError::InvalidGraph(format!("gate '{}': {}", id, msg))),
        None if strict => Err(AnalysisError::InvalidGraph(format!("gate '{}' has no gate type", id))),
        _ => {
            warn!("gate '{}' has unknown gate type {:?}, evaluating to 0", id, gate_type);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use test_log::test;

    use crate::eval::evaluate;

    const HALF_ADDER: &str = r#"{
        "nodes": [
            { "id": "a", "kind": "input", "label": "A", "value": 1 },
            { "id": "b", "kind": "Input", "label": "B", "value": false },
            { "id": "x", "kind": "gate", "label": "", "gateType": "xor" },
            { "id": "c", "kind": "gate", "label": "", "gateType": "AND" },
            { "id": "s", "kind": "output", "label": "S" },
            { "id": "co", "kind": "output", "label": "C" }
        ],
        "edges": [
            { "source": "a", "target": "x", "targetPort": 0 },
            { "source": "b", "target": "x", "targetPort": 1 },
            { "source": "a", "target": "c", "targetPort": "in1" },
            { "source": "b", "target": "c", "targetPort": "in2" },
            { "source": "x", "target": "s" },
            { "source": "c", "target": "co" }
        ]
    }"#;

    #[test]
    fn test_parse_half_adder() {
        let graph = GraphDescription::from_json(HALF_ADDER)
            .and_then(|d| d.into_graph(true))
            .unwrap();
        assert_eq!(graph.len(), 6);
        assert_eq!(graph.edges().len(), 6);
        assert_eq!(graph.edges()[0].target_port.as_deref(), Some("0"));
        let a = graph.node(&NodeId::new("a")).unwrap();
        assert_eq!(a.kind, NodeKind::Input { default: true });
        let x = graph.node(&NodeId::new("x")).unwrap();
        assert_eq!(x.kind, NodeKind::Gate { gate: Some(GateType::Xor) });
    }

    #[test]
    fn test_lenient_unknown_gate() {
        let text = r#"{ "nodes": [ { "id": "g", "kind": "gate", "gateType": "MAJ" } ] }"#;
        let graph = GraphDescription::from_json(text).unwrap().into_graph(false).unwrap();
        assert_eq!(graph.nodes()[0].kind, NodeKind::Gate { gate: None });
    }

    #[test]
    fn test_strict_unknown_gate() {
        let text = r#"{ "nodes": [ { "id": "g", "kind": "gate", "gateType": "MAJ" } ] }"#;
        let err = GraphDescription::from_json(text).unwrap().into_graph(true).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidGraph(_)));
    }

    #[test]
    fn test_unknown_kind() {
        let text = r#"{ "nodes": [ { "id": "w", "kind": "wire" } ] }"#;
        let lenient = GraphDescription::from_json(text).unwrap().into_graph(false).unwrap();
        assert!(lenient.is_empty());
        let strict = GraphDescription::from_json(text).unwrap().into_graph(true);
        assert!(matches!(strict, Err(AnalysisError::UnknownNodeKind(k)) if k == "wire"));
    }

    #[test]
    fn test_coerce_bit() {
        assert!(coerce_bit("n", Some(&Value::from(2)), true).unwrap());
        assert!(!coerce_bit("n", Some(&Value::from(0.0)), true).unwrap());
        assert!(coerce_bit("n", Some(&Value::from("true")), true).unwrap());
        assert!(!coerce_bit("n", None, true).unwrap());
        assert!(coerce_bit("n", Some(&Value::from("maybe")), true).is_err());
        assert!(!coerce_bit("n", Some(&Value::from("maybe")), false).unwrap());
    }

    #[test]
    fn test_numeric_ports_compare_as_text() {
        // Port 10 becomes "10", which sorts before "9": b feeds the NOT gate first.
        let text = r#"{
            "nodes": [
                { "id": "a", "kind": "input", "label": "A" },
                { "id": "b", "kind": "input", "label": "B" },
                { "id": "n", "kind": "gate", "gateType": "NOT" },
                { "id": "y", "kind": "output", "label": "Y" }
            ],
            "edges": [
                { "source": "a", "target": "n", "targetPort": 9 },
                { "source": "b", "target": "n", "targetPort": 10 },
                { "source": "n", "target": "y" }
            ]
        }"#;
        let graph = GraphDescription::from_json(text).unwrap().into_graph(false).unwrap();
        let n = graph.position(&NodeId::new("n")).unwrap();
        let b = graph.position(&NodeId::new("b")).unwrap();
        assert_eq!(graph.adjacency().incoming[n][0], b);

        let overrides = HashMap::from([(NodeId::new("a"), false), (NodeId::new("b"), true)]);
        assert!(!evaluate(&graph, &overrides).unwrap()["Y"]);
    }

    #[test]
    fn test_malformed_json() {
        let err = GraphDescription::from_json("{ nodes: ").unwrap_err();
        assert!(matches!(err, AnalysisError::Description(_)));
    }
}
