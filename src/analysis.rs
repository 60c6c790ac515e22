//! Whole-circuit analysis.
//!
//! Runs the full pipeline on a graph: enumeration, then canonical and
//! minimized SOP/POS for every output.
//!
//! ```
//! use logic_rs::analysis::analyze_json;
//! use logic_rs::config::AnalysisConfig;
//!
//! let text = r#"{
//!     "nodes": [
//!         { "id": "a", "kind": "input", "label": "A" },
//!         { "id": "b", "kind": "input", "label": "B" },
//!         { "id": "g", "kind": "gate", "gateType": "OR" },
//!         { "id": "y", "kind": "output", "label": "Y" }
//!     ],
//!     "edges": [
//!         { "source": "a", "target": "g" },
//!         { "source": "b", "target": "g" },
//!         { "source": "g", "target": "y" }
//!     ]
//! }"#;
//! let analysis = analyze_json(text, &AnalysisConfig::default()).unwrap();
//! let y = &analysis.outputs[0];
//! assert_eq!(y.minimized_sop, "A + B");
//! assert_eq!(y.minimized_pos, "(A + B)");
//! ```

use log::debug;
use serde::Serialize;

use crate::canonical::{pos, sop};
use crate::config::AnalysisConfig;
use crate::description::GraphDescription;
use crate::error::AnalysisError;
use crate::graph::Graph;
use crate::minimize::{minimize_pos, minimize_sop};
use crate::table::{enumerate_truth_table, TruthTable};

/// Derived expressions for one output.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputForms {
    pub output: String,
    pub minterms: Vec<u64>,
    pub maxterms: Vec<u64>,
    pub sop: String,
    pub pos: String,
    pub minimized_sop: String,
    pub minimized_pos: String,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Analysis {
    pub table: TruthTable,
    /// One entry per output label, in table order. Empty when the table carries a warning.
    pub outputs: Vec<OutputForms>,
}

impl Analysis {
    pub fn output(&self, name: &str) -> Option<&OutputForms> {
        self.outputs.iter().find(|forms| forms.output == name)
    }
}

pub fn analyze(graph: &Graph, config: &AnalysisConfig) -> Result<Analysis, AnalysisError> {
    debug!("analyze(nodes = {}, config = {:?})", graph.len(), config);
    if config.strict {
        graph.validate()?;
    }
    let table = enumerate_truth_table(graph, config.max_inputs)?;
    if table.warning.is_some() {
        return Ok(Analysis {
            table,
            outputs: Vec::new(),
        });
    }

    let vars = &table.input_names;
    let outputs = table
        .output_names
        .iter()
        .map(|name| {
            let minterms = table.minterms(name);
            let maxterms = table.maxterms(name);
            OutputForms {
                output: name.clone(),
                sop: sop(&minterms, vars),
                pos: pos(&maxterms, vars),
                minimized_sop: minimize_sop(&minterms, vars),
                minimized_pos: minimize_pos(&maxterms, vars),
                minterms,
                maxterms,
            }
        })
        .collect();

    Ok(Analysis { table, outputs })
}

/// Parses an editor graph description and analyzes it.
pub fn analyze_json(text: &str, config: &AnalysisConfig) -> Result<Analysis, AnalysisError> {
    let graph = GraphDescription::from_json(text)?.into_graph(config.strict)?;
    analyze(&graph, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::gate::GateType;

    fn half_adder() -> Graph {
        let mut builder = Graph::builder();
        let a = builder.input("a", "A");
        let b = builder.input("b", "B");
        let x = builder.gate("x", GateType::Xor);
        let c = builder.gate("c", GateType::And);
        let s = builder.output("s", "S");
        let co = builder.output("co", "Cout");
        builder
            .connect(&a, &x)
            .connect(&b, &x)
            .connect(&a, &c)
            .connect(&b, &c)
            .connect(&x, &s)
            .connect(&c, &co);
        builder.build()
    }

    #[test]
    fn test_half_adder() {
        let analysis = analyze(&half_adder(), &AnalysisConfig::default()).unwrap();
        assert_eq!(analysis.table.output_names, ["Cout", "S"]);

        let s = analysis.output("S").unwrap();
        assert_eq!(s.minterms, vec![1, 2]);
        assert_eq!(s.sop, "A'·B + A·B'");
        assert_eq!(s.pos, "(A + B)(A' + B')");
        assert_eq!(s.minimized_sop, s.sop);

        let cout = analysis.output("Cout").unwrap();
        assert_eq!(cout.sop, "A·B");
        assert_eq!(cout.minimized_pos, "(A)(B)");
    }

    #[test]
    fn test_warning_skips_forms() {
        let config = AnalysisConfig::default().with_max_inputs(1);
        let analysis = analyze(&half_adder(), &config).unwrap();
        assert!(analysis.table.warning.is_some());
        assert!(analysis.outputs.is_empty());
    }

    #[test]
    fn test_strict_rejects_arity_mismatch() {
        let mut builder = Graph::builder();
        let a = builder.input("a", "A");
        let g = builder.gate("g", GateType::Or);
        let y = builder.output("y", "Y");
        builder.connect(&a, &g).connect(&g, &y);
        let graph = builder.build();

        assert!(analyze(&graph, &AnalysisConfig::default()).is_ok());
        let err = analyze(&graph, &AnalysisConfig::default().strict()).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidGraph(_)));
    }
}
