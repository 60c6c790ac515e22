//! Truth table enumeration.
//!
//! The distinct input labels of a circuit, sorted lexicographically, are its
//! variables. Row `mask` assigns variable `i` the bit `(mask >> (n-1-i)) & 1`,
//! forcing every input node that carries the label, and records the outputs.
//! Enumeration is refused above a configurable number of variables to bound
//! the `2^n` growth.
//!
//! ```
//! use logic_rs::gate::GateType;
//! use logic_rs::graph::Graph;
//! use logic_rs::table::enumerate_truth_table;
//!
//! let mut builder = Graph::builder();
//! let a = builder.input("a", "A");
//! let b = builder.input("b", "B");
//! let g = builder.gate("g", GateType::Xor);
//! let y = builder.output("y", "Y");
//! builder.connect(&a, &g).connect(&b, &g).connect(&g, &y);
//!
//! let table = enumerate_truth_table(&builder.build(), 6).unwrap();
//! assert_eq!(table.rows.len(), 4);
//! assert_eq!(table.minterms("Y"), vec![1, 2]);
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::{Display, Formatter};

use log::debug;
use serde::Serialize;

use crate::alias::Variables;
use crate::error::AnalysisError;
use crate::eval::{evaluate_ordered, topological_order, OutputMap};
use crate::graph::{Graph, NodeId};

/// Variable label to bit, in variable order.
pub type Assignment = BTreeMap<String, bool>;

/// Hard cap on enumerated variables, whatever `max_inputs` says.
///
/// A table over `n` variables holds `2^n` rows, each with its own maps, so
/// 20 variables already mean a million rows.
pub const MAX_VARIABLES: usize = 20;

/// Non-fatal reasons for returning a table without rows.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TableWarning {
    NoInputs,
    #[serde(rename_all = "camelCase")]
    CapacityExceeded { inputs: usize, max_inputs: usize },
}

impl Display for TableWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TableWarning::NoInputs => write!(f, "The circuit has no inputs"),
            TableWarning::CapacityExceeded { inputs, max_inputs } => write!(
                f,
                "The circuit has {} distinct inputs, more than the limit of {}; consider splitting it into smaller sub-circuits",
                inputs, max_inputs
            ),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Row {
    pub inputs: Assignment,
    pub outputs: OutputMap,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruthTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<TableWarning>,
    pub input_names: Vec<String>,
    pub output_names: Vec<String>,
    /// Row `i` holds the assignment encoded by index `i`.
    pub rows: Vec<Row>,
}

impl TruthTable {
    pub fn num_vars(&self) -> usize {
        self.input_names.len()
    }

    /// Row indices where `output` is 1.
    pub fn minterms(&self, output: &str) -> Vec<u64> {
        self.indices_where(output, true)
    }

    /// Row indices where `output` is 0.
    pub fn maxterms(&self, output: &str) -> Vec<u64> {
        self.indices_where(output, false)
    }

    fn indices_where(&self, output: &str, bit: bool) -> Vec<u64> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.outputs.get(output) == Some(&bit))
            .map(|(i, _)| i as u64)
            .collect()
    }
}

/// Enumerates every input combination of `graph`.
///
/// Returns a table with a warning and no rows when the graph has no inputs or
/// more than `max_inputs` distinct input labels. `max_inputs` is clamped to
/// [`MAX_VARIABLES`]. A cycle aborts the whole enumeration.
pub fn enumerate_truth_table(graph: &Graph, max_inputs: usize) -> Result<TruthTable, AnalysisError> {
    let variables = Variables::of(graph);
    let input_names: Vec<String> = variables.names().map(str::to_string).collect();
    let output_names: Vec<String> = graph
        .outputs()
        .map(|node| node.name().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let n = variables.len();
    debug!(
        "enumerate_truth_table(inputs = {:?}, outputs = {:?}, max_inputs = {})",
        input_names, output_names, max_inputs
    );

    let empty = |warning| TruthTable {
        warning: Some(warning),
        input_names: input_names.clone(),
        output_names: output_names.clone(),
        rows: Vec::new(),
    };
    if n == 0 {
        return Ok(empty(TableWarning::NoInputs));
    }
    let limit = max_inputs.min(MAX_VARIABLES);
    if n > limit {
        return Ok(empty(TableWarning::CapacityExceeded {
            inputs: n,
            max_inputs: limit,
        }));
    }

    let adjacency = graph.adjacency();
    let order = topological_order(graph, &adjacency)?;

    let mut rows = Vec::with_capacity(1 << n);
    let mut overrides: HashMap<NodeId, bool> = HashMap::new();
    for mask in 0..(1u64 << n) {
        let mut inputs = Assignment::new();
        for (i, (name, ids)) in variables.iter().enumerate() {
            let bit = (mask >> (n - 1 - i)) & 1 == 1;
            for id in ids {
                overrides.insert(id.clone(), bit);
            }
            inputs.insert(name.to_string(), bit);
        }
        let outputs = evaluate_ordered(graph, &adjacency, &order, &overrides);
        rows.push(Row { inputs, outputs });
    }

    Ok(TruthTable {
        warning: None,
        input_names,
        output_names,
        rows,
    })
}
