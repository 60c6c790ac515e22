//! Property tests over random circuits and random Boolean functions.

use std::collections::{BTreeMap, HashMap};

use logic_rs::canonical::{pos, sop};
use logic_rs::eval::evaluate;
use logic_rs::expr::Expression;
use logic_rs::gate::GateType;
use logic_rs::graph::{Graph, NodeId};
use logic_rs::minimize::{minimize_pos, minimize_sop, minimize_sop_with_dont_cares};
use logic_rs::normalize::normalize;
use logic_rs::table::enumerate_truth_table;
use proptest::prelude::*;

const NAMES: [&str; 4] = ["A", "B", "C", "D"];

/// Random acyclic circuit: inputs drawn from a small label pool (so aliases
/// occur), gates wired only to earlier nodes, two outputs on the last nodes.
fn circuit() -> impl Strategy<Value = Graph> {
    (
        prop::collection::vec(0..NAMES.len(), 1..6),
        prop::collection::vec((0..GateType::ALL.len(), any::<prop::sample::Index>(), any::<prop::sample::Index>()), 1..8),
    )
        .prop_map(|(labels, gates)| {
            let mut builder = Graph::builder();
            let mut nodes: Vec<NodeId> = labels
                .iter()
                .enumerate()
                .map(|(i, &l)| builder.input(format!("in{}", i), NAMES[l]))
                .collect();
            for (i, (gate, x, y)) in gates.into_iter().enumerate() {
                let gate = GateType::ALL[gate];
                let id = builder.gate(format!("g{}", i), gate);
                builder.connect(x.get(nodes.as_slice()), &id);
                if gate.arity() == 2 {
                    builder.connect(y.get(nodes.as_slice()), &id);
                }
                nodes.push(id);
            }
            for (k, source) in nodes.iter().rev().take(2).enumerate() {
                let out = builder.output(format!("out{}", k), format!("Y{}", k));
                builder.connect(source, &out);
            }
            builder.build()
        })
}

/// Random Boolean function over 1..=4 variables, as its output column.
fn function() -> impl Strategy<Value = (usize, Vec<bool>)> {
    (1..=4usize).prop_flat_map(|n| (Just(n), prop::collection::vec(any::<bool>(), 1 << n)))
}

fn assignment(vars: &[&str], m: u64) -> BTreeMap<String, bool> {
    let n = vars.len();
    vars.iter()
        .enumerate()
        .map(|(i, v)| (v.to_string(), (m >> (n - 1 - i)) & 1 == 1))
        .collect()
}

fn split(column: &[bool]) -> (Vec<u64>, Vec<u64>) {
    let minterms = (0..column.len() as u64).filter(|&m| column[m as usize]).collect();
    let maxterms = (0..column.len() as u64).filter(|&m| !column[m as usize]).collect();
    (minterms, maxterms)
}

proptest! {
    #[test]
    fn evaluation_is_deterministic(graph in circuit(), bits in prop::collection::vec(any::<bool>(), 6)) {
        let overrides: HashMap<NodeId, bool> = graph
            .inputs()
            .zip(bits)
            .map(|(node, bit)| (node.id.clone(), bit))
            .collect();
        let first = evaluate(&graph, &overrides).unwrap();
        let second = evaluate(&graph, &overrides).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn row_count_is_two_to_the_labels(graph in circuit()) {
        let table = enumerate_truth_table(&graph, 6).unwrap();
        prop_assert!(table.warning.is_none());
        prop_assert_eq!(table.rows.len(), 1usize << table.input_names.len());
    }

    #[test]
    fn canonical_sop_reproduces_table(graph in circuit()) {
        let table = enumerate_truth_table(&graph, 6).unwrap();
        let vars: Vec<&str> = table.input_names.iter().map(String::as_str).collect();
        for output in table.output_names.iter() {
            let expr = Expression::parse(&sop(&table.minterms(output), &vars)).unwrap();
            for row in table.rows.iter() {
                prop_assert_eq!(expr.eval(&row.inputs).unwrap(), row.outputs[output]);
            }
        }
    }

    #[test]
    fn minimized_sop_is_equivalent_and_smaller((n, column) in function()) {
        let vars = &NAMES[..n];
        let (minterms, _) = split(&column);
        let canonical = Expression::parse(&sop(&minterms, vars)).unwrap();
        let minimized = Expression::parse(&minimize_sop(&minterms, vars)).unwrap();
        for m in 0..(1u64 << n) {
            let a = assignment(vars, m);
            prop_assert_eq!(minimized.eval(&a).unwrap(), canonical.eval(&a).unwrap());
        }
        prop_assert!(minimized.term_count() <= canonical.term_count());
        prop_assert!(minimized.literal_count() <= canonical.literal_count());
    }

    #[test]
    fn minimized_pos_is_equivalent_and_smaller((n, column) in function()) {
        let vars = &NAMES[..n];
        let (_, maxterms) = split(&column);
        let canonical = Expression::parse(&pos(&maxterms, vars)).unwrap();
        let minimized = Expression::parse(&minimize_pos(&maxterms, vars)).unwrap();
        for m in 0..(1u64 << n) {
            let a = assignment(vars, m);
            prop_assert_eq!(canonical.eval(&a).unwrap(), column[m as usize]);
            prop_assert_eq!(minimized.eval(&a).unwrap(), column[m as usize]);
        }
        prop_assert!(minimized.term_count() <= canonical.term_count());
        prop_assert!(minimized.literal_count() <= canonical.literal_count());
    }

    #[test]
    fn dont_cares_only_relax_unlisted_rows(
        (n, column) in function(),
        mask in prop::collection::vec(any::<bool>(), 16),
    ) {
        let vars = &NAMES[..n];
        let (minterms, maxterms) = split(&column);
        let dont_cares: Vec<u64> = maxterms.iter().copied().filter(|&m| mask[m as usize]).collect();
        let expr = Expression::parse(&minimize_sop_with_dont_cares(&minterms, &dont_cares, vars)).unwrap();
        for m in 0..(1u64 << n) {
            if !dont_cares.contains(&m) {
                prop_assert_eq!(expr.eval(&assignment(vars, m)).unwrap(), column[m as usize]);
            }
        }
    }

    #[test]
    fn normalization_is_idempotent((n, column) in function()) {
        let vars = &NAMES[..n];
        let (minterms, maxterms) = split(&column);
        for text in [sop(&minterms, vars), pos(&maxterms, vars), minimize_sop(&minterms, vars), minimize_pos(&maxterms, vars)] {
            let once = normalize(&text).unwrap();
            prop_assert_eq!(&once, &text);
            prop_assert_eq!(normalize(&once).unwrap(), once);
        }
    }
}
