//! # logic-rs: Combinational logic analysis in Rust
//!
//! **`logic-rs`** analyses combinational circuits given as directed graphs of
//! inputs, constants, logic gates and outputs. It evaluates them, enumerates
//! their truth tables, derives canonical sum-of-products (SOP) and
//! product-of-sums (POS) forms, and minimizes those with Quine–McCluskey.
//!
//! ## Pipeline
//!
//! Data flows one way:
//!
//! ```text
//! Graph -> evaluate -> truth table -> canonical SOP/POS -> minimized SOP/POS -> normalized text
//! ```
//!
//! - **[`graph`]**: typed nodes and edges, built in code or from an editor [`description`].
//! - **[`eval`]**: cycle detection (Kahn's algorithm) and deterministic evaluation.
//! - **[`table`]**: exhaustive enumeration over the distinct input labels.
//! - **[`canonical`]**: SOP from minterms, POS from maxterms.
//! - **[`minimize`]**: prime implicants, essential primes, greedy covering.
//! - **[`normalize`]**: literal and term deduplication with stable ordering.
//! - **[`analysis`]**: everything above in one call.
//!
//! All operations are pure functions over immutable inputs. The same graph
//! always yields the same outputs, rows and expression text.
//!
//! ## Basic Usage
//!
//! ```rust
//! use logic_rs::analysis::analyze;
//! use logic_rs::config::AnalysisConfig;
//! use logic_rs::gate::GateType;
//! use logic_rs::graph::Graph;
//!
//! // 1. Build a circuit: Y = NOT(A AND B)
//! let mut builder = Graph::builder();
//! let a = builder.input("a", "A");
//! let b = builder.input("b", "B");
//! let g = builder.gate("g", GateType::Nand);
//! let y = builder.output("y", "Y");
//! builder.connect(&a, &g).connect(&b, &g).connect(&g, &y);
//! let graph = builder.build();
//!
//! // 2. Analyse it
//! let analysis = analyze(&graph, &AnalysisConfig::default()).unwrap();
//! let forms = analysis.output("Y").unwrap();
//!
//! assert_eq!(forms.minterms, vec![0, 1, 2]);
//! assert_eq!(forms.minimized_sop, "A' + B'");
//! assert_eq!(forms.minimized_pos, "(A' + B')");
//! ```
//!
//! ## Bit order
//!
//! Variables are the distinct input labels in lexicographic order. In a row
//! index over `n` variables, the first variable is the most significant bit.

pub mod alias;
pub mod analysis;
pub mod canonical;
pub mod config;
pub mod description;
pub mod error;
pub mod eval;
pub mod expr;
pub mod gate;
pub mod graph;
pub mod implicant;
pub mod minimize;
pub mod normalize;
pub mod table;

pub use error::AnalysisError;
