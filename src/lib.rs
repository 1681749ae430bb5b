//! Edit-cost models and a uniform method lifecycle for graph edit distance.
//!
//! gedcore provides the two pieces every graph edit distance method leans on:
//!
//! - **Cost models** ([`EditCosts`]) turning differences between node and
//!   edge [`Label`]s into insertion, deletion and relabelling costs. The
//!   [`GeometricCosts`] model handles mixed symbolic, coordinate and
//!   embedding attributes with metrics chosen by name at configuration time.
//! - **Method lifecycle** ([`GedMethod`]) giving every algorithm the same
//!   option string, timed `init`/`run` and bound/matching accessors.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use gedcore::{EditCosts, GeometricCosts, Label, config::config_map};
//! use serde_json::json;
//!
//! let mut costs = GeometricCosts::default();
//! costs.set_config(&config_map(json!({ "node_coord_metric": "euclidean" })).unwrap()).unwrap();
//! let costs: Arc<dyn EditCosts> = Arc::new(costs);
//!
//! let a = Label::new().with("coords", vec![0.0, 0.0]);
//! let b = Label::new().with("coords", vec![3.0, 4.0]);
//! assert_eq!(costs.node_rel_cost(&a, &b).unwrap(), 5.0);
//! ```
//!
//! A configured cost model is immutable and shared by reference across
//! threads. A [`GedMethod`] is not: use one per concurrent comparison.
//! Run Criterion benchmarks with `cargo bench` to inspect reports under `target/criterion`.

pub mod bench_utils;
pub mod config;
pub mod edit_costs;
pub mod errors;
pub mod graph;
pub mod label;
pub mod method;
pub mod metric;

pub use crate::config::{ConfigMap, EditCostsKind, GeometricConfig, build_edit_costs};
pub use crate::edit_costs::{
    ChemCosts, ConstantCosts, EditCosts, GeometricCosts, GeometricWeights, GrecCosts, LetterCosts,
    NonSymbolicCosts,
};
pub use crate::errors::GedError;
pub use crate::graph::{GedData, GedEdge, GedGraph, GraphId, NodeId};
pub use crate::label::{AttributeValue, Label};
pub use crate::method::{
    GedAlgorithm, GedMethod, MethodResult, MethodState, NodeMap, PairResult, ResultStore,
};
pub use crate::metric::{MetricConfig, MetricFn, MetricRegistry};
