//! In-memory attributed graphs and the data context a method runs against.
//!
//! [`GedData`] bundles the graphs with one configured cost model. Methods
//! borrow it immutably, so any number of them can share one context.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::{edit_costs::EditCosts, errors::GedError, label::Label};

pub type GraphId = usize;
pub type NodeId = usize;

/// Undirected labelled edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GedEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub label: Label,
}

#[derive(Clone, Debug, Default)]
pub struct GedGraph {
    name: String,
    class: String,
    nodes: Vec<Label>,
    edges: Vec<GedEdge>,
    edge_index: AHashMap<(NodeId, NodeId), usize>,
}

fn edge_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl GedGraph {
    pub fn new<N: Into<String>, C: Into<String>>(name: N, class: C) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn add_node(&mut self, label: Label) -> NodeId {
        self.nodes.push(label);
        self.nodes.len() - 1
    }

    pub fn add_edge(&mut self, from: NodeId, to: NodeId, label: Label) -> Result<usize, GedError> {
        if from >= self.nodes.len() || to >= self.nodes.len() {
            return Err(GedError::invalid_input(format!(
                "edge ({from}, {to}) references a node outside 0..{}",
                self.nodes.len()
            )));
        }
        let key = edge_key(from, to);
        if self.edge_index.contains_key(&key) {
            return Err(GedError::invalid_input(format!(
                "duplicate edge ({from}, {to})"
            )));
        }
        self.edges.push(GedEdge { from, to, label });
        let idx = self.edges.len() - 1;
        self.edge_index.insert(key, idx);
        Ok(idx)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[Label] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GedEdge] {
        &self.edges
    }

    pub fn node_label(&self, node: NodeId) -> Option<&Label> {
        self.nodes.get(node)
    }

    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&GedEdge> {
        self.edge_index
            .get(&edge_key(a, b))
            .map(|&idx| &self.edges[idx])
    }

    pub fn is_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edge_index.contains_key(&edge_key(a, b))
    }
}

/// Graphs plus the cost model shared by every method bound to them.
#[derive(Clone)]
pub struct GedData {
    graphs: Vec<GedGraph>,
    edit_costs: Arc<dyn EditCosts>,
}

impl GedData {
    pub fn new(edit_costs: Arc<dyn EditCosts>) -> Self {
        Self {
            graphs: Vec::new(),
            edit_costs,
        }
    }

    pub fn add_graph(&mut self, graph: GedGraph) -> GraphId {
        self.graphs.push(graph);
        self.graphs.len() - 1
    }

    pub fn graph(&self, id: GraphId) -> Result<&GedGraph, GedError> {
        self.graphs.get(id).ok_or(GedError::GraphNotFound(id))
    }

    pub fn num_graphs(&self) -> usize {
        self.graphs.len()
    }

    pub fn graph_ids(&self) -> Range<GraphId> {
        0..self.graphs.len()
    }

    pub fn edit_costs(&self) -> &dyn EditCosts {
        self.edit_costs.as_ref()
    }

    pub fn shared_edit_costs(&self) -> Arc<dyn EditCosts> {
        Arc::clone(&self.edit_costs)
    }
}

impl fmt::Debug for GedData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GedData")
            .field("graphs", &self.graphs.len())
            .field("edit_costs", &self.edit_costs)
            .finish()
    }
}
