//! Partial node correspondence between two graphs.
//!
//! A node of the source graph either maps to a node of the target graph or is
//! deleted; target nodes without a pre-image are inserted. The default value
//! is the empty map methods report when they produce no matching.

use crate::{
    edit_costs::EditCosts,
    errors::GedError,
    graph::{GedGraph, NodeId},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeMap {
    forward: Vec<Option<NodeId>>,
    backward: Vec<Option<NodeId>>,
}

impl NodeMap {
    /// Map between graphs with `source_nodes` and `target_nodes` nodes, with
    /// every source node deleted and every target node inserted.
    pub fn new(source_nodes: usize, target_nodes: usize) -> Self {
        Self {
            forward: vec![None; source_nodes],
            backward: vec![None; target_nodes],
        }
    }

    pub fn for_graphs(g: &GedGraph, h: &GedGraph) -> Self {
        Self::new(g.num_nodes(), h.num_nodes())
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty() && self.backward.is_empty()
    }

    pub fn num_source_nodes(&self) -> usize {
        self.forward.len()
    }

    pub fn num_target_nodes(&self) -> usize {
        self.backward.len()
    }

    /// Records `source -> target`. `(Some(i), None)` deletes `i`,
    /// `(None, Some(k))` inserts `k`. Earlier assignments of either node are
    /// dropped.
    pub fn add_assignment(
        &mut self,
        source: Option<NodeId>,
        target: Option<NodeId>,
    ) -> Result<(), GedError> {
        if let Some(i) = source
            && i >= self.forward.len()
        {
            return Err(GedError::invalid_input(format!(
                "source node {i} out of range 0..{}",
                self.forward.len()
            )));
        }
        if let Some(k) = target
            && k >= self.backward.len()
        {
            return Err(GedError::invalid_input(format!(
                "target node {k} out of range 0..{}",
                self.backward.len()
            )));
        }
        match (source, target) {
            (None, None) => Err(GedError::invalid_input(
                "assignment needs a source or a target node",
            )),
            (Some(i), target) => {
                if let Some(old) = self.forward[i].take() {
                    self.backward[old] = None;
                }
                if let Some(k) = target {
                    if let Some(old) = self.backward[k].take() {
                        self.forward[old] = None;
                    }
                    self.backward[k] = Some(i);
                }
                self.forward[i] = target;
                Ok(())
            }
            (None, Some(k)) => {
                if let Some(old) = self.backward[k].take() {
                    self.forward[old] = None;
                }
                Ok(())
            }
        }
    }

    pub fn image(&self, source: NodeId) -> Option<NodeId> {
        self.forward.get(source).copied().flatten()
    }

    pub fn pre_image(&self, target: NodeId) -> Option<NodeId> {
        self.backward.get(target).copied().flatten()
    }

    /// Substitutions and deletions in source order, then insertions.
    pub fn assignments(&self) -> Vec<(Option<NodeId>, Option<NodeId>)> {
        let mut out: Vec<_> = self
            .forward
            .iter()
            .enumerate()
            .map(|(i, image)| (Some(i), *image))
            .collect();
        out.extend(
            self.backward
                .iter()
                .enumerate()
                .filter(|(_, pre)| pre.is_none())
                .map(|(k, _)| (None, Some(k))),
        );
        out
    }

    /// Cost of the edit path this map induces between `g` and `h`. Edges are
    /// undirected; an edge survives only when both endpoints are substituted
    /// onto the endpoints of an edge of `h`.
    pub fn induced_cost(
        &self,
        g: &GedGraph,
        h: &GedGraph,
        costs: &dyn EditCosts,
    ) -> Result<f64, GedError> {
        if self.forward.len() != g.num_nodes() || self.backward.len() != h.num_nodes() {
            return Err(GedError::invalid_input(format!(
                "node map is {}x{} but graphs have {} and {} nodes",
                self.forward.len(),
                self.backward.len(),
                g.num_nodes(),
                h.num_nodes()
            )));
        }
        let mut cost = 0.0;
        for (i, label) in g.nodes().iter().enumerate() {
            cost += match self.image(i) {
                Some(k) => costs.node_rel_cost(label, &h.nodes()[k])?,
                None => costs.node_del_cost(label)?,
            };
        }
        for (k, label) in h.nodes().iter().enumerate() {
            if self.pre_image(k).is_none() {
                cost += costs.node_ins_cost(label)?;
            }
        }
        for edge in g.edges() {
            let mapped = match (self.image(edge.from), self.image(edge.to)) {
                (Some(k), Some(l)) => h.edge_between(k, l),
                _ => None,
            };
            cost += match mapped {
                Some(target) => costs.edge_rel_cost(&edge.label, &target.label)?,
                None => costs.edge_del_cost(&edge.label)?,
            };
        }
        for edge in h.edges() {
            let kept = match (self.pre_image(edge.from), self.pre_image(edge.to)) {
                (Some(i), Some(j)) => g.is_edge(i, j),
                _ => false,
            };
            if !kept {
                cost += costs.edge_ins_cost(&edge.label)?;
            }
        }
        Ok(cost)
    }
}
