use serde::{Deserialize, Serialize};

use super::EditCosts;
use crate::{
    config::{EditCostsKind, arity_error},
    errors::GedError,
    label::Label,
};

/// Label-independent costs; relabelling is free only for equal labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstantCosts {
    pub node_ins_cost: f64,
    pub node_del_cost: f64,
    pub node_rel_cost: f64,
    pub edge_ins_cost: f64,
    pub edge_del_cost: f64,
    pub edge_rel_cost: f64,
}

impl Default for ConstantCosts {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0, 1.0, 1.0)
    }
}

impl ConstantCosts {
    pub fn new(
        node_ins_cost: f64,
        node_del_cost: f64,
        node_rel_cost: f64,
        edge_ins_cost: f64,
        edge_del_cost: f64,
        edge_rel_cost: f64,
    ) -> Self {
        Self {
            node_ins_cost,
            node_del_cost,
            node_rel_cost,
            edge_ins_cost,
            edge_del_cost,
            edge_rel_cost,
        }
    }

    /// `[node_ins, node_del, node_rel, edge_ins, edge_del, edge_rel]`, or empty for defaults.
    pub fn from_constants(constants: &[f64]) -> Result<Self, GedError> {
        match constants {
            [] => Ok(Self::default()),
            [ni, nd, nr, ei, ed, er] => Ok(Self::new(*ni, *nd, *nr, *ei, *ed, *er)),
            other => Err(arity_error(EditCostsKind::Constant, "6", other.len())),
        }
    }
}

impl EditCosts for ConstantCosts {
    fn kind(&self) -> EditCostsKind {
        EditCostsKind::Constant
    }

    fn node_ins_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok(self.node_ins_cost)
    }

    fn node_del_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok(self.node_del_cost)
    }

    fn node_rel_cost(&self, first: &Label, second: &Label) -> Result<f64, GedError> {
        Ok(if first == second { 0.0 } else { self.node_rel_cost })
    }

    fn edge_ins_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok(self.edge_ins_cost)
    }

    fn edge_del_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok(self.edge_del_cost)
    }

    fn edge_rel_cost(&self, first: &Label, second: &Label) -> Result<f64, GedError> {
        Ok(if first == second { 0.0 } else { self.edge_rel_cost })
    }
}
