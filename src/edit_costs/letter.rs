use serde::{Deserialize, Serialize};

use super::{EditCosts, require_number, split_alpha};
use crate::{
    config::{EditCostsKind, arity_error},
    errors::GedError,
    label::Label,
    metric,
};

/// Letter dataset costs: nodes carry `x` and `y`, edges are unlabelled.
/// `alpha` weighs node operations against edge operations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LetterCosts {
    pub node_ins_cost: f64,
    pub node_del_cost: f64,
    pub edge_ins_cost: f64,
    pub edge_del_cost: f64,
    pub alpha: f64,
}

impl Default for LetterCosts {
    fn default() -> Self {
        Self::new(0.9, 0.9, 1.7, 1.7, 0.75)
    }
}

impl LetterCosts {
    pub fn new(
        node_ins_cost: f64,
        node_del_cost: f64,
        edge_ins_cost: f64,
        edge_del_cost: f64,
        alpha: f64,
    ) -> Self {
        Self {
            node_ins_cost,
            node_del_cost,
            edge_ins_cost,
            edge_del_cost,
            alpha,
        }
    }

    /// `[node_ins, node_del, edge_ins, edge_del]` with an optional trailing alpha.
    pub fn from_constants(constants: &[f64]) -> Result<Self, GedError> {
        match constants.len() {
            0 => Ok(Self::default()),
            4 | 5 => Ok(Self::new(
                constants[0],
                constants[1],
                constants[2],
                constants[3],
                split_alpha(constants, 4, Self::default().alpha),
            )),
            found => Err(arity_error(EditCostsKind::Letter, "4 or 5", found)),
        }
    }
}

impl EditCosts for LetterCosts {
    fn kind(&self) -> EditCostsKind {
        EditCostsKind::Letter
    }

    fn node_ins_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok(self.alpha * self.node_ins_cost)
    }

    fn node_del_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok(self.alpha * self.node_del_cost)
    }

    fn node_rel_cost(&self, first: &Label, second: &Label) -> Result<f64, GedError> {
        let a = [require_number(first, "x")?, require_number(first, "y")?];
        let b = [require_number(second, "x")?, require_number(second, "y")?];
        Ok(self.alpha * metric::euclidean(&a, &b)?)
    }

    fn edge_ins_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok((1.0 - self.alpha) * self.edge_ins_cost)
    }

    fn edge_del_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok((1.0 - self.alpha) * self.edge_del_cost)
    }

    fn edge_rel_cost(&self, _first: &Label, _second: &Label) -> Result<f64, GedError> {
        Ok(0.0)
    }
}
