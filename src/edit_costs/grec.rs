use serde::{Deserialize, Serialize};

use super::{EditCosts, require_number, require_text, split_alpha};
use crate::{
    config::{EditCostsKind, arity_error},
    errors::GedError,
    label::Label,
    metric,
};

/// GREC dataset costs. Nodes carry `x`, `y` and a `type`; edges carry a
/// `frequency` that scales their insertion and deletion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrecCosts {
    pub node_ins_cost: f64,
    pub node_del_cost: f64,
    pub edge_ins_cost: f64,
    pub edge_del_cost: f64,
    /// Added to the coordinate distance when node types differ.
    pub type_penalty: f64,
    pub alpha: f64,
}

impl Default for GrecCosts {
    fn default() -> Self {
        Self::new(90.0, 90.0, 15.0, 15.0, 180.0, 0.5)
    }
}

impl GrecCosts {
    pub fn new(
        node_ins_cost: f64,
        node_del_cost: f64,
        edge_ins_cost: f64,
        edge_del_cost: f64,
        type_penalty: f64,
        alpha: f64,
    ) -> Self {
        Self {
            node_ins_cost,
            node_del_cost,
            edge_ins_cost,
            edge_del_cost,
            type_penalty,
            alpha,
        }
    }

    /// `[node_ins, node_del, edge_ins, edge_del, type_penalty]` with an optional trailing alpha.
    pub fn from_constants(constants: &[f64]) -> Result<Self, GedError> {
        match constants.len() {
            0 => Ok(Self::default()),
            5 | 6 => Ok(Self::new(
                constants[0],
                constants[1],
                constants[2],
                constants[3],
                constants[4],
                split_alpha(constants, 5, Self::default().alpha),
            )),
            found => Err(arity_error(EditCostsKind::Grec, "5 or 6", found)),
        }
    }

    fn edge_scale(&self) -> f64 {
        1.0 - self.alpha
    }
}

impl EditCosts for GrecCosts {
    fn kind(&self) -> EditCostsKind {
        EditCostsKind::Grec
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
        let mut cost = metric::euclidean(&a, &b)?;
        if require_text(first, "type")? != require_text(second, "type")? {
            cost += self.type_penalty;
        }
        Ok(self.alpha * cost)
    }

    fn edge_ins_cost(&self, label: &Label) -> Result<f64, GedError> {
        Ok(self.edge_scale() * self.edge_ins_cost * require_number(label, "frequency")?)
    }

    fn edge_del_cost(&self, label: &Label) -> Result<f64, GedError> {
        Ok(self.edge_scale() * self.edge_del_cost * require_number(label, "frequency")?)
    }

    fn edge_rel_cost(&self, first: &Label, second: &Label) -> Result<f64, GedError> {
        let delta = require_number(first, "frequency")? - require_number(second, "frequency")?;
        let unit = (self.edge_ins_cost + self.edge_del_cost) / 2.0;
        Ok(self.edge_scale() * unit * delta.abs())
    }
}
