use serde::{Deserialize, Serialize};

use super::EditCosts;
use crate::{
    config::{EditCostsKind, arity_error},
    errors::GedError,
    label::{AttributeValue, Label},
    metric,
};

/// Costs for purely numeric labels. Relabelling is the Euclidean distance
/// over the attributes both labels carry as numbers, scaled by a constant.
/// Text that does not parse as a number and attributes found on one side
/// only are left out of the distance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NonSymbolicCosts {
    pub node_ins_cost: f64,
    pub node_del_cost: f64,
    pub node_rel_cost: f64,
    pub edge_ins_cost: f64,
    pub edge_del_cost: f64,
    pub edge_rel_cost: f64,
}

impl Default for NonSymbolicCosts {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0, 1.0, 1.0)
    }
}

impl NonSymbolicCosts {
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
            other => Err(arity_error(EditCostsKind::NonSymbolic, "6", other.len())),
        }
    }
}

fn numeric(value: &AttributeValue) -> Option<Vec<f64>> {
    match value {
        AttributeValue::Vector(values) => Some(values.clone()),
        AttributeValue::Text(text) => text.trim().parse::<f64>().ok().map(|x| vec![x]),
    }
}

/// Distance over the shared numeric attributes, in key order.
fn shared_distance(first: &Label, second: &Label) -> Result<f64, GedError> {
    let mut a = Vec::new();
    let mut b = Vec::new();
    for key in first.keys() {
        let (Some(x), Some(y)) = (first.get(key), second.get(key)) else {
            continue;
        };
        let (Some(x), Some(y)) = (numeric(x), numeric(y)) else {
            continue;
        };
        if x.len() != y.len() {
            return Err(GedError::DimensionMismatch {
                left: x.len(),
                right: y.len(),
            });
        }
        a.extend(x);
        b.extend(y);
    }
    metric::euclidean(&a, &b)
}

impl EditCosts for NonSymbolicCosts {
    fn kind(&self) -> EditCostsKind {
        EditCostsKind::NonSymbolic
    }

    fn node_ins_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok(self.node_ins_cost)
    }

    fn node_del_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok(self.node_del_cost)
    }

    fn node_rel_cost(&self, first: &Label, second: &Label) -> Result<f64, GedError> {
        Ok(self.node_rel_cost * shared_distance(first, second)?)
    }

    fn edge_ins_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok(self.edge_ins_cost)
    }

    fn edge_del_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok(self.edge_del_cost)
    }

    fn edge_rel_cost(&self, first: &Label, second: &Label) -> Result<f64, GedError> {
        Ok(self.edge_rel_cost * shared_distance(first, second)?)
    }
}
