use serde::{Deserialize, Serialize};

use super::{EditCosts, require_text, split_alpha};
use crate::{
    config::{EditCostsKind, arity_error},
    errors::GedError,
    label::Label,
};

/// Molecule costs over symbolic `chem` node labels and `valence` edge labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChemCosts {
    pub node_ins_cost: f64,
    pub node_del_cost: f64,
    pub node_rel_cost: f64,
    pub edge_ins_cost: f64,
    pub edge_del_cost: f64,
    pub edge_rel_cost: f64,
    pub alpha: f64,
}

impl Default for ChemCosts {
    fn default() -> Self {
        Self {
            node_ins_cost: 4.0,
            node_del_cost: 4.0,
            node_rel_cost: 2.0,
            edge_ins_cost: 1.0,
            edge_del_cost: 1.0,
            edge_rel_cost: 1.0,
            alpha: 0.5,
        }
    }
}

impl ChemCosts {
    /// `[node_ins, node_del, node_rel, edge_ins, edge_del, edge_rel]` with an
    /// optional trailing alpha.
    pub fn from_constants(constants: &[f64]) -> Result<Self, GedError> {
        match constants.len() {
            0 => Ok(Self::default()),
            6 | 7 => Ok(Self {
                node_ins_cost: constants[0],
                node_del_cost: constants[1],
                node_rel_cost: constants[2],
                edge_ins_cost: constants[3],
                edge_del_cost: constants[4],
                edge_rel_cost: constants[5],
                alpha: split_alpha(constants, 6, Self::default().alpha),
            }),
            found => Err(arity_error(EditCostsKind::Chem, "6 or 7", found)),
        }
    }
}

impl EditCosts for ChemCosts {
    fn kind(&self) -> EditCostsKind {
        EditCostsKind::Chem
    }

    fn node_ins_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok(self.alpha * self.node_ins_cost)
    }

    fn node_del_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok(self.alpha * self.node_del_cost)
    }

    fn node_rel_cost(&self, first: &Label, second: &Label) -> Result<f64, GedError> {
        if require_text(first, "chem")? == require_text(second, "chem")? {
            return Ok(0.0);
        }
        Ok(self.alpha * self.node_rel_cost)
    }

    fn edge_ins_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok((1.0 - self.alpha) * self.edge_ins_cost)
    }

    fn edge_del_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok((1.0 - self.alpha) * self.edge_del_cost)
    }

    fn edge_rel_cost(&self, first: &Label, second: &Label) -> Result<f64, GedError> {
        let a = first
            .get("valence")
            .ok_or_else(|| GedError::missing_attribute("valence"))?;
        let b = second
            .get("valence")
            .ok_or_else(|| GedError::missing_attribute("valence"))?;
        if a == b {
            return Ok(0.0);
        }
        Ok((1.0 - self.alpha) * self.edge_rel_cost)
    }
}
