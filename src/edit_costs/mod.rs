//! Edit-cost models.
//!
//! Every model implements [`EditCosts`]: insertion, deletion and relabelling
//! costs for nodes and edges. A model is configured through
//! [`EditCosts::set_config`] and is read-only afterwards, which is what lets a
//! single instance be shared across threads behind an `Arc`.
//!
//! Two tolerance policies coexist on purpose:
//! - [`GeometricCosts`] treats a channel carried by only one side as unknown
//!   and lets it contribute nothing.
//! - [`NonSymbolicCosts`] measures only the numeric attributes both labels
//!   share and skips everything else.
//! - The dataset formulas ([`LetterCosts`], [`GrecCosts`], [`ChemCosts`])
//!   require their fields and report [`GedError::MissingAttribute`].

mod chem;
mod constant;
mod geometric;
mod grec;
mod letter;
mod non_symbolic;

use std::fmt;

use tracing::warn;

pub use chem::ChemCosts;
pub use constant::ConstantCosts;
pub use geometric::{GeometricCosts, GeometricWeights};
pub use grec::GrecCosts;
pub use letter::LetterCosts;
pub use non_symbolic::NonSymbolicCosts;

use crate::{
    config::{ConfigMap, EditCostsKind},
    errors::GedError,
    label::Label,
};

pub trait EditCosts: Send + Sync + fmt::Debug {
    fn kind(&self) -> EditCostsKind;

    fn node_ins_cost(&self, label: &Label) -> Result<f64, GedError>;

    fn node_del_cost(&self, label: &Label) -> Result<f64, GedError>;

    fn node_rel_cost(&self, first: &Label, second: &Label) -> Result<f64, GedError>;

    fn edge_ins_cost(&self, label: &Label) -> Result<f64, GedError>;

    fn edge_del_cost(&self, label: &Label) -> Result<f64, GedError>;

    fn edge_rel_cost(&self, first: &Label, second: &Label) -> Result<f64, GedError>;

    /// Applies configuration options. Models without options ignore them.
    fn set_config(&mut self, config: &ConfigMap) -> Result<(), GedError> {
        if !config.is_empty() {
            let keys: Vec<&str> = config.keys().map(String::as_str).collect();
            warn!(kind = %self.kind(), ?keys, "edit costs take no options; ignoring");
        }
        Ok(())
    }
}

pub(crate) fn require_number(label: &Label, key: &str) -> Result<f64, GedError> {
    let value = label
        .get(key)
        .ok_or_else(|| GedError::missing_attribute(key))?;
    label
        .get_number(key)
        .ok_or_else(|| GedError::type_mismatch(key, "number", value.kind()))
}

pub(crate) fn require_text<'a>(label: &'a Label, key: &str) -> Result<&'a str, GedError> {
    let value = label
        .get(key)
        .ok_or_else(|| GedError::missing_attribute(key))?;
    value
        .as_text()
        .ok_or_else(|| GedError::type_mismatch(key, "text", value.kind()))
}

pub(crate) fn split_alpha(constants: &[f64], base: usize, default: f64) -> f64 {
    constants.get(base).copied().unwrap_or(default)
}
