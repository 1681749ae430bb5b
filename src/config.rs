//! Configuration for edit-cost selection and cost-model options.
//!
//! Cost models are configured with a [`ConfigMap`], a JSON object whose
//! values are checked for kind when they are applied. Each configuration
//! call merges its explicit keys over the model's *current* values, so keys
//! omitted from a later call keep whatever an earlier call set.
//!
//! # Examples
//!
//! ```rust
//! use gedcore::{EditCostsKind, build_edit_costs, config::config_map};
//! use serde_json::json;
//!
//! let config = config_map(json!({ "node_coord_metric": "euclidean" })).unwrap();
//! let costs = build_edit_costs(EditCostsKind::Geometric, &[], &config).unwrap();
//! assert_eq!(costs.kind(), EditCostsKind::Geometric);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::{
    edit_costs::{
        ChemCosts, ConstantCosts, EditCosts, GeometricCosts, GrecCosts, LetterCosts,
        NonSymbolicCosts,
    },
    errors::GedError,
    label::json_kind,
    metric,
};

/// Untyped option map handed to [`EditCosts::set_config`].
pub type ConfigMap = serde_json::Map<String, Value>;

pub const NODE_COORD_METRIC: &str = "node_coord_metric";
pub const NODE_EMBED_METRIC: &str = "node_embed_metric";
pub const EDGE_WEIGHT_METRIC: &str = "edge_weight_metric";
pub const EDGE_EMBED_METRIC: &str = "edge_embed_metric";
pub const NORMALIZE_COSINE: &str = "normalize_cosine";

const GEOMETRIC_KEYS: [&str; 5] = [
    NODE_COORD_METRIC,
    NODE_EMBED_METRIC,
    EDGE_WEIGHT_METRIC,
    EDGE_EMBED_METRIC,
    NORMALIZE_COSINE,
];

/// Converts a JSON object into a [`ConfigMap`].
pub fn config_map(value: Value) -> Result<ConfigMap, GedError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(GedError::type_mismatch("config", "object", json_kind(&other))),
    }
}

/// Metric selection for [`GeometricCosts`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometricConfig {
    pub node_coord_metric: String,
    pub node_embed_metric: String,
    pub edge_weight_metric: String,
    pub edge_embed_metric: String,
    pub normalize_cosine: bool,
}

impl Default for GeometricConfig {
    fn default() -> Self {
        Self {
            node_coord_metric: metric::EUCLIDEAN.to_string(),
            node_embed_metric: metric::COSINE_DISTANCE.to_string(),
            edge_weight_metric: metric::EUCLIDEAN.to_string(),
            edge_embed_metric: metric::COSINE_DISTANCE.to_string(),
            normalize_cosine: false,
        }
    }
}

impl GeometricConfig {
    /// Returns a copy with every recognised key of `overrides` applied.
    /// Unrecognised keys are logged and ignored.
    pub fn merged(&self, overrides: &ConfigMap) -> Result<Self, GedError> {
        let mut next = self.clone();
        for (key, value) in overrides {
            match key.as_str() {
                NODE_COORD_METRIC => next.node_coord_metric = metric_name(key, value)?,
                NODE_EMBED_METRIC => next.node_embed_metric = metric_name(key, value)?,
                EDGE_WEIGHT_METRIC => next.edge_weight_metric = metric_name(key, value)?,
                EDGE_EMBED_METRIC => next.edge_embed_metric = metric_name(key, value)?,
                NORMALIZE_COSINE => {
                    next.normalize_cosine = value.as_bool().ok_or_else(|| {
                        GedError::type_mismatch(key.as_str(), "bool", json_kind(value))
                    })?
                }
                other => {
                    warn!(key = other, known = ?GEOMETRIC_KEYS, "ignoring unknown edit cost option")
                }
            }
        }
        Ok(next)
    }

    pub fn metric_config(&self) -> metric::MetricConfig {
        metric::MetricConfig {
            normalize: self.normalize_cosine,
        }
    }

    pub fn to_map(&self) -> ConfigMap {
        let mut map = ConfigMap::new();
        map.insert(NODE_COORD_METRIC.into(), self.node_coord_metric.clone().into());
        map.insert(NODE_EMBED_METRIC.into(), self.node_embed_metric.clone().into());
        map.insert(EDGE_WEIGHT_METRIC.into(), self.edge_weight_metric.clone().into());
        map.insert(EDGE_EMBED_METRIC.into(), self.edge_embed_metric.clone().into());
        map.insert(NORMALIZE_COSINE.into(), self.normalize_cosine.into());
        map
    }
}

fn metric_name(key: &str, value: &Value) -> Result<String, GedError> {
    let name = value
        .as_str()
        .ok_or_else(|| GedError::type_mismatch(key, "string", json_kind(value)))?;
    if name.trim().is_empty() {
        return Err(GedError::configuration(format!(
            "metric name for `{key}` must not be blank"
        )));
    }
    Ok(name.to_string())
}

/// Runtime selection of an edit-cost model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditCostsKind {
    /// Fixed costs; relabelling differing labels costs a constant.
    Constant,
    /// Mixed symbolic/coordinate/embedding attributes with pluggable metrics.
    Geometric,
    /// Numeric attributes only; relabelling is a scaled Euclidean distance.
    NonSymbolic,
    /// Letter dataset: `x`/`y` node coordinates.
    Letter,
    /// GREC dataset: typed node coordinates, edge frequencies.
    Grec,
    /// Molecule datasets: `chem` node symbols, `valence` edge symbols.
    Chem,
}

impl EditCostsKind {
    pub const ALL: [EditCostsKind; 6] = [
        EditCostsKind::Constant,
        EditCostsKind::Geometric,
        EditCostsKind::NonSymbolic,
        EditCostsKind::Letter,
        EditCostsKind::Grec,
        EditCostsKind::Chem,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EditCostsKind::Constant => "CONSTANT",
            EditCostsKind::Geometric => "GEOMETRIC",
            EditCostsKind::NonSymbolic => "NON_SYMBOLIC",
            EditCostsKind::Letter => "LETTER",
            EditCostsKind::Grec => "GREC",
            EditCostsKind::Chem => "CHEM",
        }
    }
}

impl fmt::Display for EditCostsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditCostsKind {
    type Err = GedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        EditCostsKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| GedError::configuration(format!("unknown edit costs `{s}`")))
    }
}

/// Builds and configures a cost model. An empty `constants` slice selects the
/// model's defaults; otherwise the slice length must match one of the model's
/// constructor arities.
pub fn build_edit_costs(
    kind: EditCostsKind,
    constants: &[f64],
    config: &ConfigMap,
) -> Result<Box<dyn EditCosts>, GedError> {
    let mut costs: Box<dyn EditCosts> = match kind {
        EditCostsKind::Constant => Box::new(ConstantCosts::from_constants(constants)?),
        EditCostsKind::Geometric => Box::new(GeometricCosts::from_constants(constants)?),
        EditCostsKind::NonSymbolic => Box::new(NonSymbolicCosts::from_constants(constants)?),
        EditCostsKind::Letter => Box::new(LetterCosts::from_constants(constants)?),
        EditCostsKind::Grec => Box::new(GrecCosts::from_constants(constants)?),
        EditCostsKind::Chem => Box::new(ChemCosts::from_constants(constants)?),
    };
    costs.set_config(config)?;
    Ok(costs)
}

pub(crate) fn arity_error(kind: EditCostsKind, expected: &str, found: usize) -> GedError {
    GedError::configuration(format!(
        "{kind} edit costs expect {expected} constants, got {found}"
    ))
}
