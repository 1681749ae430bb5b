//! Costs for graphs with mixed symbolic and numeric attributes, such as point
//! clouds, handwriting graphs or diagrams.
//!
//! Node channels: `label` (text), `coords` (vector), `embedding` (vector).
//! Edge channels: `label` (text), `weight` (vector), `embedding` (vector).
//!
//! A relabelling sums the active channels. A vector channel adds
//! `metric(a, b) * weight` when both labels carry it; the symbolic channel adds
//! its weight when both labels carry it and the values differ. A channel with
//! zero weight is never looked up, and a channel present on one side only
//! adds nothing.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::EditCosts;
use crate::{
    config::{ConfigMap, EditCostsKind, GeometricConfig, arity_error},
    errors::GedError,
    label::{COORDS_KEY, EMBEDDING_KEY, LABEL_KEY, Label, WEIGHT_KEY},
    metric::{self, MetricFn, MetricRegistry},
};

/// Insertion/deletion constants and per-channel relabelling weights.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometricWeights {
    pub node_ins_cost: f64,
    pub node_del_cost: f64,
    pub edge_ins_cost: f64,
    pub edge_del_cost: f64,
    pub node_label_cost: f64,
    pub node_coord_cost: f64,
    pub node_embed_cost: f64,
    pub edge_label_cost: f64,
    pub edge_weight_cost: f64,
    pub edge_embed_cost: f64,
}

impl Default for GeometricWeights {
    fn default() -> Self {
        Self::uniform(1.0, 1.0, 1.0, 1.0, 1.0, 1.0)
    }
}

impl GeometricWeights {
    /// Broadcasts `node_rel_cost` and `edge_rel_cost` to every channel.
    pub fn uniform(
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
            edge_ins_cost,
            edge_del_cost,
            node_label_cost: node_rel_cost,
            node_coord_cost: node_rel_cost,
            node_embed_cost: node_rel_cost,
            edge_label_cost: edge_rel_cost,
            edge_weight_cost: edge_rel_cost,
            edge_embed_cost: edge_rel_cost,
        }
    }
}

#[derive(Clone)]
struct BoundMetrics {
    node_coord: MetricFn,
    node_embed: MetricFn,
    edge_weight: MetricFn,
    edge_embed: MetricFn,
}

impl BoundMetrics {
    fn resolve(config: &GeometricConfig, registry: &MetricRegistry) -> Result<Self, GedError> {
        let metric_config = config.metric_config();
        Ok(Self {
            node_coord: registry.resolve(&config.node_coord_metric, &metric_config)?,
            node_embed: registry.resolve(&config.node_embed_metric, &metric_config)?,
            edge_weight: registry.resolve(&config.edge_weight_metric, &metric_config)?,
            edge_embed: registry.resolve(&config.edge_embed_metric, &metric_config)?,
        })
    }

    fn defaults() -> Self {
        let cosine_distance: MetricFn =
            std::sync::Arc::new(|a: &[f64], b: &[f64]| metric::cosine_distance(a, b, false));
        let euclidean: MetricFn = std::sync::Arc::new(metric::euclidean);
        Self {
            node_coord: euclidean.clone(),
            node_embed: cosine_distance.clone(),
            edge_weight: euclidean,
            edge_embed: cosine_distance,
        }
    }
}

#[derive(Clone)]
pub struct GeometricCosts {
    weights: GeometricWeights,
    config: GeometricConfig,
    metrics: BoundMetrics,
}

impl Default for GeometricCosts {
    fn default() -> Self {
        Self::with_weights(GeometricWeights::default())
    }
}

impl GeometricCosts {
    /// Six-constant form: relabelling constants apply to every channel.
    pub fn new(
        node_ins_cost: f64,
        node_del_cost: f64,
        node_rel_cost: f64,
        edge_ins_cost: f64,
        edge_del_cost: f64,
        edge_rel_cost: f64,
    ) -> Self {
        Self::with_weights(GeometricWeights::uniform(
            node_ins_cost,
            node_del_cost,
            node_rel_cost,
            edge_ins_cost,
            edge_del_cost,
            edge_rel_cost,
        ))
    }

    pub fn with_weights(weights: GeometricWeights) -> Self {
        Self {
            weights,
            config: GeometricConfig::default(),
            metrics: BoundMetrics::defaults(),
        }
    }

    /// Accepts the six-constant order of [`GeometricCosts::new`], or ten
    /// constants `[node_ins, node_del, edge_ins, edge_del, node_label,
    /// node_coord, node_embed, edge_label, edge_weight, edge_embed]`.
    pub fn from_constants(constants: &[f64]) -> Result<Self, GedError> {
        match constants {
            [] => Ok(Self::default()),
            [ni, nd, nr, ei, ed, er] => Ok(Self::new(*ni, *nd, *nr, *ei, *ed, *er)),
            [ni, nd, ei, ed, nl, nc, ne, el, ew, ee] => Ok(Self::with_weights(GeometricWeights {
                node_ins_cost: *ni,
                node_del_cost: *nd,
                edge_ins_cost: *ei,
                edge_del_cost: *ed,
                node_label_cost: *nl,
                node_coord_cost: *nc,
                node_embed_cost: *ne,
                edge_label_cost: *el,
                edge_weight_cost: *ew,
                edge_embed_cost: *ee,
            })),
            other => Err(arity_error(EditCostsKind::Geometric, "6 or 10", other.len())),
        }
    }

    pub fn weights(&self) -> &GeometricWeights {
        &self.weights
    }

    pub fn config(&self) -> &GeometricConfig {
        &self.config
    }

    /// Like [`EditCosts::set_config`] but resolves names against `registry`.
    /// Nothing changes unless every metric resolves.
    pub fn set_config_with(
        &mut self,
        config: &ConfigMap,
        registry: &MetricRegistry,
    ) -> Result<(), GedError> {
        let merged = self.config.merged(config)?;
        let metrics = BoundMetrics::resolve(&merged, registry)?;
        debug!(
            node_coord_metric = %merged.node_coord_metric,
            node_embed_metric = %merged.node_embed_metric,
            edge_weight_metric = %merged.edge_weight_metric,
            edge_embed_metric = %merged.edge_embed_metric,
            normalize_cosine = merged.normalize_cosine,
            "geometric metrics bound"
        );
        self.config = merged;
        self.metrics = metrics;
        Ok(())
    }
}

fn symbolic_channel(first: &Label, second: &Label, weight: f64) -> f64 {
    if weight == 0.0 {
        return 0.0;
    }
    match (first.get_text(LABEL_KEY), second.get_text(LABEL_KEY)) {
        (Some(a), Some(b)) if a != b => weight,
        _ => 0.0,
    }
}

fn vector_channel(
    first: &Label,
    second: &Label,
    key: &str,
    weight: f64,
    metric: &MetricFn,
) -> Result<f64, GedError> {
    if weight == 0.0 {
        return Ok(0.0);
    }
    match (first.get_vector(key), second.get_vector(key)) {
        (Some(a), Some(b)) => Ok(metric(a, b)? * weight),
        _ => Ok(0.0),
    }
}

impl EditCosts for GeometricCosts {
    fn kind(&self) -> EditCostsKind {
        EditCostsKind::Geometric
    }

    fn node_ins_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok(self.weights.node_ins_cost)
    }

    fn node_del_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok(self.weights.node_del_cost)
    }

    fn node_rel_cost(&self, first: &Label, second: &Label) -> Result<f64, GedError> {
        let (w, m) = (&self.weights, &self.metrics);
        let mut cost = symbolic_channel(first, second, w.node_label_cost);
        cost += vector_channel(first, second, COORDS_KEY, w.node_coord_cost, &m.node_coord)?;
        cost += vector_channel(first, second, EMBEDDING_KEY, w.node_embed_cost, &m.node_embed)?;
        Ok(cost)
    }

    fn edge_ins_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok(self.weights.edge_ins_cost)
    }

    fn edge_del_cost(&self, _label: &Label) -> Result<f64, GedError> {
        Ok(self.weights.edge_del_cost)
    }

    fn edge_rel_cost(&self, first: &Label, second: &Label) -> Result<f64, GedError> {
        let (w, m) = (&self.weights, &self.metrics);
        let mut cost = symbolic_channel(first, second, w.edge_label_cost);
        cost += vector_channel(first, second, WEIGHT_KEY, w.edge_weight_cost, &m.edge_weight)?;
        cost += vector_channel(first, second, EMBEDDING_KEY, w.edge_embed_cost, &m.edge_embed)?;
        Ok(cost)
    }

    fn set_config(&mut self, config: &ConfigMap) -> Result<(), GedError> {
        self.set_config_with(config, metric::standard_registry())
    }
}

impl fmt::Debug for GeometricCosts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeometricCosts")
            .field("weights", &self.weights)
            .field("config", &self.config)
            .finish()
    }
}
