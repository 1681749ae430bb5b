//! Distance functions over `f64` vectors and the name-based registry that
//! binds them at configuration time.
//!
//! Cost models never look metrics up per comparison: a name is resolved once
//! into a [`MetricFn`] and the closure is stored alongside the model.

use std::fmt;
use std::sync::{Arc, LazyLock};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::errors::GedError;

pub const EUCLIDEAN: &str = "euclidean";
pub const COSINE: &str = "cosine";
pub const COSINE_DISTANCE: &str = "cosine_distance";

/// A bound, stateless distance function.
pub type MetricFn = Arc<dyn Fn(&[f64], &[f64]) -> Result<f64, GedError> + Send + Sync>;

/// Builds a [`MetricFn`] for a given configuration.
pub type MetricConstructor = fn(&MetricConfig) -> MetricFn;

/// Options that parameterise a metric when it is resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricConfig {
    /// Halves `cosine_distance` so it lands in `[0, 1]`.
    pub normalize: bool,
}

impl MetricConfig {
    pub fn normalized() -> Self {
        Self { normalize: true }
    }
}

/// L2 norm of `a - b`.
pub fn euclidean(a: &[f64], b: &[f64]) -> Result<f64, GedError> {
    check_dimensions(a, b)?;
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum();
    Ok(sum.sqrt())
}

/// Cosine similarity in `[-1, 1]`.
pub fn cosine(a: &[f64], b: &[f64]) -> Result<f64, GedError> {
    check_dimensions(a, b)?;
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(GedError::degenerate(
            "cosine is undefined for zero-norm vectors",
        ));
    }
    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0))
}

/// `1 - cosine(a, b)`, halved when `normalize` is set.
///
/// Identical inputs are exactly zero apart, zero vectors included; any other
/// zero-norm input is [`GedError::DegenerateInput`].
pub fn cosine_distance(a: &[f64], b: &[f64], normalize: bool) -> Result<f64, GedError> {
    check_dimensions(a, b)?;
    if a == b {
        return Ok(0.0);
    }
    let distance = 1.0 - cosine(a, b)?;
    Ok(if normalize { distance / 2.0 } else { distance })
}

fn check_dimensions(a: &[f64], b: &[f64]) -> Result<(), GedError> {
    if a.len() != b.len() {
        return Err(GedError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

fn euclidean_constructor(_config: &MetricConfig) -> MetricFn {
    Arc::new(euclidean)
}

fn cosine_constructor(_config: &MetricConfig) -> MetricFn {
    Arc::new(cosine)
}

fn cosine_distance_constructor(config: &MetricConfig) -> MetricFn {
    let normalize = config.normalize;
    Arc::new(move |a: &[f64], b: &[f64]| cosine_distance(a, b, normalize))
}

/// Name-to-constructor table for metrics.
#[derive(Clone)]
pub struct MetricRegistry {
    constructors: AHashMap<String, MetricConstructor>,
}

impl MetricRegistry {
    pub fn empty() -> Self {
        Self {
            constructors: AHashMap::new(),
        }
    }

    /// Registry holding `euclidean`, `cosine` and `cosine_distance`.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(EUCLIDEAN, euclidean_constructor);
        registry.register(COSINE, cosine_constructor);
        registry.register(COSINE_DISTANCE, cosine_distance_constructor);
        registry
    }

    /// Adds or replaces a metric, returning the previous constructor.
    pub fn register<T: Into<String>>(
        &mut self,
        name: T,
        constructor: MetricConstructor,
    ) -> Option<MetricConstructor> {
        self.constructors.insert(name.into(), constructor)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolves `name` into a bound metric. Blank names are configuration
    /// errors; unknown names fail with [`GedError::InvalidMetricName`].
    pub fn resolve(&self, name: &str, config: &MetricConfig) -> Result<MetricFn, GedError> {
        if name.trim().is_empty() {
            return Err(GedError::configuration("metric name must not be blank"));
        }
        let constructor =
            self.constructors
                .get(name)
                .ok_or_else(|| GedError::InvalidMetricName {
                    name: name.to_string(),
                    available: self.names().join(", "),
                })?;
        Ok(constructor(config))
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for MetricRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricRegistry")
            .field("metrics", &self.names())
            .finish()
    }
}

static STANDARD_REGISTRY: LazyLock<MetricRegistry> = LazyLock::new(MetricRegistry::standard);

/// Resolves against the standard registry.
pub fn resolve_metric(name: &str, config: &MetricConfig) -> Result<MetricFn, GedError> {
    STANDARD_REGISTRY.resolve(name, config)
}

pub fn standard_registry() -> &'static MetricRegistry {
    &STANDARD_REGISTRY
}
