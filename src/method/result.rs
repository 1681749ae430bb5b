use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use ahash::AHashMap;
use parking_lot::RwLock;

use super::node_map::NodeMap;
use crate::graph::GraphId;

/// Bound value meaning "not produced by this method".
pub const UNAVAILABLE: f64 = -1.0;

/// Output of one run. Defaults to the sentinels reported before any run.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodResult {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub matching: NodeMap,
}

impl Default for MethodResult {
    fn default() -> Self {
        Self {
            lower_bound: UNAVAILABLE,
            upper_bound: UNAVAILABLE,
            matching: NodeMap::default(),
        }
    }
}

impl MethodResult {
    pub fn has_lower_bound(&self) -> bool {
        self.lower_bound >= 0.0
    }

    pub fn has_upper_bound(&self) -> bool {
        self.upper_bound >= 0.0
    }
}

/// A run's result together with its measured runtime.
#[derive(Clone, Debug, PartialEq)]
pub struct PairResult {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub matching: NodeMap,
    pub runtime: Duration,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub entries: usize,
    pub writes: u64,
    pub overwrites: u64,
}

/// Per-pair results written by many workers, each driving its own method.
#[derive(Default)]
pub struct ResultStore {
    inner: RwLock<AHashMap<(GraphId, GraphId), PairResult>>,
    writes: AtomicU64,
    overwrites: AtomicU64,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, g: GraphId, h: GraphId, result: PairResult) -> Option<PairResult> {
        let previous = self.inner.write().insert((g, h), result);
        self.writes.fetch_add(1, Ordering::Relaxed);
        if previous.is_some() {
            self.overwrites.fetch_add(1, Ordering::Relaxed);
        }
        previous
    }

    pub fn get(&self, g: GraphId, h: GraphId) -> Option<PairResult> {
        self.inner.read().get(&(g, h)).cloned()
    }

    pub fn upper_bound(&self, g: GraphId, h: GraphId) -> f64 {
        self.inner
            .read()
            .get(&(g, h))
            .map_or(UNAVAILABLE, |r| r.upper_bound)
    }

    pub fn lower_bound(&self, g: GraphId, h: GraphId) -> f64 {
        self.inner
            .read()
            .get(&(g, h))
            .map_or(UNAVAILABLE, |r| r.lower_bound)
    }

    /// Recorded pairs in ascending order.
    pub fn pairs(&self) -> Vec<(GraphId, GraphId)> {
        let mut pairs: Vec<_> = self.inner.read().keys().copied().collect();
        pairs.sort_unstable();
        pairs
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
        self.writes.store(0, Ordering::Relaxed);
        self.overwrites.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            entries: self.len(),
            writes: self.writes.load(Ordering::Relaxed),
            overwrites: self.overwrites.load(Ordering::Relaxed),
        }
    }
}
