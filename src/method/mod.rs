//! Uniform lifecycle for graph edit distance methods.
//!
//! An algorithm implements the [`GedAlgorithm`] hooks; [`GedMethod`] wraps it
//! with option parsing, timing and result bookkeeping so every algorithm is
//! configured, initialised, run and queried the same way:
//!
//! ```text
//! Constructed --set_options--> OptionsSet --init--> Initialized --run--> Ran
//!                                                        ^                |
//!                                                        +------run-------+
//! ```
//!
//! A `GedMethod` mutates its result on every run and is therefore driven by
//! one thread at a time. Parallel comparisons use one method per worker, all
//! borrowing the same [`GedData`].

pub mod node_map;
pub mod options;
pub mod result;

use std::time::{Duration, Instant};

use tracing::{Level, debug, warn};

pub use node_map::NodeMap;
pub use options::{OptionMap, parse_option_pairs, parse_options};
pub use result::{MethodResult, PairResult, ResultStore, StoreStats, UNAVAILABLE};

use crate::{
    errors::GedError,
    graph::{GedData, GedGraph, GraphId},
};

/// Hooks an algorithm provides to [`GedMethod`].
pub trait GedAlgorithm {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Restores every option to its default value.
    fn set_default_options(&mut self) {}

    /// Applies one option. Returns `Ok(false)` when `option` is not a valid
    /// name for this algorithm.
    fn parse_option(&mut self, _option: &str, _arg: &str) -> Result<bool, GedError> {
        Ok(false)
    }

    /// Human-readable list of accepted options, `[--<option> <arg>] [...]`.
    fn valid_options(&self) -> String {
        String::new()
    }

    fn init(&mut self, _data: &GedData) -> Result<(), GedError> {
        Ok(())
    }

    /// Computes bounds and a matching for `g` and `h` into `result`, which
    /// starts out holding the sentinel values.
    fn run(
        &mut self,
        data: &GedData,
        g: &GedGraph,
        h: &GedGraph,
        result: &mut MethodResult,
    ) -> Result<(), GedError>;
}

impl<T: GedAlgorithm + ?Sized> GedAlgorithm for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_default_options(&mut self) {
        (**self).set_default_options()
    }

    fn parse_option(&mut self, option: &str, arg: &str) -> Result<bool, GedError> {
        (**self).parse_option(option, arg)
    }

    fn valid_options(&self) -> String {
        (**self).valid_options()
    }

    fn init(&mut self, data: &GedData) -> Result<(), GedError> {
        (**self).init(data)
    }

    fn run(
        &mut self,
        data: &GedData,
        g: &GedGraph,
        h: &GedGraph,
        result: &mut MethodResult,
    ) -> Result<(), GedError> {
        (**self).run(data, g, h, result)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodState {
    Constructed,
    OptionsSet,
    Initialized,
    Ran,
}

pub struct GedMethod<'a, A> {
    data: &'a GedData,
    algorithm: A,
    state: MethodState,
    initialized: bool,
    options: OptionMap,
    result: MethodResult,
    runtime: Duration,
    init_time: Duration,
}

impl<'a, A: GedAlgorithm> GedMethod<'a, A> {
    pub fn new(data: &'a GedData, mut algorithm: A) -> Self {
        algorithm.set_default_options();
        Self {
            data,
            algorithm,
            state: MethodState::Constructed,
            initialized: false,
            options: OptionMap::new(),
            result: MethodResult::default(),
            runtime: Duration::ZERO,
            init_time: Duration::ZERO,
        }
    }

    /// Resets the algorithm to its defaults and applies `options` on top.
    ///
    /// On failure the algorithm is left at its defaults and any earlier
    /// `init` is invalidated: a configured method drops back to
    /// [`MethodState::OptionsSet`], a fresh one stays `Constructed`.
    pub fn set_options(&mut self, options: &str) -> Result<(), GedError> {
        self.algorithm.set_default_options();
        self.options.clear();
        match self.apply_options(options) {
            Ok(parsed) => {
                debug!(method = self.algorithm.name(), options = ?parsed, "options set");
                self.options = parsed;
                self.initialized = false;
                self.state = MethodState::OptionsSet;
                Ok(())
            }
            Err(err) => {
                warn!(method = self.algorithm.name(), error = %err, "rejected options");
                self.algorithm.set_default_options();
                self.initialized = false;
                if self.state != MethodState::Constructed {
                    self.state = MethodState::OptionsSet;
                }
                Err(err)
            }
        }
    }

    fn apply_options(&mut self, options: &str) -> Result<OptionMap, GedError> {
        let parsed = parse_options(options)?;
        for (name, arg) in &parsed {
            if !self.algorithm.parse_option(name, arg)? {
                return Err(GedError::UnknownOption {
                    option: format!("--{name}"),
                    valid_options: self.algorithm.valid_options(),
                });
            }
        }
        Ok(parsed)
    }

    /// Runs the algorithm's initialisation and records how long it took.
    pub fn init(&mut self) -> Result<(), GedError> {
        let start = Instant::now();
        if let Err(err) = self.algorithm.init(self.data) {
            warn!(method = self.algorithm.name(), error = %err, "init_failure");
            return Err(err);
        }
        self.init_time = start.elapsed();
        self.initialized = true;
        self.state = MethodState::Initialized;
        debug!(
            method = self.algorithm.name(),
            elapsed_micros = self.init_time.as_micros(),
            "init_complete"
        );
        Ok(())
    }

    /// Runs on graphs `g` and `h`. On success the bounds, matching and runtime
    /// are replaced; on failure the previous result is kept.
    pub fn run(&mut self, g: GraphId, h: GraphId) -> Result<(), GedError> {
        let data = self.data;
        let g_graph = data.graph(g)?;
        let h_graph = data.graph(h)?;
        let span = tracing::span!(
            Level::DEBUG,
            "ged_method.run",
            method = self.algorithm.name(),
            g,
            h
        );
        let _guard = span.enter();
        if !self.initialized {
            debug!("running without init");
        }

        let start = Instant::now();
        let mut result = MethodResult::default();
        if let Err(err) = self.algorithm.run(data, g_graph, h_graph, &mut result) {
            warn!(error = %err, elapsed_micros = start.elapsed().as_micros(), "run_failure");
            return Err(err);
        }
        self.runtime = start.elapsed();
        self.result = result;
        self.state = MethodState::Ran;
        debug!(
            lower_bound = self.result.lower_bound,
            upper_bound = self.result.upper_bound,
            elapsed_micros = self.runtime.as_micros(),
            "run_complete"
        );
        Ok(())
    }

    /// Runs on graphs outside the data context, for methods used as a
    /// building block of another method. Timing and stored results are untouched.
    pub fn run_as_util(
        &mut self,
        g: &GedGraph,
        h: &GedGraph,
        result: &mut MethodResult,
    ) -> Result<(), GedError> {
        *result = MethodResult::default();
        self.algorithm.run(self.data, g, h, result)
    }

    /// Upper bound from the last run, or `-1` if unavailable.
    pub fn get_upper_bound(&self) -> f64 {
        self.result.upper_bound
    }

    /// Lower bound from the last run, or `-1` if unavailable.
    pub fn get_lower_bound(&self) -> f64 {
        self.result.lower_bound
    }

    pub fn get_matching(&self) -> &NodeMap {
        &self.result.matching
    }

    pub fn get_runtime(&self) -> Duration {
        self.runtime
    }

    pub fn get_init_time(&self) -> Duration {
        self.init_time
    }

    pub fn result(&self) -> &MethodResult {
        &self.result
    }

    pub fn pair_result(&self) -> PairResult {
        PairResult {
            lower_bound: self.result.lower_bound,
            upper_bound: self.result.upper_bound,
            matching: self.result.matching.clone(),
            runtime: self.runtime,
        }
    }

    pub fn state(&self) -> MethodState {
        self.state
    }

    /// True once `init` has succeeded since the last options change.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Options accepted by the last successful [`GedMethod::set_options`].
    pub fn options(&self) -> &OptionMap {
        &self.options
    }

    pub fn valid_options(&self) -> String {
        self.algorithm.valid_options()
    }

    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    pub fn data(&self) -> &'a GedData {
        self.data
    }
}
