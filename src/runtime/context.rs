use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::expression::ast::Scope;
use crate::foundation::config::EngineOpts;
use crate::foundation::rng::Rng64;
use crate::runtime::env::Environment;
use crate::runtime::unbound::UnboundLog;

/// Host-supplied value behind a `query.*` name.
#[derive(Clone)]
pub enum QueryValue {
    /// Value set ahead of evaluation.
    Fixed(f32),
    /// Callback read every time the query is resolved.
    Accessor(Arc<dyn Fn() -> f32 + Send + Sync>),
}

impl QueryValue {
    /// Current value.
    pub fn get(&self) -> f32 {
        match self {
            Self::Fixed(v) => *v,
            Self::Accessor(f) => f(),
        }
    }
}

impl fmt::Debug for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            Self::Accessor(_) => f.write_str("Accessor(..)"),
        }
    }
}

/// Binding context owned by one evaluation unit, such as a particle or an emitter.
///
/// Holds `variable.*`, `query.*`, `temp.*` and `context.*` values plus the unit's own random
/// source. A context must not be shared between threads while evaluating; give each worker its
/// own.
#[derive(Debug, Clone)]
pub struct MolangContext {
    variables: HashMap<String, f32>,
    queries: HashMap<String, QueryValue>,
    temps: HashMap<String, f32>,
    contexts: HashMap<String, f32>,
    rng: Rng64,
    unbound: Arc<UnboundLog>,
}

impl Default for MolangContext {
    fn default() -> Self {
        Self::new()
    }
}

impl MolangContext {
    /// Empty context with a fresh random seed and the process-wide unbound log.
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
            queries: HashMap::new(),
            temps: HashMap::new(),
            contexts: HashMap::new(),
            rng: Rng64::from_process_counter(),
            unbound: UnboundLog::global(),
        }
    }

    /// Empty context configured from engine options.
    ///
    /// A context built this way gets its own unbound log using the configured window.
    pub fn with_opts(opts: &EngineOpts) -> Self {
        let mut ctx = Self::new().with_unbound_log(Arc::new(UnboundLog::new(
            opts.unbound_log_window(),
        )));
        if let Some(seed) = opts.seed {
            ctx.rng = Rng64::new(seed);
        }
        ctx
    }

    /// Replace the random source with one seeded by `seed`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Rng64::new(seed);
        self
    }

    /// Share an unbound log with other contexts.
    pub fn with_unbound_log(mut self, log: Arc<UnboundLog>) -> Self {
        self.unbound = log;
        self
    }

    /// Unbound log this context reports to.
    pub fn unbound_log(&self) -> &Arc<UnboundLog> {
        &self.unbound
    }

    /// Set `variable.name`.
    pub fn set_variable(&mut self, name: impl Into<String>, value: f32) {
        self.variables.insert(name.into(), value);
    }

    /// Current `variable.name`.
    pub fn variable(&self, name: &str) -> Option<f32> {
        self.variables.get(name).copied()
    }

    /// Set `query.name` to a fixed value.
    pub fn set_query(&mut self, name: impl Into<String>, value: f32) {
        self.queries.insert(name.into(), QueryValue::Fixed(value));
    }

    /// Set `query.name` to a callback read on every resolve.
    pub fn set_query_fn(
        &mut self,
        name: impl Into<String>,
        f: impl Fn() -> f32 + Send + Sync + 'static,
    ) {
        self.queries
            .insert(name.into(), QueryValue::Accessor(Arc::new(f)));
    }

    /// Remove `query.name`.
    pub fn remove_query(&mut self, name: &str) -> Option<QueryValue> {
        self.queries.remove(name)
    }

    /// Set `context.name`.
    pub fn set_context(&mut self, name: impl Into<String>, value: f32) {
        self.contexts.insert(name.into(), value);
    }

    /// Current `temp.name`; temps only live for one evaluation pass.
    pub fn temp(&self, name: &str) -> Option<f32> {
        self.temps.get(name).copied()
    }

    /// Forget every `variable.*`, for reusing the context on a new instance.
    pub fn clear_variables(&mut self) {
        self.variables.clear();
    }
}

impl Environment for MolangContext {
    fn resolve(&self, scope: Scope, name: &str) -> Option<f32> {
        match scope {
            Scope::Variable => self.variables.get(name).copied(),
            Scope::Query => self.queries.get(name).map(QueryValue::get),
            Scope::Temp => self.temps.get(name).copied(),
            Scope::Context => self.contexts.get(name).copied(),
        }
    }

    fn assign(&mut self, scope: Scope, name: &str, value: f32) {
        match scope {
            Scope::Variable => {
                self.variables.insert(name.to_owned(), value);
            }
            Scope::Temp => {
                self.temps.insert(name.to_owned(), value);
            }
            Scope::Query | Scope::Context => {
                tracing::debug!(%scope, %name, "ignored write to read-only scope");
            }
        }
    }

    fn next_random(&mut self) -> f32 {
        self.rng.next_f32_01()
    }

    fn report_unbound(&mut self, scope: Scope, name: &str) {
        self.unbound.record(scope, name);
    }

    fn begin_pass(&mut self) {
        self.temps.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/context.rs"]
mod tests;
