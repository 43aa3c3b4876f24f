use std::sync::Arc;

use crate::expression::ast::{Expr, Scope};
use crate::foundation::rng::Rng64;
use crate::runtime::unbound::UnboundLog;

/// Runtime surface an expression evaluates against.
///
/// An environment resolves names, receives assignments and supplies random samples. Each
/// evaluating thread owns its environment; templates are shared, environments are not.
pub trait Environment {
    /// Current value of `scope.name`, or `None` when nothing is bound.
    fn resolve(&self, scope: Scope, name: &str) -> Option<f32>;

    /// Store an assignment result. Only called for writable scopes.
    fn assign(&mut self, scope: Scope, name: &str, value: f32);

    /// Uniform sample in `[0, 1)`.
    fn next_random(&mut self) -> f32;

    /// Called when a reference resolves to nothing and evaluates as `0`.
    fn report_unbound(&mut self, _scope: Scope, _name: &str) {}

    /// Called once before each top-level evaluation; clears `temp.*` state.
    fn begin_pass(&mut self) {}

    /// Evaluate `expr` as one pass, mapping a non-finite result to `0`.
    fn safe_resolve(&mut self, expr: &Expr) -> f32 {
        self.try_resolve(expr).unwrap_or(0.0)
    }

    /// Evaluate `expr` as one pass; `None` when the result is not finite.
    fn try_resolve(&mut self, expr: &Expr) -> Option<f32> {
        self.begin_pass();
        let v = expr.evaluate(self);
        if v.is_finite() {
            Some(v)
        } else {
            tracing::debug!(value = %v, expr = %expr, "non-finite expression result");
            None
        }
    }
}

/// Environment with nothing bound and a fixed random stream, for evaluating templates that
/// only depend on constants.
///
/// Unbound reads are reported to the process-wide [`UnboundLog`] unless another log is set.
#[derive(Debug, Clone)]
pub struct EmptyEnvironment {
    rng: Rng64,
    unbound: Arc<UnboundLog>,
}

impl EmptyEnvironment {
    /// Create an environment whose random samples follow `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng64::new(seed),
            unbound: UnboundLog::global(),
        }
    }

    /// Report unbound reads to `log` instead of the process-wide one.
    pub fn with_unbound_log(mut self, log: Arc<UnboundLog>) -> Self {
        self.unbound = log;
        self
    }
}

impl Default for EmptyEnvironment {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Environment for EmptyEnvironment {
    fn resolve(&self, _scope: Scope, _name: &str) -> Option<f32> {
        None
    }

    fn assign(&mut self, _scope: Scope, _name: &str, _value: f32) {}

    fn next_random(&mut self) -> f32 {
        self.rng.next_f32_01()
    }

    fn report_unbound(&mut self, scope: Scope, name: &str) {
        self.unbound.record(scope, name);
    }
}
