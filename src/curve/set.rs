use crate::curve::model::Curve;
use crate::expression::ast::Scope;
use crate::expression::compiler::MolangCompiler;
use crate::foundation::error::{MolangError, MolangResult};
use crate::runtime::env::Environment;

/// Named curves whose outputs are published as `variable.<name>`.
#[derive(Debug, Clone, Default)]
pub struct CurveSet {
    curves: Vec<(String, Curve)>,
}

impl CurveSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a `curves` object whose keys are `variable.<name>` (or `v.<name>`).
    ///
    /// Curves keep the order they are declared in, which is the order [`CurveSet::update`]
    /// runs them.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn from_json(value: &serde_json::Value, compiler: &MolangCompiler) -> MolangResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| MolangError::serde("curves must be a JSON object"))?;
        let mut set = Self::new();
        for (key, def) in obj {
            let name = key
                .strip_prefix("variable.")
                .or_else(|| key.strip_prefix("v."))
                .filter(|n| !n.is_empty())
                .ok_or_else(|| {
                    MolangError::construction(format!("'{key}' is not a valid variable name"))
                })?;
            let curve = Curve::from_json(def, compiler).inspect_err(|e| {
                tracing::debug!(curve = %key, error = %e, "rejected curve definition");
            })?;
            set.insert(name, curve);
        }
        tracing::debug!(count = set.len(), "loaded curves");
        Ok(set)
    }

    /// Add or replace the curve published as `variable.<name>`.
    pub fn insert(&mut self, name: impl Into<String>, curve: Curve) {
        let name = name.into();
        match self.curves.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = curve,
            None => self.curves.push((name, curve)),
        }
    }

    /// Curve published as `variable.<name>`.
    pub fn get(&self, name: &str) -> Option<&Curve> {
        self.curves.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    /// Number of curves.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Whether the set has no curves.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Iterate `(name, curve)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Curve)> {
        self.curves.iter().map(|(n, c)| (n.as_str(), c))
    }

    /// Evaluate every curve in order and store each result in `variable.<name>`.
    ///
    /// Later curves can read earlier outputs. Order is insertion order, or declaration order
    /// for sets loaded with [`CurveSet::from_json`].
    pub fn update<E: Environment + ?Sized>(&self, env: &mut E) {
        for (name, curve) in &self.curves {
            let v = curve.evaluate(env);
            env.assign(Scope::Variable, name, v);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curve/set.rs"]
mod tests;
