use std::collections::{HashMap, HashSet};

use crate::expression::ast::{Expr, Scope};

/// How a bound name gets its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Binder {
    /// Fixed value.
    Const(f32),
    /// Index into the `values` slice passed to [`Expr::bind`].
    Arg(usize),
}

/// Names to substitute when specializing a template for one instance.
#[derive(Debug, Clone, Default)]
pub struct BindCtx {
    binders: HashMap<Scope, HashMap<String, Binder>>,
}

impl BindCtx {
    /// Empty context; binding against it is the identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `scope.name` to a fixed value.
    pub fn constant(mut self, scope: Scope, name: impl Into<String>, value: f32) -> Self {
        self.insert(scope, name, Binder::Const(value));
        self
    }

    /// Bind `scope.name` to `values[index]`.
    pub fn argument(mut self, scope: Scope, name: impl Into<String>, index: usize) -> Self {
        self.insert(scope, name, Binder::Arg(index));
        self
    }

    /// Insert or replace a binder.
    pub fn insert(&mut self, scope: Scope, name: impl Into<String>, binder: Binder) {
        self.binders
            .entry(scope)
            .or_default()
            .insert(name.into(), binder);
    }

    /// Binder for `scope.name`, if any.
    pub fn get(&self, scope: Scope, name: &str) -> Option<Binder> {
        self.binders.get(&scope)?.get(name).copied()
    }

    /// Number of binders.
    pub fn len(&self) -> usize {
        self.binders.values().map(HashMap::len).sum()
    }

    /// Whether no binders are registered.
    pub fn is_empty(&self) -> bool {
        self.binders.values().all(HashMap::is_empty)
    }
}

impl Expr {
    /// Replace bound references with constants.
    ///
    /// Names the tree assigns to anywhere are left alone, since their value changes during
    /// evaluation. References with no binder, or with an argument index outside `values`, are
    /// kept as-is and resolve at evaluation time. Binding is idempotent.
    pub fn bind(&self, ctx: &BindCtx, values: &[f32]) -> Expr {
        if ctx.is_empty() {
            return self.clone();
        }
        let mut assigned: HashMap<Scope, HashSet<String>> = HashMap::new();
        self.for_each_assignment(&mut |scope, name| {
            assigned.entry(scope).or_default().insert(name.to_owned());
        });
        self.bind_inner(ctx, values, &assigned)
    }

    fn bind_inner(
        &self,
        ctx: &BindCtx,
        values: &[f32],
        assigned: &HashMap<Scope, HashSet<String>>,
    ) -> Expr {
        let rec = |e: &Expr| Box::new(e.bind_inner(ctx, values, assigned));
        match self {
            Self::Constant(_) => self.clone(),
            Self::Ref { scope, name } => {
                if assigned.get(scope).is_some_and(|names| names.contains(name)) {
                    return self.clone();
                }
                match ctx.get(*scope, name) {
                    Some(Binder::Const(v)) => Expr::Constant(v),
                    Some(Binder::Arg(i)) => match values.get(i) {
                        Some(v) => Expr::Constant(*v),
                        None => {
                            tracing::debug!(%scope, %name, index = i, "bind argument out of range");
                            self.clone()
                        }
                    },
                    None => {
                        tracing::trace!(%scope, %name, "left unbound");
                        self.clone()
                    }
                }
            }
            Self::Unary { op, expr } => Expr::Unary {
                op: *op,
                expr: rec(expr),
            },
            Self::Binary { op, left, right } => Expr::Binary {
                op: *op,
                left: rec(left),
                right: rec(right),
            },
            Self::Ternary {
                cond,
                then,
                otherwise,
            } => Expr::Ternary {
                cond: rec(cond),
                then: rec(then),
                otherwise: rec(otherwise),
            },
            Self::Assign {
                op,
                scope,
                name,
                value,
            } => Expr::Assign {
                op: *op,
                scope: *scope,
                name: name.clone(),
                value: rec(value),
            },
            Self::Sequence(stmts) => Expr::Sequence(
                stmts
                    .iter()
                    .map(|s| s.bind_inner(ctx, values, assigned))
                    .collect(),
            ),
            Self::Call { func, args } => Expr::Call {
                func: *func,
                args: args
                    .iter()
                    .map(|a| a.bind_inner(ctx, values, assigned))
                    .collect(),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/bind.rs"]
mod tests;
