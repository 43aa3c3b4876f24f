use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::expression::ast::Expr;
use crate::expression::parser::parse_with;
use crate::foundation::config::ParseOpts;
use crate::foundation::error::MolangResult;

/// Turns source text into shareable expression templates.
///
/// Identical source compiled with the same `simplify` setting returns the same [`Arc`], so
/// callers may compare templates by pointer. The compiler is `Sync` and is meant to be shared.
#[derive(Debug, Default)]
pub struct MolangCompiler {
    opts: ParseOpts,
    simplified: RwLock<HashMap<String, Arc<Expr>>>,
    raw: RwLock<HashMap<String, Arc<Expr>>>,
}

impl MolangCompiler {
    /// Compiler with explicit parse options.
    pub fn new(opts: ParseOpts) -> Self {
        Self {
            opts,
            ..Default::default()
        }
    }

    /// Parse options in effect.
    pub fn opts(&self) -> &ParseOpts {
        &self.opts
    }

    /// Compile with the configured simplification setting.
    pub fn compile(&self, src: &str) -> MolangResult<Arc<Expr>> {
        self.compile_with(src, self.opts.simplify)
    }

    /// Compile, choosing whether to constant-fold.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn compile_with(&self, src: &str, simplify: bool) -> MolangResult<Arc<Expr>> {
        if !self.opts.cache {
            return self.compile_uncached(src, simplify).map(Arc::new);
        }
        let cache = if simplify { &self.simplified } else { &self.raw };
        if let Some(hit) = cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(src)
        {
            return Ok(Arc::clone(hit));
        }

        let expr = Arc::new(self.compile_uncached(src, simplify)?);
        let mut w = cache.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have won the race; keep its template.
        let entry = w.entry(src.to_owned()).or_insert(expr);
        Ok(Arc::clone(entry))
    }

    /// Compile without touching the cache.
    pub fn compile_uncached(&self, src: &str, simplify: bool) -> MolangResult<Expr> {
        let expr = parse_with(src, &self.opts)?;
        Ok(if simplify { expr.simplify() } else { expr })
    }

    /// Compile a constant without parsing.
    pub fn constant(&self, value: f32) -> Arc<Expr> {
        Arc::new(Expr::Constant(value))
    }

    /// Number of cached templates.
    pub fn cached_len(&self) -> usize {
        let s = self.simplified.read().unwrap_or_else(PoisonError::into_inner).len();
        let r = self.raw.read().unwrap_or_else(PoisonError::into_inner).len();
        s + r
    }

    /// Drop every cached template.
    pub fn clear_cache(&self) {
        self.simplified
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.raw
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/compiler.rs"]
mod tests;
