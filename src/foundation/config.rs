use crate::foundation::error::MolangResult;

/// Options controlling how source text becomes an expression template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParseOpts {
    /// Constant-fold the parsed tree before handing it out.
    pub simplify: bool,
    /// Reuse previously parsed templates for identical source text.
    pub cache: bool,
    /// Maximum nesting depth accepted by the parser.
    pub max_depth: usize,
}

impl Default for ParseOpts {
    fn default() -> Self {
        Self {
            simplify: true,
            cache: true,
            max_depth: 128,
        }
    }
}

/// Engine-wide options.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineOpts {
    /// Parsing behavior for [`crate::MolangCompiler`].
    pub parse: ParseOpts,
    /// Window during which a repeated unbound `(scope, name)` is not logged again.
    pub unbound_log_window_ms: u64,
    /// Fixed seed for context random sources. `None` derives a fresh seed per context.
    pub seed: Option<u64>,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            parse: ParseOpts::default(),
            unbound_log_window_ms: 10_000,
            seed: None,
        }
    }
}

impl EngineOpts {
    /// Read options from JSON. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> MolangResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Rate-limit window as a [`std::time::Duration`].
    pub fn unbound_log_window(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.unbound_log_window_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
