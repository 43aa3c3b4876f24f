/// Convenience result type used across the engine.
pub type MolangResult<T> = Result<T, MolangError>;

/// Top-level error taxonomy for load-time operations.
///
/// Evaluation never produces one of these: unbound names, zero divisors and non-finite math are
/// absorbed into numeric fallbacks by the evaluator. Everything here is raised while turning
/// authored content into reusable templates.
#[derive(thiserror::Error, Debug)]
pub enum MolangError {
    /// Source text contained a character or token that could not be scanned.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Token stream did not match the grammar, or named an unknown function.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A curve or keyframe definition violated a structural invariant.
    #[error("construction error: {0}")]
    Construction(String),

    /// Definition data had the wrong JSON shape.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MolangError {
    /// Build a [`MolangError::Construction`] value.
    pub fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }

    /// Build a [`MolangError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MolangError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

/// Scanning failure with the byte offset where it happened.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("lex error at byte {offset}: {message}")]
pub struct LexError {
    /// Byte offset into the source text.
    pub offset: usize,
    /// Human readable description.
    pub message: String,
}

impl LexError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

/// Grammar failure naming the offending token and the construct that was expected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("parse error at byte {offset}: expected {expected}, found {found}")]
pub struct ParseError {
    /// Byte offset of the offending token.
    pub offset: usize,
    /// Rendering of the offending token.
    pub found: String,
    /// Description of the construct the parser wanted.
    pub expected: String,
}

impl ParseError {
    pub(crate) fn new(offset: usize, found: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            offset,
            found: found.into(),
            expected: expected.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
