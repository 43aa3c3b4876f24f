//! Molang is a small expression language for data-driven particles and animation.
//!
//! This crate evaluates authored Molang text against host-supplied values, and interpolates the
//! curves and keyframes that consume those values.
//!
//! # Pipeline overview
//!
//! 1. **Tokenize**: `&str -> Vec<Token>` ([`tokenize`])
//! 2. **Parse**: `Vec<Token> -> Expr` ([`parse`], [`parse_tokens`])
//! 3. **Simplify**: fold constant subtrees ([`Expr::simplify`])
//! 4. **Bind**: specialize a shared template for one instance ([`Expr::bind`])
//! 5. **Evaluate**: `Expr + Environment -> f32` ([`Expr::evaluate`], [`Environment::safe_resolve`])
//!
//! [`MolangCompiler`] runs steps 1 to 3 once per source string and hands out shared templates.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Immutable templates**: trees never change after construction and can be evaluated from
//!   any number of threads at once, each thread with its own [`MolangContext`].
//! - **Total evaluation**: evaluation cannot fail. Unbound names read as `0` and are logged at
//!   most once per rate-limit window; non-finite results are absorbed by `safe_resolve`.
//! - **Degrees**: trigonometric functions take and return degrees.
//!
//! # Example
//!
//! ```
//! use molang::{Environment, MolangCompiler, MolangContext};
//!
//! let compiler = MolangCompiler::default();
//! let expr = compiler.compile("math.clamp(query.age / 2, 0, 1)").unwrap();
//!
//! let mut ctx = MolangContext::new();
//! ctx.set_query("age", 1.0);
//! assert_eq!(ctx.safe_resolve(&expr), 0.5);
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod curve;
mod expression;
mod foundation;
mod runtime;

pub use animation::ease::Ease;
pub use animation::keyframe::{Interpolation, Keyframe, KeyframeChannel};
pub use curve::eval::{bezier, catmull_rom};
pub use curve::model::{Curve, CurveNode, CurveType};
pub use curve::set::CurveSet;
pub use expression::ast::{AssignOp, BinaryOp, Expr, ONE, Scope, UnaryOp, ZERO};
pub use expression::bind::{BindCtx, Binder};
pub use expression::builtin::{MAX_DIE_ROLLS, MathFn, clamp, fmod, lerp, min_angle};
pub use expression::compiler::MolangCompiler;
pub use expression::lexer::{Span, Token, TokenKind, tokenize};
pub use expression::parser::{parse, parse_tokens, parse_with};
pub use foundation::config::{EngineOpts, ParseOpts};
pub use foundation::error::{LexError, MolangError, MolangResult, ParseError};
pub use foundation::rng::Rng64;
pub use runtime::context::{MolangContext, QueryValue};
pub use runtime::env::{EmptyEnvironment, Environment};
pub use runtime::unbound::UnboundLog;
