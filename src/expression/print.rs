use std::fmt;

use crate::expression::ast::{Expr, UnaryOp};
use crate::expression::builtin::MathFn;

/// Canonical source form.
///
/// Every compound node is parenthesized, so printing a simplified tree and parsing it back
/// yields the same tree once simplified again. Sequences are only printable at the top level.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence(stmts) => {
                for (i, s) in stmts.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write_expr(f, s)?;
                }
                Ok(())
            }
            _ => write_expr(f, self),
        }
    }
}

fn write_expr(f: &mut fmt::Formatter<'_>, e: &Expr) -> fmt::Result {
    match e {
        Expr::Constant(v) => write_number(f, *v),
        Expr::Ref { scope, name } => write!(f, "{scope}.{name}"),
        Expr::Unary { op, expr } => {
            let sym = match op {
                UnaryOp::Neg => "-",
                UnaryOp::Not => "!",
            };
            f.write_str("(")?;
            f.write_str(sym)?;
            write_expr(f, expr)?;
            f.write_str(")")
        }
        Expr::Binary { op, left, right } => {
            f.write_str("(")?;
            write_expr(f, left)?;
            write!(f, " {} ", op.symbol())?;
            write_expr(f, right)?;
            f.write_str(")")
        }
        Expr::Ternary {
            cond,
            then,
            otherwise,
        } => {
            f.write_str("(")?;
            write_expr(f, cond)?;
            f.write_str(" ? ")?;
            write_expr(f, then)?;
            f.write_str(" : ")?;
            write_expr(f, otherwise)?;
            f.write_str(")")
        }
        Expr::Assign {
            op,
            scope,
            name,
            value,
        } => {
            write!(f, "({scope}.{name} {} ", op.symbol())?;
            write_expr(f, value)?;
            f.write_str(")")
        }
        Expr::Sequence(stmts) => {
            f.write_str("(")?;
            for (i, s) in stmts.iter().enumerate() {
                if i > 0 {
                    f.write_str("; ")?;
                }
                write_expr(f, s)?;
            }
            f.write_str(")")
        }
        Expr::Call { func, args } => {
            if *func == MathFn::Pi {
                return write!(f, "{func}");
            }
            write!(f, "{func}(")?;
            for (i, a) in args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_expr(f, a)?;
            }
            f.write_str(")")
        }
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, v: f32) -> fmt::Result {
    if v.is_nan() {
        f.write_str("(0 / 0)")
    } else if v.is_infinite() {
        if v > 0.0 {
            f.write_str("(1 / 0)")
        } else {
            f.write_str("(-1 / 0)")
        }
    } else if v.is_sign_negative() {
        // Literals are unsigned; negation is an operator.
        write!(f, "(-{})", -v)
    } else {
        write!(f, "{v}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/print.rs"]
mod tests;
