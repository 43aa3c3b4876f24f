use smallvec::SmallVec;

use crate::expression::ast::{Expr, UnaryOp};
use crate::expression::eval::{apply_binary, truth};

impl Expr {
    /// Fold constant subtrees.
    ///
    /// A node folds when every child is constant, nothing draws random samples and the folded
    /// value is finite; a ternary with a constant condition collapses to the chosen branch.
    /// Assignments are never removed. Simplifying twice gives the same tree as simplifying once.
    pub fn simplify(&self) -> Expr {
        match self {
            Self::Constant(_) | Self::Ref { .. } => self.clone(),
            Self::Unary { op, expr } => {
                let inner = expr.simplify();
                if let Some(v) = inner.as_constant() {
                    let folded = match op {
                        UnaryOp::Neg => -v,
                        UnaryOp::Not => truth(v == 0.0),
                    };
                    if folded.is_finite() {
                        return Expr::Constant(folded);
                    }
                }
                Expr::Unary {
                    op: *op,
                    expr: Box::new(inner),
                }
            }
            Self::Binary { op, left, right } => {
                let l = left.simplify();
                let r = right.simplify();
                if let (Some(a), Some(b)) = (l.as_constant(), r.as_constant()) {
                    let folded = apply_binary(*op, a, b);
                    if folded.is_finite() {
                        return Expr::Constant(folded);
                    }
                }
                Expr::Binary {
                    op: *op,
                    left: Box::new(l),
                    right: Box::new(r),
                }
            }
            Self::Ternary {
                cond,
                then,
                otherwise,
            } => {
                let c = cond.simplify();
                match c.as_constant() {
                    Some(v) if v != 0.0 => then.simplify(),
                    Some(_) => otherwise.simplify(),
                    None => Expr::Ternary {
                        cond: Box::new(c),
                        then: Box::new(then.simplify()),
                        otherwise: Box::new(otherwise.simplify()),
                    },
                }
            }
            Self::Assign {
                op,
                scope,
                name,
                value,
            } => Expr::Assign {
                op: *op,
                scope: *scope,
                name: name.clone(),
                value: Box::new(value.simplify()),
            },
            Self::Sequence(stmts) => {
                let mut out: Vec<Expr> = stmts.iter().map(Expr::simplify).collect();
                if out.len() == 1 {
                    out.remove(0)
                } else {
                    Expr::Sequence(out)
                }
            }
            Self::Call { func, args } => {
                let args: Vec<Expr> = args.iter().map(Expr::simplify).collect();
                if !func.is_random() {
                    let consts: Option<SmallVec<[f32; 4]>> =
                        args.iter().map(Expr::as_constant).collect();
                    if let Some(vals) = consts {
                        let folded = func.apply(&vals, &mut || 0.0_f32);
                        if folded.is_finite() {
                            return Expr::Constant(folded);
                        }
                    }
                }
                Expr::Call { func: *func, args }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/simplify.rs"]
mod tests;
