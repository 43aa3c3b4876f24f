use smallvec::SmallVec;

use crate::expression::ast::{AssignOp, BinaryOp, Expr, UnaryOp};
use crate::expression::builtin::fmod;
use crate::runtime::env::Environment;

impl Expr {
    /// Evaluate against `env`.
    ///
    /// Evaluation never fails: unbound names read as `0` (and are reported to the environment),
    /// `math.mod` by zero is `0`, and division by zero follows IEEE rules. Callers that need a
    /// finite value should go through [`Environment::safe_resolve`].
    pub fn evaluate<E: Environment + ?Sized>(&self, env: &mut E) -> f32 {
        match self {
            Self::Constant(v) => *v,
            Self::Ref { scope, name } => match env.resolve(*scope, name) {
                Some(v) => v,
                None => {
                    env.report_unbound(*scope, name);
                    0.0
                }
            },
            Self::Unary { op, expr } => {
                let v = expr.evaluate(env);
                match op {
                    UnaryOp::Neg => -v,
                    UnaryOp::Not => truth(v == 0.0),
                }
            }
            Self::Binary { op, left, right } => match op {
                BinaryOp::And => {
                    if left.evaluate(env) == 0.0 {
                        0.0
                    } else {
                        truth(right.evaluate(env) != 0.0)
                    }
                }
                BinaryOp::Or => {
                    if left.evaluate(env) != 0.0 {
                        1.0
                    } else {
                        truth(right.evaluate(env) != 0.0)
                    }
                }
                _ => {
                    let l = left.evaluate(env);
                    let r = right.evaluate(env);
                    apply_binary(*op, l, r)
                }
            },
            Self::Ternary {
                cond,
                then,
                otherwise,
            } => {
                if cond.evaluate(env) != 0.0 {
                    then.evaluate(env)
                } else {
                    otherwise.evaluate(env)
                }
            }
            Self::Assign {
                op,
                scope,
                name,
                value,
            } => {
                let rhs = value.evaluate(env);
                let out = match op {
                    AssignOp::Set => rhs,
                    _ => {
                        let cur = env.resolve(*scope, name).unwrap_or(0.0);
                        apply_assign(*op, cur, rhs)
                    }
                };
                env.assign(*scope, name, out);
                out
            }
            Self::Sequence(stmts) => {
                let mut last = 0.0;
                for s in stmts {
                    last = s.evaluate(env);
                }
                last
            }
            Self::Call { func, args } => {
                let vals: SmallVec<[f32; 4]> = args.iter().map(|a| a.evaluate(env)).collect();
                func.apply(&vals, &mut || env.next_random())
            }
        }
    }
}

pub(crate) fn truth(b: bool) -> f32 {
    if b { 1.0 } else { 0.0 }
}

/// Non-short-circuit binary arithmetic on evaluated operands.
pub(crate) fn apply_binary(op: BinaryOp, l: f32, r: f32) -> f32 {
    match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Div => l / r,
        BinaryOp::Mod => fmod(l, r),
        BinaryOp::Eq => truth(l == r),
        BinaryOp::Ne => truth(l != r),
        BinaryOp::Lt => truth(l < r),
        BinaryOp::Le => truth(l <= r),
        BinaryOp::Gt => truth(l > r),
        BinaryOp::Ge => truth(l >= r),
        BinaryOp::And => truth(l != 0.0 && r != 0.0),
        BinaryOp::Or => truth(l != 0.0 || r != 0.0),
    }
}

fn apply_assign(op: AssignOp, cur: f32, rhs: f32) -> f32 {
    match op {
        AssignOp::Set => rhs,
        AssignOp::Add => cur + rhs,
        AssignOp::Sub => cur - rhs,
        AssignOp::Mul => cur * rhs,
        AssignOp::Div => cur / rhs,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/eval.rs"]
mod tests;
