use crate::expression::builtin::MathFn;

/// Namespace a named value is looked up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// `variable.*`: author-declared, persists across evaluations of one instance.
    Variable,
    /// `query.*`: read-only facts supplied by the host.
    Query,
    /// `temp.*`: scratch values reset at the start of every evaluation pass.
    Temp,
    /// `context.*`: positional arguments supplied when binding a template.
    Context,
}

impl Scope {
    /// All scopes, in declaration order.
    pub const ALL: [Scope; 4] = [Scope::Variable, Scope::Query, Scope::Temp, Scope::Context];

    /// Canonical source prefix (without the trailing dot).
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Variable => "variable",
            Self::Query => "query",
            Self::Temp => "temp",
            Self::Context => "context",
        }
    }

    /// Map a source prefix, including the one-letter aliases, to its scope.
    pub fn from_prefix(s: &str) -> Option<Self> {
        match s {
            "variable" | "v" => Some(Self::Variable),
            "query" | "q" => Some(Self::Query),
            "temp" | "t" => Some(Self::Temp),
            "context" | "c" => Some(Self::Context),
            _ => None,
        }
    }

    /// Whether expressions may assign into this scope.
    pub fn is_writable(self) -> bool {
        matches!(self, Self::Variable | Self::Temp)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation.
    Neg,
    /// Logical not: `1` for zero, `0` otherwise.
    Not,
}

/// Infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`, with the zero-divisor policy of `math.mod`.
    Mod,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `&&`, short-circuiting.
    And,
    /// `||`, short-circuiting.
    Or,
}

impl BinaryOp {
    /// Source spelling.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`
    Set,
    /// `+=`
    Add,
    /// `-=`
    Sub,
    /// `*=`
    Mul,
    /// `/=`
    Div,
}

impl AssignOp {
    /// Source spelling.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Set => "=",
            Self::Add => "+=",
            Self::Sub => "-=",
            Self::Mul => "*=",
            Self::Div => "/=",
        }
    }
}

/// Expression tree.
///
/// Trees are immutable once built: [`Expr::simplify`] and [`Expr::bind`] produce new trees, so a
/// parsed template can be shared by reference across any number of evaluating threads. The only
/// side effect of evaluation is [`Expr::Assign`] writing into the caller's environment.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Constant(f32),
    /// Named value, e.g. `query.age`.
    Ref {
        /// Lookup namespace.
        scope: Scope,
        /// Name inside the scope.
        name: String,
    },
    /// Prefix operation.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        expr: Box<Expr>,
    },
    /// Infix operation.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// `cond ? then : otherwise`.
    Ternary {
        /// Condition; any non-zero value selects `then`.
        cond: Box<Expr>,
        /// Value when the condition holds.
        then: Box<Expr>,
        /// Value when it does not.
        otherwise: Box<Expr>,
    },
    /// Write into `variable.*` or `temp.*`; evaluates to the stored value.
    Assign {
        /// Operator.
        op: AssignOp,
        /// Target scope (always writable).
        scope: Scope,
        /// Target name.
        name: String,
        /// Right-hand side.
        value: Box<Expr>,
    },
    /// Statements evaluated in order; the value is the last statement's value.
    Sequence(Vec<Expr>),
    /// Built-in function call.
    Call {
        /// Function.
        func: MathFn,
        /// Arguments, arity-checked at parse time.
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Shorthand for [`Expr::Ref`].
    pub fn reference(scope: Scope, name: impl Into<String>) -> Self {
        Self::Ref {
            scope,
            name: name.into(),
        }
    }

    /// Constant value, if this node is one.
    pub fn as_constant(&self) -> Option<f32> {
        match self {
            Self::Constant(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether evaluating this tree draws random samples.
    pub fn is_random(&self) -> bool {
        match self {
            Self::Constant(_) | Self::Ref { .. } => false,
            Self::Unary { expr, .. } => expr.is_random(),
            Self::Binary { left, right, .. } => left.is_random() || right.is_random(),
            Self::Ternary {
                cond,
                then,
                otherwise,
            } => cond.is_random() || then.is_random() || otherwise.is_random(),
            Self::Assign { value, .. } => value.is_random(),
            Self::Sequence(stmts) => stmts.iter().any(Expr::is_random),
            Self::Call { func, args } => func.is_random() || args.iter().any(Expr::is_random),
        }
    }

    /// Visit every `(scope, name)` this tree reads.
    pub fn for_each_ref(&self, f: &mut impl FnMut(Scope, &str)) {
        match self {
            Self::Constant(_) => {}
            Self::Ref { scope, name } => f(*scope, name),
            Self::Unary { expr, .. } => expr.for_each_ref(f),
            Self::Binary { left, right, .. } => {
                left.for_each_ref(f);
                right.for_each_ref(f);
            }
            Self::Ternary {
                cond,
                then,
                otherwise,
            } => {
                cond.for_each_ref(f);
                then.for_each_ref(f);
                otherwise.for_each_ref(f);
            }
            Self::Assign {
                op,
                scope,
                name,
                value,
            } => {
                // Compound assignment reads its target first.
                if *op != AssignOp::Set {
                    f(*scope, name);
                }
                value.for_each_ref(f);
            }
            Self::Sequence(stmts) => stmts.iter().for_each(|s| s.for_each_ref(f)),
            Self::Call { args, .. } => args.iter().for_each(|a| a.for_each_ref(f)),
        }
    }

    /// Visit every `(scope, name)` this tree writes.
    pub fn for_each_assignment(&self, f: &mut impl FnMut(Scope, &str)) {
        match self {
            Self::Constant(_) | Self::Ref { .. } => {}
            Self::Unary { expr, .. } => expr.for_each_assignment(f),
            Self::Binary { left, right, .. } => {
                left.for_each_assignment(f);
                right.for_each_assignment(f);
            }
            Self::Ternary {
                cond,
                then,
                otherwise,
            } => {
                cond.for_each_assignment(f);
                then.for_each_assignment(f);
                otherwise.for_each_assignment(f);
            }
            Self::Assign {
                scope, name, value, ..
            } => {
                f(*scope, name);
                value.for_each_assignment(f);
            }
            Self::Sequence(stmts) => stmts.iter().for_each(|s| s.for_each_assignment(f)),
            Self::Call { args, .. } => args.iter().for_each(|a| a.for_each_assignment(f)),
        }
    }
}

/// Shared zero expression, used where a definition omits a value.
pub static ZERO: Expr = Expr::Constant(0.0);

/// Shared one expression, the default horizontal range of a curve.
pub static ONE: Expr = Expr::Constant(1.0);

#[cfg(test)]
#[path = "../../tests/unit/expression/ast.rs"]
mod tests;
