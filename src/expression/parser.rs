use crate::expression::ast::{AssignOp, BinaryOp, Expr, Scope, UnaryOp};
use crate::expression::builtin::MathFn;
use crate::expression::lexer::{Token, TokenKind, tokenize};
use crate::foundation::config::ParseOpts;
use crate::foundation::error::{MolangResult, ParseError};

/// Parse source text into an unsimplified tree with default limits.
pub fn parse(src: &str) -> MolangResult<Expr> {
    parse_with(src, &ParseOpts::default())
}

/// Parse source text into an unsimplified tree.
pub fn parse_with(src: &str, opts: &ParseOpts) -> MolangResult<Expr> {
    let tokens = tokenize(src)?;
    Ok(parse_tokens(tokens, opts)?)
}

/// Parse an already tokenized stream. The stream must end with [`TokenKind::Eof`].
pub fn parse_tokens(tokens: Vec<Token>, opts: &ParseOpts) -> Result<Expr, ParseError> {
    let mut p = Parser {
        tokens,
        pos: 0,
        depth: 0,
        max_depth: opts.max_depth,
    };
    let expr = p.parse_program()?;
    p.expect(TokenKind::Eof, "end of input")?;
    Ok(expr)
}

static EOF: TokenKind = TokenKind::Eof;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    fn peek(&self) -> &TokenKind {
        self.peek_at(0)
    }

    fn peek_at(&self, ahead: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + ahead)
            .map(|t| &t.kind)
            .unwrap_or(&EOF)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| t.span.start)
            .unwrap_or(0)
    }

    fn bump(&mut self) -> TokenKind {
        let kind = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        kind
    }

    fn error(&self, expected: impl Into<String>) -> ParseError {
        ParseError::new(self.offset(), self.peek().describe(), expected)
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<(), ParseError> {
        if *self.peek() == kind {
            self.bump();
            Ok(())
        } else {
            Err(self.error(what))
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if *self.peek() == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.error(format!(
                "expression nested at most {} levels deep",
                self.max_depth
            )));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // program := statement ((';' | ',') statement)* ';'?
    fn parse_program(&mut self) -> Result<Expr, ParseError> {
        let mut stmts = vec![self.parse_assignment()?];
        while matches!(self.peek(), TokenKind::Semicolon | TokenKind::Comma) {
            self.bump();
            if *self.peek() == TokenKind::Eof {
                break;
            }
            stmts.push(self.parse_assignment()?);
        }
        if stmts.len() == 1 {
            Ok(stmts.remove(0))
        } else {
            Ok(Expr::Sequence(stmts))
        }
    }

    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        self.enter()?;
        let out = self.parse_assignment_inner();
        self.leave();
        out
    }

    fn parse_assignment_inner(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek_at(1) {
            TokenKind::Assign => Some(AssignOp::Set),
            TokenKind::PlusAssign => Some(AssignOp::Add),
            TokenKind::MinusAssign => Some(AssignOp::Sub),
            TokenKind::StarAssign => Some(AssignOp::Mul),
            TokenKind::SlashAssign => Some(AssignOp::Div),
            _ => None,
        };
        let Some(op) = op else {
            return self.parse_ternary();
        };

        let target_offset = self.offset();
        let (scope, name) = match self.peek().clone() {
            TokenKind::Path(path) => match split_scoped(&path) {
                Some((scope, name)) if scope.is_writable() => (scope, name),
                _ => {
                    return Err(ParseError::new(
                        target_offset,
                        format!("'{path}'"),
                        "variable or temp assignment target",
                    ));
                }
            },
            _ => return Err(self.error("assignment target")),
        };
        self.bump();
        self.bump();
        let value = self.parse_assignment()?;
        Ok(Expr::Assign {
            op,
            scope,
            name,
            value: Box::new(value),
        })
    }

    // Left-associative; both branches are required.
    fn parse_ternary(&mut self) -> Result<Expr, ParseError> {
        let mut e = self.parse_or()?;
        let base = self.depth;
        while self.consume(TokenKind::Question) {
            self.enter()?;
            let then = self.parse_or()?;
            self.expect(TokenKind::Colon, "':' after the true branch")?;
            let otherwise = self.parse_or()?;
            e = Expr::Ternary {
                cond: Box::new(e),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            };
        }
        self.depth = base;
        Ok(e)
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        self.fold_left(Self::parse_and, |k| {
            matches!(k, TokenKind::OrOr).then_some(BinaryOp::Or)
        })
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        self.fold_left(Self::parse_equality, |k| {
            matches!(k, TokenKind::AndAnd).then_some(BinaryOp::And)
        })
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.fold_left(Self::parse_comparison, |k| match k {
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::Ne => Some(BinaryOp::Ne),
            _ => None,
        })
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        self.fold_left(Self::parse_term, |k| match k {
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::Le => Some(BinaryOp::Le),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::Ge => Some(BinaryOp::Ge),
            _ => None,
        })
    }

    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        self.fold_left(Self::parse_factor, |k| match k {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        self.fold_left(Self::parse_unary, |k| match k {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        })
    }

    // Each fold nests the tree one level deeper, so it is charged against `max_depth`.
    fn fold_left(
        &mut self,
        operand: fn(&mut Self) -> Result<Expr, ParseError>,
        op_of: fn(&TokenKind) -> Option<BinaryOp>,
    ) -> Result<Expr, ParseError> {
        let mut e = operand(self)?;
        let base = self.depth;
        while let Some(op) = op_of(self.peek()) {
            self.bump();
            self.enter()?;
            let r = operand(self)?;
            e = binary(op, e, r);
        }
        self.depth = base;
        Ok(e)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Plus => {
                self.bump();
                return self.parse_unary();
            }
            _ => return self.parse_primary(),
        };
        self.bump();
        self.enter()?;
        let e = self.parse_unary();
        self.leave();
        Ok(Expr::Unary {
            op,
            expr: Box::new(e?),
        })
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek().clone() {
            TokenKind::Number(v) => {
                self.bump();
                Ok(Expr::Constant(v))
            }
            TokenKind::LParen => {
                self.bump();
                let e = self.parse_assignment()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(e)
            }
            TokenKind::Path(path) => {
                let offset = self.offset();
                self.bump();
                self.parse_path(&path, offset)
            }
            TokenKind::Ident(name) => Err(ParseError::new(
                self.offset(),
                format!("identifier '{name}'"),
                "scoped name such as 'query.name' or 'math.name'",
            )),
            _ => Err(self.error("expression")),
        }
    }

    fn parse_path(&mut self, path: &str, offset: usize) -> Result<Expr, ParseError> {
        let (head, rest) = path.split_once('.').unwrap_or((path, ""));

        if head == "math" || head == "m" {
            let Some(func) = MathFn::from_name(rest) else {
                return Err(ParseError::new(
                    offset,
                    format!("'{path}'"),
                    "known math function",
                ));
            };
            let args = if self.consume(TokenKind::LParen) {
                self.parse_args()?
            } else if func == MathFn::Pi {
                Vec::new()
            } else {
                return Err(self.error(format!("'(' after 'math.{rest}'")));
            };
            if args.len() != func.arity() {
                return Err(ParseError::new(
                    offset,
                    format!("{} argument(s) to 'math.{rest}'", args.len()),
                    format!("{} argument(s)", func.arity()),
                ));
            }
            return Ok(Expr::Call { func, args });
        }

        let Some((scope, name)) = split_scoped(path) else {
            return Err(ParseError::new(
                offset,
                format!("'{path}'"),
                "variable, query, temp, context or math name",
            ));
        };
        // `query.name()` is accepted as a plain lookup.
        if self.consume(TokenKind::LParen) {
            self.expect(TokenKind::RParen, "')' (query arguments are not supported)")?;
        }
        Ok(Expr::Ref { scope, name })
    }

    fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if self.consume(TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_assignment()?);
            if self.consume(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::RParen, "',' or ')'")?;
            return Ok(args);
        }
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn split_scoped(path: &str) -> Option<(Scope, String)> {
    let (head, rest) = path.split_once('.')?;
    let scope = Scope::from_prefix(head)?;
    Some((scope, rest.to_owned()))
}

#[cfg(test)]
#[path = "../../tests/unit/expression/parser.rs"]
mod tests;
