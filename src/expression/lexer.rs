use crate::foundation::error::LexError;

/// Byte range of a token in its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// First byte.
    pub start: usize,
    /// One past the last byte.
    pub end: usize,
}

/// One lexical token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What was recognised; numbers carry their value.
    pub kind: TokenKind,
    /// Where it was recognised.
    pub span: Span,
}

impl Token {
    /// Raw source text of this token.
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        src.get(self.span.start..self.span.end).unwrap_or("")
    }
}

/// Token kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Non-negative numeric literal. A leading `-` is always a separate token.
    Number(f32),
    /// Identifier without dots.
    Ident(String),
    /// Dotted path such as `query.anim_time` or `math.sin`, kept as one token.
    Path(String),

    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `;`
    Semicolon,

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,

    /// `!`
    Bang,

    /// `==`
    EqEq,
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

    /// `&&`
    AndAnd,
    /// `||`
    OrOr,

    /// `?`
    Question,
    /// `:`
    Colon,

    /// `=`
    Assign,
    /// `+=`
    PlusAssign,
    /// `-=`
    MinusAssign,
    /// `*=`
    StarAssign,
    /// `/=`
    SlashAssign,

    /// End of input.
    Eof,
}

impl TokenKind {
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Number(v) => format!("number {v}"),
            Self::Ident(s) => format!("identifier '{s}'"),
            Self::Path(s) => format!("'{s}'"),
            Self::LParen => "'('".to_owned(),
            Self::RParen => "')'".to_owned(),
            Self::Comma => "','".to_owned(),
            Self::Semicolon => "';'".to_owned(),
            Self::Plus => "'+'".to_owned(),
            Self::Minus => "'-'".to_owned(),
            Self::Star => "'*'".to_owned(),
            Self::Slash => "'/'".to_owned(),
            Self::Percent => "'%'".to_owned(),
            Self::Bang => "'!'".to_owned(),
            Self::EqEq => "'=='".to_owned(),
            Self::Ne => "'!='".to_owned(),
            Self::Lt => "'<'".to_owned(),
            Self::Le => "'<='".to_owned(),
            Self::Gt => "'>'".to_owned(),
            Self::Ge => "'>='".to_owned(),
            Self::AndAnd => "'&&'".to_owned(),
            Self::OrOr => "'||'".to_owned(),
            Self::Question => "'?'".to_owned(),
            Self::Colon => "':'".to_owned(),
            Self::Assign => "'='".to_owned(),
            Self::PlusAssign => "'+='".to_owned(),
            Self::MinusAssign => "'-='".to_owned(),
            Self::StarAssign => "'*='".to_owned(),
            Self::SlashAssign => "'/='".to_owned(),
            Self::Eof => "end of input".to_owned(),
        }
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Split source text into tokens, ending with [`TokenKind::Eof`].
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let start = i;

        // Number: [0-9]+(.[0-9]*)? or .[0-9]+
        if c.is_ascii_digit()
            || (c == b'.' && i + 1 < bytes.len() && bytes[i + 1].is_ascii_digit())
        {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i < bytes.len() && bytes[i] == b'.' {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
            }
            if i < bytes.len() && is_ident_continue(bytes[i]) {
                return Err(LexError::new(i, "invalid character in number"));
            }

            let s = &input[start..i];
            let v: f32 = s
                .parse()
                .map_err(|_| LexError::new(start, format!("invalid number '{s}'")))?;
            if !v.is_finite() {
                return Err(LexError::new(start, format!("number '{s}' is out of range")));
            }
            out.push(Token {
                kind: TokenKind::Number(v),
                span: Span { start, end: i },
            });
            continue;
        }

        // Identifier or dotted path.
        if is_ident_start(c) {
            let mut dotted = false;
            i += 1;
            loop {
                while i < bytes.len() && is_ident_continue(bytes[i]) {
                    i += 1;
                }
                if i + 1 < bytes.len() && bytes[i] == b'.' && is_ident_start(bytes[i + 1]) {
                    dotted = true;
                    i += 1;
                    continue;
                }
                break;
            }
            let s = input[start..i].to_owned();
            let kind = if dotted {
                TokenKind::Path(s)
            } else {
                TokenKind::Ident(s)
            };
            out.push(Token {
                kind,
                span: Span { start, end: i },
            });
            continue;
        }

        // Two-char operators
        if i + 1 < bytes.len() {
            let kind = match &bytes[i..i + 2] {
                b"&&" => Some(TokenKind::AndAnd),
                b"||" => Some(TokenKind::OrOr),
                b"==" => Some(TokenKind::EqEq),
                b"!=" => Some(TokenKind::Ne),
                b"<=" => Some(TokenKind::Le),
                b">=" => Some(TokenKind::Ge),
                b"+=" => Some(TokenKind::PlusAssign),
                b"-=" => Some(TokenKind::MinusAssign),
                b"*=" => Some(TokenKind::StarAssign),
                b"/=" => Some(TokenKind::SlashAssign),
                _ => None,
            };
            if let Some(kind) = kind {
                i += 2;
                out.push(Token {
                    kind,
                    span: Span { start, end: i },
                });
                continue;
            }
        }

        // Single-char tokens
        let kind = match c {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'!' => TokenKind::Bang,
            b'<' => TokenKind::Lt,
            b'>' => TokenKind::Gt,
            b'?' => TokenKind::Question,
            b':' => TokenKind::Colon,
            b'=' => TokenKind::Assign,
            b'&' | b'|' => {
                return Err(LexError::new(
                    start,
                    format!("bitwise operator '{}' is not supported", c as char),
                ));
            }
            b'\'' | b'"' => {
                return Err(LexError::new(start, "string literals are not supported"));
            }
            _ => {
                let ch = input[start..].chars().next().unwrap_or('?');
                return Err(LexError::new(start, format!("unexpected character '{ch}'")));
            }
        };
        i += 1;
        out.push(Token {
            kind,
            span: Span { start, end: i },
        });
    }

    out.push(Token {
        kind: TokenKind::Eof,
        span: Span {
            start: input.len(),
            end: input.len(),
        },
    });
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/expression/lexer.rs"]
mod tests;
