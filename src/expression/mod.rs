pub(crate) mod ast;
pub(crate) mod bind;
pub(crate) mod builtin;
pub(crate) mod compiler;
pub(crate) mod eval;
pub(crate) mod lexer;
pub(crate) mod parser;
pub(crate) mod print;
pub(crate) mod simplify;
