pub(crate) mod context;
pub(crate) mod env;
pub(crate) mod unbound;
