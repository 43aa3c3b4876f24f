pub(crate) mod eval;
pub(crate) mod json;
pub(crate) mod model;
pub(crate) mod set;
