pub(crate) mod builder;
pub(crate) mod frame;
pub(crate) mod kind;
