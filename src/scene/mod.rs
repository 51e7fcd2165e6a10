pub(crate) mod bound;
pub(crate) mod content;
pub(crate) mod element;
pub(crate) mod node;
