pub(crate) mod config;
pub(crate) mod property;
pub(crate) mod validate;
pub(crate) mod value;
