pub(crate) mod provider;
