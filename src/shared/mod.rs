//! Usage: Cross-cutting utilities shared across layers (filesystem helpers, lock recovery).

pub(crate) mod fs;
pub(crate) mod mutex_ext;
