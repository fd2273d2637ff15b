//! Library side of the `lens` command-line tool.

pub mod bundle;
pub mod logging;
pub mod summary;
