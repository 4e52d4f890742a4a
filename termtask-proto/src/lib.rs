//! Shared task model and JSON wire contract for `TermTask`.

pub mod date;
pub mod task;
