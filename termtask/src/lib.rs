//! `TermTask` — terminal-native task manager library.

pub mod app;
pub mod config;
pub mod net;
pub mod store;
pub mod tasks;
pub mod ui;
