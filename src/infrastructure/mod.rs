//! Zellij sandbox environment helpers.
//!
//! Inside the plugin sandbox the host filesystem is reachable under `/host`.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, trace_file_path};
