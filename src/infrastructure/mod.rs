//! Host filesystem locations inside the Zellij plugin sandbox.
//!
//! The host's filesystem is mounted under `/host`.

pub mod paths;

pub use paths::get_data_dir;
