//! Shared error model and configuration for invtag.
//!
//! This crate is the foundation depended on by all other invtag crates.
//! It provides [`InvtagError`], the unified error type, and the TOML
//! configuration layer ([`AppConfig`], config loading).

pub mod config;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{InvtagError, Result};
