//! Configuration module for Docsweep
//!
//! This module handles loading, parsing, and validating TOML job files. The
//! binary can also assemble a [`Config`] from command-line flags; both paths
//! go through the same validation.
//!
//! # Example
//!
//! ```no_run
//! use docsweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("job.toml")).unwrap();
//! println!("Exporting at most {} pages", config.job.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, JobConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
