//! Configuration module for Sitelens
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every section has built-in defaults, so a partial (or absent)
//! config file is fine.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{AnalyzerConfig, Config, FetchConfig, OutputConfig, ProxyConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, default_config_with_hash, load_config, load_config_with_hash};
