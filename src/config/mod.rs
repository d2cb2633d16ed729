//! Configuration loading, parsing, and validation.
//!
//! # Example
//!
//! ```no_run
//! use doc_frontier::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("categories: {}", config.categories.len());
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    CategoryConfig, Config, CrawlerConfig, OutputConfig, RootUrlConfig, UserAgentConfig,
};

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
