//! ArchView Utilities
//!
//! Configuration file loading and logging initialisation shared by the
//! other ArchView crates.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod logging;

pub use config::{load_config, load_config_or_default};
pub use logging::{init_logging, LogLevel, LoggerConfig};

/// Result type used throughout ArchView utilities
pub type Result<T> = std::result::Result<T, UtilError>;

/// Error types for utility operations
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
