use thiserror::Error;

/// Errors that can stop pantry from starting
#[derive(Debug, Error)]
pub enum PantryError {
    #[error("Invalid config file: {0}")]
    Config(String),

    #[error("Could not initialize logging: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
