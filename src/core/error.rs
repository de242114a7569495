//! Error types for data loading, configuration and inventory access.

use thiserror::Error;

/// Errors that can occur when loading RON data files.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },
}

/// Invalid tuning data. These are fatal at startup.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A combat definition needs at least one attack pattern.
    #[error("Attack pattern list for '{0}' is empty")]
    EmptyAttackPatterns(String),

    /// Inventories need at least one slot.
    #[error("Inventory size must be positive, got {0}")]
    InvalidInventorySize(usize),

    /// Roam offsets are sampled from `min..max`.
    #[error("Roam range for '{name}' is empty: {min}..{max}")]
    InvalidRoamRange { name: String, min: f32, max: f32 },
}

/// Slot access failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Slot index {index} out of range for inventory of {len} slots")]
    OutOfRange { index: usize, len: usize },
}
