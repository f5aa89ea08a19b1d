//! Error types for the fallible edges of the board core.
//!
//! Board and interaction operations are total: unknown ids are ignored and
//! numeric inputs are clamped. Errors only arise when parsing configuration,
//! snapshots or ids handed in by a host.

use thiserror::Error;

/// Result type for fallible board operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Errors that can occur at the board's API boundary.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Configuration values are out of range or inconsistent.
    #[error("Invalid board configuration: {0}")]
    InvalidConfig(String),

    /// Snapshot, command or configuration JSON could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An element id supplied by a host is not a valid id.
    #[error("Invalid element id: {0}")]
    InvalidElementId(String),
}
