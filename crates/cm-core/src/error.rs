//! Core error type.
//!
//! The simulation operations themselves are total; errors only surface where
//! text or configuration enters the system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown zone {0:?} (expected entry, mainHall, exit or parking)")]
    UnknownZone(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `cm-core`.
pub type CoreResult<T> = Result<T, CoreError>;
