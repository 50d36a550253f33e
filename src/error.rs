//! Error types for the DigiGold Reconciliation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during a reconciliation run.

use thiserror::Error;

use crate::models::SourceSystem;

/// The main error type for the DigiGold Reconciliation Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use digigold_recon::error::EngineError;
/// use digigold_recon::models::SourceSystem;
///
/// let error = EngineError::MissingColumn {
///     system: SourceSystem::Cashfree,
///     column: "Transaction Status".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Missing required column 'Transaction Status' in Cashfree data"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required column is absent from an input dataset.
    ///
    /// Raised before any row of the offending dataset is processed; the
    /// whole run is abandoned and no partial report is produced.
    #[error("Missing required column '{column}' in {system} data")]
    MissingColumn {
        /// The system whose dataset is missing the column.
        system: SourceSystem,
        /// The required column that was not found.
        column: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A source specification was internally inconsistent.
    #[error("Invalid source specification for {system}: {message}")]
    InvalidSourceSpec {
        /// The system whose specification is invalid.
        system: SourceSystem,
        /// A description of what made the specification invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
