//! Error types for batch validation.

use thiserror::Error;

/// Errors that can occur during validation.
///
/// These are expected outcomes returned as values, not faults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The batch holds no records, so no statistic can be computed.
    #[error("No records to validate")]
    EmptyBatch,
}
