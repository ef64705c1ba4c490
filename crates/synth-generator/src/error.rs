//! Error type for record generation.

use synth_core::ConfigError;

/// Error type for generator operations.
///
/// Every variant points at broken reference data or a caller mistake; the
/// generator itself has no transient failure modes.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// A weight table cannot be sampled from
    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    /// A pool that must be drawn from is empty
    #[error("Cannot draw from empty pool: {0}")]
    EmptyPool(String),

    /// Reference data error
    #[error("Reference data error: {0}")]
    Config(#[from] ConfigError),

    /// Chunked generation was asked for zero-sized chunks
    #[error("Chunk size must be greater than zero")]
    InvalidChunkSize,
}
