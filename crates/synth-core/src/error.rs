//! Error types for reference data loading and validation.

/// Error type for reference data operations.
///
/// Every variant describes a broken reference dataset. None of them are
/// transient, so callers should report them and stop.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading a reference data file
    #[error("Failed to read reference data file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A weight table is empty, negative, non-finite or sums to zero
    #[error("Invalid distribution in '{table}': {reason}")]
    InvalidDistribution { table: String, reason: String },

    /// A pool that generation draws from is empty
    #[error("Pool '{table}' is empty")]
    EmptyPool { table: String },

    /// A year or count range has min > max
    #[error("Invalid range in '{table}': {min} > {max}")]
    InvalidRange { table: String, min: u32, max: u32 },

    /// A region referenced by generation has no configuration
    #[error("Region not configured: {0}")]
    UnknownRegion(String),

    /// A sector key has no configuration
    #[error("Sector not configured: {0}")]
    UnknownSector(String),

    /// A language has no name pool
    #[error("No name pool for language: {0}")]
    UnknownLanguage(String),
}

impl ConfigError {
    /// Shorthand for an [`ConfigError::InvalidDistribution`].
    pub fn invalid_distribution(table: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDistribution {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`ConfigError::EmptyPool`].
    pub fn empty_pool(table: impl Into<String>) -> Self {
        Self::EmptyPool {
            table: table.into(),
        }
    }
}

/// Check that a weight table can be sampled from.
///
/// Weights must be finite and non-negative, with at least one positive entry.
pub fn check_weights<I>(table: &str, weights: I) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = f64>,
{
    let mut count = 0usize;
    let mut total = 0.0f64;
    for weight in weights {
        if !weight.is_finite() {
            return Err(ConfigError::invalid_distribution(
                table,
                format!("weight {weight} is not finite"),
            ));
        }
        if weight < 0.0 {
            return Err(ConfigError::invalid_distribution(
                table,
                format!("weight {weight} is negative"),
            ));
        }
        total += weight;
        count += 1;
    }

    if count == 0 {
        return Err(ConfigError::invalid_distribution(table, "no weights"));
    }
    if total <= 0.0 {
        return Err(ConfigError::invalid_distribution(table, "weights sum to zero"));
    }
    Ok(())
}

/// Check that a pool has at least one entry.
pub fn check_pool<T>(table: &str, pool: &[T]) -> Result<(), ConfigError> {
    if pool.is_empty() {
        return Err(ConfigError::empty_pool(table));
    }
    Ok(())
}
