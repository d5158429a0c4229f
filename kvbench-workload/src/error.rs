use thiserror::Error;

/// Invalid parameters for a [`Workload`](crate::Workload) or a
/// [`KeyDistribution`](crate::KeyDistribution).
///
/// All of these are raised while validating the configuration, before any operation is generated.
#[derive(Debug, Error)]
pub enum WorkloadError {
    /// The key space is empty.
    #[error("key_count must be positive")]
    InvalidKeyCount,

    /// The Zipfian skew is zero, negative or not a number.
    #[error("skew must be a positive number, got {0}")]
    InvalidSkew(f64),

    /// The proportion of reads is outside of `[0, 1]`.
    #[error("read_proportion must be between 0 and 1, got {0}")]
    InvalidReadProportion(f64),

    /// Values for write operations would be empty.
    #[error("value_length must be positive")]
    InvalidValueLength,

    /// The distribution name is neither `uniform` nor `zipf`.
    #[error("distribution must be 'uniform' or 'zipf', got '{0}'")]
    UnknownDistribution(String),
}

/// Result type for workload construction.
pub type Result<T, E = WorkloadError> = std::result::Result<T, E>;
