use thiserror::Error;

/// Error type for share splitting and reconstruction operations
#[derive(Error, Debug)]
pub enum ShareError {
    /// Field table construction produced inconsistent exp/log tables
    #[error("Field table initialization failed")]
    InitializationFailed,

    /// Invalid total shares count (must be 2 <= count <= 255)
    #[error("Invalid share count {0}")]
    InvalidShareCount(u8),

    /// Invalid threshold value (must be 2 <= threshold <= 255)
    #[error("Invalid threshold value {0}")]
    InvalidThreshold(u8),

    /// Threshold exceeds total shares
    #[error("Threshold {threshold} exceeds total shares {total_shares}")]
    ThresholdTooLarge { threshold: u8, total_shares: u8 },

    /// The secret to split contained no bytes
    #[error("Secret must not be empty")]
    EmptySecret,

    /// Token does not match the expected hex share pattern
    #[error("Invalid share format")]
    InvalidShareFormat,

    /// Share id parsed from a token is out of range
    #[error("Invalid share id {0}")]
    InvalidShareId(u8),

    /// Decoded share payloads disagree on secret length
    #[error("Inconsistent share lengths")]
    InconsistentShareLength,

    /// The system random source could not be reached
    #[error("Random source unavailable")]
    RandomSourceUnavailable,
}

pub type Result<T> = std::result::Result<T, ShareError>;
