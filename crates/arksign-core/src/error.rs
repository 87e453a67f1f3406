//! Error types for signer configuration.

/// Configuration error raised while loading or validating a [`crate::SignerConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The access secret is empty or was never provided.
    #[error("access secret is required")]
    MissingAccessSecret,

    /// The default token age is zero or not a positive integer.
    #[error("invalid default age: {0} (must be a positive number of seconds)")]
    InvalidDefaultAge(String),
}

/// Convenience result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
