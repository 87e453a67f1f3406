//! Error types for signing and verifying URLs.
//!
//! Verification failures are reported through three dedicated variants,
//! [`AuthError::Expired`], [`AuthError::InvalidCondition`] and
//! [`AuthError::InvalidSignature`], so callers can map each one to its own
//! response.

/// Errors that can occur while signing or verifying a URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A fixed query parameter is absent or malformed.
    #[error("Missing required query parameter: {0}")]
    MissingQueryParam(String),

    /// The signed URL expired before the verification time.
    #[error("Signed URL expired at {expires} (now {now})")]
    Expired {
        /// Expiry carried by the URL, in unix seconds.
        expires: i64,
        /// Verification time, in unix seconds.
        now: i64,
    },

    /// A condition carried by the URL does not hold for the request.
    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    /// The recomputed signature differs from the one in the URL.
    #[error("Signature does not match")]
    InvalidSignature,
}
