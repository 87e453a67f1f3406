//! Configuration types shared by the arksign signer, verifier and CLI.
//!
//! A [`SignerConfig`] carries the key material and defaults used by every
//! signing and verification call. It is validated once, when a signer is
//! constructed, and is immutable afterwards.

mod config;
mod error;

pub use config::{DEFAULT_AGE_SECS, SignerConfig};
pub use error::{ConfigError, ConfigResult};
