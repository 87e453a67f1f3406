//! Signed URL generation and verification for arksign.
//!
//! A signed URL grants time-limited access to an otherwise public resource.
//! The access token travels as `x_ark_*` query parameters and covers the
//! HTTP method, host, path (or a path prefix), expiry and any number of
//! opaque conditions such as the client IP or user agent.
//!
//! # Overview
//!
//! Signing and verification share one pipeline:
//!
//! 1. Condition keys are canonicalized (lower-case, `-` to `_`)
//! 2. A string to sign is built from method, host, effective path, sorted
//!    custom conditions, expiry and the shared secret
//! 3. The string is hashed with MD5 and encoded as unpadded URL-safe base64
//! 4. The signature and condition markers are written to the query, sorted
//!    by key
//!
//! The verifier parses the query back, checks the expiry and path prefix, and
//! recomputes the signature through the same steps.
//!
//! # Usage
//!
//! ```rust
//! use arksign_auth::{AuthError, ConditionSet, UrlSigner};
//! use arksign_core::SignerConfig;
//!
//! let signer = UrlSigner::new(
//!     SignerConfig::builder()
//!         .access_id("2Aj6Wkge4hi1ZYLp0DBG")
//!         .access_secret("31sX5C0lcBiWuGPTzRszYvjxzzI3aCZjJi85ZyB7")
//!         .build(),
//! )
//! .unwrap();
//!
//! let conditions: ConditionSet = [("path_prefix", "/video-objects/QDuxJm02TYqJ/")]
//!     .into_iter()
//!     .collect();
//! let signed = signer
//!     .sign(
//!         "http://inox.qoder.byteark.com/video-objects/QDuxJm02TYqJ/playlist.m3u8",
//!         Some(1_514_764_800),
//!         &conditions,
//!     )
//!     .unwrap();
//!
//! assert!(signer.verify(&signed, Some(1_514_764_700)).is_ok());
//! assert!(matches!(
//!     signer.verify(&signed, Some(1_514_764_900)),
//!     Err(AuthError::Expired { .. })
//! ));
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Key canonicalization and string-to-sign construction
//! - [`clock`] - Time sources
//! - [`condition`] - Typed condition set
//! - [`error`] - Signing and verification error types
//! - [`query`] - Query parameter assembly and parsing
//! - [`signature`] - MD5 signature computation
//! - [`signer`] - The [`UrlSigner`] entry point
//! - [`verify`] - Signed URL verification

pub mod canonical;
pub mod clock;
pub mod condition;
pub mod error;
pub mod query;
pub mod signature;
pub mod signer;
pub mod verify;

pub use clock::{Clock, FixedClock, SystemClock};
pub use condition::{Condition, ConditionSet, ReservedCondition};
pub use error::AuthError;
pub use signer::UrlSigner;
pub use verify::{VerifiedUrl, verify_signed_url};
