//! Signature computation for `ark-v2` tokens.
//!
//! ```text
//! Signature = Base64Url(MD5(StringToSign))   // no `=` padding
//! ```
//!
//! Every call hashes with a fresh MD5 context; no digest state survives
//! between signatures.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use md5::{Digest, Md5};
use subtle::ConstantTimeEq;

/// Compute the URL-safe signature token for a string to sign.
///
/// # Examples
///
/// ```
/// use arksign_auth::signature::compute_signature;
///
/// assert_eq!(compute_signature(""), "1B2M2Y8AsgTpgAmY7PhCfg");
/// ```
#[must_use]
pub fn compute_signature(string_to_sign: &str) -> String {
    let digest = Md5::digest(string_to_sign.as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}

/// Compare a provided signature with the expected one.
///
/// The comparison is exact and runs in time independent of where the inputs differ.
#[must_use]
pub fn signatures_match(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}
