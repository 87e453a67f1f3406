//! The [`UrlSigner`] entry point.
//!
//! A signer owns an immutable [`SignerConfig`] and a [`Clock`]. It holds no
//! other state, so one instance can be shared across threads and used for any
//! number of concurrent `sign`/`verify` calls.

use http::Uri;
use tracing::debug;

use arksign_core::{ConfigError, SignerConfig};

use crate::canonical::{build_string_to_sign, canonical_host};
use crate::clock::{Clock, SystemClock};
use crate::condition::ConditionSet;
use crate::error::AuthError;
use crate::query::{build_query_params, encode_query_string};
use crate::signature::compute_signature;
use crate::verify::{VerifiedUrl, verify_signed_url};

/// Signs and verifies `ark-v2` URLs with one access key.
///
/// # Examples
///
/// ```
/// use arksign_auth::{ConditionSet, UrlSigner};
/// use arksign_core::SignerConfig;
///
/// let signer = UrlSigner::new(
///     SignerConfig::builder()
///         .access_id("2Aj6Wkge4hi1ZYLp0DBG")
///         .access_secret("31sX5C0lcBiWuGPTzRszYvjxzzI3aCZjJi85ZyB7")
///         .build(),
/// )
/// .unwrap();
///
/// let url = "http://inox.qoder.byteark.com/video-objects/QDuxJm02TYqJ/playlist.m3u8";
/// let signed = signer.sign(url, Some(1_514_764_800), &ConditionSet::new()).unwrap();
/// assert!(signed.ends_with("&x_ark_signature=cLwtn96a-YPY7jt8ZKSf_Q"));
///
/// assert!(signer.verify(&signed, Some(1_514_764_700)).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct UrlSigner<C = SystemClock> {
    config: SignerConfig,
    clock: C,
}

impl UrlSigner<SystemClock> {
    /// Create a signer that reads the wall clock.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration fails validation.
    pub fn new(config: SignerConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> UrlSigner<C> {
    /// Create a signer with a custom time source.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration fails validation.
    pub fn with_clock(config: SignerConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, clock })
    }

    /// The configuration this signer was built with.
    #[must_use]
    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// Sign a URL.
    ///
    /// `expires` defaults to now plus the configured default age. The signed
    /// parameters are appended to `url` as is.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidUrl`] if `url` cannot be parsed.
    pub fn sign(
        &self,
        url: &str,
        expires: Option<i64>,
        conditions: &ConditionSet,
    ) -> Result<String, AuthError> {
        let uri = parse_url(url)?;
        let query = self.signed_query(&uri, expires, conditions);
        Ok(append_query(url, uri.query().is_some(), &query))
    }

    /// Sign an already parsed URI.
    #[must_use]
    pub fn sign_uri(&self, uri: &Uri, expires: Option<i64>, conditions: &ConditionSet) -> String {
        let query = self.signed_query(uri, expires, conditions);
        append_query(&uri.to_string(), uri.query().is_some(), &query)
    }

    /// Verify a signed URL.
    ///
    /// `now` defaults to the signer's clock. Only the `x_ark_*` parameters
    /// observable in the URL are used; see [`UrlSigner::verify_with`] for URLs
    /// bound to a method or custom conditions.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Expired`], [`AuthError::InvalidCondition`] or
    /// [`AuthError::InvalidSignature`] when a check fails, and
    /// [`AuthError::InvalidUrl`] or [`AuthError::MissingQueryParam`] when the
    /// URL is malformed.
    pub fn verify(&self, url: &str, now: Option<i64>) -> Result<VerifiedUrl, AuthError> {
        self.verify_with(url, now, &ConditionSet::new())
    }

    /// Verify a signed URL, supplying condition values known out of band.
    ///
    /// A `method` entry in `bound` replaces the `GET` default. A custom entry
    /// replaces the presence marker of the matching condition, e.g. the real
    /// client IP of the connection.
    ///
    /// # Errors
    ///
    /// Same as [`UrlSigner::verify`].
    pub fn verify_with(
        &self,
        url: &str,
        now: Option<i64>,
        bound: &ConditionSet,
    ) -> Result<VerifiedUrl, AuthError> {
        let uri = parse_url(url)?;
        let now = now.unwrap_or_else(|| self.clock.now());
        verify_signed_url(&uri, &self.config.access_secret, now, bound)
    }

    fn signed_query(&self, uri: &Uri, expires: Option<i64>, conditions: &ConditionSet) -> String {
        let expires = expires.unwrap_or_else(|| self.default_expires());
        let host = canonical_host(uri);

        debug!(
            host = %host,
            path = uri.path(),
            expires,
            conditions = conditions.len(),
            "Signing URL"
        );

        let string_to_sign = build_string_to_sign(
            &host,
            uri.path(),
            conditions,
            expires,
            &self.config.access_secret,
        );
        let signature = compute_signature(&string_to_sign);
        let params = build_query_params(&self.config.access_id, expires, &signature, conditions);

        encode_query_string(&params, self.config.skip_url_encoding)
    }

    fn default_expires(&self) -> i64 {
        let age = i64::try_from(self.config.default_age).unwrap_or(i64::MAX);
        self.clock.now().saturating_add(age)
    }
}

fn parse_url(url: &str) -> Result<Uri, AuthError> {
    url.parse()
        .map_err(|e: http::uri::InvalidUri| AuthError::InvalidUrl(format!("{url}: {e}")))
}

fn append_query(url: &str, has_query: bool, query: &str) -> String {
    let separator = if has_query { '&' } else { '?' };
    format!("{url}{separator}{query}")
}
