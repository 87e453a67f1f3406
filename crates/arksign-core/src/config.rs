//! Signer configuration.
//!
//! Values can be set through the builder or loaded from `ARK_*` environment
//! variables. The access secret is checked by [`SignerConfig::validate`], which
//! every signer runs at construction time.

use std::fmt;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::{ConfigError, ConfigResult};

/// Default lifetime of a signed URL, in seconds.
pub const DEFAULT_AGE_SECS: u64 = 900;

/// Key material and defaults for signing and verifying URLs.
///
/// # Examples
///
/// ```
/// use arksign_core::SignerConfig;
///
/// let config = SignerConfig::builder()
///     .access_id("2Aj6Wkge4hi1ZYLp0DBG")
///     .access_secret("31sX5C0lcBiWuGPTzRszYvjxzzI3aCZjJi85ZyB7")
///     .build();
/// assert_eq!(config.default_age, 900);
/// assert!(!config.skip_url_encoding);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct SignerConfig {
    /// Identifies the key used to sign. May be empty.
    #[builder(default, setter(into))]
    #[serde(default)]
    pub access_id: String,

    /// Shared secret appended to every string-to-sign.
    #[builder(setter(into))]
    #[serde(default, skip_serializing)]
    pub access_secret: String,

    /// Lifetime in seconds applied when `sign` is called without an explicit expiry.
    #[builder(default = DEFAULT_AGE_SECS)]
    #[serde(default = "default_age")]
    pub default_age: u64,

    /// Emit query values without percent-encoding.
    #[builder(default = false)]
    #[serde(default)]
    pub skip_url_encoding: bool,
}

fn default_age() -> u64 {
    DEFAULT_AGE_SECS
}

impl SignerConfig {
    /// Load configuration from the `ARK_*` environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `ARK_ACCESS_ID` | *(empty)* |
    /// | `ARK_ACCESS_SECRET` | *(empty, rejected by [`SignerConfig::validate`])* |
    /// | `ARK_DEFAULT_AGE` | `900` |
    /// | `ARK_SKIP_URL_ENCODING` | `false` |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDefaultAge`] if `ARK_DEFAULT_AGE` is not an
    /// unsigned integer.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let mut config = Self::builder().access_secret(String::new()).build();

        if let Some(v) = lookup("ARK_ACCESS_ID") {
            config.access_id = v;
        }
        if let Some(v) = lookup("ARK_ACCESS_SECRET") {
            config.access_secret = v;
        }
        if let Some(v) = lookup("ARK_DEFAULT_AGE") {
            config.default_age = v
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidDefaultAge(v.clone()))?;
        }
        if let Some(v) = lookup("ARK_SKIP_URL_ENCODING") {
            config.skip_url_encoding = v == "1" || v.eq_ignore_ascii_case("true");
        }

        Ok(config)
    }

    /// Check that the configuration can be used to sign.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingAccessSecret`] if the secret is empty and
    /// [`ConfigError::InvalidDefaultAge`] if the default age is zero.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.access_secret.is_empty() {
            return Err(ConfigError::MissingAccessSecret);
        }
        if self.default_age == 0 {
            return Err(ConfigError::InvalidDefaultAge(self.default_age.to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerConfig")
            .field("access_id", &self.access_id)
            .field("access_secret", &"<redacted>")
            .field("default_age", &self.default_age)
            .field("skip_url_encoding", &self.skip_url_encoding)
            .finish()
    }
}
