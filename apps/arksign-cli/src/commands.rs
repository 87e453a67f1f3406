//! Subcommand implementations.

use anyhow::{Context, Result};
use arksign_auth::{AuthError, ConditionSet, UrlSigner, VerifiedUrl};
use arksign_core::SignerConfig;
use tracing::info;

use crate::args::CredentialArgs;

/// Exit code for an expired URL.
pub const EXIT_EXPIRED: i32 = 2;
/// Exit code for a violated condition.
pub const EXIT_INVALID_CONDITION: i32 = 3;
/// Exit code for a signature mismatch.
pub const EXIT_INVALID_SIGNATURE: i32 = 4;

/// Load `ARK_*` settings and apply command-line overrides on top.
pub fn build_config(
    credentials: &CredentialArgs,
    skip_url_encoding: bool,
) -> Result<SignerConfig> {
    let config = SignerConfig::from_env().context("invalid ARK_* environment")?;
    Ok(apply_overrides(config, credentials, skip_url_encoding))
}

/// Apply command-line overrides on top of `config`.
#[must_use]
pub fn apply_overrides(
    mut config: SignerConfig,
    credentials: &CredentialArgs,
    skip_url_encoding: bool,
) -> SignerConfig {
    if let Some(v) = &credentials.access_id {
        config.access_id.clone_from(v);
    }
    if let Some(v) = &credentials.access_secret {
        config.access_secret.clone_from(v);
    }
    if let Some(v) = credentials.default_age {
        config.default_age = v;
    }
    config.skip_url_encoding |= skip_url_encoding;

    config
}

/// Sign `url` and return the signed URL.
pub fn sign(
    config: SignerConfig,
    url: &str,
    expires: Option<i64>,
    conditions: &[(String, String)],
) -> Result<String> {
    let signer = UrlSigner::new(config).context("cannot build signer")?;
    let conditions: ConditionSet = conditions.iter().cloned().collect();

    let signed = signer
        .sign(url, expires, &conditions)
        .with_context(|| format!("failed to sign {url}"))?;

    info!(conditions = conditions.len(), "signed URL");
    Ok(signed)
}

/// Verify `url`, returning the verification outcome.
///
/// The outer error covers problems unrelated to the URL itself (bad
/// configuration); the inner result is the verification verdict.
pub fn verify(
    config: SignerConfig,
    url: &str,
    now: Option<i64>,
    conditions: &[(String, String)],
) -> Result<Result<VerifiedUrl, AuthError>> {
    let signer = UrlSigner::new(config).context("cannot build signer")?;
    let bound: ConditionSet = conditions.iter().cloned().collect();
    Ok(signer.verify_with(url, now, &bound))
}

/// Render a successful verification.
pub fn render_verified(verified: &VerifiedUrl, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(verified).context("cannot serialize result");
    }

    let mut out = format!("valid (access_id={}, expires={}", verified.access_id, verified.expires);
    if let Some(prefix) = &verified.path_prefix {
        out.push_str(&format!(", path_prefix={prefix}"));
    }
    if !verified.bound_conditions.is_empty() {
        out.push_str(&format!(", bound={}", verified.bound_conditions.join(",")));
    }
    out.push(')');
    Ok(out)
}

/// Process exit code for a verification failure.
#[must_use]
pub fn exit_code(error: &AuthError) -> i32 {
    match error {
        AuthError::Expired { .. } => EXIT_EXPIRED,
        AuthError::InvalidCondition(_) => EXIT_INVALID_CONDITION,
        AuthError::InvalidSignature => EXIT_INVALID_SIGNATURE,
        AuthError::InvalidUrl(_) | AuthError::MissingQueryParam(_) => 1,
    }
}
