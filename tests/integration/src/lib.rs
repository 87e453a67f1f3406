//! End-to-end tests for arksign signing and verification.
//!
//! The vectors here are shared with other `ark-v2` implementations; a signed
//! URL produced by one must verify with the others byte for byte.
//!
//! Run them with:
//! ```text
//! cargo test -p arksign-integration
//! ```

use std::sync::Once;

use arksign_auth::{ConditionSet, FixedClock, UrlSigner};
use arksign_core::SignerConfig;

static INIT: Once = Once::new();

/// Access ID used by the shared vectors.
pub const ACCESS_ID: &str = "2Aj6Wkge4hi1ZYLp0DBG";

/// Secret used by the shared vectors.
pub const ACCESS_SECRET: &str = "31sX5C0lcBiWuGPTzRszYvjxzzI3aCZjJi85ZyB7";

/// Resource URL used by the shared vectors.
pub const RESOURCE_URL: &str =
    "http://inox.qoder.byteark.com/video-objects/QDuxJm02TYqJ/playlist.m3u8";

/// Expiry used by the shared vectors.
pub const EXPIRES: i64 = 1_514_764_800;

/// Client IP bound by the shared vectors.
pub const CLIENT_IP: &str = "103.253.132.65";

/// User agent bound by the shared vectors.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_4) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.68 Safari/537.36";

/// Path prefix used by the shared vectors.
pub const PATH_PREFIX: &str = "/video-objects/QDuxJm02TYqJ/";

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Build a signer for the shared vectors, frozen 100 seconds before [`EXPIRES`].
#[must_use]
pub fn test_signer(skip_url_encoding: bool) -> UrlSigner<FixedClock> {
    init_tracing();

    let config = SignerConfig::builder()
        .access_id(ACCESS_ID)
        .access_secret(ACCESS_SECRET)
        .skip_url_encoding(skip_url_encoding)
        .build();

    UrlSigner::with_clock(config, FixedClock(EXPIRES - 100))
        .unwrap_or_else(|e| panic!("failed to build signer: {e}"))
}

/// Build a condition set from `(key, value)` pairs.
#[must_use]
pub fn conditions(pairs: &[(&str, &str)]) -> ConditionSet {
    pairs.iter().copied().collect()
}

/// The signed URL prefix shared by every vector.
#[must_use]
pub fn expected_prefix() -> String {
    format!("{RESOURCE_URL}?x_ark_access_id={ACCESS_ID}&x_ark_auth_type=ark-v2")
}

mod test_sign;
