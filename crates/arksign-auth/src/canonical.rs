//! String-to-sign construction for `ark-v2` signed URLs.
//!
//! The string to sign is a newline-separated list of:
//!
//! ```text
//! HTTPMethod\n
//! Host\n
//! EffectivePath\n
//! custom_key:value\n      (zero or more, sorted by canonical key)
//! Expires\n
//! AccessSecret
//! ```
//!
//! Signer and verifier both go through this module, so any two hosts running
//! it produce byte-identical output for the same inputs.

use http::Uri;

use crate::condition::{Condition, ConditionSet, ReservedCondition};

/// Method signed when no `method` condition is supplied.
pub const DEFAULT_METHOD: &str = "GET";

/// Canonicalize a condition name: lower-case, with every `-` replaced by `_`.
///
/// # Examples
///
/// ```
/// use arksign_auth::canonical::canonical_key;
///
/// assert_eq!(canonical_key("Client-IP"), "client_ip");
/// assert_eq!(canonical_key("user_agent"), "user_agent");
/// ```
#[must_use]
pub fn canonical_key(raw: &str) -> String {
    raw.to_lowercase().replace('-', "_")
}

/// Build the host line of the string to sign.
///
/// The port is kept only when it is not the default for the scheme. User info
/// never appears.
///
/// # Examples
///
/// ```
/// use arksign_auth::canonical::canonical_host;
///
/// let uri: http::Uri = "http://cdn.example.com:80/a.m3u8".parse().unwrap();
/// assert_eq!(canonical_host(&uri), "cdn.example.com");
///
/// let uri: http::Uri = "http://cdn.example.com:8080/a.m3u8".parse().unwrap();
/// assert_eq!(canonical_host(&uri), "cdn.example.com:8080");
/// ```
#[must_use]
pub fn canonical_host(uri: &Uri) -> String {
    let Some(host) = uri.host() else {
        return String::new();
    };

    match uri.port_u16() {
        Some(port) if !is_default_port(uri.scheme_str(), port) => format!("{host}:{port}"),
        _ => host.to_owned(),
    }
}

/// Build the exact string to sign for a resource and its conditions.
///
/// `path` is the URL path; it is replaced by the `path_prefix` condition when
/// one is present. The `method` condition replaces [`DEFAULT_METHOD`]. Empty
/// reserved values count as absent.
///
/// # Examples
///
/// ```
/// use arksign_auth::canonical::build_string_to_sign;
/// use arksign_auth::condition::ConditionSet;
///
/// let conditions: ConditionSet = [("user-agent", "curl"), ("client_ip", "10.0.0.1")]
///     .into_iter()
///     .collect();
/// let string_to_sign =
///     build_string_to_sign("cdn.example.com", "/a.m3u8", &conditions, 1_514_764_800, "s3cr3t");
/// assert_eq!(
///     string_to_sign,
///     "GET\ncdn.example.com\n/a.m3u8\nclient_ip:10.0.0.1\nuser_agent:curl\n1514764800\ns3cr3t"
/// );
/// ```
#[must_use]
pub fn build_string_to_sign(
    host: &str,
    path: &str,
    conditions: &ConditionSet,
    expires: i64,
    secret: &str,
) -> String {
    let mut method = DEFAULT_METHOD;
    let mut effective_path = path;
    let mut custom_lines = Vec::new();

    // Iteration is already in canonical key order.
    for condition in conditions.iter() {
        match condition {
            Condition::Reserved {
                kind: ReservedCondition::Method,
                value,
            } => {
                if !value.is_empty() {
                    method = value;
                }
            }
            Condition::Reserved {
                kind: ReservedCondition::PathPrefix,
                value,
            } => {
                if !value.is_empty() {
                    effective_path = value;
                }
            }
            Condition::Custom { name, value } => custom_lines.push(format!("{name}:{value}")),
        }
    }

    let expires = expires.to_string();
    let mut lines: Vec<&str> = Vec::with_capacity(custom_lines.len() + 5);
    lines.push(method);
    lines.push(host);
    lines.push(effective_path);
    lines.extend(custom_lines.iter().map(String::as_str));
    lines.push(&expires);
    lines.push(secret);

    lines.join("\n")
}

fn is_default_port(scheme: Option<&str>, port: u16) -> bool {
    matches!((scheme, port), (Some("http"), 80) | (Some("https"), 443))
}
