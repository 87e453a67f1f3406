//! Query parameters carried by a signed URL.
//!
//! A signed URL always carries the four fixed parameters:
//!
//! - `x_ark_access_id` - Identifier of the signing key
//! - `x_ark_auth_type` - Always `ark-v2`
//! - `x_ark_expires` - Expiry in unix seconds
//! - `x_ark_signature` - The URL-safe signature
//!
//! plus `x_ark_path_prefix` with the real prefix value when one was signed,
//! and an `x_ark_<name>=1` presence marker for every custom condition. The
//! bound value of a custom condition is never written to the URL.

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::condition::{Condition, ConditionSet, ReservedCondition};

/// Prefix shared by every signed URL query parameter.
pub const PARAM_PREFIX: &str = "x_ark_";

/// Query parameter holding the access ID.
pub const ACCESS_ID_PARAM: &str = "x_ark_access_id";

/// Query parameter holding the auth type.
pub const AUTH_TYPE_PARAM: &str = "x_ark_auth_type";

/// Query parameter holding the expiry.
pub const EXPIRES_PARAM: &str = "x_ark_expires";

/// Query parameter holding the signature.
pub const SIGNATURE_PARAM: &str = "x_ark_signature";

/// Query parameter holding the signed path prefix.
pub const PATH_PREFIX_PARAM: &str = "x_ark_path_prefix";

/// Value of [`AUTH_TYPE_PARAM`].
pub const AUTH_TYPE: &str = "ark-v2";

/// Value written for custom conditions in place of their bound value.
pub const PRESENCE_MARKER: &str = "1";

/// Characters left as-is when encoding query keys and values: the RFC 3986
/// unreserved set (A-Z, a-z, 0-9, `-`, `_`, `.`, `~`).
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Assemble the signed URL query parameters, sorted by key.
///
/// The `method` condition is signed but never written to the query.
///
/// # Examples
///
/// ```
/// use arksign_auth::condition::ConditionSet;
/// use arksign_auth::query::build_query_params;
///
/// let conditions: ConditionSet = [("client-ip", "10.0.0.1"), ("method", "HEAD")]
///     .into_iter()
///     .collect();
/// let params = build_query_params("key", 1_514_764_800, "sig", &conditions);
/// let keys: Vec<&str> = params.keys().map(String::as_str).collect();
/// assert_eq!(
///     keys,
///     [
///         "x_ark_access_id",
///         "x_ark_auth_type",
///         "x_ark_client_ip",
///         "x_ark_expires",
///         "x_ark_signature",
///     ]
/// );
/// assert_eq!(params["x_ark_client_ip"], "1");
/// ```
#[must_use]
pub fn build_query_params(
    access_id: &str,
    expires: i64,
    signature: &str,
    conditions: &ConditionSet,
) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    params.insert(ACCESS_ID_PARAM.to_owned(), access_id.to_owned());
    params.insert(AUTH_TYPE_PARAM.to_owned(), AUTH_TYPE.to_owned());
    params.insert(EXPIRES_PARAM.to_owned(), expires.to_string());
    params.insert(SIGNATURE_PARAM.to_owned(), signature.to_owned());

    for condition in conditions.iter() {
        match condition {
            Condition::Reserved {
                kind: ReservedCondition::Method,
                ..
            } => {}
            Condition::Reserved {
                kind: ReservedCondition::PathPrefix,
                value,
            } => {
                params.insert(PATH_PREFIX_PARAM.to_owned(), value.to_owned());
            }
            Condition::Custom { name, .. } => {
                params.insert(format!("{PARAM_PREFIX}{name}"), PRESENCE_MARKER.to_owned());
            }
        }
    }

    params
}

/// Serialize query parameters in key order.
///
/// Keys and values are percent-encoded unless `skip_url_encoding` is set.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// use arksign_auth::query::encode_query_string;
///
/// let params = BTreeMap::from([("x_ark_path_prefix".to_owned(), "/videos/".to_owned())]);
/// assert_eq!(encode_query_string(&params, false), "x_ark_path_prefix=%2Fvideos%2F");
/// assert_eq!(encode_query_string(&params, true), "x_ark_path_prefix=/videos/");
/// ```
#[must_use]
pub fn encode_query_string(params: &BTreeMap<String, String>, skip_url_encoding: bool) -> String {
    params
        .iter()
        .map(|(key, value)| {
            if skip_url_encoding {
                format!("{key}={value}")
            } else {
                format!("{}={}", query_encode(key), query_encode(value))
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Parse a raw query string into decoded key/value pairs.
///
/// Parameters without `=` map to an empty value. When a key repeats, the last
/// occurrence wins.
#[must_use]
pub fn parse_query_string(query: &str) -> BTreeMap<String, String> {
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|param| {
            let (key, value) = param.split_once('=').unwrap_or((param, ""));
            (url_decode(key), url_decode(value))
        })
        .collect()
}

/// Whether a query key is one of the four fixed parameters.
#[must_use]
pub fn is_fixed_param(key: &str) -> bool {
    matches!(
        key,
        ACCESS_ID_PARAM | AUTH_TYPE_PARAM | EXPIRES_PARAM | SIGNATURE_PARAM
    )
}

fn query_encode(input: &str) -> String {
    utf8_percent_encode(input, QUERY_ENCODE_SET).to_string()
}

fn url_decode(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}
