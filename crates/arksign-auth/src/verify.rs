//! Signed URL verification.
//!
//! Verification runs the checks below in order and stops at the first failure:
//!
//! 1. `x_ark_expires` must not be earlier than the verification time
//!    ([`AuthError::Expired`])
//! 2. When the URL carries a path prefix, under any spelling of its key, the
//!    URL path must start with it and must be free of `.`/`..` segments
//!    ([`AuthError::InvalidCondition`])
//! 3. The signature recomputed from the URL must equal `x_ark_signature`
//!    ([`AuthError::InvalidSignature`])
//!
//! The signature is recomputed from what the URL itself exposes. Custom
//! conditions only appear as presence markers (`1`), and the signed method is
//! never written to the query, so a URL signed with a custom condition or a
//! non-`GET` method only verifies when the caller supplies those values out of
//! band through the `bound` condition set.

use std::collections::BTreeMap;

use http::Uri;
use percent_encoding::percent_decode_str;
use serde::Serialize;
use tracing::debug;

use crate::canonical::{build_string_to_sign, canonical_host};
use crate::condition::{Condition, ConditionSet, ReservedCondition};
use crate::error::AuthError;
use crate::query::{
    ACCESS_ID_PARAM, EXPIRES_PARAM, PARAM_PREFIX, SIGNATURE_PARAM, is_fixed_param,
    parse_query_string,
};
use crate::signature::{compute_signature, signatures_match};

/// Details of a successfully verified URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedUrl {
    /// The `x_ark_access_id` carried by the URL.
    pub access_id: String,
    /// Expiry in unix seconds.
    pub expires: i64,
    /// The signed path prefix, if any.
    pub path_prefix: Option<String>,
    /// Canonical names of the custom conditions the URL was bound to.
    pub bound_conditions: Vec<String>,
}

/// Verify a signed URL at time `now`.
///
/// `bound` carries values the caller knows out of band: a `method` entry
/// replaces the default `GET`, and a custom entry replaces the presence marker
/// of the same condition. Entries for conditions the URL does not carry are
/// ignored.
///
/// # Errors
///
/// Returns [`AuthError::MissingQueryParam`] if `x_ark_expires` is absent or not
/// an integer, [`AuthError::Expired`], [`AuthError::InvalidCondition`] or
/// [`AuthError::InvalidSignature`].
pub fn verify_signed_url(
    uri: &Uri,
    secret: &str,
    now: i64,
    bound: &ConditionSet,
) -> Result<VerifiedUrl, AuthError> {
    let params = parse_query_string(uri.query().unwrap_or(""));
    let path = uri.path();

    let expires = parse_expires(params.get(EXPIRES_PARAM).map(String::as_str))?;
    if expires < now {
        debug!(expires, now, "Signed URL expired");
        return Err(AuthError::Expired { expires, now });
    }

    let conditions = reconstruct_conditions(&params, bound);

    let path_prefix = conditions.path_prefix().map(str::to_owned);
    if let Some(prefix) = &path_prefix {
        check_path_within_prefix(path, prefix)?;
    }

    let host = canonical_host(uri);

    debug!(
        host = %host,
        path,
        expires,
        conditions = conditions.len(),
        "Verifying signed URL"
    );

    let string_to_sign = build_string_to_sign(&host, path, &conditions, expires, secret);
    let expected_signature = compute_signature(&string_to_sign);
    let provided_signature = params.get(SIGNATURE_PARAM).map_or("", String::as_str);

    if !signatures_match(provided_signature, &expected_signature) {
        debug!(provided = %provided_signature, "Signed URL signature mismatch");
        return Err(AuthError::InvalidSignature);
    }

    let bound_conditions = conditions
        .custom()
        .map(|(name, _)| name.to_owned())
        .collect();

    debug!(host = %host, path, "Signed URL verification succeeded");
    Ok(VerifiedUrl {
        access_id: params.get(ACCESS_ID_PARAM).cloned().unwrap_or_default(),
        expires,
        path_prefix,
        bound_conditions,
    })
}

/// Rebuild the condition set from the `x_ark_*` query parameters, then apply
/// the caller's out-of-band values.
fn reconstruct_conditions(
    params: &BTreeMap<String, String>,
    bound: &ConditionSet,
) -> ConditionSet {
    let mut conditions: ConditionSet = params
        .iter()
        .filter(|(key, _)| !is_fixed_param(key))
        .filter_map(|(key, value)| {
            key.strip_prefix(PARAM_PREFIX)
                .map(|name| (name, value.as_str()))
        })
        .collect();

    for condition in bound.iter() {
        match condition {
            Condition::Reserved {
                kind: ReservedCondition::Method,
                value,
            } => {
                conditions.insert(ReservedCondition::Method.as_str(), value);
            }
            Condition::Reserved {
                kind: ReservedCondition::PathPrefix,
                ..
            } => {
                debug!("Ignoring caller-supplied path prefix; the URL carries its own");
            }
            Condition::Custom { name, value } => {
                if conditions.contains_key(name) {
                    conditions.insert(name, value);
                } else {
                    debug!(
                        condition = name,
                        "Ignoring value for condition the URL is not bound to"
                    );
                }
            }
        }
    }

    conditions
}

/// The path must start with `prefix` and must not contain `.` or `..`
/// segments, plain or percent-encoded, that would let it resolve outside the
/// prefix.
fn check_path_within_prefix(path: &str, prefix: &str) -> Result<(), AuthError> {
    if has_dot_segment(path) {
        debug!(path, prefix, "Dot segment in path under signed prefix");
        return Err(AuthError::InvalidCondition(format!(
            "path {path} contains a dot segment"
        )));
    }
    if !path.starts_with(prefix) {
        debug!(path, prefix, "Path outside signed prefix");
        return Err(AuthError::InvalidCondition(format!(
            "path {path} does not start with {prefix}"
        )));
    }
    Ok(())
}

fn has_dot_segment(path: &str) -> bool {
    path.split('/').any(|segment| {
        let decoded = percent_decode_str(segment).decode_utf8_lossy();
        decoded == "." || decoded == ".."
    })
}

fn parse_expires(raw: Option<&str>) -> Result<i64, AuthError> {
    let raw = raw.ok_or_else(|| AuthError::MissingQueryParam(EXPIRES_PARAM.to_owned()))?;
    raw.parse()
        .map_err(|_| AuthError::MissingQueryParam(format!("{EXPIRES_PARAM} (invalid integer)")))
}
