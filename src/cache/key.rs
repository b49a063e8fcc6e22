//! Cache key derivation
//!
//! Keys have the form `vsports://<endpoint>:<sorted pairs>`, where the pairs
//! are `name=value` strings sorted lexicographically and joined with `&`.
//! The key is a pure function of its inputs, so it stays stable across
//! process restarts and independent of map iteration order.
//!
//! Names and values are not escaped. A value containing `&` or `=` can
//! produce the same key as a different parameter set; callers must not rely
//! on such values being cached separately. Adding escaping would change the
//! keys of entries already in the store.

use std::collections::HashMap;

/// Namespace prefix that keeps our entries apart from other users of the store
pub const CACHE_NAMESPACE: &str = "vsports";

/// Builds the cache key for an endpoint and its query parameters
///
/// # Arguments
/// * `endpoint` - Endpoint path relative to the API base (e.g., "events/detailed")
/// * `params` - Query parameters, in any order
///
/// # Returns
/// The namespaced key, e.g. `vsports://events:end_date=2024-01-31&start_date=2024-01-01`
pub fn cache_key(endpoint: &str, params: &HashMap<String, String>) -> String {
    let mut pairs: Vec<String> = params
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect();
    pairs.sort();

    format!("{}://{}:{}", CACHE_NAMESPACE, endpoint, pairs.join("&"))
}
