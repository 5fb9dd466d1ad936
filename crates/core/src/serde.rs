//! Serde helper functions for request deserialization.
//!
//! These functions let request types tell an omitted field apart from a
//! field that was sent, and normalize blank optional strings.

use serde::{Deserialize, Deserializer};

/// Deserialize a field that may be omitted but must not be `null`.
///
/// Pair with `#[serde(default)]`: an omitted field stays `None`, a present
/// value becomes `Some`, and an explicit `null` is a deserialization error.
pub fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}
