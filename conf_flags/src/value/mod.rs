//! Parsing, formatting and zero detection for flag values.
//!
//! [`FlagValue`] is the per-type capability behind every flag: it turns the
//! textual flag form into a value, renders the value back for help output,
//! and answers whether the value is the zero value of its type. The last
//! part is what decides whether help output carries a `(default ...)`
//! annotation.

pub mod duration;
mod impls;


use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ValueError;

/// Conversion between a value and its textual flag form.
pub trait FlagValue: Sized {
    /// Parses the textual flag form.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] when `raw` is not a valid representation.
    fn parse_flag(raw: &str) -> Result<Self, ValueError>;

    /// Formats the value as shown in `(default ...)` annotations.
    fn format_flag(&self) -> String;

    /// Returns `true` when the value equals the zero value of its type.
    ///
    /// Optional values are zero only when absent: `Some(0)` is an explicit
    /// value and therefore not zero.
    fn is_zero(&self) -> bool;
}

/// Returns `true` when `value` holds the zero value of its type.
///
/// ```
/// assert!(conf_flags::is_zero(&String::new()));
/// assert!(!conf_flags::is_zero(&Some(0_u8)));
/// ```
#[must_use]
pub fn is_zero<T: FlagValue>(value: &T) -> bool {
    value.is_zero()
}

/// Parses `raw` as JSON into `T`.
///
/// Used for lists, maps and derived structs.
///
/// # Errors
///
/// Returns a [`ValueError`] describing the JSON failure.
pub fn from_json<T: DeserializeOwned>(raw: &str) -> Result<T, ValueError> {
    Ok(serde_json::from_str(raw)?)
}

/// Formats `value` as compact JSON.
///
/// Serialisation failures are logged and yield an empty string, which help
/// output treats like any other text.
#[must_use]
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        tracing::warn!(
            type_name = std::any::type_name::<T>(),
            error = %err,
            "failed to format flag value"
        );
        String::new()
    })
}
