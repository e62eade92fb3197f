//! Constructors for `FlagError` and conversions into `ValueError`.

use super::{FlagError, ValueError};

impl FlagError {
    /// Construct a schema error for `type_name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use conf_flags::FlagError;
    /// let err = FlagError::schema("u32", "expected a struct");
    /// assert!(matches!(err, FlagError::Schema { .. }));
    /// ```
    #[must_use]
    pub fn schema(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Schema {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Construct a duplicate flag name error.
    #[must_use]
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateFlagName { name: name.into() }
    }

    /// Construct a binding error for `flag`.
    #[must_use]
    pub fn binding(flag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Binding {
            flag: flag.into(),
            reason: reason.into(),
        }
    }

    /// Construct an invalid value error for `flag`.
    #[must_use]
    pub fn invalid_value(
        flag: impl Into<String>,
        value: impl Into<String>,
        source: ValueError,
    ) -> Self {
        Self::InvalidValue {
            flag: flag.into(),
            value: value.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for ValueError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<base64::DecodeError> for ValueError {
    fn from(err: base64::DecodeError) -> Self {
        Self::new(format!("invalid base64: {err}"))
    }
}

impl From<chrono::ParseError> for ValueError {
    fn from(err: chrono::ParseError) -> Self {
        Self::new(format!("invalid RFC 3339 timestamp: {err}"))
    }
}
