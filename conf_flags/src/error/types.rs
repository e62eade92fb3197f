//! Primary error enums for schema construction and value parsing.

use thiserror::Error;

/// Errors raised while turning a configuration type into a flag set.
///
/// Schema, duplicate-name and binding failures are all reported eagerly by
/// [`crate::flatten`] and [`crate::build`], so a caller can fail before any
/// help text is shown.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlagError {
    /// The configuration type is not a usable record shape.
    #[error("cannot derive flags from `{type_name}`: {reason}")]
    Schema {
        /// Name of the offending type, or its shape label.
        type_name: String,
        /// Human-readable explanation of the failure.
        reason: String,
    },

    /// Two fields flatten to the same flag name.
    #[error("flag name `{name}` is declared more than once")]
    DuplicateFlagName {
        /// The colliding flag name.
        name: String,
    },

    /// The configuration instance does not match the flattened schema.
    #[error("cannot bind flag `{flag}`: {reason}")]
    Binding {
        /// Flag (or binding path) that failed to line up.
        flag: String,
        /// Human-readable explanation of the mismatch.
        reason: String,
    },

    /// A value was supplied for a flag the set does not define.
    #[error("flag provided but not defined: -{name}")]
    UnknownFlag {
        /// The requested flag name.
        name: String,
    },

    /// A flag value could not be parsed into its bound storage.
    #[error("invalid value {value:?} for flag -{flag}: {source}")]
    InvalidValue {
        /// Flag that received the value.
        flag: String,
        /// Raw text supplied for the flag.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: ValueError,
    },

    /// Writing to the output sink failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// A single value failed to parse from its textual flag form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValueError {
    message: String,
}

impl ValueError {
    /// Creates a value error carrying `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
