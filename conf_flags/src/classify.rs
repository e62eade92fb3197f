//! Mapping from type shapes to presentation categories.
//!
//! Classification happens once, when a schema is flattened. Everything
//! downstream (binding checks, help labels, boolean handling) switches on the
//! resulting [`TypeCategory`] rather than looking at the shape again.

use std::fmt;

use crate::shape::TypeShape;

/// Maximum number of optional wrappers unwrapped before giving up.
pub const MAX_INDIRECTION: usize = 32;

/// Presentation category of a flag's value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    /// A switch that needs no value.
    Boolean,
    /// Free-form text.
    Text,
    /// A number.
    Numeric,
    /// An elapsed time span.
    Duration,
    /// A calendar timestamp.
    Timestamp,
    /// A byte sequence carried as base64 text.
    Binary,
    /// A sequence of values.
    List,
    /// A struct or map.
    Object,
    /// A type whose structure could not be resolved.
    Unknown,
}

impl TypeCategory {
    /// Lower-case name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Text => "text",
            Self::Numeric => "numeric",
            Self::Duration => "duration",
            Self::Timestamp => "timestamp",
            Self::Binary => "binary",
            Self::List => "list",
            Self::Object => "object",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a shape into exactly one [`TypeCategory`].
///
/// Optional wrappers are unwrapped until a concrete shape is reached. A
/// chain longer than [`MAX_INDIRECTION`] classifies as
/// [`TypeCategory::Unknown`]; the schema walker rejects such fields.
///
/// ```
/// use conf_flags::{Describe, TypeCategory, classify};
///
/// assert_eq!(classify(&<Vec<u8> as Describe>::shape()), TypeCategory::Binary);
/// assert_eq!(classify(&<Option<Option<bool>> as Describe>::shape()), TypeCategory::Boolean);
/// ```
#[must_use]
pub fn classify(shape: &TypeShape) -> TypeCategory {
    resolve_indirection(shape).map_or(TypeCategory::Unknown, |resolved| category_of(&resolved))
}

/// Returns the label shown after a flag name in help output.
///
/// ```
/// use conf_flags::{Describe, pretty_label};
///
/// assert_eq!(pretty_label(&<std::time::Duration as Describe>::shape()), "duration");
/// assert_eq!(pretty_label(&<Option<u16> as Describe>::shape()), "u16");
/// ```
#[must_use]
pub fn pretty_label(shape: &TypeShape) -> &'static str {
    let Some(resolved) = resolve_indirection(shape) else {
        return "unknown";
    };
    match resolved {
        TypeShape::Bool => "bool",
        TypeShape::Text(label) | TypeShape::Numeric(label) => label,
        TypeShape::Duration => "duration",
        TypeShape::Timestamp => "time",
        TypeShape::Record(_) | TypeShape::Map(_) => "object",
        TypeShape::Sequence(element) => {
            if is_byte(&element()) {
                "base64"
            } else {
                "list"
            }
        }
        TypeShape::Optional(_) | TypeShape::Unresolved => "unknown",
    }
}

/// Unwraps optional layers, returning `None` when the chain does not end
/// within [`MAX_INDIRECTION`] steps.
pub(crate) fn resolve_indirection(shape: &TypeShape) -> Option<TypeShape> {
    let mut current = shape.clone();
    for _ in 0..=MAX_INDIRECTION {
        if let TypeShape::Optional(inner) = current {
            current = inner();
        } else {
            return Some(current);
        }
    }
    None
}

fn category_of(shape: &TypeShape) -> TypeCategory {
    match shape {
        TypeShape::Duration => TypeCategory::Duration,
        TypeShape::Timestamp => TypeCategory::Timestamp,
        TypeShape::Record(_) | TypeShape::Map(_) => TypeCategory::Object,
        TypeShape::Sequence(element) => {
            if is_byte(&element()) {
                TypeCategory::Binary
            } else {
                TypeCategory::List
            }
        }
        TypeShape::Bool => TypeCategory::Boolean,
        TypeShape::Text(_) => TypeCategory::Text,
        TypeShape::Numeric(_) => TypeCategory::Numeric,
        TypeShape::Optional(_) | TypeShape::Unresolved => TypeCategory::Unknown,
    }
}

pub(crate) fn is_byte(shape: &TypeShape) -> bool {
    matches!(shape, TypeShape::Numeric("u8"))
}
