//! Storage slots handed out while binding a configuration instance.
//!
//! Binding walks the same field paths the schema walker follows and records
//! a mutable reference to every leaf. The references are disjoint borrows of
//! the caller's instance, so the instance stays exclusively borrowed for as
//! long as the resulting [`crate::FlagSet`] lives.

use crate::error::ValueError;
use crate::shape::{Describe, TypeShape};

/// Object-safe view of a bound leaf value.
pub(crate) trait BoundValue {
    /// Parses `raw` and stores the result.
    fn assign(&mut self, raw: &str) -> Result<(), ValueError>;
    /// Formats the stored value.
    fn render(&self) -> String;
    /// Whether the stored value is the zero value of its type.
    fn holds_zero(&self) -> bool;
    /// Shape of the stored value's type.
    fn value_shape(&self) -> TypeShape;
}

impl<T: Describe> BoundValue for T {
    fn assign(&mut self, raw: &str) -> Result<(), ValueError> {
        *self = T::parse_flag(raw)?;
        Ok(())
    }

    fn render(&self) -> String {
        self.format_flag()
    }

    fn holds_zero(&self) -> bool {
        self.is_zero()
    }

    fn value_shape(&self) -> TypeShape {
        T::shape()
    }
}

/// A leaf storage location and the field path that reached it.
pub(crate) struct Slot<'a> {
    pub(crate) path: Vec<&'static str>,
    pub(crate) value: &'a mut dyn BoundValue,
}

/// Collector passed to [`Describe::bind`].
///
/// Generated `bind` implementations call [`Slots::field`] once per field, in
/// declaration order.
pub struct Slots<'a> {
    prefix: Vec<&'static str>,
    entries: Vec<Slot<'a>>,
}

impl<'a> Slots<'a> {
    pub(crate) const fn new() -> Self {
        Self {
            prefix: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Binds the field reached through `segment`.
    ///
    /// Nested structs recurse with `segment` appended to the current path;
    /// leaf values are recorded as a single slot.
    pub fn field<T: Describe>(&mut self, segment: &'static str, value: &'a mut T) {
        self.prefix.push(segment);
        value.bind(self);
        self.prefix.pop();
    }

    pub(crate) fn leaf(&mut self, value: &'a mut dyn BoundValue) {
        self.entries.push(Slot {
            path: self.prefix.clone(),
            value,
        });
    }

    pub(crate) fn into_entries(self) -> Vec<Slot<'a>> {
        self.entries
    }
}
