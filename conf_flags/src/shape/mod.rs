//! Static descriptions of configuration types.
//!
//! Every type that can appear in a configuration struct implements
//! [`Describe`], which reports its [`TypeShape`] once, without inspecting a
//! value. Child shapes are reached through plain function pointers so a type
//! graph that refers back to itself can still be described; the walker and
//! classifier bound how far they follow those pointers.

mod impls;

use crate::error::FlagError;
use crate::slots::Slots;
use crate::value::FlagValue;

/// Lazily evaluated shape of a child type.
pub type ShapeFn = fn() -> TypeShape;

/// Structural description of a configuration type.
#[derive(Clone, Debug)]
pub enum TypeShape {
    /// A boolean switch.
    Bool,
    /// Free-form text; the label is shown in help output (`string`, `path`).
    Text(&'static str),
    /// A numeric primitive labelled with its Rust type name (`u16`, `f64`).
    Numeric(&'static str),
    /// An elapsed time span.
    Duration,
    /// A calendar timestamp.
    Timestamp,
    /// An ordered sequence of elements.
    Sequence(ShapeFn),
    /// A keyed map; the function describes the value type.
    Map(ShapeFn),
    /// A struct with named fields.
    Record(RecordShape),
    /// An optional wrapper around another type.
    Optional(ShapeFn),
    /// A type whose structure is not known.
    Unresolved,
}

/// Description of a struct and its fields in declaration order.
#[derive(Clone, Debug)]
pub struct RecordShape {
    type_name: &'static str,
    fields: Vec<FieldShape>,
}

impl RecordShape {
    /// Creates a record description.
    #[must_use]
    pub const fn new(type_name: &'static str, fields: Vec<FieldShape>) -> Self {
        Self { type_name, fields }
    }

    /// Fully qualified name of the described type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldShape] {
        &self.fields
    }
}

/// One named field of a [`RecordShape`].
#[derive(Clone, Copy, Debug)]
pub struct FieldShape {
    segment: &'static str,
    usage: &'static str,
    shape: ShapeFn,
}

impl FieldShape {
    /// Creates a field description.
    ///
    /// `segment` is the field's contribution to the flag name and `usage`
    /// its help text (empty when the field is undocumented).
    #[must_use]
    pub const fn new(segment: &'static str, usage: &'static str, shape: ShapeFn) -> Self {
        Self {
            segment,
            usage,
            shape,
        }
    }

    /// Flag name segment contributed by this field.
    #[must_use]
    pub const fn segment(&self) -> &'static str {
        self.segment
    }

    /// Usage text for the field.
    #[must_use]
    pub const fn usage(&self) -> &'static str {
        self.usage
    }

    /// Evaluates the field's type shape.
    #[must_use]
    pub fn shape(&self) -> TypeShape {
        (self.shape)()
    }
}

/// Types that can be described and bound as configuration.
///
/// Leaf types only provide [`Describe::shape`]; the default
/// [`Describe::bind`] registers the value itself as a single flag. Structs
/// deriving `Describe` override `bind` to hand out each field in turn.
///
/// ```
/// use conf_flags::{Describe, TypeShape};
///
/// assert!(matches!(<u16 as Describe>::shape(), TypeShape::Numeric("u16")));
/// ```
pub trait Describe: FlagValue {
    /// Returns the structural description of the type.
    fn shape() -> TypeShape;

    /// Registers the storage locations reachable from `self`.
    fn bind<'a>(&'a mut self, slots: &mut Slots<'a>) {
        slots.leaf(self);
    }

    /// Registers the storage locations of a configuration root.
    ///
    /// Roots may sit behind one `Option`, matching what [`crate::flatten`]
    /// accepts; `Option` unwraps itself here and binds the struct inside.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::Binding`] when an optional root is `None`.
    fn bind_root<'a>(&'a mut self, slots: &mut Slots<'a>) -> Result<(), FlagError> {
        self.bind(slots);
        Ok(())
    }
}
