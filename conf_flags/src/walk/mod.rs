//! Flattening of configuration records into ordered flag specifications.
//!
//! The walker visits a record's fields in declaration order. Fields whose
//! type is itself a struct are expanded in place, depth first, with their
//! names prefixed by the parent's name; every other field becomes exactly
//! one [`FieldSpec`]. Name collisions and malformed shapes are reported here,
//! before any flag set exists.

use std::collections::HashSet;

use crate::classify::{TypeCategory, classify, pretty_label, resolve_indirection};
use crate::error::FlagError;
use crate::shape::{Describe, FieldShape, RecordShape, TypeShape};

/// Separator placed between the segments of a nested flag name.
pub const NAME_SEPARATOR: &str = ".";

/// Maximum depth of nested structs.
pub const MAX_NESTING: usize = 32;

/// A single flattened leaf field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    name: String,
    category: TypeCategory,
    label: &'static str,
    usage: String,
    is_boolean: bool,
    path: Vec<&'static str>,
    order: usize,
}

impl FieldSpec {
    pub(crate) fn new(
        path: Vec<&'static str>,
        shape: &TypeShape,
        usage: impl Into<String>,
        order: usize,
    ) -> Self {
        let name = flag_name(&path);
        Self::with_name(name, path, shape, usage.into(), order)
    }

    /// A spec for a flag that is not backed by a configuration field.
    pub(crate) fn unbound(
        name: impl Into<String>,
        shape: &TypeShape,
        usage: impl Into<String>,
        order: usize,
    ) -> Self {
        Self::with_name(name.into(), Vec::new(), shape, usage.into(), order)
    }

    fn with_name(
        name: String,
        path: Vec<&'static str>,
        shape: &TypeShape,
        usage: String,
        order: usize,
    ) -> Self {
        let category = classify(shape);
        Self {
            name,
            category,
            label: pretty_label(shape),
            usage,
            is_boolean: category == TypeCategory::Boolean,
            path,
            order,
        }
    }

    /// Flag name, lower-case, nested segments joined by [`NAME_SEPARATOR`].
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Presentation category of the field's type.
    #[must_use]
    pub const fn category(&self) -> TypeCategory {
        self.category
    }

    /// Label printed after the flag name in help output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Usage text; empty when the field is undocumented.
    #[must_use]
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// Whether the field carries usage text.
    #[must_use]
    pub fn has_usage(&self) -> bool {
        !self.usage.is_empty()
    }

    /// Whether the flag is a boolean switch.
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        self.is_boolean
    }

    /// Field segments leading from the root record to this field; empty for
    /// flags that are not backed by a field.
    #[must_use]
    pub fn path(&self) -> &[&'static str] {
        &self.path
    }

    /// Position of the flag in declaration order, starting at zero.
    #[must_use]
    pub const fn order(&self) -> usize {
        self.order
    }
}

/// Flattens the configuration type `T`.
///
/// # Errors
///
/// Returns [`FlagError::Schema`] when `T` is not a struct (optionally behind
/// one `Option`), contains itself, nests too deeply, or has a field whose
/// optional wrappers never end. Returns [`FlagError::DuplicateFlagName`]
/// when two fields derive the same flag name.
pub fn flatten<T: Describe>() -> Result<Vec<FieldSpec>, FlagError> {
    flatten_shape(&T::shape())
}

/// Flattens an already evaluated shape.
///
/// # Errors
///
/// See [`flatten`].
pub fn flatten_shape(shape: &TypeShape) -> Result<Vec<FieldSpec>, FlagError> {
    let record = root_record(shape)?;
    let mut walker = Walker::default();
    walker.visit(&record)?;
    tracing::debug!(
        record = record.type_name(),
        flags = walker.specs.len(),
        "flattened configuration schema"
    );
    Ok(walker.specs)
}

fn root_record(shape: &TypeShape) -> Result<RecordShape, FlagError> {
    match shape {
        TypeShape::Record(record) => Ok(record.clone()),
        TypeShape::Optional(inner) => match inner() {
            TypeShape::Record(record) => Ok(record),
            other => Err(not_a_record(&other)),
        },
        other => Err(not_a_record(other)),
    }
}

fn not_a_record(shape: &TypeShape) -> FlagError {
    FlagError::schema(
        pretty_label(shape),
        "configuration must be a struct with named fields",
    )
}

pub(crate) fn flag_name(path: &[&str]) -> String {
    path.iter()
        .map(|segment| segment.to_lowercase())
        .collect::<Vec<_>>()
        .join(NAME_SEPARATOR)
}

#[derive(Default)]
struct Walker {
    specs: Vec<FieldSpec>,
    names: HashSet<String>,
    path: Vec<&'static str>,
    ancestors: Vec<&'static str>,
}

impl Walker {
    fn visit(&mut self, record: &RecordShape) -> Result<(), FlagError> {
        let type_name = record.type_name();
        if self.ancestors.contains(&type_name) {
            return Err(FlagError::schema(type_name, "struct contains itself"));
        }
        if self.ancestors.len() >= MAX_NESTING {
            return Err(FlagError::schema(
                type_name,
                format!("structs nest deeper than {MAX_NESTING} levels"),
            ));
        }

        self.ancestors.push(type_name);
        for field in record.fields() {
            self.path.push(field.segment());
            let shape = field.shape();
            let outcome = match &shape {
                TypeShape::Record(child) => self.visit(child),
                _ => self.emit(type_name, field, &shape),
            };
            self.path.pop();
            outcome?;
        }
        self.ancestors.pop();
        Ok(())
    }

    fn emit(
        &mut self,
        owner: &'static str,
        field: &FieldShape,
        shape: &TypeShape,
    ) -> Result<(), FlagError> {
        if resolve_indirection(shape).is_none() {
            return Err(FlagError::schema(
                owner,
                format!(
                    "optional wrappers around field `{}` never end",
                    field.segment()
                ),
            ));
        }
        let spec = FieldSpec::new(self.path.clone(), shape, field.usage(), self.specs.len());
        if !self.names.insert(spec.name().to_owned()) {
            return Err(FlagError::duplicate(spec.name()));
        }
        tracing::trace!(flag = spec.name(), category = %spec.category(), "derived flag");
        self.specs.push(spec);
        Ok(())
    }
}
