//! Flag sets bound to a caller-owned configuration instance.
//!
//! [`build`] pairs each flattened [`FieldSpec`] with a mutable reference to
//! the field it describes. The set owns no configuration data: it borrows the
//! instance exclusively for its whole lifetime, and writes made through
//! [`FlagSet::set`] land directly in the caller's struct.
//!
//! Default detection runs once, when the set is built. Later writes update
//! the descriptor's current text but leave [`FlagDescriptor::is_default`]
//! alone until [`FlagSet::refresh_defaults`] is called.

use std::collections::HashMap;
use std::fmt;

use crate::classify::classify;
use crate::error::FlagError;
use crate::shape::{Describe, TypeShape};
use crate::slots::{BoundValue, Slots};
use crate::walk::{FieldSpec, flatten};

/// Usage text of the injected configuration file flag.
pub const FILE_FLAG_USAGE: &str = "Location to load the configuration file from.";

/// Options recognised by [`build`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Name of an extra text flag holding a configuration file path.
    ///
    /// `None` or an empty name injects nothing.
    pub file_flag: Option<String>,
}

impl BuildOptions {
    /// Options that inject a configuration file flag called `name`.
    #[must_use]
    pub fn with_file_flag(name: impl Into<String>) -> Self {
        Self {
            file_flag: Some(name.into()),
        }
    }

    fn file_flag_name(&self) -> Option<&str> {
        self.file_flag.as_deref().filter(|name| !name.is_empty())
    }
}

enum Binding<'a> {
    Field(&'a mut dyn BoundValue),
    ConfigFile(String),
}

/// A flag bound to its storage.
pub struct FlagDescriptor<'a> {
    spec: FieldSpec,
    binding: Binding<'a>,
    current_text: String,
    default_text: String,
    is_default: bool,
}

impl FlagDescriptor<'_> {
    /// The flattened field this flag was built from.
    #[must_use]
    pub const fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// Flag name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.spec.name()
    }

    /// Usage text.
    #[must_use]
    pub fn usage(&self) -> &str {
        self.spec.usage()
    }

    /// Presentation category.
    #[must_use]
    pub const fn category(&self) -> crate::TypeCategory {
        self.spec.category()
    }

    /// Whether the flag is a boolean switch.
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        self.spec.is_boolean()
    }

    /// Text of the value as last built or set through this descriptor.
    #[must_use]
    pub fn current_text(&self) -> &str {
        &self.current_text
    }

    /// Text of the value when the set was built.
    #[must_use]
    pub fn default_text(&self) -> &str {
        &self.default_text
    }

    /// Whether the value was the zero value when defaults were last
    /// detected.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.is_default
    }

    /// Whether this is the injected configuration file flag.
    #[must_use]
    pub const fn is_config_file(&self) -> bool {
        matches!(self.binding, Binding::ConfigFile(_))
    }

    fn assign(&mut self, raw: &str) -> Result<(), FlagError> {
        match &mut self.binding {
            Binding::Field(value) => {
                value
                    .assign(raw)
                    .map_err(|err| FlagError::invalid_value(self.spec.name(), raw, err))?;
                self.current_text = value.render();
            }
            Binding::ConfigFile(path) => {
                raw.clone_into(path);
                self.current_text = crate::value::to_json(raw);
            }
        }
        Ok(())
    }

    fn holds_zero(&self) -> bool {
        match &self.binding {
            Binding::Field(value) => value.holds_zero(),
            Binding::ConfigFile(path) => path.is_empty(),
        }
    }
}

impl fmt::Debug for FlagDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagDescriptor")
            .field("spec", &self.spec)
            .field("current_text", &self.current_text)
            .field("default_text", &self.default_text)
            .field("is_default", &self.is_default)
            .field("config_file", &self.is_config_file())
            .finish()
    }
}

/// Ordered collection of bound flags.
#[derive(Debug)]
pub struct FlagSet<'a> {
    flags: Vec<FlagDescriptor<'a>>,
    index: HashMap<String, usize>,
}

impl<'a> FlagSet<'a> {
    /// Flattens `C` and binds the result to `config`.
    ///
    /// # Errors
    ///
    /// Returns any error from [`flatten`] or [`build`].
    pub fn from_config<C: Describe>(
        config: &'a mut C,
        options: &BuildOptions,
    ) -> Result<Self, FlagError> {
        let specs = flatten::<C>()?;
        build(specs, config, options)
    }

    /// Number of flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether the set holds no flags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Iterates over the flags in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FlagDescriptor<'a>> {
        self.flags.iter()
    }

    /// Looks a flag up by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&FlagDescriptor<'a>> {
        self.index.get(name).and_then(|&pos| self.flags.get(pos))
    }

    /// Parses `raw` into the storage bound to `name`.
    ///
    /// The descriptor's current text is refreshed; its default status is not.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::UnknownFlag`] for undefined names and
    /// [`FlagError::InvalidValue`] when `raw` does not parse.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<(), FlagError> {
        let flag = self
            .index
            .get(name)
            .and_then(|&pos| self.flags.get_mut(pos))
            .ok_or_else(|| FlagError::UnknownFlag {
                name: name.to_owned(),
            })?;
        flag.assign(raw)?;
        tracing::debug!(flag = name, "flag value set");
        Ok(())
    }

    /// Re-runs default detection against the current values.
    pub fn refresh_defaults(&mut self) {
        for flag in &mut self.flags {
            flag.is_default = flag.holds_zero();
        }
    }

    /// Path given to the injected configuration file flag, if any.
    #[must_use]
    pub fn config_file(&self) -> Option<&str> {
        self.flags.iter().find_map(|flag| match &flag.binding {
            Binding::ConfigFile(path) if !path.is_empty() => Some(path.as_str()),
            _ => None,
        })
    }
}

impl<'s, 'a> IntoIterator for &'s FlagSet<'a> {
    type Item = &'s FlagDescriptor<'a>;
    type IntoIter = std::slice::Iter<'s, FlagDescriptor<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.iter()
    }
}

/// Binds flattened `specs` to the fields of `config`.
///
/// `specs` must come from flattening the type of `config`; the binding
/// visitor walks the same paths and every pair is checked.
///
/// # Errors
///
/// Returns [`FlagError::Binding`] when the instance's fields do not line up
/// with `specs` or an optional root is `None`, and
/// [`FlagError::DuplicateFlagName`] when the injected file
/// flag collides with a field flag.
pub fn build<'a, C: Describe>(
    specs: Vec<FieldSpec>,
    config: &'a mut C,
    options: &BuildOptions,
) -> Result<FlagSet<'a>, FlagError> {
    let mut slots = Slots::new();
    config.bind_root(&mut slots)?;
    let entries = slots.into_entries();
    if entries.len() != specs.len() {
        return Err(FlagError::binding(
            std::any::type_name::<C>(),
            format!(
                "instance exposes {} fields but the schema has {}",
                entries.len(),
                specs.len()
            ),
        ));
    }

    let mut flags = Vec::with_capacity(specs.len() + 1);
    for (spec, slot) in specs.into_iter().zip(entries) {
        if spec.path() != slot.path.as_slice() {
            return Err(FlagError::binding(
                spec.name(),
                format!("instance field path is `{}`", slot.path.join(".")),
            ));
        }
        let bound = classify(&slot.value.value_shape());
        if bound != spec.category() {
            return Err(FlagError::binding(
                spec.name(),
                format!("expected a {} value, found {bound}", spec.category()),
            ));
        }
        let text = slot.value.render();
        flags.push(FlagDescriptor {
            is_default: slot.value.holds_zero(),
            current_text: text.clone(),
            default_text: text,
            binding: Binding::Field(slot.value),
            spec,
        });
    }

    if let Some(name) = options.file_flag_name() {
        let spec = FieldSpec::unbound(
            name,
            &TypeShape::Text("string"),
            FILE_FLAG_USAGE,
            flags.len(),
        );
        flags.push(FlagDescriptor {
            spec,
            binding: Binding::ConfigFile(String::new()),
            current_text: String::from("\"\""),
            default_text: String::from("\"\""),
            is_default: true,
        });
    }

    let mut index = HashMap::with_capacity(flags.len());
    for (pos, flag) in flags.iter().enumerate() {
        if index.insert(flag.name().to_owned(), pos).is_some() {
            return Err(FlagError::duplicate(flag.name()));
        }
    }
    tracing::debug!(
        config = std::any::type_name::<C>(),
        flags = flags.len(),
        "built flag set"
    );
    Ok(FlagSet { flags, index })
}
