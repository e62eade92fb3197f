//! Command-line flag surfaces derived from configuration structs.
//!
//! A configuration type derives [`Describe`], which records its field layout
//! once at compile time. [`flatten`] turns that layout into ordered
//! [`FieldSpec`]s (nested structs expand into dotted names), [`build`] binds
//! the specs to a caller-owned instance, and [`write_help`] renders usage
//! text in the layout of Go's `flag` package.
//!
//! ```
//! use std::time::Duration;
//!
//! use conf_flags::{BuildOptions, Describe, FlagSet, write_help};
//!
//! #[derive(Default, Describe, serde::Serialize, serde::Deserialize)]
//! struct Config {
//!     verbose: bool,
//!     /// request timeout
//!     timeout: Duration,
//! }
//!
//! # fn main() -> Result<(), conf_flags::FlagError> {
//! let mut config = Config::default();
//! let set = FlagSet::from_config(&mut config, &BuildOptions::default())?;
//! let mut out = Vec::new();
//! write_help(&set, "svc", &mut out)?;
//! assert_eq!(
//!     String::from_utf8_lossy(&out),
//!     "Usage of svc:\n  -verbose\n  -timeout duration\n    \trequest timeout\n"
//! );
//! # Ok(())
//! # }
//! ```

pub use conf_flags_macros::Describe;

mod classify;
mod error;
mod flag_set;
mod help;
mod loader;
mod shape;
mod slots;
pub mod value;
mod walk;

pub use classify::{MAX_INDIRECTION, TypeCategory, classify, pretty_label};
pub use error::{FlagError, ValueError};
pub use flag_set::{BuildOptions, FILE_FLAG_USAGE, FlagDescriptor, FlagSet, build};
pub use help::{write_error, write_help};
pub use loader::Loader;
pub use shape::{Describe, FieldShape, RecordShape, ShapeFn, TypeShape};
pub use slots::Slots;
pub use value::{FlagValue, is_zero};
pub use walk::{FieldSpec, MAX_NESTING, NAME_SEPARATOR, flatten, flatten_shape};

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
