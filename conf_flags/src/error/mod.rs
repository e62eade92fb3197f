//! Error types produced while deriving, binding and rendering flags.

mod constructors;
mod types;

pub use types::{FlagError, ValueError};

#[cfg(test)]
mod tests;
