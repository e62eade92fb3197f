//! Procedural macros for `conf_flags`.
//!
//! [`Describe`] records a struct's field layout as a static shape and
//! generates the binding visitor that hands each leaf field to a flag set.
//! Flag name segments come from `#[conf_flags(name = "...")]`, then
//! `#[serde(rename = "...")]`, then the field identifier passed through the
//! struct's `#[serde(rename_all = "...")]` rule, or kebab-case without one.
//! Usage text comes from `#[conf_flags(help = "...")]` or the first paragraph
//! of the field's doc comment.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `conf_flags::Describe`.
///
/// Also implements `conf_flags::FlagValue` for the struct, formatting and
/// parsing it as JSON, so the struct must implement `serde::Serialize` and
/// `serde::Deserialize`.
#[proc_macro_derive(Describe, attributes(conf_flags))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
