//! Parsing of `#[conf_flags(...)]`, serde and doc attributes.

use syn::{Attribute, Token, parenthesized};

mod doc_attrs;
mod input;
mod literals;
mod serde_attrs;
#[cfg(test)]
mod tests;

pub(crate) use doc_attrs::doc_usage;
pub(crate) use input::{DescribeInput, FieldInput, parse_input};
use literals::lit_str;
pub(crate) use serde_attrs::{SerdeRenameAll, serde_field_rename, serde_rename_all};

/// Struct-level attributes recognised by `#[derive(Describe)]`.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[conf_flags(crate = "flags")]`, generated code
    /// references types through `flags::` instead of `conf_flags::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(Describe)]`.
///
/// - `name` replaces the field's flag name segment.
/// - `help` replaces the usage text taken from doc comments.
/// - `skip` leaves the field out of the flag surface entirely.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldAttrs {
    pub name: Option<String>,
    pub help: Option<String>,
    pub skip: bool,
}

/// Iterate all `#[conf_flags(...)]` attributes once and apply a callback.
fn parse_conf_flags<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("conf_flags")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Extracts `#[conf_flags(...)]` metadata applied to a struct.
///
/// Only `crate` is recognised. Unknown keys are ignored so callers keep
/// compiling when new attributes appear, at the cost of allowing silent
/// typos.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_conf_flags(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let s = lit_str(meta, "crate")?;
            let path: syn::Path =
                syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
            out.crate_path = Some(path);
            return Ok(());
        }
        discard_unknown(meta)
    })?;
    Ok(out)
}

/// Parses field-level `#[conf_flags(...)]` attributes.
///
/// Recognised keys are `name`, `help` and `skip`; unknown keys are
/// discarded, matching [`parse_struct_attrs`].
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_conf_flags(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("name") => {
                let s = lit_str(meta, "name")?;
                if s.value().is_empty() {
                    return Err(syn::Error::new(s.span(), "name must not be empty"));
                }
                out.name = Some(s.value());
                Ok(())
            }
            Some("help") => {
                out.help = Some(lit_str(meta, "help")?.value());
                Ok(())
            }
            Some("skip") => {
                out.skip = if meta.input.peek(Token![=]) {
                    meta.value()?.parse::<syn::LitBool>()?.value
                } else {
                    true
                };
                Ok(())
            }
            _ => discard_unknown(meta),
        }
    })?;
    Ok(out)
}
