//! Input parsing for the `Describe` derive macro.
//!
//! This module gathers the struct identifier, generics, fields and attribute
//! metadata in one pass so macro expansion can fail fast with useful errors.

use heck::ToKebabCase;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Generics, Ident, Type};

use super::{
    FieldAttrs, SerdeRenameAll, StructAttrs, doc_usage, parse_field_attrs, parse_struct_attrs,
    serde_field_rename, serde_rename_all,
};

/// A parsed `#[derive(Describe)]` input.
pub(crate) struct DescribeInput {
    pub ident: Ident,
    pub generics: Generics,
    pub attrs: StructAttrs,
    /// Fields in declaration order, skipped fields excluded.
    pub fields: Vec<FieldInput>,
}

/// A field contributing to the flag surface.
pub(crate) struct FieldInput {
    pub ident: Ident,
    pub ty: Type,
    /// Flag name segment before case folding.
    pub segment: String,
    /// Usage text, empty when the field is undocumented.
    pub usage: String,
}

/// Gathers information from the user-provided struct.
///
/// Only structs with named fields are accepted. Skipped fields are dropped
/// here and never reach code generation.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<DescribeInput> {
    let attrs = parse_struct_attrs(&input.attrs)?;
    let rename_all = serde_rename_all(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Describe requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Describe can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let field_attrs = parse_field_attrs(&field.attrs)?;
        if field_attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "unnamed fields are not supported"));
        };
        let segment = field_segment(&ident, &field_attrs, &field.attrs, rename_all)?;
        let usage = field_attrs
            .help
            .unwrap_or_else(|| doc_usage(&field.attrs));
        fields.push(FieldInput {
            ident,
            ty: field.ty.clone(),
            segment,
            usage,
        });
    }

    Ok(DescribeInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        attrs,
        fields,
    })
}

fn field_segment(
    ident: &Ident,
    attrs: &FieldAttrs,
    raw_attrs: &[syn::Attribute],
    rename_all: Option<SerdeRenameAll>,
) -> syn::Result<String> {
    if let Some(name) = &attrs.name {
        return Ok(name.clone());
    }
    if let Some(rename) = serde_field_rename(raw_attrs)? {
        return Ok(rename);
    }
    let field_name = ident.unraw().to_string();
    Ok(rename_all.map_or_else(|| field_name.to_kebab_case(), |rule| rule.apply(&field_name)))
}
