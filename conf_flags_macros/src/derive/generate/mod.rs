//! Code generation for `#[derive(Describe)]`.
//!
//! Two impls are emitted per struct: `FlagValue`, which treats the whole
//! struct as a JSON value that is zero when every field is zero, and
//! `Describe`, which publishes the static record shape and the binding
//! visitor. Both walk the same field list, so shape and binding agree on
//! order and segments.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Generics, parse_quote};

use super::parse::{DescribeInput, FieldInput};

/// Emits the `FlagValue` and `Describe` impls for `input`.
pub(crate) fn describe_impls(input: &DescribeInput, krate: &TokenStream) -> TokenStream {
    let flag_value = flag_value_impl(input, krate);
    let describe = describe_impl(input, krate);
    quote! {
        #flag_value
        #describe
    }
}

/// Bounds every field type by `Describe` and `Self` by the serde traits
/// when the struct has type parameters.
fn bounded_generics(input: &DescribeInput, krate: &TokenStream) -> Generics {
    let mut generics = input.generics.clone();
    if generics.type_params().next().is_none() {
        return generics;
    }
    let clause = generics.make_where_clause();
    for field in &input.fields {
        let ty = &field.ty;
        clause.predicates.push(parse_quote!(#ty: #krate::Describe));
    }
    clause.predicates.push(parse_quote!(
        Self: #krate::__private::serde::Serialize
            + #krate::__private::serde::de::DeserializeOwned
    ));
    generics
}

fn flag_value_impl(input: &DescribeInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let generics = bounded_generics(input, krate);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let mut zero_checks = input.fields.iter().map(|FieldInput { ident, .. }| {
        quote! { #krate::FlagValue::is_zero(&self.#ident) }
    });
    let is_zero = zero_checks.next().map_or_else(
        || quote! { true },
        |first| quote! { #first #( && #zero_checks )* },
    );

    quote! {
        impl #impl_generics #krate::FlagValue for #ident #ty_generics #where_clause {
            fn parse_flag(
                raw: &::core::primitive::str,
            ) -> ::core::result::Result<Self, #krate::ValueError> {
                #krate::value::from_json(raw)
            }

            fn format_flag(&self) -> ::std::string::String {
                #krate::value::to_json(self)
            }

            fn is_zero(&self) -> ::core::primitive::bool {
                #is_zero
            }
        }
    }
}

fn describe_impl(input: &DescribeInput, krate: &TokenStream) -> TokenStream {
    let ident = &input.ident;
    let generics = bounded_generics(input, krate);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let shapes = input.fields.iter().map(|field| {
        let segment = &field.segment;
        let usage = &field.usage;
        let ty = &field.ty;
        quote! {
            #krate::FieldShape::new(#segment, #usage, <#ty as #krate::Describe>::shape)
        }
    });
    let binds = input.fields.iter().map(|field| {
        let segment = &field.segment;
        let field_ident = &field.ident;
        quote! { slots.field(#segment, &mut self.#field_ident); }
    });
    let slots_param = if input.fields.is_empty() {
        quote! { _slots }
    } else {
        quote! { slots }
    };

    quote! {
        impl #impl_generics #krate::Describe for #ident #ty_generics #where_clause {
            fn shape() -> #krate::TypeShape {
                #krate::TypeShape::Record(#krate::RecordShape::new(
                    ::core::any::type_name::<Self>(),
                    ::std::vec![ #( #shapes ),* ],
                ))
            }

            fn bind<'conf_flags>(
                &'conf_flags mut self,
                #slots_param: &mut #krate::Slots<'conf_flags>,
            ) {
                #( #binds )*
            }
        }
    }
}
