//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[conf_flags(crate = "...")]` attribute value into
//! the tokens generated code uses in place of `conf_flags::`.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
///
/// Defaults to `conf_flags` when no override is present.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { conf_flags }, |path| quote! { #path })
}
