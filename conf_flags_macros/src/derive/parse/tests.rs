//! Tests for `#[conf_flags(...)]`, serde and doc attribute parsing.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{Attribute, DeriveInput, parse_quote};

use super::{FieldAttrs, doc_usage, parse_field_attrs, parse_input, parse_struct_attrs};

fn segments(input: &DeriveInput) -> Result<Vec<String>> {
    let parsed = parse_input(input).map_err(|err| anyhow!(err))?;
    Ok(parsed.fields.into_iter().map(|field| field.segment).collect())
}

#[rstest]
fn parses_field_attributes() -> Result<()> {
    let attrs: Vec<Attribute> = vec![
        parse_quote!(#[conf_flags(name = "listen", help = "where to listen")]),
        parse_quote!(#[conf_flags(skip = false)]),
    ];
    let parsed = parse_field_attrs(&attrs)?;
    ensure!(
        parsed
            == FieldAttrs {
                name: Some(String::from("listen")),
                help: Some(String::from("where to listen")),
                skip: false,
            },
        "unexpected attributes {parsed:?}"
    );
    Ok(())
}

#[rstest]
fn unknown_keys_are_discarded() -> Result<()> {
    let attrs: Vec<Attribute> = vec![parse_quote!(
        #[conf_flags(future = "x", nested(a = 1), skip)]
    )];
    let parsed = parse_field_attrs(&attrs)?;
    ensure!(parsed.skip, "skip must still be recognised");
    ensure!(parsed.name.is_none());
    Ok(())
}

#[rstest]
#[case::not_a_string(parse_quote!(#[conf_flags(name = 5)]), "name must be a string")]
#[case::empty(parse_quote!(#[conf_flags(name = "")]), "name must not be empty")]
fn rejects_bad_names(#[case] attr: Attribute, #[case] expected: &str) -> Result<()> {
    let Err(err) = parse_field_attrs(&[attr]) else {
        return Err(anyhow!("expected an error"));
    };
    ensure!(err.to_string() == expected, "unexpected error {err}");
    Ok(())
}

#[rstest]
fn parses_crate_override() -> Result<()> {
    let attrs: Vec<Attribute> = vec![parse_quote!(#[conf_flags(crate = "deps::flags")])];
    let parsed = parse_struct_attrs(&attrs)?;
    let path = parsed.crate_path.ok_or_else(|| anyhow!("missing crate path"))?;
    ensure!(path.segments.len() == 2, "unexpected path");
    Ok(())
}

#[rstest]
fn derives_segments_in_priority_order() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            request_timeout: u32,
            #[serde(rename = "bind")]
            listen_addr: String,
            #[serde(rename(serialize = "out", deserialize = "input"))]
            output: String,
            #[serde(rename = "ignored")]
            #[conf_flags(name = "Explicit")]
            named: bool,
            r#type: String,
        }
    };
    let names = segments(&input)?;
    ensure!(
        names == ["request-timeout", "bind", "out", "Explicit", "type"],
        "unexpected segments {names:?}"
    );
    Ok(())
}

#[rstest]
fn skipped_fields_are_dropped() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            kept: u8,
            #[conf_flags(skip)]
            dropped: u8,
        }
    };
    ensure!(segments(&input)? == ["kept"]);
    Ok(())
}

#[rstest]
fn usage_prefers_help_over_docs() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            /// From the docs.
            documented: u8,
            /// Hidden by help.
            #[conf_flags(help = "explicit help")]
            helped: u8,
            bare: u8,
        }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!(err))?;
    let usages: Vec<_> = parsed.fields.iter().map(|field| field.usage.as_str()).collect();
    ensure!(
        usages == ["From the docs.", "explicit help", ""],
        "unexpected usages {usages:?}"
    );
    Ok(())
}

#[rstest]
fn doc_usage_keeps_the_first_paragraph() {
    let attrs: Vec<Attribute> = vec![
        parse_quote!(#[doc = ""]),
        parse_quote!(#[doc = " Request timeout"]),
        parse_quote!(#[doc = "   for upstream calls."]),
        parse_quote!(#[doc = ""]),
        parse_quote!(#[doc = " Longer discussion."]),
    ];
    assert_eq!(doc_usage(&attrs), "Request timeout for upstream calls.");
}

#[rstest]
fn doc_usage_splits_block_comments() {
    let attrs: Vec<Attribute> = vec![parse_quote!(#[doc = "\n first\n second\n\n third\n"])];
    assert_eq!(doc_usage(&attrs), "first second");
}

#[rstest]
#[case::tuple(parse_quote!(struct Demo(u8);), "Describe requires named fields")]
#[case::unit(parse_quote!(struct Demo;), "Describe requires named fields")]
#[case::enumeration(
    parse_quote!(enum Demo { A }),
    "Describe can only be derived for structs"
)]
fn rejects_unsupported_inputs(#[case] input: DeriveInput, #[case] expected: &str) -> Result<()> {
    let Err(err) = parse_input(&input) else {
        return Err(anyhow!("expected an error"));
    };
    ensure!(err.to_string() == expected, "unexpected error {err}");
    Ok(())
}

#[rstest]
#[case::camel(quote::quote!(#[serde(rename_all = "camelCase")]), ["maxConns", "bind", "r"])]
#[case::screaming(
    quote::quote!(#[serde(rename_all = "SCREAMING_SNAKE_CASE")]),
    ["MAX_CONNS", "bind", "R"]
)]
#[case::serialize_only(
    quote::quote!(#[serde(deny_unknown_fields, rename_all(serialize = "PascalCase"))]),
    ["MaxConns", "bind", "R"]
)]
#[case::absent(quote::quote!(), ["max-conns", "bind", "r"])]
fn rename_all_applies_below_field_renames(
    #[case] container: proc_macro2::TokenStream,
    #[case] expected: [&str; 3],
) -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #container
        struct Demo {
            max_conns: u32,
            #[serde(rename = "bind")]
            listen_addr: String,
            r: bool,
        }
    };
    let names = segments(&input)?;
    ensure!(names == expected, "unexpected segments {names:?}");
    Ok(())
}

#[rstest]
fn rejects_unknown_rename_all_rules() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[serde(rename_all = "Title Case")]
        struct Demo {
            a: u8,
        }
    };
    let Err(err) = parse_input(&input) else {
        return Err(anyhow!("expected an error"));
    };
    ensure!(
        err.to_string().starts_with("unsupported serde rename_all value 'Title Case'"),
        "unexpected error {err}"
    );
    Ok(())
}
