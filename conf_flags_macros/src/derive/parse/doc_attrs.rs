//! Usage text taken from doc comments.

use syn::{Attribute, Expr, ExprLit, Lit, Meta};

/// Returns the first paragraph of the doc comment in `attrs`.
///
/// Lines are trimmed and joined with single spaces; the paragraph ends at
/// the first blank line after any text.
pub(crate) fn doc_usage(attrs: &[Attribute]) -> String {
    let mut words: Vec<String> = Vec::new();
    let lines = attrs.iter().filter_map(doc_line).flat_map(|text| {
        // Block doc comments arrive as one attribute spanning several lines.
        text.lines().map(str::to_owned).collect::<Vec<_>>()
    });
    for raw in lines {
        let line = raw.trim();
        if line.is_empty() {
            if words.is_empty() {
                continue;
            }
            break;
        }
        words.push(line.to_owned());
    }
    words.join(" ")
}

fn doc_line(attr: &Attribute) -> Option<String> {
    let Meta::NameValue(meta) = &attr.meta else {
        return None;
    };
    if !meta.path.is_ident("doc") {
        return None;
    }
    match &meta.value {
        Expr::Lit(ExprLit {
            lit: Lit::Str(text),
            ..
        }) => Some(text.value()),
        _ => None,
    }
}
