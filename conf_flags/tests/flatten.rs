//! Schema flattening of derived configuration structs.

use std::path::PathBuf;

use anyhow::{Result, ensure};
use chrono::{DateTime, Utc};
use conf_flags::{
    BuildOptions, Describe, FieldSpec, FlagError, FlagSet, TypeCategory, flatten, write_help,
};
use rstest::rstest;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Describe, Serialize, Deserialize)]
struct Tls {
    /// Path to the certificate chain.
    ///
    /// PEM encoded, leaf first.
    cert: PathBuf,
    enabled: bool,
}

#[derive(Debug, Default, Describe, Serialize, Deserialize)]
struct Upstream {
    #[serde(rename = "URL")]
    url: String,
    tls: Tls,
}

#[derive(Debug, Default, Describe, Serialize, Deserialize)]
struct Service {
    /// Address to listen on.
    listen_addr: String,
    upstream: Upstream,
    #[conf_flags(name = "Max-Conns", help = "connection cap")]
    max_connections: u32,
    #[conf_flags(skip)]
    #[serde(skip)]
    runtime_state: Vec<String>,
    started: Option<DateTime<Utc>>,
    payload: Vec<u8>,
}

#[derive(Debug, Default, Describe, Serialize, Deserialize)]
struct Clash {
    port: u16,
    #[conf_flags(name = "Port")]
    admin_port: u16,
}

#[derive(Debug, Default, Describe, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
struct Shouting {
    max_conns: u32,
    #[serde(rename = "bind")]
    listen_addr: String,
}

#[derive(Debug, Default, Describe, Serialize, Deserialize)]
struct Empty {}

#[derive(Debug, Default, Describe, Serialize, Deserialize)]
struct Wrapper<T> {
    inner: T,
    enabled: bool,
}

fn names(specs: &[FieldSpec]) -> Vec<&str> {
    specs.iter().map(FieldSpec::name).collect()
}

#[rstest]
fn nested_fields_flatten_depth_first() -> Result<()> {
    let specs = flatten::<Service>()?;
    ensure!(
        names(&specs)
            == [
                "listen-addr",
                "upstream.url",
                "upstream.tls.cert",
                "upstream.tls.enabled",
                "max-conns",
                "started",
                "payload",
            ],
        "unexpected names {:?}",
        names(&specs)
    );
    Ok(())
}

#[rstest]
fn declared_order_is_contiguous() -> Result<()> {
    let specs = flatten::<Service>()?;
    ensure!(
        specs.iter().enumerate().all(|(pos, spec)| spec.order() == pos),
        "orders are not contiguous"
    );
    Ok(())
}

#[rstest]
fn flattening_is_idempotent() -> Result<()> {
    ensure!(flatten::<Service>()? == flatten::<Service>()?);
    Ok(())
}

#[rstest]
#[case::text("listen-addr", TypeCategory::Text, "string")]
#[case::path("upstream.tls.cert", TypeCategory::Text, "path")]
#[case::boolean("upstream.tls.enabled", TypeCategory::Boolean, "bool")]
#[case::number("max-conns", TypeCategory::Numeric, "u32")]
#[case::timestamp("started", TypeCategory::Timestamp, "time")]
#[case::binary("payload", TypeCategory::Binary, "base64")]
fn categories_and_labels(
    #[case] name: &str,
    #[case] category: TypeCategory,
    #[case] label: &str,
) -> Result<()> {
    let specs = flatten::<Service>()?;
    let spec = specs
        .iter()
        .find(|spec| spec.name() == name)
        .ok_or_else(|| anyhow::anyhow!("missing {name}"))?;
    ensure!(spec.category() == category, "{name}: {}", spec.category());
    ensure!(spec.label() == label, "{name}: {}", spec.label());
    ensure!(spec.is_boolean() == (category == TypeCategory::Boolean));
    Ok(())
}

#[rstest]
#[case::doc_comment("listen-addr", "Address to listen on.")]
#[case::first_paragraph("upstream.tls.cert", "Path to the certificate chain.")]
#[case::explicit("max-conns", "connection cap")]
#[case::undocumented("payload", "")]
fn usage_comes_from_help_or_docs(#[case] name: &str, #[case] usage: &str) -> Result<()> {
    let specs = flatten::<Service>()?;
    let spec = specs
        .iter()
        .find(|spec| spec.name() == name)
        .ok_or_else(|| anyhow::anyhow!("missing {name}"))?;
    ensure!(spec.usage() == usage, "{name}: {:?}", spec.usage());
    ensure!(spec.has_usage() == !usage.is_empty());
    Ok(())
}

#[rstest]
fn paths_keep_declared_segments() -> Result<()> {
    let specs = flatten::<Service>()?;
    let url = specs
        .get(1)
        .ok_or_else(|| anyhow::anyhow!("missing url flag"))?;
    ensure!(url.path() == ["upstream", "URL"], "unexpected path {:?}", url.path());
    Ok(())
}

#[rstest]
fn colliding_names_fail_before_rendering() {
    let result = flatten::<Clash>();
    assert!(
        matches!(&result, Err(FlagError::DuplicateFlagName { name }) if name == "port"),
        "unexpected result {result:?}"
    );
}

#[rstest]
fn empty_structs_have_no_flags() -> Result<()> {
    ensure!(flatten::<Empty>()?.is_empty());
    Ok(())
}

#[rstest]
fn generic_structs_flatten_their_parameter() -> Result<()> {
    let specs = flatten::<Wrapper<Tls>>()?;
    ensure!(
        names(&specs) == ["inner.cert", "inner.enabled", "enabled"],
        "unexpected names {:?}",
        names(&specs)
    );
    Ok(())
}

#[rstest]
fn optional_root_structs_are_accepted() -> Result<()> {
    ensure!(flatten::<Option<Tls>>()?.len() == 2);
    Ok(())
}

#[rstest]
fn optional_root_structs_build_and_render() -> Result<()> {
    let mut root = Some(Tls {
        cert: PathBuf::from("/etc/tls/chain.pem"),
        enabled: false,
    });
    let set = FlagSet::from_config(&mut root, &BuildOptions::default())?;
    let mut out = Vec::new();
    write_help(&set, "svc", &mut out)?;
    let text = String::from_utf8(out)?;
    ensure!(
        text == concat!(
            "Usage of svc:\n",
            "  -cert path\n",
            "    \tPath to the certificate chain. (default \"/etc/tls/chain.pem\")\n",
            "  -enabled\n",
        ),
        "unexpected help: {text:?}"
    );
    Ok(())
}

#[rstest]
fn absent_optional_roots_fail_to_bind() {
    let mut root: Option<Tls> = None;
    let result = FlagSet::from_config(&mut root, &BuildOptions::default());
    assert!(
        matches!(&result, Err(FlagError::Binding { .. })),
        "unexpected result {result:?}"
    );
}

#[rstest]
fn scalar_roots_are_rejected() {
    assert!(matches!(flatten::<u32>(), Err(FlagError::Schema { .. })));
}

#[rstest]
fn container_rename_rules_shape_flag_names() -> Result<()> {
    let specs = flatten::<Shouting>()?;
    ensure!(
        names(&specs) == ["max-conns", "bind"],
        "unexpected names {:?}",
        names(&specs)
    );
    let first = specs.first().ok_or_else(|| anyhow::anyhow!("no flags"))?;
    ensure!(first.path() == ["MAX-CONNS"], "unexpected path {:?}", first.path());
    Ok(())
}
