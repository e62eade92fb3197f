//! Unit tests for error construction and display.

use rstest::rstest;

use super::{FlagError, ValueError};

#[rstest]
#[case::schema(
    FlagError::schema("u32", "expected a struct"),
    "cannot derive flags from `u32`: expected a struct"
)]
#[case::duplicate(
    FlagError::duplicate("port"),
    "flag name `port` is declared more than once"
)]
#[case::binding(
    FlagError::binding("server.host", "missing field"),
    "cannot bind flag `server.host`: missing field"
)]
#[case::unknown(
    FlagError::UnknownFlag { name: "nope".into() },
    "flag provided but not defined: -nope"
)]
fn renders_messages(#[case] err: FlagError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[rstest]
fn invalid_value_keeps_source() {
    let err = FlagError::invalid_value("port", "abc", ValueError::new("not a number"));
    assert_eq!(
        err.to_string(),
        "invalid value \"abc\" for flag -port: not a number"
    );
    let source = std::error::Error::source(&err).map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("not a number"));
}

#[rstest]
fn io_errors_convert() {
    let err: FlagError = std::io::Error::other("sink closed").into();
    assert!(matches!(err, FlagError::Io(_)));
}
