//! Caller-facing entry point tying flag sets to help and error output.

use std::fmt::Display;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::FlagError;
use crate::flag_set::{BuildOptions, FlagSet};
use crate::help::{write_error, write_help};
use crate::shape::Describe;

/// Program name used when `argv[0]` is unavailable.
const FALLBACK_PROGRAM: &str = "program";

/// Builds flag sets and renders their help for one program.
///
/// # Examples
///
/// ```
/// use conf_flags::{Describe, Loader};
///
/// #[derive(Default, Describe, serde::Serialize, serde::Deserialize)]
/// struct Config {
///     /// Address to listen on.
///     bind: String,
/// }
///
/// # fn main() -> Result<(), conf_flags::FlagError> {
/// let loader = Loader::new("svc").with_file_flag("config");
/// let mut out = Vec::new();
/// loader.write_help(&mut out, &mut Config::default())?;
/// assert!(String::from_utf8_lossy(&out).starts_with("Usage of svc:\n  -bind string\n"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Loader {
    program: String,
    file_flag: Option<String>,
}

impl Loader {
    /// Creates a loader for `program` without a configuration file flag.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            file_flag: None,
        }
    }

    /// Creates a loader named after the running executable.
    #[must_use]
    pub fn from_env() -> Self {
        let program = std::env::args_os()
            .next()
            .and_then(|arg0| {
                Path::new(&arg0)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| String::from(FALLBACK_PROGRAM));
        Self::new(program)
    }

    /// Injects a flag called `name` holding a configuration file path.
    #[must_use]
    pub fn with_file_flag(mut self, name: impl Into<String>) -> Self {
        self.file_flag = Some(name.into());
        self
    }

    /// Program name printed in the usage header.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Name of the configuration file flag, if one is injected.
    #[must_use]
    pub fn file_flag(&self) -> Option<&str> {
        self.file_flag.as_deref()
    }

    fn options(&self) -> BuildOptions {
        BuildOptions {
            file_flag: self.file_flag.clone(),
        }
    }

    /// Builds the flag set for `config`.
    ///
    /// # Errors
    ///
    /// Returns schema, duplicate-name and binding errors from
    /// [`FlagSet::from_config`].
    pub fn flag_set<'a, C>(&self, config: &'a mut C) -> Result<FlagSet<'a>, FlagError>
    where
        C: Describe,
    {
        FlagSet::from_config(config, &self.options())
    }

    /// Writes the usage text for `config` to `out`.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Loader::flag_set`], or [`FlagError::Io`]
    /// when writing fails.
    pub fn write_help<W, C>(&self, out: &mut W, config: &mut C) -> Result<(), FlagError>
    where
        W: Write + ?Sized,
        C: Describe,
    {
        let set = self.flag_set(config)?;
        write_help(&set, &self.program, out)?;
        Ok(())
    }

    /// Writes the usage text for `config` to standard error.
    ///
    /// # Errors
    ///
    /// See [`Loader::write_help`].
    pub fn print_help<C: Describe>(&self, config: &mut C) -> Result<(), FlagError> {
        let stderr = io::stderr();
        let mut out = BufWriter::new(stderr.lock());
        self.write_help(&mut out, config)?;
        out.flush()?;
        Ok(())
    }

    /// Writes `err` in the `Error:` layout to `out`.
    ///
    /// # Errors
    ///
    /// Propagates failures from `out`.
    pub fn write_error<W>(&self, out: &mut W, err: &dyn Display) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        write_error(err, out)
    }

    /// Writes `err` in the `Error:` layout to standard error.
    ///
    /// # Errors
    ///
    /// Propagates failures from standard error.
    pub fn print_error(&self, err: &dyn Display) -> io::Result<()> {
        let stderr = io::stderr();
        let mut out = BufWriter::new(stderr.lock());
        self.write_error(&mut out, err)?;
        out.flush()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{Result, ensure};
    use rstest::rstest;

    use super::Loader;

    #[rstest]
    fn from_env_uses_a_basename() {
        let loader = Loader::from_env();
        assert!(!loader.program().is_empty());
        assert!(!loader.program().contains('/'));
        assert!(loader.file_flag().is_none());
    }

    #[rstest]
    fn file_flag_is_recorded() {
        let loader = Loader::new("svc").with_file_flag("config");
        assert_eq!(loader.program(), "svc");
        assert_eq!(loader.file_flag(), Some("config"));
    }

    #[rstest]
    fn write_error_uses_the_error_layout() -> Result<()> {
        let mut out = Vec::new();
        Loader::new("svc").write_error(&mut out, &"bad flag")?;
        ensure!(out == b"Error:\n  bad flag\n");
        Ok(())
    }
}
