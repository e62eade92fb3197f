//! Usage and error text in the layout of Go's `flag` package.

use std::fmt::Display;
use std::io::{self, Write};

use crate::flag_set::{FlagDescriptor, FlagSet};

/// Boolean flags with names up to this many bytes keep their usage inline.
const INLINE_BOOL_NAME_LEN: usize = 4;

/// Writes the usage text for `set` to `out`.
///
/// Flags appear in declaration order. Non-boolean flags are followed by
/// their type label and, when they held a non-zero value at build time, by a
/// `(default ...)` annotation.
///
/// # Errors
///
/// Propagates failures from `out`.
pub fn write_help<W: Write + ?Sized>(
    set: &FlagSet<'_>,
    program: &str,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "Usage of {program}:")?;
    for flag in set {
        write_flag(flag, out)?;
    }
    Ok(())
}

fn write_flag<W: Write + ?Sized>(flag: &FlagDescriptor<'_>, out: &mut W) -> io::Result<()> {
    let inline = flag.is_boolean() && flag.name().len() <= INLINE_BOOL_NAME_LEN;
    write!(out, "  -{}", flag.name())?;
    if flag.is_boolean() {
        if !inline {
            writeln!(out)?;
        }
    } else {
        writeln!(out, " {}", flag.spec().label())?;
    }

    let mut notes = Vec::with_capacity(2);
    if flag.spec().has_usage() {
        notes.push(flag.usage().to_owned());
    }
    if !flag.is_boolean() && !flag.is_default() && !flag.default_text().is_empty() {
        notes.push(format!("(default {})", flag.default_text()));
    }

    if notes.is_empty() {
        // A short boolean has not ended its line yet.
        if inline {
            writeln!(out)?;
        }
        return Ok(());
    }
    if !inline {
        out.write_all(b"    ")?;
    }
    writeln!(out, "\t{}", notes.join(" "))
}

/// Writes `err` as `Error:` followed by the indented message.
///
/// # Errors
///
/// Propagates failures from `out`.
pub fn write_error<W: Write + ?Sized>(err: &dyn Display, out: &mut W) -> io::Result<()> {
    write!(out, "Error:\n  {err}\n")
}
