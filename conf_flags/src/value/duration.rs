//! Text form of elapsed-time values.
//!
//! Durations are written the way Go's `time.Duration` prints them
//! (`1h2m3.5s`, `250ms`, `0s`) so help output stays familiar to users of
//! flag-style tools. Parsing accepts any sequence of decimal numbers with a
//! unit suffix, optionally signed, such as `1.5h` or `-2m30s`.

use crate::error::ValueError;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

// Fraction digits beyond this are ignored; they are below nanosecond
// precision for every supported unit.
const MAX_FRACTION_SCALE: u128 = 1_000_000_000_000_000_000;

/// Formats a signed nanosecond count.
///
/// ```
/// use conf_flags::value::duration::format_nanos;
///
/// assert_eq!(format_nanos(0), "0s");
/// assert_eq!(format_nanos(1_500_000), "1.5ms");
/// assert_eq!(format_nanos(3_723_000_000_000), "1h2m3s");
/// ```
#[must_use]
pub fn format_nanos(nanos: i128) -> String {
    if nanos == 0 {
        return String::from("0s");
    }
    let mut out = String::new();
    if nanos < 0 {
        out.push('-');
    }
    let magnitude = nanos.unsigned_abs();

    if magnitude < NANOS_PER_SECOND {
        let (unit, scale, width) = if magnitude < NANOS_PER_MICRO {
            ("ns", 1, 0)
        } else if magnitude < NANOS_PER_MILLI {
            ("µs", NANOS_PER_MICRO, 3)
        } else {
            ("ms", NANOS_PER_MILLI, 6)
        };
        push_decimal(&mut out, magnitude, scale, width);
        out.push_str(unit);
        return out;
    }

    let hours = magnitude.div_euclid(NANOS_PER_HOUR);
    let minutes = magnitude.rem_euclid(NANOS_PER_HOUR).div_euclid(NANOS_PER_MINUTE);
    let seconds = magnitude.rem_euclid(NANOS_PER_MINUTE);
    if hours > 0 {
        out.push_str(&format!("{hours}h{minutes}m"));
    } else if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    push_decimal(&mut out, seconds, NANOS_PER_SECOND, 9);
    out.push('s');
    out
}

fn push_decimal(out: &mut String, value: u128, scale: u128, width: usize) {
    let whole = value.div_euclid(scale);
    let fraction = value.rem_euclid(scale);
    out.push_str(&whole.to_string());
    if fraction != 0 {
        let digits = format!("{fraction:0width$}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
}

/// Parses a duration into a signed nanosecond count.
///
/// # Errors
///
/// Returns a [`ValueError`] when the text is empty, lacks a unit, uses an
/// unknown unit, or overflows.
///
/// ```
/// use conf_flags::value::duration::parse_nanos;
///
/// assert_eq!(parse_nanos("1m30s").ok(), Some(90_000_000_000));
/// assert_eq!(parse_nanos("-1.5ms").ok(), Some(-1_500_000));
/// assert!(parse_nanos("10").is_err());
/// ```
pub fn parse_nanos(raw: &str) -> Result<i128, ValueError> {
    let text = raw.trim();
    let (negative, body) = text.strip_prefix('-').map_or_else(
        || (false, text.strip_prefix('+').unwrap_or(text)),
        |rest| (true, rest),
    );
    if body == "0" {
        return Ok(0);
    }
    if body.is_empty() {
        return Err(invalid(raw));
    }

    let mut chars = body.chars().peekable();
    let mut total: u128 = 0;
    while chars.peek().is_some() {
        let mut whole: u128 = 0;
        let mut whole_digits = 0_usize;
        while let Some(digit) = chars.next_if(char::is_ascii_digit).and_then(|c| c.to_digit(10)) {
            whole = whole
                .checked_mul(10)
                .and_then(|v| v.checked_add(u128::from(digit)))
                .ok_or_else(|| overflow(raw))?;
            whole_digits += 1;
        }

        let mut fraction: u128 = 0;
        let mut scale: u128 = 1;
        let mut fraction_digits = 0_usize;
        if chars.next_if_eq(&'.').is_some() {
            while let Some(digit) =
                chars.next_if(char::is_ascii_digit).and_then(|c| c.to_digit(10))
            {
                if scale < MAX_FRACTION_SCALE {
                    fraction = fraction * 10 + u128::from(digit);
                    scale *= 10;
                }
                fraction_digits += 1;
            }
        }
        if whole_digits == 0 && fraction_digits == 0 {
            return Err(invalid(raw));
        }

        let mut unit = String::new();
        while let Some(c) = chars.next_if(|c| *c != '.' && !c.is_ascii_digit()) {
            unit.push(c);
        }
        let factor = unit_nanos(&unit).ok_or_else(|| {
            if unit.is_empty() {
                ValueError::new(format!("missing unit in duration {raw:?}"))
            } else {
                ValueError::new(format!("unknown unit {unit:?} in duration {raw:?}"))
            }
        })?;

        let component = whole
            .checked_mul(factor)
            .and_then(|v| v.checked_add((fraction * factor).div_euclid(scale)))
            .ok_or_else(|| overflow(raw))?;
        total = total.checked_add(component).ok_or_else(|| overflow(raw))?;
    }

    let magnitude = i128::try_from(total).map_err(|_| overflow(raw))?;
    Ok(if negative { -magnitude } else { magnitude })
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

fn invalid(raw: &str) -> ValueError {
    ValueError::new(format!("invalid duration {raw:?}"))
}

fn overflow(raw: &str) -> ValueError {
    ValueError::new(format!("duration {raw:?} is out of range"))
}
