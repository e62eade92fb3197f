//! `FlagValue` implementations for the built-in leaf and container types.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::path::PathBuf;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::duration::{format_nanos, parse_nanos};
use super::{FlagValue, from_json, to_json};
use crate::classify::is_byte;
use crate::error::ValueError;
use crate::shape::Describe;

impl FlagValue for bool {
    fn parse_flag(raw: &str) -> Result<Self, ValueError> {
        match raw.trim() {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            other => Err(ValueError::new(format!("invalid boolean {other:?}"))),
        }
    }

    fn format_flag(&self) -> String {
        self.to_string()
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

impl FlagValue for String {
    fn parse_flag(raw: &str) -> Result<Self, ValueError> {
        Ok(raw.to_owned())
    }

    fn format_flag(&self) -> String {
        to_json(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl FlagValue for PathBuf {
    fn parse_flag(raw: &str) -> Result<Self, ValueError> {
        Ok(Self::from(raw))
    }

    fn format_flag(&self) -> String {
        to_json(&self.display().to_string())
    }

    fn is_zero(&self) -> bool {
        self.as_os_str().is_empty()
    }
}

macro_rules! integer_flag_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FlagValue for $ty {
                fn parse_flag(raw: &str) -> Result<Self, ValueError> {
                    raw.trim().parse::<$ty>().map_err(|err| {
                        ValueError::new(format!(
                            "invalid {} {raw:?}: {err}",
                            stringify!($ty)
                        ))
                    })
                }

                fn format_flag(&self) -> String {
                    self.to_string()
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

integer_flag_value!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! float_flag_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FlagValue for $ty {
                fn parse_flag(raw: &str) -> Result<Self, ValueError> {
                    raw.trim().parse::<$ty>().map_err(|err| {
                        ValueError::new(format!(
                            "invalid {} {raw:?}: {err}",
                            stringify!($ty)
                        ))
                    })
                }

                fn format_flag(&self) -> String {
                    self.to_string()
                }

                fn is_zero(&self) -> bool {
                    *self == 0.0
                }
            }
        )*
    };
}

float_flag_value!(f32, f64);

const NANOS_PER_SECOND: i128 = 1_000_000_000;

impl FlagValue for std::time::Duration {
    fn parse_flag(raw: &str) -> Result<Self, ValueError> {
        let nanos = parse_nanos(raw)?;
        if nanos < 0 {
            return Err(ValueError::new(format!(
                "duration {raw:?} must not be negative"
            )));
        }
        let out_of_range = |_| ValueError::new(format!("duration {raw:?} is out of range"));
        let secs = u64::try_from(nanos.div_euclid(NANOS_PER_SECOND)).map_err(out_of_range)?;
        let subsec = u32::try_from(nanos.rem_euclid(NANOS_PER_SECOND)).map_err(out_of_range)?;
        Ok(Self::new(secs, subsec))
    }

    fn format_flag(&self) -> String {
        format_nanos(i128::try_from(self.as_nanos()).unwrap_or(i128::MAX))
    }

    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl FlagValue for TimeDelta {
    fn parse_flag(raw: &str) -> Result<Self, ValueError> {
        let nanos = parse_nanos(raw)?;
        let secs = i64::try_from(nanos.div_euclid(NANOS_PER_SECOND)).ok();
        let subsec = u32::try_from(nanos.rem_euclid(NANOS_PER_SECOND)).ok();
        secs.zip(subsec)
            .and_then(|(secs, subsec)| Self::new(secs, subsec))
            .ok_or_else(|| ValueError::new(format!("duration {raw:?} is out of range")))
    }

    fn format_flag(&self) -> String {
        let nanos = i128::from(self.num_seconds()) * NANOS_PER_SECOND
            + i128::from(self.subsec_nanos());
        format_nanos(nanos)
    }

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl FlagValue for DateTime<Utc> {
    fn parse_flag(raw: &str) -> Result<Self, ValueError> {
        Ok(DateTime::parse_from_rfc3339(raw.trim())?.with_timezone(&Utc))
    }

    fn format_flag(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

// Byte vectors are the binary category; everything else is a JSON list.
fn holds_bytes<T: Describe>() -> bool {
    is_byte(&T::shape())
}

impl<T> FlagValue for Vec<T>
where
    T: Describe + Serialize + DeserializeOwned,
{
    fn parse_flag(raw: &str) -> Result<Self, ValueError> {
        if holds_bytes::<T>() {
            let bytes = STANDARD.decode(raw.trim())?;
            return Ok(serde_json::from_value(serde_json::Value::from(bytes))?);
        }
        from_json(raw)
    }

    fn format_flag(&self) -> String {
        if holds_bytes::<T>() {
            let bytes = serde_json::to_value(self)
                .and_then(serde_json::from_value::<Vec<u8>>)
                .unwrap_or_default();
            return STANDARD.encode(bytes);
        }
        to_json(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> FlagValue for BTreeMap<K, V>
where
    K: Ord + Serialize + DeserializeOwned,
    V: Serialize + DeserializeOwned,
{
    fn parse_flag(raw: &str) -> Result<Self, ValueError> {
        from_json(raw)
    }

    fn format_flag(&self) -> String {
        to_json(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> FlagValue for HashMap<K, V, S>
where
    K: Eq + Hash + Serialize + DeserializeOwned,
    V: Serialize + DeserializeOwned,
    S: BuildHasher + Default,
{
    fn parse_flag(raw: &str) -> Result<Self, ValueError> {
        from_json(raw)
    }

    fn format_flag(&self) -> String {
        to_json(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: FlagValue> FlagValue for Option<T> {
    fn parse_flag(raw: &str) -> Result<Self, ValueError> {
        T::parse_flag(raw).map(Some)
    }

    fn format_flag(&self) -> String {
        self.as_ref()
            .map_or_else(|| String::from("null"), FlagValue::format_flag)
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

impl<T: FlagValue> FlagValue for Box<T> {
    fn parse_flag(raw: &str) -> Result<Self, ValueError> {
        T::parse_flag(raw).map(Box::new)
    }

    fn format_flag(&self) -> String {
        (**self).format_flag()
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}
