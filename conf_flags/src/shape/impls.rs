//! `Describe` implementations for standard library and `chrono` types.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::path::PathBuf;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{Describe, TypeShape};
use crate::error::FlagError;
use crate::slots::Slots;

impl Describe for bool {
    fn shape() -> TypeShape {
        TypeShape::Bool
    }
}

impl Describe for String {
    fn shape() -> TypeShape {
        TypeShape::Text("string")
    }
}

impl Describe for PathBuf {
    fn shape() -> TypeShape {
        TypeShape::Text("path")
    }
}

macro_rules! describe_numeric {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn shape() -> TypeShape {
                    TypeShape::Numeric(stringify!($ty))
                }
            }
        )*
    };
}

describe_numeric!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64
);

impl Describe for std::time::Duration {
    fn shape() -> TypeShape {
        TypeShape::Duration
    }
}

impl Describe for TimeDelta {
    fn shape() -> TypeShape {
        TypeShape::Duration
    }
}

impl Describe for DateTime<Utc> {
    fn shape() -> TypeShape {
        TypeShape::Timestamp
    }
}

impl<T> Describe for Vec<T>
where
    T: Describe + Serialize + DeserializeOwned,
{
    fn shape() -> TypeShape {
        TypeShape::Sequence(T::shape)
    }
}

impl<K, V> Describe for BTreeMap<K, V>
where
    K: Ord + Serialize + DeserializeOwned,
    V: Describe + Serialize + DeserializeOwned,
{
    fn shape() -> TypeShape {
        TypeShape::Map(V::shape)
    }
}

impl<K, V, S> Describe for HashMap<K, V, S>
where
    K: Eq + Hash + Serialize + DeserializeOwned,
    V: Describe + Serialize + DeserializeOwned,
    S: BuildHasher + Default,
{
    fn shape() -> TypeShape {
        TypeShape::Map(V::shape)
    }
}

impl<T: Describe> Describe for Option<T> {
    fn shape() -> TypeShape {
        TypeShape::Optional(T::shape)
    }

    fn bind_root<'a>(&'a mut self, slots: &mut Slots<'a>) -> Result<(), FlagError> {
        let inner = self.as_mut().ok_or_else(|| {
            FlagError::binding(
                std::any::type_name::<Self>(),
                "optional configuration is `None`",
            )
        })?;
        inner.bind(slots);
        Ok(())
    }
}

// Boxes are never empty, so they take the shape of their contents and a
// boxed struct flattens exactly like an inline one.
impl<T: Describe> Describe for Box<T> {
    fn shape() -> TypeShape {
        T::shape()
    }

    fn bind<'a>(&'a mut self, slots: &mut Slots<'a>) {
        T::bind(&mut **self, slots);
    }

    fn bind_root<'a>(&'a mut self, slots: &mut Slots<'a>) -> Result<(), FlagError> {
        T::bind_root(&mut **self, slots)
    }
}
