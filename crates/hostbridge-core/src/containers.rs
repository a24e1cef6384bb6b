//! Sequence and map conversions.
//!
//! Each container converts element by element through the element type's
//! own conversion pair, so containers nest to any depth
//! (`HashMap<String, Vec<Option<T>>>` and so on).

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::convert::{FromDynamic, IntoDynamic};
use crate::dynamic::{Dynamic, ObjectMap};
use crate::error::ConversionError;

// ============================================================================
// Sequences <> Array
// ============================================================================

impl<T: FromDynamic> FromDynamic for Vec<T> {
    #[cfg_attr(feature = "profiling", profiling::function)]
    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Array(items) => items.iter().map(T::from_dynamic).collect(),
            _ => Err(ConversionError::mismatch("array", value)),
        }
    }
}

impl<T: IntoDynamic> IntoDynamic for Vec<T> {
    #[cfg_attr(feature = "profiling", profiling::function)]
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Array(self.into_iter().map(IntoDynamic::into_dynamic).collect())
    }
}

impl<T: FromDynamic, const N: usize> FromDynamic for [T; N] {
    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        let items = match value {
            Dynamic::Array(items) => items,
            _ => return Err(ConversionError::mismatch("array", value)),
        };
        if items.len() != N {
            return Err(ConversionError::LengthMismatch {
                expected: N,
                actual: items.len(),
            });
        }
        let converted = items
            .iter()
            .map(T::from_dynamic)
            .collect::<Result<Vec<T>, _>>()?;
        converted
            .try_into()
            .map_err(|rest: Vec<T>| ConversionError::LengthMismatch {
                expected: N,
                actual: rest.len(),
            })
    }
}

impl<T: IntoDynamic, const N: usize> IntoDynamic for [T; N] {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Array(self.into_iter().map(IntoDynamic::into_dynamic).collect())
    }
}

// ============================================================================
// String-keyed maps <> Object
// ============================================================================

fn object_entries(value: &Dynamic) -> Result<&ObjectMap, ConversionError> {
    match value {
        Dynamic::Object(map) => Ok(map),
        _ => Err(ConversionError::mismatch("object", value)),
    }
}

impl<T, S> FromDynamic for HashMap<String, T, S>
where
    T: FromDynamic,
    S: BuildHasher + Default,
{
    #[cfg_attr(feature = "profiling", profiling::function)]
    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        let entries = object_entries(value)?;
        let mut map = HashMap::with_capacity_and_hasher(entries.len(), S::default());
        for (key, item) in entries {
            map.insert(key.clone(), T::from_dynamic(item)?);
        }
        Ok(map)
    }
}

impl<T, S> IntoDynamic for HashMap<String, T, S>
where
    T: IntoDynamic,
    S: BuildHasher,
{
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Object(
            self.into_iter()
                .map(|(key, item)| (key, item.into_dynamic()))
                .collect(),
        )
    }
}

impl<T: FromDynamic> FromDynamic for BTreeMap<String, T> {
    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        object_entries(value)?
            .iter()
            .map(|(key, item)| Ok::<_, ConversionError>((key.clone(), T::from_dynamic(item)?)))
            .collect()
    }
}

impl<T: IntoDynamic> IntoDynamic for BTreeMap<String, T> {
    fn into_dynamic(self) -> Dynamic {
        Dynamic::Object(
            self.into_iter()
                .map(|(key, item)| (key, item.into_dynamic()))
                .collect(),
        )
    }
}
