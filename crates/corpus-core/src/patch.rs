//! Typed partial updates.
//!
//! Request bodies name only the fields they change. Each field of a typed
//! patch is a [`FieldChange`]: absent keeps the stored value, a value sets
//! it, and an empty value (`null`, `""`, or `[]`) clears it.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::DomainError;
use crate::store::DocumentPatch;

/// The requested change to one field of a stored document.
///
/// Use `#[serde(default)]` on patch fields so an absent key becomes `Keep`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange<T> {
    /// Leave the stored value untouched.
    Keep,
    /// Overwrite the stored value.
    Set(T),
    /// Remove the field from the document.
    Clear,
}

impl<T> Default for FieldChange<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T> FieldChange<T> {
    /// Returns `true` if this change removes the field.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        matches!(self, Self::Clear)
    }
}

impl<T: Serialize> FieldChange<T> {
    /// Record this change for `field` in a store-level patch.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the value cannot be encoded.
    pub fn write_into(&self, field: &str, patch: &mut DocumentPatch) -> Result<(), DomainError> {
        match self {
            Self::Keep => {}
            Self::Set(value) => {
                let encoded = serde_json::to_value(value).map_err(|e| {
                    DomainError::Infrastructure(format!("failed to encode field `{field}`: {e}"))
                })?;
                patch.set(field, encoded);
            }
            Self::Clear => {
                patch.delete(field);
            }
        }
        Ok(())
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for FieldChange<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if is_empty_value(&value) {
            return Ok(Self::Clear);
        }
        T::deserialize(value).map(Self::Set).map_err(D::Error::custom)
    }
}
