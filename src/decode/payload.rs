//! The decode engine
//!
//! [`RawPayload`] wraps a parsed JSON object and exposes the required and
//! optional field getters every [`Decodable`] is built from.

use super::converters::{ArrayConverter, ObjectConverter};
use super::types::{json_kind, Converter, DecodeError, Decodable, FieldValue, Shape};
use crate::types::{JsonObject, JsonValue};

/// An untyped key-value tree parsed from a JSON byte stream.
///
/// Never mutated after creation; every getter is a pure function of the
/// payload and its arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPayload {
    json: JsonObject,
}

impl RawPayload {
    /// Wrap a parsed JSON object
    pub fn new(json: JsonObject) -> Self {
        Self { json }
    }

    /// Wrap a JSON value, returning `None` unless it is an object
    pub fn from_value(value: JsonValue) -> Option<Self> {
        match value {
            JsonValue::Object(json) => Some(Self::new(json)),
            _ => None,
        }
    }

    /// Whether the payload has an entry for `key` (an explicit null counts)
    pub fn contains_key(&self, key: &str) -> bool {
        self.json.contains_key(key)
    }

    /// Decode the whole payload as `T`
    pub fn decode<T: Decodable>(&self) -> Result<T, DecodeError> {
        T::decode(self)
    }

    // ========================================================================
    // Converter-based access
    // ========================================================================

    /// Read a required field through `converter`
    pub fn get_with<C: Converter>(&self, key: &str, converter: &C) -> Result<C::To, DecodeError> {
        let value = self
            .json
            .get(key)
            .ok_or_else(|| DecodeError::missing_key(key))?;
        convert_value(key, value, converter)
    }

    /// Read an optional field through `converter`.
    ///
    /// An absent key or an explicit `null` yields `Ok(None)`.
    pub fn get_optional_with<C: Converter>(
        &self,
        key: &str,
        converter: &C,
    ) -> Result<Option<C::To>, DecodeError> {
        match self.json.get(key) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(value) => convert_value(key, value, converter).map(Some),
        }
    }

    // ========================================================================
    // Typed access
    // ========================================================================

    /// Read a required primitive, URL or timestamp
    pub fn get<T: FieldValue>(&self, key: &str) -> Result<T, DecodeError> {
        self.get_with(key, &T::converter())
    }

    /// Read an optional primitive, URL or timestamp
    pub fn get_optional<T: FieldValue>(&self, key: &str) -> Result<Option<T>, DecodeError> {
        self.get_optional_with(key, &T::converter())
    }

    /// Read a required nested object
    pub fn get_object<T: Decodable>(&self, key: &str) -> Result<T, DecodeError> {
        self.get_with(key, &ObjectConverter::<T>::new())
    }

    /// Read an optional nested object
    pub fn get_optional_object<T: Decodable>(&self, key: &str) -> Result<Option<T>, DecodeError> {
        self.get_optional_with(key, &ObjectConverter::<T>::new())
    }

    /// Read a required array of nested objects
    pub fn get_array<T: Decodable>(&self, key: &str) -> Result<Vec<T>, DecodeError> {
        self.get_with(key, &ArrayConverter::<T>::new())
    }

    /// Read an optional array of nested objects
    pub fn get_optional_array<T: Decodable>(&self, key: &str) -> Result<Option<Vec<T>>, DecodeError> {
        self.get_optional_with(key, &ArrayConverter::<T>::new())
    }
}

impl From<JsonObject> for RawPayload {
    fn from(json: JsonObject) -> Self {
        Self::new(json)
    }
}

/// Check the stored value's shape against the converter input, then convert
fn convert_value<C: Converter>(
    key: &str,
    value: &JsonValue,
    converter: &C,
) -> Result<C::To, DecodeError> {
    let typed = <C::From as Shape>::from_json(value).ok_or_else(|| {
        DecodeError::type_mismatch(key, <C::From as Shape>::EXPECTED, json_kind(value))
    })?;
    converter.convert(key, typed)
}
