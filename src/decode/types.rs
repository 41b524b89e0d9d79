//! Decoder types and traits
//!
//! Defines the core decoding abstractions: the structured [`DecodeError`],
//! the runtime [`Shape`] check, and the [`Converter`], [`FieldValue`] and
//! [`Decodable`] traits the engine is generic over.

use super::payload::RawPayload;
use crate::types::{JsonObject, JsonValue};
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Failure raised while extracting a field from a [`RawPayload`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// A required key is absent from the payload
    #[error("JSON Decode Error: Required key '{key}' missing")]
    MissingKey { key: String },

    /// The stored value does not have the shape the converter reads
    #[error("JSON Decode Error: Unexpected type '{actual}' was supplied for '{key}: {expected}'")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// The value has the right shape but the converter rejected it
    #[error("JSON Decode Error: {reason} '{value}' was supplied for '{key}'")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

impl DecodeError {
    /// Create a missing key error
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(key: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch {
            key: key.into(),
            expected,
            actual,
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// The payload key this error refers to
    pub fn key(&self) -> &str {
        match self {
            Self::MissingKey { key }
            | Self::TypeMismatch { key, .. }
            | Self::InvalidValue { key, .. } => key,
        }
    }
}

// ============================================================================
// Shapes
// ============================================================================

/// A statically typed view of one JSON value shape.
///
/// This is the only place where dynamic JSON meets static types: the engine
/// asks the converter's input shape to read the stored value and reports a
/// [`DecodeError::TypeMismatch`] when it cannot.
pub trait Shape: Sized {
    /// Name of the shape, used as the `expected` part of a mismatch
    const EXPECTED: &'static str;

    /// Read the value as this shape, or `None` if the runtime kind differs
    fn from_json(value: &JsonValue) -> Option<Self>;
}

impl Shape for String {
    const EXPECTED: &'static str = "string";

    fn from_json(value: &JsonValue) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl Shape for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_json(value: &JsonValue) -> Option<Self> {
        value.as_i64()
    }
}

impl Shape for u64 {
    const EXPECTED: &'static str = "unsigned integer";

    fn from_json(value: &JsonValue) -> Option<Self> {
        value.as_u64()
    }
}

impl Shape for f64 {
    const EXPECTED: &'static str = "number";

    fn from_json(value: &JsonValue) -> Option<Self> {
        value.as_f64()
    }
}

impl Shape for bool {
    const EXPECTED: &'static str = "bool";

    fn from_json(value: &JsonValue) -> Option<Self> {
        value.as_bool()
    }
}

impl Shape for JsonObject {
    const EXPECTED: &'static str = "object";

    fn from_json(value: &JsonValue) -> Option<Self> {
        value.as_object().cloned()
    }
}

impl Shape for Vec<JsonObject> {
    const EXPECTED: &'static str = "array of objects";

    fn from_json(value: &JsonValue) -> Option<Self> {
        value
            .as_array()?
            .iter()
            .map(|item| item.as_object().cloned())
            .collect()
    }
}

/// Runtime kind of a JSON value, as reported in type mismatches
pub fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(n) if n.is_f64() => "float",
        JsonValue::Number(_) => "integer",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

// ============================================================================
// Traits
// ============================================================================

/// A fallible, stateless transform from a JSON shape to a typed value
pub trait Converter {
    /// Shape the stored value must have
    type From: Shape;
    /// Produced value
    type To;

    /// Convert a value read from `key`
    fn convert(&self, key: &str, value: Self::From) -> Result<Self::To, DecodeError>;
}

/// A type with a default converter, so it can be read with `RawPayload::get`
pub trait FieldValue: Sized {
    /// Converter used for this type
    type Converter: Converter<To = Self>;

    /// The converter instance
    fn converter() -> Self::Converter;
}

/// Any type constructible from a [`RawPayload`]
pub trait Decodable: Sized {
    /// Build the value from the payload's fields
    fn decode(payload: &RawPayload) -> Result<Self, DecodeError>;
}
