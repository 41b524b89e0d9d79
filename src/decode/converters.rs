//! Converter implementations
//!
//! Each converter maps one JSON shape to one typed value.

use super::payload::RawPayload;
use super::types::{Converter, DecodeError, Decodable, FieldValue, Shape};
use crate::types::JsonObject;
use chrono::{DateTime, Utc};
use std::marker::PhantomData;
use url::Url;

// ============================================================================
// Pass-through
// ============================================================================

/// Returns the primitive unchanged; the engine has already checked its shape
pub struct PassThrough<T>(PhantomData<fn() -> T>);

impl<T> PassThrough<T> {
    /// Create a pass-through converter
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for PassThrough<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Shape> Converter for PassThrough<T> {
    type From = T;
    type To = T;

    fn convert(&self, _key: &str, value: T) -> Result<T, DecodeError> {
        Ok(value)
    }
}

macro_rules! pass_through_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                type Converter = PassThrough<$ty>;

                fn converter() -> Self::Converter {
                    PassThrough::new()
                }
            }
        )*
    };
}

pass_through_field!(String, i64, u64, f64, bool);

// ============================================================================
// Nested objects
// ============================================================================

/// Decodes a nested JSON object into a [`Decodable`]
pub struct ObjectConverter<T>(PhantomData<fn() -> T>);

impl<T> ObjectConverter<T> {
    /// Create an object converter
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for ObjectConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Decodable> Converter for ObjectConverter<T> {
    type From = JsonObject;
    type To = T;

    fn convert(&self, _key: &str, value: JsonObject) -> Result<T, DecodeError> {
        T::decode(&RawPayload::new(value))
    }
}

/// Decodes an array of JSON objects, failing as a whole on the first bad element
pub struct ArrayConverter<T>(PhantomData<fn() -> T>);

impl<T> ArrayConverter<T> {
    /// Create an array converter
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for ArrayConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Decodable> Converter for ArrayConverter<T> {
    type From = Vec<JsonObject>;
    type To = Vec<T>;

    fn convert(&self, _key: &str, value: Vec<JsonObject>) -> Result<Vec<T>, DecodeError> {
        value
            .into_iter()
            .map(|object| T::decode(&RawPayload::new(object)))
            .collect()
    }
}

// ============================================================================
// URL
// ============================================================================

/// Parses an absolute URL from a string
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlConverter;

impl Converter for UrlConverter {
    type From = String;
    type To = Url;

    fn convert(&self, key: &str, value: String) -> Result<Url, DecodeError> {
        match Url::parse(&value) {
            Ok(url) => Ok(url),
            Err(_) => Err(DecodeError::invalid_value(key, value, "Invalid URL")),
        }
    }
}

impl FieldValue for Url {
    type Converter = UrlConverter;

    fn converter() -> Self::Converter {
        UrlConverter
    }
}

// ============================================================================
// Timestamp
// ============================================================================

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Converts seconds since the Unix epoch into a UTC timestamp
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampConverter;

impl Converter for TimestampConverter {
    type From = f64;
    type To = DateTime<Utc>;

    fn convert(&self, key: &str, value: f64) -> Result<DateTime<Utc>, DecodeError> {
        let mut secs = value.floor();
        let mut nanos = ((value - secs) * NANOS_PER_SEC).round();
        if nanos >= NANOS_PER_SEC {
            secs += 1.0;
            nanos = 0.0;
        }

        // chrono covers roughly +/- 262,000 years; anything beyond cannot be represented
        if !secs.is_finite() || secs < i64::MIN as f64 || secs >= i64::MAX as f64 {
            return Err(DecodeError::invalid_value(
                key,
                value.to_string(),
                "Timestamp out of range",
            ));
        }

        DateTime::from_timestamp(secs as i64, nanos as u32).ok_or_else(|| {
            DecodeError::invalid_value(key, value.to_string(), "Timestamp out of range")
        })
    }
}

impl FieldValue for DateTime<Utc> {
    type Converter = TimestampConverter;

    fn converter() -> Self::Converter {
        TimestampConverter
    }
}
