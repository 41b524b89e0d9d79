//! Typed decoding of JSON payloads
//!
//! # Overview
//!
//! A [`RawPayload`] holds a parsed JSON object. Domain types implement
//! [`Decodable`] by pulling fields out of it with the required getters
//! (`get`, `get_object`, `get_array`) or their optional counterparts, each
//! backed by a [`Converter`]:
//!
//! | Converter | Reads | Produces |
//! |---|---|---|
//! | [`PassThrough`] | string / integer / number / bool | same value |
//! | [`ObjectConverter`] | object | any `Decodable` |
//! | [`ArrayConverter`] | array of objects | `Vec` of any `Decodable` |
//! | [`UrlConverter`] | string | `url::Url` |
//! | [`TimestampConverter`] | number (epoch seconds) | `DateTime<Utc>` |
//!
//! ```rust
//! use repo_search::decode::{Decodable, DecodeError, RawPayload};
//!
//! struct Owner {
//!     login: String,
//!     site: Option<url::Url>,
//! }
//!
//! impl Decodable for Owner {
//!     fn decode(payload: &RawPayload) -> Result<Self, DecodeError> {
//!         Ok(Self {
//!             login: payload.get("login")?,
//!             site: payload.get_optional("blog")?,
//!         })
//!     }
//! }
//! ```

mod converters;
mod payload;
mod types;

pub use converters::{ArrayConverter, ObjectConverter, PassThrough, TimestampConverter, UrlConverter};
pub use payload::RawPayload;
pub use types::{json_kind, Converter, DecodeError, Decodable, FieldValue, Shape};
