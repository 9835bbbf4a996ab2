//! Positioned readers and writers over the underlying JSON value tree
//!
//! A [`Reader`] or [`Writer`] can be viewed through one of three container
//! modes: as a single value ([`Reader::decode`], [`Writer::encode`]), as an
//! unkeyed sequence ([`UnkeyedReader`], [`UnkeyedWriter`]), or as a keyed
//! mapping ([`KeyedReader`], [`KeyedWriter`]). Combinators in this crate are
//! built exclusively on top of these three modes.
mod reader;
mod writer;

pub use self::reader::{KeyedReader, Reader, UnkeyedReader};
pub use self::writer::{Document, KeyedWriter, UnkeyedWriter, Writer};

use crate::{CodingPath, ContainerKind, Error, ErrorKind};
use serde_json::Value;

#[inline]
pub(crate) fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[inline]
pub(crate) fn unexpected_container(
    expected: ContainerKind,
    found: &'static str,
    path: &CodingPath,
) -> Error {
    Error::new(ErrorKind::UnexpectedContainer {
        path: path.clone(),
        expected,
        found,
    })
}
