//! Entry points that run decodings and encodings over JSON payloads
//!
//! ```
//! use codings::{json::{self, JsonOptions}, Decoding, Encoding};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let decoding = Decoding::<Vec<u8>>::key("nums");
//! let nums = json::decode(br#"{"nums": [1, 2, 3]}"#, &decoding)?;
//! assert_eq!(nums, vec![1, 2, 3]);
//!
//! let encoding = Encoding::<Vec<u8>>::key("nums");
//! let options = JsonOptions::new().with_prettyprint(true);
//! let out = json::encode_with_options(&nums, &encoding, options)?;
//! assert_eq!(
//!     std::str::from_utf8(&out)?,
//!     "{\n  \"nums\": [\n    1,\n    2,\n    3\n  ]\n}"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Decoding first captures the whole payload as a [`serde_json::Value`] and
//! then hands the decoding a [`Reader`] positioned at its root. Encoding is the
//! mirror image: the encoding writes into a [`Document`] through a
//! [`Writer`](crate::Writer) and the finished tree is then serialized.
//!
//! Failures are reported as `debug` events naming the entry point and the
//! stage that failed: `parse` or `run` when decoding, `tree` or `write` when
//! encoding.

use crate::{Decoding, Document, Encoding, Error, Reader};
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Value};
use std::io;
use tracing::{debug, trace};

/// Customizes the JSON output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonOptions {
    /// Controls if the JSON should be pretty printed
    pretty: bool,

    /// The byte repeated for each level of indentation when pretty printing
    indent_char: u8,

    /// The number of indent characters per level when pretty printing
    indent_factor: u8,
}

impl JsonOptions {
    /// Creates the structure with default options
    pub fn new() -> Self {
        JsonOptions::default()
    }

    /// Sets if the JSON should be pretty printed or minified
    pub fn with_prettyprint(mut self, pretty: bool) -> JsonOptions {
        self.pretty = pretty;
        self
    }

    /// Sets the character used for indentation when pretty printing
    pub fn with_indent_char(mut self, indent_char: u8) -> JsonOptions {
        self.indent_char = indent_char;
        self
    }

    /// Sets the number of indent characters per depth when pretty printing
    pub fn with_indent_factor(mut self, indent_factor: u8) -> JsonOptions {
        self.indent_factor = indent_factor;
        self
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }

    fn indent(&self) -> Vec<u8> {
        vec![self.indent_char; usize::from(self.indent_factor)]
    }
}

impl Default for JsonOptions {
    fn default() -> Self {
        JsonOptions {
            pretty: false,
            indent_char: b' ',
            indent_factor: 2,
        }
    }
}

fn logged<T>(result: Result<T, Error>, op: &'static str) -> Result<T, Error> {
    if let Err(ref e) = result {
        debug!(op, error = %e, "combinator failed");
    }
    result
}

/// Run the decoding over an already parsed value
pub fn from_value<T: 'static>(value: &Value, decoding: &Decoding<T>) -> Result<T, Error> {
    decoding.decode(&Reader::new(value))
}

/// Parse the JSON payload and run the decoding over it
pub fn decode<T: 'static>(data: &[u8], decoding: &Decoding<T>) -> Result<T, Error> {
    trace!(len = data.len(), "decoding json payload");
    let value: Value = logged(
        serde_json::from_slice(data).map_err(Error::from),
        "decode.parse",
    )?;
    logged(from_value(&value, decoding), "decode.run")
}

/// Parse the JSON string and run the decoding over it
pub fn decode_str<T: 'static>(data: &str, decoding: &Decoding<T>) -> Result<T, Error> {
    decode(data.as_bytes(), decoding)
}

/// Read a JSON payload to completion and run the decoding over it
pub fn decode_reader<T, R>(reader: R, decoding: &Decoding<T>) -> Result<T, Error>
where
    T: 'static,
    R: io::Read,
{
    trace!("decoding json from reader");
    let value: Value = logged(
        serde_json::from_reader(reader).map_err(Error::from),
        "decode_reader.parse",
    )?;
    logged(from_value(&value, decoding), "decode_reader.run")
}

/// Run the encoding into a value tree.
///
/// A value for which the encoding writes nothing yields an empty object.
pub fn to_value<T: 'static>(value: &T, encoding: &Encoding<T>) -> Result<Value, Error> {
    let mut document = Document::new();
    encoding.encode(value, &mut document.writer())?;
    Ok(document.into_value())
}

/// Run the encoding and serialize the result as minified JSON
pub fn encode<T: 'static>(value: &T, encoding: &Encoding<T>) -> Result<Vec<u8>, Error> {
    encode_with_options(value, encoding, JsonOptions::default())
}

/// Run the encoding and serialize the result as a minified JSON string
pub fn encode_string<T: 'static>(value: &T, encoding: &Encoding<T>) -> Result<String, Error> {
    trace!("encoding json string");
    let tree = logged(to_value(value, encoding), "encode_string.tree")?;
    logged(
        serde_json::to_string(&tree).map_err(Error::from),
        "encode_string.write",
    )
}

/// Run the encoding and serialize the result according to the options
pub fn encode_with_options<T: 'static>(
    value: &T,
    encoding: &Encoding<T>,
    options: JsonOptions,
) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    encode_writer(&mut out, value, encoding, options)?;
    Ok(out)
}

/// Run the encoding and write the resulting JSON to the writer
pub fn encode_writer<W, T>(
    writer: W,
    value: &T,
    encoding: &Encoding<T>,
    options: JsonOptions,
) -> Result<(), Error>
where
    W: io::Write,
    T: 'static,
{
    trace!(pretty = options.pretty, "encoding json payload");
    let tree = logged(to_value(value, encoding), "encode.tree")?;
    let result = if options.pretty {
        let indent = options.indent();
        let formatter = PrettyFormatter::with_indent(&indent);
        let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
        tree.serialize(&mut ser)
    } else {
        serde_json::to_writer(writer, &tree)
    };

    logged(result.map_err(Error::from), "encode.write")
}
