use crate::{Document, Encoding, Error};
use serde::{ser, Serialize, Serializer};
use serde_json::Value;

/// Pairs a value with the [`Encoding`] that writes it, so that it can be
/// handed to any serde [`Serializer`].
///
/// The encoding runs when the serializer invokes [`Serialize::serialize`]:
/// the value is first written into a value tree which is then forwarded to
/// the serializer.
///
/// ```
/// use codings::{Encoded, Encoding};
///
/// let encoding = Encoding::<u32>::key("count");
/// let out = serde_json::to_string(&vec![Encoded::new(&1, &encoding), Encoded::new(&2, &encoding)])?;
/// assert_eq!(out, r#"[{"count":1},{"count":2}]"#);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug)]
pub struct Encoded<'e, T> {
    value: &'e T,
    encoding: &'e Encoding<T>,
}

impl<'e, T> Encoded<'e, T>
where
    T: 'static,
{
    pub fn new(value: &'e T, encoding: &'e Encoding<T>) -> Self {
        Encoded { value, encoding }
    }

    /// Run the encoding into a freestanding value tree
    pub fn to_value(&self) -> Result<Value, Error> {
        let mut document = Document::new();
        self.encoding.encode(self.value, &mut document.writer())?;
        Ok(document.into_value())
    }
}

impl<'e, T> Serialize for Encoded<'e, T>
where
    T: 'static,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value()
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<T: 'static> Encoding<T> {
    /// Encode directly into a serde serializer.
    ///
    /// Handy for bridging into derived types with `#[serde(serialize_with)]`
    /// and an encoding stored in a static.
    pub fn serialize<S>(&self, value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Encoded::new(value, self).serialize(serializer)
    }
}
