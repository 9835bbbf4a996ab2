use super::{unexpected_container, value_type};
use crate::{CodingKey, CodingPath, ContainerKind, Error, ErrorKind, PathSegment};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[inline]
pub(crate) fn decode_value<T>(value: &Value, path: &CodingPath) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    T::deserialize(value).map_err(|source| {
        if value.is_null() {
            Error::new(ErrorKind::ValueNotFound { path: path.clone() })
        } else {
            Error::new(ErrorKind::TypeMismatch {
                path: path.clone(),
                source,
            })
        }
    })
}

/// A positioned, read only view into the payload.
///
/// Readers are cheap to create and never mutate the underlying data, so any
/// number of decodings may run against the same reader.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    value: &'a Value,
    path: CodingPath,
}

impl<'a> Reader<'a> {
    /// Create a reader positioned at the root of the given value
    pub fn new(value: &'a Value) -> Self {
        Reader {
            value,
            path: CodingPath::root(),
        }
    }

    #[inline]
    fn child(value: &'a Value, path: CodingPath) -> Self {
        Reader { value, path }
    }

    /// The value the reader is positioned at
    #[inline]
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// The location of this reader relative to the root
    #[inline]
    pub fn path(&self) -> &CodingPath {
        &self.path
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// Read the value as a single natively decodable `T`.
    ///
    /// ```
    /// use codings::Reader;
    /// use serde_json::json;
    ///
    /// let value = json!(10);
    /// assert_eq!(Reader::new(&value).decode::<u16>().unwrap(), 10);
    /// assert!(Reader::new(&value).decode::<String>().is_err());
    /// ```
    #[inline]
    pub fn decode<T>(&self) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        decode_value(self.value, &self.path)
    }

    /// Open the value as an ordered sequence
    pub fn unkeyed(&self) -> Result<UnkeyedReader<'a>, Error> {
        match self.value {
            Value::Array(items) => Ok(UnkeyedReader {
                items,
                cursor: 0,
                path: self.path.clone(),
            }),
            other => Err(unexpected_container(
                ContainerKind::Unkeyed,
                value_type(other),
                &self.path,
            )),
        }
    }

    /// Open the value as a mapping of keys to values
    pub fn keyed(&self) -> Result<KeyedReader<'a>, Error> {
        match self.value {
            Value::Object(map) => Ok(KeyedReader {
                map,
                path: self.path.clone(),
            }),
            other => Err(unexpected_container(
                ContainerKind::Keyed,
                value_type(other),
                &self.path,
            )),
        }
    }
}

/// An ordered sequence consumed strictly front to back.
///
/// ```
/// use codings::Reader;
/// use serde_json::json;
///
/// let value = json!(["a", null]);
/// let mut seq = Reader::new(&value).unkeyed().unwrap();
/// assert_eq!(seq.decode_next::<String>().unwrap(), "a");
/// assert_eq!(seq.decode_next_if_present::<String>().unwrap(), None);
/// assert!(seq.is_at_end());
/// assert!(seq.next_reader().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct UnkeyedReader<'a> {
    items: &'a [Value],
    cursor: usize,
    path: CodingPath,
}

impl<'a> UnkeyedReader<'a> {
    /// The total number of elements, consumed or not
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.items.len()
    }

    /// The index of the element the next read will consume
    #[inline]
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn path(&self) -> &CodingPath {
        &self.path
    }

    /// Return a reader for the next element and advance the cursor
    pub fn next_reader(&mut self) -> Result<Reader<'a>, Error> {
        let items = self.items;
        match items.get(self.cursor) {
            Some(value) => {
                let path = self.path.join(PathSegment::Index(self.cursor));
                self.cursor += 1;
                Ok(Reader::child(value, path))
            }
            None => Err(Error::new(ErrorKind::Exhausted {
                path: self.path.clone(),
                len: self.items.len(),
            })),
        }
    }

    /// Decode the next element as a natively decodable `T`
    pub fn decode_next<T>(&mut self) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        self.next_reader()?.decode()
    }

    /// Decode the next element, yielding `None` when the sequence is exhausted
    /// or the element is null. A null element is consumed.
    pub fn decode_next_if_present<T>(&mut self) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
    {
        if self.is_at_end() {
            return Ok(None);
        }

        let reader = self.next_reader()?;
        if reader.is_null() {
            Ok(None)
        } else {
            reader.decode().map(Some)
        }
    }
}

/// A mapping from keys to values, accessed by random lookup
#[derive(Debug, Clone)]
pub struct KeyedReader<'a> {
    map: &'a Map<String, Value>,
    path: CodingPath,
}

impl<'a> KeyedReader<'a> {
    #[inline]
    pub fn contains<K>(&self, key: &K) -> bool
    where
        K: CodingKey + ?Sized,
    {
        self.map.contains_key(key.name())
    }

    /// The keys present in the container, in payload order
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + 'a {
        let map = self.map;
        map.keys().map(|x| x.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn path(&self) -> &CodingPath {
        &self.path
    }

    /// Return a reader for the value stored under `key`
    pub fn reader_for_key<K>(&self, key: &K) -> Result<Reader<'a>, Error>
    where
        K: CodingKey + ?Sized,
    {
        let name = key.name();
        let map = self.map;
        match map.get(name) {
            Some(value) => Ok(Reader::child(
                value,
                self.path.join(PathSegment::Key(name.to_owned())),
            )),
            None => Err(Error::new(ErrorKind::KeyNotFound {
                key: name.to_owned(),
                path: self.path.clone(),
            })),
        }
    }

    /// Decode the value under `key` as a natively decodable `T`
    pub fn decode<T, K>(&self, key: &K) -> Result<T, Error>
    where
        T: DeserializeOwned,
        K: CodingKey + ?Sized,
    {
        self.reader_for_key(key)?.decode()
    }

    /// Decode the value under `key`, yielding `None` when the key is absent or
    /// the value is null. Both cases are indistinguishable to the caller.
    pub fn decode_if_present<T, K>(&self, key: &K) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        K: CodingKey + ?Sized,
    {
        if !self.contains(key) {
            return Ok(None);
        }

        let reader = self.reader_for_key(key)?;
        if reader.is_null() {
            Ok(None)
        } else {
            reader.decode().map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keyed_reader_tracks_path() {
        let value = json!({"user": {"names": ["a", "b"]}});
        let root = Reader::new(&value);
        let user = root.keyed().unwrap().reader_for_key("user").unwrap();
        let mut names = user.keyed().unwrap().reader_for_key("names").unwrap().unkeyed().unwrap();
        names.next_reader().unwrap();
        let second = names.next_reader().unwrap();
        assert_eq!(second.path().to_string(), "user.names[1]");
        assert_eq!(second.decode::<String>().unwrap(), "b");
    }

    #[test]
    fn missing_key_is_an_error() {
        let value = json!({"a": 1});
        let err = Reader::new(&value)
            .keyed()
            .unwrap()
            .decode::<u32, _>("b")
            .unwrap_err();
        match err.kind() {
            ErrorKind::KeyNotFound { key, path } => {
                assert_eq!(key, "b");
                assert!(path.is_root());
            }
            x => panic!("unexpected error: {:?}", x),
        }
    }

    #[test]
    fn decode_if_present_collapses_absent_and_null() {
        let value = json!({"a": null, "b": 2});
        let keyed = Reader::new(&value).keyed().unwrap();
        assert_eq!(keyed.decode_if_present::<u32, _>("a").unwrap(), None);
        assert_eq!(keyed.decode_if_present::<u32, _>("c").unwrap(), None);
        assert_eq!(keyed.decode_if_present::<u32, _>("b").unwrap(), Some(2));
    }

    #[test]
    fn decode_if_present_still_reports_mismatches() {
        let value = json!({"a": "text"});
        let keyed = Reader::new(&value).keyed().unwrap();
        let err = keyed.decode_if_present::<u32, _>("a").unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn null_into_required_value() {
        let value = json!(null);
        let err = Reader::new(&value).decode::<u32>().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ValueNotFound { .. }));
        assert_eq!(Reader::new(&value).decode::<Option<u32>>().unwrap(), None);
    }

    #[test]
    fn wrong_container_shape() {
        let value = json!([1, 2]);
        let err = Reader::new(&value).keyed().unwrap_err();
        match err.kind() {
            ErrorKind::UnexpectedContainer {
                expected, found, ..
            } => {
                assert_eq!(*expected, ContainerKind::Keyed);
                assert_eq!(*found, "an array");
            }
            x => panic!("unexpected error: {:?}", x),
        }

        let value = json!({});
        assert!(Reader::new(&value).unkeyed().is_err());
    }

    #[test]
    fn unkeyed_reader_exhaustion() {
        let value = json!([1]);
        let mut seq = Reader::new(&value).unkeyed().unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.current_index(), 0);
        assert_eq!(seq.decode_next::<u8>().unwrap(), 1);
        assert_eq!(seq.current_index(), 1);
        let err = seq.decode_next::<u8>().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Exhausted { len: 1, .. }));
        assert_eq!(seq.decode_next_if_present::<u8>().unwrap(), None);
    }

    #[test]
    fn keys_preserve_payload_order() {
        let value: Value = serde_json::from_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keyed = Reader::new(&value).keyed().unwrap();
        assert_eq!(keyed.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(keyed.len(), 3);
    }
}
