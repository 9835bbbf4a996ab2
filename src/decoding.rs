use crate::{CodingKey, Error, ErrorKind, Reader};
use serde::de::DeserializeOwned;
use std::{error, fmt, sync::Arc};

type DecodeFn<T> = dyn Fn(&Reader<'_>) -> Result<T, Error> + Send + Sync;

/// A description of how to produce a `T` from a positioned [`Reader`].
///
/// Decodings are immutable values: build them once, then share and reuse them
/// for any number of payloads, from any number of threads. Cloning is cheap.
///
/// ```
/// use codings::{json, zip3, Decoding};
///
/// #[derive(Debug, PartialEq)]
/// struct User {
///     name: String,
///     age: u8,
///     city: String,
/// }
///
/// let decoding = zip3(
///     Decoding::key("name"),
///     Decoding::key("age"),
///     Decoding::optional_key("city").replace_nil(String::from("Unknown")),
/// )
/// .map(|(name, age, city)| User { name, age, city });
///
/// let user = json::decode(br#"{"name":"Joe Bloggs","age":18}"#, &decoding)?;
/// assert_eq!(user, User {
///     name: String::from("Joe Bloggs"),
///     age: 18,
///     city: String::from("Unknown"),
/// });
/// # Ok::<(), codings::Error>(())
/// ```
pub struct Decoding<T> {
    decode: Arc<DecodeFn<T>>,
}

impl<T> Clone for Decoding<T> {
    fn clone(&self) -> Self {
        Decoding {
            decode: Arc::clone(&self.decode),
        }
    }
}

impl<T> fmt::Debug for Decoding<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Decoding")
            .field("output", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: 'static> Decoding<T> {
    /// Create a decoding from a function of a reader
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Reader<'_>) -> Result<T, Error> + Send + Sync + 'static,
    {
        Decoding {
            decode: Arc::new(f),
        }
    }

    /// Run the decoding against the reader
    #[inline]
    pub fn decode(&self, reader: &Reader<'_>) -> Result<T, Error> {
        (self.decode)(reader)
    }

    /// A decoding that always yields `value` without touching the reader
    pub fn constant(value: T) -> Self
    where
        T: Clone + Send + Sync,
    {
        Decoding::new(move |_| Ok(value.clone()))
    }

    /// Transform the decoded value
    pub fn map<U, F>(self, f: F) -> Decoding<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Decoding::new(move |reader| self.decode(reader).map(&f))
    }

    /// Transform the decoded value with a function that may reject it.
    ///
    /// ```
    /// use codings::{json, Decoding, ErrorKind};
    ///
    /// let even = Decoding::<u32>::single_value().try_map(|x| {
    ///     if x % 2 == 0 { Ok(x) } else { Err(format!("{} is odd", x)) }
    /// });
    ///
    /// assert_eq!(json::decode(b"4", &even).unwrap(), 4);
    /// let err = json::decode(b"3", &even).unwrap_err();
    /// assert!(matches!(err.kind(), ErrorKind::Transform { .. }));
    /// ```
    pub fn try_map<U, E, F>(self, f: F) -> Decoding<U>
    where
        U: 'static,
        E: Into<Box<dyn error::Error + Send + Sync>>,
        F: Fn(T) -> Result<U, E> + Send + Sync + 'static,
    {
        Decoding::new(move |reader| {
            let value = self.decode(reader)?;
            f(value).map_err(|e| {
                Error::new(ErrorKind::Transform {
                    path: reader.path().clone(),
                    source: e.into(),
                })
            })
        })
    }

    /// Decode both values from the same reader. Method form of [`zip2`](crate::zip2).
    pub fn zip<U: 'static>(self, other: Decoding<U>) -> Decoding<(T, U)> {
        crate::zip2(self, other)
    }

    /// Run this decoding against the value stored under `key` of a keyed container
    pub fn with_key<K>(self, key: K) -> Self
    where
        K: CodingKey,
    {
        Decoding::new(move |reader| {
            let child = reader.keyed()?.reader_for_key(&key)?;
            self.decode(&child)
        })
    }

    /// Run this decoding against the value stored under `key`, or yield `None`
    /// without running it when the key is absent.
    ///
    /// Only absence is recovered. A present but null value is handed to this
    /// decoding as is.
    pub fn optional_with_key<K>(self, key: K) -> Decoding<Option<T>>
    where
        K: CodingKey,
    {
        Decoding::new(move |reader| {
            let keyed = reader.keyed()?;
            if !keyed.contains(&key) {
                return Ok(None);
            }

            let child = keyed.reader_for_key(&key)?;
            self.decode(&child).map(Some)
        })
    }
}

impl<T> Decoding<Vec<T>>
where
    T: 'static,
{
    /// Decode every element of an unkeyed container with `element`, in order
    pub fn array_of(element: Decoding<T>) -> Self {
        Decoding::new(move |reader| {
            let mut seq = reader.unkeyed()?;
            let mut result = Vec::with_capacity(seq.len());
            while !seq.is_at_end() {
                let child = seq.next_reader()?;
                result.push(element.decode(&child)?);
            }
            Ok(result)
        })
    }
}

impl<T> Decoding<Option<T>>
where
    T: 'static,
{
    /// Substitute `default` when the decoded value is `None`
    pub fn replace_nil(self, default: T) -> Decoding<T>
    where
        T: Clone + Send + Sync,
    {
        self.map(move |x| x.unwrap_or_else(|| default.clone()))
    }
}

impl<T> Decoding<T>
where
    T: DeserializeOwned + 'static,
{
    /// Read the value directly as a natively decodable `T`
    pub fn single_value() -> Self {
        Decoding::new(|reader| reader.decode())
    }

    /// Read the first element of an unkeyed container
    pub fn unkeyed() -> Self {
        Decoding::new(|reader| reader.unkeyed()?.decode_next())
    }

    /// Read the value stored under `key` of a keyed container. An absent key
    /// is an error.
    pub fn key<K>(key: K) -> Self
    where
        K: CodingKey,
    {
        Decoding::new(move |reader| reader.keyed()?.decode(&key))
    }
}

impl<T> Decoding<Option<T>>
where
    T: DeserializeOwned + 'static,
{
    /// Read the value stored under `key`, yielding `None` when the key is
    /// absent or the value is null
    pub fn optional_key<K>(key: K) -> Self
    where
        K: CodingKey,
    {
        Decoding::new(move |reader| reader.keyed()?.decode_if_present(&key))
    }

    /// Read the first element of an unkeyed container, yielding `None` when
    /// the container is empty or the element is null
    pub fn optional_unkeyed() -> Self {
        Decoding::new(|reader| reader.unkeyed()?.decode_next_if_present())
    }
}

impl<T> Decoding<Vec<T>>
where
    T: DeserializeOwned + 'static,
{
    /// Decode an unkeyed container of natively decodable elements
    pub fn array() -> Self {
        Decoding::array_of(Decoding::single_value())
    }
}
