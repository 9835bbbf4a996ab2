use crate::{CodingKey, Error, ErrorKind, Writer};
use serde::Serialize;
use std::{error, fmt, sync::Arc};

type EncodeFn<T> = dyn Fn(&T, &mut Writer<'_>) -> Result<(), Error> + Send + Sync;

/// A description of how to write a `T` into a positioned [`Writer`].
///
/// Field level encodings are attached to a parent type with
/// [`pullback`](Encoding::pullback) and merged with
/// [`combine`](Encoding::combine):
///
/// ```
/// use codings::{json, Encoding};
///
/// struct User {
///     name: String,
///     age: u8,
///     city: Option<String>,
/// }
///
/// let encoding = Encoding::combine([
///     Encoding::<String>::key("name").pullback(|u: &User| &u.name),
///     Encoding::<u8>::key("age").pullback(|u: &User| &u.age),
///     Encoding::<String>::key("city").optional().pullback(|u: &User| &u.city),
/// ]);
///
/// let user = User { name: String::from("Joe Bloggs"), age: 18, city: None };
/// let out = json::encode_string(&user, &encoding)?;
/// assert_eq!(out, r#"{"name":"Joe Bloggs","age":18}"#);
/// # Ok::<(), codings::Error>(())
/// ```
pub struct Encoding<T> {
    encode: Arc<EncodeFn<T>>,
}

impl<T> Clone for Encoding<T> {
    fn clone(&self) -> Self {
        Encoding {
            encode: Arc::clone(&self.encode),
        }
    }
}

impl<T> fmt::Debug for Encoding<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Encoding")
            .field("input", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: 'static> Encoding<T> {
    /// Create an encoding from a function of a value and a writer
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T, &mut Writer<'_>) -> Result<(), Error> + Send + Sync + 'static,
    {
        Encoding {
            encode: Arc::new(f),
        }
    }

    /// Write the value with this encoding
    #[inline]
    pub fn encode(&self, value: &T, writer: &mut Writer<'_>) -> Result<(), Error> {
        (self.encode)(value, writer)
    }

    /// Encode a `U` by first projecting it to a borrowed `T`
    pub fn pullback<U, F>(self, f: F) -> Encoding<U>
    where
        U: 'static,
        F: Fn(&U) -> &T + Send + Sync + 'static,
    {
        Encoding::new(move |value, writer| self.encode(f(value), writer))
    }

    /// Encode a `U` by first computing an owned `T` from it
    pub fn pullback_owned<U, F>(self, f: F) -> Encoding<U>
    where
        U: 'static,
        F: Fn(&U) -> T + Send + Sync + 'static,
    {
        Encoding::new(move |value, writer| self.encode(&f(value), writer))
    }

    /// Encode a `U` by first computing a `T` from it with a function that may fail
    pub fn try_pullback<U, E, F>(self, f: F) -> Encoding<U>
    where
        U: 'static,
        E: Into<Box<dyn error::Error + Send + Sync>>,
        F: Fn(&U) -> Result<T, E> + Send + Sync + 'static,
    {
        Encoding::new(move |value, writer| {
            let projected = f(value).map_err(|e| {
                Error::new(ErrorKind::Transform {
                    path: writer.path().clone(),
                    source: e.into(),
                })
            })?;
            self.encode(&projected, writer)
        })
    }

    /// Encode an optional value, writing nothing at all for `None`.
    ///
    /// Under a key this omits the key entirely, which differs from writing an
    /// explicit null (see [`null_value_at`](Encoding::null_value_at)).
    pub fn optional(self) -> Encoding<Option<T>> {
        Encoding::new(move |value: &Option<T>, writer| match value {
            Some(x) => self.encode(x, writer),
            None => Ok(()),
        })
    }

    /// Encode an optional value, writing `default` in place of `None`
    pub fn replace_nil(self, default: T) -> Encoding<Option<T>>
    where
        T: Send + Sync,
    {
        Encoding::new(move |value: &Option<T>, writer| {
            self.encode(value.as_ref().unwrap_or(&default), writer)
        })
    }

    /// Run this encoding against the slot under `key` of a keyed container.
    /// Anything already written under `key` is merged with, not replaced.
    pub fn with_key<K>(self, key: K) -> Self
    where
        K: CodingKey,
    {
        Encoding::new(move |value, writer| {
            let mut keyed = writer.keyed()?;
            let mut child = keyed.writer_for_key(&key);
            self.encode(value, &mut child)
        })
    }

    /// Run every encoding, in the given order, against the same value and writer.
    ///
    /// Stops at the first failure.
    pub fn combine<I>(encodings: I) -> Self
    where
        I: IntoIterator<Item = Encoding<T>>,
    {
        let encodings: Vec<Encoding<T>> = encodings.into_iter().collect();
        Encoding::new(move |value, writer| {
            for encoding in &encodings {
                encoding.encode(value, writer)?;
            }
            Ok(())
        })
    }

    /// Write every element of a collection into an unkeyed container, in
    /// iteration order
    ///
    /// ```
    /// use codings::{json, Encoding};
    /// use std::collections::VecDeque;
    ///
    /// let encoding = Encoding::<VecDeque<u8>>::array_of(Encoding::<u8>::single_value());
    /// let data: VecDeque<u8> = vec![3, 2, 1].into();
    /// assert_eq!(json::encode_string(&data, &encoding)?, "[3,2,1]");
    /// # Ok::<(), codings::Error>(())
    /// ```
    pub fn array_of<E>(element: Encoding<E>) -> Self
    where
        E: 'static,
        for<'a> &'a T: IntoIterator<Item = &'a E>,
    {
        Encoding::new(move |value, writer| {
            let mut seq = writer.unkeyed()?;
            for item in value {
                let mut child = seq.next_writer();
                element.encode(item, &mut child)?;
            }
            Ok(())
        })
    }

    /// Write an explicit null, ignoring the value
    pub fn null_value() -> Self {
        Encoding::new(|_, writer| {
            writer.encode_null();
            Ok(())
        })
    }

    /// Write an explicit null under `key`, ignoring the value
    pub fn null_value_at<K>(key: K) -> Self
    where
        K: CodingKey,
    {
        Encoding::new(move |_, writer| {
            writer.keyed()?.encode_null(&key);
            Ok(())
        })
    }
}

impl<T> Encoding<T>
where
    T: Serialize + 'static,
{
    /// Write the value directly as a natively encodable `T`
    pub fn single_value() -> Self {
        Encoding::new(|value, writer| writer.encode(value))
    }

    /// Append the value to an unkeyed container
    pub fn unkeyed() -> Self {
        Encoding::new(|value, writer| writer.unkeyed()?.encode(value))
    }

    /// Write the value under `key` of a keyed container
    pub fn key<K>(key: K) -> Self
    where
        K: CodingKey,
    {
        Encoding::new(move |value, writer| writer.keyed()?.encode(&key, value))
    }
}

impl<T> Encoding<Vec<T>>
where
    T: Serialize + 'static,
{
    /// Write a vector of natively encodable elements into an unkeyed container
    pub fn array() -> Self {
        Encoding::array_of(Encoding::<T>::single_value())
    }
}
