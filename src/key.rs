use std::borrow::Cow;

/// A symbolic identifier that addresses a field inside a keyed container.
///
/// String keys work out of the box. An enum of the fields of a type keeps the
/// key layout of a decoding and its matching encoding in one place:
///
/// ```
/// use codings::CodingKey;
///
/// #[derive(Debug, Clone, Copy)]
/// enum UserKey {
///     Name,
///     Age,
/// }
///
/// impl CodingKey for UserKey {
///     fn name(&self) -> &str {
///         match self {
///             UserKey::Name => "name",
///             UserKey::Age => "age",
///         }
///     }
/// }
///
/// assert_eq!(UserKey::Age.name(), "age");
/// assert_eq!("city".name(), "city");
/// ```
///
/// Keys are captured by combinators that may be shared across threads, hence
/// the `Send + Sync + 'static` requirement.
pub trait CodingKey: Send + Sync + 'static {
    /// The textual representation of the key in the underlying format
    fn name(&self) -> &str;
}

impl CodingKey for str {
    #[inline]
    fn name(&self) -> &str {
        self
    }
}

impl CodingKey for &'static str {
    #[inline]
    fn name(&self) -> &str {
        self
    }
}

impl CodingKey for String {
    #[inline]
    fn name(&self) -> &str {
        self.as_str()
    }
}

impl CodingKey for Box<str> {
    #[inline]
    fn name(&self) -> &str {
        self
    }
}

impl CodingKey for Cow<'static, str> {
    #[inline]
    fn name(&self) -> &str {
        self.as_ref()
    }
}
