use crate::CodingPath;
use std::error;
use std::fmt;

/// An error that can occur when decoding or encoding data
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }

    /// Create an error with a free form message.
    ///
    /// Useful from inside a hand written [`Decoding::new`](crate::Decoding::new)
    /// or [`Encoding::new`](crate::Encoding::new) closure.
    pub fn custom<T: fmt::Display>(msg: T) -> Error {
        Error::new(ErrorKind::Message(msg.to_string()))
    }

    /// Return the specific type of error
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Consume the error, returning the specific type of error
    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns the location in the payload where the error occurred (if available)
    pub fn path(&self) -> Option<&CodingPath> {
        self.0.path()
    }
}

/// The kind of container a combinator attempted to open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// A mapping from keys to values
    Keyed,

    /// An ordered sequence of values
    Unkeyed,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContainerKind::Keyed => f.write_str("keyed container"),
            ContainerKind::Unkeyed => f.write_str("unkeyed container"),
        }
    }
}

/// Specific type of error
#[derive(Debug)]
pub enum ErrorKind {
    /// A key required by a leaf decoding is absent from a keyed container
    KeyNotFound { key: String, path: CodingPath },

    /// A non-optional value was explicitly null
    ValueNotFound { path: CodingPath },

    /// The data at the path could not be converted to the requested type
    TypeMismatch {
        path: CodingPath,
        source: serde_json::Error,
    },

    /// A keyed or unkeyed container was requested over a value of a different shape
    UnexpectedContainer {
        path: CodingPath,
        expected: ContainerKind,
        found: &'static str,
    },

    /// An unkeyed container was advanced past its last element
    Exhausted { path: CodingPath, len: usize },

    /// A caller supplied transformation failed
    Transform {
        path: CodingPath,
        source: Box<dyn error::Error + Send + Sync>,
    },

    /// A value could not be represented by the underlying format
    InvalidValue {
        path: CodingPath,
        source: serde_json::Error,
    },

    /// A free form error, typically raised through a serde adapter
    Message(String),

    /// The payload was not well formed JSON
    Json(serde_json::Error),

    /// An error occurred when reading or writing the payload
    Io(std::io::Error),
}

impl ErrorKind {
    pub fn path(&self) -> Option<&CodingPath> {
        match *self {
            ErrorKind::KeyNotFound { ref path, .. } => Some(path),
            ErrorKind::ValueNotFound { ref path } => Some(path),
            ErrorKind::TypeMismatch { ref path, .. } => Some(path),
            ErrorKind::UnexpectedContainer { ref path, .. } => Some(path),
            ErrorKind::Exhausted { ref path, .. } => Some(path),
            ErrorKind::Transform { ref path, .. } => Some(path),
            ErrorKind::InvalidValue { ref path, .. } => Some(path),
            _ => None,
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self.0 {
            ErrorKind::TypeMismatch { ref source, .. } => Some(source),
            ErrorKind::InvalidValue { ref source, .. } => Some(source),
            ErrorKind::Transform { ref source, .. } => Some(source.as_ref()),
            ErrorKind::Json(ref err) => Some(err),
            ErrorKind::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            ErrorKind::KeyNotFound { ref key, ref path } => {
                write!(f, "key not found: {} (path: {})", key, path)
            }
            ErrorKind::ValueNotFound { ref path } => {
                write!(f, "expected a value but found null (path: {})", path)
            }
            ErrorKind::TypeMismatch {
                ref path,
                ref source,
            } => write!(f, "type mismatch: {} (path: {})", source, path),
            ErrorKind::UnexpectedContainer {
                ref path,
                expected,
                found,
            } => write!(f, "expected {} but found {} (path: {})", expected, found, path),
            ErrorKind::Exhausted { ref path, len } => write!(
                f,
                "unkeyed container exhausted after {} elements (path: {})",
                len, path
            ),
            ErrorKind::Transform {
                ref path,
                ref source,
            } => write!(f, "transform failed: {} (path: {})", source, path),
            ErrorKind::InvalidValue {
                ref path,
                ref source,
            } => write!(f, "unable to encode value: {} (path: {})", source, path),
            ErrorKind::Message(ref msg) => write!(f, "{}", msg),
            ErrorKind::Json(ref err) => write!(f, "json error: {}", err),
            ErrorKind::Io(ref err) => write!(f, "io error: {}", err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::new(ErrorKind::Io(error))
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        if error.is_io() {
            Error::new(ErrorKind::Io(error.into()))
        } else {
            Error::new(ErrorKind::Json(error))
        }
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::custom(msg)
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::custom(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathSegment;
    use std::error::Error as _;

    #[test]
    fn display_includes_path() {
        let path = CodingPath::root().join(PathSegment::Key(String::from("user")));
        let err = Error::new(ErrorKind::KeyNotFound {
            key: String::from("name"),
            path,
        });
        assert_eq!(err.to_string(), "key not found: name (path: user)");
        assert_eq!(err.path().map(|x| x.to_string()).as_deref(), Some("user"));
    }

    #[test]
    fn custom_messages_have_no_path() {
        let err = Error::custom("boom");
        assert!(err.path().is_none());
        assert!(err.source().is_none());
        assert!(matches!(err.into_kind(), ErrorKind::Message(ref x) if x == "boom"));
    }

    #[test]
    fn json_syntax_errors_are_classified() {
        let json_err = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        let err = Error::from(json_err);
        assert!(matches!(err.kind(), ErrorKind::Json(_)));
        assert!(err.source().is_some());
    }
}
