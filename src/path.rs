use std::fmt;

/// One step from a parent container into a child value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Descended into a keyed container under the given key
    Key(String),

    /// Descended into an unkeyed container at the given position
    Index(usize),
}

/// The location of a reader or writer relative to the root of the payload.
///
/// Every container error carries the path where it occurred so that a failure
/// deep inside a nested decoding can be traced back to the offending field.
///
/// ```
/// use codings::{CodingPath, PathSegment};
///
/// let path = CodingPath::root()
///     .join(PathSegment::Key(String::from("users")))
///     .join(PathSegment::Index(2))
///     .join(PathSegment::Key(String::from("name")));
/// assert_eq!(path.to_string(), "users[2].name");
/// assert_eq!(CodingPath::root().to_string(), "<root>");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodingPath {
    segments: Vec<PathSegment>,
}

impl CodingPath {
    /// The path of a top level reader or writer
    pub fn root() -> Self {
        CodingPath::default()
    }

    /// Returns a new path with the segment appended
    pub fn join(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        CodingPath { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for CodingPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{}", key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }

        Ok(())
    }
}
