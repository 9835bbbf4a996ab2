use super::{unexpected_container, value_type};
use crate::{CodingKey, CodingPath, ContainerKind, Error, ErrorKind, PathSegment};
use serde::Serialize;
use serde_json::{Map, Value};
use std::{collections::HashMap, mem};

#[inline]
pub(crate) fn encode_value<T>(value: &T, path: &CodingPath) -> Result<Value, Error>
where
    T: Serialize + ?Sized,
{
    serde_json::to_value(value).map_err(|source| {
        Error::new(ErrorKind::InvalidValue {
            path: path.clone(),
            source,
        })
    })
}

/// A slot of the tree under construction. `Unset` is kept apart from an
/// explicit null so that containers are only ever opened over untouched slots.
#[derive(Debug, Default)]
enum Node {
    #[default]
    Unset,
    Value(Value),
    Keyed(Entries),
    Unkeyed(Vec<Node>),
}

impl Node {
    fn kind(&self) -> &'static str {
        match self {
            Node::Unset => "nothing",
            Node::Value(value) => value_type(value),
            Node::Keyed(_) => "an object",
            Node::Unkeyed(_) => "an array",
        }
    }

    fn open_keyed(&mut self) {
        *self = match mem::take(self) {
            Node::Unset => Node::Keyed(Entries::default()),
            Node::Value(Value::Object(map)) => Node::Keyed(Entries::from(map)),
            other => other,
        };
    }

    fn open_unkeyed(&mut self) {
        *self = match mem::take(self) {
            Node::Unset => Node::Unkeyed(Vec::new()),
            Node::Value(Value::Array(items)) => {
                Node::Unkeyed(items.into_iter().map(Node::Value).collect())
            }
            other => other,
        };
    }

    // a slot nothing was written to is an empty keyed container
    fn into_value(self) -> Value {
        match self {
            Node::Unset => Value::Object(Map::new()),
            Node::Value(value) => value,
            Node::Keyed(entries) => Value::Object(
                entries
                    .nodes
                    .into_iter()
                    .map(|(key, node)| (key, node.into_value()))
                    .collect(),
            ),
            Node::Unkeyed(items) => {
                Value::Array(items.into_iter().map(Node::into_value).collect())
            }
        }
    }
}

/// Keyed slots in first write order
#[derive(Debug, Default)]
struct Entries {
    index: HashMap<String, usize>,
    nodes: Vec<(String, Node)>,
}

impl Entries {
    fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    fn slot(&mut self, name: &str) -> &mut Node {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                let idx = self.nodes.len();
                self.index.insert(name.to_owned(), idx);
                self.nodes.push((name.to_owned(), Node::Unset));
                idx
            }
        };

        &mut self.nodes[idx].1
    }
}

impl From<Map<String, Value>> for Entries {
    fn from(map: Map<String, Value>) -> Self {
        let mut entries = Entries::default();
        for (key, value) in map {
            *entries.slot(&key) = Node::Value(value);
        }
        entries
    }
}

/// The output of an encoding pass.
///
/// Writes go through the [`Writer`] positioned at the root. A slot that is
/// opened but never written to, the root included, ends up as an empty
/// object. An explicit null stays null and can't be reopened as a container.
///
/// ```
/// use codings::Document;
/// use serde_json::json;
///
/// let mut document = Document::new();
/// let mut writer = document.writer();
/// writer.keyed().unwrap().encode("a", &1).unwrap();
/// writer.keyed().unwrap().encode("b", &2).unwrap();
/// writer.keyed().unwrap().writer_for_key("c");
/// assert_eq!(document.into_value(), json!({"a": 1, "b": 2, "c": {}}));
/// ```
#[derive(Debug, Default)]
pub struct Document {
    root: Node,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Document::default()
    }

    /// A writer positioned at the root of the document
    pub fn writer(&mut self) -> Writer<'_> {
        Writer {
            node: &mut self.root,
            path: CodingPath::root(),
        }
    }

    /// Finish the document into a value tree
    pub fn into_value(self) -> Value {
        self.root.into_value()
    }
}

impl From<Value> for Document {
    /// Start from an already written value. Objects and arrays are merged
    /// into by later writes.
    fn from(value: Value) -> Self {
        Document {
            root: Node::Value(value),
        }
    }
}

/// A positioned slot in the output document.
///
/// Opening a keyed or unkeyed container over an unset slot initializes it,
/// while opening the same kind of container again reuses what was already
/// written. This is what allows several encodings to contribute fields to
/// one object.
#[derive(Debug)]
pub struct Writer<'a> {
    node: &'a mut Node,
    path: CodingPath,
}

impl<'a> Writer<'a> {
    #[inline]
    fn child(node: &'a mut Node, path: CodingPath) -> Self {
        Writer { node, path }
    }

    /// The location of this writer relative to the root
    #[inline]
    pub fn path(&self) -> &CodingPath {
        &self.path
    }

    /// Whether nothing has been written to this slot yet
    #[inline]
    pub fn is_unset(&self) -> bool {
        matches!(self.node, Node::Unset)
    }

    /// Write a natively encodable value, replacing the slot's contents
    pub fn encode<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        *self.node = Node::Value(encode_value(value, &self.path)?);
        Ok(())
    }

    /// Write an explicit null, replacing the slot's contents
    #[inline]
    pub fn encode_null(&mut self) {
        *self.node = Node::Value(Value::Null);
    }

    /// Open the slot as an ordered sequence
    pub fn unkeyed(&mut self) -> Result<UnkeyedWriter<'_>, Error> {
        self.node.open_unkeyed();
        match &mut *self.node {
            Node::Unkeyed(items) => Ok(UnkeyedWriter {
                items,
                path: self.path.clone(),
            }),
            other => Err(unexpected_container(
                ContainerKind::Unkeyed,
                other.kind(),
                &self.path,
            )),
        }
    }

    /// Open the slot as a mapping of keys to values
    pub fn keyed(&mut self) -> Result<KeyedWriter<'_>, Error> {
        self.node.open_keyed();
        match &mut *self.node {
            Node::Keyed(entries) => Ok(KeyedWriter {
                entries,
                path: self.path.clone(),
            }),
            other => Err(unexpected_container(
                ContainerKind::Keyed,
                other.kind(),
                &self.path,
            )),
        }
    }
}

/// An ordered sequence that is appended to
#[derive(Debug)]
pub struct UnkeyedWriter<'a> {
    items: &'a mut Vec<Node>,
    path: CodingPath,
}

impl<'a> UnkeyedWriter<'a> {
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn path(&self) -> &CodingPath {
        &self.path
    }

    /// Append an unset element and return a writer positioned at it
    pub fn next_writer(&mut self) -> Writer<'_> {
        let idx = self.items.len();
        self.items.push(Node::Unset);
        Writer::child(&mut self.items[idx], self.path.join(PathSegment::Index(idx)))
    }

    /// Append a natively encodable value
    pub fn encode<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: Serialize + ?Sized,
    {
        let path = self.path.join(PathSegment::Index(self.items.len()));
        let value = encode_value(value, &path)?;
        self.items.push(Node::Value(value));
        Ok(())
    }

    #[inline]
    pub fn encode_null(&mut self) {
        self.items.push(Node::Value(Value::Null));
    }
}

/// A mapping of keys to values that is written in insertion order
#[derive(Debug)]
pub struct KeyedWriter<'a> {
    entries: &'a mut Entries,
    path: CodingPath,
}

impl<'a> KeyedWriter<'a> {
    #[inline]
    pub fn contains<K>(&self, key: &K) -> bool
    where
        K: CodingKey + ?Sized,
    {
        self.entries.contains(key.name())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.nodes.is_empty()
    }

    #[inline]
    pub fn path(&self) -> &CodingPath {
        &self.path
    }

    /// Return a writer positioned at `key`, keeping anything already written there
    pub fn writer_for_key<K>(&mut self, key: &K) -> Writer<'_>
    where
        K: CodingKey + ?Sized,
    {
        let name = key.name();
        let path = self.path.join(PathSegment::Key(name.to_owned()));
        Writer::child(self.entries.slot(name), path)
    }

    /// Write a natively encodable value under `key`, replacing any previous value
    pub fn encode<K, T>(&mut self, key: &K, value: &T) -> Result<(), Error>
    where
        K: CodingKey + ?Sized,
        T: Serialize + ?Sized,
    {
        let name = key.name();
        let value = encode_value(value, &self.path.join(PathSegment::Key(name.to_owned())))?;
        *self.entries.slot(name) = Node::Value(value);
        Ok(())
    }

    /// Write an explicit null under `key`
    pub fn encode_null<K>(&mut self, key: &K)
    where
        K: CodingKey + ?Sized,
    {
        *self.entries.slot(key.name()) = Node::Value(Value::Null);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use serde_json::json;

    #[test]
    fn nested_writers_merge_into_the_same_object() {
        let mut document = Document::new();
        let mut writer = document.writer();
        {
            let mut keyed = writer.keyed().unwrap();
            let mut parent = keyed.writer_for_key("parent");
            parent.keyed().unwrap().encode("a", &1).unwrap();
        }
        {
            let mut keyed = writer.keyed().unwrap();
            let mut parent = keyed.writer_for_key("parent");
            parent.keyed().unwrap().encode("b", "two").unwrap();
        }

        assert_eq!(document.into_value(), json!({"parent": {"a": 1, "b": "two"}}));
    }

    #[test]
    fn unkeyed_writer_appends() {
        let mut document = Document::new();
        let mut writer = document.writer();
        writer.unkeyed().unwrap().encode(&1).unwrap();
        {
            let mut seq = writer.unkeyed().unwrap();
            seq.encode_null();
            let mut element = seq.next_writer();
            assert_eq!(element.path().to_string(), "[2]");
            element.encode("x").unwrap();
        }
        assert_eq!(document.into_value(), json!([1, null, "x"]));
    }

    #[test]
    fn container_over_scalar_is_an_error() {
        let mut document = Document::from(json!(5));
        let mut writer = document.writer();
        let err = writer.keyed().unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::UnexpectedContainer {
                expected: ContainerKind::Keyed,
                found: "a number",
                ..
            }
        ));
        assert!(writer.unkeyed().is_err());
    }

    #[test]
    fn keyed_writer_preserves_insertion_order() {
        let mut document = Document::new();
        let mut writer = document.writer();
        let mut keyed = writer.keyed().unwrap();
        keyed.encode("z", &1).unwrap();
        keyed.encode("a", &2).unwrap();
        keyed.encode_null("m");
        keyed.encode("z", &3).unwrap();
        assert!(keyed.contains("m"));
        assert_eq!(keyed.len(), 3);
        assert_eq!(
            serde_json::to_string(&document.into_value()).unwrap(),
            r#"{"z":3,"a":2,"m":null}"#
        );
    }

    #[test]
    fn untouched_slots_become_empty_objects() {
        let mut document = Document::new();
        let mut writer = document.writer();
        assert!(writer.is_unset());
        {
            let mut keyed = writer.keyed().unwrap();
            keyed.writer_for_key("inner");
            let mut seq = keyed.writer_for_key("list");
            seq.unkeyed().unwrap().next_writer();
        }
        assert!(!writer.is_unset());
        assert_eq!(document.into_value(), json!({"inner": {}, "list": [{}]}));

        assert_eq!(Document::new().into_value(), json!({}));
    }

    #[rstest]
    #[case(ContainerKind::Keyed)]
    #[case(ContainerKind::Unkeyed)]
    fn explicit_null_is_not_reopened(#[case] kind: ContainerKind) {
        let mut document = Document::new();
        let mut writer = document.writer();
        writer.encode_null();

        let err = match kind {
            ContainerKind::Keyed => writer.keyed().map(|_| ()).unwrap_err(),
            ContainerKind::Unkeyed => writer.unkeyed().map(|_| ()).unwrap_err(),
        };
        match err.kind() {
            ErrorKind::UnexpectedContainer {
                expected, found, ..
            } => {
                assert_eq!(*expected, kind);
                assert_eq!(*found, "null");
            }
            x => panic!("unexpected error: {:?}", x),
        }
        assert_eq!(document.into_value(), Value::Null);
    }

    #[test]
    fn natively_written_containers_are_merged_into() {
        let mut document = Document::from(json!({"a": 1}));
        let mut writer = document.writer();
        writer.keyed().unwrap().encode("b", &2).unwrap();
        assert_eq!(document.into_value(), json!({"a": 1, "b": 2}));

        let mut document = Document::new();
        let mut writer = document.writer();
        writer.encode(&vec![1, 2]).unwrap();
        writer.unkeyed().unwrap().encode(&3).unwrap();
        assert_eq!(document.into_value(), json!([1, 2, 3]));
    }

    #[test]
    fn unrepresentable_values_are_reported() {
        let mut bad = HashMap::new();
        bad.insert((1, 2), "tuple keys");

        let mut document = Document::new();
        let mut writer = document.writer();
        let err = writer.keyed().unwrap().encode("field", &bad).unwrap_err();
        match err.kind() {
            ErrorKind::InvalidValue { path, .. } => assert_eq!(path.to_string(), "field"),
            x => panic!("unexpected error: {:?}", x),
        }
    }
}
