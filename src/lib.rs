/*!

Composable decoding and encoding combinators for structured data.

Codings describes how to read a type out of a JSON-like payload, and how to
write it back, as plain values built from small reusable pieces instead of
hand written `Deserialize` and `Serialize` implementations.

## Features

- ✔ Composable: build struct decodings from field decodings with `zip` and `map`
- ✔ Decoupled: the same type may have many decodings, none of them tied to the type
- ✔ Precise: optional fields, defaults, and explicit nulls are spelled out at the use site
- ✔ Shareable: decodings and encodings are immutable and `Send + Sync`
- ✔ Bridged: run any decoding or encoding through serde's `Deserializer` and `Serializer`

## Quick Start

```rust
use codings::{json, zip3, Decoding, Encoding};

#[derive(Debug, PartialEq)]
struct User {
    name: String,
    age: u8,
    city: String,
}

let decoding = zip3(
    Decoding::key("name"),
    Decoding::key("age"),
    Decoding::optional_key("city").replace_nil(String::from("Unknown")),
)
.map(|(name, age, city)| User { name, age, city });

let user = json::decode(br#"{"name":"Joe Bloggs","age":18}"#, &decoding)?;
assert_eq!(user, User {
    name: String::from("Joe Bloggs"),
    age: 18,
    city: String::from("Unknown"),
});

let encoding = Encoding::combine([
    Encoding::<String>::key("name").pullback(|u: &User| &u.name),
    Encoding::<u8>::key("age").pullback(|u: &User| &u.age),
    Encoding::<String>::key("city").pullback(|u: &User| &u.city),
]);

let out = json::encode_string(&user, &encoding)?;
assert_eq!(out, r#"{"name":"Joe Bloggs","age":18,"city":"Unknown"}"#);
# Ok::<(), codings::Error>(())
```

## Nesting

A decoding written for a child object can be reused under any parent key with
[`Decoding::with_key`], and lists of them with [`Decoding::array_of`]:

```rust
use codings::{json, Decoding};

let name = Decoding::<String>::key("name");
let crew = Decoding::array_of(name).with_key("crew");

let data = br#"{"crew": [{"name": "Luke"}, {"name": "Leia"}]}"#;
assert_eq!(json::decode(data, &crew)?, vec!["Luke", "Leia"]);
# Ok::<(), codings::Error>(())
```

## Absent and null

The leaf [`Decoding::optional_key`] treats a missing key and a key holding an
explicit null the same way: both produce `None`. The composite
[`Decoding::optional_with_key`] only recovers from a missing key. On the
encoding side, [`Encoding::optional`] omits `None` entirely while
[`Encoding::null_value_at`] always writes an explicit null. A slot that an
encoding leaves untouched, for instance a nested value whose fields are all
`None`, is written as an empty object so the matching decoding still finds a
keyed container there.

Failures are never recovered from otherwise. The first failing field aborts
the whole decoding and is reported with the [`CodingPath`] where it occurred.

## One Level Lower

When no combinator fits, drop down to the [`Reader`] and [`Writer`] containers
with [`Decoding::new`] and [`Encoding::new`]:

```rust
use codings::{json, Decoding};

// sum all numbers of an object, whatever the keys
let total = Decoding::new(|reader| {
    let keyed = reader.keyed()?;
    let mut sum = 0u64;
    for key in keyed.keys() {
        sum += keyed.decode::<u64, _>(key)?;
    }
    Ok(sum)
});

assert_eq!(json::decode(br#"{"a": 1, "b": 2}"#, &total)?, 3);
# Ok::<(), codings::Error>(())
```

*/

mod container;
mod de;
mod decoding;
mod encoding;
mod errors;
mod key;
mod path;
mod ser;
mod zip;

pub mod json;

pub use self::container::*;
pub use self::de::DecodingSeed;
pub use self::decoding::Decoding;
pub use self::encoding::Encoding;
pub use self::errors::*;
pub use self::key::CodingKey;
pub use self::path::{CodingPath, PathSegment};
pub use self::ser::Encoded;
pub use self::zip::*;
