use crate::{Decoding, Reader};
use de::{DeserializeSeed, Deserializer};
use serde::de;
use serde::Deserialize;
use serde_json::Value;

/// Drives a [`Decoding`] through any serde [`Deserializer`].
///
/// The seed captures the whole value handed to it by the deserializer and
/// then runs the decoding over the captured tree. Decoding failures are
/// reported through the deserializer's own error type.
///
/// ```
/// use codings::{Decoding, DecodingSeed};
/// use serde::de::DeserializeSeed;
///
/// let decoding = Decoding::<Vec<String>>::array().map(|x| x.len());
/// let mut deserializer = serde_json::Deserializer::from_str(r#"["a", "b"]"#);
/// let actual = DecodingSeed::new(&decoding).deserialize(&mut deserializer)?;
/// assert_eq!(actual, 2);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug)]
pub struct DecodingSeed<'d, T> {
    decoding: &'d Decoding<T>,
}

impl<'d, T> DecodingSeed<'d, T> {
    pub fn new(decoding: &'d Decoding<T>) -> Self {
        DecodingSeed { decoding }
    }
}

impl<'d, T> Clone for DecodingSeed<'d, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'d, T> Copy for DecodingSeed<'d, T> {}

impl<'de, 'd, T> DeserializeSeed<'de> for DecodingSeed<'d, T>
where
    T: 'static,
{
    type Value = T;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        let captured = Value::deserialize(deserializer)?;
        self.decoding
            .decode(&Reader::new(&captured))
            .map_err(de::Error::custom)
    }
}

impl<T: 'static> Decoding<T> {
    /// Decode directly from a serde deserializer.
    ///
    /// Handy for bridging into derived types with `#[serde(deserialize_with)]`
    /// and a decoding stored in a static.
    pub fn deserialize<'de, D>(&self, deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
    {
        DecodingSeed::new(self).deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::SeqAccess;
    use std::{fmt, sync::OnceLock};

    #[derive(Debug, PartialEq)]
    struct Coordinate {
        lat: f64,
        lon: f64,
    }

    fn coordinate() -> &'static Decoding<Coordinate> {
        static DECODING: OnceLock<Decoding<Coordinate>> = OnceLock::new();
        DECODING.get_or_init(|| {
            crate::zip2(
                Decoding::key("latitude"),
                Decoding::optional_key("longitude").replace_nil(0.0),
            )
            .map(|(lat, lon)| Coordinate { lat, lon })
        })
    }

    fn deserialize_coordinate<'de, D>(deserializer: D) -> Result<Coordinate, D::Error>
    where
        D: Deserializer<'de>,
    {
        coordinate().deserialize(deserializer)
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Landmark {
        name: String,
        #[serde(deserialize_with = "deserialize_coordinate")]
        location: Coordinate,
    }

    #[test]
    fn bridges_into_derived_types() {
        let data = r#"{"name": "Pier", "location": {"latitude": 1.5}}"#;
        let actual: Landmark = serde_json::from_str(data).unwrap();
        assert_eq!(
            actual,
            Landmark {
                name: String::from("Pier"),
                location: Coordinate { lat: 1.5, lon: 0.0 },
            }
        );
    }

    #[test]
    fn decode_errors_surface_through_the_deserializer() {
        let data = r#"{"name": "Pier", "location": {"longitude": 1.5}}"#;
        let err = serde_json::from_str::<Landmark>(data).unwrap_err();
        assert!(err.to_string().contains("key not found: latitude"));
    }

    #[test]
    fn seed_inside_a_sequence() {
        struct Pairs<'d>(DecodingSeed<'d, u32>);

        impl<'de, 'd> de::Visitor<'de> for Pairs<'d> {
            type Value = Vec<u32>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut result = Vec::new();
                while let Some(x) = seq.next_element_seed(self.0)? {
                    result.push(x);
                }
                Ok(result)
            }
        }

        let decoding = Decoding::<u32>::key("n");
        let mut deserializer = serde_json::Deserializer::from_str(r#"[{"n": 1}, {"n": 2}]"#);
        let actual = de::Deserializer::deserialize_seq(
            &mut deserializer,
            Pairs(DecodingSeed::new(&decoding)),
        )
        .unwrap();
        assert_eq!(actual, vec![1, 2]);
    }
}
