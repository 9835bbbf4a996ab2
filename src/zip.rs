//! Combine independent decodings into a decoding of their tuple
//!
//! Each component runs against the same reader and is responsible for
//! scoping itself (usually through a key), so components never interfere.
//! Components run in argument order and the first failure aborts the whole
//! decoding.
//!
//! Only [`zip2`] touches the reader. Every higher arity is the previous arity
//! zipped with one more component and flattened with [`Decoding::map`].

use crate::Decoding;

/// Decode two values from the same reader
pub fn zip2<A, B>(a: Decoding<A>, b: Decoding<B>) -> Decoding<(A, B)>
where
    A: 'static,
    B: 'static,
{
    Decoding::new(move |reader| {
        let first = a.decode(reader)?;
        let second = b.decode(reader)?;
        Ok((first, second))
    })
}

macro_rules! zip_impl {
    ($(#[$meta:meta])* $name:ident => $prev:ident($($arg:ident: $ty:ident),+), $last:ident: $last_ty:ident) => {
        $(#[$meta])*
        #[allow(clippy::too_many_arguments)]
        pub fn $name<$($ty,)+ $last_ty>(
            $($arg: Decoding<$ty>,)+
            $last: Decoding<$last_ty>,
        ) -> Decoding<($($ty,)+ $last_ty)>
        where
            $($ty: 'static,)+
            $last_ty: 'static,
        {
            zip2($prev($($arg),+), $last).map(|(($($arg),+), $last)| ($($arg,)+ $last))
        }
    };
}

zip_impl!(
    /// Decode three values from the same reader
    zip3 => zip2(a: A, b: B), c: C
);
zip_impl!(
    /// Decode four values from the same reader
    zip4 => zip3(a: A, b: B, c: C), d: D
);
zip_impl!(
    /// Decode five values from the same reader
    zip5 => zip4(a: A, b: B, c: C, d: D), e: E
);
zip_impl!(
    /// Decode six values from the same reader
    zip6 => zip5(a: A, b: B, c: C, d: D, e: E), f: F
);
zip_impl!(
    /// Decode seven values from the same reader
    zip7 => zip6(a: A, b: B, c: C, d: D, e: E, f: F), g: G
);
zip_impl!(
    /// Decode eight values from the same reader
    zip8 => zip7(a: A, b: B, c: C, d: D, e: E, f: F, g: G), h: H
);
zip_impl!(
    /// Decode nine values from the same reader
    zip9 => zip8(a: A, b: B, c: C, d: D, e: E, f: F, g: G, h: H), i: I
);

/// Zip two to nine decodings, dispatching to the matching `zipN`
///
/// ```
/// use codings::{json, zip, Decoding};
///
/// let decoding = zip!(
///     Decoding::<u8>::key("a"),
///     Decoding::<u8>::key("b"),
///     Decoding::<u8>::key("c"),
/// );
/// assert_eq!(json::decode(br#"{"c":3,"b":2,"a":1}"#, &decoding)?, (1, 2, 3));
/// # Ok::<(), codings::Error>(())
/// ```
#[macro_export]
macro_rules! zip {
    ($a:expr, $b:expr $(,)?) => {
        $crate::zip2($a, $b)
    };
    ($a:expr, $b:expr, $c:expr $(,)?) => {
        $crate::zip3($a, $b, $c)
    };
    ($a:expr, $b:expr, $c:expr, $d:expr $(,)?) => {
        $crate::zip4($a, $b, $c, $d)
    };
    ($a:expr, $b:expr, $c:expr, $d:expr, $e:expr $(,)?) => {
        $crate::zip5($a, $b, $c, $d, $e)
    };
    ($a:expr, $b:expr, $c:expr, $d:expr, $e:expr, $f:expr $(,)?) => {
        $crate::zip6($a, $b, $c, $d, $e, $f)
    };
    ($a:expr, $b:expr, $c:expr, $d:expr, $e:expr, $f:expr, $g:expr $(,)?) => {
        $crate::zip7($a, $b, $c, $d, $e, $f, $g)
    };
    ($a:expr, $b:expr, $c:expr, $d:expr, $e:expr, $f:expr, $g:expr, $h:expr $(,)?) => {
        $crate::zip8($a, $b, $c, $d, $e, $f, $g, $h)
    };
    ($a:expr, $b:expr, $c:expr, $d:expr, $e:expr, $f:expr, $g:expr, $h:expr, $i:expr $(,)?) => {
        $crate::zip9($a, $b, $c, $d, $e, $f, $g, $h, $i)
    };
}
