//! # gvariant-codec
//!
//! A signature-driven binary codec for the GVariant wire format: the self-describing,
//! alignment-aware serialization used by GLib/GNOME for D-Bus payloads and on-disk settings.
//!
//! ## What this crate does
//!
//! GVariant values are framed by a small set of rules — fixed alignment per type, little-endian
//! framing-offset trailers for variable-width composites, a trailing zero byte marking a present
//! `Maybe` of variable width, a backward byte scan to find a `Variant`'s embedded signature — and
//! this crate implements exactly those rules, once, behind a single [`Codec`] abstraction shared
//! by every primitive and composite type.
//!
//! ```ignore
//! use gvariant_codec::{Signature, Value};
//!
//! let sig = Signature::parse("a(si)")?;
//! let value = Value::Array(vec![
//!     Value::Tuple(vec![Value::Str("foo".into()), Value::I32(-1)]),
//! ]);
//!
//! let mut bytes = Vec::new();
//! sig.codec().encode(&value, &mut bytes);
//! assert_eq!(sig.codec().decode(&bytes)?, value);
//! # Ok::<(), gvariant_codec::Error>(())
//! ```
//!
//! ## Two ways to build a codec
//!
//! - **Dynamically**, by parsing a signature string with [`Signature::parse`] and calling
//!   [`Signature::codec`]: the resulting codec works over the dynamic [`Value`] enum and is the
//!   right choice when the shape of the data is only known at runtime.
//! - **Statically**, by composing the primitive factories and combinators in [`codec`] directly
//!   against your own Rust types (see [`codec::combinators`] for `with_byte_order`, `map`,
//!   `contramap`, and `predicate`).
//!
//! Both paths implement the same [`Codec`] trait and the same wire rules; the dynamic path simply
//! instantiates every composite codec with `T = Value`.
//!
//! ## Layout
//!
//! - [`error`] — the [`Error`] taxonomy returned by every fallible operation in this crate.
//! - [`value`] — [`Value`], the dynamically-typed tree decoded values live in, and [`Dict`].
//! - [`signature`] — the grammar parser that compiles a signature string into a codec tree.
//! - [`codec`] — the `Codec<T>` trait, primitive codecs, composite codecs (array, tuple, maybe,
//!   variant, dict), and the combinators that adapt and compose them.

pub mod codec;
pub mod error;
pub mod signature;
pub mod value;

pub use codec::Codec;
pub use error::Error;
pub use signature::Signature;
pub use value::{Dict, Value};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn boolean_round_trips_through_a_parsed_signature() {
        let sig = Signature::parse("b").unwrap();
        let mut out = Vec::new();
        sig.codec().encode(&Value::Bool(true), &mut out);
        assert_eq!(out, vec![1]);
        assert_eq!(sig.codec().decode(&out).unwrap(), Value::Bool(true));
    }

    #[test]
    fn maybe_string_round_trips_through_a_parsed_signature() {
        let sig = Signature::parse("ms").unwrap();
        let value = Value::Maybe(Some(Box::new(Value::Str("hi".into()))));
        let mut out = Vec::new();
        sig.codec().encode(&value, &mut out);
        assert_eq!(sig.codec().decode(&out).unwrap(), value);

        let none_value = Value::Maybe(None);
        let mut out = Vec::new();
        sig.codec().encode(&none_value, &mut out);
        assert!(out.is_empty());
        assert_eq!(sig.codec().decode(&out).unwrap(), none_value);
    }

    #[test]
    fn array_of_structures_round_trips_through_a_parsed_signature() {
        let sig = Signature::parse("a(si)").unwrap();
        let value = Value::Array(vec![
            Value::Tuple(vec![Value::Str("foo".into()), Value::I32(-1)]),
            Value::Tuple(vec![Value::Str("bar".into()), Value::I32(7)]),
        ]);
        let mut out = Vec::new();
        sig.codec().encode(&value, &mut out);
        assert_eq!(sig.codec().decode(&out).unwrap(), value);
    }

    #[test]
    fn dictionary_of_variants_round_trips_through_a_parsed_signature() {
        let sig = Signature::parse("a{sv}").unwrap();
        let inner_sig = Signature::parse("i").unwrap();
        let mut dict = Dict::new();
        dict.insert(
            Value::Str("count".into()),
            Value::Variant(inner_sig, Box::new(Value::I32(3))),
        );
        let value = Value::Dict(dict);
        let mut out = Vec::new();
        sig.codec().encode(&value, &mut out);
        assert_eq!(sig.codec().decode(&out).unwrap(), value);
    }

    #[test]
    fn unknown_signature_bubbles_up_as_a_parse_error() {
        let err = Signature::parse("a(").unwrap_err();
        assert!(matches!(err, Error::SignatureParseError { .. }));
    }

    #[test]
    fn public_api_surface_is_usable_without_reaching_into_submodules() {
        let codec: Arc<dyn Codec<Value> + Send + Sync> = Signature::parse("y").unwrap().codec();
        let mut out = Vec::new();
        codec.encode(&Value::U8(42), &mut out);
        assert_eq!(out, vec![42]);
    }
}
