//! Lifts each concrete primitive `Codec<T>` into a `Codec<Value>` node, so the
//! signature-compiled tree (which always works in terms of the dynamic [`Value`]) and the
//! strongly-typed primitive codecs share one implementation of every wire rule.
//!
//! Encoding a `Value` through the wrong lift (e.g. feeding `Value::Bool` through the lifted `i32`
//! codec) is a caller programming error rather than a data error, and panics — mirroring how the
//! teacher codebase's own constructors panic on invariant violations instead of threading an
//! error through a path that should never see one in correct use.

use super::combinators::{with_byte_order, ByteOrder, WithByteOrder};
use super::primitives::{
    BoolCodec, F64Codec, I16Codec, I32Codec, I64Codec, StringCodec, U16Codec, U32Codec, U64Codec,
    U8Codec,
};
use super::Codec;
use crate::error::Error;
use crate::value::Value;

macro_rules! lift_primitive {
    ($name:ident, $codec:ty, $variant:ident) => {
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name(pub $codec);

        impl Codec<Value> for $name {
            fn alignment(&self) -> u8 {
                self.0.alignment()
            }
            fn fixed_size(&self) -> Option<usize> {
                self.0.fixed_size()
            }
            fn decode(&self, data: &[u8]) -> Result<Value, Error> {
                Ok(Value::$variant(self.0.decode(data)?))
            }
            fn encode(&self, value: &Value, out: &mut Vec<u8>) {
                match value {
                    Value::$variant(v) => self.0.encode(v, out),
                    other => panic!(
                        "codec for {} invoked with a {:?} value",
                        stringify!($variant),
                        other
                    ),
                }
            }
        }
    };
}

lift_primitive!(LiftBool, BoolCodec, Bool);
lift_primitive!(LiftU8, U8Codec, U8);
lift_primitive!(LiftStr, StringCodec, Str);

/// A byte-order-wrapped primitive plus the wrap/unwrap pair that adapts it onto `Value`, folded
/// into a single node so signature parsing needs one constructor per multi-byte primitive rather
/// than a distinct named type per (type, order) combination.
pub struct OrderedLift<T, C: Codec<T>> {
    inner: WithByteOrder<T, C>,
    wrap: fn(T) -> Value,
    unwrap: fn(&Value) -> T,
}

impl<T, C: Codec<T>> Codec<Value> for OrderedLift<T, C> {
    fn alignment(&self) -> u8 {
        self.inner.alignment()
    }
    fn fixed_size(&self) -> Option<usize> {
        self.inner.fixed_size()
    }
    fn decode(&self, data: &[u8]) -> Result<Value, Error> {
        Ok((self.wrap)(self.inner.decode(data)?))
    }
    fn encode(&self, value: &Value, out: &mut Vec<u8>) {
        let t = (self.unwrap)(value);
        self.inner.encode(&t, out);
    }
}

macro_rules! lift_ordered_primitive {
    ($fn_name:ident, $codec:ty, $variant:ident, $ty:ty) => {
        pub fn $fn_name(order: ByteOrder) -> OrderedLift<$ty, $codec> {
            OrderedLift {
                inner: with_byte_order(<$codec>::default(), order),
                wrap: Value::$variant,
                unwrap: |v: &Value| match v {
                    Value::$variant(x) => *x,
                    other => panic!(
                        "codec for {} invoked with a {:?} value",
                        stringify!($variant),
                        other
                    ),
                },
            }
        }
    };
}

lift_ordered_primitive!(lift_i16, I16Codec, I16, i16);
lift_ordered_primitive!(lift_u16, U16Codec, U16, u16);
lift_ordered_primitive!(lift_i32, I32Codec, I32, i32);
lift_ordered_primitive!(lift_u32, U32Codec, U32, u32);
lift_ordered_primitive!(lift_i64, I64Codec, I64, i64);
lift_ordered_primitive!(lift_u64, U64Codec, U64, u64);
lift_ordered_primitive!(lift_f64, F64Codec, F64, f64);

pub fn lift_bool() -> LiftBool {
    LiftBool(BoolCodec)
}

pub fn lift_u8() -> LiftU8 {
    LiftU8(U8Codec)
}

pub fn lift_str() -> LiftStr {
    LiftStr(StringCodec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lift_i32_round_trips_through_value() {
        let codec = lift_i32(ByteOrder::Big);
        let mut out = Vec::new();
        codec.encode(&Value::I32(-1), &mut out);
        assert_eq!(out, vec![0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(codec.decode(&out).unwrap(), Value::I32(-1));
    }

    #[test]
    #[should_panic(expected = "invoked with a Bool")]
    fn lift_i32_panics_on_mismatched_value() {
        let codec = lift_i32(ByteOrder::Big);
        let mut out = Vec::new();
        codec.encode(&Value::Bool(true), &mut out);
    }
}
