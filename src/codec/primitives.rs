//! Codecs for the fixed-size and string primitives (spec §4.2).
//!
//! Multi-byte codecs always read and write big-endian internally; little-endian output is
//! obtained by wrapping one in [`with_byte_order`](super::combinators::with_byte_order) rather
//! than by hand-writing a second big/little branch per type.

use super::Codec;
use crate::error::{malformed, underflow, Error};

macro_rules! fixed_width_int_codec {
    ($name:ident, $ty:ty, $align:expr) => {
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Codec<$ty> for $name {
            fn alignment(&self) -> u8 {
                $align
            }

            fn fixed_size(&self) -> Option<usize> {
                Some(std::mem::size_of::<$ty>())
            }

            fn decode(&self, data: &[u8]) -> Result<$ty, Error> {
                let size = std::mem::size_of::<$ty>();
                if data.len() < size {
                    return Err(underflow(size, data.len()));
                }
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                buf.copy_from_slice(&data[..size]);
                Ok(<$ty>::from_be_bytes(buf))
            }

            fn encode(&self, value: &$ty, out: &mut Vec<u8>) {
                out.extend_from_slice(&value.to_be_bytes());
            }
        }
    };
}

fixed_width_int_codec!(I16Codec, i16, 2);
fixed_width_int_codec!(U16Codec, u16, 2);
fixed_width_int_codec!(I32Codec, i32, 4);
fixed_width_int_codec!(U32Codec, u32, 4);
fixed_width_int_codec!(I64Codec, i64, 8);
fixed_width_int_codec!(U64Codec, u64, 8);
fixed_width_int_codec!(F64Codec, f64, 8);

#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCodec;

impl Codec<bool> for BoolCodec {
    fn alignment(&self) -> u8 {
        1
    }
    fn fixed_size(&self) -> Option<usize> {
        Some(1)
    }
    fn decode(&self, data: &[u8]) -> Result<bool, Error> {
        let byte = *data.first().ok_or_else(|| underflow(1, 0))?;
        Ok(byte != 0)
    }
    fn encode(&self, value: &bool, out: &mut Vec<u8>) {
        out.push(if *value { 1 } else { 0 });
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct U8Codec;

impl Codec<u8> for U8Codec {
    fn alignment(&self) -> u8 {
        1
    }
    fn fixed_size(&self) -> Option<usize> {
        Some(1)
    }
    fn decode(&self, data: &[u8]) -> Result<u8, Error> {
        data.first().copied().ok_or_else(|| underflow(1, 0))
    }
    fn encode(&self, value: &u8, out: &mut Vec<u8>) {
        out.push(*value);
    }
}

/// Variable-width UTF-8 string, NUL-terminated on the wire. Used for the `s`, `o`, and `g`
/// signature codes alike (spec §4.1 "canonical decoder selection for strings").
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl Codec<String> for StringCodec {
    fn alignment(&self) -> u8 {
        1
    }
    fn fixed_size(&self) -> Option<usize> {
        None
    }
    fn decode(&self, data: &[u8]) -> Result<String, Error> {
        let (&last, body) = data
            .split_last()
            .ok_or_else(|| malformed("string slice is empty, missing NUL terminator"))?;
        if last != 0 {
            return Err(malformed("string slice does not end with a NUL byte"));
        }
        std::str::from_utf8(body)
            .map(|s| s.to_string())
            .map_err(|e| malformed(format!("string bytes are not valid UTF-8: {e}")))
    }
    fn encode(&self, value: &String, out: &mut Vec<u8>) {
        out.extend_from_slice(value.as_bytes());
        out.push(0);
    }
}

pub fn bool_codec() -> BoolCodec {
    BoolCodec
}
pub fn u8_codec() -> U8Codec {
    U8Codec
}
pub fn i16_codec() -> I16Codec {
    I16Codec
}
pub fn u16_codec() -> U16Codec {
    U16Codec
}
pub fn i32_codec() -> I32Codec {
    I32Codec
}
pub fn u32_codec() -> U32Codec {
    U32Codec
}
pub fn i64_codec() -> I64Codec {
    I64Codec
}
pub fn u64_codec() -> U64Codec {
    U64Codec
}
pub fn f64_codec() -> F64Codec {
    F64Codec
}
pub fn string_codec() -> StringCodec {
    StringCodec
}
