//! Signature grammar parser (spec §4.1): compiles an ASCII type string into a tree of codecs
//! over the dynamic [`Value`], one recursive-descent invocation per type.

use crate::codec::combinators::ByteOrder;
use crate::codec::dict::dict;
use crate::codec::lift::{
    lift_bool, lift_f64, lift_i16, lift_i32, lift_i64, lift_str, lift_u16, lift_u32, lift_u64,
    lift_u8,
};
use crate::codec::tuple::{dict_entry, tuple};
use crate::codec::variant::VariantCodec;
use crate::codec::{array::array, maybe::maybe, Codec, DynValueCodec};
use crate::error::Error;
use crate::value::Value;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An immutable pair of the original signature string and the codec tree it compiles to.
///
/// Two signatures are equal iff their strings are equal (spec §3).
#[derive(Clone)]
pub struct Signature {
    text: String,
    codec: DynValueCodec,
}

impl Signature {
    /// Parse a complete signature string, e.g. `"a(si)"`.
    pub fn parse(input: &str) -> Result<Signature, Error> {
        if !input.is_ascii() {
            return Err(Error::SignatureParseError {
                message: "signature must be ASCII".into(),
                position: 0,
            });
        }
        let bytes = input.as_bytes();
        let mut pos = 0usize;
        let codec = parse_one(bytes, &mut pos)?;
        if pos != bytes.len() {
            return Err(Error::SignatureParseError {
                message: "trailing characters after a complete signature".into(),
                position: pos,
            });
        }
        Ok(Signature {
            text: input.to_string(),
            codec,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// An untyped codec over the dynamic [`Value`] (spec §6 "Signature API").
    pub fn codec(&self) -> DynValueCodec {
        Arc::clone(&self.codec)
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signature").field("text", &self.text).finish()
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}
impl Eq for Signature {}

impl Hash for Signature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

fn expect(bytes: &[u8], pos: &mut usize, expected: u8) -> Result<(), Error> {
    match bytes.get(*pos) {
        Some(&b) if b == expected => {
            *pos += 1;
            Ok(())
        }
        Some(&b) => Err(Error::SignatureParseError {
            message: format!("expected '{}', found '{}'", expected as char, b as char),
            position: *pos,
        }),
        None => Err(Error::SignatureParseError {
            message: format!("expected '{}', found end of signature", expected as char),
            position: *pos,
        }),
    }
}

fn parse_one(bytes: &[u8], pos: &mut usize) -> Result<DynValueCodec, Error> {
    let b = *bytes.get(*pos).ok_or_else(|| Error::SignatureParseError {
        message: "unexpected end of signature".into(),
        position: *pos,
    })?;
    *pos += 1;

    let codec: DynValueCodec = match b {
        b'b' => Arc::new(lift_bool()),
        b'y' => Arc::new(lift_u8()),
        b'n' => Arc::new(lift_i16(ByteOrder::Little)),
        b'q' => Arc::new(lift_u16(ByteOrder::Little)),
        b'i' => Arc::new(lift_i32(ByteOrder::Little)),
        b'u' => Arc::new(lift_u32(ByteOrder::Little)),
        b'x' => Arc::new(lift_i64(ByteOrder::Little)),
        b't' => Arc::new(lift_u64(ByteOrder::Little)),
        b'd' => Arc::new(lift_f64(ByteOrder::Little)),
        b's' | b'o' | b'g' => Arc::new(lift_str()),
        b'v' => Arc::new(VariantCodec),
        b'm' => {
            let inner = parse_one(bytes, pos)?;
            Arc::new(LiftMaybe(maybe(OptionAdapter(inner))))
        }
        b'a' => {
            if bytes.get(*pos) == Some(&b'{') {
                *pos += 1;
                let key = parse_one(bytes, pos)?;
                let value = parse_one(bytes, pos)?;
                expect(bytes, pos, b'}')?;
                Arc::new(LiftDict(dict(key, value)))
            } else {
                let elem = parse_one(bytes, pos)?;
                Arc::new(LiftArray(array(elem)))
            }
        }
        b'(' => {
            let mut components = Vec::new();
            while bytes.get(*pos) != Some(&b')') {
                if *pos >= bytes.len() {
                    return Err(Error::SignatureParseError {
                        message: "unterminated tuple signature, expected ')'".into(),
                        position: *pos,
                    });
                }
                components.push(parse_one(bytes, pos)?);
            }
            *pos += 1;
            Arc::new(LiftTuple(tuple(components)))
        }
        b'{' => {
            let key = parse_one(bytes, pos)?;
            let value = parse_one(bytes, pos)?;
            expect(bytes, pos, b'}')?;
            Arc::new(LiftDictEntry(dict_entry(key, value)))
        }
        other => {
            return Err(Error::SignatureParseError {
                message: format!("unknown type code '{}'", other as char),
                position: *pos - 1,
            })
        }
    };
    Ok(codec)
}

/// `Codec<Value>` for `Value` itself, via a thin adapter so composite codecs generic over an
/// element/component type `T` can be instantiated with `T = Value` and still be lifted into the
/// dynamic tree without naming a concrete element type at each call site.
struct OptionAdapter(DynValueCodec);
impl Codec<Value> for OptionAdapter {
    fn alignment(&self) -> u8 {
        self.0.alignment()
    }
    fn fixed_size(&self) -> Option<usize> {
        self.0.fixed_size()
    }
    fn decode(&self, data: &[u8]) -> Result<Value, Error> {
        self.0.decode(data)
    }
    fn encode(&self, value: &Value, out: &mut Vec<u8>) {
        self.0.encode(value, out)
    }
}

struct LiftMaybe(crate::codec::maybe::MaybeCodec<Value, OptionAdapter>);
impl Codec<Value> for LiftMaybe {
    fn alignment(&self) -> u8 {
        self.0.alignment()
    }
    fn fixed_size(&self) -> Option<usize> {
        self.0.fixed_size()
    }
    fn decode(&self, data: &[u8]) -> Result<Value, Error> {
        let opt = self.0.decode(data)?;
        Ok(Value::Maybe(opt.map(Box::new)))
    }
    fn encode(&self, value: &Value, out: &mut Vec<u8>) {
        match value {
            Value::Maybe(opt) => self.0.encode(&opt.as_deref().cloned(), out),
            other => panic!("codec for Maybe invoked with a {:?} value", other),
        }
    }
}

struct LiftArray(crate::codec::array::ArrayCodec<Value, DynValueCodec>);
impl Codec<Value> for LiftArray {
    fn alignment(&self) -> u8 {
        self.0.alignment()
    }
    fn fixed_size(&self) -> Option<usize> {
        self.0.fixed_size()
    }
    fn decode(&self, data: &[u8]) -> Result<Value, Error> {
        Ok(Value::Array(self.0.decode(data)?))
    }
    fn encode(&self, value: &Value, out: &mut Vec<u8>) {
        match value {
            Value::Array(items) => self.0.encode(items, out),
            other => panic!("codec for Array invoked with a {:?} value", other),
        }
    }
}

struct LiftTuple(crate::codec::tuple::TupleCodec);
impl Codec<Value> for LiftTuple {
    fn alignment(&self) -> u8 {
        self.0.alignment()
    }
    fn fixed_size(&self) -> Option<usize> {
        self.0.fixed_size()
    }
    fn decode(&self, data: &[u8]) -> Result<Value, Error> {
        Ok(Value::Tuple(self.0.decode(data)?))
    }
    fn encode(&self, value: &Value, out: &mut Vec<u8>) {
        match value {
            Value::Tuple(fields) => self.0.encode(fields, out),
            other => panic!("codec for Tuple invoked with a {:?} value", other),
        }
    }
}

struct LiftDictEntry(crate::codec::tuple::DictEntryCodec);
impl Codec<Value> for LiftDictEntry {
    fn alignment(&self) -> u8 {
        self.0.alignment()
    }
    fn fixed_size(&self) -> Option<usize> {
        self.0.fixed_size()
    }
    fn decode(&self, data: &[u8]) -> Result<Value, Error> {
        let (k, v) = self.0.decode(data)?;
        Ok(Value::DictEntry(Box::new(k), Box::new(v)))
    }
    fn encode(&self, value: &Value, out: &mut Vec<u8>) {
        match value {
            Value::DictEntry(k, v) => self.0.encode(&((**k).clone(), (**v).clone()), out),
            other => panic!("codec for DictEntry invoked with a {:?} value", other),
        }
    }
}

struct LiftDict(crate::codec::dict::DictCodec);
impl Codec<Value> for LiftDict {
    fn alignment(&self) -> u8 {
        self.0.alignment()
    }
    fn fixed_size(&self) -> Option<usize> {
        self.0.fixed_size()
    }
    fn decode(&self, data: &[u8]) -> Result<Value, Error> {
        Ok(Value::Dict(self.0.decode(data)?))
    }
    fn encode(&self, value: &Value, out: &mut Vec<u8>) {
        match value {
            Value::Dict(d) => self.0.encode(d, out),
            other => panic!("codec for Dict invoked with a {:?} value", other),
        }
    }
}
