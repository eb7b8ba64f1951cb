//! Codec combinators (spec §4.8): byte-order override, value mapping, buffer contramapping, and
//! predicate-based branching.

use super::Codec;
use crate::error::Error;
use std::marker::PhantomData;

/// Which byte order a [`WithByteOrder`]-wrapped codec should use on the wire. Every primitive
/// numeric codec in this crate reads/writes big-endian internally, so `Big` is a pass-through
/// and `Little` reverses the encoded byte window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

/// Wraps a fixed-size codec, forcing a given [`ByteOrder`] on the read/write side. Does not
/// affect framing offsets, which the format always keeps little-endian regardless of this
/// override; alignment and fixed size are unchanged.
pub struct WithByteOrder<T, C: Codec<T>> {
    inner: C,
    order: ByteOrder,
    _t: PhantomData<T>,
}

pub fn with_byte_order<T, C: Codec<T>>(inner: C, order: ByteOrder) -> WithByteOrder<T, C> {
    WithByteOrder {
        inner,
        order,
        _t: PhantomData,
    }
}

impl<T, C: Codec<T>> Codec<T> for WithByteOrder<T, C> {
    fn alignment(&self) -> u8 {
        self.inner.alignment()
    }
    fn fixed_size(&self) -> Option<usize> {
        self.inner.fixed_size()
    }
    fn decode(&self, data: &[u8]) -> Result<T, Error> {
        match self.order {
            ByteOrder::Big => self.inner.decode(data),
            ByteOrder::Little => {
                let size = self.inner.fixed_size().unwrap_or(data.len());
                let size = size.min(data.len());
                let mut swapped: Vec<u8> = data[..size].to_vec();
                swapped.reverse();
                swapped.extend_from_slice(&data[size..]);
                self.inner.decode(&swapped)
            }
        }
    }
    fn encode(&self, value: &T, out: &mut Vec<u8>) {
        match self.order {
            ByteOrder::Big => self.inner.encode(value, out),
            ByteOrder::Little => {
                let mut tmp = Vec::new();
                self.inner.encode(value, &mut tmp);
                tmp.reverse();
                out.extend_from_slice(&tmp);
            }
        }
    }
}

/// Given `decode_map: T -> U` and `encode_map: &U -> T`, lifts a `Codec<T>` into a `Codec<U>`
/// that post-processes decoded values and pre-processes values before encoding. Alignment and
/// fixed size are inherited unchanged from the wrapped codec.
pub struct Map<T, U, C, F, G>
where
    C: Codec<T>,
    F: Fn(T) -> U,
    G: Fn(&U) -> T,
{
    inner: C,
    decode_map: F,
    encode_map: G,
    _t: PhantomData<(T, U)>,
}

pub fn map<T, U, C, F, G>(inner: C, decode_map: F, encode_map: G) -> Map<T, U, C, F, G>
where
    C: Codec<T>,
    F: Fn(T) -> U,
    G: Fn(&U) -> T,
{
    Map {
        inner,
        decode_map,
        encode_map,
        _t: PhantomData,
    }
}

impl<T, U, C, F, G> Codec<U> for Map<T, U, C, F, G>
where
    C: Codec<T>,
    F: Fn(T) -> U,
    G: Fn(&U) -> T,
{
    fn alignment(&self) -> u8 {
        self.inner.alignment()
    }
    fn fixed_size(&self) -> Option<usize> {
        self.inner.fixed_size()
    }
    fn decode(&self, data: &[u8]) -> Result<U, Error> {
        self.inner.decode(data).map(&self.decode_map)
    }
    fn encode(&self, value: &U, out: &mut Vec<u8>) {
        let t = (self.encode_map)(value);
        self.inner.encode(&t, out);
    }
}

/// Wraps a codec behind a pair of reversible transforms on the raw byte slice: `decode_transform`
/// runs on the input slice before the inner codec sees it; `encode_transform` runs on the inner
/// codec's output before it is appended. Alignment and fixed size are inherited.
pub struct Contramap<T, C, F, G>
where
    C: Codec<T>,
    F: Fn(&[u8]) -> Vec<u8>,
    G: Fn(&[u8]) -> Vec<u8>,
{
    inner: C,
    decode_transform: F,
    encode_transform: G,
    _t: PhantomData<T>,
}

pub fn contramap<T, C, F, G>(
    inner: C,
    decode_transform: F,
    encode_transform: G,
) -> Contramap<T, C, F, G>
where
    C: Codec<T>,
    F: Fn(&[u8]) -> Vec<u8>,
    G: Fn(&[u8]) -> Vec<u8>,
{
    Contramap {
        inner,
        decode_transform,
        encode_transform,
        _t: PhantomData,
    }
}

impl<T, C, F, G> Codec<T> for Contramap<T, C, F, G>
where
    C: Codec<T>,
    F: Fn(&[u8]) -> Vec<u8>,
    G: Fn(&[u8]) -> Vec<u8>,
{
    fn alignment(&self) -> u8 {
        self.inner.alignment()
    }
    fn fixed_size(&self) -> Option<usize> {
        self.inner.fixed_size()
    }
    fn decode(&self, data: &[u8]) -> Result<T, Error> {
        let transformed = (self.decode_transform)(data);
        self.inner.decode(&transformed)
    }
    fn encode(&self, value: &T, out: &mut Vec<u8>) {
        let mut tmp = Vec::new();
        self.inner.encode(value, &mut tmp);
        out.extend_from_slice(&(self.encode_transform)(&tmp));
    }
}

/// Which branch a [`Predicate`] codec resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Then,
    Else,
}

/// Dispatches to one of two branch codecs. Decode-side selection runs `predicate` against the
/// raw input slice; encode-side selection runs `select_for_encode` against the value itself,
/// since the decode-time predicate has no principled inverse given only a value (spec §9 open
/// question — resolved here by requiring the caller to supply that inverse explicitly instead
/// of always encoding through a fixed branch).
pub struct Predicate<T, A, B, P, S>
where
    A: Codec<T>,
    B: Codec<T>,
    P: Fn(&[u8]) -> bool,
    S: Fn(&T) -> Branch,
{
    predicate: P,
    select_for_encode: S,
    then_branch: A,
    else_branch: B,
    _t: PhantomData<T>,
}

pub fn predicate<T, A, B, P, S>(
    predicate: P,
    select_for_encode: S,
    then_branch: A,
    else_branch: B,
) -> Result<Predicate<T, A, B, P, S>, Error>
where
    A: Codec<T>,
    B: Codec<T>,
    P: Fn(&[u8]) -> bool,
    S: Fn(&T) -> Branch,
{
    if then_branch.alignment() != else_branch.alignment() {
        return Err(Error::UsageError {
            message: "predicate branches must agree on alignment".into(),
        });
    }
    if then_branch.fixed_size() != else_branch.fixed_size() {
        return Err(Error::UsageError {
            message: "predicate branches must agree on fixed_size".into(),
        });
    }
    Ok(Predicate {
        predicate,
        select_for_encode,
        then_branch,
        else_branch,
        _t: PhantomData,
    })
}

impl<T, A, B, P, S> Codec<T> for Predicate<T, A, B, P, S>
where
    A: Codec<T>,
    B: Codec<T>,
    P: Fn(&[u8]) -> bool,
    S: Fn(&T) -> Branch,
{
    fn alignment(&self) -> u8 {
        self.then_branch.alignment()
    }
    fn fixed_size(&self) -> Option<usize> {
        self.then_branch.fixed_size()
    }
    fn decode(&self, data: &[u8]) -> Result<T, Error> {
        if (self.predicate)(data) {
            self.then_branch.decode(data)
        } else {
            self.else_branch.decode(data)
        }
    }
    fn encode(&self, value: &T, out: &mut Vec<u8>) {
        match (self.select_for_encode)(value) {
            Branch::Then => self.then_branch.encode(value, out),
            Branch::Else => self.else_branch.encode(value, out),
        }
    }
}
