//! Tuple (structure) codec (spec §4.4) and the dict-entry codec built on top of it, since a
//! dict-entry is layout-identical to a 2-tuple.

use super::offsets::{choose_offset_width, offset_size, read_offset, write_offset};
use super::{align_up, Codec, DynValueCodec};
use crate::error::{malformed, Error};
use crate::value::Value;

/// A heterogeneous, positional composite: the structure codec for `(T1 … Tn)` signatures.
/// Components are dynamic `Value` nodes (spec §9's design note: a `Tuple` of typed fields,
/// letting callers derive a named record via the value-mapping combinator instead of this crate
/// needing a reflection-based field binder).
pub struct TupleCodec {
    components: Vec<DynValueCodec>,
}

pub fn tuple(components: Vec<DynValueCodec>) -> TupleCodec {
    TupleCodec { components }
}

impl TupleCodec {
    fn component_alignment(&self) -> u8 {
        self.components
            .iter()
            .map(|c| c.alignment())
            .max()
            .unwrap_or(1)
    }
}

impl Codec<Vec<Value>> for TupleCodec {
    fn alignment(&self) -> u8 {
        if self.components.is_empty() {
            1
        } else {
            self.component_alignment()
        }
    }

    fn fixed_size(&self) -> Option<usize> {
        if self.components.is_empty() {
            return Some(1);
        }
        let mut pos = 0usize;
        for c in &self.components {
            let size = c.fixed_size()?;
            pos = align_up(pos, c.alignment());
            pos += size;
        }
        Some(align_up(pos, self.alignment()))
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<Value>, Error> {
        if self.components.is_empty() {
            if data.len() != 1 {
                return Err(malformed("unit tuple must decode from exactly one byte"));
            }
            return Ok(Vec::new());
        }

        let len = data.len();
        let width = offset_size(len);
        let n = self.components.len();
        let mut pos = 0usize;
        let mut k = 0usize;
        let mut result = Vec::with_capacity(n);

        for (i, comp) in self.components.iter().enumerate() {
            pos = align_up(pos, comp.alignment());
            let is_last = i == n - 1;
            if let Some(size) = comp.fixed_size() {
                let end = pos
                    .checked_add(size)
                    .ok_or_else(|| malformed("tuple component size overflows"))?;
                if end > len {
                    return Err(malformed("tuple component runs past end of slice"));
                }
                result.push(comp.decode(&data[pos..end])?);
                pos = end;
            } else if is_last {
                let end = len
                    .checked_sub(k * width)
                    .ok_or_else(|| malformed("tuple trailing offsets exceed slice length"))?;
                if end < pos || end > len {
                    return Err(malformed("tuple final component bounds out of range"));
                }
                result.push(comp.decode(&data[pos..end])?);
                pos = end;
            } else {
                let trailer_pos = len
                    .checked_sub((k + 1) * width)
                    .ok_or_else(|| malformed("tuple missing framing offset trailer"))?;
                let end = read_offset(data, trailer_pos, width)?;
                if end < pos || end > len {
                    return Err(malformed("tuple component framing offset out of range"));
                }
                result.push(comp.decode(&data[pos..end])?);
                pos = end;
                k += 1;
            }
        }
        Ok(result)
    }

    fn encode(&self, value: &Vec<Value>, out: &mut Vec<u8>) {
        let start = out.len();
        if self.components.is_empty() {
            out.push(0);
            return;
        }

        let n = self.components.len();
        let mut trailer_offsets = Vec::new();
        for (i, (comp, val)) in self.components.iter().zip(value.iter()).enumerate() {
            let pad_to = align_up(out.len() - start, comp.alignment());
            out.resize(start + pad_to, 0);
            comp.encode(val, out);
            let is_last = i == n - 1;
            if comp.fixed_size().is_none() && !is_last {
                trailer_offsets.push(out.len() - start);
            }
        }

        if let Some(fixed) = self.fixed_size() {
            let pad_to = align_up(out.len() - start, self.alignment());
            out.resize(start + pad_to, 0);
            debug_assert_eq!(out.len() - start, fixed);
        }

        if !trailer_offsets.is_empty() {
            let payload_len = out.len() - start;
            let width = choose_offset_width(payload_len, trailer_offsets.len())
                .expect("framing offsets representable for any practical tuple size");
            for end in trailer_offsets.iter().rev() {
                write_offset(out, *end, width);
            }
        }
    }
}

/// Dictionary-entry codec: identical wire layout to a 2-tuple over `(key, value)` (spec §4.4).
pub struct DictEntryCodec {
    inner: TupleCodec,
}

pub fn dict_entry(key: DynValueCodec, value: DynValueCodec) -> DictEntryCodec {
    DictEntryCodec {
        inner: tuple(vec![key, value]),
    }
}

impl Codec<(Value, Value)> for DictEntryCodec {
    fn alignment(&self) -> u8 {
        self.inner.alignment()
    }
    fn fixed_size(&self) -> Option<usize> {
        self.inner.fixed_size()
    }
    fn decode(&self, data: &[u8]) -> Result<(Value, Value), Error> {
        let mut fields = self.inner.decode(data)?;
        let value = fields.pop().expect("dict-entry tuple always has 2 fields");
        let key = fields.pop().expect("dict-entry tuple always has 2 fields");
        Ok((key, value))
    }
    fn encode(&self, value: &(Value, Value), out: &mut Vec<u8>) {
        self.inner
            .encode(&vec![value.0.clone(), value.1.clone()], out);
    }
}
