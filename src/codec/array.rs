//! Array codec (spec §4.3): a sequence of same-typed elements, framed by a little-endian offset
//! trailer when the element type is variable-width.

use super::offsets::{choose_offset_width, offset_size, read_offset, write_offset};
use super::{align_up, Codec};
use crate::error::{malformed, Error};
use std::marker::PhantomData;

pub struct ArrayCodec<T, C: Codec<T>> {
    element: C,
    _t: PhantomData<T>,
}

pub fn array<T, C: Codec<T>>(element: C) -> ArrayCodec<T, C> {
    ArrayCodec {
        element,
        _t: PhantomData,
    }
}

impl<T, C: Codec<T>> Codec<Vec<T>> for ArrayCodec<T, C> {
    fn alignment(&self) -> u8 {
        self.element.alignment()
    }

    fn fixed_size(&self) -> Option<usize> {
        None
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<T>, Error> {
        match self.element.fixed_size() {
            Some(size) => {
                if size == 0 || data.len() % size != 0 {
                    return Err(malformed(format!(
                        "array slice of length {} is not a multiple of element size {}",
                        data.len(),
                        size
                    )));
                }
                data.chunks(size).map(|chunk| self.element.decode(chunk)).collect()
            }
            None => {
                if data.is_empty() {
                    return Ok(Vec::new());
                }
                let width = offset_size(data.len());
                let last_off = read_offset(data, data.len() - width, width)?;
                if last_off > data.len() {
                    return Err(malformed("array's last framing offset runs past slice end"));
                }
                let count = (data.len() - last_off) / width;
                let align = self.element.alignment();
                let mut elements = Vec::with_capacity(count);
                let mut start = 0usize;
                for i in 0..count {
                    let trailer_pos = data.len() - (i + 1) * width;
                    let end = read_offset(data, trailer_pos, width)?;
                    if end < start || end > data.len() {
                        return Err(malformed("array element framing offset out of range"));
                    }
                    elements.push(self.element.decode(&data[start..end])?);
                    start = align_up(end, align);
                }
                Ok(elements)
            }
        }
    }

    fn encode(&self, value: &Vec<T>, out: &mut Vec<u8>) {
        let start = out.len();
        match self.element.fixed_size() {
            Some(_) => {
                for item in value {
                    self.element.encode(item, out);
                }
            }
            None => {
                let align = self.element.alignment();
                let mut ends = Vec::with_capacity(value.len());
                for item in value {
                    let pad_to = align_up(out.len() - start, align);
                    out.resize(start + pad_to, 0);
                    self.element.encode(item, out);
                    ends.push(out.len() - start);
                }
                let payload_len = out.len() - start;
                let width = choose_offset_width(payload_len, value.len())
                    .expect("framing offsets representable for any practical array size");
                if width > 0 {
                    for end in &ends {
                        write_offset(out, *end, width);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::primitives::{BoolCodec, StringCodec};

    #[test]
    fn bool_array_round_trips_with_no_trailer() {
        let codec = array(BoolCodec);
        let value = vec![true, false, false, true, true];
        let mut out = Vec::new();
        codec.encode(&value, &mut out);
        assert_eq!(out, vec![1, 0, 0, 1, 1]);
        assert_eq!(codec.decode(&out).unwrap(), value);
    }

    #[test]
    fn empty_variable_width_array_decodes_to_empty() {
        let codec = array(StringCodec);
        assert_eq!(codec.decode(&[]).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn string_array_round_trips_with_trailer() {
        let codec = array(StringCodec);
        let value = vec!["a".to_string(), "bb".to_string()];
        let mut out = Vec::new();
        codec.encode(&value, &mut out);
        assert_eq!(codec.decode(&out).unwrap(), value);
    }
}
