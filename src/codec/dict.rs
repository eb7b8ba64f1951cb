//! Dictionary codec (spec §4.5): an array of dict-entries, decoded into an order-preserving,
//! duplicate-free [`Dict`].

use super::array::{array, ArrayCodec};
use super::tuple::DictEntryCodec;
use super::{Codec, DynValueCodec};
use crate::error::{malformed, Error};
use crate::value::{Dict, Value};

pub struct DictCodec {
    entries: ArrayCodec<(Value, Value), DictEntryCodec>,
}

pub fn dict(key: DynValueCodec, value: DynValueCodec) -> DictCodec {
    DictCodec {
        entries: array(super::tuple::dict_entry(key, value)),
    }
}

impl Codec<Dict> for DictCodec {
    fn alignment(&self) -> u8 {
        self.entries.alignment()
    }

    fn fixed_size(&self) -> Option<usize> {
        self.entries.fixed_size()
    }

    fn decode(&self, data: &[u8]) -> Result<Dict, Error> {
        let entries = self.entries.decode(data)?;
        for i in 0..entries.len() {
            for j in (i + 1)..entries.len() {
                if entries[i].0 == entries[j].0 {
                    return Err(malformed("dictionary contains a duplicate key"));
                }
            }
        }
        Ok(Dict::from_entries(entries))
    }

    fn encode(&self, value: &Dict, out: &mut Vec<u8>) {
        self.entries.encode(&value.entries().to_vec(), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::lift::{lift_i32, lift_str};
    use crate::codec::combinators::ByteOrder;
    use std::sync::Arc;

    #[test]
    fn dict_round_trips_preserving_order() {
        let codec = dict(Arc::new(lift_str()), Arc::new(lift_i32(ByteOrder::Little)));
        let mut value = Dict::new();
        value.insert(Value::Str("b".into()), Value::I32(2));
        value.insert(Value::Str("a".into()), Value::I32(1));
        let mut out = Vec::new();
        codec.encode(&value, &mut out);
        assert_eq!(codec.decode(&out).unwrap(), value);
    }

    #[test]
    fn dict_decode_rejects_duplicate_keys() {
        let key = Arc::new(lift_str());
        let val = Arc::new(lift_i32(ByteOrder::Little));
        let entry_codec = super::super::tuple::dict_entry(key.clone(), val.clone());
        let entries_codec = array(entry_codec);
        let mut raw = Vec::new();
        entries_codec.encode(
            &vec![
                (Value::Str("x".into()), Value::I32(1)),
                (Value::Str("x".into()), Value::I32(2)),
            ],
            &mut raw,
        );
        let codec = dict(key, val);
        assert!(codec.decode(&raw).is_err());
    }
}
