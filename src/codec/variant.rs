//! Variant codec (spec §4.7): a dynamically-typed container pairing a signature with a value.

use super::Codec;
use crate::error::{malformed, Error};
use crate::signature::Signature;
use crate::value::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct VariantCodec;

impl Codec<Value> for VariantCodec {
    fn alignment(&self) -> u8 {
        8
    }

    fn fixed_size(&self) -> Option<usize> {
        None
    }

    fn decode(&self, data: &[u8]) -> Result<Value, Error> {
        // The signature grammar never contains a zero byte, but the payload may, so the scan for
        // the separator must start from the slice end (spec §4.7 / §9 "backward-scan").
        let sep = data
            .iter()
            .rposition(|&b| b == 0)
            .ok_or_else(|| malformed("variant is missing its signature separator"))?;
        let signature_bytes = &data[sep + 1..];
        let signature_str = std::str::from_utf8(signature_bytes)
            .map_err(|e| malformed(format!("variant signature tail is not valid UTF-8: {e}")))?;
        let signature = Signature::parse(signature_str)?;
        let payload = &data[..sep];
        let value = signature.codec().decode(payload)?;
        Ok(Value::Variant(signature, Box::new(value)))
    }

    fn encode(&self, value: &Value, out: &mut Vec<u8>) {
        match value {
            Value::Variant(signature, inner) => {
                signature.codec().encode(inner, out);
                out.push(0);
                out.extend_from_slice(signature.as_str().as_bytes());
            }
            other => panic!("VariantCodec invoked with a {:?} value", other),
        }
    }
}
