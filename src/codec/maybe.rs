//! Maybe codec (spec §4.6): an optional value, `m T`.

use super::Codec;
use crate::error::{malformed, Error};
use std::marker::PhantomData;

pub struct MaybeCodec<T, C: Codec<T>> {
    inner: C,
    _t: PhantomData<T>,
}

pub fn maybe<T, C: Codec<T>>(inner: C) -> MaybeCodec<T, C> {
    MaybeCodec {
        inner,
        _t: PhantomData,
    }
}

impl<T, C: Codec<T>> Codec<Option<T>> for MaybeCodec<T, C> {
    fn alignment(&self) -> u8 {
        self.inner.alignment()
    }

    fn fixed_size(&self) -> Option<usize> {
        None
    }

    fn decode(&self, data: &[u8]) -> Result<Option<T>, Error> {
        if data.is_empty() {
            return Ok(None);
        }
        if self.inner.fixed_size().is_some() {
            Ok(Some(self.inner.decode(data)?))
        } else {
            let (&last, body) = data
                .split_last()
                .ok_or_else(|| malformed("present maybe of variable-width inner is empty"))?;
            if last != 0 {
                return Err(malformed(
                    "present maybe of variable-width inner is missing its trailing zero marker",
                ));
            }
            Ok(Some(self.inner.decode(body)?))
        }
    }

    fn encode(&self, value: &Option<T>, out: &mut Vec<u8>) {
        if let Some(inner) = value {
            self.inner.encode(inner, out);
            if self.inner.fixed_size().is_none() {
                out.push(0);
            }
        }
    }
}
