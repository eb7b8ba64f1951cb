//! End-to-end scenarios driven entirely through parsed signature strings, exercising the full
//! path from grammar text to compiled codec tree to wire bytes and back.

use gvariant_codec::{Dict, Signature, Value};

#[test]
fn string_hello_world() {
    let sig = Signature::parse("s").unwrap();
    let value = Value::Str("hello world".to_string());
    let mut out = Vec::new();
    sig.codec().encode(&value, &mut out);
    assert_eq!(
        out,
        vec![
            0x68, 0x65, 0x6C, 0x6C, 0x6F, 0x20, 0x77, 0x6F, 0x72, 0x6C, 0x64, 0x00
        ]
    );
    assert_eq!(sig.codec().decode(&out).unwrap(), value);
}

#[test]
fn maybe_string_some() {
    let sig = Signature::parse("ms").unwrap();
    let value = Value::Maybe(Some(Box::new(Value::Str("hello world".to_string()))));
    let mut out = Vec::new();
    sig.codec().encode(&value, &mut out);
    let mut expected = b"hello world\0".to_vec();
    expected.push(0);
    assert_eq!(out, expected);
    assert_eq!(sig.codec().decode(&out).unwrap(), value);
}

#[test]
fn array_of_bool() {
    let sig = Signature::parse("ab").unwrap();
    let value = Value::Array(vec![
        Value::Bool(true),
        Value::Bool(false),
        Value::Bool(false),
        Value::Bool(true),
        Value::Bool(true),
    ]);
    let mut out = Vec::new();
    sig.codec().encode(&value, &mut out);
    assert_eq!(out, vec![1, 0, 0, 1, 1]);
    assert_eq!(sig.codec().decode(&out).unwrap(), value);
}

#[test]
fn structure_string_and_i32() {
    let sig = Signature::parse("(si)").unwrap();
    let value = Value::Tuple(vec![Value::Str("foo".to_string()), Value::I32(-1)]);
    let mut out = Vec::new();
    sig.codec().encode(&value, &mut out);
    assert_eq!(
        out,
        vec![0x66, 0x6F, 0x6F, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x04]
    );
    assert_eq!(sig.codec().decode(&out).unwrap(), value);
}

#[test]
fn array_of_variable_width_structures() {
    let sig = Signature::parse("a(si)").unwrap();
    let value = Value::Array(vec![
        Value::Tuple(vec![Value::Str("hi".to_string()), Value::I32(-2)]),
        Value::Tuple(vec![Value::Str("bye".to_string()), Value::I32(-1)]),
    ]);
    let mut out = Vec::new();
    sig.codec().encode(&value, &mut out);
    assert_eq!(out.len(), 23);
    assert_eq!(&out[20..23], &[4, 9, 21]);
    assert_eq!(sig.codec().decode(&out).unwrap(), value);
}

#[test]
fn padded_primitives_structure() {
    let sig = Signature::parse("(nxd)").unwrap();
    let value = Value::Tuple(vec![Value::I16(1), Value::I64(2), Value::F64(3.25)]);
    let mut out = Vec::new();
    sig.codec().encode(&value, &mut out);
    assert_eq!(out.len(), 24);
    assert_eq!(&out[8..16], &2i64.to_le_bytes());
    assert_eq!(&out[16..24], &3.25f64.to_le_bytes());
    assert_eq!(sig.codec().decode(&out).unwrap(), value);
}

#[test]
fn trivial_structure_is_one_zero_byte() {
    let sig = Signature::parse("()").unwrap();
    let value = Value::Tuple(vec![]);
    let mut out = Vec::new();
    sig.codec().encode(&value, &mut out);
    assert_eq!(out, vec![0]);
    assert_eq!(sig.codec().decode(&out).unwrap(), value);
}

#[test]
fn variant_carrying_an_i32() {
    let inner_sig = Signature::parse("i").unwrap();
    let value = Value::Variant(inner_sig, Box::new(Value::I32(9)));
    let sig = Signature::parse("v").unwrap();
    let mut out = Vec::new();
    sig.codec().encode(&value, &mut out);
    assert!(out.ends_with(b"\0i"));
    assert_eq!(sig.codec().decode(&out).unwrap(), value);
}

#[test]
fn variant_with_invalid_signature_tail_is_malformed() {
    let sig = Signature::parse("v").unwrap();
    assert!(sig.codec().decode(&[0, 0, b'.']).is_err());
}

#[test]
fn variant_missing_separator_is_malformed() {
    let sig = Signature::parse("v").unwrap();
    assert!(sig.codec().decode(&[1]).is_err());
}

#[test]
fn dictionary_of_string_to_variant() {
    let sig = Signature::parse("a{sv}").unwrap();
    let inner_sig = Signature::parse("u").unwrap();
    let mut dict = Dict::new();
    dict.insert(
        Value::Str("iso_speed".into()),
        Value::Variant(inner_sig, Box::new(Value::U32(1600))),
    );
    let value = Value::Dict(dict);
    let mut out = Vec::new();
    sig.codec().encode(&value, &mut out);
    assert_eq!(sig.codec().decode(&out).unwrap(), value);
}

#[test]
fn signature_strings_round_trip_through_parsing() {
    for s in [
        "b", "y", "n", "q", "i", "u", "x", "t", "d", "s", "o", "g", "v", "mi", "ab", "a(si)",
        "a{sv}", "(nxd)", "()", "{si}",
    ] {
        assert_eq!(Signature::parse(s).unwrap().as_str(), s);
    }
}
