use super::Value;
use super::decode::parse;
use super::encode::*;
use alloc::{collections::BTreeMap, string::String, vec, vec::Vec};
use hex_literal::hex;

fn encode_chunks<T: ToCbor + ?Sized>(encoder: &mut Encoder, value: &T) -> Vec<Vec<u8>> {
    let mut chunks = Vec::new();
    encoder
        .encode(value, |chunk| chunks.push(chunk.to_vec()))
        .unwrap();
    chunks
}

#[test]
fn integer_tests() {
    assert_eq!(emit(&0).unwrap(), hex!("00"));
    assert_eq!(emit(&23).unwrap(), hex!("17"));
    assert_eq!(emit(&0x22).unwrap(), hex!("1822"));
    assert_eq!(emit(&0xFF).unwrap(), hex!("18ff"));
    assert_eq!(emit(&0x100).unwrap(), hex!("190100"));
    assert_eq!(emit(&0x1122).unwrap(), hex!("191122"));
    assert_eq!(emit(&0x10000).unwrap(), hex!("1a00010000"));
    assert_eq!(emit(&0x11223344).unwrap(), hex!("1a11223344"));
    assert_eq!(emit(&u32::MAX).unwrap(), hex!("1affffffff"));

    assert_eq!(emit(&-1).unwrap(), hex!("20"));
    assert_eq!(emit(&-0x23).unwrap(), hex!("3822"));
    assert_eq!(emit(&-0x1123).unwrap(), hex!("391122"));
    assert_eq!(emit(&-0x11223345).unwrap(), hex!("3a11223344"));
    assert_eq!(emit(&-0x100000000i64).unwrap(), hex!("3affffffff"));

    assert_eq!(
        emit(&0x100000000u64),
        Err(Error::UnsupportedArgument(0x100000000))
    );
    assert_eq!(
        emit(&-0x100000001i64),
        Err(Error::UnsupportedArgument(0x100000000))
    );
    assert_eq!(
        emit(&i64::MIN),
        Err(Error::UnsupportedArgument(i64::MAX as u64))
    );
    assert_eq!(
        emit(&Value::UnsignedInteger(u64::MAX)),
        Err(Error::UnsupportedArgument(u64::MAX))
    );
}

#[test]
fn value_tests() {
    assert_eq!(emit(&Bytes(&[])).unwrap(), hex!("40"));
    assert_eq!(emit(&Bytes(&hex!("11223344"))).unwrap(), hex!("4411223344"));

    assert_eq!(emit("").unwrap(), hex!("60"));
    assert_eq!(emit("1234").unwrap(), hex!("6431323334"));
    assert_eq!(emit(&String::from("1234")).unwrap(), hex!("6431323334"));

    assert_eq!(emit(&Vec::<u8>::new()).unwrap(), hex!("80"));
    assert_eq!(emit(&[1, 2, 3, 4]).unwrap(), hex!("8401020304"));
    assert_eq!(emit(&vec![1u8, 2, 3, 4]).unwrap(), hex!("8401020304"));

    assert_eq!(emit(&BTreeMap::<String, u8>::new()).unwrap(), hex!("a0"));
    let mut map = BTreeMap::new();
    map.insert("b", 2);
    map.insert("a", 1);
    assert_eq!(emit(&map).unwrap(), hex!("a2616101616202"));

    assert_eq!(emit(&false).unwrap(), hex!("f4"));
    assert_eq!(emit(&true).unwrap(), hex!("f5"));
    assert_eq!(emit(&Value::Null).unwrap(), hex!("f6"));
    assert_eq!(emit(&None::<u8>).unwrap(), hex!("f7"));
    assert_eq!(emit(&Some(1u8)).unwrap(), hex!("01"));

    assert_eq!(emit(&10000.5f32).unwrap(), hex!("fa461c4200"));
    assert_eq!(emit(&10000.5f64).unwrap(), hex!("fa461c4200"));
    assert_eq!(emit(&1.0f32).unwrap(), hex!("fa3f800000"));
}

#[test]
fn map_order_tests() {
    // Map pairs are written in the order given, not sorted
    let value = Value::Map(vec![
        (Value::from("b"), Value::from(2u8)),
        (Value::from("a"), Value::from(1u8)),
    ]);
    assert_eq!(emit(&value).unwrap(), hex!("a2616202616101"));

    let value = Value::Map(vec![(Value::from(-1), Value::from(vec![Value::Undefined]))]);
    assert_eq!(emit(&value).unwrap(), hex!("a12081f7"));
}

#[test]
fn roundtrip_tests() {
    let value = Value::Map(vec![
        (Value::from("id"), Value::from(0x1122u16)),
        (Value::from("neg"), Value::from(-1000)),
        (Value::from("blob"), Value::from(&hex!("00ff00")[..])),
        (
            Value::from("list"),
            Value::Array(vec![
                Value::True,
                Value::False,
                Value::Null,
                Value::Undefined,
                Value::Float(-4.5),
            ]),
        ),
        (Value::from(7u8), Value::Map(Vec::new())),
    ]);
    assert_eq!(parse(&emit(&value).unwrap()).unwrap(), value);
}

#[test]
fn chunk_tests() {
    let mut encoder = Encoder::new();
    assert_eq!(encoder.capacity(), DEFAULT_CAPACITY);

    // Small values come out as a single chunk
    assert_eq!(
        encode_chunks(&mut encoder, &[1, 2, 3, 4]),
        vec![hex!("8401020304").to_vec()]
    );

    // Byte strings larger than the buffer bypass it, after the pending header is flushed
    let big = vec![0u8; 1024];
    let value = [Bytes(&big), Bytes(&big)];
    let chunks = encode_chunks(&mut encoder, &value);
    assert_eq!(
        chunks.iter().map(Vec::len).collect::<Vec<_>>(),
        vec![4, 1024, 3, 1024]
    );
    assert_eq!(chunks[0], hex!("82590400"));
    assert_eq!(chunks[2], hex!("590400"));

    // Filling the buffer flushes it before the next slice is allocated
    let mut encoder = Encoder::with_capacity(8);
    let chunks = encode_chunks(&mut encoder, &[0x11223344u32, 0x55667788]);
    assert_eq!(
        chunks,
        vec![hex!("821a11223344").to_vec(), hex!("1a55667788").to_vec()]
    );
    let data: Vec<u8> = chunks.concat();
    assert_eq!(
        parse(&data).unwrap(),
        Value::Array(vec![0x11223344u32.into(), 0x55667788u32.into()])
    );

    // A text string exactly the buffer size is still buffered
    let chunks = encode_chunks(&mut encoder, "12345678");
    assert_eq!(chunks, vec![hex!("68").to_vec(), b"12345678".to_vec()]);
}

#[test]
fn error_tests() {
    // The buffer must hold the largest header
    let mut encoder = Encoder::with_capacity(4);
    let mut chunks = Vec::new();
    assert_eq!(
        encoder.encode(&0x11223344u32, |chunk| chunks.push(chunk.to_vec())),
        Err(Error::InvalidSliceSize(5))
    );
    assert!(chunks.is_empty());

    // A failed encode leaves nothing behind for the next one
    let mut encoder = Encoder::new();
    assert!(
        encoder
            .encode(&vec![Value::from(1u8), Value::UnsignedInteger(1 << 40)], |chunk| {
                chunks.push(chunk.to_vec())
            })
            .is_err()
    );
    assert!(chunks.is_empty());
    assert_eq!(encode_chunks(&mut encoder, &2u8), vec![vec![2u8]]);
}
