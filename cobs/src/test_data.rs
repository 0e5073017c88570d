use alloc::{vec, vec::Vec};
use core::ops::RangeInclusive;
use hex_literal::hex;

fn run(head: &[u8], body: RangeInclusive<u8>, tail: &[u8]) -> Vec<u8> {
    head.iter().copied().chain(body).chain(tail.iter().copied()).collect()
}

/// A raw packet, its COBS encoding (delimiter included) and the block lengths
/// the decoder reports for it.
pub struct Vector {
    pub raw: Vec<u8>,
    pub encoded: Vec<u8>,
    pub blocks: Vec<usize>,
}

pub fn vectors() -> Vec<Vector> {
    let v = |raw: Vec<u8>, encoded: Vec<u8>, blocks: Vec<usize>| Vector {
        raw,
        encoded,
        blocks,
    };
    vec![
        v(hex!("00").to_vec(), hex!("010100").to_vec(), vec![1]),
        v(hex!("0000").to_vec(), hex!("01010100").to_vec(), vec![1, 1]),
        v(hex!("001100").to_vec(), hex!("0102110100").to_vec(), vec![1, 2]),
        v(
            hex!("11220033").to_vec(),
            hex!("031122023300").to_vec(),
            vec![3, 1],
        ),
        v(
            hex!("11223344").to_vec(),
            hex!("051122334400").to_vec(),
            vec![4],
        ),
        v(
            hex!("11000000").to_vec(),
            hex!("021101010100").to_vec(),
            vec![2, 1, 1],
        ),
        v(
            run(&[], 0x01..=0xFE, &[]),
            run(&[0xFF], 0x01..=0xFE, &[0x00]),
            vec![254],
        ),
        v(
            run(&[0x00], 0x01..=0xFE, &[]),
            run(&[0x01, 0xFF], 0x01..=0xFE, &[0x00]),
            vec![1, 254],
        ),
        v(
            run(&[], 0x01..=0xFF, &[]),
            run(&[0xFF], 0x01..=0xFE, &[0x02, 0xFF, 0x00]),
            vec![254, 1],
        ),
        v(
            run(&[], 0x02..=0xFF, &[0x00]),
            run(&[0xFF], 0x02..=0xFF, &[0x01, 0x01, 0x00]),
            vec![254, 1],
        ),
        v(
            run(&[], 0x03..=0xFF, &[0x00, 0x01]),
            run(&[0xFE], 0x03..=0xFF, &[0x02, 0x01, 0x00]),
            vec![254, 1],
        ),
    ]
}

/// Payloads of assorted lengths, with and without embedded zeros.
pub fn payloads() -> Vec<Vec<u8>> {
    [1usize, 2, 253, 254, 255, 256, 508, 509, 600]
        .iter()
        .flat_map(|&len| {
            [
                (0..len).map(|i| (i % 255) as u8 + 1).collect::<Vec<u8>>(),
                (0..len)
                    .map(|i| if i % 7 == 3 { 0 } else { i as u8 })
                    .collect(),
            ]
        })
        .collect()
}
