#![no_main]

use libfuzzer_sys::fuzz_target;
use seriallink_cobs::{FrameDecoder, FrameEncoder, crc16, decode, encode};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut encoded = Vec::new();
    let mut encoder = encode::Encoder::new();
    encoder.encode_data(data, |chunk| encoded.extend_from_slice(chunk));
    encoder.encode_delimiter(|chunk| encoded.extend_from_slice(chunk));
    assert!(!encoded[..encoded.len() - 1].contains(&0));

    let mut packets = Vec::new();
    decode::Decoder::new(data.len()).decode_frames(&encoded, |frame| packets.push(frame.map(<[u8]>::to_vec)));
    assert_eq!(packets, vec![Ok(data.to_vec())]);

    let mut encoded = Vec::new();
    let mut encoder = crc16::Encoder::new();
    encoder.encode_data(data, |chunk| encoded.extend_from_slice(chunk));
    encoder.encode_delimiter(|chunk| encoded.extend_from_slice(chunk));

    let mut packets = Vec::new();
    crc16::Decoder::new(data.len() + 2).decode_frames(&encoded, |frame| packets.push(frame.map(<[u8]>::to_vec)));
    assert_eq!(packets, vec![Ok(data.to_vec())]);
});
