#![no_main]

use libfuzzer_sys::fuzz_target;
use seriallink_cobs::{FrameDecoder, crc16, decode};

fuzz_target!(|data: &[u8]| {
    let mut decoder = decode::Decoder::new(64);
    decoder.decode(data, |event| {
        if let decode::Event::Packet(packet) = event {
            assert!(!packet.is_empty() && packet.len() <= 64);
        }
    });

    let mut decoder = crc16::Decoder::new(64);
    decoder.decode_frames(data, |frame| {
        if let Ok(payload) = frame {
            assert!(payload.len() <= 62);
        }
    });
});
