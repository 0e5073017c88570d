//! COBS framing with a trailing little-endian CRC16 on every non-empty packet.

use super::{Error, FrameDecoder, FrameEncoder, crc::Crc16, decode, encode};
use tracing::debug;

const CRC_LEN: usize = 2;

fn check_packet(packet: &[u8]) -> Result<&[u8], Error> {
    if packet.len() <= CRC_LEN {
        debug!("Packet of {} bytes is too small for a CRC16", packet.len());
        return Err(Error::TooSmallForCrc16(packet.len()));
    }

    let mut crc = Crc16::new();
    crc.update(packet);
    if !crc.verify() {
        debug!("Packet of {} bytes failed CRC16 check", packet.len());
        return Err(Error::CrcMismatch);
    }
    Ok(&packet[..packet.len() - CRC_LEN])
}

/// A COBS decoder that verifies and strips the CRC16 of each packet.
#[derive(Debug, Default)]
pub struct Decoder {
    cobs: decode::Decoder,
}

impl Decoder {
    /// `max_packet` bounds the framed packet, CRC bytes included.
    pub fn new(max_packet: usize) -> Self {
        Self {
            cobs: decode::Decoder::new(max_packet),
        }
    }

    pub fn capacity(&self) -> usize {
        self.cobs.capacity()
    }
}

impl FrameDecoder for Decoder {
    fn decode_frames<F>(&mut self, data: &[u8], mut f: F)
    where
        F: FnMut(Result<&[u8], Error>),
    {
        self.cobs
            .decode_frames(data, |frame| f(frame.and_then(check_packet)))
    }

    fn reset(&mut self) {
        self.cobs.reset()
    }
}

/// A COBS encoder that appends the CRC16 of each packet's payload.
#[derive(Debug, Default)]
pub struct Encoder {
    cobs: encode::Encoder,
    crc: Crc16,
    length: usize,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameEncoder for Encoder {
    fn encode_data<F>(&mut self, data: &[u8], sink: F)
    where
        F: FnMut(&[u8]),
    {
        self.length += data.len();
        self.crc.update(data);
        self.cobs.encode_data(data, sink)
    }

    fn encode_delimiter<F>(&mut self, mut sink: F)
    where
        F: FnMut(&[u8]),
    {
        // Empty packets stay bare delimiters
        if self.length > 0 {
            self.cobs.encode_data(&self.crc.finish_bytes(), &mut sink);
        }
        self.cobs.encode_delimiter(sink);
        self.crc.reset();
        self.length = 0;
    }

    fn reset(&mut self) {
        self.cobs.reset();
        self.crc.reset();
        self.length = 0;
    }
}
