use super::{Error, FrameDecoder};
use alloc::{boxed::Box, vec};
use tracing::{debug, trace};

/// Default capacity of the packet buffer.
pub const DEFAULT_MAX_PACKET: usize = 512;

// A block length of 0xFF carries no implied zero, and doubles as the "no block" marker
const NO_BLOCK: usize = 0xFF;

/// Everything the decoder observes, in stream order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// A completed block, including its implied trailing zero.
    Block(&'a [u8]),

    /// A packet delimiter, with the logical length of the packet it ends.
    End(usize),

    /// A complete packet that fitted the packet buffer.
    Packet(&'a [u8]),

    /// The packet was discarded.
    Error(Error),
}

/// A streaming COBS decoder.
///
/// Input may be fed in chunks of any size; all state is carried between calls.
/// Each reported packet or error resets the decoder, and the next zero byte always
/// resynchronises it with the stream.
#[derive(Debug)]
pub struct Decoder {
    block: [u8; 256],
    block_start: usize,
    block_index: usize,
    block_length: usize,
    packet: Box<[u8]>,
    packet_index: usize,
    total_length: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PACKET)
    }
}

impl Decoder {
    pub fn new(max_packet: usize) -> Self {
        Self {
            block: [0; 256],
            block_start: NO_BLOCK,
            block_index: NO_BLOCK,
            block_length: NO_BLOCK,
            packet: vec![0u8; max_packet].into_boxed_slice(),
            packet_index: 0,
            total_length: 0,
        }
    }

    /// The largest packet that can be delivered without reporting [`Error::Overflow`].
    pub fn capacity(&self) -> usize {
        self.packet.len()
    }

    pub fn reset(&mut self) {
        self.block_start = NO_BLOCK;
        self.block_index = NO_BLOCK;
        self.block_length = NO_BLOCK;
        self.packet_index = 0;
        self.total_length = 0;
    }

    pub fn decode<F>(&mut self, data: &[u8], mut f: F)
    where
        F: FnMut(Event<'_>),
    {
        for &b in data {
            if self.block_index < self.block_length {
                if b != 0 {
                    self.block[self.block_index] = b;
                    self.block_index += 1;
                } else {
                    debug!("Zero byte inside a COBS block, discarding packet");
                    f(Event::Error(Error::UnexpectedZero));
                    self.reset();
                }
                continue;
            }

            // b is either the packet delimiter or the length of the next block
            if b != 0 && self.block_length != NO_BLOCK {
                self.block[self.block_index] = 0;
                self.block_index += 1;
            }

            if self.block_start < self.block_index {
                let block = &self.block[self.block_start..self.block_index];

                // Bytes beyond the packet buffer are counted but not stored
                let len = block.len().min(self.packet.len() - self.packet_index);
                self.packet[self.packet_index..self.packet_index + len]
                    .copy_from_slice(&block[..len]);
                self.packet_index += len;
                self.total_length += block.len();

                f(Event::Block(block));
            }

            if b != 0 {
                self.block_start = 1;
                self.block_index = 1;
                self.block_length = b as usize;
                continue;
            }

            f(Event::End(self.total_length));
            if self.total_length > 0 {
                if self.packet_index == self.total_length {
                    trace!("Received {} byte packet", self.total_length);
                    f(Event::Packet(&self.packet[..self.packet_index]));
                } else {
                    debug!(
                        "Packet of {} bytes overflows the {} byte buffer, discarding",
                        self.total_length,
                        self.packet.len()
                    );
                    f(Event::Error(Error::Overflow(self.total_length)));
                }
            }
            self.reset();
        }
    }
}

impl FrameDecoder for Decoder {
    fn decode_frames<F>(&mut self, data: &[u8], mut f: F)
    where
        F: FnMut(Result<&[u8], Error>),
    {
        self.decode(data, |event| match event {
            Event::Packet(packet) => f(Ok(packet)),
            Event::Error(e) => f(Err(e)),
            Event::Block(_) | Event::End(_) => {}
        })
    }

    fn reset(&mut self) {
        Decoder::reset(self)
    }
}
