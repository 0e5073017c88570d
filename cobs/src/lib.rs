#![no_std]
extern crate alloc;

pub mod crc;
pub mod crc16;
pub mod decode;
pub mod encode;

mod error;

pub use error::Error;

/// A framing layer that splits a byte stream into complete packets.
pub trait FrameDecoder {
    /// Feeds a chunk of any size, calling `f` with each completed packet or
    /// packet level error in stream order.
    ///
    /// A packet slice is only valid for the duration of the call to `f`.
    fn decode_frames<F>(&mut self, data: &[u8], f: F)
    where
        F: FnMut(Result<&[u8], Error>);

    /// Discards any partially received packet.
    fn reset(&mut self);
}

/// A framing layer that turns packet payloads into a delimited byte stream.
pub trait FrameEncoder {
    /// Appends payload bytes to the current packet.
    fn encode_data<F>(&mut self, data: &[u8], sink: F)
    where
        F: FnMut(&[u8]);

    /// Terminates the current packet. Safe to call with no payload pending.
    fn encode_delimiter<F>(&mut self, sink: F)
    where
        F: FnMut(&[u8]);

    /// Discards any partially written packet without emitting anything.
    fn reset(&mut self);
}

#[cfg(test)]
mod test_data;
