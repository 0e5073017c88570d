//! Adapters for [`tokio_util::codec`], so a pipeline can drive a `Framed` stream.

use super::*;
use alloc::collections::VecDeque;
use cbor::encode::ToCbor;
use cobs::{FrameDecoder, FrameEncoder};
use std::io;
use tokio_util::bytes::BytesMut;

pub type CobsCborCodec = CborCodec<cobs::decode::Decoder, cobs::encode::Encoder>;
pub type CobsCrc16CborCodec = CborCodec<cobs::crc16::Decoder, cobs::crc16::Encoder>;

/// A codec yielding one item per received packet.
///
/// Packet level errors are yielded as items rather than returned as codec errors,
/// so a corrupted packet never terminates the stream.
#[derive(Debug)]
pub struct CborCodec<D, E> {
    decoder: decode::Decoder<D>,
    encoder: encode::Encoder<E>,
    pending: VecDeque<Result<Value, Error>>,
}

impl<D, E> Default for CborCodec<D, E>
where
    D: FrameDecoder + Default,
    E: FrameEncoder + Default,
{
    fn default() -> Self {
        Self::new(D::default(), E::default())
    }
}

impl<D, E> CborCodec<D, E>
where
    D: FrameDecoder,
    E: FrameEncoder,
{
    pub fn new(decoder: D, encoder: E) -> Self {
        Self::from_parts(decode::Decoder::new(decoder), encode::Encoder::new(encoder))
    }

    pub fn from_parts(decoder: decode::Decoder<D>, encoder: encode::Encoder<E>) -> Self {
        Self {
            decoder,
            encoder,
            pending: VecDeque::new(),
        }
    }
}

impl CobsCborCodec {
    pub fn with_config(config: &Config) -> Self {
        Self::from_parts(
            decode::Decoder::<cobs::decode::Decoder>::with_config(config),
            encode::Encoder::with_config(config),
        )
    }
}

impl CobsCrc16CborCodec {
    pub fn with_config(config: &Config) -> Self {
        Self::from_parts(
            decode::Decoder::<cobs::crc16::Decoder>::with_config(config),
            encode::Encoder::with_config(config),
        )
    }
}

impl<D, E> tokio_util::codec::Decoder for CborCodec<D, E>
where
    D: FrameDecoder,
{
    type Item = Result<Value, Error>;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // Feed at most one delimiter at a time, so results are handed out as they complete
        while self.pending.is_empty() && !src.is_empty() {
            let len = src
                .iter()
                .position(|&b| b == 0)
                .map_or(src.len(), |idx| idx + 1);
            let chunk = src.split_to(len);

            let pending = &mut self.pending;
            self.decoder
                .decode(&chunk, |result| pending.push_back(result));
        }
        Ok(self.pending.pop_front())
    }
}

impl<D, E, T> tokio_util::codec::Encoder<T> for CborCodec<D, E>
where
    E: FrameEncoder,
    T: ToCbor,
{
    type Error = io::Error;

    fn encode(&mut self, item: T, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let start = dst.len();
        self.encoder
            .encode(&item, |chunk| dst.extend_from_slice(chunk))
            .map_err(|e| {
                dst.truncate(start);
                io::Error::new(io::ErrorKind::InvalidInput, e)
            })
    }
}
