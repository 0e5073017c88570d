use super::*;
use cobs::FrameDecoder;
use tracing::debug;

pub type CobsCborDecoder = Decoder<cobs::decode::Decoder>;
pub type CobsCrc16CborDecoder = Decoder<cobs::crc16::Decoder>;

/// Decodes one CBOR value from every packet a framer delivers.
#[derive(Debug, Default)]
pub struct Decoder<D> {
    framer: D,
}

impl<D> Decoder<D>
where
    D: FrameDecoder,
{
    pub fn new(framer: D) -> Self {
        Self { framer }
    }

    pub fn framer(&self) -> &D {
        &self.framer
    }

    /// Feeds a chunk of any size, calling `f` with each decoded value or packet
    /// level error in stream order.
    #[cfg_attr(feature = "instrument", instrument(skip_all))]
    pub fn decode<F>(&mut self, data: &[u8], mut f: F)
    where
        F: FnMut(Result<Value, Error>),
    {
        self.framer.decode_frames(data, |frame| {
            f(frame.map_err(Into::into).and_then(|packet| {
                cbor::decode::parse(packet)
                    .inspect_err(|e| debug!("Discarding {} byte packet: {e}", packet.len()))
                    .map_err(Into::into)
            }))
        })
    }

    pub fn reset(&mut self) {
        self.framer.reset()
    }
}

impl CobsCborDecoder {
    pub fn with_config(config: &Config) -> Self {
        Self::new(cobs::decode::Decoder::new(config.max_packet))
    }
}

impl CobsCrc16CborDecoder {
    pub fn with_config(config: &Config) -> Self {
        Self::new(cobs::crc16::Decoder::new(config.max_packet))
    }
}
