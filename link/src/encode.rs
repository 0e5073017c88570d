use super::*;
use cbor::encode::ToCbor;
use cobs::FrameEncoder;
use tracing::debug;

pub type CobsCborEncoder = Encoder<cobs::encode::Encoder>;
pub type CobsCrc16CborEncoder = Encoder<cobs::crc16::Encoder>;

/// Encodes each value as one delimited packet.
#[derive(Debug)]
pub struct Encoder<E> {
    cbor: cbor::encode::Encoder,
    framer: E,
}

impl<E> Default for Encoder<E>
where
    E: FrameEncoder + Default,
{
    fn default() -> Self {
        Self::new(E::default())
    }
}

impl<E> Encoder<E>
where
    E: FrameEncoder,
{
    pub fn new(framer: E) -> Self {
        Self::with_buffer(framer, cbor::encode::DEFAULT_CAPACITY)
    }

    pub fn with_buffer(framer: E, encode_buffer: usize) -> Self {
        Self {
            cbor: cbor::encode::Encoder::with_capacity(encode_buffer),
            framer,
        }
    }

    pub fn framer(&self) -> &E {
        &self.framer
    }

    /// Encodes `value` between two delimiters, passing the framed bytes to `sink`
    /// as they are produced.
    ///
    /// If encoding fails part way, the framer discards the partial packet; the
    /// opening delimiter has already been sent.
    #[cfg_attr(feature = "instrument", instrument(skip_all))]
    pub fn encode<T, F>(&mut self, value: &T, mut sink: F) -> Result<(), Error>
    where
        T: ToCbor + ?Sized,
        F: FnMut(&[u8]),
    {
        self.framer.encode_delimiter(&mut sink);

        let framer = &mut self.framer;
        if let Err(e) = self
            .cbor
            .encode(value, |chunk| framer.encode_data(chunk, &mut sink))
        {
            debug!("Failed to encode value: {e}");
            self.framer.reset();
            return Err(e.into());
        }

        self.framer.encode_delimiter(sink);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.framer.reset()
    }
}

impl<E> Encoder<E>
where
    E: FrameEncoder + Default,
{
    pub fn with_config(config: &Config) -> Self {
        Self::with_buffer(E::default(), config.encode_buffer)
    }
}
