#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    // Largest framed packet accepted by a decoder, CRC bytes included
    pub max_packet: usize, // default 512

    // Size of the chunk buffer between the CBOR encoder and the framer
    pub encode_buffer: usize, // default 512
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_packet: seriallink_cobs::decode::DEFAULT_MAX_PACKET,
            encode_buffer: seriallink_cbor::encode::DEFAULT_CAPACITY,
        }
    }
}
