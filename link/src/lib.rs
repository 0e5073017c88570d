#![no_std]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod decode;
pub mod encode;

#[cfg(feature = "codec")]
pub mod codec;

pub use seriallink_cbor as cbor;
pub use seriallink_cobs as cobs;

pub use cbor::Value;
pub use config::Config;
pub use decode::{CobsCborDecoder, CobsCrc16CborDecoder};
pub use encode::{CobsCborEncoder, CobsCrc16CborEncoder};

use thiserror::Error;

#[cfg(feature = "instrument")]
use tracing::instrument;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Framing(#[from] cobs::Error),

    #[error(transparent)]
    Decode(#[from] cbor::decode::Error),

    #[error(transparent)]
    Encode(#[from] cbor::encode::Error),
}
