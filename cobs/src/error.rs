use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("Unexpected zero byte inside a COBS block")]
    UnexpectedZero,

    #[error("Packet of {0} bytes overflows the receive buffer")]
    Overflow(usize),

    #[error("Packet of {0} bytes is too small to carry a CRC16")]
    TooSmallForCrc16(usize),

    #[error("Incorrect CRC value")]
    CrcMismatch,
}
