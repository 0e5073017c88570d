use super::Value;
use alloc::{string::String, vec::Vec};
use thiserror::Error;

/// The "break" stop code that terminates an indefinite length array or map.
pub const BREAK: u8 = (7 << 5) | 31;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Index out of bounds")]
    OutOfBounds,

    #[error("Unsupported type {major}/{minor}")]
    UnsupportedType { major: u8, minor: u8 },

    #[error("Expected major type to be {expected}, but got {actual}")]
    UnexpectedMajorType { expected: u8, actual: u8 },

    #[error("Unexpected minor type {0}")]
    UnexpectedMinorType(u8),

    #[error(transparent)]
    InvalidUtf8(#[from] core::str::Utf8Error),
}

/// A decoded initial byte plus its argument.
///
/// `arg` is `None` for the indefinite length marker (minor type 31).
/// `len` is the number of bytes the header occupies, including the argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub major: u8,
    pub minor: u8,
    pub arg: Option<u32>,
    pub len: usize,
}

impl Header {
    fn definite(&self) -> Result<u32, Error> {
        self.arg.ok_or(Error::UnsupportedType {
            major: self.major,
            minor: self.minor,
        })
    }
}

/// A cursor over a complete CBOR encoded item.
///
/// A read that runs out of data consumes nothing; the length is checked before any byte is taken.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn ensure_length(&self, len: usize) -> Result<usize, Error> {
        if len > self.remaining() {
            Err(Error::OutOfBounds)
        } else {
            Ok(len)
        }
    }

    fn consume(&mut self, len: usize) -> Result<&'a [u8], Error> {
        self.ensure_length(len)?;
        let data = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(data)
    }

    pub fn peek_header(&self) -> Result<Header, Error> {
        self.ensure_length(1)?;
        let b = self.data[self.offset];
        let (major, minor) = (b >> 5, b & 0x1F);
        let arg_data = &self.data[self.offset + 1..];
        let (arg, len) = match minor {
            0..=23 => (Some(minor as u32), 1),
            24 => {
                self.ensure_length(2)?;
                (Some(arg_data[0] as u32), 2)
            }
            25 => {
                self.ensure_length(3)?;
                (Some(u16::from_be_bytes([arg_data[0], arg_data[1]]) as u32), 3)
            }
            26 => {
                self.ensure_length(5)?;
                (
                    Some(u32::from_be_bytes([
                        arg_data[0],
                        arg_data[1],
                        arg_data[2],
                        arg_data[3],
                    ])),
                    5,
                )
            }
            31 => (None, 1),
            _ => return Err(Error::UnsupportedType { major, minor }),
        };
        Ok(Header {
            major,
            minor,
            arg,
            len,
        })
    }

    pub fn read_header(&mut self) -> Result<Header, Error> {
        let header = self.peek_header()?;
        self.offset += header.len;
        Ok(header)
    }

    fn read_major(&mut self, expected: u8) -> Result<Header, Error> {
        let header = self.read_header()?;
        if header.major != expected {
            return Err(Error::UnexpectedMajorType {
                expected,
                actual: header.major,
            });
        }
        Ok(header)
    }

    fn read_simple(&mut self, expected: &[u8]) -> Result<Header, Error> {
        let header = self.read_major(7)?;
        if !expected.contains(&header.minor) {
            return Err(Error::UnexpectedMinorType(header.minor));
        }
        Ok(header)
    }

    pub fn decode_unsigned(&mut self) -> Result<u32, Error> {
        self.read_major(0)?.definite()
    }

    pub fn decode_integer(&mut self) -> Result<i64, Error> {
        let header = self.read_header()?;
        match header.major {
            0 => Ok(header.definite()? as i64),
            1 => Ok(-1 - header.definite()? as i64),
            actual => Err(Error::UnexpectedMajorType {
                expected: 0,
                actual,
            }),
        }
    }

    pub fn decode_bytes(&mut self) -> Result<&'a [u8], Error> {
        let len = self.read_major(2)?.definite()?;
        self.consume(len as usize)
    }

    pub fn decode_text(&mut self) -> Result<&'a str, Error> {
        let len = self.read_major(3)?.definite()?;
        core::str::from_utf8(self.consume(len as usize)?).map_err(Into::into)
    }

    /// Returns the element count, or `None` for an indefinite length array.
    pub fn decode_array_head(&mut self) -> Result<Option<usize>, Error> {
        Ok(self.read_major(4)?.arg.map(|n| n as usize))
    }

    /// Returns the pair count, or `None` for an indefinite length map.
    pub fn decode_map_head(&mut self) -> Result<Option<usize>, Error> {
        Ok(self.read_major(5)?.arg.map(|n| n as usize))
    }

    pub fn decode_bool(&mut self) -> Result<bool, Error> {
        Ok(self.read_simple(&[20, 21])?.minor == 21)
    }

    pub fn decode_null(&mut self) -> Result<(), Error> {
        self.read_simple(&[22]).map(|_| ())
    }

    pub fn decode_undefined(&mut self) -> Result<(), Error> {
        self.read_simple(&[23]).map(|_| ())
    }

    pub fn decode_float(&mut self) -> Result<f32, Error> {
        self.read_simple(&[26])?.definite().map(f32::from_bits)
    }

    fn decode_if(&mut self, major: u8, minor: u8) -> Result<bool, Error> {
        let header = self.peek_header()?;
        if header.major == major && header.minor == minor {
            self.offset += header.len;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes a null if one is next, otherwise leaves the cursor untouched.
    pub fn decode_if_null(&mut self) -> Result<bool, Error> {
        self.decode_if(7, 22)
    }

    /// Consumes a break stop code if one is next, otherwise leaves the cursor untouched.
    pub fn decode_if_break(&mut self) -> Result<bool, Error> {
        self.decode_if(7, 31)
    }

    /// Decodes one complete data item, recursing into arrays and maps.
    pub fn decode(&mut self) -> Result<Value, Error> {
        let header = self.read_header()?;
        match (header.major, header.minor) {
            (0, _) => Ok(Value::UnsignedInteger(header.definite()? as u64)),
            (1, _) => Ok(Value::NegativeInteger(header.definite()? as u64)),
            (2, _) => {
                let len = header.definite()?;
                Ok(Value::Bytes(self.consume(len as usize)?.to_vec()))
            }
            (3, _) => {
                let len = header.definite()?;
                let s = core::str::from_utf8(self.consume(len as usize)?)?;
                Ok(Value::Text(String::from(s)))
            }
            (4, _) => {
                let mut items = Vec::new();
                if let Some(count) = header.arg {
                    // Never trust the count further than the bytes available
                    items.reserve((count as usize).min(self.remaining()));
                    for _ in 0..count {
                        items.push(self.decode()?);
                    }
                } else {
                    while !self.decode_if_break()? {
                        items.push(self.decode()?);
                    }
                }
                Ok(Value::Array(items))
            }
            (5, _) => {
                let mut pairs = Vec::new();
                if let Some(count) = header.arg {
                    pairs.reserve((count as usize).min(self.remaining() / 2));
                    for _ in 0..count {
                        let key = self.decode()?;
                        pairs.push((key, self.decode()?));
                    }
                } else {
                    while !self.decode_if_break()? {
                        let key = self.decode()?;
                        pairs.push((key, self.decode()?));
                    }
                }
                Ok(Value::Map(pairs))
            }
            (7, 20) => Ok(Value::False),
            (7, 21) => Ok(Value::True),
            (7, 22) => Ok(Value::Null),
            (7, 23) => Ok(Value::Undefined),
            (7, 26) => Ok(Value::Float(f32::from_bits(header.definite()?))),
            (major, minor) => Err(Error::UnsupportedType { major, minor }),
        }
    }
}

/// Decodes the first data item in `data`. Trailing bytes are ignored.
pub fn parse(data: &[u8]) -> Result<Value, Error> {
    Decoder::new(data).decode()
}
