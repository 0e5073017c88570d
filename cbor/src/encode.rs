use super::Value;
use alloc::{boxed::Box, collections::BTreeMap, string::String, vec, vec::Vec};
use thiserror::Error;

/// Default size of the encoder's internal chunk buffer.
pub const DEFAULT_CAPACITY: usize = 512;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unsupported argument {0}, arguments are limited to 32 bits")]
    UnsupportedArgument(u64),

    #[error("Invalid slice size {0}, exceeds the encoder buffer")]
    InvalidSliceSize(usize),
}

pub trait ToCbor {
    fn to_cbor(&self, emitter: &mut Emitter) -> Result<(), Error>;
}

/// A byte string, as opposed to an array of small integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bytes<'a>(pub &'a [u8]);

/// A streaming encoder with a fixed size buffer.
///
/// Encoded bytes are handed to the caller's sink in chunks no larger than the buffer,
/// except for byte and text strings too large to buffer, which are passed through whole.
#[derive(Debug)]
pub struct Encoder {
    buffer: Box<[u8]>,
    index: usize,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: vec![0u8; capacity].into_boxed_slice(),
            index: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Encodes `value`, passing every completed chunk to `sink`.
    ///
    /// All buffered bytes are flushed before returning `Ok`, so each call produces a
    /// complete encoding. On error, bytes not yet flushed are discarded.
    pub fn encode<T, F>(&mut self, value: &T, mut sink: F) -> Result<(), Error>
    where
        T: ToCbor + ?Sized,
        F: FnMut(&[u8]),
    {
        self.index = 0;
        let mut emitter = Emitter {
            encoder: self,
            sink: &mut sink,
        };
        match value.to_cbor(&mut emitter) {
            Ok(()) => {
                emitter.flush();
                Ok(())
            }
            Err(e) => {
                self.index = 0;
                Err(e)
            }
        }
    }
}

/// The write half of an in-progress [`Encoder::encode`] call.
pub struct Emitter<'a> {
    encoder: &'a mut Encoder,
    sink: &'a mut dyn FnMut(&[u8]),
}

impl Emitter<'_> {
    fn flush(&mut self) {
        if self.encoder.index > 0 {
            (self.sink)(&self.encoder.buffer[..self.encoder.index]);
            self.encoder.index = 0;
        }
    }

    fn alloc_slice(&mut self, len: usize) -> Result<&mut [u8], Error> {
        if len > self.encoder.buffer.len() {
            return Err(Error::InvalidSliceSize(len));
        }
        if self.encoder.index + len > self.encoder.buffer.len() {
            self.flush();
        }
        let start = self.encoder.index;
        self.encoder.index += len;
        Ok(&mut self.encoder.buffer[start..start + len])
    }

    fn emit_major_minor(&mut self, major: u8, minor: u8) -> Result<(), Error> {
        self.alloc_slice(1)?[0] = (major << 5) | (minor & 0x1F);
        Ok(())
    }

    fn emit_header(&mut self, major: u8, arg: u64) -> Result<(), Error> {
        if arg < 0x18 {
            self.emit_major_minor(major, arg as u8)
        } else if arg <= u8::MAX as u64 {
            let s = self.alloc_slice(2)?;
            s[0] = (major << 5) | 24;
            s[1] = arg as u8;
            Ok(())
        } else if arg <= u16::MAX as u64 {
            let s = self.alloc_slice(3)?;
            s[0] = (major << 5) | 25;
            s[1..].copy_from_slice(&(arg as u16).to_be_bytes());
            Ok(())
        } else if arg <= u32::MAX as u64 {
            let s = self.alloc_slice(5)?;
            s[0] = (major << 5) | 26;
            s[1..].copy_from_slice(&(arg as u32).to_be_bytes());
            Ok(())
        } else {
            Err(Error::UnsupportedArgument(arg))
        }
    }

    /// Appends raw bytes to the output.
    ///
    /// Slices larger than the whole buffer flush pending bytes and go to the sink directly.
    pub fn emit_raw(&mut self, data: &[u8]) -> Result<(), Error> {
        if data.len() > self.encoder.buffer.len() {
            self.flush();
            (self.sink)(data);
            Ok(())
        } else {
            self.alloc_slice(data.len())?.copy_from_slice(data);
            Ok(())
        }
    }

    pub fn emit<T>(&mut self, value: &T) -> Result<(), Error>
    where
        T: ToCbor + ?Sized,
    {
        value.to_cbor(self)
    }

    fn emit_i64(&mut self, value: i64) -> Result<(), Error> {
        if value >= 0 {
            self.emit_header(0, value as u64)
        } else {
            self.emit_header(1, (-1 - value) as u64)
        }
    }

    pub fn emit_bytes(&mut self, data: &[u8]) -> Result<(), Error> {
        self.emit_header(2, data.len() as u64)?;
        self.emit_raw(data)
    }

    pub fn emit_text(&mut self, text: &str) -> Result<(), Error> {
        self.emit_header(3, text.len() as u64)?;
        self.emit_raw(text.as_bytes())
    }

    /// Starts a definite length array; the caller must emit exactly `len` items next.
    pub fn emit_array_head(&mut self, len: usize) -> Result<(), Error> {
        self.emit_header(4, len as u64)
    }

    /// Starts a definite length map; the caller must emit exactly `len` key/value pairs next.
    pub fn emit_map_head(&mut self, len: usize) -> Result<(), Error> {
        self.emit_header(5, len as u64)
    }

    pub fn emit_bool(&mut self, value: bool) -> Result<(), Error> {
        self.emit_major_minor(7, if value { 21 } else { 20 })
    }

    pub fn emit_null(&mut self) -> Result<(), Error> {
        self.emit_major_minor(7, 22)
    }

    pub fn emit_undefined(&mut self) -> Result<(), Error> {
        self.emit_major_minor(7, 23)
    }

    pub fn emit_float(&mut self, value: f32) -> Result<(), Error> {
        self.emit_major_minor(7, 26)?;
        self.emit_raw(&value.to_be_bytes())
    }
}

impl ToCbor for Value {
    fn to_cbor(&self, emitter: &mut Emitter) -> Result<(), Error> {
        match self {
            Value::UnsignedInteger(n) => emitter.emit_header(0, *n),
            Value::NegativeInteger(n) => emitter.emit_header(1, *n),
            Value::Bytes(b) => emitter.emit_bytes(b),
            Value::Text(s) => emitter.emit_text(s),
            Value::Array(items) => {
                emitter.emit_array_head(items.len())?;
                items.iter().try_for_each(|item| emitter.emit(item))
            }
            Value::Map(pairs) => {
                emitter.emit_map_head(pairs.len())?;
                pairs.iter().try_for_each(|(key, value)| {
                    emitter.emit(key)?;
                    emitter.emit(value)
                })
            }
            Value::False => emitter.emit_bool(false),
            Value::True => emitter.emit_bool(true),
            Value::Null => emitter.emit_null(),
            Value::Undefined => emitter.emit_undefined(),
            Value::Float(f) => emitter.emit_float(*f),
        }
    }
}

macro_rules! impl_uint_to_cbor {
    ($($ty:ty),*) => {
        $(
            impl ToCbor for $ty {
                fn to_cbor(&self, emitter: &mut Emitter) -> Result<(), Error> {
                    emitter.emit_header(0, *self as u64)
                }
            }
        )*
    };
}

impl_uint_to_cbor!(u8, u16, u32, u64, usize);

macro_rules! impl_int_to_cbor {
    ($($ty:ty),*) => {
        $(
            impl ToCbor for $ty {
                fn to_cbor(&self, emitter: &mut Emitter) -> Result<(), Error> {
                    emitter.emit_i64(*self as i64)
                }
            }
        )*
    };
}

impl_int_to_cbor!(i8, i16, i32, i64, isize);

impl ToCbor for f32 {
    fn to_cbor(&self, emitter: &mut Emitter) -> Result<(), Error> {
        emitter.emit_float(*self)
    }
}

/// Only single precision floats are emitted; the conversion may lose precision.
impl ToCbor for f64 {
    fn to_cbor(&self, emitter: &mut Emitter) -> Result<(), Error> {
        emitter.emit_float(*self as f32)
    }
}

impl ToCbor for bool {
    fn to_cbor(&self, emitter: &mut Emitter) -> Result<(), Error> {
        emitter.emit_bool(*self)
    }
}

impl ToCbor for str {
    fn to_cbor(&self, emitter: &mut Emitter) -> Result<(), Error> {
        emitter.emit_text(self)
    }
}

impl ToCbor for String {
    fn to_cbor(&self, emitter: &mut Emitter) -> Result<(), Error> {
        emitter.emit_text(self)
    }
}

impl ToCbor for Bytes<'_> {
    fn to_cbor(&self, emitter: &mut Emitter) -> Result<(), Error> {
        emitter.emit_bytes(self.0)
    }
}

impl<T> ToCbor for [T]
where
    T: ToCbor,
{
    fn to_cbor(&self, emitter: &mut Emitter) -> Result<(), Error> {
        emitter.emit_array_head(self.len())?;
        self.iter().try_for_each(|item| emitter.emit(item))
    }
}

impl<T, const N: usize> ToCbor for [T; N]
where
    T: ToCbor,
{
    fn to_cbor(&self, emitter: &mut Emitter) -> Result<(), Error> {
        self.as_slice().to_cbor(emitter)
    }
}

impl<T> ToCbor for Vec<T>
where
    T: ToCbor,
{
    fn to_cbor(&self, emitter: &mut Emitter) -> Result<(), Error> {
        self.as_slice().to_cbor(emitter)
    }
}

impl<K, V> ToCbor for BTreeMap<K, V>
where
    K: ToCbor,
    V: ToCbor,
{
    fn to_cbor(&self, emitter: &mut Emitter) -> Result<(), Error> {
        emitter.emit_map_head(self.len())?;
        self.iter().try_for_each(|(key, value)| {
            emitter.emit(key)?;
            emitter.emit(value)
        })
    }
}

impl<T> ToCbor for Option<T>
where
    T: ToCbor,
{
    fn to_cbor(&self, emitter: &mut Emitter) -> Result<(), Error> {
        match self {
            Some(value) => emitter.emit(value),
            None => emitter.emit_undefined(),
        }
    }
}

impl<T> ToCbor for &T
where
    T: ToCbor + ?Sized,
{
    fn to_cbor(&self, emitter: &mut Emitter) -> Result<(), Error> {
        (**self).to_cbor(emitter)
    }
}

/// Encodes `value` into a single contiguous buffer.
pub fn emit<T>(value: &T) -> Result<Vec<u8>, Error>
where
    T: ToCbor + ?Sized,
{
    let mut data = Vec::new();
    Encoder::new().encode(value, |chunk| data.extend_from_slice(chunk))?;
    Ok(data)
}
