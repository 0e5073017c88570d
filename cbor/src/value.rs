use alloc::{string::String, vec::Vec};

/// A decoded CBOR data item.
///
/// Integers keep the wire representation: `NegativeInteger(n)` is the value `-1 - n`.
/// Maps keep their pairs in wire order, and any value may be used as a key.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    UnsignedInteger(u64),
    NegativeInteger(u64),
    Bytes(Vec<u8>),
    Text(String),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
    False,
    True,
    Null,
    Undefined,
    Float(f32),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::UnsignedInteger(_) => "Unsigned Integer",
            Value::NegativeInteger(_) => "Negative Integer",
            Value::Bytes(_) => "Byte String",
            Value::Text(_) => "Text String",
            Value::Array(_) => "Array",
            Value::Map(_) => "Map",
            Value::False => "False",
            Value::True => "True",
            Value::Null => "Null",
            Value::Undefined => "Undefined",
            Value::Float(_) => "Float",
        }
    }

    /// Returns the integer value, if this is an integer that fits an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::UnsignedInteger(n) => i64::try_from(*n).ok(),
            Value::NegativeInteger(n) => i64::try_from(*n).ok().map(|n| -1 - n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::False => Some(false),
            Value::True => Some(true),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Looks up the first entry of a map whose key is the text string `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(m) => m
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

macro_rules! impl_from_uint {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::UnsignedInteger(value as u64)
                }
            }
        )*
    };
}

impl_from_uint!(u8, u16, u32, u64, usize);

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    let value = value as i64;
                    if value >= 0 {
                        Value::UnsignedInteger(value as u64)
                    } else {
                        Value::NegativeInteger((-1 - value) as u64)
                    }
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, isize);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        if value { Value::True } else { Value::False }
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Vec<(Value, Value)>> for Value {
    fn from(value: Vec<(Value, Value)>) -> Self {
        Value::Map(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}
