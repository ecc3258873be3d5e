//! Wire-format primitives: tags, varints, zigzag and fixed-width values

use as3gen_core::FieldType;
use thiserror::Error;

/// Result type alias for wire operations
pub type WireResult<T> = Result<T, WireError>;

/// Errors that can occur while encoding or decoding records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("unexpected end of input")]
    Truncated,

    #[error("varint is longer than 10 bytes")]
    VarintOverflow,

    #[error("invalid wire type {0}")]
    InvalidWireType(u32),

    #[error("field number 0 is reserved")]
    ZeroFieldNumber,

    #[error("field {number} expects wire type {expected:?}, got {actual:?}")]
    WireTypeMismatch {
        number: u32,
        expected: WireType,
        actual: WireType,
    },

    #[error("group encoding is not supported (field {0})")]
    UnsupportedGroup(u32),

    #[error("invalid UTF-8 in string field {0}")]
    InvalidUtf8(u32),

    #[error("unknown record type `{0}`")]
    UnknownType(String),

    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("value does not match field `{0}`")]
    ValueMismatch(String),

    #[error("tag {0} does not fit in 32 bits")]
    TagOverflow(u64),

    #[error("records nested deeper than {0} levels")]
    RecursionLimit(usize),
}

/// Number of low bits of a tag holding the wire type
pub const TAG_TYPE_BITS: u32 = 3;

/// Largest encoded varint, in bytes
pub const MAX_VARINT_LEN: usize = 10;

/// How a value is laid out on the wire
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    StartGroup = 3,
    EndGroup = 4,
    Fixed32 = 5,
}

impl WireType {
    pub fn from_u32(value: u32) -> WireResult<Self> {
        match value {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            3 => Ok(WireType::StartGroup),
            4 => Ok(WireType::EndGroup),
            5 => Ok(WireType::Fixed32),
            other => Err(WireError::InvalidWireType(other)),
        }
    }

    /// The wire type used for a declared field type
    pub fn for_field_type(ty: FieldType) -> Self {
        match ty {
            FieldType::Int32
            | FieldType::Int64
            | FieldType::Uint32
            | FieldType::Uint64
            | FieldType::Sint32
            | FieldType::Sint64
            | FieldType::Bool
            | FieldType::Enum => WireType::Varint,
            FieldType::Fixed64 | FieldType::Sfixed64 | FieldType::Double => WireType::Fixed64,
            FieldType::Fixed32 | FieldType::Sfixed32 | FieldType::Float => WireType::Fixed32,
            FieldType::String | FieldType::Bytes | FieldType::Message => {
                WireType::LengthDelimited
            }
            FieldType::Group => WireType::StartGroup,
        }
    }

    /// Payload size for fixed-width wire types
    pub fn fixed_size(self) -> Option<usize> {
        match self {
            WireType::Fixed32 => Some(4),
            WireType::Fixed64 => Some(8),
            _ => None,
        }
    }
}

/// Combine a field number and wire type into a tag
pub fn make_tag(number: u32, wire_type: WireType) -> u32 {
    (number << TAG_TYPE_BITS) | wire_type as u32
}

/// Split a tag into its field number and wire type
pub fn split_tag(tag: u32) -> WireResult<(u32, WireType)> {
    let number = tag >> TAG_TYPE_BITS;
    if number == 0 {
        return Err(WireError::ZeroFieldNumber);
    }
    let wire_type = WireType::from_u32(tag & ((1 << TAG_TYPE_BITS) - 1))?;
    Ok((number, wire_type))
}

/// Encoded length of a varint
pub fn varint_size(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Encoded length of a field's tag
pub fn tag_size(number: u32) -> usize {
    varint_size(u64::from(make_tag(number, WireType::Varint)))
}

pub fn encode_zigzag32(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

pub fn decode_zigzag32(value: u32) -> i32 {
    ((value >> 1) as i32) ^ -((value & 1) as i32)
}

pub fn encode_zigzag64(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

pub fn decode_zigzag64(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Append-only encoder
#[derive(Debug, Clone, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_varint(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.buf.push((value as u8) | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
    }

    pub fn write_tag(&mut self, number: u32, wire_type: WireType) {
        self.write_varint(u64::from(make_tag(number, wire_type)));
    }

    pub fn write_fixed32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_fixed64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Write a length prefix followed by the bytes
    pub fn write_length_delimited(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor-based decoder over a byte slice
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn read_varint(&mut self) -> WireResult<u64> {
        let mut result = 0u64;
        for index in 0..MAX_VARINT_LEN {
            let byte = *self.data.get(self.pos).ok_or(WireError::Truncated)?;
            self.pos += 1;
            result |= u64::from(byte & 0x7f) << (7 * index);
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(WireError::VarintOverflow)
    }

    /// Read the next tag, or `None` at the end of input
    pub fn read_tag(&mut self) -> WireResult<Option<(u32, WireType)>> {
        if self.is_at_end() {
            return Ok(None);
        }
        let tag = self.read_varint()?;
        let tag = u32::try_from(tag).map_err(|_| WireError::TagOverflow(tag))?;
        split_tag(tag).map(Some)
    }

    pub fn read_fixed32(&mut self) -> WireResult<u32> {
        let bytes = self.take(4)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(bytes);
        Ok(u32::from_le_bytes(raw))
    }

    pub fn read_fixed64(&mut self) -> WireResult<u64> {
        let bytes = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(raw))
    }

    pub fn read_length_delimited(&mut self) -> WireResult<&'a [u8]> {
        let len = self.read_varint()?;
        let len = usize::try_from(len).map_err(|_| WireError::Truncated)?;
        self.take(len)
    }

    /// Skip over the payload of a field with the given wire type
    pub fn skip_field(&mut self, number: u32, wire_type: WireType) -> WireResult<()> {
        match wire_type {
            WireType::Varint => self.read_varint().map(|_| ()),
            WireType::Fixed64 => self.take(8).map(|_| ()),
            WireType::LengthDelimited => self.read_length_delimited().map(|_| ()),
            WireType::Fixed32 => self.take(4).map(|_| ()),
            WireType::StartGroup | WireType::EndGroup => Err(WireError::UnsupportedGroup(number)),
        }
    }

    fn take(&mut self, len: usize) -> WireResult<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or(WireError::Truncated)?;
        let bytes = self.data.get(self.pos..end).ok_or(WireError::Truncated)?;
        self.pos = end;
        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "wire/wire_tests.rs"]
mod wire_tests;
