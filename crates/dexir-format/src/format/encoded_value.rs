//! Encoded value headers and variable-width payloads.
//!
//! Each value starts with one byte: the type in the low 5 bits and an
//! argument in the high 3 bits (usually the payload length minus one).

use super::error::{DexError, Result};
use super::reader::Cursor;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueType {
    Byte = 0x00,
    Short = 0x02,
    Char = 0x03,
    Int = 0x04,
    Long = 0x06,
    Float = 0x10,
    Double = 0x11,
    MethodType = 0x15,
    MethodHandle = 0x16,
    String = 0x17,
    Type = 0x18,
    Field = 0x19,
    Method = 0x1a,
    Enum = 0x1b,
    Array = 0x1c,
    Annotation = 0x1d,
    Null = 0x1e,
    Boolean = 0x1f,
}

impl ValueType {
    pub fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            0x00 => Self::Byte,
            0x02 => Self::Short,
            0x03 => Self::Char,
            0x04 => Self::Int,
            0x06 => Self::Long,
            0x10 => Self::Float,
            0x11 => Self::Double,
            0x15 => Self::MethodType,
            0x16 => Self::MethodHandle,
            0x17 => Self::String,
            0x18 => Self::Type,
            0x19 => Self::Field,
            0x1a => Self::Method,
            0x1b => Self::Enum,
            0x1c => Self::Array,
            0x1d => Self::Annotation,
            0x1e => Self::Null,
            0x1f => Self::Boolean,
            _ => return None,
        })
    }

    /// Largest legal argument for this type.
    fn max_arg(self) -> u8 {
        match self {
            Self::Byte | Self::Array | Self::Annotation | Self::Null => 0,
            Self::Short | Self::Char | Self::Boolean => 1,
            Self::Long | Self::Double => 7,
            _ => 3,
        }
    }
}

/// Decoded value header byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueHeader {
    pub value_type: ValueType,
    pub arg: u8,
}

impl ValueHeader {
    pub fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
        let offset = cursor.position();
        let byte = cursor.read_u8()?;
        let bad = || DexError::BadEncodedValue {
            value_type: byte & 0x1f,
            offset,
        };
        let value_type = ValueType::from_u8(byte & 0x1f).ok_or_else(bad)?;
        let arg = byte >> 5;
        if arg > value_type.max_arg() {
            return Err(bad());
        }
        Ok(Self { value_type, arg })
    }
}

/// Read `arg + 1` little-endian bytes, optionally sign-extending to 64 bits.
pub fn read_var_width(cursor: &mut Cursor<'_>, arg: u8, sign_extend: bool) -> Result<u64> {
    let len = usize::from(arg) + 1;
    let bytes = cursor.read_bytes(len)?;
    let mut value = 0u64;
    for (i, &b) in bytes.iter().enumerate() {
        value |= u64::from(b) << (8 * i);
    }
    if sign_extend {
        let shift = (8 - len) * 8;
        value = ((value << shift) as i64 >> shift) as u64;
    }
    Ok(value)
}

/// Read `arg + 1` bytes as the high-order bytes of a `width`-byte value
/// (floats and doubles drop trailing zero bytes).
pub fn read_right_zero_extended(cursor: &mut Cursor<'_>, arg: u8, width: usize) -> Result<u64> {
    let value = read_var_width(cursor, arg, false)?;
    let missing = width.saturating_sub(usize::from(arg) + 1);
    Ok(value << (missing * 8))
}
