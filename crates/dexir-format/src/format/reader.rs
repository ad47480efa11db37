//! Bounds-checked access to the raw DEX image.
//!
//! Every read is checked against the buffer length and fails with
//! [`DexError::OutOfBounds`] instead of panicking.

use std::borrow::Cow;
use std::ops::Deref;

use super::error::{DexError, Result};

/// Storage for DEX bytes: owned, or borrowed from a mapping the caller keeps alive.
#[derive(Debug, Clone)]
pub struct DexBytes<'a>(Cow<'a, [u8]>);

impl Deref for DexBytes<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> DexBytes<'a> {
    /// Create from owned bytes.
    pub fn from_vec(bytes: Vec<u8>) -> DexBytes<'static> {
        DexBytes(Cow::Owned(bytes))
    }

    /// Borrow existing bytes (e.g. a memory map).
    pub fn from_slice(bytes: &'a [u8]) -> Self {
        Self(Cow::Borrowed(bytes))
    }

    pub fn reader(&self) -> DexReader<'_> {
        DexReader::new(&self.0)
    }
}

/// Little-endian reads at absolute offsets.
#[derive(Clone, Copy, Debug)]
pub struct DexReader<'a> {
    bytes: &'a [u8],
}

impl<'a> DexReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn slice(&self, offset: usize, len: usize, what: &'static str) -> Result<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.bytes.get(offset..end))
            .ok_or_else(|| DexError::out_of_bounds(what, offset, len, self.bytes.len()))
    }

    /// Borrow `count` fixed-size records of `item_size` bytes each.
    pub fn table(
        &self,
        offset: u32,
        count: u32,
        item_size: usize,
        what: &'static str,
    ) -> Result<&'a [u8]> {
        let len = (count as usize)
            .checked_mul(item_size)
            .ok_or_else(|| DexError::out_of_bounds(what, offset as usize, usize::MAX, self.len()))?;
        self.slice(offset as usize, len, what)
    }

    pub fn u8_at(&self, offset: usize) -> Result<u8> {
        Ok(self.slice(offset, 1, "u8")?[0])
    }

    pub fn u16_at(&self, offset: usize) -> Result<u16> {
        let b = self.slice(offset, 2, "u16")?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn u32_at(&self, offset: usize) -> Result<u32> {
        let b = self.slice(offset, 4, "u32")?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Start a sequential cursor at `offset`. `offset == len` is allowed.
    pub fn cursor(&self, offset: usize) -> Result<Cursor<'a>> {
        if offset > self.bytes.len() {
            return Err(DexError::out_of_bounds("cursor", offset, 0, self.bytes.len()));
        }
        Ok(Cursor {
            bytes: self.bytes,
            pos: offset,
        })
    }
}

/// Sequential reader over the image, tracking an absolute position.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let out = DexReader::new(self.bytes).slice(self.pos, n, "data")?;
        self.pos += n;
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let b = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let b = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Unsigned LEB128, at most 5 bytes.
    pub fn read_uleb128(&mut self) -> Result<u32> {
        let start = self.pos;
        let mut result = 0u32;
        for i in 0..5 {
            let byte = self.read_u8()?;
            result |= u32::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(DexError::BadLeb128(start))
    }

    /// Signed LEB128, at most 5 bytes.
    pub fn read_sleb128(&mut self) -> Result<i32> {
        let start = self.pos;
        let mut result = 0i32;
        let mut shift = 0u32;
        for _ in 0..5 {
            let byte = self.read_u8()?;
            result |= i32::from(byte & 0x7f) << shift;
            shift += 7;
            if byte & 0x80 == 0 {
                if shift < 32 && byte & 0x40 != 0 {
                    result |= -1i32 << shift;
                }
                return Ok(result);
            }
        }
        Err(DexError::BadLeb128(start))
    }

    /// ULEB128 biased by one: an encoded 0 means "no index".
    pub fn read_uleb128p1(&mut self) -> Result<Option<u32>> {
        Ok(self.read_uleb128()?.checked_sub(1))
    }

    /// Read up to and excluding the next NUL, consuming the NUL.
    pub fn read_until_nul(&mut self) -> Result<&'a [u8]> {
        let rest = self.bytes.get(self.pos..).unwrap_or_default();
        let Some(len) = rest.iter().position(|&b| b == 0) else {
            return Err(DexError::out_of_bounds(
                "string data",
                self.pos,
                rest.len() + 1,
                self.bytes.len(),
            ));
        };
        let out = &rest[..len];
        self.pos += len + 1;
        Ok(out)
    }
}
