//! Modified UTF-8 as stored in string data items.

use super::error::Result;
use super::reader::DexReader;

/// A string data item: declared UTF-16 length and the raw MUTF-8 bytes
/// (without the trailing NUL).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StringData<'a> {
    pub utf16_size: u32,
    pub data: &'a [u8],
}

impl<'a> StringData<'a> {
    pub fn parse(reader: &DexReader<'a>, offset: usize) -> Result<Self> {
        let mut c = reader.cursor(offset)?;
        let utf16_size = c.read_uleb128()?;
        let data = c.read_until_nul()?;
        Ok(Self { utf16_size, data })
    }

    /// Bytes occupied on disk, including the length prefix and the NUL.
    pub fn disk_size(&self) -> usize {
        uleb128_len(self.utf16_size) + self.data.len() + 1
    }
}

fn uleb128_len(mut v: u32) -> usize {
    let mut n = 1;
    while v >= 0x80 {
        v >>= 7;
        n += 1;
    }
    n
}

/// Decode MUTF-8 into a `String`, replacing malformed sequences.
///
/// Handles the two-byte NUL (`C0 80`) and surrogate pairs encoded as two
/// three-byte sequences.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b0 = bytes[i];
        let cont = |k: usize| bytes.get(i + k).copied().filter(|b| b & 0xc0 == 0x80);
        if b0 < 0x80 {
            units.push(u16::from(b0));
            i += 1;
        } else if b0 & 0xe0 == 0xc0 {
            match cont(1) {
                Some(b1) => {
                    units.push((u16::from(b0 & 0x1f) << 6) | u16::from(b1 & 0x3f));
                    i += 2;
                }
                None => {
                    units.push(0xfffd);
                    i += 1;
                }
            }
        } else if b0 & 0xf0 == 0xe0 {
            match (cont(1), cont(2)) {
                (Some(b1), Some(b2)) => {
                    units.push(
                        (u16::from(b0 & 0x0f) << 12)
                            | (u16::from(b1 & 0x3f) << 6)
                            | u16::from(b2 & 0x3f),
                    );
                    i += 3;
                }
                _ => {
                    units.push(0xfffd);
                    i += 1;
                }
            }
        } else {
            units.push(0xfffd);
            i += 1;
        }
    }
    String::from_utf16_lossy(&units)
}
