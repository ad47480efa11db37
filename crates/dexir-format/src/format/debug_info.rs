//! Debug info streams: a header followed by state machine opcodes.

use super::error::Result;
use super::reader::DexReader;

pub const DBG_END_SEQUENCE: u8 = 0x00;
pub const DBG_ADVANCE_PC: u8 = 0x01;
pub const DBG_ADVANCE_LINE: u8 = 0x02;
pub const DBG_START_LOCAL: u8 = 0x03;
pub const DBG_START_LOCAL_EXTENDED: u8 = 0x04;
pub const DBG_END_LOCAL: u8 = 0x05;
pub const DBG_RESTART_LOCAL: u8 = 0x06;
pub const DBG_SET_PROLOGUE_END: u8 = 0x07;
pub const DBG_SET_EPILOGUE_BEGIN: u8 = 0x08;
pub const DBG_SET_FILE: u8 = 0x09;

/// Byte length of the debug info stream at `offset`, up to and including
/// `DBG_END_SEQUENCE`. Opcodes 0x0a..=0xff are single-byte special opcodes.
pub fn debug_info_stream_size(reader: &DexReader<'_>, offset: usize) -> Result<usize> {
    let mut c = reader.cursor(offset)?;
    c.read_uleb128()?; // line_start
    let parameters_size = c.read_uleb128()?;
    for _ in 0..parameters_size {
        c.read_uleb128p1()?;
    }

    loop {
        match c.read_u8()? {
            DBG_END_SEQUENCE => return Ok(c.position() - offset),
            DBG_ADVANCE_PC | DBG_END_LOCAL | DBG_RESTART_LOCAL => {
                c.read_uleb128()?;
            }
            DBG_ADVANCE_LINE => {
                c.read_sleb128()?;
            }
            DBG_START_LOCAL => {
                c.read_uleb128()?;
                c.read_uleb128p1()?;
                c.read_uleb128p1()?;
            }
            DBG_START_LOCAL_EXTENDED => {
                c.read_uleb128()?;
                c.read_uleb128p1()?;
                c.read_uleb128p1()?;
                c.read_uleb128p1()?;
            }
            DBG_SET_FILE => {
                c.read_uleb128p1()?;
            }
            _ => {}
        }
    }
}
