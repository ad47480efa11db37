//! Code item layouts and a uniform accessor over them.
//!
//! Standard code items have a fixed 16-byte header. Compact code items pack
//! the four small counts into nibbles and spill larger values into
//! "pre-header" words stored just before the item.

use super::error::{DexError, Result};
use super::iter::{InstructionIter, SafeInstructionIter};
use super::reader::{Cursor, DexReader};

/// Read path shared by both on-disk code item layouts.
pub trait CodeItemLayout {
    fn registers_size(&self) -> u16;
    fn ins_size(&self) -> u16;
    fn outs_size(&self) -> u16;
    fn tries_size(&self) -> u16;
    fn debug_info_off(&self) -> u32;
    fn insns_size_in_code_units(&self) -> u32;
    /// Absolute byte offset of the first instruction.
    fn insns_off(&self) -> usize;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StandardCodeItem {
    pub offset: usize,
    pub registers_size: u16,
    pub ins_size: u16,
    pub outs_size: u16,
    pub tries_size: u16,
    pub debug_info_off: u32,
    pub insns_size: u32,
}

impl StandardCodeItem {
    pub const HEADER_SIZE: usize = 16;

    pub fn parse(reader: &DexReader<'_>, offset: usize) -> Result<Self> {
        let b = reader.slice(offset, Self::HEADER_SIZE, "code item")?;
        Ok(Self {
            offset,
            registers_size: u16::from_le_bytes([b[0], b[1]]),
            ins_size: u16::from_le_bytes([b[2], b[3]]),
            outs_size: u16::from_le_bytes([b[4], b[5]]),
            tries_size: u16::from_le_bytes([b[6], b[7]]),
            debug_info_off: u32::from_le_bytes([b[8], b[9], b[10], b[11]]),
            insns_size: u32::from_le_bytes([b[12], b[13], b[14], b[15]]),
        })
    }
}

impl CodeItemLayout for StandardCodeItem {
    fn registers_size(&self) -> u16 {
        self.registers_size
    }

    fn ins_size(&self) -> u16 {
        self.ins_size
    }

    fn outs_size(&self) -> u16 {
        self.outs_size
    }

    fn tries_size(&self) -> u16 {
        self.tries_size
    }

    fn debug_info_off(&self) -> u32 {
        self.debug_info_off
    }

    fn insns_size_in_code_units(&self) -> u32 {
        self.insns_size
    }

    fn insns_off(&self) -> usize {
        self.offset + Self::HEADER_SIZE
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompactCodeItem {
    pub offset: usize,
    registers_size: u16,
    ins_size: u16,
    outs_size: u16,
    tries_size: u16,
    insns_size: u32,
    debug_info_off: u32,
}

impl CompactCodeItem {
    pub const HEADER_SIZE: usize = 4;

    const REGISTERS_SHIFT: u16 = 12;
    const INS_SHIFT: u16 = 8;
    const OUTS_SHIFT: u16 = 4;
    const INSNS_SHIFT: u16 = 5;

    pub const FLAG_REGISTERS: u16 = 1 << 0;
    pub const FLAG_INS: u16 = 1 << 1;
    pub const FLAG_OUTS: u16 = 1 << 2;
    pub const FLAG_TRIES: u16 = 1 << 3;
    pub const FLAG_INSNS: u16 = 1 << 4;
    const FLAGS_MASK: u16 = 0x1f;

    /// Decode the item at `offset`. Compact items keep their debug info
    /// offset outside the item, so the caller supplies it.
    pub fn parse(reader: &DexReader<'_>, offset: usize, debug_info_off: u32) -> Result<Self> {
        let fields = reader.u16_at(offset)?;
        let insns_count_and_flags = reader.u16_at(offset + 2)?;

        let mut insns_size = u32::from(insns_count_and_flags >> Self::INSNS_SHIFT);
        let mut registers_size = (fields >> Self::REGISTERS_SHIFT) & 0xf;
        let mut ins_size = (fields >> Self::INS_SHIFT) & 0xf;
        let mut outs_size = (fields >> Self::OUTS_SHIFT) & 0xf;
        let mut tries_size = fields & 0xf;

        if insns_count_and_flags & Self::FLAGS_MASK != 0 {
            // Pre-header words are consumed walking backwards from the item.
            let mut pre = offset;
            let mut prev = |what: &'static str| -> Result<u16> {
                pre = pre
                    .checked_sub(2)
                    .ok_or_else(|| DexError::out_of_bounds(what, 0, 2, reader.len()))?;
                reader.u16_at(pre)
            };
            if insns_count_and_flags & Self::FLAG_INSNS != 0 {
                insns_size += u32::from(prev("code item pre-header")?);
                insns_size += u32::from(prev("code item pre-header")?) << 16;
            }
            if insns_count_and_flags & Self::FLAG_REGISTERS != 0 {
                registers_size = registers_size.wrapping_add(prev("code item pre-header")?);
            }
            if insns_count_and_flags & Self::FLAG_INS != 0 {
                ins_size = ins_size.wrapping_add(prev("code item pre-header")?);
            }
            if insns_count_and_flags & Self::FLAG_OUTS != 0 {
                outs_size = outs_size.wrapping_add(prev("code item pre-header")?);
            }
            if insns_count_and_flags & Self::FLAG_TRIES != 0 {
                tries_size = tries_size.wrapping_add(prev("code item pre-header")?);
            }
        }

        Ok(Self {
            offset,
            registers_size: registers_size.wrapping_add(ins_size),
            ins_size,
            outs_size,
            tries_size,
            insns_size,
            debug_info_off,
        })
    }
}

impl CodeItemLayout for CompactCodeItem {
    fn registers_size(&self) -> u16 {
        self.registers_size
    }

    fn ins_size(&self) -> u16 {
        self.ins_size
    }

    fn outs_size(&self) -> u16 {
        self.outs_size
    }

    fn tries_size(&self) -> u16 {
        self.tries_size
    }

    fn debug_info_off(&self) -> u32 {
        self.debug_info_off
    }

    fn insns_size_in_code_units(&self) -> u32 {
        self.insns_size
    }

    fn insns_off(&self) -> usize {
        self.offset + Self::HEADER_SIZE
    }
}

/// One try block: `[start_addr, start_addr + insn_count)` in code units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TryItem {
    pub start_addr: u32,
    pub insn_count: u16,
    /// Byte offset of the handler list, relative to the handler data.
    pub handler_off: u16,
}

impl TryItem {
    pub const SIZE: usize = 8;

    /// Exclusive end, widened so a corrupt `start_addr` cannot wrap.
    pub fn end_addr(&self) -> u64 {
        u64::from(self.start_addr) + u64::from(self.insn_count)
    }

    fn from_bytes(b: &[u8]) -> Self {
        Self {
            start_addr: u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            insn_count: u16::from_le_bytes([b[4], b[5]]),
            handler_off: u16::from_le_bytes([b[6], b[7]]),
        }
    }
}

/// Counts and instructions of one code item, decoded once.
#[derive(Clone, Debug)]
pub struct CodeItemAccessor<'a> {
    reader: DexReader<'a>,
    pub registers_size: u16,
    pub ins_size: u16,
    pub outs_size: u16,
    pub tries_size: u16,
    pub debug_info_off: u32,
    insns_off: usize,
    insns: Vec<u16>,
}

impl<'a> CodeItemAccessor<'a> {
    pub fn new(reader: DexReader<'a>, layout: &impl CodeItemLayout) -> Result<Self> {
        let insns_off = layout.insns_off();
        let insns_len = layout.insns_size_in_code_units() as usize;
        let raw = reader.slice(
            insns_off,
            insns_len.checked_mul(2).unwrap_or(usize::MAX),
            "instructions",
        )?;
        let insns = raw
            .chunks_exact(2)
            .map(|u| u16::from_le_bytes([u[0], u[1]]))
            .collect();

        Ok(Self {
            reader,
            registers_size: layout.registers_size(),
            ins_size: layout.ins_size(),
            outs_size: layout.outs_size(),
            tries_size: layout.tries_size(),
            debug_info_off: layout.debug_info_off(),
            insns_off,
            insns,
        })
    }

    /// Accessor for a standard code item at `offset`.
    pub fn standard(reader: DexReader<'a>, offset: usize) -> Result<Self> {
        let layout = StandardCodeItem::parse(&reader, offset)?;
        Self::new(reader, &layout)
    }

    pub fn insns(&self) -> &[u16] {
        &self.insns
    }

    pub fn into_insns(self) -> Vec<u16> {
        self.insns
    }

    pub fn insns_size_in_code_units(&self) -> u32 {
        self.insns.len() as u32
    }

    pub fn has_code(&self) -> bool {
        !self.insns.is_empty()
    }

    pub fn instructions(&self) -> InstructionIter<'_> {
        InstructionIter::new(&self.insns)
    }

    pub fn safe_instructions(&self) -> SafeInstructionIter<'_> {
        SafeInstructionIter::new(&self.insns)
    }

    fn insns_end(&self) -> usize {
        self.insns_off + self.insns.len() * 2
    }

    /// Byte offset of the try items (4-byte aligned after the instructions).
    pub fn tries_off(&self) -> usize {
        (self.insns_end() + 3) & !3
    }

    /// Byte offset of the encoded catch handler list.
    pub fn handler_data_off(&self) -> usize {
        self.tries_off() + usize::from(self.tries_size) * TryItem::SIZE
    }

    /// Try items in disk order, decoded lazily.
    pub fn try_items(&self) -> Result<impl Iterator<Item = TryItem> + use<'a>> {
        let raw = self.reader.slice(
            self.tries_off(),
            usize::from(self.tries_size) * TryItem::SIZE,
            "try items",
        )?;
        Ok(raw.chunks_exact(TryItem::SIZE).map(TryItem::from_bytes))
    }

    /// The try item covering `pc`. Try items must be sorted by start address.
    pub fn find_try_item(&self, pc: u32) -> Result<Option<TryItem>> {
        let tries: Vec<TryItem> = self.try_items()?.collect();
        Ok(find_try_item(&tries, pc).map(|i| tries[i]))
    }

    /// Handlers of the list at `handler_off` (relative to the handler data).
    pub fn catch_handlers(&self, handler_off: u16) -> Result<CatchHandlerIter<'a>> {
        CatchHandlerIter::new(
            &self.reader,
            self.handler_data_off() + usize::from(handler_off),
        )
    }

    /// Raw bytes from the start of the handler lists to the end of the
    /// image. Empty when there are no try items.
    pub fn catch_handler_data(&self) -> Result<&'a [u8]> {
        if self.tries_size == 0 {
            return Ok(&[]);
        }
        let start = self.handler_data_off();
        let len = self.reader.len().saturating_sub(start);
        self.reader.slice(start, len, "catch handler data")
    }

    /// Byte length of the whole item, from `item_off` to the end of the
    /// instructions or, with tries, to the end of the handler lists.
    pub fn code_item_size(&self, item_off: usize) -> Result<usize> {
        if self.tries_size == 0 {
            return Ok(self.insns_end() - item_off);
        }
        let mut cursor = self.reader.cursor(self.handler_data_off())?;
        let lists = cursor.read_uleb128()?;
        for _ in 0..lists {
            let mut handlers = CatchHandlerIter::from_cursor(cursor)?;
            for handler in handlers.by_ref() {
                handler?;
            }
            cursor = handlers.into_cursor();
        }
        Ok(cursor.position() - item_off)
    }
}

/// Binary search over sorted try items, returning the index covering `pc`.
pub fn find_try_item(tries: &[TryItem], pc: u32) -> Option<usize> {
    let (mut min, mut max) = (0usize, tries.len());
    while min < max {
        let mid = (min + max) / 2;
        let item = &tries[mid];
        if pc < item.start_addr {
            max = mid;
        } else if u64::from(pc) >= item.end_addr() {
            min = mid + 1;
        } else {
            return Some(mid);
        }
    }
    None
}

/// One catch clause. `type_idx` is `None` for the catch-all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatchHandlerEntry {
    pub type_idx: Option<u32>,
    pub address: u32,
}

/// Walks one encoded handler list: the typed clauses, then the catch-all.
#[derive(Clone, Debug)]
pub struct CatchHandlerIter<'a> {
    cursor: Cursor<'a>,
    remaining: u32,
    has_catch_all: bool,
    catch_all_pending: bool,
    failed: bool,
}

impl<'a> CatchHandlerIter<'a> {
    pub fn new(reader: &DexReader<'a>, offset: usize) -> Result<Self> {
        Self::from_cursor(reader.cursor(offset)?)
    }

    fn from_cursor(mut cursor: Cursor<'a>) -> Result<Self> {
        let size = cursor.read_sleb128()?;
        Ok(Self {
            cursor,
            remaining: size.unsigned_abs(),
            has_catch_all: size <= 0,
            catch_all_pending: size <= 0,
            failed: false,
        })
    }

    pub fn has_catch_all(&self) -> bool {
        self.has_catch_all
    }

    /// Byte offset just past what has been decoded so far.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    fn into_cursor(self) -> Cursor<'a> {
        self.cursor
    }

    fn read_entry(&mut self) -> Result<CatchHandlerEntry> {
        if self.remaining > 0 {
            self.remaining -= 1;
            let type_idx = self.cursor.read_uleb128()?;
            let address = self.cursor.read_uleb128()?;
            return Ok(CatchHandlerEntry {
                type_idx: Some(type_idx),
                address,
            });
        }
        self.catch_all_pending = false;
        let address = self.cursor.read_uleb128()?;
        Ok(CatchHandlerEntry {
            type_idx: None,
            address,
        })
    }
}

impl Iterator for CatchHandlerIter<'_> {
    type Item = Result<CatchHandlerEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || (self.remaining == 0 && !self.catch_all_pending) {
            return None;
        }
        let entry = self.read_entry();
        self.failed = entry.is_err();
        Some(entry)
    }
}
