//! Decoding of a single instruction.
//!
//! An [`Instruction`] is a view over the code units starting at one
//! instruction. Accessors read operands in place; they trust the view to be
//! long enough, so a truncated stream must be caught by the safe iterator
//! before anything is decoded.

use super::opcode::{Format, IndexType, Opcode};

/// Payload signatures carried in the first code unit of a `nop`.
pub const PACKED_SWITCH_SIGNATURE: u16 = 0x0100;
pub const SPARSE_SWITCH_SIGNATURE: u16 = 0x0200;
pub const ARRAY_DATA_SIGNATURE: u16 = 0x0300;

#[derive(Clone, Copy, Debug)]
pub struct Instruction<'a> {
    units: &'a [u16],
}

/// Register list of a 35c / 45cc instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VarArgs {
    count: usize,
    regs: [u16; 5],
}

impl VarArgs {
    pub fn as_slice(&self) -> &[u16] {
        &self.regs[..self.count]
    }
}

impl<'a> Instruction<'a> {
    /// View the instruction at `pc` in `insns`.
    ///
    /// Panics if `pc` is not inside `insns`.
    pub fn at(insns: &'a [u16], pc: usize) -> Self {
        assert!(pc < insns.len(), "instruction pc {pc} past end of code");
        Self { units: &insns[pc..] }
    }

    #[inline]
    fn fetch16(&self, i: usize) -> u16 {
        self.units[i]
    }

    #[inline]
    fn fetch32(&self, i: usize) -> u32 {
        u32::from(self.fetch16(i)) | (u32::from(self.fetch16(i + 1)) << 16)
    }

    #[inline]
    fn inst_data(&self) -> u16 {
        self.fetch16(0)
    }

    fn inst_a_4(&self) -> u32 {
        u32::from((self.inst_data() >> 8) & 0x0f)
    }

    fn inst_b_4(&self) -> u32 {
        u32::from(self.inst_data() >> 12)
    }

    fn inst_aa(&self) -> u32 {
        u32::from(self.inst_data() >> 8)
    }

    pub fn opcode(&self) -> Opcode {
        Opcode((self.inst_data() & 0xff) as u8)
    }

    pub fn format(&self) -> Format {
        self.opcode().format()
    }

    pub fn index_type(&self) -> IndexType {
        self.opcode().index_type()
    }

    pub fn name(&self) -> &'static str {
        self.opcode().name()
    }

    /// True for switch and array-data payloads, which are data, not code.
    pub fn is_payload(&self) -> bool {
        self.opcode() == Opcode::NOP
            && matches!(
                self.inst_data(),
                PACKED_SWITCH_SIGNATURE | SPARSE_SWITCH_SIGNATURE | ARRAY_DATA_SIGNATURE
            )
    }

    /// Code units that must be readable before [`size_in_code_units`] can be
    /// computed.
    ///
    /// [`size_in_code_units`]: Self::size_in_code_units
    pub fn code_units_required_for_size_computation(&self) -> usize {
        if self.opcode() != Opcode::NOP {
            return 1;
        }
        match self.inst_data() {
            PACKED_SWITCH_SIGNATURE | SPARSE_SWITCH_SIGNATURE => 2,
            ARRAY_DATA_SIGNATURE => 4,
            _ => 1,
        }
    }

    /// Total length of this instruction, payloads included.
    pub fn size_in_code_units(&self) -> usize {
        match self.opcode().width() {
            0 => self.payload_size(),
            width => width as usize,
        }
    }

    fn payload_size(&self) -> usize {
        match self.inst_data() {
            PACKED_SWITCH_SIGNATURE => 4 + self.fetch16(1) as usize * 2,
            SPARSE_SWITCH_SIGNATURE => 2 + self.fetch16(1) as usize * 4,
            ARRAY_DATA_SIGNATURE => {
                let element_width = u64::from(self.fetch16(1));
                let length = u64::from(self.fetch32(2));
                4 + ((element_width * length + 1) / 2) as usize
            }
            _ => 1,
        }
    }

    /// Operand A, when the format has one.
    pub fn vreg_a(&self) -> Option<u32> {
        let a = match self.format() {
            Format::F10x => return None,
            Format::F11n | Format::F12x | Format::F22c | Format::F22s | Format::F22t => {
                self.inst_a_4()
            }
            Format::F35c | Format::F45cc => self.inst_b_4(),
            Format::F20t | Format::F32x => u32::from(self.fetch16(1)),
            Format::F30t => self.fetch32(1),
            Format::F10t
            | Format::F11x
            | Format::F21c
            | Format::F21h
            | Format::F21s
            | Format::F21t
            | Format::F22b
            | Format::F22x
            | Format::F23x
            | Format::F31c
            | Format::F31i
            | Format::F31t
            | Format::F3rc
            | Format::F4rcc
            | Format::F51l => self.inst_aa(),
        };
        Some(a)
    }

    /// Operand B, when the format has a 32-bit-or-narrower one.
    pub fn vreg_b(&self) -> Option<u32> {
        let b = match self.format() {
            Format::F11n | Format::F12x | Format::F22c | Format::F22s | Format::F22t => {
                self.inst_b_4()
            }
            Format::F21c
            | Format::F21h
            | Format::F21s
            | Format::F21t
            | Format::F22x
            | Format::F35c
            | Format::F3rc
            | Format::F45cc
            | Format::F4rcc => u32::from(self.fetch16(1)),
            Format::F22b | Format::F23x => u32::from(self.fetch16(1) & 0xff),
            Format::F31c | Format::F31i | Format::F31t => self.fetch32(1),
            Format::F32x => u32::from(self.fetch16(2)),
            _ => return None,
        };
        Some(b)
    }

    /// The 64-bit literal of `const-wide` (51l).
    pub fn wide_vreg_b(&self) -> Option<u64> {
        (self.format() == Format::F51l)
            .then(|| u64::from(self.fetch32(1)) | (u64::from(self.fetch32(3)) << 32))
    }

    pub fn vreg_c(&self) -> Option<u32> {
        let c = match self.format() {
            Format::F22b | Format::F23x => u32::from(self.fetch16(1) >> 8),
            Format::F22c | Format::F22s | Format::F22t => u32::from(self.fetch16(1)),
            Format::F3rc | Format::F4rcc => u32::from(self.fetch16(2)),
            Format::F35c | Format::F45cc => u32::from(self.fetch16(2) & 0x0f),
            _ => return None,
        };
        Some(c)
    }

    /// Proto index of invoke-polymorphic.
    pub fn vreg_h(&self) -> Option<u32> {
        matches!(self.format(), Format::F45cc | Format::F4rcc).then(|| u32::from(self.fetch16(3)))
    }

    /// Argument registers of a 35c / 45cc instruction.
    pub fn var_args(&self) -> Option<VarArgs> {
        if !matches!(self.format(), Format::F35c | Format::F45cc) {
            return None;
        }
        let count = (self.inst_b_4() as usize).min(5);
        let regs_word = self.fetch16(2);
        let regs = [
            regs_word & 0x0f,
            (regs_word >> 4) & 0x0f,
            (regs_word >> 8) & 0x0f,
            (regs_word >> 12) & 0x0f,
            self.inst_a_4() as u16,
        ];
        Some(VarArgs { count, regs })
    }

    /// The pool index embedded in the instruction, for index-bearing formats.
    pub fn index(&self) -> Option<u32> {
        if self.index_type() == IndexType::None {
            return None;
        }
        match self.format() {
            Format::F21c | Format::F31c | Format::F35c | Format::F3rc | Format::F45cc
            | Format::F4rcc => self.vreg_b(),
            Format::F22c => self.vreg_c(),
            _ => None,
        }
    }
}
