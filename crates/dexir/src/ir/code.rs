//! Method bodies: instructions, try blocks, handlers, debug info.

use dexir_format::format::{InstructionIter, SafeInstructionIter};

use super::refs::{DebugInfoRef, FieldRef, MethodRef, StringRef, TypeRef};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeItem {
    pub offset: Option<u32>,
    /// Bytes from the start of the item to the end of its handler data.
    pub size: u32,
    pub registers_size: u16,
    pub ins_size: u16,
    pub outs_size: u16,
    pub debug_info: Option<DebugInfoRef>,
    insns: Box<[u16]>,
    pub tries: Vec<TryItem>,
    pub handlers: Vec<CatchHandler>,
    /// Method whose class data first referenced this code.
    pub method: MethodRef,
    pub fixups: CodeFixups,
}

impl CodeItem {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        offset: Option<u32>,
        size: u32,
        registers_size: u16,
        ins_size: u16,
        outs_size: u16,
        debug_info: Option<DebugInfoRef>,
        insns: Vec<u16>,
        method: MethodRef,
    ) -> Self {
        Self {
            offset,
            size,
            registers_size,
            ins_size,
            outs_size,
            debug_info,
            insns: insns.into_boxed_slice(),
            tries: Vec::new(),
            handlers: Vec::new(),
            method,
            fixups: CodeFixups::default(),
        }
    }

    pub fn insns(&self) -> &[u16] {
        &self.insns
    }

    pub fn insns_size_in_code_units(&self) -> u32 {
        self.insns.len() as u32
    }

    pub fn tries_size(&self) -> u16 {
        self.tries.len() as u16
    }

    /// Swap in a new instruction buffer. The old one is returned; its
    /// length is never changed in place.
    pub fn replace_insns(&mut self, insns: Vec<u16>) -> Box<[u16]> {
        std::mem::replace(&mut self.insns, insns.into_boxed_slice())
    }

    pub fn instructions(&self) -> InstructionIter<'_> {
        InstructionIter::new(&self.insns)
    }

    pub fn safe_instructions(&self) -> SafeInstructionIter<'_> {
        SafeInstructionIter::new(&self.insns)
    }

    /// The try item covering `pc`. Try items are kept in disk order, which
    /// is sorted by start address.
    pub fn find_try_item(&self, pc: u32) -> Option<&TryItem> {
        let i = self.tries.partition_point(|t| t.end_addr() <= u64::from(pc));
        self.tries.get(i).filter(|t| t.start_addr <= pc)
    }

    pub fn handler(&self, try_item: &TryItem) -> &CatchHandler {
        &self.handlers[try_item.handler]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TryItem {
    pub start_addr: u32,
    pub insn_count: u16,
    /// Position in the owning code item's `handlers`.
    pub handler: usize,
}

impl TryItem {
    pub fn end_addr(&self) -> u64 {
        u64::from(self.start_addr) + u64::from(self.insn_count)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatchHandler {
    pub catch_all: bool,
    /// Offset of the list inside the handler data; identifies it.
    pub list_offset: u16,
    pub handlers: Vec<TypeAddrPair>,
}

/// One clause. `type_id` is `None` for the catch-all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeAddrPair {
    pub type_id: Option<TypeRef>,
    pub address: u32,
}

/// Byte-exact copy of a debug info stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugInfoItem {
    pub offset: Option<u32>,
    pub data: Box<[u8]>,
}

/// Ids referenced from a code item's instructions, sorted and unique.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeFixups {
    pub strings: Vec<StringRef>,
    pub types: Vec<TypeRef>,
    pub methods: Vec<MethodRef>,
    pub fields: Vec<FieldRef>,
}

impl CodeFixups {
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
            && self.types.is_empty()
            && self.methods.is_empty()
            && self.fields.is_empty()
    }
}

/// A method whose instruction stream ends in a truncated instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TruncatedCode {
    pub method: MethodRef,
    /// Code unit where decoding stopped.
    pub pc: u32,
}
