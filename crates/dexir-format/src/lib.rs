//! On-disk DEX format for dexir.
//!
//! This crate contains:
//! - Raw view over the image (`DexBytes`, `DexReader`, LEB128 cursor)
//! - Header decoding and validation, checksum and signature
//! - Map list, opcode table, instruction decoding and iteration
//! - Code item layouts (standard and compact) and catch handlers

pub mod format;

pub use format::{
    CatchHandlerEntry, CatchHandlerIter, CodeItemAccessor, CodeItemLayout, CompactCodeItem,
    Cursor, DexBytes, DexError, DexReader, DiskHeader, ErrorKind, Format, HEADER_SIZE, IndexType,
    Instruction, InstructionIter, IterState, MAGIC, MapItem, MapItemType, MapList, NO_INDEX,
    Opcode, Result, SafeInstructionIter, StandardCodeItem, StringData, TryItem, VERSIONS,
    ValueHeader, ValueType, validate_magic, validate_version,
};
