//! The DEX container format.
//!
//! Everything here reads the raw image directly: nothing is resolved into
//! objects. The IR crate builds on top of these views.

mod code_item;
mod constants;
mod debug_info;
mod encoded_value;
mod error;
mod header;
mod instruction;
mod iter;
mod map;
mod mutf8;
mod opcode;
mod reader;

pub use code_item::{
    CatchHandlerEntry, CatchHandlerIter, CodeItemAccessor, CodeItemLayout, CompactCodeItem,
    StandardCodeItem, TryItem, find_try_item,
};
pub use constants::{
    CHECKSUM_OFFSET, DEFAULT_METHODS_VERSION, ENDIAN_CONSTANT, HEADER_SIZE, MAGIC, NO_INDEX,
    REVERSE_ENDIAN_CONSTANT, SIGNATURE_END, SIGNATURE_OFFSET, SIGNATURE_SIZE, VERSIONS,
};
pub use debug_info::{
    DBG_ADVANCE_LINE, DBG_ADVANCE_PC, DBG_END_LOCAL, DBG_END_SEQUENCE, DBG_RESTART_LOCAL,
    DBG_SET_EPILOGUE_BEGIN, DBG_SET_FILE, DBG_SET_PROLOGUE_END, DBG_START_LOCAL,
    DBG_START_LOCAL_EXTENDED, debug_info_stream_size,
};
pub use encoded_value::{ValueHeader, ValueType, read_right_zero_extended, read_var_width};
pub use error::{DexError, ErrorKind, Result};
pub use header::{
    DiskHeader, compute_checksum, compute_signature, validate_magic, validate_version,
    verify_checksum, verify_signature,
};
pub use instruction::{
    ARRAY_DATA_SIGNATURE, Instruction, PACKED_SWITCH_SIGNATURE, SPARSE_SWITCH_SIGNATURE, VarArgs,
};
pub use iter::{InstructionIter, IterState, SafeInstructionIter};
pub use map::{MapItem, MapItemType, MapList};
pub use mutf8::{StringData, decode_lossy};
pub use opcode::{Format, INSTRUCTION_WIDTHS, IndexType, OPCODES, Opcode, OpcodeInfo};
pub use reader::{Cursor, DexBytes, DexReader};

#[cfg(test)]
mod code_item_tests;
#[cfg(test)]
mod debug_info_tests;
#[cfg(test)]
mod encoded_value_tests;
#[cfg(test)]
mod header_tests;
#[cfg(test)]
mod instructions_tests;
#[cfg(test)]
mod iter_tests;
#[cfg(test)]
mod map_tests;
#[cfg(test)]
mod mutf8_tests;
#[cfg(test)]
mod reader_tests;
