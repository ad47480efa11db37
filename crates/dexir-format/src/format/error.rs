use std::io;

use super::map::MapItemType;

/// DEX decode error.
#[derive(Debug, thiserror::Error)]
pub enum DexError {
    #[error("file too small: {0} bytes (minimum 112)")]
    FileTooSmall(usize),
    #[error("invalid magic: expected \"dex\\n\"")]
    InvalidMagic,
    #[error("unsupported version: {0:?}")]
    UnsupportedVersion(String),
    #[error("unsupported endian tag: {0:#010x}")]
    BadEndianTag(u32),
    #[error("header size is {0:#x}, expected 0x70")]
    BadHeaderSize(u32),
    #[error("{what} out of bounds: offset {offset:#x}, length {len}, file is {size} bytes")]
    OutOfBounds {
        what: &'static str,
        offset: usize,
        len: usize,
        size: usize,
    },
    #[error("malformed LEB128 at offset {0:#x}")]
    BadLeb128(usize),
    #[error("{kind} index {index} out of range (count {count})")]
    IndexOutOfRange {
        kind: &'static str,
        index: u32,
        count: u32,
    },
    #[error("map entry {item}: {field} is {found:#x}, expected {expected:#x}")]
    MapMismatch {
        item: MapItemType,
        field: &'static str,
        expected: u32,
        found: u32,
    },
    #[error("unknown map item type {0:#06x}")]
    UnknownMapItemType(u16),
    #[error("map list is missing")]
    MissingMapList,
    #[error("bad encoded value type {value_type:#04x} at offset {offset:#x}")]
    BadEncodedValue { value_type: u8, offset: usize },
    #[error("bad method handle type {0}")]
    BadMethodHandleType(u16),
    #[error("checksum mismatch: header says {expected:#010x}, computed {found:#010x}")]
    ChecksumMismatch { expected: u32, found: u32 },
    #[error("signature mismatch")]
    SignatureMismatch,
    #[error("size mismatch: header says {header} bytes, got {actual}")]
    FileSizeMismatch { header: u32, actual: usize },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Coarse classification of a [`DexError`].
///
/// Lets a consumer tell "not a DEX file at all" apart from "a DEX file
/// that is broken".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotDex,
    UnsupportedVersion,
    Corrupt,
    Io,
}

impl DexError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DexError::FileTooSmall(_) | DexError::InvalidMagic => ErrorKind::NotDex,
            DexError::UnsupportedVersion(_) => ErrorKind::UnsupportedVersion,
            DexError::Io(_) => ErrorKind::Io,
            _ => ErrorKind::Corrupt,
        }
    }

    pub(crate) fn out_of_bounds(what: &'static str, offset: usize, len: usize, size: usize) -> Self {
        DexError::OutOfBounds {
            what,
            offset,
            len,
            size,
        }
    }
}

pub type Result<T> = std::result::Result<T, DexError>;
