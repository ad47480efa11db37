//! The root of a built IR graph.

use dexir_format::format::{DiskHeader, SIGNATURE_SIZE};

use super::code::TruncatedCode;
use super::collections::Collections;

/// A parsed DEX image: header fields plus every section.
#[derive(Debug, Clone)]
pub struct Header {
    pub magic: [u8; 8],
    pub checksum: u32,
    pub signature: [u8; SIGNATURE_SIZE],
    pub endian_tag: u32,
    pub file_size: u32,
    pub header_size: u32,
    pub link_size: u32,
    pub link_offset: u32,
    pub data_size: u32,
    pub data_offset: u32,
    pub support_default_methods: bool,
    pub(crate) collections: Collections,
    pub(crate) truncated: Vec<TruncatedCode>,
}

impl Header {
    pub(crate) fn from_disk(disk: &DiskHeader) -> Self {
        Self {
            magic: disk.magic,
            checksum: disk.checksum,
            signature: disk.signature,
            endian_tag: disk.endian_tag,
            file_size: disk.file_size,
            header_size: disk.header_size,
            link_size: disk.link_size,
            link_offset: disk.link_off,
            data_size: disk.data_size,
            data_offset: disk.data_off,
            support_default_methods: disk.supports_default_methods(),
            collections: Collections::default(),
            truncated: Vec::new(),
        }
    }

    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    /// Mutable access for instruction patching.
    pub fn collections_mut(&mut self) -> &mut Collections {
        &mut self.collections
    }

    /// Methods whose instruction stream could not be fully decoded.
    pub fn truncated_code(&self) -> &[TruncatedCode] {
        &self.truncated
    }

    /// Version digits from the magic, e.g. "035".
    pub fn version(&self) -> String {
        let raw = &self.magic[4..8];
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        String::from_utf8_lossy(&raw[..end]).into_owned()
    }
}
