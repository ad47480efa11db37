//! DEX file header (0x70 bytes).
//!
//! Layout:
//! - 0x00-0x1f: magic, checksum, signature
//! - 0x20-0x37: file/header size, endian tag, link data, map offset
//! - 0x38-0x6f: (size, offset) pairs for the six id tables and the data section

use sha1::{Digest, Sha1};

use super::constants::{
    DEFAULT_METHODS_VERSION, ENDIAN_CONSTANT, HEADER_SIZE, MAGIC, SIGNATURE_END, SIGNATURE_OFFSET,
    SIGNATURE_SIZE, VERSIONS,
};
use super::error::{DexError, Result};

/// The fixed-layout disk header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiskHeader {
    /// `dex\n` followed by a NUL-terminated 3-digit version.
    pub magic: [u8; 8],
    /// Adler-32 of everything after this field.
    pub checksum: u32,
    /// SHA-1 of everything after this field.
    pub signature: [u8; SIGNATURE_SIZE],
    pub file_size: u32,
    pub header_size: u32,
    pub endian_tag: u32,
    pub link_size: u32,
    pub link_off: u32,
    pub map_off: u32,
    pub string_ids_size: u32,
    pub string_ids_off: u32,
    pub type_ids_size: u32,
    pub type_ids_off: u32,
    pub proto_ids_size: u32,
    pub proto_ids_off: u32,
    pub field_ids_size: u32,
    pub field_ids_off: u32,
    pub method_ids_size: u32,
    pub method_ids_off: u32,
    pub class_defs_size: u32,
    pub class_defs_off: u32,
    pub data_size: u32,
    pub data_off: u32,
}

#[inline]
fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// True when the first 4 bytes are `dex\n`.
pub fn validate_magic(bytes: &[u8]) -> bool {
    bytes.get(..4) == Some(&MAGIC[..])
}

/// True when bytes 4..8 are one of the supported version strings.
pub fn validate_version(bytes: &[u8]) -> bool {
    bytes
        .get(4..8)
        .is_some_and(|v| VERSIONS.iter().any(|known| known[..] == *v))
}

impl DiskHeader {
    /// Decode header from the first 0x70 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert!(bytes.len() >= HEADER_SIZE, "header too short");

        let mut magic = [0u8; 8];
        magic.copy_from_slice(&bytes[0..8]);
        let mut signature = [0u8; SIGNATURE_SIZE];
        signature.copy_from_slice(&bytes[SIGNATURE_OFFSET..SIGNATURE_END]);

        Self {
            magic,
            checksum: u32_at(bytes, 0x08),
            signature,
            file_size: u32_at(bytes, 0x20),
            header_size: u32_at(bytes, 0x24),
            endian_tag: u32_at(bytes, 0x28),
            link_size: u32_at(bytes, 0x2c),
            link_off: u32_at(bytes, 0x30),
            map_off: u32_at(bytes, 0x34),
            string_ids_size: u32_at(bytes, 0x38),
            string_ids_off: u32_at(bytes, 0x3c),
            type_ids_size: u32_at(bytes, 0x40),
            type_ids_off: u32_at(bytes, 0x44),
            proto_ids_size: u32_at(bytes, 0x48),
            proto_ids_off: u32_at(bytes, 0x4c),
            field_ids_size: u32_at(bytes, 0x50),
            field_ids_off: u32_at(bytes, 0x54),
            method_ids_size: u32_at(bytes, 0x58),
            method_ids_off: u32_at(bytes, 0x5c),
            class_defs_size: u32_at(bytes, 0x60),
            class_defs_off: u32_at(bytes, 0x64),
            data_size: u32_at(bytes, 0x68),
            data_off: u32_at(bytes, 0x6c),
        }
    }

    /// Encode header to 0x70 bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..8].copy_from_slice(&self.magic);
        bytes[SIGNATURE_OFFSET..SIGNATURE_END].copy_from_slice(&self.signature);

        let words = [
            (0x08, self.checksum),
            (0x20, self.file_size),
            (0x24, self.header_size),
            (0x28, self.endian_tag),
            (0x2c, self.link_size),
            (0x30, self.link_off),
            (0x34, self.map_off),
            (0x38, self.string_ids_size),
            (0x3c, self.string_ids_off),
            (0x40, self.type_ids_size),
            (0x44, self.type_ids_off),
            (0x48, self.proto_ids_size),
            (0x4c, self.proto_ids_off),
            (0x50, self.field_ids_size),
            (0x54, self.field_ids_off),
            (0x58, self.method_ids_size),
            (0x5c, self.method_ids_off),
            (0x60, self.class_defs_size),
            (0x64, self.class_defs_off),
            (0x68, self.data_size),
            (0x6c, self.data_off),
        ];
        for (offset, value) in words {
            bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    /// Check size, magic, version and endianness, then decode.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(DexError::FileTooSmall(bytes.len()));
        }

        let header = Self::from_bytes(bytes);

        if !header.validate_magic() {
            return Err(DexError::InvalidMagic);
        }
        if !header.validate_version() {
            return Err(DexError::UnsupportedVersion(header.version_string()));
        }
        if header.endian_tag != ENDIAN_CONSTANT {
            return Err(DexError::BadEndianTag(header.endian_tag));
        }
        if header.header_size as usize != HEADER_SIZE {
            return Err(DexError::BadHeaderSize(header.header_size));
        }

        Ok(header)
    }

    pub fn validate_magic(&self) -> bool {
        validate_magic(&self.magic)
    }

    pub fn validate_version(&self) -> bool {
        validate_version(&self.magic)
    }

    /// The version digits as text, with the NUL stripped.
    pub fn version_string(&self) -> String {
        let raw = &self.magic[4..8];
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        String::from_utf8_lossy(&raw[..end]).into_owned()
    }

    /// Numeric version, e.g. 35 for "035".
    pub fn version_number(&self) -> Option<u32> {
        self.version_string().parse().ok()
    }

    pub fn supports_default_methods(&self) -> bool {
        self.version_number()
            .is_some_and(|v| v >= DEFAULT_METHODS_VERSION)
    }
}

/// Adler-32 over everything after the checksum field.
pub fn compute_checksum(bytes: &[u8]) -> u32 {
    adler32(bytes.get(SIGNATURE_OFFSET..).unwrap_or_default())
}

/// SHA-1 over everything after the signature field.
pub fn compute_signature(bytes: &[u8]) -> [u8; SIGNATURE_SIZE] {
    let mut hasher = Sha1::new();
    hasher.update(bytes.get(SIGNATURE_END..).unwrap_or_default());
    let mut out = [0u8; SIGNATURE_SIZE];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Compare the stored checksum with a freshly computed one.
pub fn verify_checksum(header: &DiskHeader, bytes: &[u8]) -> Result<()> {
    let found = compute_checksum(bytes);
    if found != header.checksum {
        return Err(DexError::ChecksumMismatch {
            expected: header.checksum,
            found,
        });
    }
    Ok(())
}

pub fn verify_signature(header: &DiskHeader, bytes: &[u8]) -> Result<()> {
    if compute_signature(bytes) != header.signature {
        return Err(DexError::SignatureMismatch);
    }
    Ok(())
}

fn adler32(data: &[u8]) -> u32 {
    const MOD: u32 = 65_521;
    let mut a = 1u32;
    let mut b = 0u32;

    for &byte in data {
        a = (a + byte as u32) % MOD;
        b = (b + a) % MOD;
    }

    (b << 16) | a
}
