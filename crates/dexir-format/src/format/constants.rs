/// Magic bytes: b"dex\n"
pub const MAGIC: [u8; 4] = *b"dex\n";

/// Version strings accepted after the magic (3 ASCII digits + NUL).
pub const VERSIONS: [[u8; 4]; 4] = [*b"035\0", *b"037\0", *b"038\0", *b"039\0"];

/// First version with default interface methods.
pub const DEFAULT_METHODS_VERSION: u32 = 37;

/// Size of the disk header in bytes.
pub const HEADER_SIZE: usize = 0x70;

pub const ENDIAN_CONSTANT: u32 = 0x1234_5678;
pub const REVERSE_ENDIAN_CONSTANT: u32 = 0x7856_3412;

/// Sentinel for an absent index (superclass, source file).
pub const NO_INDEX: u32 = 0xffff_ffff;

pub const CHECKSUM_OFFSET: usize = 8;
pub const SIGNATURE_OFFSET: usize = 12;
pub const SIGNATURE_SIZE: usize = 20;
pub const SIGNATURE_END: usize = SIGNATURE_OFFSET + SIGNATURE_SIZE;
