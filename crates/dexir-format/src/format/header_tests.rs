use super::header::{
    DiskHeader, compute_checksum, compute_signature, validate_magic, validate_version,
    verify_checksum, verify_signature,
};
use super::{DexError, ENDIAN_CONSTANT, ErrorKind, HEADER_SIZE};

fn header_bytes(version: &[u8; 4]) -> Vec<u8> {
    let header = DiskHeader {
        magic: *b"dex\n\0\0\0\0",
        file_size: HEADER_SIZE as u32,
        header_size: HEADER_SIZE as u32,
        endian_tag: ENDIAN_CONSTANT,
        ..Default::default()
    };
    let mut bytes = header.to_bytes().to_vec();
    bytes[4..8].copy_from_slice(version);
    bytes
}

#[test]
fn header_roundtrip() {
    let h = DiskHeader {
        magic: *b"dex\n035\0",
        checksum: 0xdead_beef,
        signature: [7; 20],
        file_size: 0x400,
        header_size: 0x70,
        endian_tag: ENDIAN_CONSTANT,
        link_size: 1,
        link_off: 2,
        map_off: 0x300,
        string_ids_size: 3,
        string_ids_off: 0x70,
        type_ids_size: 4,
        type_ids_off: 0x7c,
        proto_ids_size: 5,
        proto_ids_off: 0x8c,
        field_ids_size: 6,
        field_ids_off: 0xc8,
        method_ids_size: 7,
        method_ids_off: 0xf8,
        class_defs_size: 8,
        class_defs_off: 0x130,
        data_size: 9,
        data_off: 0x230,
    };

    let bytes = h.to_bytes();
    assert_eq!(bytes.len(), 0x70);
    assert_eq!(&bytes[0x38..0x3c], &3u32.to_le_bytes());
    assert_eq!(&bytes[0x6c..0x70], &0x230u32.to_le_bytes());
    assert_eq!(DiskHeader::from_bytes(&bytes), h);
}

#[test]
fn magic_and_version() {
    for version in [b"035\0", b"037\0", b"038\0", b"039\0"] {
        let bytes = header_bytes(version);
        assert!(validate_magic(&bytes));
        assert!(validate_version(&bytes));
        assert!(DiskHeader::parse(&bytes).is_ok());
    }

    let bytes = header_bytes(b"999\0");
    assert!(validate_magic(&bytes));
    assert!(!validate_version(&bytes));
    assert!(!validate_magic(b"dey\n035\0"));
    assert!(!validate_version(b"dex\n"));
}

#[test]
fn parse_rejects_bad_inputs() {
    assert!(matches!(
        DiskHeader::parse(&[0u8; 16]),
        Err(DexError::FileTooSmall(16))
    ));

    let mut bytes = header_bytes(b"035\0");
    bytes[0] = b'D';
    assert!(matches!(DiskHeader::parse(&bytes), Err(DexError::InvalidMagic)));

    let bytes = header_bytes(b"999\0");
    let err = DiskHeader::parse(&bytes).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"unsupported version: "999""#);

    let mut bytes = header_bytes(b"035\0");
    bytes[0x28..0x2c].copy_from_slice(&0x7856_3412u32.to_le_bytes());
    assert!(matches!(
        DiskHeader::parse(&bytes),
        Err(DexError::BadEndianTag(0x7856_3412))
    ));
}

#[test]
fn header_size_must_be_fixed() {
    let mut bytes = header_bytes(b"035\0");
    bytes[0x24..0x28].copy_from_slice(&0x78u32.to_le_bytes());
    let err = DiskHeader::parse(&bytes).unwrap_err();
    assert!(matches!(err, DexError::BadHeaderSize(0x78)));
    assert_eq!(err.kind(), ErrorKind::Corrupt);
    insta::assert_snapshot!(err.to_string(), @"header size is 0x78, expected 0x70");

    assert!(DiskHeader::parse(&header_bytes(b"035\0")).is_ok());
}

#[test]
fn version_queries() {
    let h = DiskHeader::from_bytes(&header_bytes(b"035\0"));
    assert_eq!(h.version_string(), "035");
    assert_eq!(h.version_number(), Some(35));
    assert!(!h.supports_default_methods());

    let h = DiskHeader::from_bytes(&header_bytes(b"037\0"));
    assert!(h.supports_default_methods());
}

#[test]
fn checksum_and_signature() {
    let mut bytes = header_bytes(b"035\0");
    bytes.extend_from_slice(b"Wikipedia");

    let signature = compute_signature(&bytes);
    bytes[12..32].copy_from_slice(&signature);
    let checksum = compute_checksum(&bytes);
    bytes[8..12].copy_from_slice(&checksum.to_le_bytes());

    let h = DiskHeader::parse(&bytes).unwrap();
    verify_checksum(&h, &bytes).unwrap();
    verify_signature(&h, &bytes).unwrap();

    let last = bytes.len() - 1;
    bytes[last] ^= 1;
    assert!(matches!(
        verify_checksum(&h, &bytes),
        Err(DexError::ChecksumMismatch { .. })
    ));
    assert!(matches!(
        verify_signature(&h, &bytes),
        Err(DexError::SignatureMismatch)
    ));
}

#[test]
fn adler32_of_known_input() {
    let mut bytes = vec![0u8; 12];
    bytes.extend_from_slice(b"Wikipedia");
    assert_eq!(compute_checksum(&bytes), 0x11E6_0398);
    assert_eq!(compute_checksum(&[]), 1);
}
