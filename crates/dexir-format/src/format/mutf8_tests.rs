use super::mutf8::{StringData, decode_lossy};
use super::reader::DexReader;

#[test]
fn ascii_and_two_byte() {
    assert_eq!(decode_lossy(b"Ljava/lang/Object;"), "Ljava/lang/Object;");
    assert_eq!(decode_lossy(&[0x68, 0xc3, 0xa9]), "hé");
    assert_eq!(decode_lossy(&[0x61, 0xc0, 0x80, 0x62]), "a\0b");
}

#[test]
fn surrogate_pair() {
    let bytes = [0xed, 0xa0, 0xbd, 0xed, 0xb8, 0x80];
    assert_eq!(decode_lossy(&bytes), "\u{1F600}");
}

#[test]
fn malformed_bytes_are_replaced() {
    assert_eq!(decode_lossy(&[0xff, 0x41]), "\u{FFFD}A");
    assert_eq!(decode_lossy(&[0xc3]), "\u{FFFD}");
}

#[test]
fn string_data_item() {
    let bytes = [0x00, 0x03, b'a', b'b', b'c', 0x00];
    let s = StringData::parse(&DexReader::new(&bytes), 1).unwrap();
    assert_eq!(s.utf16_size, 3);
    assert_eq!(s.data, b"abc");
    assert_eq!(s.disk_size(), 5);
}

#[test]
fn unterminated_string_data() {
    let bytes = [0x02, b'a', b'b'];
    assert!(StringData::parse(&DexReader::new(&bytes), 0).is_err());
}
