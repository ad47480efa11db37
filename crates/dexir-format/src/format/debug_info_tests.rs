use super::debug_info::debug_info_stream_size;
use super::reader::DexReader;

#[test]
fn stream_size() {
    let bytes = [
        0xaa, 0xbb, // unrelated
        0x01, 0x01, 0x00, // line_start 1, one unnamed parameter
        0x01, 0x02, // advance pc
        0x02, 0x7f, // advance line -1
        0x03, 0x01, 0x05, 0x06, // start local
        0x0e, // special opcode
        0x09, 0x00, // set file (none)
        0x00, // end sequence
        0xcc,
    ];
    let size = debug_info_stream_size(&DexReader::new(&bytes), 2).unwrap();
    assert_eq!(size, 15);
}

#[test]
fn missing_end_sequence() {
    let bytes = [0x01, 0x00, 0x07, 0x08];
    assert!(debug_info_stream_size(&DexReader::new(&bytes), 0).is_err());
}
