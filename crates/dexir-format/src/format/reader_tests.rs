use super::{DexBytes, DexError, DexReader};

#[test]
fn fixed_width_reads() {
    let bytes = [0x01, 0x02, 0x03, 0x04, 0x05];
    let r = DexReader::new(&bytes);
    assert_eq!(r.u8_at(4).unwrap(), 0x05);
    assert_eq!(r.u16_at(0).unwrap(), 0x0201);
    assert_eq!(r.u32_at(1).unwrap(), 0x0504_0302);
}

#[test]
fn read_past_end_is_out_of_bounds() {
    let bytes = [0u8; 4];
    let r = DexReader::new(&bytes);
    assert!(matches!(
        r.u32_at(1),
        Err(DexError::OutOfBounds { offset: 1, len: 4, size: 4, .. })
    ));
    assert!(r.slice(usize::MAX, 2, "x").is_err());
    assert!(r.cursor(4).is_ok());
    assert!(r.cursor(5).is_err());
}

#[test]
fn table_overflow() {
    let bytes = [0u8; 16];
    let r = DexReader::new(&bytes);
    assert_eq!(r.table(0, 2, 8, "ids").unwrap().len(), 16);
    assert!(r.table(8, 2, 8, "ids").is_err());
    assert!(r.table(0, u32::MAX, usize::MAX, "ids").is_err());
}

#[test]
fn uleb128() {
    let bytes = [0x00, 0x7f, 0x80, 0x7f, 0xe5, 0x8e, 0x26, 0xff, 0xff, 0xff, 0xff, 0x0f];
    let mut c = DexReader::new(&bytes).cursor(0).unwrap();
    assert_eq!(c.read_uleb128().unwrap(), 0);
    assert_eq!(c.read_uleb128().unwrap(), 127);
    assert_eq!(c.read_uleb128().unwrap(), 16256);
    assert_eq!(c.read_uleb128().unwrap(), 624_485);
    assert_eq!(c.read_uleb128().unwrap(), u32::MAX);
    assert_eq!(c.position(), bytes.len());
}

#[test]
fn uleb128_too_long() {
    let bytes = [0x80, 0x80, 0x80, 0x80, 0x80, 0x01];
    let mut c = DexReader::new(&bytes).cursor(0).unwrap();
    assert!(matches!(c.read_uleb128(), Err(DexError::BadLeb128(0))));
}

#[test]
fn sleb128() {
    let bytes = [0x00, 0x01, 0x7f, 0x80, 0x7f, 0x3f, 0x40];
    let mut c = DexReader::new(&bytes).cursor(0).unwrap();
    assert_eq!(c.read_sleb128().unwrap(), 0);
    assert_eq!(c.read_sleb128().unwrap(), 1);
    assert_eq!(c.read_sleb128().unwrap(), -1);
    assert_eq!(c.read_sleb128().unwrap(), -128);
    assert_eq!(c.read_sleb128().unwrap(), 63);
    assert_eq!(c.read_sleb128().unwrap(), -64);
}

#[test]
fn uleb128p1() {
    let bytes = [0x00, 0x01, 0x05];
    let mut c = DexReader::new(&bytes).cursor(0).unwrap();
    assert_eq!(c.read_uleb128p1().unwrap(), None);
    assert_eq!(c.read_uleb128p1().unwrap(), Some(0));
    assert_eq!(c.read_uleb128p1().unwrap(), Some(4));
}

#[test]
fn until_nul() {
    let bytes = *b"ab\0c";
    let mut c = DexReader::new(&bytes).cursor(0).unwrap();
    assert_eq!(c.read_until_nul().unwrap(), b"ab");
    assert_eq!(c.position(), 3);
    assert!(c.read_until_nul().is_err());
}

#[test]
fn storage_variants() {
    let owned = DexBytes::from_vec(vec![1, 2, 3]);
    let data = [1u8, 2, 3];
    let borrowed = DexBytes::from_slice(&data);
    assert_eq!(&*owned, &*borrowed);
    assert_eq!(borrowed.reader().len(), 3);
}
