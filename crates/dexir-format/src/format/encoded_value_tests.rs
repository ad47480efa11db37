use super::encoded_value::{ValueHeader, ValueType, read_right_zero_extended, read_var_width};
use super::error::DexError;
use super::reader::DexReader;

#[test]
fn header_byte() {
    let bytes = [0x24, 0x1f | (1 << 5), 0x1e];
    let mut c = DexReader::new(&bytes).cursor(0).unwrap();
    assert_eq!(
        ValueHeader::read(&mut c).unwrap(),
        ValueHeader {
            value_type: ValueType::Int,
            arg: 1
        }
    );
    assert_eq!(
        ValueHeader::read(&mut c).unwrap(),
        ValueHeader {
            value_type: ValueType::Boolean,
            arg: 1
        }
    );
    assert_eq!(ValueHeader::read(&mut c).unwrap().value_type, ValueType::Null);
}

#[test]
fn bad_headers() {
    let bytes = [0x05];
    let mut c = DexReader::new(&bytes).cursor(0).unwrap();
    assert!(matches!(
        ValueHeader::read(&mut c),
        Err(DexError::BadEncodedValue {
            value_type: 0x05,
            offset: 0
        })
    ));

    // A byte value can only be one byte long.
    let bytes = [0x20];
    let mut c = DexReader::new(&bytes).cursor(0).unwrap();
    assert!(ValueHeader::read(&mut c).is_err());
}

#[test]
fn var_width() {
    let bytes = [0xff, 0xff, 0x34, 0x12, 0x80];
    let mut c = DexReader::new(&bytes).cursor(0).unwrap();
    assert_eq!(read_var_width(&mut c, 1, true).unwrap() as i64, -1);
    assert_eq!(read_var_width(&mut c, 1, false).unwrap(), 0x1234);
    assert_eq!(read_var_width(&mut c, 0, true).unwrap() as i64, -128);
    assert!(read_var_width(&mut c, 0, false).is_err());
}

#[test]
fn float_is_right_zero_extended() {
    let bytes = [0x80, 0x3f, 0xf0, 0x3f];
    let mut c = DexReader::new(&bytes).cursor(0).unwrap();
    let f = read_right_zero_extended(&mut c, 1, 4).unwrap();
    assert_eq!(f32::from_bits(f as u32), 1.0);
    let d = read_right_zero_extended(&mut c, 1, 8).unwrap();
    assert_eq!(f64::from_bits(d), 1.0);
}
