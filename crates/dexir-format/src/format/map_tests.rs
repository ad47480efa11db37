use super::map::{MapItem, MapItemType, MapList};
use super::reader::DexReader;

#[test]
fn type_codes() {
    assert_eq!(MapItemType::from_u16(0x0000), Some(MapItemType::HeaderItem));
    assert_eq!(MapItemType::from_u16(0x2006), Some(MapItemType::AnnotationsDirectoryItem));
    assert_eq!(MapItemType::from_u16(0xF000), Some(MapItemType::HiddenapiClassData));
    assert_eq!(MapItemType::from_u16(0x1234), None);

    for t in MapItemType::ALL {
        assert_eq!(MapItemType::from_u16(t as u16), Some(t));
    }
}

#[test]
fn fixed_item_sizes() {
    assert_eq!(MapItemType::StringIdItem.item_size(), Some(4));
    assert_eq!(MapItemType::ProtoIdItem.item_size(), Some(12));
    assert_eq!(MapItemType::MethodHandleItem.item_size(), Some(8));
    assert_eq!(MapItemType::ClassDefItem.item_size(), Some(32));
    assert_eq!(MapItemType::CodeItem.item_size(), None);
}

#[test]
fn parse_at_offset() {
    let list = MapList {
        items: vec![
            MapItem {
                type_code: 0x0000,
                size: 1,
                offset: 0,
            },
            MapItem {
                type_code: 0x7777,
                size: 2,
                offset: 0x90,
            },
        ],
    };
    let mut bytes = vec![0xAA; 8];
    bytes.extend(list.to_bytes());

    let parsed = MapList::parse(&DexReader::new(&bytes), 8).unwrap();
    assert_eq!(parsed, list);
    assert_eq!(parsed.find(MapItemType::HeaderItem).unwrap().size, 1);
    assert_eq!(parsed.items[1].item_type(), None);
    assert!(parsed.find(MapItemType::CodeItem).is_none());
}

#[test]
fn truncated_list_is_error() {
    let mut bytes = 3u32.to_le_bytes().to_vec();
    bytes.extend_from_slice(&[0; 12]);
    assert!(MapList::parse(&DexReader::new(&bytes), 0).is_err());
}
