use dexir_format::format::MapItemType;

use crate::builder::{BuildOptions, build};
use crate::test_utils::{DexFixture, single_method};

#[test]
fn signatures_and_descriptors() {
    let mut f = DexFixture::new();
    let field = f.field("Lcom/example/Box;", "[Ljava/lang/String;", "items");
    let method = f.method("Lcom/example/Box;", "put", "Z", &["I", "Ljava/lang/Object;"]);
    let header = build(&f.build(), &BuildOptions::default()).unwrap();
    let c = header.collections();

    let field = c.field_ids().handle(field).unwrap();
    let method = c.method_ids().handle(method).unwrap();
    assert_eq!(
        c.field_signature(field),
        "Lcom/example/Box;->items:[Ljava/lang/String;"
    );
    assert_eq!(
        c.method_signature(method),
        "Lcom/example/Box;->put(ILjava/lang/Object;)Z"
    );
    let proto = c.method_ids()[method].proto;
    assert_eq!(c.proto_signature(proto), "(ILjava/lang/Object;)Z");
    assert_eq!(c.string(c.proto_ids()[proto].shorty), "ZIL");
    assert_eq!(c.descriptor(c.field_ids()[field].class), "Lcom/example/Box;");
}

#[test]
fn map_items_are_sorted_and_skip_empty_sections() {
    let (f, _) = single_method(vec![0x000e]);
    let header = build(&f.build(), &BuildOptions::default()).unwrap();
    let items = header.collections().map_items();

    let kinds: Vec<MapItemType> = items.iter().filter_map(|i| i.item_type()).collect();
    assert_eq!(
        kinds,
        [
            MapItemType::HeaderItem,
            MapItemType::StringIdItem,
            MapItemType::TypeIdItem,
            MapItemType::ProtoIdItem,
            MapItemType::MethodIdItem,
            MapItemType::ClassDefItem,
            MapItemType::StringDataItem,
            MapItemType::CodeItem,
            MapItemType::ClassDataItem,
            MapItemType::MapList,
        ]
    );
    assert!(items.windows(2).all(|w| w[0].offset < w[1].offset));
    assert_eq!(items[1].size, 4);
}

#[test]
fn walk_starts_at_header() {
    let (f, _) = single_method(vec![0x000e]);
    let header = build(&f.build(), &BuildOptions::default()).unwrap();

    let mut seen = Vec::new();
    header.walk(|node| seen.push((node.kind(), node.offset())));

    assert_eq!(seen[0], (MapItemType::HeaderItem, Some(0)));
    assert_eq!(seen[1], (MapItemType::StringIdItem, Some(0x70)));
    assert_eq!(seen.len(), 1 + 4 + 3 + 1 + 1 + 1 + 4 + 1 + 1);
    assert_eq!(seen.last(), Some(&(MapItemType::ClassDataItem, Some(0xf6))));
}

#[test]
fn walk_with_lazy_offsets() {
    let (f, _) = single_method(vec![0x000e]);
    let options = BuildOptions::new().eager_offsets(false);
    let header = build(&f.build(), &options).unwrap();

    let mut offsets = Vec::new();
    header.walk(|node| offsets.push(node.offset()));

    assert_eq!(offsets[0], Some(0));
    assert!(offsets[1..].iter().all(Option::is_none));
}
