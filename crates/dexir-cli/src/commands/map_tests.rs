use dexir::test_utils::single_method;
use dexir::{BuildOptions, build};
use dexir_core::Colors;
use dexir_format::format::{DexReader, MapItem, MapList};

use super::map::render;

fn maps() -> (Vec<MapItem>, Vec<MapItem>) {
    let (f, _) = single_method(vec![0x000e]);
    let bytes = f.build();
    let header = build(&bytes, &BuildOptions::default()).unwrap();
    let disk = MapList::parse(&DexReader::new(&bytes), header.collections().map_list_offset())
        .unwrap();
    (disk.items, header.collections().map_items())
}

#[test]
fn matching_maps_have_no_markers() {
    let (disk, computed) = maps();
    let out = render(&disk, &computed, Colors::OFF);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 1 + disk.len());
    assert!(lines.iter().all(|l| !l.starts_with('!')));
    assert!(lines[1].contains("TYPE_HEADER_ITEM"));
    assert!(lines[2].contains("4 @ 0x000070"));
}

#[test]
fn differing_rows_are_flagged() {
    let (disk, mut computed) = maps();
    computed[1].size = 99;
    computed.push(MapItem {
        type_code: 0x1234,
        size: 1,
        offset: 0x400,
    });
    let out = render(&disk, &computed, Colors::OFF);

    let flagged: Vec<&str> = out.lines().filter(|l| l.starts_with('!')).collect();
    assert_eq!(flagged.len(), 2);
    assert!(flagged[0].contains("TYPE_STRING_ID_ITEM"));
    assert!(flagged[1].contains("0x1234"));
    assert!(flagged[1].trim_end().ends_with("1 @ 0x000400"));
}
