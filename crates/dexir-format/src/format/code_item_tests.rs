use super::code_item::{
    CatchHandlerEntry, CodeItemAccessor, CodeItemLayout, CompactCodeItem, StandardCodeItem,
    TryItem, find_try_item,
};
use super::reader::DexReader;

fn push_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn push_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// A standard code item at offset 0 with one try block and one handler list.
fn code_with_try() -> Vec<u8> {
    let mut b = Vec::new();
    push_u16(&mut b, 2); // registers
    push_u16(&mut b, 1); // ins
    push_u16(&mut b, 0); // outs
    push_u16(&mut b, 1); // tries
    push_u32(&mut b, 0); // debug info
    push_u32(&mut b, 3); // insns size
    for unit in [0x1012, 0x000e, 0x0000] {
        push_u16(&mut b, unit);
    }
    push_u16(&mut b, 0); // padding to 4
    push_u32(&mut b, 0); // start_addr
    push_u16(&mut b, 2); // insn_count
    push_u16(&mut b, 1); // handler_off
    // one list: one typed clause (type 5 -> 2) plus catch-all -> 2
    b.extend_from_slice(&[0x01, 0x7f, 0x05, 0x02, 0x02]);
    b
}

#[test]
fn standard_fields() {
    let bytes = code_with_try();
    let reader = DexReader::new(&bytes);
    let layout = StandardCodeItem::parse(&reader, 0).unwrap();
    assert_eq!(layout.registers_size(), 2);
    assert_eq!(layout.tries_size(), 1);
    assert_eq!(layout.insns_off(), 16);

    let code = CodeItemAccessor::standard(reader, 0).unwrap();
    assert_eq!(code.insns(), &[0x1012, 0x000e, 0x0000]);
    assert_eq!(code.tries_off(), 24);
    assert_eq!(code.handler_data_off(), 32);
    assert_eq!(code.code_item_size(0).unwrap(), 37);
    assert_eq!(code.catch_handler_data().unwrap(), &[0x01, 0x7f, 0x05, 0x02, 0x02]);
}

#[test]
fn try_items_and_lookup() {
    let bytes = code_with_try();
    let code = CodeItemAccessor::standard(DexReader::new(&bytes), 0).unwrap();
    let tries: Vec<TryItem> = code.try_items().unwrap().collect();
    assert_eq!(
        tries,
        [TryItem {
            start_addr: 0,
            insn_count: 2,
            handler_off: 1
        }]
    );
    assert_eq!(code.find_try_item(1).unwrap(), Some(tries[0]));
    assert_eq!(code.find_try_item(2).unwrap(), None);
}

#[test]
fn catch_handlers() {
    let bytes = code_with_try();
    let code = CodeItemAccessor::standard(DexReader::new(&bytes), 0).unwrap();
    let handlers = code.catch_handlers(1).unwrap();
    assert!(handlers.has_catch_all());
    let entries: Vec<CatchHandlerEntry> = handlers.map(Result::unwrap).collect();
    assert_eq!(
        entries,
        [
            CatchHandlerEntry {
                type_idx: Some(5),
                address: 2
            },
            CatchHandlerEntry {
                type_idx: None,
                address: 2
            },
        ]
    );
}

#[test]
fn truncated_handler_list_reports_error() {
    let mut bytes = code_with_try();
    bytes.truncate(bytes.len() - 1);
    let code = CodeItemAccessor::standard(DexReader::new(&bytes), 0).unwrap();
    assert!(code.code_item_size(0).is_err());
    let results: Vec<_> = code.catch_handlers(1).unwrap().collect();
    assert_eq!(results.len(), 2);
    assert!(results[1].is_err());
}

#[test]
fn size_without_tries() {
    let mut b = Vec::new();
    for v in [1u16, 0, 0, 0] {
        push_u16(&mut b, v);
    }
    push_u32(&mut b, 0);
    push_u32(&mut b, 1);
    push_u16(&mut b, 0x000e);
    let code = CodeItemAccessor::standard(DexReader::new(&b), 0).unwrap();
    assert_eq!(code.code_item_size(0).unwrap(), 18);
    assert_eq!(code.try_items().unwrap().count(), 0);
}

#[test]
fn insns_past_end() {
    let mut b = Vec::new();
    for v in [1u16, 0, 0, 0] {
        push_u16(&mut b, v);
    }
    push_u32(&mut b, 0);
    push_u32(&mut b, 100);
    assert!(CodeItemAccessor::standard(DexReader::new(&b), 0).is_err());
}

#[test]
fn binary_search_over_tries() {
    let tries = [
        TryItem {
            start_addr: 0,
            insn_count: 4,
            handler_off: 1,
        },
        TryItem {
            start_addr: 6,
            insn_count: 2,
            handler_off: 5,
        },
        TryItem {
            start_addr: 8,
            insn_count: 10,
            handler_off: 9,
        },
    ];
    assert_eq!(find_try_item(&tries, 0), Some(0));
    assert_eq!(find_try_item(&tries, 3), Some(0));
    assert_eq!(find_try_item(&tries, 4), None);
    assert_eq!(find_try_item(&tries, 7), Some(1));
    assert_eq!(find_try_item(&tries, 8), Some(2));
    assert_eq!(find_try_item(&tries, 18), None);
    assert_eq!(find_try_item(&[], 0), None);
}

#[test]
fn try_end_does_not_wrap() {
    let tries = [TryItem {
        start_addr: 0xffff_fff0,
        insn_count: 0x20,
        handler_off: 1,
    }];
    assert_eq!(tries[0].end_addr(), 0x1_0000_0010);
    assert_eq!(find_try_item(&tries, 0), None);
    assert_eq!(find_try_item(&tries, u32::MAX), Some(0));
}

#[test]
fn compact_nibbles() {
    let mut b = Vec::new();
    push_u16(&mut b, 0x1100); // registers 1, ins 1
    push_u16(&mut b, 2 << 5); // two code units, no pre-header
    push_u16(&mut b, 0x1012);
    push_u16(&mut b, 0x000e);

    let reader = DexReader::new(&b);
    let layout = CompactCodeItem::parse(&reader, 0, 0x40).unwrap();
    assert_eq!(layout.registers_size(), 2);
    assert_eq!(layout.ins_size(), 1);
    assert_eq!(layout.insns_size_in_code_units(), 2);
    assert_eq!(layout.debug_info_off(), 0x40);

    let code = CodeItemAccessor::new(reader, &layout).unwrap();
    assert_eq!(code.insns(), &[0x1012, 0x000e]);
}

#[test]
fn compact_pre_header() {
    let mut b = Vec::new();
    push_u16(&mut b, 20); // registers extension
    push_u16(&mut b, 0); // insns high half
    push_u16(&mut b, 1); // insns low half
    push_u16(&mut b, 0x2000); // registers 2
    push_u16(
        &mut b,
        (1 << 5) | CompactCodeItem::FLAG_INSNS | CompactCodeItem::FLAG_REGISTERS,
    );
    push_u16(&mut b, 0x000e);
    push_u16(&mut b, 0x000e);

    let layout = CompactCodeItem::parse(&DexReader::new(&b), 6, 0).unwrap();
    assert_eq!(layout.insns_size_in_code_units(), 2);
    assert_eq!(layout.registers_size(), 22);
    assert_eq!(layout.insns_off(), 10);
}

#[test]
fn compact_pre_header_before_file_start() {
    let mut b = Vec::new();
    push_u16(&mut b, 0);
    push_u16(&mut b, CompactCodeItem::FLAG_TRIES);
    assert!(CompactCodeItem::parse(&DexReader::new(&b), 0, 0).is_err());
}
