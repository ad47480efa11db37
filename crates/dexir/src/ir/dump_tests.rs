use dexir_core::Colors;
use indoc::indoc;

use crate::builder::{BuildOptions, build};
use crate::ir::dump;
use crate::test_utils::single_method;

#[test]
fn dump_single_method() {
    let (f, _) = single_method(vec![0x000e]);
    let mut header = build(&f.build(), &BuildOptions::default()).unwrap();
    header.checksum = 0xdeadbeef;

    insta::assert_snapshot!(dump(&header, Colors::OFF), @r#"
    [header]
    version = 035
    file_size = 0x17c
    checksum = 0xdeadbeef
    data = 0xbc @ 0xc0
    link = 0x0 @ 0x0
    default_methods = false

    [strings]
    S0 "Ljava/lang/Object;"
    S1 "LMain;"
    S2 "V"
    S3 "run"

    [types]
    T0 Ljava/lang/Object;  ; java.lang.Object
    T1 LMain;  ; Main
    T2 V  ; void

    [protos]
    P0 ()V  ; V

    [fields]

    [methods]
    M0 LMain;->run()V

    [classes]
    LMain; public  @0xa0
      extends Ljava/lang/Object;
      method M0 public  ; regs=1 ins=0 outs=0 insns=1 tries=0

    [map]
    0x000000 TYPE_HEADER_ITEM 1
    0x000070 TYPE_STRING_ID_ITEM 4
    0x000080 TYPE_TYPE_ID_ITEM 3
    0x00008c TYPE_PROTO_ID_ITEM 1
    0x000098 TYPE_METHOD_ID_ITEM 1
    0x0000a0 TYPE_CLASS_DEF_ITEM 1
    0x0000c0 TYPE_STRING_DATA_ITEM 4
    0x0000e4 TYPE_CODE_ITEM 1
    0x0000f6 TYPE_CLASS_DATA_ITEM 1
    0x000100 TYPE_MAP_LIST 1
    "#);
}

#[test]
fn dump_class_block() {
    let (f, _) = single_method(vec![0x000e]);
    let header = build(&f.build(), &BuildOptions::default()).unwrap();
    let out = dump(&header, Colors::OFF);

    let classes = out.split("[classes]\n").nth(1).unwrap();
    let classes = classes.split("\n\n").next().unwrap();
    assert_eq!(
        classes,
        indoc! {"
            LMain; public  @0xa0
              extends Ljava/lang/Object;
              method M0 public  ; regs=1 ins=0 outs=0 insns=1 tries=0"}
    );
}

#[test]
fn dump_with_colors() {
    let (f, _) = single_method(vec![0x000e]);
    let header = build(&f.build(), &BuildOptions::default()).unwrap();

    let plain = dump(&header, Colors::OFF);
    let colored = dump(&header, Colors::ON);

    assert!(!plain.contains('\x1b'));
    assert!(colored.contains("\x1b["));
    assert!(colored.contains("[classes]"));
}
