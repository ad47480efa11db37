use crate::utils::{FlagTarget, access_flags_string, pretty_descriptor};

#[test]
fn primitives() {
    assert_eq!(pretty_descriptor("Z"), "boolean");
    assert_eq!(pretty_descriptor("J"), "long");
    assert_eq!(pretty_descriptor("D"), "double");
}

#[test]
fn classes_and_arrays() {
    assert_eq!(pretty_descriptor("LFoo;"), "Foo");
    assert_eq!(pretty_descriptor("La/b/C$D;"), "a.b.C$D");
    assert_eq!(pretty_descriptor("[Ljava/lang/Object;"), "java.lang.Object[]");
    assert_eq!(pretty_descriptor("[[[B"), "byte[][][]");
}

#[test]
fn malformed_descriptor_unchanged() {
    assert_eq!(pretty_descriptor("Lunterminated"), "Lunterminated");
    assert_eq!(pretty_descriptor("Q"), "Q");
    assert_eq!(pretty_descriptor(""), "");
}

#[test]
fn flags_depend_on_target() {
    assert_eq!(access_flags_string(0x0040, FlagTarget::Field), "volatile");
    assert_eq!(access_flags_string(0x0040, FlagTarget::Method), "bridge");
    assert_eq!(access_flags_string(0x0040, FlagTarget::Class), "");
}

#[test]
fn class_flags() {
    assert_eq!(
        access_flags_string(0x0601, FlagTarget::Class),
        "public interface abstract"
    );
    assert_eq!(access_flags_string(0x4011, FlagTarget::Class), "public final enum");
}
