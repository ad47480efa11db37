use super::refs::{Handle, StringRef};
use super::section::Section;

fn section(items: &[(&'static str, u32)]) -> Section<StringRef, &'static str> {
    let mut s = Section::default();
    for &(item, offset) in items {
        let h = s.push(item);
        s.record_offset(offset, h);
    }
    s
}

#[test]
fn push_returns_sequential_handles() {
    let mut s: Section<StringRef, &str> = Section::default();
    assert!(s.is_empty());

    let a = s.push("a");
    let b = s.push("b");

    assert_eq!(a.index(), 0);
    assert_eq!(b.index(), 1);
    assert_eq!(s.len(), 2);
    assert_eq!(s[b], "b");
    assert_eq!(s.handle(1), Some(b));
    assert_eq!(s.handle(2), None);
    assert_eq!(s.get(StringRef::from_index(7)), None);
}

#[test]
fn first_recorded_offset_wins() {
    let mut s = section(&[("a", 0x40)]);
    let b = s.push("b");

    let kept = s.record_offset(0x40, b);

    assert_eq!(kept.index(), 0);
    assert_eq!(s.at_offset(0x40), Some(kept));
    assert_eq!(s.at_offset(0x44), None);
}

#[test]
fn sort_by_disk_offset_reorders_iteration_only() {
    let mut s = section(&[("c", 0x30), ("a", 0x10), ("b", 0x20)]);

    s.sort_by_disk_offset();

    let items: Vec<&str> = s.iter().map(|(_, &v)| v).collect();
    assert_eq!(items, ["a", "b", "c"]);
    assert_eq!(s[StringRef::from_index(0)], "c");
    assert_eq!(s.handles().next(), Some(StringRef::from_index(1)));
}

#[test]
fn shared_object_sorts_by_lowest_offset() {
    let mut s = section(&[("x", 0x50), ("y", 0x30)]);
    let x = s.handle(0).unwrap();
    s.record_offset(0x10, x);

    s.sort_by_disk_offset();

    let items: Vec<&str> = s.iter().map(|(_, &v)| v).collect();
    assert_eq!(items, ["x", "y"]);
}

#[test]
fn unrecorded_objects_sort_last_in_insertion_order() {
    let mut s = section(&[("b", 0x20)]);
    s.push("late1");
    s.push("late2");
    let a = s.push("a");
    s.record_offset(0x10, a);

    s.sort_by_disk_offset();

    let items: Vec<&str> = s.iter().map(|(_, &v)| v).collect();
    assert_eq!(items, ["a", "b", "late1", "late2"]);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn indexing_foreign_handle_panics() {
    let s = section(&[("a", 0)]);
    let _ = s[StringRef::from_index(3)];
}
