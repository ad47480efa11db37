use crate::Interner;

#[test]
fn same_key_same_handle() {
    let mut interner: Interner<u32, usize> = Interner::new();

    let a = interner.insert(0x70, 0);
    let b = interner.insert(0x70, 1);
    let c = interner.insert(0x90, 2);

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.get(&0x70), Some(0));
    assert_eq!(interner.len(), 2);
}

#[test]
fn sequence_keys() {
    let mut interner: Interner<Vec<u16>, u32> = Interner::new();

    interner.insert(vec![1, 1], 7);
    assert_eq!(interner.get(&vec![1, 1]), Some(7));
    assert_eq!(interner.get(&vec![1]), None);
}

#[test]
fn insert_keeps_first_handle() {
    let mut interner: Interner<(u32, u32), u8> = Interner::new();

    assert_eq!(interner.insert((4, 0), 1), 1);
    assert_eq!(interner.insert((4, 0), 2), 1);
    assert_eq!(interner.insert((4, 8), 3), 3);
}

#[test]
fn iteration_follows_insertion_order() {
    let mut interner: Interner<u32, u32> = Interner::new();
    interner.insert(30, 0);
    interner.insert(10, 1);
    interner.insert(20, 2);

    let keys: Vec<u32> = interner.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, vec![30, 10, 20]);
}
