use super::iter::{InstructionIter, IterState, SafeInstructionIter};

// const/4 v0, #1; goto +0 (10t); invoke-static {}, meth@1; return-void
const WELL_FORMED: [u16; 6] = [0x1012, 0x0028, 0x0071, 0x0001, 0x0000, 0x000e];

#[test]
fn trusting_iterator() {
    let pcs: Vec<usize> = InstructionIter::new(&WELL_FORMED).map(|(pc, _)| pc).collect();
    assert_eq!(pcs, [0, 1, 2, 5]);
}

#[test]
fn empty_code_is_end() {
    let mut it = SafeInstructionIter::new(&[]);
    assert_eq!(it.state(), IterState::End);
    assert!(it.next().is_none());
    assert!(!it.is_error());
}

#[test]
fn safe_state_machine() {
    let mut it = SafeInstructionIter::new(&WELL_FORMED);
    assert_eq!(it.state(), IterState::Positioned(0));
    assert_eq!(it.current().name(), "const/4");
    assert_eq!(it.advance(), IterState::Positioned(1));
    assert_eq!(it.advance(), IterState::Positioned(2));
    assert_eq!(it.current().name(), "invoke-static");
    assert_eq!(it.advance(), IterState::Positioned(5));
    assert_eq!(it.advance(), IterState::End);
    assert!(it.is_end());
}

#[test]
fn safe_iterator_matches_trusting_on_good_code() {
    let safe: Vec<usize> = SafeInstructionIter::new(&WELL_FORMED).map(|(pc, _)| pc).collect();
    let trusting: Vec<usize> = InstructionIter::new(&WELL_FORMED).map(|(pc, _)| pc).collect();
    assert_eq!(safe, trusting);
}

#[test]
fn oversized_first_instruction() {
    // const-wide needs 5 code units, only 3 exist.
    let code = [0x0018, 0x0000, 0x0000];
    let mut it = SafeInstructionIter::new(&code);
    assert_eq!(it.state(), IterState::Positioned(0));
    assert_eq!(it.advance(), IterState::Error);
    assert!(it.is_error());
    assert!(it.next().is_none());
    assert_eq!(it.state(), IterState::Error);
}

#[test]
#[should_panic(expected = "Error")]
fn deref_in_error_state_panics() {
    let code = [0x0018, 0x0000, 0x0000];
    let mut it = SafeInstructionIter::new(&code);
    it.advance();
    it.current();
}

#[test]
#[should_panic(expected = "End")]
fn advance_at_end_panics() {
    let code = [0x000e];
    let mut it = SafeInstructionIter::new(&code);
    assert_eq!(it.advance(), IterState::End);
    it.advance();
}

#[test]
fn stops_at_truncated_tail() {
    // return-void, then a const-wide cut after two units.
    let code = [0x000e, 0x0018, 0x0000];
    let mut it = SafeInstructionIter::new(&code);
    let seen: Vec<usize> = it.by_ref().map(|(pc, _)| pc).collect();
    assert_eq!(seen, [0]);
    assert!(it.is_error());
    assert_eq!(it.failed_at(), Some(1));
}

#[test]
fn payload_header_cut_short() {
    // A packed-switch payload needs two units just to know its size.
    let code = [0x0100];
    let mut it = SafeInstructionIter::new(&code);
    assert_eq!(it.advance(), IterState::Error);
}

#[test]
fn payload_larger_than_code() {
    let code = [0x000e, 0x0100, 0x0010, 0x0000];
    let mut it = SafeInstructionIter::new(&code);
    assert_eq!(it.advance(), IterState::Positioned(1));
    assert_eq!(it.advance(), IterState::Error);
}
