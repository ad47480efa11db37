use super::instruction::Instruction;
use super::opcode::{Format, INSTRUCTION_WIDTHS, IndexType, OPCODES, Opcode};

#[test]
fn width_table() {
    assert_eq!(INSTRUCTION_WIDTHS[0x00], 0);
    assert_eq!(INSTRUCTION_WIDTHS[0x0e], 1);
    assert_eq!(INSTRUCTION_WIDTHS[0x1a], 2);
    assert_eq!(INSTRUCTION_WIDTHS[0x6e], 3);
    assert_eq!(INSTRUCTION_WIDTHS[0xfa], 4);
    assert_eq!(INSTRUCTION_WIDTHS[0x18], 5);
    assert!(INSTRUCTION_WIDTHS[1..].iter().all(|&w| (1..=5).contains(&w)));
}

#[test]
fn opcode_table() {
    assert_eq!(Opcode(0x6e).name(), "invoke-virtual");
    assert_eq!(Opcode(0x78).name(), "invoke-interface/range");
    assert_eq!(Opcode(0xb0).name(), "add-int/2addr");
    assert_eq!(Opcode(0xe2).name(), "ushr-int/lit8");
    assert_eq!(Opcode(0xff).index_type(), IndexType::ProtoRef);
    assert!(Opcode(0x3e).is_unused());
    assert!(Opcode(0x73).is_unused());
    assert!(!Opcode(0x00).is_unused());

    let count = |t: IndexType| OPCODES.iter().filter(|o| o.index_type == t).count();
    assert_eq!(count(IndexType::StringRef), 2);
    assert_eq!(count(IndexType::FieldRef), 28);
    assert_eq!(count(IndexType::MethodRef), 10);
    assert_eq!(count(IndexType::CallSiteRef), 2);
    assert_eq!(OPCODES.iter().filter(|o| o.name.starts_with("unused-")).count(), 32);
}

#[test]
fn const_string() {
    let code = [0x011a, 0x1234];
    let inst = Instruction::at(&code, 0);
    assert_eq!(inst.opcode(), Opcode::CONST_STRING);
    assert_eq!(inst.format(), Format::F21c);
    assert_eq!(inst.size_in_code_units(), 2);
    assert_eq!(inst.vreg_a(), Some(1));
    assert_eq!(inst.vreg_b(), Some(0x1234));
    assert_eq!(inst.vreg_c(), None);
    assert_eq!(inst.index(), Some(0x1234));
}

#[test]
fn jumbo_string_index_is_32_bit() {
    let code = [0x001b, 0x5678, 0x0001];
    let inst = Instruction::at(&code, 0);
    assert_eq!(inst.format(), Format::F31c);
    assert_eq!(inst.index(), Some(0x0001_5678));
}

#[test]
fn invoke_virtual_args() {
    let code = [0x306e, 0x0005, 0x0321];
    let inst = Instruction::at(&code, 0);
    assert_eq!(inst.name(), "invoke-virtual");
    assert_eq!(inst.vreg_a(), Some(3));
    assert_eq!(inst.vreg_b(), Some(5));
    assert_eq!(inst.vreg_c(), Some(1));
    assert_eq!(inst.var_args().unwrap().as_slice(), &[1, 2, 3]);
    assert_eq!(inst.index(), Some(5));
}

#[test]
fn five_args_use_g_nibble() {
    let code = [0x5f6e, 0x0000, 0x4321];
    let inst = Instruction::at(&code, 0);
    assert_eq!(inst.var_args().unwrap().as_slice(), &[1, 2, 3, 4, 0xf]);
}

#[test]
fn field_index_in_c() {
    let code = [0x1052, 0x0007];
    let inst = Instruction::at(&code, 0);
    assert_eq!(inst.format(), Format::F22c);
    assert_eq!(inst.vreg_a(), Some(0));
    assert_eq!(inst.vreg_b(), Some(1));
    assert_eq!(inst.index(), Some(7));
}

#[test]
fn range_invoke() {
    let code = [0x0374, 0x0009, 0x0010];
    let inst = Instruction::at(&code, 0);
    assert_eq!(inst.format(), Format::F3rc);
    assert_eq!(inst.vreg_a(), Some(3));
    assert_eq!(inst.vreg_c(), Some(0x10));
    assert_eq!(inst.index(), Some(9));
    assert!(inst.var_args().is_none());
}

#[test]
fn wide_literal() {
    let code = [0x0218, 0x7788, 0x5566, 0x3344, 0x1122];
    let inst = Instruction::at(&code, 0);
    assert_eq!(inst.size_in_code_units(), 5);
    assert_eq!(inst.vreg_a(), Some(2));
    assert_eq!(inst.wide_vreg_b(), Some(0x1122_3344_5566_7788));
    assert_eq!(inst.vreg_b(), None);
}

#[test]
fn invoke_polymorphic() {
    let code = [0x20fa, 0x0003, 0x0010, 0x0004];
    let inst = Instruction::at(&code, 0);
    assert_eq!(inst.size_in_code_units(), 4);
    assert_eq!(inst.index_type(), IndexType::MethodAndProtoRef);
    assert_eq!(inst.index(), Some(3));
    assert_eq!(inst.vreg_h(), Some(4));
    assert_eq!(inst.var_args().unwrap().as_slice(), &[0, 1]);
}

#[test]
fn literal_operands() {
    // add-int/lit8 v1, v2, #-1
    let code = [0x01d8, 0xff02];
    let inst = Instruction::at(&code, 0);
    assert_eq!(inst.vreg_a(), Some(1));
    assert_eq!(inst.vreg_b(), Some(2));
    assert_eq!(inst.vreg_c(), Some(0xff));
    assert_eq!(inst.index(), None);
}

#[test]
fn payload_sizes() {
    let packed = [0x0100, 0x0002, 0x0000, 0x0000, 0x0003, 0x0000, 0x0005, 0x0000];
    let inst = Instruction::at(&packed, 0);
    assert!(inst.is_payload());
    assert_eq!(inst.code_units_required_for_size_computation(), 2);
    assert_eq!(inst.size_in_code_units(), 8);

    let sparse = [0x0200, 0x0001, 0x000a, 0x0000, 0x0004, 0x0000];
    let inst = Instruction::at(&sparse, 0);
    assert_eq!(inst.code_units_required_for_size_computation(), 2);
    assert_eq!(inst.size_in_code_units(), 6);

    let array = [0x0300, 0x0001, 0x0003, 0x0000, 0x0201, 0x0003];
    let inst = Instruction::at(&array, 0);
    assert_eq!(inst.code_units_required_for_size_computation(), 4);
    assert_eq!(inst.size_in_code_units(), 6);

    let nop = [0x0000];
    let inst = Instruction::at(&nop, 0);
    assert!(!inst.is_payload());
    assert_eq!(inst.code_units_required_for_size_computation(), 1);
    assert_eq!(inst.size_in_code_units(), 1);
}

#[test]
#[should_panic(expected = "past end of code")]
fn at_past_end_panics() {
    let code = [0x000e];
    Instruction::at(&code, 1);
}
