//! Dalvik opcode table.
//!
//! One entry per opcode byte: mnemonic, encoding format and the kind of
//! index (if any) the instruction carries. The width table is derived from
//! the formats at compile time.

use std::fmt;

/// Instruction encoding format, named as in the Dalvik bytecode docs.
///
/// The first digit is the width in code units, the second the register
/// count, the letter the kind of extra data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    F10x,
    F12x,
    F11n,
    F11x,
    F10t,
    F20t,
    F22x,
    F21t,
    F21s,
    F21h,
    F21c,
    F23x,
    F22b,
    F22t,
    F22s,
    F22c,
    F32x,
    F30t,
    F31t,
    F31i,
    F31c,
    F35c,
    F3rc,
    F45cc,
    F4rcc,
    F51l,
}

impl Format {
    /// Width in 16-bit code units.
    pub const fn width(self) -> u8 {
        match self {
            Format::F10x | Format::F12x | Format::F11n | Format::F11x | Format::F10t => 1,
            Format::F20t
            | Format::F22x
            | Format::F21t
            | Format::F21s
            | Format::F21h
            | Format::F21c
            | Format::F23x
            | Format::F22b
            | Format::F22t
            | Format::F22s
            | Format::F22c => 2,
            Format::F32x
            | Format::F30t
            | Format::F31t
            | Format::F31i
            | Format::F31c
            | Format::F35c
            | Format::F3rc => 3,
            Format::F45cc | Format::F4rcc => 4,
            Format::F51l => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::F10x => "10x",
            Format::F12x => "12x",
            Format::F11n => "11n",
            Format::F11x => "11x",
            Format::F10t => "10t",
            Format::F20t => "20t",
            Format::F22x => "22x",
            Format::F21t => "21t",
            Format::F21s => "21s",
            Format::F21h => "21h",
            Format::F21c => "21c",
            Format::F23x => "23x",
            Format::F22b => "22b",
            Format::F22t => "22t",
            Format::F22s => "22s",
            Format::F22c => "22c",
            Format::F32x => "32x",
            Format::F30t => "30t",
            Format::F31t => "31t",
            Format::F31i => "31i",
            Format::F31c => "31c",
            Format::F35c => "35c",
            Format::F3rc => "3rc",
            Format::F45cc => "45cc",
            Format::F4rcc => "4rcc",
            Format::F51l => "51l",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the index operand of an instruction refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexType {
    None,
    StringRef,
    TypeRef,
    FieldRef,
    MethodRef,
    /// invoke-polymorphic: method in B, proto in H.
    MethodAndProtoRef,
    CallSiteRef,
    MethodHandleRef,
    ProtoRef,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub name: &'static str,
    pub format: Format,
    pub index_type: IndexType,
}

const fn op(name: &'static str, format: Format, index_type: IndexType) -> OpcodeInfo {
    OpcodeInfo {
        name,
        format,
        index_type,
    }
}

/// A one-byte opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Opcode(pub u8);

impl Opcode {
    pub const NOP: Opcode = Opcode(0x00);
    pub const CONST_STRING: Opcode = Opcode(0x1a);
    pub const CONST_STRING_JUMBO: Opcode = Opcode(0x1b);
    pub const FILL_ARRAY_DATA: Opcode = Opcode(0x26);
    pub const PACKED_SWITCH: Opcode = Opcode(0x2b);
    pub const SPARSE_SWITCH: Opcode = Opcode(0x2c);
    pub const INVOKE_POLYMORPHIC: Opcode = Opcode(0xfa);
    pub const INVOKE_POLYMORPHIC_RANGE: Opcode = Opcode(0xfb);

    pub fn info(self) -> &'static OpcodeInfo {
        &OPCODES[self.0 as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn format(self) -> Format {
        self.info().format
    }

    pub fn index_type(self) -> IndexType {
        self.info().index_type
    }

    /// Width in code units, 0 when the size depends on the instruction's data.
    pub fn width(self) -> u8 {
        INSTRUCTION_WIDTHS[self.0 as usize]
    }

    pub fn is_unused(self) -> bool {
        self.name().starts_with("unused-")
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opcode byte -> width in code units. `nop` is 0: it may head a payload
/// whose size comes from the payload header.
pub static INSTRUCTION_WIDTHS: [u8; 256] = widths();

const fn widths() -> [u8; 256] {
    let mut out = [0u8; 256];
    let mut i = 1;
    while i < 256 {
        out[i] = OPCODE_TABLE[i].format.width();
        i += 1;
    }
    out
}

/// Opcode byte -> description.
pub static OPCODES: [OpcodeInfo; 256] = OPCODE_TABLE;

const OPCODE_TABLE: [OpcodeInfo; 256] = [
    op("nop", Format::F10x, IndexType::None), // 0x00
    op("move", Format::F12x, IndexType::None), // 0x01
    op("move/from16", Format::F22x, IndexType::None), // 0x02
    op("move/16", Format::F32x, IndexType::None), // 0x03
    op("move-wide", Format::F12x, IndexType::None), // 0x04
    op("move-wide/from16", Format::F22x, IndexType::None), // 0x05
    op("move-wide/16", Format::F32x, IndexType::None), // 0x06
    op("move-object", Format::F12x, IndexType::None), // 0x07
    op("move-object/from16", Format::F22x, IndexType::None), // 0x08
    op("move-object/16", Format::F32x, IndexType::None), // 0x09
    op("move-result", Format::F11x, IndexType::None), // 0x0a
    op("move-result-wide", Format::F11x, IndexType::None), // 0x0b
    op("move-result-object", Format::F11x, IndexType::None), // 0x0c
    op("move-exception", Format::F11x, IndexType::None), // 0x0d
    op("return-void", Format::F10x, IndexType::None), // 0x0e
    op("return", Format::F11x, IndexType::None), // 0x0f
    op("return-wide", Format::F11x, IndexType::None), // 0x10
    op("return-object", Format::F11x, IndexType::None), // 0x11
    op("const/4", Format::F11n, IndexType::None), // 0x12
    op("const/16", Format::F21s, IndexType::None), // 0x13
    op("const", Format::F31i, IndexType::None), // 0x14
    op("const/high16", Format::F21h, IndexType::None), // 0x15
    op("const-wide/16", Format::F21s, IndexType::None), // 0x16
    op("const-wide/32", Format::F31i, IndexType::None), // 0x17
    op("const-wide", Format::F51l, IndexType::None), // 0x18
    op("const-wide/high16", Format::F21h, IndexType::None), // 0x19
    op("const-string", Format::F21c, IndexType::StringRef), // 0x1a
    op("const-string/jumbo", Format::F31c, IndexType::StringRef), // 0x1b
    op("const-class", Format::F21c, IndexType::TypeRef), // 0x1c
    op("monitor-enter", Format::F11x, IndexType::None), // 0x1d
    op("monitor-exit", Format::F11x, IndexType::None), // 0x1e
    op("check-cast", Format::F21c, IndexType::TypeRef), // 0x1f
    op("instance-of", Format::F22c, IndexType::TypeRef), // 0x20
    op("array-length", Format::F12x, IndexType::None), // 0x21
    op("new-instance", Format::F21c, IndexType::TypeRef), // 0x22
    op("new-array", Format::F22c, IndexType::TypeRef), // 0x23
    op("filled-new-array", Format::F35c, IndexType::TypeRef), // 0x24
    op("filled-new-array/range", Format::F3rc, IndexType::TypeRef), // 0x25
    op("fill-array-data", Format::F31t, IndexType::None), // 0x26
    op("throw", Format::F11x, IndexType::None), // 0x27
    op("goto", Format::F10t, IndexType::None), // 0x28
    op("goto/16", Format::F20t, IndexType::None), // 0x29
    op("goto/32", Format::F30t, IndexType::None), // 0x2a
    op("packed-switch", Format::F31t, IndexType::None), // 0x2b
    op("sparse-switch", Format::F31t, IndexType::None), // 0x2c
    op("cmpl-float", Format::F23x, IndexType::None), // 0x2d
    op("cmpg-float", Format::F23x, IndexType::None), // 0x2e
    op("cmpl-double", Format::F23x, IndexType::None), // 0x2f
    op("cmpg-double", Format::F23x, IndexType::None), // 0x30
    op("cmp-long", Format::F23x, IndexType::None), // 0x31
    op("if-eq", Format::F22t, IndexType::None), // 0x32
    op("if-ne", Format::F22t, IndexType::None), // 0x33
    op("if-lt", Format::F22t, IndexType::None), // 0x34
    op("if-ge", Format::F22t, IndexType::None), // 0x35
    op("if-gt", Format::F22t, IndexType::None), // 0x36
    op("if-le", Format::F22t, IndexType::None), // 0x37
    op("if-eqz", Format::F21t, IndexType::None), // 0x38
    op("if-nez", Format::F21t, IndexType::None), // 0x39
    op("if-ltz", Format::F21t, IndexType::None), // 0x3a
    op("if-gez", Format::F21t, IndexType::None), // 0x3b
    op("if-gtz", Format::F21t, IndexType::None), // 0x3c
    op("if-lez", Format::F21t, IndexType::None), // 0x3d
    op("unused-3e", Format::F10x, IndexType::None), // 0x3e
    op("unused-3f", Format::F10x, IndexType::None), // 0x3f
    op("unused-40", Format::F10x, IndexType::None), // 0x40
    op("unused-41", Format::F10x, IndexType::None), // 0x41
    op("unused-42", Format::F10x, IndexType::None), // 0x42
    op("unused-43", Format::F10x, IndexType::None), // 0x43
    op("aget", Format::F23x, IndexType::None), // 0x44
    op("aget-wide", Format::F23x, IndexType::None), // 0x45
    op("aget-object", Format::F23x, IndexType::None), // 0x46
    op("aget-boolean", Format::F23x, IndexType::None), // 0x47
    op("aget-byte", Format::F23x, IndexType::None), // 0x48
    op("aget-char", Format::F23x, IndexType::None), // 0x49
    op("aget-short", Format::F23x, IndexType::None), // 0x4a
    op("aput", Format::F23x, IndexType::None), // 0x4b
    op("aput-wide", Format::F23x, IndexType::None), // 0x4c
    op("aput-object", Format::F23x, IndexType::None), // 0x4d
    op("aput-boolean", Format::F23x, IndexType::None), // 0x4e
    op("aput-byte", Format::F23x, IndexType::None), // 0x4f
    op("aput-char", Format::F23x, IndexType::None), // 0x50
    op("aput-short", Format::F23x, IndexType::None), // 0x51
    op("iget", Format::F22c, IndexType::FieldRef), // 0x52
    op("iget-wide", Format::F22c, IndexType::FieldRef), // 0x53
    op("iget-object", Format::F22c, IndexType::FieldRef), // 0x54
    op("iget-boolean", Format::F22c, IndexType::FieldRef), // 0x55
    op("iget-byte", Format::F22c, IndexType::FieldRef), // 0x56
    op("iget-char", Format::F22c, IndexType::FieldRef), // 0x57
    op("iget-short", Format::F22c, IndexType::FieldRef), // 0x58
    op("iput", Format::F22c, IndexType::FieldRef), // 0x59
    op("iput-wide", Format::F22c, IndexType::FieldRef), // 0x5a
    op("iput-object", Format::F22c, IndexType::FieldRef), // 0x5b
    op("iput-boolean", Format::F22c, IndexType::FieldRef), // 0x5c
    op("iput-byte", Format::F22c, IndexType::FieldRef), // 0x5d
    op("iput-char", Format::F22c, IndexType::FieldRef), // 0x5e
    op("iput-short", Format::F22c, IndexType::FieldRef), // 0x5f
    op("sget", Format::F21c, IndexType::FieldRef), // 0x60
    op("sget-wide", Format::F21c, IndexType::FieldRef), // 0x61
    op("sget-object", Format::F21c, IndexType::FieldRef), // 0x62
    op("sget-boolean", Format::F21c, IndexType::FieldRef), // 0x63
    op("sget-byte", Format::F21c, IndexType::FieldRef), // 0x64
    op("sget-char", Format::F21c, IndexType::FieldRef), // 0x65
    op("sget-short", Format::F21c, IndexType::FieldRef), // 0x66
    op("sput", Format::F21c, IndexType::FieldRef), // 0x67
    op("sput-wide", Format::F21c, IndexType::FieldRef), // 0x68
    op("sput-object", Format::F21c, IndexType::FieldRef), // 0x69
    op("sput-boolean", Format::F21c, IndexType::FieldRef), // 0x6a
    op("sput-byte", Format::F21c, IndexType::FieldRef), // 0x6b
    op("sput-char", Format::F21c, IndexType::FieldRef), // 0x6c
    op("sput-short", Format::F21c, IndexType::FieldRef), // 0x6d
    op("invoke-virtual", Format::F35c, IndexType::MethodRef), // 0x6e
    op("invoke-super", Format::F35c, IndexType::MethodRef), // 0x6f
    op("invoke-direct", Format::F35c, IndexType::MethodRef), // 0x70
    op("invoke-static", Format::F35c, IndexType::MethodRef), // 0x71
    op("invoke-interface", Format::F35c, IndexType::MethodRef), // 0x72
    op("unused-73", Format::F10x, IndexType::None), // 0x73
    op("invoke-virtual/range", Format::F3rc, IndexType::MethodRef), // 0x74
    op("invoke-super/range", Format::F3rc, IndexType::MethodRef), // 0x75
    op("invoke-direct/range", Format::F3rc, IndexType::MethodRef), // 0x76
    op("invoke-static/range", Format::F3rc, IndexType::MethodRef), // 0x77
    op("invoke-interface/range", Format::F3rc, IndexType::MethodRef), // 0x78
    op("unused-79", Format::F10x, IndexType::None), // 0x79
    op("unused-7a", Format::F10x, IndexType::None), // 0x7a
    op("neg-int", Format::F12x, IndexType::None), // 0x7b
    op("not-int", Format::F12x, IndexType::None), // 0x7c
    op("neg-long", Format::F12x, IndexType::None), // 0x7d
    op("not-long", Format::F12x, IndexType::None), // 0x7e
    op("neg-float", Format::F12x, IndexType::None), // 0x7f
    op("neg-double", Format::F12x, IndexType::None), // 0x80
    op("int-to-long", Format::F12x, IndexType::None), // 0x81
    op("int-to-float", Format::F12x, IndexType::None), // 0x82
    op("int-to-double", Format::F12x, IndexType::None), // 0x83
    op("long-to-int", Format::F12x, IndexType::None), // 0x84
    op("long-to-float", Format::F12x, IndexType::None), // 0x85
    op("long-to-double", Format::F12x, IndexType::None), // 0x86
    op("float-to-int", Format::F12x, IndexType::None), // 0x87
    op("float-to-long", Format::F12x, IndexType::None), // 0x88
    op("float-to-double", Format::F12x, IndexType::None), // 0x89
    op("double-to-int", Format::F12x, IndexType::None), // 0x8a
    op("double-to-long", Format::F12x, IndexType::None), // 0x8b
    op("double-to-float", Format::F12x, IndexType::None), // 0x8c
    op("int-to-byte", Format::F12x, IndexType::None), // 0x8d
    op("int-to-char", Format::F12x, IndexType::None), // 0x8e
    op("int-to-short", Format::F12x, IndexType::None), // 0x8f
    op("add-int", Format::F23x, IndexType::None), // 0x90
    op("sub-int", Format::F23x, IndexType::None), // 0x91
    op("mul-int", Format::F23x, IndexType::None), // 0x92
    op("div-int", Format::F23x, IndexType::None), // 0x93
    op("rem-int", Format::F23x, IndexType::None), // 0x94
    op("and-int", Format::F23x, IndexType::None), // 0x95
    op("or-int", Format::F23x, IndexType::None), // 0x96
    op("xor-int", Format::F23x, IndexType::None), // 0x97
    op("shl-int", Format::F23x, IndexType::None), // 0x98
    op("shr-int", Format::F23x, IndexType::None), // 0x99
    op("ushr-int", Format::F23x, IndexType::None), // 0x9a
    op("add-long", Format::F23x, IndexType::None), // 0x9b
    op("sub-long", Format::F23x, IndexType::None), // 0x9c
    op("mul-long", Format::F23x, IndexType::None), // 0x9d
    op("div-long", Format::F23x, IndexType::None), // 0x9e
    op("rem-long", Format::F23x, IndexType::None), // 0x9f
    op("and-long", Format::F23x, IndexType::None), // 0xa0
    op("or-long", Format::F23x, IndexType::None), // 0xa1
    op("xor-long", Format::F23x, IndexType::None), // 0xa2
    op("shl-long", Format::F23x, IndexType::None), // 0xa3
    op("shr-long", Format::F23x, IndexType::None), // 0xa4
    op("ushr-long", Format::F23x, IndexType::None), // 0xa5
    op("add-float", Format::F23x, IndexType::None), // 0xa6
    op("sub-float", Format::F23x, IndexType::None), // 0xa7
    op("mul-float", Format::F23x, IndexType::None), // 0xa8
    op("div-float", Format::F23x, IndexType::None), // 0xa9
    op("rem-float", Format::F23x, IndexType::None), // 0xaa
    op("add-double", Format::F23x, IndexType::None), // 0xab
    op("sub-double", Format::F23x, IndexType::None), // 0xac
    op("mul-double", Format::F23x, IndexType::None), // 0xad
    op("div-double", Format::F23x, IndexType::None), // 0xae
    op("rem-double", Format::F23x, IndexType::None), // 0xaf
    op("add-int/2addr", Format::F12x, IndexType::None), // 0xb0
    op("sub-int/2addr", Format::F12x, IndexType::None), // 0xb1
    op("mul-int/2addr", Format::F12x, IndexType::None), // 0xb2
    op("div-int/2addr", Format::F12x, IndexType::None), // 0xb3
    op("rem-int/2addr", Format::F12x, IndexType::None), // 0xb4
    op("and-int/2addr", Format::F12x, IndexType::None), // 0xb5
    op("or-int/2addr", Format::F12x, IndexType::None), // 0xb6
    op("xor-int/2addr", Format::F12x, IndexType::None), // 0xb7
    op("shl-int/2addr", Format::F12x, IndexType::None), // 0xb8
    op("shr-int/2addr", Format::F12x, IndexType::None), // 0xb9
    op("ushr-int/2addr", Format::F12x, IndexType::None), // 0xba
    op("add-long/2addr", Format::F12x, IndexType::None), // 0xbb
    op("sub-long/2addr", Format::F12x, IndexType::None), // 0xbc
    op("mul-long/2addr", Format::F12x, IndexType::None), // 0xbd
    op("div-long/2addr", Format::F12x, IndexType::None), // 0xbe
    op("rem-long/2addr", Format::F12x, IndexType::None), // 0xbf
    op("and-long/2addr", Format::F12x, IndexType::None), // 0xc0
    op("or-long/2addr", Format::F12x, IndexType::None), // 0xc1
    op("xor-long/2addr", Format::F12x, IndexType::None), // 0xc2
    op("shl-long/2addr", Format::F12x, IndexType::None), // 0xc3
    op("shr-long/2addr", Format::F12x, IndexType::None), // 0xc4
    op("ushr-long/2addr", Format::F12x, IndexType::None), // 0xc5
    op("add-float/2addr", Format::F12x, IndexType::None), // 0xc6
    op("sub-float/2addr", Format::F12x, IndexType::None), // 0xc7
    op("mul-float/2addr", Format::F12x, IndexType::None), // 0xc8
    op("div-float/2addr", Format::F12x, IndexType::None), // 0xc9
    op("rem-float/2addr", Format::F12x, IndexType::None), // 0xca
    op("add-double/2addr", Format::F12x, IndexType::None), // 0xcb
    op("sub-double/2addr", Format::F12x, IndexType::None), // 0xcc
    op("mul-double/2addr", Format::F12x, IndexType::None), // 0xcd
    op("div-double/2addr", Format::F12x, IndexType::None), // 0xce
    op("rem-double/2addr", Format::F12x, IndexType::None), // 0xcf
    op("add-int/lit16", Format::F22s, IndexType::None), // 0xd0
    op("rsub-int", Format::F22s, IndexType::None), // 0xd1
    op("mul-int/lit16", Format::F22s, IndexType::None), // 0xd2
    op("div-int/lit16", Format::F22s, IndexType::None), // 0xd3
    op("rem-int/lit16", Format::F22s, IndexType::None), // 0xd4
    op("and-int/lit16", Format::F22s, IndexType::None), // 0xd5
    op("or-int/lit16", Format::F22s, IndexType::None), // 0xd6
    op("xor-int/lit16", Format::F22s, IndexType::None), // 0xd7
    op("add-int/lit8", Format::F22b, IndexType::None), // 0xd8
    op("rsub-int/lit8", Format::F22b, IndexType::None), // 0xd9
    op("mul-int/lit8", Format::F22b, IndexType::None), // 0xda
    op("div-int/lit8", Format::F22b, IndexType::None), // 0xdb
    op("rem-int/lit8", Format::F22b, IndexType::None), // 0xdc
    op("and-int/lit8", Format::F22b, IndexType::None), // 0xdd
    op("or-int/lit8", Format::F22b, IndexType::None), // 0xde
    op("xor-int/lit8", Format::F22b, IndexType::None), // 0xdf
    op("shl-int/lit8", Format::F22b, IndexType::None), // 0xe0
    op("shr-int/lit8", Format::F22b, IndexType::None), // 0xe1
    op("ushr-int/lit8", Format::F22b, IndexType::None), // 0xe2
    op("unused-e3", Format::F10x, IndexType::None), // 0xe3
    op("unused-e4", Format::F10x, IndexType::None), // 0xe4
    op("unused-e5", Format::F10x, IndexType::None), // 0xe5
    op("unused-e6", Format::F10x, IndexType::None), // 0xe6
    op("unused-e7", Format::F10x, IndexType::None), // 0xe7
    op("unused-e8", Format::F10x, IndexType::None), // 0xe8
    op("unused-e9", Format::F10x, IndexType::None), // 0xe9
    op("unused-ea", Format::F10x, IndexType::None), // 0xea
    op("unused-eb", Format::F10x, IndexType::None), // 0xeb
    op("unused-ec", Format::F10x, IndexType::None), // 0xec
    op("unused-ed", Format::F10x, IndexType::None), // 0xed
    op("unused-ee", Format::F10x, IndexType::None), // 0xee
    op("unused-ef", Format::F10x, IndexType::None), // 0xef
    op("unused-f0", Format::F10x, IndexType::None), // 0xf0
    op("unused-f1", Format::F10x, IndexType::None), // 0xf1
    op("unused-f2", Format::F10x, IndexType::None), // 0xf2
    op("unused-f3", Format::F10x, IndexType::None), // 0xf3
    op("unused-f4", Format::F10x, IndexType::None), // 0xf4
    op("unused-f5", Format::F10x, IndexType::None), // 0xf5
    op("unused-f6", Format::F10x, IndexType::None), // 0xf6
    op("unused-f7", Format::F10x, IndexType::None), // 0xf7
    op("unused-f8", Format::F10x, IndexType::None), // 0xf8
    op("unused-f9", Format::F10x, IndexType::None), // 0xf9
    op("invoke-polymorphic", Format::F45cc, IndexType::MethodAndProtoRef), // 0xfa
    op("invoke-polymorphic/range", Format::F4rcc, IndexType::MethodAndProtoRef), // 0xfb
    op("invoke-custom", Format::F35c, IndexType::CallSiteRef), // 0xfc
    op("invoke-custom/range", Format::F3rc, IndexType::CallSiteRef), // 0xfd
    op("const-method-handle", Format::F21c, IndexType::MethodHandleRef), // 0xfe
    op("const-method-type", Format::F21c, IndexType::ProtoRef), // 0xff
];
