//! Id-table entities and class structure.

use dexir_format::format::decode_lossy;

use super::refs::{
    AnnotationsDirectoryRef, ClassDataRef, CodeItemRef, EncodedArrayRef, FieldRef, MethodRef,
    ProtoRef, StringDataRef, StringRef, TypeListRef, TypeRef,
};

/// Raw MUTF-8 contents of one string table entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringData {
    pub offset: Option<u32>,
    pub utf16_size: u32,
    pub data: Box<[u8]>,
}

impl StringData {
    pub fn to_string_lossy(&self) -> String {
        decode_lossy(&self.data)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringId {
    pub offset: Option<u32>,
    pub data: StringDataRef,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeId {
    pub offset: Option<u32>,
    pub descriptor: StringRef,
}

/// Ordered type references, shared between protos and interface lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeList {
    pub offset: Option<u32>,
    pub types: Vec<TypeRef>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtoId {
    pub offset: Option<u32>,
    pub shorty: StringRef,
    pub return_type: TypeRef,
    pub parameters: Option<TypeListRef>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldId {
    pub offset: Option<u32>,
    pub class: TypeRef,
    pub field_type: TypeRef,
    pub name: StringRef,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodId {
    pub offset: Option<u32>,
    pub class: TypeRef,
    pub proto: ProtoRef,
    pub name: StringRef,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDef {
    pub offset: Option<u32>,
    pub class_type: TypeRef,
    pub access_flags: u32,
    pub superclass: Option<TypeRef>,
    pub interfaces: Option<TypeListRef>,
    pub source_file: Option<StringRef>,
    pub annotations: Option<AnnotationsDirectoryRef>,
    pub static_values: Option<EncodedArrayRef>,
    pub class_data: Option<ClassDataRef>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldItem {
    pub access_flags: u32,
    pub field: FieldRef,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MethodItem {
    pub access_flags: u32,
    pub method: MethodRef,
    pub code: Option<CodeItemRef>,
    /// The class data that owns this entry.
    pub class_data: ClassDataRef,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassData {
    pub offset: Option<u32>,
    pub static_fields: Vec<FieldItem>,
    pub instance_fields: Vec<FieldItem>,
    pub direct_methods: Vec<MethodItem>,
    pub virtual_methods: Vec<MethodItem>,
}

impl ClassData {
    pub fn fields(&self) -> impl Iterator<Item = &FieldItem> {
        self.static_fields.iter().chain(&self.instance_fields)
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodItem> {
        self.direct_methods.iter().chain(&self.virtual_methods)
    }
}
