//! Encoded values, annotations, call sites and method handles.

use super::refs::{
    AnnotationRef, AnnotationSetRef, AnnotationSetRefListRef, EncodedArrayRef, FieldRef,
    MethodHandleRef, MethodRef, ProtoRef, StringRef, TypeRef,
};

/// A constant from an encoded array or annotation element.
#[derive(Clone, Debug, PartialEq)]
pub enum EncodedValue {
    Byte(i8),
    Short(i16),
    Char(u16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    MethodType(ProtoRef),
    MethodHandle(MethodHandleRef),
    String(StringRef),
    Type(TypeRef),
    Field(FieldRef),
    Method(MethodRef),
    Enum(FieldRef),
    Array(Vec<EncodedValue>),
    Annotation(EncodedAnnotation),
    Null,
    Boolean(bool),
}

#[derive(Clone, Debug, PartialEq)]
pub struct EncodedAnnotation {
    pub type_id: TypeRef,
    pub elements: Vec<AnnotationElement>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationElement {
    pub name: StringRef,
    pub value: EncodedValue,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EncodedArrayItem {
    pub offset: Option<u32>,
    pub values: Vec<EncodedValue>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Build,
    Runtime,
    System,
    Other(u8),
}

impl Visibility {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Build,
            1 => Self::Runtime,
            2 => Self::System,
            other => Self::Other(other),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Runtime => "runtime",
            Self::System => "system",
            Self::Other(_) => "unknown",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationItem {
    pub offset: Option<u32>,
    pub visibility: Visibility,
    pub annotation: EncodedAnnotation,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationSetItem {
    pub offset: Option<u32>,
    pub items: Vec<AnnotationRef>,
}

/// Per-parameter annotation sets; `None` marks a parameter without any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotationSetRefList {
    pub offset: Option<u32>,
    pub items: Vec<Option<AnnotationSetRef>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldAnnotation {
    pub field: FieldRef,
    pub annotations: AnnotationSetRef,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MethodAnnotation {
    pub method: MethodRef,
    pub annotations: AnnotationSetRef,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParameterAnnotation {
    pub method: MethodRef,
    pub annotations: AnnotationSetRefListRef,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnnotationsDirectoryItem {
    pub offset: Option<u32>,
    pub class_annotation: Option<AnnotationSetRef>,
    pub fields: Vec<FieldAnnotation>,
    pub methods: Vec<MethodAnnotation>,
    pub parameters: Vec<ParameterAnnotation>,
}

/// Bootstrap arguments of an invoke-custom call site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallSiteId {
    pub offset: Option<u32>,
    pub array: EncodedArrayRef,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodHandleType {
    StaticPut,
    StaticGet,
    InstancePut,
    InstanceGet,
    InvokeStatic,
    InvokeInstance,
    InvokeConstructor,
    InvokeDirect,
    InvokeInterface,
}

impl MethodHandleType {
    pub fn from_u16(v: u16) -> Option<Self> {
        Some(match v {
            0 => Self::StaticPut,
            1 => Self::StaticGet,
            2 => Self::InstancePut,
            3 => Self::InstanceGet,
            4 => Self::InvokeStatic,
            5 => Self::InvokeInstance,
            6 => Self::InvokeConstructor,
            7 => Self::InvokeDirect,
            8 => Self::InvokeInterface,
            _ => return None,
        })
    }

    /// Invoke handles target methods; the rest target fields.
    pub fn is_invoke(self) -> bool {
        matches!(
            self,
            Self::InvokeStatic
                | Self::InvokeInstance
                | Self::InvokeConstructor
                | Self::InvokeDirect
                | Self::InvokeInterface
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodHandleTarget {
    Field(FieldRef),
    Method(MethodRef),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MethodHandleItem {
    pub offset: Option<u32>,
    pub handle_type: MethodHandleType,
    pub target: MethodHandleTarget,
}
