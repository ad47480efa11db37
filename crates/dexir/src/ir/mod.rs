//! The in-memory graph of a DEX image.
//!
//! Every object lives in a [`Section`] owned by [`Collections`] and is
//! addressed by a typed handle from [`refs`]. Cross references are handles,
//! so two references to the same disk object compare equal.

mod code;
mod collections;
mod dump;
mod header;
mod items;
mod node;
pub mod refs;
mod section;
mod values;

#[cfg(test)]
mod collections_tests;
#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod section_tests;

pub use code::{
    CatchHandler, CodeFixups, CodeItem, DebugInfoItem, TruncatedCode, TryItem, TypeAddrPair,
};
pub use collections::Collections;
pub use dump::dump;
pub use header::Header;
pub use items::{
    ClassData, ClassDef, FieldId, FieldItem, MethodId, MethodItem, ProtoId, StringData, StringId,
    TypeId, TypeList,
};
pub use node::Node;
pub use refs::*;
pub use section::Section;
pub use values::{
    AnnotationElement, AnnotationItem, AnnotationSetItem, AnnotationSetRefList,
    AnnotationsDirectoryItem, CallSiteId, EncodedAnnotation, EncodedArrayItem, EncodedValue,
    FieldAnnotation, MethodAnnotation, MethodHandleItem, MethodHandleTarget, MethodHandleType,
    ParameterAnnotation, Visibility,
};
