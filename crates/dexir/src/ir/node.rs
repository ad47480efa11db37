//! Uniform traversal over the heterogeneous IR.

use dexir_format::format::MapItemType;

use super::code::{CodeItem, DebugInfoItem};
use super::header::Header;
use super::items::{
    ClassData, ClassDef, FieldId, MethodId, ProtoId, StringData, StringId, TypeId, TypeList,
};
use super::refs::*;
use super::values::{
    AnnotationItem, AnnotationSetItem, AnnotationSetRefList, AnnotationsDirectoryItem,
    CallSiteId, EncodedArrayItem, MethodHandleItem,
};

/// One IR object together with its handle.
#[derive(Clone, Copy, Debug)]
pub enum Node<'a> {
    Header(&'a Header),
    StringId(StringRef, &'a StringId),
    TypeId(TypeRef, &'a TypeId),
    ProtoId(ProtoRef, &'a ProtoId),
    FieldId(FieldRef, &'a FieldId),
    MethodId(MethodRef, &'a MethodId),
    ClassDef(ClassDefRef, &'a ClassDef),
    CallSiteId(CallSiteRef, &'a CallSiteId),
    MethodHandle(MethodHandleRef, &'a MethodHandleItem),
    StringData(StringDataRef, &'a StringData),
    TypeList(TypeListRef, &'a TypeList),
    EncodedArray(EncodedArrayRef, &'a EncodedArrayItem),
    Annotation(AnnotationRef, &'a AnnotationItem),
    AnnotationSet(AnnotationSetRef, &'a AnnotationSetItem),
    AnnotationSetRefList(AnnotationSetRefListRef, &'a AnnotationSetRefList),
    AnnotationsDirectory(AnnotationsDirectoryRef, &'a AnnotationsDirectoryItem),
    DebugInfo(DebugInfoRef, &'a DebugInfoItem),
    CodeItem(CodeItemRef, &'a CodeItem),
    ClassData(ClassDataRef, &'a ClassData),
}

impl Node<'_> {
    /// The map list section this node belongs to.
    pub fn kind(&self) -> MapItemType {
        match self {
            Node::Header(_) => MapItemType::HeaderItem,
            Node::StringId(..) => MapItemType::StringIdItem,
            Node::TypeId(..) => MapItemType::TypeIdItem,
            Node::ProtoId(..) => MapItemType::ProtoIdItem,
            Node::FieldId(..) => MapItemType::FieldIdItem,
            Node::MethodId(..) => MapItemType::MethodIdItem,
            Node::ClassDef(..) => MapItemType::ClassDefItem,
            Node::CallSiteId(..) => MapItemType::CallSiteIdItem,
            Node::MethodHandle(..) => MapItemType::MethodHandleItem,
            Node::StringData(..) => MapItemType::StringDataItem,
            Node::TypeList(..) => MapItemType::TypeList,
            Node::EncodedArray(..) => MapItemType::EncodedArrayItem,
            Node::Annotation(..) => MapItemType::AnnotationItem,
            Node::AnnotationSet(..) => MapItemType::AnnotationSetItem,
            Node::AnnotationSetRefList(..) => MapItemType::AnnotationSetRefList,
            Node::AnnotationsDirectory(..) => MapItemType::AnnotationsDirectoryItem,
            Node::DebugInfo(..) => MapItemType::DebugInfoItem,
            Node::CodeItem(..) => MapItemType::CodeItem,
            Node::ClassData(..) => MapItemType::ClassDataItem,
        }
    }

    /// Disk offset, when offsets were assigned during the build.
    pub fn offset(&self) -> Option<u32> {
        match self {
            Node::Header(_) => Some(0),
            Node::StringId(_, n) => n.offset,
            Node::TypeId(_, n) => n.offset,
            Node::ProtoId(_, n) => n.offset,
            Node::FieldId(_, n) => n.offset,
            Node::MethodId(_, n) => n.offset,
            Node::ClassDef(_, n) => n.offset,
            Node::CallSiteId(_, n) => n.offset,
            Node::MethodHandle(_, n) => n.offset,
            Node::StringData(_, n) => n.offset,
            Node::TypeList(_, n) => n.offset,
            Node::EncodedArray(_, n) => n.offset,
            Node::Annotation(_, n) => n.offset,
            Node::AnnotationSet(_, n) => n.offset,
            Node::AnnotationSetRefList(_, n) => n.offset,
            Node::AnnotationsDirectory(_, n) => n.offset,
            Node::DebugInfo(_, n) => n.offset,
            Node::CodeItem(_, n) => n.offset,
            Node::ClassData(_, n) => n.offset,
        }
    }
}

impl Header {
    /// Visit the header and then every object, section by section in map
    /// order, each section in its own order.
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(Node<'a>)) {
        let c = &self.collections;
        visit(Node::Header(self));

        macro_rules! each {
            ($section:ident, $variant:ident) => {
                for (h, n) in c.$section.iter() {
                    visit(Node::$variant(h, n));
                }
            };
        }

        for entry in c.map_items() {
            let Some(kind) = entry.item_type() else {
                continue;
            };
            match kind {
                MapItemType::HeaderItem
                | MapItemType::MapList
                | MapItemType::HiddenapiClassData => {}
                MapItemType::StringIdItem => each!(string_ids, StringId),
                MapItemType::TypeIdItem => each!(type_ids, TypeId),
                MapItemType::ProtoIdItem => each!(proto_ids, ProtoId),
                MapItemType::FieldIdItem => each!(field_ids, FieldId),
                MapItemType::MethodIdItem => each!(method_ids, MethodId),
                MapItemType::ClassDefItem => each!(class_defs, ClassDef),
                MapItemType::CallSiteIdItem => each!(call_site_ids, CallSiteId),
                MapItemType::MethodHandleItem => each!(method_handles, MethodHandle),
                MapItemType::StringDataItem => each!(string_datas, StringData),
                MapItemType::TypeList => each!(type_lists, TypeList),
                MapItemType::EncodedArrayItem => each!(encoded_arrays, EncodedArray),
                MapItemType::AnnotationItem => each!(annotations, Annotation),
                MapItemType::AnnotationSetItem => each!(annotation_sets, AnnotationSet),
                MapItemType::AnnotationSetRefList => {
                    each!(annotation_set_ref_lists, AnnotationSetRefList)
                }
                MapItemType::AnnotationsDirectoryItem => {
                    each!(annotations_directories, AnnotationsDirectory)
                }
                MapItemType::DebugInfoItem => each!(debug_infos, DebugInfo),
                MapItemType::CodeItem => each!(code_items, CodeItem),
                MapItemType::ClassDataItem => each!(class_datas, ClassData),
            }
        }
    }
}
