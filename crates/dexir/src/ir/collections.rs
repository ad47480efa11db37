//! The owning store of every IR object built from one image.

use std::ops::{Index, IndexMut};

use dexir_format::format::{MapItem, MapItemType};

use super::code::{CodeItem, DebugInfoItem};
use super::items::{
    ClassData, ClassDef, FieldId, MethodId, ProtoId, StringData, StringId, TypeId, TypeList,
};
use super::refs::*;
use super::section::Section;
use super::values::{
    AnnotationItem, AnnotationSetItem, AnnotationSetRefList, AnnotationsDirectoryItem,
    CallSiteId, EncodedArrayItem, MethodHandleItem,
};

/// Every section of the IR. Id sections are in index order; data sections
/// are in disk order once the build finishes.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub(crate) string_ids: Section<StringRef, StringId>,
    pub(crate) type_ids: Section<TypeRef, TypeId>,
    pub(crate) proto_ids: Section<ProtoRef, ProtoId>,
    pub(crate) field_ids: Section<FieldRef, FieldId>,
    pub(crate) method_ids: Section<MethodRef, MethodId>,
    pub(crate) class_defs: Section<ClassDefRef, ClassDef>,
    pub(crate) call_site_ids: Section<CallSiteRef, CallSiteId>,
    pub(crate) method_handles: Section<MethodHandleRef, MethodHandleItem>,

    pub(crate) string_datas: Section<StringDataRef, StringData>,
    pub(crate) type_lists: Section<TypeListRef, TypeList>,
    pub(crate) encoded_arrays: Section<EncodedArrayRef, EncodedArrayItem>,
    pub(crate) annotations: Section<AnnotationRef, AnnotationItem>,
    pub(crate) annotation_sets: Section<AnnotationSetRef, AnnotationSetItem>,
    pub(crate) annotation_set_ref_lists: Section<AnnotationSetRefListRef, AnnotationSetRefList>,
    pub(crate) annotations_directories: Section<AnnotationsDirectoryRef, AnnotationsDirectoryItem>,
    pub(crate) debug_infos: Section<DebugInfoRef, DebugInfoItem>,
    pub(crate) code_items: Section<CodeItemRef, CodeItem>,
    pub(crate) class_datas: Section<ClassDataRef, ClassData>,

    pub(crate) map_list_offset: u32,
    pub(crate) hiddenapi_offset: Option<u32>,
    pub(crate) link_data: Vec<u8>,
}

macro_rules! section_access {
    ($($field:ident: $handle:ty => $item:ty;)*) => {
        impl Collections {
            $(
                pub fn $field(&self) -> &Section<$handle, $item> {
                    &self.$field
                }
            )*
        }

        $(
            impl Index<$handle> for Collections {
                type Output = $item;

                fn index(&self, handle: $handle) -> &$item {
                    &self.$field[handle]
                }
            }
        )*
    };
}

section_access! {
    string_ids: StringRef => StringId;
    type_ids: TypeRef => TypeId;
    proto_ids: ProtoRef => ProtoId;
    field_ids: FieldRef => FieldId;
    method_ids: MethodRef => MethodId;
    class_defs: ClassDefRef => ClassDef;
    call_site_ids: CallSiteRef => CallSiteId;
    method_handles: MethodHandleRef => MethodHandleItem;
    string_datas: StringDataRef => StringData;
    type_lists: TypeListRef => TypeList;
    encoded_arrays: EncodedArrayRef => EncodedArrayItem;
    annotations: AnnotationRef => AnnotationItem;
    annotation_sets: AnnotationSetRef => AnnotationSetItem;
    annotation_set_ref_lists: AnnotationSetRefListRef => AnnotationSetRefList;
    annotations_directories: AnnotationsDirectoryRef => AnnotationsDirectoryItem;
    debug_infos: DebugInfoRef => DebugInfoItem;
    code_items: CodeItemRef => CodeItem;
    class_datas: ClassDataRef => ClassData;
}

/// Code items are the one mutable part of the graph (instruction patching).
impl IndexMut<CodeItemRef> for Collections {
    fn index_mut(&mut self, handle: CodeItemRef) -> &mut CodeItem {
        &mut self.code_items[handle]
    }
}

impl Collections {
    pub fn map_list_offset(&self) -> u32 {
        self.map_list_offset
    }

    /// Offset of the hidden API data, when the map list has one.
    pub fn hiddenapi_offset(&self) -> Option<u32> {
        self.hiddenapi_offset
    }

    /// Raw link data region.
    pub fn link_data(&self) -> &[u8] {
        &self.link_data
    }

    /// Text of a string id.
    pub fn string(&self, s: StringRef) -> String {
        self.string_datas[self.string_ids[s].data].to_string_lossy()
    }

    /// Descriptor of a type id, e.g. `Ljava/lang/Object;`.
    pub fn descriptor(&self, t: TypeRef) -> String {
        self.string(self.type_ids[t].descriptor)
    }

    /// Descriptor-style signature of a proto, e.g. `(ILjava/lang/String;)V`.
    pub fn proto_signature(&self, p: ProtoRef) -> String {
        let proto = &self.proto_ids[p];
        let mut out = String::from("(");
        if let Some(params) = proto.parameters {
            for &t in &self.type_lists[params].types {
                out.push_str(&self.descriptor(t));
            }
        }
        out.push(')');
        out.push_str(&self.descriptor(proto.return_type));
        out
    }

    /// `Lpkg/Class;->name:Type`
    pub fn field_signature(&self, f: FieldRef) -> String {
        let field = &self.field_ids[f];
        format!(
            "{}->{}:{}",
            self.descriptor(field.class),
            self.string(field.name),
            self.descriptor(field.field_type)
        )
    }

    /// `Lpkg/Class;->name(Args)Ret`
    pub fn method_signature(&self, m: MethodRef) -> String {
        let method = &self.method_ids[m];
        format!(
            "{}->{}{}",
            self.descriptor(method.class),
            self.string(method.name),
            self.proto_signature(method.proto)
        )
    }

    /// The map list a writer would emit for this IR: one entry per
    /// non-empty section, ordered by offset.
    pub fn map_items(&self) -> Vec<MapItem> {
        let sections = [
            (MapItemType::StringIdItem, self.string_ids.len(), self.string_ids.offset()),
            (MapItemType::TypeIdItem, self.type_ids.len(), self.type_ids.offset()),
            (MapItemType::ProtoIdItem, self.proto_ids.len(), self.proto_ids.offset()),
            (MapItemType::FieldIdItem, self.field_ids.len(), self.field_ids.offset()),
            (MapItemType::MethodIdItem, self.method_ids.len(), self.method_ids.offset()),
            (MapItemType::ClassDefItem, self.class_defs.len(), self.class_defs.offset()),
            (MapItemType::CallSiteIdItem, self.call_site_ids.len(), self.call_site_ids.offset()),
            (MapItemType::MethodHandleItem, self.method_handles.len(), self.method_handles.offset()),
            (MapItemType::TypeList, self.type_lists.len(), self.type_lists.offset()),
            (
                MapItemType::AnnotationSetRefList,
                self.annotation_set_ref_lists.len(),
                self.annotation_set_ref_lists.offset(),
            ),
            (MapItemType::AnnotationSetItem, self.annotation_sets.len(), self.annotation_sets.offset()),
            (MapItemType::ClassDataItem, self.class_datas.len(), self.class_datas.offset()),
            (MapItemType::CodeItem, self.code_items.len(), self.code_items.offset()),
            (MapItemType::StringDataItem, self.string_datas.len(), self.string_datas.offset()),
            (MapItemType::DebugInfoItem, self.debug_infos.len(), self.debug_infos.offset()),
            (MapItemType::AnnotationItem, self.annotations.len(), self.annotations.offset()),
            (MapItemType::EncodedArrayItem, self.encoded_arrays.len(), self.encoded_arrays.offset()),
            (
                MapItemType::AnnotationsDirectoryItem,
                self.annotations_directories.len(),
                self.annotations_directories.offset(),
            ),
        ];

        let mut items = vec![entry(MapItemType::HeaderItem, 1, 0)];
        items.extend(
            sections
                .into_iter()
                .filter(|&(_, len, _)| len > 0)
                .map(|(t, len, offset)| entry(t, len as u32, offset)),
        );
        if let Some(offset) = self.hiddenapi_offset {
            items.push(entry(MapItemType::HiddenapiClassData, 1, offset));
        }
        items.push(entry(MapItemType::MapList, 1, self.map_list_offset));
        items.sort_by_key(|item| item.offset);
        items
    }

    /// Put every data section into disk order.
    pub(crate) fn sort_by_map_order(&mut self) {
        self.string_datas.sort_by_disk_offset();
        self.type_lists.sort_by_disk_offset();
        self.encoded_arrays.sort_by_disk_offset();
        self.annotations.sort_by_disk_offset();
        self.annotation_sets.sort_by_disk_offset();
        self.annotation_set_ref_lists.sort_by_disk_offset();
        self.annotations_directories.sort_by_disk_offset();
        self.debug_infos.sort_by_disk_offset();
        self.code_items.sort_by_disk_offset();
        self.class_datas.sort_by_disk_offset();
    }
}

fn entry(item_type: MapItemType, size: u32, offset: u32) -> MapItem {
    MapItem {
        type_code: item_type as u16,
        size,
        offset,
    }
}
