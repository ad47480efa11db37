//! The map list: the file's own directory of sections.

use std::fmt;

use super::error::Result;
use super::reader::DexReader;

/// Section kinds named by map list entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum MapItemType {
    HeaderItem = 0x0000,
    StringIdItem = 0x0001,
    TypeIdItem = 0x0002,
    ProtoIdItem = 0x0003,
    FieldIdItem = 0x0004,
    MethodIdItem = 0x0005,
    ClassDefItem = 0x0006,
    CallSiteIdItem = 0x0007,
    MethodHandleItem = 0x0008,
    MapList = 0x1000,
    TypeList = 0x1001,
    AnnotationSetRefList = 0x1002,
    AnnotationSetItem = 0x1003,
    ClassDataItem = 0x2000,
    CodeItem = 0x2001,
    StringDataItem = 0x2002,
    DebugInfoItem = 0x2003,
    AnnotationItem = 0x2004,
    EncodedArrayItem = 0x2005,
    AnnotationsDirectoryItem = 0x2006,
    HiddenapiClassData = 0xF000,
}

impl MapItemType {
    pub const ALL: [MapItemType; 21] = [
        Self::HeaderItem,
        Self::StringIdItem,
        Self::TypeIdItem,
        Self::ProtoIdItem,
        Self::FieldIdItem,
        Self::MethodIdItem,
        Self::ClassDefItem,
        Self::CallSiteIdItem,
        Self::MethodHandleItem,
        Self::MapList,
        Self::TypeList,
        Self::AnnotationSetRefList,
        Self::AnnotationSetItem,
        Self::ClassDataItem,
        Self::CodeItem,
        Self::StringDataItem,
        Self::DebugInfoItem,
        Self::AnnotationItem,
        Self::EncodedArrayItem,
        Self::AnnotationsDirectoryItem,
        Self::HiddenapiClassData,
    ];

    pub fn from_u16(v: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|t| *t as u16 == v)
    }

    /// On-disk size of one item for fixed-size id sections.
    pub fn item_size(self) -> Option<u32> {
        match self {
            Self::HeaderItem => Some(0x70),
            Self::StringIdItem | Self::TypeIdItem | Self::CallSiteIdItem => Some(4),
            Self::ProtoIdItem => Some(12),
            Self::FieldIdItem | Self::MethodIdItem | Self::MethodHandleItem => Some(8),
            Self::ClassDefItem => Some(32),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::HeaderItem => "TYPE_HEADER_ITEM",
            Self::StringIdItem => "TYPE_STRING_ID_ITEM",
            Self::TypeIdItem => "TYPE_TYPE_ID_ITEM",
            Self::ProtoIdItem => "TYPE_PROTO_ID_ITEM",
            Self::FieldIdItem => "TYPE_FIELD_ID_ITEM",
            Self::MethodIdItem => "TYPE_METHOD_ID_ITEM",
            Self::ClassDefItem => "TYPE_CLASS_DEF_ITEM",
            Self::CallSiteIdItem => "TYPE_CALL_SITE_ID_ITEM",
            Self::MethodHandleItem => "TYPE_METHOD_HANDLE_ITEM",
            Self::MapList => "TYPE_MAP_LIST",
            Self::TypeList => "TYPE_TYPE_LIST",
            Self::AnnotationSetRefList => "TYPE_ANNOTATION_SET_REF_LIST",
            Self::AnnotationSetItem => "TYPE_ANNOTATION_SET_ITEM",
            Self::ClassDataItem => "TYPE_CLASS_DATA_ITEM",
            Self::CodeItem => "TYPE_CODE_ITEM",
            Self::StringDataItem => "TYPE_STRING_DATA_ITEM",
            Self::DebugInfoItem => "TYPE_DEBUG_INFO_ITEM",
            Self::AnnotationItem => "TYPE_ANNOTATION_ITEM",
            Self::EncodedArrayItem => "TYPE_ENCODED_ARRAY_ITEM",
            Self::AnnotationsDirectoryItem => "TYPE_ANNOTATIONS_DIRECTORY_ITEM",
            Self::HiddenapiClassData => "TYPE_HIDDENAPI_CLASS_DATA_ITEM",
        }
    }
}

impl fmt::Display for MapItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One map list entry. The type is kept raw so unknown codes can be reported
/// by whoever interprets the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapItem {
    pub type_code: u16,
    pub size: u32,
    pub offset: u32,
}

impl MapItem {
    pub const SIZE: usize = 12;

    pub fn item_type(&self) -> Option<MapItemType> {
        MapItemType::from_u16(self.type_code)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapList {
    pub items: Vec<MapItem>,
}

impl MapList {
    /// Decode the list at `map_off`: a u32 count, then 12-byte entries.
    pub fn parse(reader: &DexReader<'_>, map_off: u32) -> Result<Self> {
        let count = reader.u32_at(map_off as usize)?;
        let entries = reader.table(map_off.saturating_add(4), count, MapItem::SIZE, "map list")?;

        let items = entries
            .chunks_exact(MapItem::SIZE)
            .map(|e| MapItem {
                type_code: u16::from_le_bytes([e[0], e[1]]),
                size: u32::from_le_bytes([e[4], e[5], e[6], e[7]]),
                offset: u32::from_le_bytes([e[8], e[9], e[10], e[11]]),
            })
            .collect();

        Ok(Self { items })
    }

    pub fn find(&self, item_type: MapItemType) -> Option<&MapItem> {
        self.items
            .iter()
            .find(|item| item.type_code == item_type as u16)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Encode as on disk.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.items.len() * MapItem::SIZE);
        out.extend_from_slice(&(self.items.len() as u32).to_le_bytes());
        for item in &self.items {
            out.extend_from_slice(&item.type_code.to_le_bytes());
            out.extend_from_slice(&0u16.to_le_bytes());
            out.extend_from_slice(&item.size.to_le_bytes());
            out.extend_from_slice(&item.offset.to_le_bytes());
        }
        out
    }
}
