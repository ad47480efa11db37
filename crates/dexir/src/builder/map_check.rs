//! Cross-check of the on-disk map list against the built IR.

use dexir_format::format::{DexError, MapItem, MapItemType, MapList, Result};
use tracing::debug;

use super::Builder;

impl Builder<'_> {
    /// Id sections must agree with what was built; data sections take
    /// their offsets from the map. Any unknown entry fails the build.
    pub(super) fn check_and_set_remaining_offsets(&mut self, map: &MapList) -> Result<()> {
        let filtered = !self.options.class_filter.is_empty();
        let map_off = self.disk.map_off;
        let c = &mut self.header.collections;

        for item in &map.items {
            let Some(kind) = item.item_type() else {
                return Err(DexError::UnknownMapItemType(item.type_code));
            };
            match kind {
                MapItemType::HeaderItem => {
                    expect(kind, "size", 1, item.size)?;
                    expect(kind, "offset", 0, item.offset)?;
                }
                MapItemType::StringIdItem => {
                    check_table(item, kind, c.string_ids.len(), c.string_ids.offset())?
                }
                MapItemType::TypeIdItem => {
                    check_table(item, kind, c.type_ids.len(), c.type_ids.offset())?
                }
                MapItemType::ProtoIdItem => {
                    check_table(item, kind, c.proto_ids.len(), c.proto_ids.offset())?
                }
                MapItemType::FieldIdItem => {
                    check_table(item, kind, c.field_ids.len(), c.field_ids.offset())?
                }
                MapItemType::MethodIdItem => {
                    check_table(item, kind, c.method_ids.len(), c.method_ids.offset())?
                }
                MapItemType::ClassDefItem => {
                    // A class filter leaves fewer defs than the map lists.
                    if !filtered {
                        expect(kind, "size", c.class_defs.len() as u32, item.size)?;
                    }
                    expect(kind, "offset", c.class_defs.offset(), item.offset)?;
                }
                MapItemType::CallSiteIdItem => {
                    check_table(item, kind, c.call_site_ids.len(), c.call_site_ids.offset())?
                }
                MapItemType::MethodHandleItem => {
                    check_table(item, kind, c.method_handles.len(), c.method_handles.offset())?
                }
                MapItemType::MapList => {
                    expect(kind, "size", 1, item.size)?;
                    expect(kind, "offset", map_off, item.offset)?;
                }
                MapItemType::TypeList => c.type_lists.set_offset(item.offset),
                MapItemType::AnnotationSetRefList => {
                    c.annotation_set_ref_lists.set_offset(item.offset)
                }
                MapItemType::AnnotationSetItem => c.annotation_sets.set_offset(item.offset),
                MapItemType::ClassDataItem => c.class_datas.set_offset(item.offset),
                MapItemType::CodeItem => c.code_items.set_offset(item.offset),
                MapItemType::StringDataItem => c.string_datas.set_offset(item.offset),
                MapItemType::DebugInfoItem => c.debug_infos.set_offset(item.offset),
                MapItemType::AnnotationItem => c.annotations.set_offset(item.offset),
                MapItemType::EncodedArrayItem => c.encoded_arrays.set_offset(item.offset),
                MapItemType::AnnotationsDirectoryItem => {
                    c.annotations_directories.set_offset(item.offset)
                }
                MapItemType::HiddenapiClassData => c.hiddenapi_offset = Some(item.offset),
            }
        }
        debug!(entries = map.len(), "map list checked");
        Ok(())
    }
}

fn check_table(item: &MapItem, kind: MapItemType, len: usize, offset: u32) -> Result<()> {
    expect(kind, "size", len as u32, item.size)?;
    expect(kind, "offset", offset, item.offset)
}

fn expect(item: MapItemType, field: &'static str, expected: u32, found: u32) -> Result<()> {
    if expected == found {
        return Ok(());
    }
    Err(DexError::MapMismatch {
        item,
        field,
        expected,
        found,
    })
}
