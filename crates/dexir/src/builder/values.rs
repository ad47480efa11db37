//! Encoded values and the data items built from them: static value arrays,
//! annotations, call sites and method handles.

use dexir_format::format::{
    Cursor, DexError, MapItemType, MapList, Result, ValueHeader, ValueType,
    read_right_zero_extended, read_var_width,
};
use tracing::{debug, trace};

use super::{Builder, u16_at, u32_at};
use crate::ir::{
    AnnotationElement, AnnotationItem, AnnotationRef, AnnotationSetItem, AnnotationSetRef,
    AnnotationSetRefList, AnnotationSetRefListRef, AnnotationsDirectoryItem,
    AnnotationsDirectoryRef, CallSiteId, EncodedAnnotation, EncodedArrayItem, EncodedArrayRef,
    EncodedValue, FieldAnnotation, Handle, MethodAnnotation, MethodHandleItem, MethodHandleRef,
    MethodHandleTarget, MethodHandleType, ParameterAnnotation, Visibility,
};

/// Arrays and annotations nested deeper than this are rejected.
const MAX_NESTING: usize = 256;

impl Builder<'_> {
    fn read_encoded_value(&mut self, c: &mut Cursor<'_>, depth: usize) -> Result<EncodedValue> {
        let start = c.position();
        let header = ValueHeader::read(c)?;
        let arg = header.arg;
        let index = |c: &mut Cursor<'_>| read_var_width(c, arg, false).map(|v| v as u32);

        Ok(match header.value_type {
            ValueType::Byte => EncodedValue::Byte(read_var_width(c, arg, false)? as i8),
            ValueType::Short => EncodedValue::Short(read_var_width(c, arg, true)? as i16),
            ValueType::Char => EncodedValue::Char(read_var_width(c, arg, false)? as u16),
            ValueType::Int => EncodedValue::Int(read_var_width(c, arg, true)? as i32),
            ValueType::Long => EncodedValue::Long(read_var_width(c, arg, true)? as i64),
            ValueType::Float => {
                let bits = read_right_zero_extended(c, arg, 4)?;
                EncodedValue::Float(f32::from_bits(bits as u32))
            }
            ValueType::Double => {
                let bits = read_right_zero_extended(c, arg, 8)?;
                EncodedValue::Double(f64::from_bits(bits))
            }
            ValueType::MethodType => EncodedValue::MethodType(self.proto_ref(index(c)?)?),
            ValueType::MethodHandle => {
                // The method handle table is built after class defs.
                let idx = index(c)?;
                self.pending_method_handles.push(idx);
                EncodedValue::MethodHandle(MethodHandleRef::from_index(idx as usize))
            }
            ValueType::String => EncodedValue::String(self.string_ref(index(c)?)?),
            ValueType::Type => EncodedValue::Type(self.type_ref(index(c)?)?),
            ValueType::Field => EncodedValue::Field(self.field_ref(index(c)?)?),
            ValueType::Method => EncodedValue::Method(self.method_ref(index(c)?)?),
            ValueType::Enum => EncodedValue::Enum(self.field_ref(index(c)?)?),
            ValueType::Array => {
                let depth = nested(depth, header.value_type, start)?;
                EncodedValue::Array(self.read_encoded_values(c, depth)?)
            }
            ValueType::Annotation => {
                let depth = nested(depth, header.value_type, start)?;
                EncodedValue::Annotation(self.read_encoded_annotation(c, depth)?)
            }
            ValueType::Null => EncodedValue::Null,
            ValueType::Boolean => EncodedValue::Boolean(arg != 0),
        })
    }

    fn read_encoded_values(&mut self, c: &mut Cursor<'_>, depth: usize) -> Result<Vec<EncodedValue>> {
        let size = c.read_uleb128()?;
        let mut values = Vec::new();
        for _ in 0..size {
            values.push(self.read_encoded_value(c, depth)?);
        }
        Ok(values)
    }

    fn read_encoded_annotation(
        &mut self,
        c: &mut Cursor<'_>,
        depth: usize,
    ) -> Result<EncodedAnnotation> {
        let type_id = self.type_ref(c.read_uleb128()?)?;
        let size = c.read_uleb128()?;
        let mut elements = Vec::new();
        for _ in 0..size {
            let name = self.string_ref(c.read_uleb128()?)?;
            let value = self.read_encoded_value(c, depth)?;
            elements.push(AnnotationElement { name, value });
        }
        Ok(EncodedAnnotation { type_id, elements })
    }

    pub(super) fn create_encoded_array(&mut self, offset: u32) -> Result<Option<EncodedArrayRef>> {
        if offset == 0 {
            return Ok(None);
        }
        if let Some(h) = self.header.collections.encoded_arrays.at_offset(offset) {
            return Ok(Some(h));
        }
        let mut c = self.reader.cursor(offset as usize)?;
        let item = EncodedArrayItem {
            offset: self.loc(offset),
            values: self.read_encoded_values(&mut c, 0)?,
        };
        let section = &mut self.collections().encoded_arrays;
        let h = section.push(item);
        Ok(Some(section.record_offset(offset, h)))
    }

    fn create_annotation_item(&mut self, offset: u32) -> Result<AnnotationRef> {
        if let Some(h) = self.header.collections.annotations.at_offset(offset) {
            return Ok(h);
        }
        let mut c = self.reader.cursor(offset as usize)?;
        let visibility = Visibility::from_u8(c.read_u8()?);
        let item = AnnotationItem {
            offset: self.loc(offset),
            visibility,
            annotation: self.read_encoded_annotation(&mut c, 0)?,
        };
        let section = &mut self.collections().annotations;
        let h = section.push(item);
        Ok(section.record_offset(offset, h))
    }

    /// Annotation set at `offset`; 0 means none. Zero entries are skipped.
    fn create_annotation_set(&mut self, offset: u32) -> Result<Option<AnnotationSetRef>> {
        if offset == 0 {
            return Ok(None);
        }
        if let Some(h) = self.header.collections.annotation_sets.at_offset(offset) {
            return Ok(Some(h));
        }
        let size = self.reader.u32_at(offset as usize)?;
        let entries = self.reader.table(offset.saturating_add(4), size, 4, "annotation set")?;
        let mut items = Vec::new();
        for entry in entries.chunks_exact(4) {
            match u32_at(entry, 0) {
                0 => continue,
                off => items.push(self.create_annotation_item(off)?),
            }
        }
        let set = AnnotationSetItem {
            offset: self.loc(offset),
            items,
        };
        let section = &mut self.collections().annotation_sets;
        let h = section.push(set);
        Ok(Some(section.record_offset(offset, h)))
    }

    fn create_annotation_set_ref_list(&mut self, offset: u32) -> Result<AnnotationSetRefListRef> {
        if let Some(h) = self.header.collections.annotation_set_ref_lists.at_offset(offset) {
            return Ok(h);
        }
        let size = self.reader.u32_at(offset as usize)?;
        let entries = self
            .reader
            .table(offset.saturating_add(4), size, 4, "annotation set ref list")?;
        let items = entries
            .chunks_exact(4)
            .map(|entry| self.create_annotation_set(u32_at(entry, 0)))
            .collect::<Result<Vec<_>>>()?;
        let list = AnnotationSetRefList {
            offset: self.loc(offset),
            items,
        };
        let section = &mut self.collections().annotation_set_ref_lists;
        let h = section.push(list);
        Ok(section.record_offset(offset, h))
    }

    pub(super) fn create_annotations_directory(
        &mut self,
        offset: u32,
    ) -> Result<Option<AnnotationsDirectoryRef>> {
        if offset == 0 {
            return Ok(None);
        }
        if let Some(h) = self.header.collections.annotations_directories.at_offset(offset) {
            return Ok(Some(h));
        }

        let head = self.reader.slice(offset as usize, 16, "annotations directory")?;
        let class_off = u32_at(head, 0);
        let fields_size = u32_at(head, 4);
        let methods_size = u32_at(head, 8);
        let params_size = u32_at(head, 12);

        let mut dir = AnnotationsDirectoryItem {
            offset: self.loc(offset),
            class_annotation: self.create_annotation_set(class_off)?,
            ..Default::default()
        };

        let mut next = offset.saturating_add(16);
        let fields = self.reader.table(next, fields_size, 8, "field annotations")?;
        for entry in fields.chunks_exact(8) {
            let field = self.field_ref(u32_at(entry, 0))?;
            if let Some(annotations) = self.create_annotation_set(u32_at(entry, 4))? {
                dir.fields.push(FieldAnnotation { field, annotations });
            }
        }

        next = next.saturating_add(fields_size.saturating_mul(8));
        let methods = self.reader.table(next, methods_size, 8, "method annotations")?;
        for entry in methods.chunks_exact(8) {
            let method = self.method_ref(u32_at(entry, 0))?;
            if let Some(annotations) = self.create_annotation_set(u32_at(entry, 4))? {
                dir.methods.push(MethodAnnotation { method, annotations });
            }
        }

        next = next.saturating_add(methods_size.saturating_mul(8));
        let params = self.reader.table(next, params_size, 8, "parameter annotations")?;
        for entry in params.chunks_exact(8) {
            let method = self.method_ref(u32_at(entry, 0))?;
            let list_off = u32_at(entry, 4);
            if list_off == 0 {
                continue;
            }
            let annotations = self.create_annotation_set_ref_list(list_off)?;
            dir.parameters.push(ParameterAnnotation {
                method,
                annotations,
            });
        }

        let section = &mut self.collections().annotations_directories;
        let h = section.push(dir);
        Ok(Some(section.record_offset(offset, h)))
    }

    pub(super) fn create_method_handles(&mut self, map: &MapList) -> Result<()> {
        let Some(&entry) = map.find(MapItemType::MethodHandleItem) else {
            return Ok(());
        };
        let table = self.reader.table(entry.offset, entry.size, 8, "method handles")?;
        self.collections().method_handles.set_offset(entry.offset);

        for (i, raw) in table.chunks_exact(8).enumerate() {
            let type_code = u16_at(raw, 0);
            let handle_type = MethodHandleType::from_u16(type_code)
                .ok_or(DexError::BadMethodHandleType(type_code))?;
            let index = u32::from(u16_at(raw, 4));
            let target = if handle_type.is_invoke() {
                MethodHandleTarget::Method(self.method_ref(index)?)
            } else {
                MethodHandleTarget::Field(self.field_ref(index)?)
            };
            let item = MethodHandleItem {
                offset: self.loc(entry.offset + i as u32 * 8),
                handle_type,
                target,
            };
            self.collections().method_handles.push(item);
        }
        debug!(count = entry.size, "method handles");
        Ok(())
    }

    pub(super) fn create_call_sites(&mut self, map: &MapList) -> Result<()> {
        let Some(&entry) = map.find(MapItemType::CallSiteIdItem) else {
            return Ok(());
        };
        let table = self.reader.table(entry.offset, entry.size, 4, "call site ids")?;
        self.collections().call_site_ids.set_offset(entry.offset);

        for (i, raw) in table.chunks_exact(4).enumerate() {
            let id_off = entry.offset + i as u32 * 4;
            let array_off = u32_at(raw, 0);
            let array = self
                .create_encoded_array(array_off)?
                .ok_or(DexError::OutOfBounds {
                    what: "call site",
                    offset: id_off as usize,
                    len: 4,
                    size: self.reader.len(),
                })?;
            let site = CallSiteId {
                offset: self.loc(id_off),
                array,
            };
            self.collections().call_site_ids.push(site);
        }
        debug!(count = entry.size, "call site ids");
        Ok(())
    }

    /// Method handle indices from encoded values must name a built handle.
    pub(super) fn check_pending_method_handles(&mut self) -> Result<()> {
        let count = self.header.collections.method_handles.len() as u32;
        for index in std::mem::take(&mut self.pending_method_handles) {
            if index >= count {
                return Err(DexError::IndexOutOfRange {
                    kind: "method handle",
                    index,
                    count,
                });
            }
            trace!(index, "method handle reference");
        }
        Ok(())
    }
}

fn nested(depth: usize, value_type: ValueType, offset: usize) -> Result<usize> {
    if depth >= MAX_NESTING {
        return Err(DexError::BadEncodedValue {
            value_type: value_type as u8,
            offset,
        });
    }
    Ok(depth + 1)
}
