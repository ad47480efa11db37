//! Fixed-size id tables and the items they pull in.

use dexir_format::format::{Result, StringData as DiskStringData};
use tracing::{debug, trace};

use super::{Builder, resolve, u16_at, u32_at};
use crate::ir::{
    FieldId, FieldRef, MethodId, MethodRef, ProtoId, ProtoRef, StringData, StringDataRef,
    StringId, StringRef, TypeId, TypeList, TypeListRef, TypeRef,
};

impl Builder<'_> {
    pub(super) fn string_ref(&self, index: u32) -> Result<StringRef> {
        resolve(&self.header.collections.string_ids, "string", index)
    }

    pub(super) fn type_ref(&self, index: u32) -> Result<TypeRef> {
        resolve(&self.header.collections.type_ids, "type", index)
    }

    pub(super) fn proto_ref(&self, index: u32) -> Result<ProtoRef> {
        resolve(&self.header.collections.proto_ids, "proto", index)
    }

    pub(super) fn field_ref(&self, index: u32) -> Result<FieldRef> {
        resolve(&self.header.collections.field_ids, "field", index)
    }

    pub(super) fn method_ref(&self, index: u32) -> Result<MethodRef> {
        resolve(&self.header.collections.method_ids, "method", index)
    }

    pub(super) fn create_string_ids(&mut self) -> Result<()> {
        let (off, size) = (self.disk.string_ids_off, self.disk.string_ids_size);
        let table = self.reader.table(off, size, 4, "string ids")?;
        self.collections().string_ids.set_offset(off);

        for (i, entry) in table.chunks_exact(4).enumerate() {
            let data = self.create_string_data(u32_at(entry, 0))?;
            let id = StringId {
                offset: self.loc(off + i as u32 * 4),
                data,
            };
            self.collections().string_ids.push(id);
        }
        debug!(count = size, "string ids");
        Ok(())
    }

    fn create_string_data(&mut self, offset: u32) -> Result<StringDataRef> {
        if let Some(h) = self.header.collections.string_datas.at_offset(offset) {
            return Ok(h);
        }
        let raw = DiskStringData::parse(&self.reader, offset as usize)?;
        let item = StringData {
            offset: self.loc(offset),
            utf16_size: raw.utf16_size,
            data: raw.data.into(),
        };
        let section = &mut self.collections().string_datas;
        let h = section.push(item);
        Ok(section.record_offset(offset, h))
    }

    pub(super) fn create_type_ids(&mut self) -> Result<()> {
        let (off, size) = (self.disk.type_ids_off, self.disk.type_ids_size);
        let table = self.reader.table(off, size, 4, "type ids")?;
        self.collections().type_ids.set_offset(off);

        for (i, entry) in table.chunks_exact(4).enumerate() {
            let id = TypeId {
                offset: self.loc(off + i as u32 * 4),
                descriptor: self.string_ref(u32_at(entry, 0))?,
            };
            self.collections().type_ids.push(id);
        }
        debug!(count = size, "type ids");
        Ok(())
    }

    pub(super) fn create_proto_ids(&mut self) -> Result<()> {
        let (off, size) = (self.disk.proto_ids_off, self.disk.proto_ids_size);
        let table = self.reader.table(off, size, 12, "proto ids")?;
        self.collections().proto_ids.set_offset(off);

        for (i, entry) in table.chunks_exact(12).enumerate() {
            let id = ProtoId {
                offset: self.loc(off + i as u32 * 12),
                shorty: self.string_ref(u32_at(entry, 0))?,
                return_type: self.type_ref(u32_at(entry, 4))?,
                parameters: self.create_type_list(u32_at(entry, 8))?,
            };
            self.collections().proto_ids.push(id);
        }
        debug!(count = size, "proto ids");
        Ok(())
    }

    pub(super) fn create_field_ids(&mut self) -> Result<()> {
        let (off, size) = (self.disk.field_ids_off, self.disk.field_ids_size);
        let table = self.reader.table(off, size, 8, "field ids")?;
        self.collections().field_ids.set_offset(off);

        for (i, entry) in table.chunks_exact(8).enumerate() {
            let id = FieldId {
                offset: self.loc(off + i as u32 * 8),
                class: self.type_ref(u32::from(u16_at(entry, 0)))?,
                field_type: self.type_ref(u32::from(u16_at(entry, 2)))?,
                name: self.string_ref(u32_at(entry, 4))?,
            };
            self.collections().field_ids.push(id);
        }
        debug!(count = size, "field ids");
        Ok(())
    }

    pub(super) fn create_method_ids(&mut self) -> Result<()> {
        let (off, size) = (self.disk.method_ids_off, self.disk.method_ids_size);
        let table = self.reader.table(off, size, 8, "method ids")?;
        self.collections().method_ids.set_offset(off);

        for (i, entry) in table.chunks_exact(8).enumerate() {
            let id = MethodId {
                offset: self.loc(off + i as u32 * 8),
                class: self.type_ref(u32::from(u16_at(entry, 0)))?,
                proto: self.proto_ref(u32::from(u16_at(entry, 2)))?,
                name: self.string_ref(u32_at(entry, 4))?,
            };
            self.collections().method_ids.push(id);
        }
        debug!(count = size, "method ids");
        Ok(())
    }

    /// Type list at `offset`; 0 means none. Lists are shared both by disk
    /// offset and by content.
    pub(super) fn create_type_list(&mut self, offset: u32) -> Result<Option<TypeListRef>> {
        if offset == 0 {
            return Ok(None);
        }
        if let Some(h) = self.header.collections.type_lists.at_offset(offset) {
            return Ok(Some(h));
        }

        let size = self.reader.u32_at(offset as usize)?;
        let raw = self.reader.table(offset.saturating_add(4), size, 2, "type list")?;
        let types = raw
            .chunks_exact(2)
            .map(|e| self.type_ref(u32::from(u16_at(e, 0))))
            .collect::<Result<Vec<_>>>()?;

        let h = match self.type_lists_by_content.get(&types) {
            Some(h) => {
                trace!(offset, "type list shared by content");
                h
            }
            None => {
                let list = TypeList {
                    offset: self.loc(offset),
                    types: types.clone(),
                };
                let h = self.collections().type_lists.push(list);
                self.type_lists_by_content.insert(types, h)
            }
        };
        Ok(Some(self.collections().type_lists.record_offset(offset, h)))
    }
}
