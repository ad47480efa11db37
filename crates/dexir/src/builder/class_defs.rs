//! Class definitions and everything reachable from class data: fields,
//! methods, code items, try blocks, handlers and debug info.

use dexir_format::format::{
    CatchHandlerIter, CodeItemAccessor, Cursor, DexError, NO_INDEX, Result, StandardCodeItem,
    TryItem as FormatTryItem, debug_info_stream_size,
};
use tracing::{debug, trace};

use super::{Builder, u32_at};
use crate::ir::{
    CatchHandler, ClassData, ClassDataRef, ClassDef, CodeItem, CodeItemRef, DebugInfoItem,
    DebugInfoRef, FieldItem, MethodItem, MethodRef, TryItem, TypeAddrPair,
};

const CLASS_DEF_SIZE: u32 = 32;

impl Builder<'_> {
    pub(super) fn create_class_defs(&mut self) -> Result<()> {
        let (off, size) = (self.disk.class_defs_off, self.disk.class_defs_size);
        let table = self.reader.table(off, size, CLASS_DEF_SIZE as usize, "class defs")?;
        self.collections().class_defs.set_offset(off);

        let filtered = !self.options.class_filter.is_empty();
        let mut skipped = 0usize;
        for (i, entry) in table.chunks_exact(CLASS_DEF_SIZE as usize).enumerate() {
            let class_type = self.type_ref(u32_at(entry, 0))?;
            if filtered {
                let descriptor = self.header.collections.descriptor(class_type);
                if !self.options.class_filter.contains(&descriptor) {
                    trace!(class = %descriptor, "class filtered out");
                    skipped += 1;
                    continue;
                }
            }

            let superclass = match u32_at(entry, 8) {
                NO_INDEX => None,
                idx => Some(self.type_ref(idx)?),
            };
            let interfaces = self.create_type_list(u32_at(entry, 12))?;
            let source_file = match u32_at(entry, 16) {
                NO_INDEX => None,
                idx => Some(self.string_ref(idx)?),
            };
            let annotations = self.create_annotations_directory(u32_at(entry, 20))?;
            let static_values = self.create_encoded_array(u32_at(entry, 28))?;
            let class_data = self.create_class_data(u32_at(entry, 24))?;

            let def = ClassDef {
                offset: self.loc(off + i as u32 * CLASS_DEF_SIZE),
                class_type,
                access_flags: u32_at(entry, 4),
                superclass,
                interfaces,
                source_file,
                annotations,
                static_values,
                class_data,
            };
            let h = self.collections().class_defs.push(def);
            trace!(index = i, class = ?h, "class def");
        }
        debug!(count = size, skipped, "class defs");
        Ok(())
    }

    fn create_class_data(&mut self, offset: u32) -> Result<Option<ClassDataRef>> {
        if offset == 0 {
            return Ok(None);
        }
        if let Some(h) = self.header.collections.class_datas.at_offset(offset) {
            return Ok(Some(h));
        }

        // Methods point back at their owner, so the handle is fixed before
        // the members are read.
        let owner = self.header.collections.class_datas.next_handle();
        let mut c = self.reader.cursor(offset as usize)?;
        let static_fields_size = c.read_uleb128()?;
        let instance_fields_size = c.read_uleb128()?;
        let direct_methods_size = c.read_uleb128()?;
        let virtual_methods_size = c.read_uleb128()?;

        let data = ClassData {
            offset: self.loc(offset),
            static_fields: self.read_fields(&mut c, static_fields_size)?,
            instance_fields: self.read_fields(&mut c, instance_fields_size)?,
            direct_methods: self.read_methods(&mut c, direct_methods_size, owner)?,
            virtual_methods: self.read_methods(&mut c, virtual_methods_size, owner)?,
        };
        let section = &mut self.collections().class_datas;
        let h = section.push(data);
        debug_assert_eq!(h, owner);
        Ok(Some(section.record_offset(offset, h)))
    }

    fn read_fields(&mut self, c: &mut Cursor<'_>, count: u32) -> Result<Vec<FieldItem>> {
        let mut fields = Vec::new();
        let mut index = 0u32;
        for _ in 0..count {
            index = index.wrapping_add(c.read_uleb128()?);
            let access_flags = c.read_uleb128()?;
            fields.push(FieldItem {
                access_flags,
                field: self.field_ref(index)?,
            });
        }
        Ok(fields)
    }

    fn read_methods(
        &mut self,
        c: &mut Cursor<'_>,
        count: u32,
        owner: ClassDataRef,
    ) -> Result<Vec<MethodItem>> {
        let mut methods = Vec::new();
        let mut index = 0u32;
        for _ in 0..count {
            index = index.wrapping_add(c.read_uleb128()?);
            let access_flags = c.read_uleb128()?;
            let code_off = c.read_uleb128()?;
            let method = self.method_ref(index)?;
            let code = match code_off {
                0 => None,
                off => Some(self.create_code_item(off, method)?),
            };
            methods.push(MethodItem {
                access_flags,
                method,
                code,
                class_data: owner,
            });
        }
        Ok(methods)
    }

    /// Code items are shared when both the code offset and the debug info
    /// offset match.
    fn create_code_item(&mut self, offset: u32, method: MethodRef) -> Result<CodeItemRef> {
        let layout = StandardCodeItem::parse(&self.reader, offset as usize)?;
        let key = (offset, layout.debug_info_off);
        if let Some(h) = self.code_items_by_key.get(&key) {
            trace!(offset, "code item shared");
            return Ok(h);
        }

        let code = CodeItemAccessor::new(self.reader, &layout)?;
        let debug_info = self.create_debug_info(layout.debug_info_off)?;
        let size = code.code_item_size(offset as usize)?;
        let (tries, handlers) = self.read_tries(&code)?;
        let fixups = self.collect_fixups(code.insns(), method);

        let mut item = CodeItem::new(
            self.loc(offset),
            size as u32,
            code.registers_size,
            code.ins_size,
            code.outs_size,
            debug_info,
            code.into_insns(),
            method,
        );
        item.tries = tries;
        item.handlers = handlers;
        item.fixups = fixups;

        let section = &mut self.collections().code_items;
        let h = section.push(item);
        // The first item built from an offset owns it.
        if section.at_offset(offset).is_none() {
            section.record_offset(offset, h);
        }
        Ok(self.code_items_by_key.insert(key, h))
    }

    fn create_debug_info(&mut self, offset: u32) -> Result<Option<DebugInfoRef>> {
        if offset == 0 {
            return Ok(None);
        }
        if let Some(h) = self.header.collections.debug_infos.at_offset(offset) {
            return Ok(Some(h));
        }
        let len = debug_info_stream_size(&self.reader, offset as usize)?;
        let item = DebugInfoItem {
            offset: self.loc(offset),
            data: self.reader.slice(offset as usize, len, "debug info")?.into(),
        };
        let section = &mut self.collections().debug_infos;
        let h = section.push(item);
        Ok(Some(section.record_offset(offset, h)))
    }

    /// Try items plus the handler lists they use. Lists that no try item
    /// references are kept too, after the referenced ones.
    fn read_tries(&self, code: &CodeItemAccessor<'_>) -> Result<(Vec<TryItem>, Vec<CatchHandler>)> {
        let mut tries = Vec::new();
        let mut handlers: Vec<CatchHandler> = Vec::new();
        if code.tries_size == 0 {
            return Ok((tries, handlers));
        }

        let insns_size = u64::from(code.insns_size_in_code_units());
        for (i, disk) in code.try_items()?.enumerate() {
            if disk.end_addr() > insns_size {
                return Err(DexError::OutOfBounds {
                    what: "try item range",
                    offset: code.tries_off() + i * FormatTryItem::SIZE,
                    len: FormatTryItem::SIZE,
                    size: self.reader.len(),
                });
            }
            let handler = match handlers
                .iter()
                .position(|h| h.list_offset == disk.handler_off)
            {
                Some(i) => i,
                None => {
                    let (list, _) = self.read_catch_handler(code, disk.handler_off)?;
                    handlers.push(list);
                    handlers.len() - 1
                }
            };
            tries.push(TryItem {
                start_addr: disk.start_addr,
                insn_count: disk.insn_count,
                handler,
            });
        }

        let base = code.handler_data_off();
        let mut c = self.reader.cursor(base)?;
        let lists = c.read_uleb128()?;
        let mut position = c.position();
        for _ in 0..lists {
            let relative = position - base;
            let list_offset = u16::try_from(relative).map_err(|_| DexError::OutOfBounds {
                what: "catch handler list",
                offset: position,
                len: 0,
                size: self.reader.len(),
            })?;
            let (list, end) = self.read_catch_handler(code, list_offset)?;
            if !handlers.iter().any(|h| h.list_offset == list_offset) {
                trace!(list_offset, "unreferenced catch handler list");
                handlers.push(list);
            }
            position = end;
        }
        Ok((tries, handlers))
    }

    /// One handler list and the absolute offset just past it.
    fn read_catch_handler(
        &self,
        code: &CodeItemAccessor<'_>,
        list_offset: u16,
    ) -> Result<(CatchHandler, usize)> {
        let mut iter: CatchHandlerIter<'_> = code.catch_handlers(list_offset)?;
        let mut entries = Vec::new();
        for entry in iter.by_ref() {
            let entry = entry?;
            let type_id = match entry.type_idx {
                Some(idx) => Some(self.type_ref(idx)?),
                None => None,
            };
            entries.push(TypeAddrPair {
                type_id,
                address: entry.address,
            });
        }
        let list = CatchHandler {
            catch_all: iter.has_catch_all(),
            list_offset,
            handlers: entries,
        };
        Ok((list, iter.position()))
    }
}
