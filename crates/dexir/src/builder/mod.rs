//! IR construction from a raw DEX image.
//!
//! The build walks the image in a fixed order: string, type, proto, field
//! and method ids, then class definitions (pulling in class data, code,
//! annotations and static values as they are referenced), then method
//! handles and call sites. The map list is then checked against what was
//! built, data sections are put into disk order and the link data copied.
//! Any error aborts the whole build.

mod class_defs;
mod fixups;
mod ids;
mod map_check;
mod values;


use dexir_core::Interner;
use dexir_format::format::{
    DexError, DexReader, DiskHeader, MapList, Result, verify_checksum, verify_signature,
};
use indexmap::IndexSet;
use tracing::debug;

use crate::ir::{CodeItemRef, Collections, Handle, Header, Section, TypeListRef, TypeRef};

/// Build configuration.
#[derive(Clone, Debug)]
pub struct BuildOptions {
    /// Record each item's disk offset while building.
    pub eager_offsets: bool,
    /// When non-empty, only these class descriptors are materialized.
    pub class_filter: IndexSet<String>,
    pub verify_checksum: bool,
    pub verify_signature: bool,
    /// Reject images whose header claims more bytes than are present.
    pub check_file_size: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            eager_offsets: true,
            class_filter: IndexSet::new(),
            verify_checksum: false,
            verify_signature: false,
            check_file_size: true,
        }
    }
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eager_offsets(mut self, eager: bool) -> Self {
        self.eager_offsets = eager;
        self
    }

    /// Restrict the build to the given class descriptors (`Lpkg/Name;`).
    pub fn class_filter<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.class_filter = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn verify_checksum(mut self, verify: bool) -> Self {
        self.verify_checksum = verify;
        self
    }

    pub fn verify_signature(mut self, verify: bool) -> Self {
        self.verify_signature = verify;
        self
    }

    pub fn check_file_size(mut self, check: bool) -> Self {
        self.check_file_size = check;
        self
    }
}

/// Validate `bytes` and build its IR.
pub fn build(bytes: &[u8], options: &BuildOptions) -> Result<Header> {
    let disk = DiskHeader::parse(bytes)?;

    if options.check_file_size && disk.file_size as usize > bytes.len() {
        return Err(DexError::FileSizeMismatch {
            header: disk.file_size,
            actual: bytes.len(),
        });
    }
    if options.verify_checksum {
        verify_checksum(&disk, bytes)?;
    }
    if options.verify_signature {
        verify_signature(&disk, bytes)?;
    }

    debug!(
        version = %disk.version_string(),
        size = bytes.len(),
        eager_offsets = options.eager_offsets,
        "building dex ir"
    );
    Builder::new(DexReader::new(bytes), disk, options).run()
}

/// State of one build. Nothing here outlives [`build`].
pub(crate) struct Builder<'a> {
    reader: DexReader<'a>,
    disk: DiskHeader,
    options: &'a BuildOptions,
    header: Header,
    type_lists_by_content: Interner<Vec<TypeRef>, TypeListRef>,
    code_items_by_key: Interner<(u32, u32), CodeItemRef>,
    /// Method handle indices seen in encoded values, checked once the
    /// method handle table exists.
    pending_method_handles: Vec<u32>,
}

impl<'a> Builder<'a> {
    fn new(reader: DexReader<'a>, disk: DiskHeader, options: &'a BuildOptions) -> Self {
        Self {
            reader,
            header: Header::from_disk(&disk),
            disk,
            options,
            type_lists_by_content: Interner::new(),
            code_items_by_key: Interner::new(),
            pending_method_handles: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Header> {
        self.create_string_ids()?;
        self.create_type_ids()?;
        self.create_proto_ids()?;
        self.create_field_ids()?;
        self.create_method_ids()?;
        self.create_class_defs()?;

        let map = self.read_map_list()?;
        self.create_method_handles(&map)?;
        self.create_call_sites(&map)?;
        self.check_pending_method_handles()?;

        self.check_and_set_remaining_offsets(&map)?;
        self.header.collections.sort_by_map_order();
        self.copy_link_data()?;

        debug!(
            classes = self.header.collections.class_defs.len(),
            code_items = self.header.collections.code_items.len(),
            truncated = self.header.truncated.len(),
            "dex ir built"
        );
        Ok(self.header)
    }

    fn collections(&mut self) -> &mut Collections {
        &mut self.header.collections
    }

    /// Offset to store on an item: the disk offset when eager, else unassigned.
    fn loc(&self, offset: u32) -> Option<u32> {
        self.options.eager_offsets.then_some(offset)
    }

    fn read_map_list(&mut self) -> Result<MapList> {
        if self.disk.map_off == 0 {
            return Err(DexError::MissingMapList);
        }
        let map = MapList::parse(&self.reader, self.disk.map_off)?;
        self.collections().map_list_offset = self.disk.map_off;
        debug!(entries = map.len(), offset = self.disk.map_off, "map list");
        Ok(map)
    }

    fn copy_link_data(&mut self) -> Result<()> {
        if self.disk.link_size == 0 {
            return Ok(());
        }
        let link = self.reader.slice(
            self.disk.link_off as usize,
            self.disk.link_size as usize,
            "link data",
        )?;
        self.collections().link_data = link.to_vec();
        Ok(())
    }
}

/// Resolve an on-disk index against an already built id section.
fn resolve<H: Handle, T>(section: &Section<H, T>, kind: &'static str, index: u32) -> Result<H> {
    section.handle(index).ok_or(DexError::IndexOutOfRange {
        kind,
        index,
        count: section.len() as u32,
    })
}

#[inline]
fn u16_at(b: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([b[offset], b[offset + 1]])
}

#[inline]
fn u32_at(b: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([b[offset], b[offset + 1], b[offset + 2], b[offset + 3]])
}
