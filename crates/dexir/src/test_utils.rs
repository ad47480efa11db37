//! Test-only assembler for small but complete DEX images.
//!
//! [`DexFixture`] collects ids, classes and code, then [`DexFixture::build`]
//! lays them out the way a dex compiler would: header, id tables, data
//! section, map list, link data. Checksum and signature are filled in.
//! The patch helpers at the bottom produce corrupt variants.

use dexir_format::format::{
    CHECKSUM_OFFSET, DiskHeader, ENDIAN_CONSTANT, HEADER_SIZE, MapItem, MapItemType, MapList,
    SIGNATURE_OFFSET, SIGNATURE_SIZE, compute_checksum, compute_signature,
};
use indexmap::IndexMap;

#[derive(Clone, Debug, Default)]
pub struct ClassSpec {
    pub class: u32,
    pub access_flags: u32,
    pub superclass: Option<u32>,
    pub interfaces: Vec<u32>,
    pub source_file: Option<u32>,
    /// `(field_idx, access_flags)`, ascending by index.
    pub static_fields: Vec<(u32, u32)>,
    pub instance_fields: Vec<(u32, u32)>,
    pub direct_methods: Vec<MethodSpec>,
    pub virtual_methods: Vec<MethodSpec>,
    /// Encoded values, see [`value`].
    pub static_values: Option<Vec<Vec<u8>>>,
    pub class_annotations: Vec<AnnotationSpec>,
    pub field_annotations: Vec<(u32, Vec<AnnotationSpec>)>,
    pub method_annotations: Vec<(u32, Vec<AnnotationSpec>)>,
    /// One annotation set per parameter.
    pub parameter_annotations: Vec<(u32, Vec<Vec<AnnotationSpec>>)>,
}

impl ClassSpec {
    pub fn new(class: u32) -> Self {
        Self {
            class,
            access_flags: 0x0001,
            ..Default::default()
        }
    }

    fn has_annotations(&self) -> bool {
        !self.class_annotations.is_empty()
            || !self.field_annotations.is_empty()
            || !self.method_annotations.is_empty()
            || !self.parameter_annotations.is_empty()
    }

    fn has_members(&self) -> bool {
        !self.static_fields.is_empty()
            || !self.instance_fields.is_empty()
            || !self.direct_methods.is_empty()
            || !self.virtual_methods.is_empty()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MethodSpec {
    pub method: u32,
    pub access_flags: u32,
    /// Index returned by [`DexFixture::code`].
    pub code: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct AnnotationSpec {
    pub visibility: u8,
    pub type_idx: u32,
    /// `(name string idx, encoded value)`
    pub elements: Vec<(u32, Vec<u8>)>,
}

#[derive(Clone, Debug, Default)]
pub struct CodeSpec {
    pub registers: u16,
    pub ins: u16,
    pub outs: u16,
    pub insns: Vec<u16>,
    pub tries: Vec<TrySpec>,
    /// Handler lists in the order they are written.
    pub handlers: Vec<HandlerSpec>,
    pub debug_info: Option<Vec<u8>>,
}

impl CodeSpec {
    pub fn new(registers: u16, insns: Vec<u16>) -> Self {
        Self {
            registers,
            insns,
            ..Default::default()
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TrySpec {
    pub start: u32,
    pub count: u16,
    /// Position in [`CodeSpec::handlers`].
    pub handler: usize,
}

#[derive(Clone, Debug, Default)]
pub struct HandlerSpec {
    /// `(type_idx, address)`
    pub catches: Vec<(u32, u32)>,
    pub catch_all: Option<u32>,
}

#[derive(Clone, Debug)]
struct ProtoSpec {
    shorty: u32,
    return_type: u32,
    params: Vec<u32>,
}

/// Collects the pieces of a DEX image.
#[derive(Clone, Debug)]
pub struct DexFixture {
    version: [u8; 4],
    strings: IndexMap<String, ()>,
    types: Vec<u32>,
    protos: Vec<ProtoSpec>,
    fields: Vec<[u32; 3]>,
    methods: Vec<[u32; 3]>,
    classes: Vec<ClassSpec>,
    codes: Vec<CodeSpec>,
    method_handles: Vec<(u16, u16)>,
    call_sites: Vec<Vec<Vec<u8>>>,
    link: Vec<u8>,
    share_type_lists: bool,
}

impl Default for DexFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl DexFixture {
    pub fn new() -> Self {
        Self {
            version: *b"035\0",
            strings: IndexMap::new(),
            types: Vec::new(),
            protos: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            classes: Vec::new(),
            codes: Vec::new(),
            method_handles: Vec::new(),
            call_sites: Vec::new(),
            link: Vec::new(),
            share_type_lists: true,
        }
    }

    /// Set the three version digits, e.g. `"038"`.
    pub fn version(&mut self, digits: &str) -> &mut Self {
        let b = digits.as_bytes();
        self.version = [b[0], b[1], b[2], 0];
        self
    }

    /// Write every type list at its own offset, even when contents repeat.
    pub fn duplicate_type_lists(&mut self) -> &mut Self {
        self.share_type_lists = false;
        self
    }

    pub fn link_data(&mut self, data: &[u8]) -> &mut Self {
        self.link = data.to_vec();
        self
    }

    pub fn string(&mut self, s: &str) -> u32 {
        self.strings.insert_full(s.to_string(), ()).0 as u32
    }

    pub fn type_id(&mut self, descriptor: &str) -> u32 {
        let s = self.string(descriptor);
        match self.types.iter().position(|&t| t == s) {
            Some(i) => i as u32,
            None => {
                self.types.push(s);
                self.types.len() as u32 - 1
            }
        }
    }

    pub fn proto(&mut self, ret: &str, params: &[&str]) -> u32 {
        let shorty: String = std::iter::once(ret)
            .chain(params.iter().copied())
            .map(shorty_char)
            .collect();
        let shorty = self.string(&shorty);
        let return_type = self.type_id(ret);
        let params = params.iter().map(|p| self.type_id(p)).collect();
        self.protos.push(ProtoSpec {
            shorty,
            return_type,
            params,
        });
        self.protos.len() as u32 - 1
    }

    pub fn field(&mut self, class: &str, ty: &str, name: &str) -> u32 {
        let entry = [self.type_id(class), self.type_id(ty), self.string(name)];
        self.fields.push(entry);
        self.fields.len() as u32 - 1
    }

    pub fn method(&mut self, class: &str, name: &str, ret: &str, params: &[&str]) -> u32 {
        let entry = [self.type_id(class), self.proto(ret, params), self.string(name)];
        self.methods.push(entry);
        self.methods.len() as u32 - 1
    }

    pub fn code(&mut self, code: CodeSpec) -> usize {
        self.codes.push(code);
        self.codes.len() - 1
    }

    pub fn class(&mut self, class: ClassSpec) -> u32 {
        self.classes.push(class);
        self.classes.len() as u32 - 1
    }

    pub fn method_handle(&mut self, handle_type: u16, index: u16) -> u32 {
        self.method_handles.push((handle_type, index));
        self.method_handles.len() as u32 - 1
    }

    pub fn call_site(&mut self, values: Vec<Vec<u8>>) -> u32 {
        self.call_sites.push(values);
        self.call_sites.len() as u32 - 1
    }

    /// Lay out the image. Unreferenced code specs are not written.
    pub fn build(&self) -> Vec<u8> {
        let mut w = Writer::default();
        w.out.resize(HEADER_SIZE, 0);
        let mut map: Vec<MapItem> = vec![item(MapItemType::HeaderItem, 1, 0)];

        let ids = |w: &mut Writer, map: &mut Vec<MapItem>, t, count: usize, size: usize| {
            if count == 0 {
                return 0;
            }
            let off = w.pos();
            w.out.resize(w.out.len() + count * size, 0);
            map.push(item(t, count as u32, off));
            off
        };
        let string_ids_off = ids(&mut w, &mut map, MapItemType::StringIdItem, self.strings.len(), 4);
        let type_ids_off = ids(&mut w, &mut map, MapItemType::TypeIdItem, self.types.len(), 4);
        let proto_ids_off = ids(&mut w, &mut map, MapItemType::ProtoIdItem, self.protos.len(), 12);
        let field_ids_off = ids(&mut w, &mut map, MapItemType::FieldIdItem, self.fields.len(), 8);
        let method_ids_off = ids(&mut w, &mut map, MapItemType::MethodIdItem, self.methods.len(), 8);
        let class_defs_off = ids(&mut w, &mut map, MapItemType::ClassDefItem, self.classes.len(), 32);
        let call_sites_off = ids(&mut w, &mut map, MapItemType::CallSiteIdItem, self.call_sites.len(), 4);
        let handles_off = ids(&mut w, &mut map, MapItemType::MethodHandleItem, self.method_handles.len(), 8);

        w.align4();
        let data_off = w.pos();

        // Unaligned data first: strings, debug info, annotations, arrays.
        let mut sec = Sections::default();
        for (i, s) in self.strings.keys().enumerate() {
            let off = w.pos();
            sec.note(MapItemType::StringDataItem, off);
            w.uleb(s.encode_utf16().count() as u32);
            w.out.extend_from_slice(&mutf8(s));
            w.out.push(0);
            w.patch32(string_ids_off as usize + i * 4, off);
        }

        let used_codes = self.used_codes();
        let mut debug_offs = vec![0u32; self.codes.len()];
        for &c in &used_codes {
            if let Some(debug) = &self.codes[c].debug_info {
                debug_offs[c] = w.pos();
                sec.note(MapItemType::DebugInfoItem, w.pos());
                w.out.extend_from_slice(debug);
            }
        }

        // Annotation items, one per occurrence.
        let mut annotation_offs: Vec<Vec<u32>> = Vec::new();
        for list in self.annotation_lists() {
            let offs = list
                .iter()
                .map(|a| {
                    let off = w.pos();
                    sec.note(MapItemType::AnnotationItem, off);
                    w.out.push(a.visibility);
                    w.encoded_annotation(a.type_idx, &a.elements);
                    off
                })
                .collect();
            annotation_offs.push(offs);
        }

        let mut static_value_offs = vec![0u32; self.classes.len()];
        for (i, class) in self.classes.iter().enumerate() {
            if let Some(values) = &class.static_values {
                static_value_offs[i] = w.pos();
                sec.note(MapItemType::EncodedArrayItem, w.pos());
                w.encoded_array(values);
            }
        }
        let mut call_site_offs = Vec::new();
        for values in &self.call_sites {
            call_site_offs.push(w.pos());
            sec.note(MapItemType::EncodedArrayItem, w.pos());
            w.encoded_array(values);
        }

        // Aligned data: type lists, annotation sets and directories, code.
        let mut lists: IndexMap<Vec<u32>, u32> = IndexMap::new();
        let mut type_list = |w: &mut Writer, sec: &mut Sections, types: &[u32]| -> u32 {
            if types.is_empty() {
                return 0;
            }
            if self.share_type_lists {
                if let Some(&off) = lists.get(types) {
                    return off;
                }
            }
            w.align4();
            let off = w.pos();
            sec.note(MapItemType::TypeList, off);
            w.u32(types.len() as u32);
            for &t in types {
                w.u16(t as u16);
            }
            lists.insert(types.to_vec(), off);
            off
        };
        let proto_params: Vec<u32> = self
            .protos
            .iter()
            .map(|p| type_list(&mut w, &mut sec, &p.params))
            .collect();
        let interfaces: Vec<u32> = self
            .classes
            .iter()
            .map(|c| type_list(&mut w, &mut sec, &c.interfaces))
            .collect();

        let mut set_offs: Vec<u32> = Vec::new();
        for offs in &annotation_offs {
            w.align4();
            let off = w.pos();
            sec.note(MapItemType::AnnotationSetItem, off);
            w.u32(offs.len() as u32);
            for &a in offs {
                w.u32(a);
            }
            set_offs.push(off);
        }

        let mut directory_offs = vec![0u32; self.classes.len()];
        let mut next_set = 0usize;
        let mut ref_lists: Vec<(usize, Vec<u32>)> = Vec::new();
        let mut class_sets = Vec::new();
        for (i, class) in self.classes.iter().enumerate() {
            if !class.has_annotations() {
                class_sets.push(None);
                continue;
            }
            let mut take = || {
                next_set += 1;
                set_offs[next_set - 1]
            };
            let class_set = (!class.class_annotations.is_empty()).then(&mut take);
            let fields: Vec<(u32, u32)> =
                class.field_annotations.iter().map(|(f, _)| (*f, take())).collect();
            let methods: Vec<(u32, u32)> =
                class.method_annotations.iter().map(|(m, _)| (*m, take())).collect();
            let params: Vec<(u32, Vec<u32>)> = class
                .parameter_annotations
                .iter()
                .map(|(m, sets)| (*m, sets.iter().map(|_| take()).collect()))
                .collect();
            for (_, sets) in &params {
                ref_lists.push((i, sets.clone()));
            }
            class_sets.push(Some((class_set, fields, methods, params)));
        }
        let mut ref_list_offs = Vec::new();
        for (_, sets) in &ref_lists {
            w.align4();
            let off = w.pos();
            sec.note(MapItemType::AnnotationSetRefList, off);
            w.u32(sets.len() as u32);
            for &s in sets {
                w.u32(s);
            }
            ref_list_offs.push(off);
        }
        let mut next_ref_list = 0usize;
        for (i, entry) in class_sets.iter().enumerate() {
            let Some((class_set, fields, methods, params)) = entry else {
                continue;
            };
            w.align4();
            directory_offs[i] = w.pos();
            sec.note(MapItemType::AnnotationsDirectoryItem, w.pos());
            w.u32(class_set.unwrap_or(0));
            w.u32(fields.len() as u32);
            w.u32(methods.len() as u32);
            w.u32(params.len() as u32);
            for &(f, s) in fields {
                w.u32(f);
                w.u32(s);
            }
            for &(m, s) in methods {
                w.u32(m);
                w.u32(s);
            }
            for (m, _) in params {
                w.u32(*m);
                w.u32(ref_list_offs[next_ref_list]);
                next_ref_list += 1;
            }
        }

        let mut code_offs = vec![0u32; self.codes.len()];
        for &c in &used_codes {
            w.align4();
            code_offs[c] = w.pos();
            sec.note(MapItemType::CodeItem, w.pos());
            w.code_item(&self.codes[c], debug_offs[c]);
        }

        let mut class_data_offs = vec![0u32; self.classes.len()];
        for (i, class) in self.classes.iter().enumerate() {
            if !class.has_members() {
                continue;
            }
            class_data_offs[i] = w.pos();
            sec.note(MapItemType::ClassDataItem, w.pos());
            w.uleb(class.static_fields.len() as u32);
            w.uleb(class.instance_fields.len() as u32);
            w.uleb(class.direct_methods.len() as u32);
            w.uleb(class.virtual_methods.len() as u32);
            w.fields(&class.static_fields);
            w.fields(&class.instance_fields);
            w.methods(&class.direct_methods, &code_offs);
            w.methods(&class.virtual_methods, &code_offs);
        }

        // Id tables now that data offsets are known.
        for (i, &t) in self.types.iter().enumerate() {
            w.patch32(type_ids_off as usize + i * 4, t);
        }
        for (i, p) in self.protos.iter().enumerate() {
            let at = proto_ids_off as usize + i * 12;
            w.patch32(at, p.shorty);
            w.patch32(at + 4, p.return_type);
            w.patch32(at + 8, proto_params[i]);
        }
        for (i, f) in self.fields.iter().enumerate() {
            let at = field_ids_off as usize + i * 8;
            w.patch16(at, f[0] as u16);
            w.patch16(at + 2, f[1] as u16);
            w.patch32(at + 4, f[2]);
        }
        for (i, m) in self.methods.iter().enumerate() {
            let at = method_ids_off as usize + i * 8;
            w.patch16(at, m[0] as u16);
            w.patch16(at + 2, m[1] as u16);
            w.patch32(at + 4, m[2]);
        }
        for (i, c) in self.classes.iter().enumerate() {
            let at = class_defs_off as usize + i * 32;
            w.patch32(at, c.class);
            w.patch32(at + 4, c.access_flags);
            w.patch32(at + 8, c.superclass.unwrap_or(u32::MAX));
            w.patch32(at + 12, interfaces[i]);
            w.patch32(at + 16, c.source_file.unwrap_or(u32::MAX));
            w.patch32(at + 20, directory_offs[i]);
            w.patch32(at + 24, class_data_offs[i]);
            w.patch32(at + 28, static_value_offs[i]);
        }
        for (i, &off) in call_site_offs.iter().enumerate() {
            w.patch32(call_sites_off as usize + i * 4, off);
        }
        for (i, &(t, idx)) in self.method_handles.iter().enumerate() {
            let at = handles_off as usize + i * 8;
            w.patch16(at, t);
            w.patch16(at + 4, idx);
        }

        w.align4();
        let map_off = w.pos();
        map.extend(sec.items());
        map.push(item(MapItemType::MapList, 1, map_off));
        map.sort_by_key(|m| m.offset);
        w.out.extend_from_slice(&MapList { items: map }.to_bytes());
        let data_size = w.pos() - data_off;

        let (link_size, link_off) = if self.link.is_empty() {
            (0, 0)
        } else {
            let off = w.pos();
            w.out.extend_from_slice(&self.link);
            (self.link.len() as u32, off)
        };

        let mut magic = [0u8; 8];
        magic[..4].copy_from_slice(b"dex\n");
        magic[4..].copy_from_slice(&self.version);
        let header = DiskHeader {
            magic,
            checksum: 0,
            signature: [0; SIGNATURE_SIZE],
            file_size: w.pos(),
            header_size: HEADER_SIZE as u32,
            endian_tag: ENDIAN_CONSTANT,
            link_size,
            link_off,
            map_off,
            string_ids_size: self.strings.len() as u32,
            string_ids_off,
            type_ids_size: self.types.len() as u32,
            type_ids_off,
            proto_ids_size: self.protos.len() as u32,
            proto_ids_off,
            field_ids_size: self.fields.len() as u32,
            field_ids_off,
            method_ids_size: self.methods.len() as u32,
            method_ids_off,
            class_defs_size: self.classes.len() as u32,
            class_defs_off,
            data_size,
            data_off,
        };
        let mut out = w.out;
        out[..HEADER_SIZE].copy_from_slice(&header.to_bytes());
        refresh_checksum(&mut out);
        out
    }

    fn used_codes(&self) -> Vec<usize> {
        let mut used: Vec<usize> = self
            .classes
            .iter()
            .flat_map(|c| c.direct_methods.iter().chain(&c.virtual_methods))
            .filter_map(|m| m.code)
            .collect();
        used.sort_unstable();
        used.dedup();
        used
    }

    /// Every annotation set in write order: per class, the class set,
    /// then field, method and parameter sets.
    fn annotation_lists(&self) -> Vec<&[AnnotationSpec]> {
        let mut lists: Vec<&[AnnotationSpec]> = Vec::new();
        for class in &self.classes {
            if !class.class_annotations.is_empty() {
                lists.push(&class.class_annotations);
            }
            lists.extend(class.field_annotations.iter().map(|(_, a)| a.as_slice()));
            lists.extend(class.method_annotations.iter().map(|(_, a)| a.as_slice()));
            for (_, sets) in &class.parameter_annotations {
                lists.extend(sets.iter().map(Vec::as_slice));
            }
        }
        lists
    }
}

fn shorty_char(descriptor: &str) -> char {
    match descriptor.as_bytes()[0] {
        b'L' | b'[' => 'L',
        c => c as char,
    }
}

fn item(t: MapItemType, size: u32, offset: u32) -> MapItem {
    MapItem {
        type_code: t as u16,
        size,
        offset,
    }
}

/// First offset and count of each data section.
#[derive(Default)]
struct Sections(IndexMap<MapItemType, (u32, u32)>);

impl Sections {
    fn note(&mut self, t: MapItemType, offset: u32) {
        self.0.entry(t).or_insert((offset, 0)).1 += 1;
    }

    fn items(&self) -> impl Iterator<Item = MapItem> + '_ {
        self.0.iter().map(|(&t, &(off, n))| item(t, n, off))
    }
}

#[derive(Default)]
struct Writer {
    out: Vec<u8>,
}

impl Writer {
    fn pos(&self) -> u32 {
        self.out.len() as u32
    }

    fn align4(&mut self) {
        while self.out.len() % 4 != 0 {
            self.out.push(0);
        }
    }

    fn u16(&mut self, v: u16) {
        self.out.extend_from_slice(&v.to_le_bytes());
    }

    fn u32(&mut self, v: u32) {
        self.out.extend_from_slice(&v.to_le_bytes());
    }

    fn uleb(&mut self, v: u32) {
        uleb128(&mut self.out, v);
    }

    fn patch16(&mut self, at: usize, v: u16) {
        self.out[at..at + 2].copy_from_slice(&v.to_le_bytes());
    }

    fn patch32(&mut self, at: usize, v: u32) {
        self.out[at..at + 4].copy_from_slice(&v.to_le_bytes());
    }

    fn encoded_array(&mut self, values: &[Vec<u8>]) {
        self.uleb(values.len() as u32);
        for v in values {
            self.out.extend_from_slice(v);
        }
    }

    fn encoded_annotation(&mut self, type_idx: u32, elements: &[(u32, Vec<u8>)]) {
        self.uleb(type_idx);
        self.uleb(elements.len() as u32);
        for (name, value) in elements {
            self.uleb(*name);
            self.out.extend_from_slice(value);
        }
    }

    fn fields(&mut self, fields: &[(u32, u32)]) {
        let mut prev = 0;
        for &(idx, flags) in fields {
            self.uleb(idx - prev);
            self.uleb(flags);
            prev = idx;
        }
    }

    fn methods(&mut self, methods: &[MethodSpec], code_offs: &[u32]) {
        let mut prev = 0;
        for m in methods {
            self.uleb(m.method - prev);
            self.uleb(m.access_flags);
            self.uleb(m.code.map_or(0, |c| code_offs[c]));
            prev = m.method;
        }
    }

    fn code_item(&mut self, code: &CodeSpec, debug_info_off: u32) {
        self.u16(code.registers);
        self.u16(code.ins);
        self.u16(code.outs);
        self.u16(code.tries.len() as u16);
        self.u32(debug_info_off);
        self.u32(code.insns.len() as u32);
        for &unit in &code.insns {
            self.u16(unit);
        }
        if code.tries.is_empty() {
            return;
        }
        if code.insns.len() % 2 == 1 {
            self.u16(0);
        }

        // Encode handler lists first to learn their relative offsets.
        let mut data = Vec::new();
        uleb128(&mut data, code.handlers.len() as u32);
        let mut handler_offs = Vec::new();
        for h in &code.handlers {
            handler_offs.push(data.len() as u16);
            let size = h.catches.len() as i32;
            sleb128(&mut data, if h.catch_all.is_some() { -size } else { size });
            for &(t, addr) in &h.catches {
                uleb128(&mut data, t);
                uleb128(&mut data, addr);
            }
            if let Some(addr) = h.catch_all {
                uleb128(&mut data, addr);
            }
        }
        for t in &code.tries {
            self.u32(t.start);
            self.u16(t.count);
            self.u16(handler_offs[t.handler]);
        }
        self.out.extend_from_slice(&data);
    }
}

pub fn uleb128(out: &mut Vec<u8>, mut v: u32) {
    loop {
        let byte = (v & 0x7f) as u8;
        v >>= 7;
        if v == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

pub fn sleb128(out: &mut Vec<u8>, mut v: i32) {
    loop {
        let byte = (v & 0x7f) as u8;
        v >>= 7;
        let done = (v == 0 && byte & 0x40 == 0) || (v == -1 && byte & 0x40 != 0);
        if done {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// MUTF-8 encoding: NUL as `C0 80`, supplementary characters as surrogate pairs.
pub fn mutf8(s: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for unit in s.encode_utf16() {
        match unit {
            0x01..=0x7f => out.push(unit as u8),
            0x00 | 0x80..=0x7ff => {
                out.push(0xc0 | (unit >> 6) as u8);
                out.push(0x80 | (unit & 0x3f) as u8);
            }
            _ => {
                out.push(0xe0 | (unit >> 12) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3f) as u8);
                out.push(0x80 | (unit & 0x3f) as u8);
            }
        }
    }
    out
}

/// Encoded value builders.
pub mod value {
    fn unsigned(value_type: u8, v: u64) -> Vec<u8> {
        let len = ((64 - v.leading_zeros() as usize).div_ceil(8)).max(1);
        let mut out = vec![((len as u8 - 1) << 5) | value_type];
        out.extend_from_slice(&v.to_le_bytes()[..len]);
        out
    }

    fn signed(value_type: u8, v: i64) -> Vec<u8> {
        let bytes = v.to_le_bytes();
        let mut len = 8;
        while len > 1 {
            let top = bytes[len - 1];
            let sign = bytes[len - 2] & 0x80;
            if (top == 0 && sign == 0) || (top == 0xff && sign != 0) {
                len -= 1;
            } else {
                break;
            }
        }
        let mut out = vec![((len as u8 - 1) << 5) | value_type];
        out.extend_from_slice(&bytes[..len]);
        out
    }

    fn right_zero(value_type: u8, bits: u64, width: usize) -> Vec<u8> {
        let bytes = &bits.to_le_bytes()[..width];
        let mut start = 0;
        while start < width - 1 && bytes[start] == 0 {
            start += 1;
        }
        let mut out = vec![(((width - start - 1) as u8) << 5) | value_type];
        out.extend_from_slice(&bytes[start..]);
        out
    }

    pub fn byte(v: i8) -> Vec<u8> {
        vec![0x00, v as u8]
    }

    pub fn short(v: i16) -> Vec<u8> {
        signed(0x02, i64::from(v))
    }

    pub fn char(v: u16) -> Vec<u8> {
        unsigned(0x03, u64::from(v))
    }

    pub fn int(v: i32) -> Vec<u8> {
        signed(0x04, i64::from(v))
    }

    pub fn long(v: i64) -> Vec<u8> {
        signed(0x06, v)
    }

    pub fn float(v: f32) -> Vec<u8> {
        right_zero(0x10, u64::from(v.to_bits()), 4)
    }

    pub fn double(v: f64) -> Vec<u8> {
        right_zero(0x11, v.to_bits(), 8)
    }

    pub fn method_type(idx: u32) -> Vec<u8> {
        unsigned(0x15, u64::from(idx))
    }

    pub fn method_handle(idx: u32) -> Vec<u8> {
        unsigned(0x16, u64::from(idx))
    }

    pub fn string(idx: u32) -> Vec<u8> {
        unsigned(0x17, u64::from(idx))
    }

    pub fn type_(idx: u32) -> Vec<u8> {
        unsigned(0x18, u64::from(idx))
    }

    pub fn field(idx: u32) -> Vec<u8> {
        unsigned(0x19, u64::from(idx))
    }

    pub fn method(idx: u32) -> Vec<u8> {
        unsigned(0x1a, u64::from(idx))
    }

    pub fn enum_(idx: u32) -> Vec<u8> {
        unsigned(0x1b, u64::from(idx))
    }

    pub fn array(values: &[Vec<u8>]) -> Vec<u8> {
        let mut out = vec![0x1c];
        super::uleb128(&mut out, values.len() as u32);
        for v in values {
            out.extend_from_slice(v);
        }
        out
    }

    pub fn annotation(type_idx: u32, elements: &[(u32, Vec<u8>)]) -> Vec<u8> {
        let mut out = vec![0x1d];
        super::uleb128(&mut out, type_idx);
        super::uleb128(&mut out, elements.len() as u32);
        for (name, v) in elements {
            super::uleb128(&mut out, *name);
            out.extend_from_slice(v);
        }
        out
    }

    pub fn null() -> Vec<u8> {
        vec![0x1e]
    }

    pub fn boolean(v: bool) -> Vec<u8> {
        vec![(u8::from(v) << 5) | 0x1f]
    }
}

/// Recompute checksum and signature after patching `bytes`.
pub fn refresh_checksum(bytes: &mut [u8]) {
    let signature = compute_signature(bytes);
    bytes[SIGNATURE_OFFSET..SIGNATURE_OFFSET + SIGNATURE_SIZE].copy_from_slice(&signature);
    let checksum = compute_checksum(bytes);
    bytes[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 4].copy_from_slice(&checksum.to_le_bytes());
}

fn map_off(bytes: &[u8]) -> usize {
    u32::from_le_bytes([bytes[0x34], bytes[0x35], bytes[0x36], bytes[0x37]]) as usize
}

/// Rewrite the first map entry of type `t` in place.
pub fn patch_map_entry(bytes: &mut [u8], t: MapItemType, patch: impl FnOnce(&mut MapItem)) {
    let base = map_off(bytes);
    let count = u32::from_le_bytes([bytes[base], bytes[base + 1], bytes[base + 2], bytes[base + 3]]);
    for i in 0..count as usize {
        let at = base + 4 + i * MapItem::SIZE;
        let code = u16::from_le_bytes([bytes[at], bytes[at + 1]]);
        if code != t as u16 {
            continue;
        }
        let mut entry = MapItem {
            type_code: code,
            size: u32::from_le_bytes([bytes[at + 4], bytes[at + 5], bytes[at + 6], bytes[at + 7]]),
            offset: u32::from_le_bytes([bytes[at + 8], bytes[at + 9], bytes[at + 10], bytes[at + 11]]),
        };
        patch(&mut entry);
        bytes[at..at + 2].copy_from_slice(&entry.type_code.to_le_bytes());
        bytes[at + 4..at + 8].copy_from_slice(&entry.size.to_le_bytes());
        bytes[at + 8..at + 12].copy_from_slice(&entry.offset.to_le_bytes());
        return;
    }
    panic!("no map entry of type {t}");
}

/// A class with one virtual method `run()V` whose body is `insns`.
pub fn single_method(insns: Vec<u16>) -> (DexFixture, u32) {
    let mut f = DexFixture::new();
    let object = f.type_id("Ljava/lang/Object;");
    let class = f.type_id("LMain;");
    let method = f.method("LMain;", "run", "V", &[]);
    let code = f.code(CodeSpec::new(1, insns));
    f.class(ClassSpec {
        superclass: Some(object),
        virtual_methods: vec![MethodSpec {
            method,
            access_flags: 0x0001,
            code: Some(code),
        }],
        ..ClassSpec::new(class)
    });
    (f, method)
}
