//! Human-readable dump of a built IR.

use std::fmt::Write as _;

use dexir_core::Colors;
use dexir_core::utils::{FlagTarget, access_flags_string, pretty_descriptor};

use super::collections::Collections;
use super::header::Header;
use super::items::ClassDef;
use super::refs::Handle;

/// Render `header` as text, one `[section]` block per id table, then the
/// classes and the map list.
pub fn dump(header: &Header, colors: Colors) -> String {
    let mut out = String::new();
    let ctx = DumpContext::new(header.collections(), colors);

    dump_header(&mut out, header, &ctx);
    dump_strings(&mut out, &ctx);
    dump_types(&mut out, &ctx);
    dump_protos(&mut out, &ctx);
    dump_fields(&mut out, &ctx);
    dump_methods(&mut out, &ctx);
    dump_classes(&mut out, &ctx);
    dump_map(&mut out, &ctx);

    out
}

/// Minimum width for numbers up to `count - 1`.
fn width_for_count(count: usize) -> usize {
    if count <= 1 {
        1
    } else {
        ((count - 1) as f64).log10().floor() as usize + 1
    }
}

struct DumpContext<'a> {
    c: &'a Collections,
    colors: Colors,
    str_width: usize,
    type_width: usize,
    proto_width: usize,
    field_width: usize,
    method_width: usize,
}

impl<'a> DumpContext<'a> {
    fn new(c: &'a Collections, colors: Colors) -> Self {
        Self {
            c,
            colors,
            str_width: width_for_count(c.string_ids().len()),
            type_width: width_for_count(c.type_ids().len()),
            proto_width: width_for_count(c.proto_ids().len()),
            field_width: width_for_count(c.field_ids().len()),
            method_width: width_for_count(c.method_ids().len()),
        }
    }

    fn section(&self, out: &mut String, name: &str) {
        let title = format!("[{name}]");
        writeln!(out, "{}", self.colors.paint(self.colors.section, title)).unwrap();
    }

    fn label(&self, prefix: char, index: usize, width: usize) -> String {
        self.colors
            .paint(self.colors.label, format!("{prefix}{index:0width$}"))
    }

    fn literal(&self, text: impl std::fmt::Display) -> String {
        self.colors.paint(self.colors.literal, text)
    }

    fn dim(&self, text: impl std::fmt::Display) -> String {
        self.colors.paint(self.colors.dim, text)
    }
}

fn offset_str(offset: Option<u32>) -> String {
    match offset {
        Some(off) => format!("@{off:#x}"),
        None => "@-".to_string(),
    }
}

fn dump_header(out: &mut String, header: &Header, ctx: &DumpContext) {
    ctx.section(out, "header");
    writeln!(out, "version = {}", header.version()).unwrap();
    writeln!(out, "file_size = {:#x}", header.file_size).unwrap();
    writeln!(out, "checksum = {:#010x}", header.checksum).unwrap();
    writeln!(out, "data = {:#x} @ {:#x}", header.data_size, header.data_offset).unwrap();
    writeln!(out, "link = {:#x} @ {:#x}", header.link_size, header.link_offset).unwrap();
    writeln!(out, "default_methods = {}", header.support_default_methods).unwrap();
    out.push('\n');
}

fn dump_strings(out: &mut String, ctx: &DumpContext) {
    ctx.section(out, "strings");
    for (h, _) in ctx.c.string_ids().iter() {
        let text = format!("{:?}", ctx.c.string(h));
        writeln!(
            out,
            "{} {}",
            ctx.label('S', h.index(), ctx.str_width),
            ctx.literal(text)
        )
        .unwrap();
    }
    out.push('\n');
}

fn dump_types(out: &mut String, ctx: &DumpContext) {
    ctx.section(out, "types");
    for (h, _) in ctx.c.type_ids().iter() {
        let descriptor = ctx.c.descriptor(h);
        writeln!(
            out,
            "{} {}  {}",
            ctx.label('T', h.index(), ctx.type_width),
            ctx.literal(&descriptor),
            ctx.dim(format!("; {}", pretty_descriptor(&descriptor)))
        )
        .unwrap();
    }
    out.push('\n');
}

fn dump_protos(out: &mut String, ctx: &DumpContext) {
    ctx.section(out, "protos");
    for (h, proto) in ctx.c.proto_ids().iter() {
        writeln!(
            out,
            "{} {}  {}",
            ctx.label('P', h.index(), ctx.proto_width),
            ctx.literal(ctx.c.proto_signature(h)),
            ctx.dim(format!("; {}", ctx.c.string(proto.shorty)))
        )
        .unwrap();
    }
    out.push('\n');
}

fn dump_fields(out: &mut String, ctx: &DumpContext) {
    ctx.section(out, "fields");
    for (h, _) in ctx.c.field_ids().iter() {
        writeln!(
            out,
            "{} {}",
            ctx.label('F', h.index(), ctx.field_width),
            ctx.literal(ctx.c.field_signature(h))
        )
        .unwrap();
    }
    out.push('\n');
}

fn dump_methods(out: &mut String, ctx: &DumpContext) {
    ctx.section(out, "methods");
    for (h, _) in ctx.c.method_ids().iter() {
        writeln!(
            out,
            "{} {}",
            ctx.label('M', h.index(), ctx.method_width),
            ctx.literal(ctx.c.method_signature(h))
        )
        .unwrap();
    }
    out.push('\n');
}

fn dump_classes(out: &mut String, ctx: &DumpContext) {
    ctx.section(out, "classes");
    for (_, def) in ctx.c.class_defs().iter() {
        dump_class(out, ctx, def);
    }
    out.push('\n');
}

fn dump_class(out: &mut String, ctx: &DumpContext, def: &ClassDef) {
    let c = ctx.c;
    let flags = access_flags_string(def.access_flags, FlagTarget::Class);
    write!(out, "{}", ctx.literal(c.descriptor(def.class_type))).unwrap();
    if !flags.is_empty() {
        write!(out, " {flags}").unwrap();
    }
    writeln!(out, "  {}", ctx.dim(offset_str(def.offset))).unwrap();

    if let Some(sup) = def.superclass {
        writeln!(out, "  extends {}", c.descriptor(sup)).unwrap();
    }
    if let Some(list) = def.interfaces {
        for &t in &c.type_lists()[list].types {
            writeln!(out, "  implements {}", c.descriptor(t)).unwrap();
        }
    }
    if let Some(source) = def.source_file {
        writeln!(out, "  source {:?}", c.string(source)).unwrap();
    }
    if let Some(values) = def.static_values {
        let count = c.encoded_arrays()[values].values.len();
        writeln!(out, "  static_values {count}").unwrap();
    }

    let Some(data) = def.class_data else {
        return;
    };
    let data = &c.class_datas()[data];
    for field in data.fields() {
        let flags = access_flags_string(field.access_flags, FlagTarget::Field);
        let label = ctx.label('F', field.field.index(), ctx.field_width);
        writeln!(out, "{}", member_line("field", &label, &flags)).unwrap();
    }
    for method in data.methods() {
        let flags = access_flags_string(method.access_flags, FlagTarget::Method);
        let label = ctx.label('M', method.method.index(), ctx.method_width);
        out.push_str(&member_line("method", &label, &flags));
        if let Some(code) = method.code {
            let code = &c.code_items()[code];
            write!(
                out,
                "  {}",
                ctx.dim(format!(
                    "; regs={} ins={} outs={} insns={} tries={}",
                    code.registers_size,
                    code.ins_size,
                    code.outs_size,
                    code.insns_size_in_code_units(),
                    code.tries_size()
                ))
            )
            .unwrap();
        }
        out.push('\n');
    }
}

fn member_line(kind: &str, label: &str, flags: &str) -> String {
    if flags.is_empty() {
        format!("  {kind} {label}")
    } else {
        format!("  {kind} {label} {flags}")
    }
}

fn dump_map(out: &mut String, ctx: &DumpContext) {
    ctx.section(out, "map");
    for item in ctx.c.map_items() {
        let name = item
            .item_type()
            .map_or_else(|| format!("{:#06x}", item.type_code), |t| t.name().to_string());
        writeln!(
            out,
            "{} {} {}",
            ctx.dim(format!("{:#08x}", item.offset)),
            name,
            item.size
        )
        .unwrap();
    }
}
