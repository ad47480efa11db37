use std::fmt::Write;
use std::path::PathBuf;

use dexir::BuildOptions;
use dexir_core::Colors;
use dexir_format::format::{DexReader, MapItem, MapList};

use super::loader::{LoadError, fail, load};

pub struct MapArgs {
    pub file: PathBuf,
    pub options: BuildOptions,
    pub color: bool,
}

pub fn run(args: MapArgs) {
    let (bytes, header) = load(&args.file, &args.options).unwrap_or_else(|e| fail(e));
    let offset = header.collections().map_list_offset();
    let disk = MapList::parse(&DexReader::new(&bytes), offset).unwrap_or_else(|source| {
        fail(LoadError::Dex {
            path: args.file.clone(),
            source,
        })
    });
    let computed = header.collections().map_items();
    print!("{}", render(&disk.items, &computed, Colors::new(args.color)));
}

/// Disk and computed entries side by side, one line per section type.
/// Rows that differ are flagged with `!`.
pub fn render(disk: &[MapItem], computed: &[MapItem], colors: Colors) -> String {
    let mut out = String::new();
    writeln!(
        out,
        "{}",
        colors.paint(colors.section, format!("  {:<32} {:>19}   {:>19}", "type", "disk", "ir"))
    )
    .unwrap();

    let mut rows: Vec<u16> = disk.iter().map(|i| i.type_code).collect();
    for item in computed {
        if !rows.contains(&item.type_code) {
            rows.push(item.type_code);
        }
    }

    for code in rows {
        let d = disk.iter().find(|i| i.type_code == code);
        let c = computed.iter().find(|i| i.type_code == code);
        let name = d
            .or(c)
            .and_then(|i| i.item_type())
            .map_or_else(|| format!("{code:#06x}"), |t| t.to_string());
        let marker = if d == c { " " } else { "!" };
        writeln!(
            out,
            "{} {:<32} {}   {}",
            colors.paint(colors.dim, marker),
            name,
            cell(d),
            cell(c)
        )
        .unwrap();
    }
    out
}

fn cell(item: Option<&MapItem>) -> String {
    match item {
        Some(i) => format!("{:>8} @ {:#08x}", i.size, i.offset),
        None => format!("{:>19}", "-"),
    }
}
