use std::path::{Path, PathBuf};

use dexir::{BuildOptions, Header};
use serde::Serialize;

use super::loader::{fail, load};

pub struct CheckArgs {
    pub file: PathBuf,
    pub options: BuildOptions,
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub file: String,
    pub version: String,
    pub file_size: u32,
    pub strings: usize,
    pub types: usize,
    pub protos: usize,
    pub fields: usize,
    pub methods: usize,
    pub classes: usize,
    pub code_items: usize,
    pub call_sites: usize,
    pub method_handles: usize,
    pub truncated: Vec<TruncatedMethod>,
}

#[derive(Debug, Serialize)]
pub struct TruncatedMethod {
    pub method: String,
    pub pc: u32,
}

impl CheckReport {
    pub fn new(file: &Path, header: &Header) -> Self {
        let c = header.collections();
        Self {
            file: file.display().to_string(),
            version: header.version(),
            file_size: header.file_size,
            strings: c.string_ids().len(),
            types: c.type_ids().len(),
            protos: c.proto_ids().len(),
            fields: c.field_ids().len(),
            methods: c.method_ids().len(),
            classes: c.class_defs().len(),
            code_items: c.code_items().len(),
            call_sites: c.call_site_ids().len(),
            method_handles: c.method_handles().len(),
            truncated: header
                .truncated_code()
                .iter()
                .map(|t| TruncatedMethod {
                    method: c.method_signature(t.method),
                    pc: t.pc,
                })
                .collect(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = format!(
            "{}: dex {}, {} bytes\n  {} strings, {} types, {} protos, {} fields, {} methods\n  {} classes, {} code items, {} call sites, {} method handles\n",
            self.file,
            self.version,
            self.file_size,
            self.strings,
            self.types,
            self.protos,
            self.fields,
            self.methods,
            self.classes,
            self.code_items,
            self.call_sites,
            self.method_handles,
        );
        for t in &self.truncated {
            out.push_str(&format!("  warning: {} truncated at pc {}\n", t.method, t.pc));
        }
        out
    }
}

pub fn run(args: CheckArgs) {
    let (_bytes, header) = load(&args.file, &args.options).unwrap_or_else(|e| fail(e));
    let report = CheckReport::new(&args.file, &header);

    if args.json {
        let json = serde_json::to_string_pretty(&report).expect("report serialization failed");
        println!("{json}");
    } else {
        print!("{}", report.render_text());
    }
}
