use std::path::PathBuf;

use dexir::{BuildOptions, dump};
use dexir_core::Colors;

use super::loader::{fail, load};

pub struct DumpArgs {
    pub file: PathBuf,
    pub options: BuildOptions,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let (_bytes, header) = load(&args.file, &args.options).unwrap_or_else(|e| fail(e));
    print!("{}", dump(&header, Colors::new(args.color)));
}
