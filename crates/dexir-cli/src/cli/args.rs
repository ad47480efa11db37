//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so every subcommand spells its
//! flags the same way.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// DEX file to read (positional).
pub fn file_arg() -> Arg {
    Arg::new("file")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("DEX file to read")
}

/// Skip offset assignment during the build (--lazy-offsets).
pub fn lazy_offsets_arg() -> Arg {
    Arg::new("lazy_offsets")
        .long("lazy-offsets")
        .action(ArgAction::SetTrue)
        .help("Leave item offsets unassigned")
}

/// Restrict the build to some classes (--class, repeatable).
pub fn class_arg() -> Arg {
    Arg::new("class")
        .long("class")
        .short('c')
        .value_name("DESCRIPTOR")
        .action(ArgAction::Append)
        .help("Only build this class (e.g. 'Lcom/example/Main;'), repeatable")
}

/// Verify checksum and signature before building (--verify).
pub fn verify_arg() -> Arg {
    Arg::new("verify")
        .long("verify")
        .action(ArgAction::SetTrue)
        .help("Verify the checksum and SHA-1 signature")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Machine-readable output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the report as JSON")
}
