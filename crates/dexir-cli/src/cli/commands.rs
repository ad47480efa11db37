//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Flags every subcommand shares: the file and the build options.
fn with_build_args(cmd: Command) -> Command {
    cmd.arg(file_arg())
        .arg(lazy_offsets_arg())
        .arg(class_arg())
        .arg(verify_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("dexir")
        .about("Inspect DEX files as a resolved IR graph")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(dump_command())
        .subcommand(check_command())
        .subcommand(map_command())
}

/// Print the whole IR as sectioned text.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Print the IR of a DEX file")
        .after_help(
            r#"EXAMPLES:
  dexir dump classes.dex
  dexir dump classes.dex --class 'Lcom/example/Main;'
  dexir dump classes.dex --color never | less"#,
        )
        .arg(color_arg());

    with_build_args(cmd)
}

/// Build the IR and report what was found.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a DEX file and summarize its contents")
        .after_help(
            r#"EXAMPLES:
  dexir check classes.dex             # counts and truncated methods
  dexir check classes.dex --verify    # also verify checksum and signature
  dexir check classes.dex --json      # machine-readable report"#,
        )
        .arg(json_arg());

    with_build_args(cmd)
}

/// Compare the on-disk map list with the one computed from the IR.
pub fn map_command() -> Command {
    let cmd = Command::new("map")
        .about("Show the disk map list next to the IR map")
        .after_help(
            r#"EXAMPLES:
  dexir map classes.dex
  dexir map classes.dex --lazy-offsets"#,
        )
        .arg(color_arg());

    with_build_args(cmd)
}
