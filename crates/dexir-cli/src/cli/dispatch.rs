//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use dexir::BuildOptions;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::map::MapArgs;

/// Build flags shared by every subcommand.
#[derive(Debug)]
pub struct BuildParams {
    pub file: PathBuf,
    pub lazy_offsets: bool,
    pub classes: Vec<String>,
    pub verify: bool,
}

impl BuildParams {
    fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: m.get_one::<PathBuf>("file").cloned().unwrap_or_default(),
            lazy_offsets: m.get_flag("lazy_offsets"),
            classes: m
                .get_many::<String>("class")
                .map(|v| v.cloned().collect())
                .unwrap_or_default(),
            verify: m.get_flag("verify"),
        }
    }

    pub fn options(&self) -> BuildOptions {
        BuildOptions::new()
            .eager_offsets(!self.lazy_offsets)
            .class_filter(self.classes.iter().cloned())
            .verify_checksum(self.verify)
            .verify_signature(self.verify)
    }
}

pub struct DumpParams {
    pub build: BuildParams,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            build: BuildParams::from_matches(m),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            options: p.build.options(),
            file: p.build.file,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub build: BuildParams,
    pub json: bool,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            build: BuildParams::from_matches(m),
            json: m.get_flag("json"),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            options: p.build.options(),
            file: p.build.file,
            json: p.json,
        }
    }
}

pub struct MapParams {
    pub build: BuildParams,
    pub color: ColorChoice,
}

impl MapParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            build: BuildParams::from_matches(m),
            color: parse_color(m),
        }
    }
}

impl From<MapParams> for MapArgs {
    fn from(p: MapParams) -> Self {
        Self {
            options: p.build.options(),
            file: p.build.file,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
