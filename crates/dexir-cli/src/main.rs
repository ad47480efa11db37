mod cli;
mod commands;

use cli::{CheckParams, DumpParams, MapParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("map", m)) => {
            let params = MapParams::from_matches(m);
            commands::map::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
