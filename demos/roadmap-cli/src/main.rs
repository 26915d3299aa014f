//! roadmap-cli — line-oriented textual driver for the roadmap trunk-route
//! engine.
//!
//! Reads commands from stdin, one per line, `;`-delimited. `#` comments and
//! blank lines are ignored. Recognised commands: `addRoad`, `repairRoad`,
//! `newRoute`, `extendRoute`, `removeRoad`, `removeRoute`,
//! `getRouteDescription`, and the bare route-literal form
//! `<id>;<c0>;<len0>;<year0>;<c1>;…;<cN>`. Success prints nothing except for
//! `getRouteDescription`, which prints its description on its own line.
//! Any failure prints `ERROR <line_number>` to stderr and moves on to the
//! next line — except an allocation failure, which exits the process with
//! code 1 immediately. Normal end-of-input exits 0.
//!
//! This binary is a demonstration consumer of `roadmap_map::Map`, not where
//! correctness is pinned down — the core crates carry their own tests.

mod command;

use std::io::{self, BufRead, Write};

use anyhow::Result;

use command::Command;
use roadmap_map::{Map, MapError};

/// `true` iff `err` is the core's out-of-memory variant, surfaced through
/// whichever subsystem's error enum it originated in.
fn is_out_of_memory(err: &MapError) -> bool {
    use roadmap_graph::GraphError;
    use roadmap_index::IndexError;
    use roadmap_path::PathError;
    use roadmap_trunk::TrunkError;

    matches!(
        err,
        MapError::Index(IndexError::OutOfMemory)
            | MapError::Graph(GraphError::OutOfMemory)
            | MapError::Path(PathError::OutOfMemory)
            | MapError::Trunk(TrunkError::OutOfMemory)
    )
}

/// Outcome of running one command against the map.
enum Outcome {
    Ok,
    Description(Vec<u8>),
    Err(MapError),
}

fn run(map: &mut Map, cmd: Command) -> Outcome {
    let result = match cmd {
        Command::AddRoad { name1, name2, length, year } => map.add_road(&name1, &name2, length, year),
        Command::RepairRoad { name1, name2, year } => map.repair_road(&name1, &name2, year),
        Command::NewRoute { id, name1, name2 } => map.new_route(id, &name1, &name2),
        Command::ExtendRoute { id, name } => map.extend_route(id, &name),
        Command::RemoveRoad { name1, name2 } => map.remove_road(&name1, &name2),
        Command::RemoveRoute { id } => map.remove_route(id),
        Command::GetRouteDescription { id } => return Outcome::Description(map.get_route_description(id)),
        Command::RouteFromList { id, names, lengths, years } => {
            map.route_from_list(id, &names, &lengths, &years)
        }
    };

    match result {
        Ok(()) => Outcome::Ok,
        Err(e) => Outcome::Err(e),
    }
}

fn main() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut map = Map::new();

    for (line_number, line) in stdin.lock().lines().enumerate() {
        let line_number = line_number + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match command::parse(trimmed.as_bytes()) {
            Some(cmd) => match run(&mut map, cmd) {
                Outcome::Ok => {}
                Outcome::Description(desc) => {
                    out.write_all(&desc)?;
                    out.write_all(b"\n")?;
                }
                Outcome::Err(e) => {
                    eprintln!("ERROR {line_number}");
                    if is_out_of_memory(&e) {
                        std::process::exit(1);
                    }
                }
            },
            None => eprintln!("ERROR {line_number}"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_build_and_describe_round_trips_through_commands() {
        let mut map = Map::new();
        assert!(matches!(
            run(&mut map, command::parse(b"addRoad;A;B;10;2000").unwrap()),
            Outcome::Ok
        ));
        assert!(matches!(run(&mut map, command::parse(b"newRoute;1;A;B").unwrap()), Outcome::Ok));
        match run(&mut map, command::parse(b"getRouteDescription;1").unwrap()) {
            Outcome::Description(desc) => assert_eq!(desc, b"1;A;10;2000;B".to_vec()),
            _ => panic!("expected a description"),
        }
    }

    #[test]
    fn unrecognised_command_is_not_dispatched() {
        assert!(command::parse(b"bogus;1;2").is_none());
    }

    #[test]
    fn duplicate_road_surfaces_as_an_error_outcome() {
        let mut map = Map::new();
        run(&mut map, command::parse(b"addRoad;A;B;10;2000").unwrap());
        assert!(matches!(
            run(&mut map, command::parse(b"addRoad;A;B;5;1999").unwrap()),
            Outcome::Err(_)
        ));
    }
}
