//! Line tokenising for the textual driver.
//!
//! One command per input line, fields separated by `;`. `#` comments and
//! blank lines are recognised by the caller before a line ever reaches
//! [`parse`]. This module's own job is just: split on `;`, and decide which
//! [`Command`] (if any) the fields spell out. Field-count and value checks
//! that the core itself already enforces (e.g. `length >= 1`) are left to
//! `roadmap_map::Map` — this layer only rejects shapes the core has no
//! method to reject (wrong arity, non-numeric id).

pub enum Command {
    AddRoad { name1: Vec<u8>, name2: Vec<u8>, length: u32, year: i32 },
    RepairRoad { name1: Vec<u8>, name2: Vec<u8>, year: i32 },
    NewRoute { id: u32, name1: Vec<u8>, name2: Vec<u8> },
    ExtendRoute { id: u32, name: Vec<u8> },
    RemoveRoad { name1: Vec<u8>, name2: Vec<u8> },
    RemoveRoute { id: u32 },
    GetRouteDescription { id: u32 },
    RouteFromList { id: u32, names: Vec<Vec<u8>>, lengths: Vec<u32>, years: Vec<i32> },
}

fn parse_u32(field: &[u8]) -> Option<u32> {
    std::str::from_utf8(field).ok()?.parse().ok()
}

fn parse_i32(field: &[u8]) -> Option<i32> {
    std::str::from_utf8(field).ok()?.parse().ok()
}

/// Parse one already-trimmed, non-blank, non-comment line into a [`Command`].
/// `None` means the line's shape matches nothing this driver recognises.
pub fn parse(line: &[u8]) -> Option<Command> {
    let fields: Vec<&[u8]> = line.split(|&b| b == b';').collect();
    let (&head, rest) = fields.split_first()?;

    match head {
        b"addRoad" => {
            let [name1, name2, length, year] = rest else { return None };
            Some(Command::AddRoad {
                name1: name1.to_vec(),
                name2: name2.to_vec(),
                length: parse_u32(length)?,
                year: parse_i32(year)?,
            })
        }
        b"repairRoad" => {
            let [name1, name2, year] = rest else { return None };
            Some(Command::RepairRoad {
                name1: name1.to_vec(),
                name2: name2.to_vec(),
                year: parse_i32(year)?,
            })
        }
        b"newRoute" => {
            let [id, name1, name2] = rest else { return None };
            Some(Command::NewRoute {
                id: parse_u32(id)?,
                name1: name1.to_vec(),
                name2: name2.to_vec(),
            })
        }
        b"extendRoute" => {
            let [id, name] = rest else { return None };
            Some(Command::ExtendRoute { id: parse_u32(id)?, name: name.to_vec() })
        }
        b"removeRoad" => {
            let [name1, name2] = rest else { return None };
            Some(Command::RemoveRoad { name1: name1.to_vec(), name2: name2.to_vec() })
        }
        b"removeRoute" => {
            let [id] = rest else { return None };
            Some(Command::RemoveRoute { id: parse_u32(id)? })
        }
        b"getRouteDescription" => {
            let [id] = rest else { return None };
            Some(Command::GetRouteDescription { id: parse_u32(id)? })
        }
        _ => parse_route_literal(fields),
    }
}

/// `<id>;<c0>;<len0>;<year0>;<c1>;…;<cN>` — an id, then `N` `(name, length,
/// year)` triples, then a trailing name. Total field count is therefore
/// `3N + 2` (5, 8, 11, …) for `N >= 1`.
fn parse_route_literal(fields: Vec<&[u8]>) -> Option<Command> {
    if fields.len() < 5 || fields.len() % 3 != 2 {
        return None;
    }
    let id = parse_u32(fields[0])?;
    let gaps = (fields.len() - 2) / 3;
    let mut names = Vec::with_capacity(gaps + 1);
    let mut lengths = Vec::with_capacity(gaps);
    let mut years = Vec::with_capacity(gaps);

    names.push(fields[1].to_vec());
    let mut i = 2;
    for _ in 0..gaps {
        lengths.push(parse_u32(fields[i])?);
        years.push(parse_i32(fields[i + 1])?);
        names.push(fields[i + 2].to_vec());
        i += 3;
    }

    Some(Command::RouteFromList { id, names, lengths, years })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_road() {
        let cmd = parse(b"addRoad;A;B;10;2000").unwrap();
        assert!(matches!(cmd, Command::AddRoad { length: 10, year: 2000, .. }));
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(parse(b"addRoad;A;B;10").is_none());
    }

    #[test]
    fn parses_route_literal() {
        let cmd = parse(b"2;X;10;2000;Y;20;2001;Z").unwrap();
        match cmd {
            Command::RouteFromList { id, names, lengths, years } => {
                assert_eq!(id, 2);
                assert_eq!(names, vec![b"X".to_vec(), b"Y".to_vec(), b"Z".to_vec()]);
                assert_eq!(lengths, vec![10, 20]);
                assert_eq!(years, vec![2000, 2001]);
            }
            _ => panic!("expected RouteFromList"),
        }
    }

    #[test]
    fn route_literal_single_hop() {
        let cmd = parse(b"1;A;10;2000;B").unwrap();
        match cmd {
            Command::RouteFromList { id, names, lengths, years } => {
                assert_eq!(id, 1);
                assert_eq!(names, vec![b"A".to_vec(), b"B".to_vec()]);
                assert_eq!(lengths, vec![10]);
                assert_eq!(years, vec![2000]);
            }
            _ => panic!("expected RouteFromList"),
        }
    }

    #[test]
    fn unrecognised_shape_is_none() {
        assert!(parse(b"notACommand;1;2").is_none());
        assert!(parse(b"1;A").is_none());
    }
}
