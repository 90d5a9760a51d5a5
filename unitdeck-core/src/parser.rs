//! Parser for the service manager's plain unit listing
//!
//! Expects the output of `list-units --all --no-legend --plain`: one unit per
//! line, whitespace separated as `UNIT LOAD ACTIVE SUB DESCRIPTION...`.

use crate::unit::{UnitRecord, UnitStatus};

/// Minimum number of whitespace separated fields in a well-formed row
pub const MIN_FIELDS: usize = 5;

/// Marker the service manager prints in front of failed units when `--plain`
/// is not passed.
const FAILED_MARKER: &str = "●";

/// Parse a unit listing into records, preserving input order.
///
/// Blank lines are skipped. Lines with fewer than five fields still produce a
/// partial record so malformed input stays visible.
pub fn parse_unit_listing(raw: &str) -> Vec<UnitRecord> {
    raw.lines().filter_map(parse_unit_line).collect()
}

/// Parse a single listing row. Returns `None` only for blank lines.
pub fn parse_unit_line(line: &str) -> Option<UnitRecord> {
    let mut fields: Vec<&str> = line.split_whitespace().collect();
    // A bare marker stays as the record name so the line is not lost
    if fields.len() > 1 && fields[0] == FAILED_MARKER {
        fields.remove(0);
    }

    let (name, rest) = fields.split_first()?;

    if fields.len() >= MIN_FIELDS {
        Some(UnitRecord::parsed(
            *name,
            UnitStatus {
                load: rest[0].to_string(),
                active: rest[1].to_string(),
                sub: rest[2].to_string(),
                description: rest[3..].join(" "),
            },
        ))
    } else {
        Some(UnitRecord::partial(
            *name,
            rest.iter().map(|s| s.to_string()).collect(),
        ))
    }
}
