//! Unit type facets for the filter picker

use std::collections::BTreeSet;
use std::fmt;

use crate::unit::UnitRecord;

/// Label of the synthetic facet that matches every record
pub const ALL_FACET: &str = "All";

/// One entry of the filter picker.
///
/// The synthetic facet is its own variant, so a unit type that happens to be
/// spelled "All" still gets a facet of its own.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Facet {
    #[default]
    All,
    /// Records whose unit type equals this name
    Type(String),
}

impl Facet {
    pub fn of(unit_type: impl Into<String>) -> Self {
        Facet::Type(unit_type.into())
    }

    pub fn label(&self) -> &str {
        match self {
            Facet::All => ALL_FACET,
            Facet::Type(t) => t,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Facet::All)
    }

    /// Whether `record` is visible under this facet
    pub fn matches(&self, record: &UnitRecord) -> bool {
        match self {
            Facet::All => true,
            Facet::Type(t) => record.unit_type == *t,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Distinct unit types in `records`, sorted ordinally, with [`Facet::All`]
/// pinned first.
pub fn build_facets(records: &[UnitRecord]) -> Vec<Facet> {
    let types: BTreeSet<&str> = records
        .iter()
        .map(|r| r.unit_type.as_str())
        .filter(|t| !t.is_empty())
        .collect();

    let mut facets = Vec::with_capacity(types.len() + 1);
    facets.push(Facet::All);
    facets.extend(types.into_iter().map(Facet::of));
    facets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_unit_listing;

    fn sample() -> Vec<UnitRecord> {
        parse_unit_listing(
            "\
ssh.service loaded active running OpenSSH
cron.service loaded active running Cron
dbus.socket loaded active running D-Bus Socket
-.mount loaded active mounted Root Mount
apt-daily.timer loaded active waiting Daily apt
plain loaded active running No suffix
",
        )
    }

    fn labels(facets: &[Facet]) -> Vec<&str> {
        facets.iter().map(Facet::label).collect()
    }

    #[test]
    fn test_facets_pinned_and_sorted() {
        let facets = build_facets(&sample());
        assert_eq!(facets[0], Facet::All);
        assert_eq!(
            labels(&facets),
            vec!["All", "mount", "service", "socket", "timer", "unknown"]
        );
    }

    #[test]
    fn test_facets_have_no_duplicates() {
        let facets = build_facets(&sample());
        let unique: BTreeSet<&str> = facets.iter().map(Facet::label).collect();
        assert_eq!(unique.len(), facets.len());
    }

    #[test]
    fn test_facets_empty_catalog() {
        assert_eq!(build_facets(&[]), vec![Facet::All]);
    }

    #[test]
    fn test_facets_ordinal_comparison() {
        let records = parse_unit_listing(
            "a.service loaded active running A\nb.Zeta loaded active running B\n",
        );
        // Uppercase sorts before lowercase under ordinal comparison
        assert_eq!(labels(&build_facets(&records)), vec!["All", "Zeta", "service"]);
    }

    #[test]
    fn test_unit_type_named_all_keeps_its_facet() {
        let records = parse_unit_listing(
            "x.All loaded active running X\na.service loaded active running A\n",
        );
        let facets = build_facets(&records);
        assert_eq!(facets, vec![Facet::All, Facet::of("All"), Facet::of("service")]);

        let only: Vec<_> = records
            .iter()
            .filter(|r| facets[1].matches(r))
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(only, vec!["x.All"]);
        assert!(records.iter().all(|r| facets[0].matches(r)));
    }

    #[test]
    fn test_matches_facet() {
        let records = sample();
        assert!(records.iter().all(|r| Facet::All.matches(r)));
        let services: Vec<_> = records
            .iter()
            .filter(|r| Facet::of("service").matches(r))
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(services, vec!["ssh.service", "cron.service"]);
    }
}
