use std::sync::Arc;

use crate::facets::{Facet, build_facets};
use crate::unit::UnitRecord;

/// Read-only snapshot of the fetched units and the facets derived from them.
///
/// Cloning shares the underlying slices. A refresh builds a new catalog; a
/// published one is never mutated.
#[derive(Clone, Debug)]
pub struct UnitCatalog {
    records: Arc<[UnitRecord]>,
    facets: Arc<[Facet]>,
}

impl UnitCatalog {
    pub fn new(records: Vec<UnitRecord>) -> Self {
        let facets = build_facets(&records);
        Self {
            records: records.into(),
            facets: facets.into(),
        }
    }

    /// Catalog holding only the synthetic error record for a failed fetch.
    pub fn from_fetch_error(message: impl std::fmt::Display) -> Self {
        Self::new(vec![UnitRecord::fetch_error(message)])
    }

    pub fn records(&self) -> &[UnitRecord] {
        &self.records
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_facet(&self, facet: &Facet) -> bool {
        facet.is_all() || self.facets.contains(facet)
    }

    /// Records visible under `facet`, in catalog order
    pub fn filtered(&self, facet: &Facet) -> Vec<&UnitRecord> {
        self.records
            .iter()
            .filter(|r| facet.matches(r))
            .collect()
    }
}

impl Default for UnitCatalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_unit_listing;

    #[test]
    fn test_clone_shares_records() {
        let catalog = UnitCatalog::new(parse_unit_listing("a.service loaded active running A\n"));
        let copy = catalog.clone();
        assert!(std::ptr::eq(catalog.records(), copy.records()));
    }

    #[test]
    fn test_filtered_view() {
        let catalog = UnitCatalog::new(parse_unit_listing(
            "a.service loaded active running A\nb.socket loaded active listening B\n",
        ));
        assert_eq!(catalog.filtered(&Facet::All).len(), 2);
        assert_eq!(catalog.filtered(&Facet::of("socket"))[0].name, "b.socket");
        assert!(catalog.filtered(&Facet::of("timer")).is_empty());
        assert!(catalog.has_facet(&Facet::of("socket")));
        assert!(!catalog.has_facet(&Facet::of("timer")));
    }

    #[test]
    fn test_fetch_error_catalog() {
        let catalog = UnitCatalog::from_fetch_error("boom");
        assert_eq!(catalog.len(), 1);
        assert!(catalog.records()[0].is_fetch_error());
        assert_eq!(catalog.facets(), &[Facet::All, Facet::of("error")]);
    }
}
