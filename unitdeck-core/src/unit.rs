//! Unit records for unitdeck
//!
//! A UnitRecord is one row of the service manager's unit listing. Records are
//! built in bulk by the parser and never mutated afterwards; a refresh replaces
//! the whole catalog.

use serde::Serialize;

/// Unique name of a unit within one fetch (e.g., "nginx.service")
pub type UnitName = String;

/// Facet used when a unit name carries no usable suffix
pub const UNKNOWN_UNIT_TYPE: &str = "unknown";

/// Type assigned to the synthetic record that stands in for a failed fetch
pub const ERROR_UNIT_TYPE: &str = "error";

/// Description shown for listing lines that had too few fields
pub const PARTIAL_DESCRIPTION: &str = "Error parsing unit data";

/// Status columns reported by the service manager
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnitStatus {
    pub load: String,
    pub active: String,
    pub sub: String,
    pub description: String,
}

/// How much of a listing row could be recovered
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitDetail {
    /// All status columns were present
    Parsed(UnitStatus),
    /// The line had fewer than five fields; only the name is reliable
    Partial { fields: Vec<String> },
    /// Stand-in for a listing call that failed as a whole
    FetchFailed { message: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UnitRecord {
    pub name: UnitName,
    pub unit_type: String,
    pub detail: UnitDetail,
}

impl UnitRecord {
    pub fn parsed(name: impl Into<String>, status: UnitStatus) -> Self {
        let name = name.into();
        Self {
            unit_type: unit_type_of(&name).to_string(),
            name,
            detail: UnitDetail::Parsed(status),
        }
    }

    pub fn partial(name: impl Into<String>, fields: Vec<String>) -> Self {
        let name = name.into();
        Self {
            unit_type: unit_type_of(&name).to_string(),
            name,
            detail: UnitDetail::Partial { fields },
        }
    }

    /// The single record shown in place of the catalog when listing failed.
    pub fn fetch_error(message: impl std::fmt::Display) -> Self {
        Self {
            name: "Error".to_string(),
            unit_type: ERROR_UNIT_TYPE.to_string(),
            detail: UnitDetail::FetchFailed {
                message: format!("Failed to fetch units: {}", message),
            },
        }
    }

    pub fn load(&self) -> &str {
        match &self.detail {
            UnitDetail::Parsed(s) => &s.load,
            UnitDetail::Partial { .. } => "",
            UnitDetail::FetchFailed { .. } => ERROR_UNIT_TYPE,
        }
    }

    pub fn active(&self) -> &str {
        match &self.detail {
            UnitDetail::Parsed(s) => &s.active,
            UnitDetail::Partial { .. } => "",
            UnitDetail::FetchFailed { .. } => ERROR_UNIT_TYPE,
        }
    }

    pub fn sub(&self) -> &str {
        match &self.detail {
            UnitDetail::Parsed(s) => &s.sub,
            UnitDetail::Partial { .. } => "",
            UnitDetail::FetchFailed { .. } => ERROR_UNIT_TYPE,
        }
    }

    pub fn description(&self) -> &str {
        match &self.detail {
            UnitDetail::Parsed(s) => &s.description,
            UnitDetail::Partial { .. } => PARTIAL_DESCRIPTION,
            UnitDetail::FetchFailed { message } => message,
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self.detail, UnitDetail::Partial { .. })
    }

    /// True for the synthetic record standing in for a failed fetch.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self.detail, UnitDetail::FetchFailed { .. })
    }

    /// One-line summary used by list rows: `[load/active/sub] description`
    pub fn summary(&self) -> String {
        format!(
            "[{}/{}/{}] {}",
            self.load(),
            self.active(),
            self.sub(),
            self.description()
        )
    }
}

/// Derive the unit type from the suffix after the last `.` of a unit name.
///
/// Names without a dot, or ending in one, have type "unknown".
pub fn unit_type_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[idx + 1..],
        _ => UNKNOWN_UNIT_TYPE,
    }
}
