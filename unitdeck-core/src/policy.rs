//! Command policy: which commands take a unit, and how the argument list is
//! assembled.
//!
//! This is the only place that decides whether a command needs a unit. The
//! preview path, the validation path and the executor all go through
//! [`build_invocation`].

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Commands that list things and never take a unit argument
pub const LISTING_COMMANDS: &[&str] = &[
    "list-units",
    "list-timers",
    "list-sockets",
    "list-jobs",
    "list-dependencies",
    "list-unit-files",
];

/// Commands that accept a unit but fall back to system-wide output without one
pub const OPTIONAL_UNIT_COMMANDS: &[&str] = &["status", "is-active", "is-enabled", "is-failed"];

/// How a command treats the unit argument
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitRequirement {
    /// The unit is dropped even when one is selected
    Ignored,
    /// The unit is appended when present
    Optional,
    /// The command fails without a unit
    Required,
}

impl UnitRequirement {
    pub fn label(&self) -> &'static str {
        match self {
            UnitRequirement::Ignored => "no unit",
            UnitRequirement::Optional => "unit optional",
            UnitRequirement::Required => "unit required",
        }
    }
}

/// Classify a command name. Anything not in the listing or optional sets
/// requires a unit.
pub fn unit_requirement(command: &str) -> UnitRequirement {
    if LISTING_COMMANDS.contains(&command) {
        UnitRequirement::Ignored
    } else if OPTIONAL_UNIT_COMMANDS.contains(&command) {
        UnitRequirement::Optional
    } else {
        UnitRequirement::Required
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("no command specified")]
    MissingCommand,
    #[error("command '{command}' requires a unit")]
    UnitRequired { command: String },
}

impl PolicyError {
    /// Text shown to the user when the policy rejects a selection
    pub fn guidance(&self) -> String {
        match self {
            PolicyError::MissingCommand => "Select a command to preview or execute.".to_string(),
            PolicyError::UnitRequired { command } => format!(
                "Command '{}' requires a unit. Please select a unit first in the Units tab.",
                command
            ),
        }
    }
}

/// Validated argument list for one invocation of the service manager.
///
/// Holds `[command]` or `[command, unit]` for policy-built invocations. Global
/// flags such as `--version` are carried as a single token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArgumentList(Vec<String>);

impl ArgumentList {
    /// A bare global flag, e.g. `--help`. Bypasses the unit policy.
    pub fn flag(flag: impl Into<String>) -> Self {
        Self(vec![flag.into()])
    }

    pub fn command(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or_default()
    }

    pub fn unit(&self) -> Option<&str> {
        self.0.get(1).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for ArgumentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

/// Build the argument list for `command` with an optional `unit`.
///
/// An empty `unit` counts as absent.
pub fn build_invocation(command: &str, unit: Option<&str>) -> Result<ArgumentList, PolicyError> {
    if command.is_empty() {
        return Err(PolicyError::MissingCommand);
    }

    let unit = unit.filter(|u| !u.is_empty());
    let mut args = vec![command.to_string()];

    match (unit_requirement(command), unit) {
        (UnitRequirement::Ignored, _) => {}
        (UnitRequirement::Optional, Some(unit)) | (UnitRequirement::Required, Some(unit)) => {
            args.push(unit.to_string());
        }
        (UnitRequirement::Optional, None) => {}
        (UnitRequirement::Required, None) => {
            return Err(PolicyError::UnitRequired {
                command: command.to_string(),
            });
        }
    }

    Ok(ArgumentList(args))
}
