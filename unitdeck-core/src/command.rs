//! Static entries for the Global Options and Commands tabs

use crate::policy::{UnitRequirement, unit_requirement};

/// What happens when a global option is selected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionAction {
    /// Run the tool with this single flag and show its output
    Run(&'static str),
    /// Show a short description only
    Info,
}

/// An entry in the Global Options tab
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptionEntry {
    pub title: &'static str,
    pub description: &'static str,
    pub action: OptionAction,
}

impl OptionEntry {
    pub fn info_text(&self) -> String {
        format!(
            "Info for option: {} - {} (Execution not implemented)",
            self.title, self.description
        )
    }
}

pub const OPTIONS: &[OptionEntry] = &[
    OptionEntry {
        title: "-h, --help",
        description: "Show help text",
        action: OptionAction::Run("--help"),
    },
    OptionEntry {
        title: "--version",
        description: "Show version",
        action: OptionAction::Run("--version"),
    },
    OptionEntry {
        title: "--system",
        description: "Connect to the system service manager",
        action: OptionAction::Info,
    },
    OptionEntry {
        title: "--user",
        description: "Connect to the user service manager",
        action: OptionAction::Info,
    },
    OptionEntry {
        title: "--all",
        description: "Show all properties and units, including inactive ones",
        action: OptionAction::Info,
    },
    OptionEntry {
        title: "--no-pager",
        description: "Do not pipe output into a pager",
        action: OptionAction::Info,
    },
];

/// An entry in the Commands tab
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
}

impl CommandEntry {
    pub fn requirement(&self) -> UnitRequirement {
        unit_requirement(self.name)
    }
}

pub const COMMANDS: &[CommandEntry] = &[
    CommandEntry {
        name: "status",
        description: "Show unit status and logs",
    },
    CommandEntry {
        name: "start",
        description: "Start one or more units",
    },
    CommandEntry {
        name: "stop",
        description: "Stop one or more units",
    },
    CommandEntry {
        name: "restart",
        description: "Restart one or more units",
    },
    CommandEntry {
        name: "reload",
        description: "Reload configuration of one or more units",
    },
    CommandEntry {
        name: "enable",
        description: "Enable one or more units",
    },
    CommandEntry {
        name: "disable",
        description: "Disable one or more units",
    },
    CommandEntry {
        name: "mask",
        description: "Mask one or more units",
    },
    CommandEntry {
        name: "unmask",
        description: "Unmask one or more units",
    },
    CommandEntry {
        name: "cat",
        description: "Show files and drop-ins of a unit",
    },
    CommandEntry {
        name: "show",
        description: "Show properties of a unit",
    },
    CommandEntry {
        name: "is-active",
        description: "Check whether units are active",
    },
    CommandEntry {
        name: "is-enabled",
        description: "Check whether unit files are enabled",
    },
    CommandEntry {
        name: "is-failed",
        description: "Check whether units are failed",
    },
    CommandEntry {
        name: "list-units",
        description: "List units currently in memory",
    },
    CommandEntry {
        name: "list-timers",
        description: "List timer units ordered by next elapse",
    },
    CommandEntry {
        name: "list-sockets",
        description: "List socket units ordered by address",
    },
    CommandEntry {
        name: "list-jobs",
        description: "List queued jobs",
    },
    CommandEntry {
        name: "list-unit-files",
        description: "List installed unit files",
    },
    CommandEntry {
        name: "list-dependencies",
        description: "Show the default target dependency tree",
    },
];

pub fn find_command(name: &str) -> Option<&'static CommandEntry> {
    COMMANDS.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runnable_options() {
        let runnable: Vec<_> = OPTIONS
            .iter()
            .filter_map(|o| match o.action {
                OptionAction::Run(flag) => Some(flag),
                OptionAction::Info => None,
            })
            .collect();
        assert_eq!(runnable, vec!["--help", "--version"]);
    }

    #[test]
    fn test_option_info_text() {
        let opt = OPTIONS.iter().find(|o| o.title == "--user").unwrap();
        assert_eq!(
            opt.info_text(),
            "Info for option: --user - Connect to the user service manager (Execution not implemented)"
        );
    }

    #[test]
    fn test_command_requirements() {
        assert_eq!(
            find_command("restart").unwrap().requirement(),
            UnitRequirement::Required
        );
        assert_eq!(
            find_command("status").unwrap().requirement(),
            UnitRequirement::Optional
        );
        assert_eq!(
            find_command("list-timers").unwrap().requirement(),
            UnitRequirement::Ignored
        );
        assert!(find_command("frobnicate").is_none());
    }

    #[test]
    fn test_command_names_unique() {
        let mut names: Vec<_> = COMMANDS.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), COMMANDS.len());
    }
}
