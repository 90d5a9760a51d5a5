use crate::catalog::UnitCatalog;
use crate::command::{COMMANDS, CommandEntry, OPTIONS, OptionEntry};
use crate::facets::Facet;
use crate::policy::ArgumentList;
use crate::unit::UnitRecord;

/// Rows taken by the tab header and footer around a list
const LIST_OVERHEAD_ROWS: u16 = 4;

/// Page size used before the first resize arrives
const DEFAULT_PAGE: usize = 10;

/// Interaction phase. Gates which inputs are legal and how they are read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Browse,
    Preview,
    Output,
    Filtering,
}

impl SessionPhase {
    pub fn label(&self) -> &'static str {
        match self {
            SessionPhase::Browse => "browse",
            SessionPhase::Preview => "preview",
            SessionPhase::Output => "output",
            SessionPhase::Filtering => "filter",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Options,
    Commands,
    Units,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Options, Tab::Commands, Tab::Units];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Options => "Global Options",
            Tab::Commands => "Commands",
            Tab::Units => "Units",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Options => 0,
            Tab::Commands => 1,
            Tab::Units => 2,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Options => Tab::Commands,
            Tab::Commands => Tab::Units,
            Tab::Units => Tab::Options,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::Options => Tab::Units,
            Tab::Commands => Tab::Options,
            Tab::Units => Tab::Commands,
        }
    }
}

/// What produced the text currently shown in the output view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputKind {
    /// Informational text (option info, unit selected)
    Info,
    /// The selection was rejected; tells the user what to do next
    Guidance,
    /// Placeholder while the external command runs
    Running,
    /// Result of a finished command
    Completed { success: bool },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOutput {
    pub text: String,
    pub kind: OutputKind,
}

impl SessionOutput {
    pub fn new(kind: OutputKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Cursor state of one interactive session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSelection {
    pub active_tab: Tab,
    /// Per-tab cursor. The Units cursor indexes the filtered view.
    pub cursors: [usize; 3],
    pub selected_command: Option<String>,
    /// Sticky across tab switches and command changes
    pub selected_unit: Option<String>,
    pub current_unit_filter: Facet,
    pub preview_invocation: Option<ArgumentList>,
    pub last_output: Option<SessionOutput>,
}

impl Default for SessionSelection {
    fn default() -> Self {
        Self {
            active_tab: Tab::Options,
            cursors: [0; 3],
            selected_command: None,
            selected_unit: None,
            current_unit_filter: Facet::All,
            preview_invocation: None,
            last_output: None,
        }
    }
}

impl SessionSelection {
    pub fn cursor(&self, tab: Tab) -> usize {
        self.cursors[tab.index()]
    }

    /// Drop the transient command context. The selected unit survives.
    pub(crate) fn clear_command(&mut self) {
        self.selected_command = None;
        self.preview_invocation = None;
    }
}

/// Everything the session state machine owns
#[derive(Clone, Debug)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub selection: SessionSelection,
    pub catalog: UnitCatalog,
    /// Cursor into the facet list while filtering
    pub facet_cursor: usize,
    pub help_open: bool,
    /// Invocation handed to the executor and not yet completed
    pub pending: Option<ArgumentList>,
    /// A unit listing fetch was requested and its result has not arrived
    pub fetching: bool,
    /// Terminal size as (width, height)
    pub viewport: (u16, u16),
    /// Executable every invocation runs, e.g. "systemctl"
    pub tool: String,
}

impl SessionState {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            phase: SessionPhase::Browse,
            selection: SessionSelection::default(),
            catalog: UnitCatalog::default(),
            facet_cursor: 0,
            help_open: false,
            pending: None,
            fetching: false,
            viewport: (0, 0),
            tool: tool.into(),
        }
    }

    pub fn with_catalog(mut self, catalog: UnitCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn active_tab(&self) -> Tab {
        self.selection.active_tab
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Units visible under the current filter
    pub fn visible_units(&self) -> Vec<&UnitRecord> {
        self.catalog.filtered(&self.selection.current_unit_filter)
    }

    pub fn item_count(&self, tab: Tab) -> usize {
        match tab {
            Tab::Options => OPTIONS.len(),
            Tab::Commands => COMMANDS.len(),
            Tab::Units => self.visible_units().len(),
        }
    }

    pub fn highlighted_option(&self) -> Option<&'static OptionEntry> {
        OPTIONS.get(self.selection.cursor(Tab::Options))
    }

    pub fn highlighted_command(&self) -> Option<&'static CommandEntry> {
        COMMANDS.get(self.selection.cursor(Tab::Commands))
    }

    pub fn highlighted_unit(&self) -> Option<&UnitRecord> {
        self.visible_units()
            .get(self.selection.cursor(Tab::Units))
            .copied()
    }

    pub fn highlighted_facet(&self) -> Option<&Facet> {
        self.catalog.facets().get(self.facet_cursor)
    }

    /// Full command line for display, e.g. "systemctl restart nginx.service"
    pub fn command_line(&self, args: &ArgumentList) -> String {
        format!("{} {}", self.tool, args)
    }

    /// The previewed invocation with the tool prefixed, if any
    pub fn preview_text(&self) -> Option<String> {
        self.selection
            .preview_invocation
            .as_ref()
            .map(|args| self.command_line(args))
    }

    pub(crate) fn page_size(&self) -> usize {
        match self.viewport.1 {
            0 => DEFAULT_PAGE,
            h => usize::from(h.saturating_sub(LIST_OVERHEAD_ROWS)).max(1),
        }
    }

    /// Keep every cursor inside its list after the lists changed size.
    pub(crate) fn clamp_cursors(&mut self) {
        for tab in Tab::ALL {
            let len = self.item_count(tab);
            let cursor = &mut self.selection.cursors[tab.index()];
            *cursor = (*cursor).min(len.saturating_sub(1));
        }
        let facets = self.catalog.facets().len();
        self.facet_cursor = self.facet_cursor.min(facets.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_unit_listing;

    #[test]
    fn test_tab_wraps() {
        assert_eq!(Tab::Units.next(), Tab::Options);
        assert_eq!(Tab::Options.prev(), Tab::Units);
        for tab in Tab::ALL {
            assert_eq!(tab.next().prev(), tab);
        }
    }

    #[test]
    fn test_initial_state() {
        let state = SessionState::new("systemctl");
        assert_eq!(state.phase, SessionPhase::Browse);
        assert_eq!(state.selection.current_unit_filter, Facet::All);
        assert!(state.selection.selected_unit.is_none());
        assert!(state.selection.preview_invocation.is_none());
        assert!(!state.is_running());
    }

    #[test]
    fn test_clamp_cursors() {
        let mut state = SessionState::new("systemctl").with_catalog(UnitCatalog::new(
            parse_unit_listing("a.service loaded active running A\nb.service loaded active running B\n"),
        ));
        state.selection.cursors = [99, 99, 99];
        state.facet_cursor = 42;
        state.clamp_cursors();
        assert_eq!(state.selection.cursor(Tab::Options), OPTIONS.len() - 1);
        assert_eq!(state.selection.cursor(Tab::Commands), COMMANDS.len() - 1);
        assert_eq!(state.selection.cursor(Tab::Units), 1);
        assert_eq!(state.facet_cursor, 1);
    }

    #[test]
    fn test_page_size() {
        let mut state = SessionState::new("systemctl");
        assert_eq!(state.page_size(), DEFAULT_PAGE);
        state.viewport = (80, 24);
        assert_eq!(state.page_size(), 20);
        state.viewport = (80, 2);
        assert_eq!(state.page_size(), 1);
    }
}
