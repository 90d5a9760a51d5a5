//! Session state machine
//!
//! Every input and background result goes through [`reduce`], which mutates
//! the session and returns at most one side effect for the caller to perform.
//! [`transition`] is the same thing as a value-in, value-out function.

use crate::catalog::UnitCatalog;
use crate::command::OptionAction;
use crate::completion::{CompletionEvent, ExternalToolError};
use crate::facets::Facet;
use crate::policy::{ArgumentList, build_invocation};
use crate::state::{OutputKind, SessionOutput, SessionPhase, SessionState, Tab};
use crate::unit::UnitRecord;

/// Abstract input alphabet. Mapping physical keys onto it is up to the
/// presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    TabNext,
    TabPrev,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Home,
    End,
    Select,
    OpenFilter,
    Confirm,
    Cancel,
    Refresh,
    Help,
    Quit,
    Resize { width: u16, height: u16 },
    /// Any key without a dedicated meaning
    Other,
}

#[derive(Clone, Debug)]
pub enum SessionEvent {
    Input(Input),
    /// The single result of an executor call
    Completed(CompletionEvent),
    /// Result of a unit listing fetch
    CatalogLoaded(Result<Vec<UnitRecord>, ExternalToolError>),
}

impl From<Input> for SessionEvent {
    fn from(input: Input) -> Self {
        SessionEvent::Input(input)
    }
}

/// Side effect requested by a transition
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Run the tool once with these arguments and report back a completion
    Run(ArgumentList),
    /// Fetch and parse the unit listing again
    FetchUnits,
    Quit,
}

/// Pure form of [`reduce`]: consume a state and return the next one.
pub fn transition(mut state: SessionState, event: SessionEvent) -> (SessionState, Option<Effect>) {
    let effect = reduce(&mut state, event);
    (state, effect)
}

pub fn reduce(state: &mut SessionState, event: SessionEvent) -> Option<Effect> {
    match event {
        SessionEvent::Completed(done) => {
            // Applied whatever the phase; there is never more than one pending run.
            state.pending = None;
            state.selection.last_output = Some(SessionOutput::new(
                OutputKind::Completed {
                    success: done.is_success(),
                },
                done.display_text(),
            ));
            None
        }
        SessionEvent::CatalogLoaded(result) => {
            state.fetching = false;
            state.catalog = match result {
                Ok(records) => UnitCatalog::new(records),
                Err(err) => UnitCatalog::from_fetch_error(err),
            };
            if !state.catalog.has_facet(&state.selection.current_unit_filter) {
                state.selection.current_unit_filter = Facet::All;
                state.selection.cursors[Tab::Units.index()] = 0;
            }
            state.clamp_cursors();
            None
        }
        SessionEvent::Input(Input::Resize { width, height }) => {
            state.viewport = (width, height);
            None
        }
        SessionEvent::Input(input) => {
            if state.help_open {
                state.help_open = false;
                return None;
            }
            match state.phase {
                SessionPhase::Browse => reduce_browse(state, input),
                SessionPhase::Filtering => {
                    reduce_filtering(state, input);
                    None
                }
                SessionPhase::Preview => reduce_preview(state, input),
                SessionPhase::Output => {
                    state.selection.clear_command();
                    state.selection.last_output = None;
                    state.phase = SessionPhase::Browse;
                    None
                }
            }
        }
    }
}

fn reduce_browse(state: &mut SessionState, input: Input) -> Option<Effect> {
    match input {
        Input::TabNext => {
            state.selection.active_tab = state.selection.active_tab.next();
            None
        }
        Input::TabPrev => {
            state.selection.active_tab = state.selection.active_tab.prev();
            None
        }
        Input::MoveUp | Input::MoveDown | Input::PageUp | Input::PageDown | Input::Home | Input::End => {
            let tab = state.active_tab();
            let len = state.item_count(tab);
            let page = state.page_size();
            let cursor = &mut state.selection.cursors[tab.index()];
            *cursor = move_cursor(*cursor, len, page, input);
            None
        }
        Input::Select => match state.active_tab() {
            Tab::Options => select_option(state),
            Tab::Commands => {
                select_command(state);
                None
            }
            Tab::Units => {
                select_unit(state);
                None
            }
        },
        Input::OpenFilter => {
            state.facet_cursor = state
                .catalog
                .facets()
                .iter()
                .position(|f| *f == state.selection.current_unit_filter)
                .unwrap_or(0);
            state.phase = SessionPhase::Filtering;
            None
        }
        Input::Refresh => request_refresh(state),
        Input::Help => {
            state.help_open = true;
            None
        }
        Input::Quit => Some(Effect::Quit),
        Input::Confirm | Input::Cancel | Input::Other | Input::Resize { .. } => None,
    }
}

fn select_option(state: &mut SessionState) -> Option<Effect> {
    let Some(option) = state.highlighted_option() else {
        show(state, OutputKind::Guidance, "Select an option to see info or execute.");
        return None;
    };

    match option.action {
        OptionAction::Run(flag) => {
            if let Some(busy) = busy_notice(state) {
                show(state, OutputKind::Guidance, busy);
                return None;
            }
            let args = ArgumentList::flag(flag);
            state.selection.selected_command = Some(flag.to_string());
            state.selection.preview_invocation = Some(args.clone());
            start_run(state, args)
        }
        OptionAction::Info => {
            show(state, OutputKind::Info, option.info_text());
            None
        }
    }
}

fn select_command(state: &mut SessionState) {
    let Some(entry) = state.highlighted_command() else {
        show(state, OutputKind::Guidance, "Select a command to preview or execute.");
        return;
    };

    state.selection.selected_command = Some(entry.name.to_string());
    match build_invocation(entry.name, state.selection.selected_unit.as_deref()) {
        Ok(args) => {
            state.selection.preview_invocation = Some(args);
            state.phase = SessionPhase::Preview;
        }
        Err(err) => show(state, OutputKind::Guidance, err.guidance()),
    }
}

fn select_unit(state: &mut SessionState) {
    let Some(record) = state.highlighted_unit() else {
        show(state, OutputKind::Guidance, "Select a unit using Enter.");
        return;
    };

    if record.is_fetch_error() {
        let text = record.description().to_string();
        show(state, OutputKind::Guidance, text);
        return;
    }

    let name = record.name.clone();
    let text = format!("Unit '{}' selected.", name);
    state.selection.selected_unit = Some(name);
    show(state, OutputKind::Info, text);
}

fn reduce_filtering(state: &mut SessionState, input: Input) {
    match input {
        Input::MoveUp | Input::MoveDown | Input::PageUp | Input::PageDown | Input::Home | Input::End => {
            let len = state.catalog.facets().len();
            let page = state.page_size();
            state.facet_cursor = move_cursor(state.facet_cursor, len, page, input);
        }
        Input::Select | Input::Confirm => {
            if let Some(facet) = state.highlighted_facet().cloned() {
                if facet != state.selection.current_unit_filter {
                    state.selection.cursors[Tab::Units.index()] = 0;
                }
                state.selection.current_unit_filter = facet;
            }
            state.phase = SessionPhase::Browse;
        }
        Input::Cancel => state.phase = SessionPhase::Browse,
        _ => {}
    }
}

fn reduce_preview(state: &mut SessionState, input: Input) -> Option<Effect> {
    match input {
        Input::Confirm => {
            if let Some(busy) = busy_notice(state) {
                show(state, OutputKind::Guidance, busy);
                return None;
            }
            match state.selection.preview_invocation.clone() {
                Some(args) => start_run(state, args),
                None => {
                    show(state, OutputKind::Guidance, "Error: Cannot execute empty command.");
                    None
                }
            }
        }
        Input::Cancel => {
            state.selection.clear_command();
            state.phase = SessionPhase::Browse;
            None
        }
        _ => None,
    }
}

/// Ask for a new unit listing unless one is already on its way.
///
/// Keeps a single fetch in flight so an older listing can never replace a
/// newer one.
pub fn request_refresh(state: &mut SessionState) -> Option<Effect> {
    if state.fetching {
        return None;
    }
    state.fetching = true;
    Some(Effect::FetchUnits)
}

fn start_run(state: &mut SessionState, args: ArgumentList) -> Option<Effect> {
    let placeholder = format!("Running '{}'...", state.command_line(&args));
    state.pending = Some(args.clone());
    show(state, OutputKind::Running, placeholder);
    Some(Effect::Run(args))
}

fn busy_notice(state: &SessionState) -> Option<String> {
    state.pending.as_ref().map(|running| {
        format!(
            "'{}' is still running. Wait for it to finish before running another command.",
            state.command_line(running)
        )
    })
}

fn show(state: &mut SessionState, kind: OutputKind, text: impl Into<String>) {
    state.selection.last_output = Some(SessionOutput::new(kind, text));
    state.phase = SessionPhase::Output;
}

fn move_cursor(cursor: usize, len: usize, page: usize, input: Input) -> usize {
    if len == 0 {
        return 0;
    }
    let last = len - 1;
    match input {
        Input::MoveUp => cursor.saturating_sub(1),
        Input::MoveDown => (cursor + 1).min(last),
        Input::PageUp => cursor.saturating_sub(page),
        Input::PageDown => (cursor + page).min(last),
        Input::Home => 0,
        Input::End => last,
        _ => cursor,
    }
}
