use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use unitdeck_core::command::{COMMANDS, OPTIONS};
use unitdeck_core::state::{OutputKind, SessionPhase, SessionState, Tab};

use super::theme::styles;

/// Draw one frame for the current session state
pub fn draw(f: &mut Frame, state: &SessionState) {
    match state.phase {
        SessionPhase::Browse => draw_browse(f, state),
        SessionPhase::Filtering => {
            draw_browse(f, state);
            draw_filter_picker(f, state);
        }
        SessionPhase::Preview => draw_preview(f, state),
        SessionPhase::Output => draw_output(f, state),
    }

    if state.help_open {
        draw_help(f);
    }
}

fn draw_browse(f: &mut Frame, state: &SessionState) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    let tabs = Tabs::new(Tab::ALL.iter().map(|t| Line::from(t.title())))
        .select(state.active_tab().index())
        .style(styles::tab(false))
        .highlight_style(styles::tab(true))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styles::border_subtle())
                .title(Span::styled(" unitdeck ", styles::accent_bold())),
        );
    f.render_widget(tabs, header);

    let tab = state.active_tab();
    let items = list_items(state, tab);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_focused())
        .title(list_title(state, tab));

    if items.is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(Span::styled("No units found", styles::text_dim())),
            Line::from(Span::styled(
                "Press r to refresh or f to change the filter.",
                styles::text_muted(),
            )),
        ])
        .block(block);
        f.render_widget(hint, body);
    } else {
        let list = List::new(items)
            .block(block)
            .highlight_style(styles::selection())
            .highlight_symbol("▶ ");
        let mut list_state = ListState::default().with_selected(Some(state.selection.cursor(tab)));
        f.render_stateful_widget(list, body, &mut list_state);
    }

    f.render_widget(Paragraph::new(footer_line(state)), footer);
}

fn list_title(state: &SessionState, tab: Tab) -> String {
    match tab {
        Tab::Units => format!(
            " Units [{}] {}/{} ",
            state.selection.current_unit_filter,
            state.item_count(Tab::Units),
            state.catalog.len()
        ),
        _ => format!(" {} ", tab.title()),
    }
}

fn list_items(state: &SessionState, tab: Tab) -> Vec<ListItem<'static>> {
    match tab {
        Tab::Options => OPTIONS
            .iter()
            .map(|o| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<12} ", o.title), styles::text()),
                    Span::styled(o.description, styles::text_dim()),
                ]))
            })
            .collect(),
        Tab::Commands => COMMANDS
            .iter()
            .map(|c| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<18} ", c.name), styles::text()),
                    Span::styled(format!("{:<14} ", c.requirement().label()), styles::text_muted()),
                    Span::styled(c.description, styles::text_dim()),
                ]))
            })
            .collect(),
        Tab::Units => state
            .visible_units()
            .into_iter()
            .map(|u| {
                let active = u.active().to_string();
                let name_style = if u.is_fetch_error() {
                    styles::error()
                } else {
                    styles::text()
                };
                let marker = if state.selection.selected_unit.as_deref() == Some(u.name.as_str()) {
                    "* "
                } else {
                    "  "
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, styles::accent_bold()),
                    Span::styled(
                        format!("{} ", styles::active_state_icon(&active)),
                        styles::active_state(&active),
                    ),
                    Span::styled(format!("{} ", u.name), name_style),
                    Span::styled(u.summary(), styles::text_dim()),
                ]))
            })
            .collect(),
    }
}

fn footer_line(state: &SessionState) -> Line<'static> {
    let mut spans = vec![
        Span::styled("Tab", styles::key_hint()),
        Span::styled(" switch  ", styles::text_muted()),
        Span::styled("↑/↓", styles::key_hint()),
        Span::styled(" move  ", styles::text_muted()),
    ];

    let enter_hint = match state.active_tab() {
        Tab::Options => " info/run  ",
        Tab::Commands => " preview  ",
        Tab::Units => " select unit  ",
    };
    spans.push(Span::styled("Enter", styles::key_hint()));
    spans.push(Span::styled(enter_hint, styles::text_muted()));

    for (key, label) in [("f", " filter  "), ("r", " refresh  "), ("F1", " help  "), ("q", " quit")] {
        spans.push(Span::styled(key, styles::key_hint()));
        spans.push(Span::styled(label, styles::text_muted()));
    }

    match &state.selection.selected_unit {
        Some(unit) => spans.push(Span::styled(format!(" | Unit: {}", unit), styles::text())),
        None if state.active_tab() == Tab::Commands => spans.push(Span::styled(
            " | No unit selected - some commands need one",
            styles::warn(),
        )),
        None => {}
    }

    if state.fetching {
        spans.push(Span::styled(" | refreshing units", styles::text_muted()));
    }

    if let Some(running) = &state.pending {
        spans.push(Span::styled(
            format!(" | running: {}", state.command_line(running)),
            styles::warn(),
        ));
    }

    Line::from(spans)
}

fn draw_filter_picker(f: &mut Frame, state: &SessionState) {
    let facets = state.catalog.facets();
    let width = facets
        .iter()
        .map(|facet| facet.label().chars().count())
        .max()
        .unwrap_or(0)
        .max(20) as u16
        + 8;
    let area = centered_rect(width, facets.len() as u16 + 2, f.area());

    let items: Vec<ListItem> = facets
        .iter()
        .map(|facet| {
            let mark = if *facet == state.selection.current_unit_filter {
                "✓ "
            } else {
                "  "
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, styles::accent_bold()),
                Span::styled(facet.label().to_string(), styles::text()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(styles::border_focused())
                .title(" Filter by type "),
        )
        .highlight_style(styles::selection());
    let mut list_state = ListState::default().with_selected(Some(state.facet_cursor));

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_preview(f: &mut Frame, state: &SessionState) {
    let command = state.preview_text().unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled("Command Preview:", styles::text())),
        Line::from(Span::styled(command.clone(), styles::accent_bold())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", styles::text_muted()),
            Span::styled("Enter", styles::key_hint()),
            Span::styled(" to Execute, ", styles::text_muted()),
            Span::styled("Esc", styles::key_hint()),
            Span::styled(" to Cancel", styles::text_muted()),
        ]),
    ];

    let width = (command.chars().count().max(38) + 6) as u16;
    let area = centered_rect(width, lines.len() as u16 + 4, f.area());
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(boxed()), area);
}

fn draw_output(f: &mut Frame, state: &SessionState) {
    let screen = f.area();
    let area = centered_rect(
        screen.width.saturating_sub(4),
        screen.height.saturating_sub(2),
        screen,
    );
    f.render_widget(Clear, area);

    let block = boxed();
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [command_area, body, hint] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    if let Some(command) = state.preview_text() {
        f.render_widget(
            Paragraph::new(Span::styled(format!("> {}", command), styles::accent_bold())),
            command_area,
        );
    }

    let (text, style) = match &state.selection.last_output {
        Some(out) => (out.text.as_str(), styles::output(out.kind)),
        None => ("", styles::text()),
    };
    f.render_widget(
        Paragraph::new(Text::raw(text.to_string()))
            .style(style)
            .wrap(Wrap { trim: false }),
        body,
    );

    let running = matches!(
        state.selection.last_output.as_ref().map(|o| o.kind),
        Some(OutputKind::Running)
    );
    let footer = if running {
        "Command is running; output appears when it exits. Press any key to return."
    } else {
        "Press any key to return."
    };
    f.render_widget(
        Paragraph::new(Span::styled(footer, styles::text_muted())),
        hint,
    );
}

fn draw_help(f: &mut Frame) {
    let rows = [
        ("Tab / Shift+Tab", "Switch tabs"),
        ("↑ ↓ PgUp PgDn", "Move the cursor"),
        ("Enter", "Select / preview / run"),
        ("Esc", "Cancel preview or filter"),
        ("f  /", "Filter units by type"),
        ("r", "Reload the unit list"),
        ("F1  ?", "Toggle this help"),
        ("q  Ctrl+C", "Quit"),
    ];
    let mut lines: Vec<Line> = rows
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("  {:<18}", key), styles::key_hint()),
                Span::styled(*what, styles::text()),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press any key to return.",
        styles::text_muted(),
    )));

    let area = centered_rect(52, lines.len() as u16 + 2, f.area());
    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(boxed().title(" Help ")), area);
}

fn boxed() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::border_focused())
}

/// Rect of at most `width` x `height` centered inside `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use unitdeck_core::catalog::UnitCatalog;
    use unitdeck_core::parser::parse_unit_listing;
    use unitdeck_core::reducer::{Input, SessionEvent, reduce};

    fn screen(state: &SessionState) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn session() -> SessionState {
        SessionState::new("systemctl").with_catalog(UnitCatalog::new(parse_unit_listing(
            "nginx.service loaded active running nginx web server\ncups.socket loaded inactive dead CUPS\n",
        )))
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(20, 10, area), Rect::new(40, 15, 20, 10));
        assert_eq!(centered_rect(200, 80, area), area);
    }

    #[test]
    fn test_browse_shows_tabs_and_options() {
        let text = screen(&session());
        assert!(text.contains("Global Options"));
        assert!(text.contains("Commands"));
        assert!(text.contains("--version"));
    }

    #[test]
    fn test_units_tab_lists_units() {
        let mut state = session();
        reduce(&mut state, SessionEvent::Input(Input::TabPrev));
        let text = screen(&state);
        assert!(text.contains("nginx.service"));
        assert!(text.contains("[loaded/inactive/dead] CUPS"));
        assert!(text.contains("Units [All] 2/2"));
    }

    #[test]
    fn test_preview_and_output_views() {
        let mut state = session();
        state.selection.selected_unit = Some("nginx.service".into());
        reduce(&mut state, SessionEvent::Input(Input::TabNext));
        reduce(&mut state, SessionEvent::Input(Input::Select));
        assert_eq!(state.phase, SessionPhase::Preview);
        let text = screen(&state);
        assert!(text.contains("Command Preview:"));
        assert!(text.contains("systemctl status nginx.service"));

        reduce(&mut state, SessionEvent::Input(Input::Confirm));
        let text = screen(&state);
        assert!(text.contains("> systemctl status nginx.service"));
        assert!(text.contains("Running 'systemctl status nginx.service'..."));
    }

    #[test]
    fn test_filter_picker_and_help() {
        let mut state = session();
        reduce(&mut state, SessionEvent::Input(Input::OpenFilter));
        let text = screen(&state);
        assert!(text.contains("Filter by type"));
        assert!(text.contains("socket"));

        reduce(&mut state, SessionEvent::Input(Input::Cancel));
        reduce(&mut state, SessionEvent::Input(Input::Help));
        assert!(screen(&state).contains("Toggle this help"));
    }
}
