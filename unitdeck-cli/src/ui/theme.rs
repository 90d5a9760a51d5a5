//! Color palettes and the style lookups the renderer uses

use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};

use unitdeck_core::config::ThemeName;
use unitdeck_core::state::OutputKind;

#[derive(Clone, Debug)]
pub struct Palette {
    pub frame: Color,
    pub focus: Color,
    pub fg: Color,
    pub fg_dim: Color,
    pub fg_faint: Color,
    pub ok: Color,
    pub busy: Color,
    pub bad: Color,
    pub note: Color,
    pub cursor_bg: Color,
    pub hint: Color,
}

impl Palette {
    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self {
                frame: Color::Rgb(60, 60, 60),
                focus: Color::Rgb(90, 86, 224),
                fg: Color::Rgb(212, 212, 212),
                fg_dim: Color::Rgb(150, 150, 150),
                fg_faint: Color::Rgb(100, 100, 100),
                ok: Color::Rgb(78, 201, 176),
                busy: Color::Rgb(220, 180, 100),
                bad: Color::Rgb(244, 135, 113),
                note: Color::Rgb(156, 220, 254),
                cursor_bg: Color::Rgb(38, 79, 120),
                hint: Color::Rgb(206, 145, 120),
            },
            ThemeName::HighContrast => Self {
                frame: Color::White,
                focus: Color::Cyan,
                fg: Color::White,
                fg_dim: Color::Gray,
                fg_faint: Color::DarkGray,
                ok: Color::Green,
                busy: Color::Yellow,
                bad: Color::Red,
                note: Color::Cyan,
                cursor_bg: Color::Blue,
                hint: Color::Yellow,
            },
        }
    }
}

/// Visual roles used across the screens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Text,
    Dim,
    Faint,
    Accent,
    Hint,
    Warn,
    Error,
    Frame,
    FocusFrame,
    Cursor,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub palette: Palette,
}

impl Theme {
    pub fn new(name: ThemeName) -> Self {
        Self {
            palette: Palette::named(name),
        }
    }

    pub fn style(&self, role: Role) -> Style {
        let p = &self.palette;
        match role {
            Role::Text => Style::default().fg(p.fg),
            Role::Dim => Style::default().fg(p.fg_dim),
            Role::Faint => Style::default().fg(p.fg_faint),
            Role::Accent => Style::default().fg(p.focus).add_modifier(Modifier::BOLD),
            Role::Hint => Style::default().fg(p.hint),
            Role::Warn => Style::default().fg(p.busy),
            Role::Error => Style::default().fg(p.bad),
            Role::Frame => Style::default().fg(p.frame),
            Role::FocusFrame => Style::default().fg(p.focus),
            Role::Cursor => Style::default()
                .bg(p.cursor_bg)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Color and glyph for a unit's ACTIVE column
    pub fn unit_state(&self, active: &str) -> (Style, &'static str) {
        let p = &self.palette;
        let (color, icon) = match active {
            "active" => (p.ok, "●"),
            "activating" | "reloading" | "refreshing" => (p.busy, "◐"),
            "deactivating" => (p.busy, "◑"),
            "failed" | "error" => (p.bad, "✗"),
            "inactive" => (p.fg_faint, "○"),
            _ => (p.fg_dim, "?"),
        };
        (Style::default().fg(color), icon)
    }

    pub fn output(&self, kind: OutputKind) -> Style {
        let p = &self.palette;
        let color = match kind {
            OutputKind::Info => p.note,
            OutputKind::Guidance => p.busy,
            OutputKind::Running => p.fg_dim,
            OutputKind::Completed { success: true } => p.fg,
            OutputKind::Completed { success: false } => p.bad,
        };
        Style::default().fg(color)
    }

    pub fn tab(&self, active: bool) -> Style {
        if active {
            self.style(Role::Accent)
        } else {
            self.style(Role::Dim)
        }
    }
}

static ACTIVE: OnceLock<Theme> = OnceLock::new();

/// Pick the palette once at startup. Later calls are ignored.
pub fn init(name: ThemeName) {
    let _ = ACTIVE.set(Theme::new(name));
}

pub fn theme() -> &'static Theme {
    ACTIVE.get_or_init(|| Theme::new(ThemeName::Dark))
}

/// Shorthands over the active theme
pub mod styles {
    use ratatui::style::Style;
    use unitdeck_core::state::OutputKind;

    use super::{Role, theme};

    pub fn active_state(active: &str) -> Style {
        theme().unit_state(active).0
    }

    pub fn active_state_icon(active: &str) -> &'static str {
        theme().unit_state(active).1
    }

    pub fn output(kind: OutputKind) -> Style {
        theme().output(kind)
    }

    pub fn tab(active: bool) -> Style {
        theme().tab(active)
    }

    pub fn key_hint() -> Style {
        theme().style(Role::Hint)
    }

    pub fn border_subtle() -> Style {
        theme().style(Role::Frame)
    }

    pub fn border_focused() -> Style {
        theme().style(Role::FocusFrame)
    }

    pub fn selection() -> Style {
        theme().style(Role::Cursor)
    }

    pub fn text() -> Style {
        theme().style(Role::Text)
    }

    pub fn text_dim() -> Style {
        theme().style(Role::Dim)
    }

    pub fn text_muted() -> Style {
        theme().style(Role::Faint)
    }

    pub fn accent_bold() -> Style {
        theme().style(Role::Accent)
    }

    pub fn warn() -> Style {
        theme().style(Role::Warn)
    }

    pub fn error() -> Style {
        theme().style(Role::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_state_colors() {
        let theme = Theme::new(ThemeName::HighContrast);
        assert_eq!(theme.unit_state("active").0.fg, Some(Color::Green));
        assert_eq!(theme.unit_state("failed").0.fg, Some(Color::Red));
        assert_eq!(theme.unit_state("reloading").0.fg, Some(Color::Yellow));
        assert_eq!(theme.unit_state("inactive").1, "○");
        assert_eq!(theme.unit_state("bogus").1, "?");
    }

    #[test]
    fn test_output_styles() {
        let theme = Theme::new(ThemeName::HighContrast);
        assert_eq!(
            theme.output(OutputKind::Completed { success: false }).fg,
            Some(Color::Red)
        );
        assert_eq!(theme.output(OutputKind::Guidance).fg, Some(Color::Yellow));
    }

    #[test]
    fn test_cursor_is_bold() {
        let theme = Theme::new(ThemeName::Dark);
        let cursor = theme.style(Role::Cursor);
        assert!(cursor.add_modifier.contains(Modifier::BOLD));
        assert_eq!(cursor.bg, Some(Color::Rgb(38, 79, 120)));
    }
}
