//! Building blocks shared by the form pages

use nxrm_admin_core::machine::{FormDefinition, FormMachine, FormPhase};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::table::fit;
use crate::view::theme::{colors, Styles};

const LABEL_WIDTH: usize = 24;

/// Draw the loading or load-failure state; returns false when the draft can be shown
pub fn render_unavailable<D: FormDefinition>(machine: &FormMachine<D>, frame: &mut Frame, area: Rect) -> bool {
    let lines = match (machine.phase(), machine.context().load_error.as_deref()) {
        (FormPhase::Loading, _) => vec![Line::styled("  Loading…", Styles::muted())],
        (FormPhase::Error, Some(error)) => vec![
            Line::from(""),
            Line::styled(format!("  {error}"), Styles::error()),
            Line::from(""),
            Line::styled("  Press Ctrl+r to retry or Esc to go back", Styles::muted()),
        ],
        _ => return false,
    };
    frame.render_widget(Paragraph::new(lines), area);
    true
}

/// Labelled text input, followed by its error when there is one
pub fn text_row(label: &str, value: &str, focused: bool, read_only: bool, error: Option<&str>) -> Vec<Line<'static>> {
    let c = colors();
    let marker = if focused { "▶ " } else { "  " };
    let label_style = if focused {
        Style::default().fg(c.highlight).add_modifier(Modifier::BOLD)
    } else {
        Styles::muted()
    };
    let mut spans = vec![
        Span::styled(format!("{marker}{}", fit(label, LABEL_WIDTH)), label_style),
        Span::styled(
            value.to_string(),
            if read_only { Styles::muted() } else { Styles::text() },
        ),
    ];
    if focused && !read_only {
        spans.push(Span::styled("▏", Style::default().fg(c.highlight)));
    }
    if read_only {
        spans.push(Span::styled("  (read-only)", Styles::muted()));
    }

    let mut lines = vec![Line::from(spans)];
    if let Some(error) = error {
        lines.push(error_line(error));
    }
    lines
}

/// Labelled select showing the current option between arrows
pub fn select_row(label: &str, value: &str, focused: bool, error: Option<&str>) -> Vec<Line<'static>> {
    let c = colors();
    let marker = if focused { "▶ " } else { "  " };
    let (label_style, value_style) = if focused {
        (
            Style::default().fg(c.highlight).add_modifier(Modifier::BOLD),
            Style::default().fg(c.highlight),
        )
    } else {
        (Styles::muted(), Styles::text())
    };
    let value = if value.is_empty() { "(choose)" } else { value };
    let shown = if focused {
        format!("◀ {value} ▶")
    } else {
        format!("  {value}")
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{marker}{}", fit(label, LABEL_WIDTH)), label_style),
        Span::styled(shown, value_style),
    ])];
    if let Some(error) = error {
        lines.push(error_line(error));
    }
    lines
}

fn error_line(error: &str) -> Line<'static> {
    Line::styled(format!("  {}{error}", " ".repeat(LABEL_WIDTH)), Styles::error())
}

/// Busy, save-failure and dirty indicators
pub fn status_line<D: FormDefinition>(machine: &FormMachine<D>) -> Line<'static> {
    match machine.phase() {
        FormPhase::Saving => Line::styled("  Saving…", Styles::muted()),
        FormPhase::Deleting => Line::styled("  Deleting…", Styles::muted()),
        FormPhase::Error => Line::styled(
            format!(
                "  {} (Ctrl+s to try again)",
                machine.context().save_error.as_deref().unwrap_or("Request failed")
            ),
            Styles::error(),
        ),
        _ if !machine.is_pristine() => Line::styled("  Unsaved changes", Style::default().fg(colors().warning)),
        _ => Line::from(""),
    }
}
