//! Home page: connection and feature flags

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::App;
use crate::view::theme::{colors, Styles};

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(1)])
        .split(area);

    let welcome = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Repository Manager Administration",
            Style::default().fg(c.highlight).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Cleanup policies, roles and LDAP servers from the terminal",
            Styles::muted(),
        )),
        Line::from(""),
    ];
    frame.render_widget(Paragraph::new(welcome), layout[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[1]);

    let connection = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", app.backend.mode),
            Style::default().fg(c.success).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("  data source", Styles::muted())),
    ])
    .block(stat_block("Connection"));
    frame.render_widget(connection, columns[0]);

    let flags = app.backend.flags;
    let flag_line = |label: &'static str, on: bool| {
        let (mark, style) = if on {
            ("●", Styles::success())
        } else {
            ("○", Styles::muted())
        };
        Line::from(vec![
            Span::styled(format!("  {mark} "), style),
            Span::styled(label, Styles::text()),
        ])
    };
    let features = Paragraph::new(vec![
        Line::from(""),
        flag_line("Datastore", flags.datastore_enabled),
        flag_line("PostgreSQL", flags.postgres_enabled),
        flag_line("Cleanup preview", flags.is_preview_enabled()),
        flag_line("Maven retain-N", flags.is_retain_supported()),
    ])
    .block(stat_block("Features"));
    frame.render_widget(features, columns[1]);
}

fn stat_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors().border))
}
