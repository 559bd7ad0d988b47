//! Main layout

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{App, Page};

use super::components;
use super::pages;
use super::theme::{colors, Styles};

/// Render the whole screen
pub fn render(app: &App, frame: &mut Frame) {
    let size = frame.area();

    // Title bar, main area, status bar
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(size);

    render_title_bar(app, frame, main_layout[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(20), Constraint::Percentage(80)])
        .split(main_layout[1]);

    components::navigation::render(app, frame, columns[0]);
    render_page_content(app, frame, columns[1]);
    components::statusbar::render(app, frame, main_layout[2]);

    // Modals on top
    components::modal::render(app, frame);
}

fn render_title_bar(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let style = Style::default().bg(c.highlight).fg(c.selected_fg);
    let title = Line::from(vec![
        Span::raw(concat!(" Repository Manager Admin v", env!("CARGO_PKG_VERSION"))),
        Span::raw("  ·  "),
        Span::raw(app.backend.mode.to_string()),
    ]);
    frame.render_widget(Paragraph::new(title).style(style), area);
}

fn render_page_content(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", page_title(app)))
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border(app.focus.is_content()));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    match app.current_page {
        Page::Home => pages::home::render(app, frame, inner_area),
        Page::CleanupPolicies => pages::cleanup_policies::render(app, frame, inner_area),
        Page::CleanupPolicyForm => pages::cleanup_policy_form::render(app, frame, inner_area),
        Page::Roles => pages::roles::render(app, frame, inner_area),
        Page::RoleForm => pages::role_form::render(app, frame, inner_area),
        Page::LdapServers => pages::ldap_servers::render(app, frame, inner_area),
    }
}

/// Page title; forms say whether they create or edit
fn page_title(app: &App) -> String {
    let page = app.current_page;
    let editing = match page {
        Page::CleanupPolicyForm => app
            .cleanup_policies
            .form
            .as_ref()
            .and_then(|form| form.machine().item_id().map(str::to_string)),
        Page::RoleForm => app
            .roles
            .form
            .as_ref()
            .and_then(|form| form.machine().item_id().map(str::to_string)),
        _ => return page.title().to_string(),
    };
    match editing {
        Some(id) => format!("{}: {id}", page.title()),
        None => format!("New {}", page.title()),
    }
}
