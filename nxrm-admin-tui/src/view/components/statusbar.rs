//! Status bar

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::{App, FocusPanel, Page};
use crate::view::theme::Styles;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let hints = get_hints(app);

    let mut spans = Vec::new();
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Styles::hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, Styles::hint_desc()));
    }

    if let Some(ref msg) = app.status_message {
        spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(msg.clone(), Style::default().fg(Color::Yellow)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(Styles::statusbar()), area);
}

/// Key hints for the current focus and page
fn get_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    if app.modal.is_open() {
        return vec![("Esc", "Close")];
    }

    let mut hints = Vec::new();

    if app.current_page.is_detail_page() {
        hints.push(("Tab", "Next Field"));
        hints.push(("Ctrl+s", "Save"));
        hints.push(("Alt+z", "Reset"));
        hints.push(("Alt+d", "Delete"));
        if app.current_page == Page::RoleForm {
            hints.push(("Alt+r", "Roles"));
        } else {
            hints.push(("Space", "Toggle"));
        }
        hints.push(("Esc", "Back"));
        return hints;
    }

    if is_filtering(app) {
        hints.push(("Enter", "Apply Filter"));
        hints.push(("Esc", "Clear Filter"));
        return hints;
    }

    hints.push(("Tab", "Switch Panels"));
    match app.focus {
        FocusPanel::Navigation => {
            hints.push(("↑↓", "Navigation"));
            hints.push(("Enter", "Open"));
        }
        FocusPanel::Content => match app.current_page {
            Page::Home => {}
            Page::CleanupPolicies | Page::Roles => {
                hints.push(("↑↓", "Select"));
                hints.push(("←→", "Page"));
                hints.push(("/", "Filter"));
                hints.push(("Enter", "Edit"));
                hints.push(("Alt+a", "Add"));
            }
            Page::LdapServers => {
                hints.push(("↑↓", "Select"));
                hints.push(("/", "Filter"));
                hints.push(("Alt+d", "Delete"));
            }
            Page::CleanupPolicyForm | Page::RoleForm => {}
        },
    }
    hints.push(("Alt+h", "Help"));
    hints.push(("Alt+q", "Quit"));

    hints
}

fn is_filtering(app: &App) -> bool {
    match app.current_page {
        Page::CleanupPolicies => app.cleanup_policies.list.filtering,
        Page::Roles => app.roles.list.filtering,
        Page::LdapServers => app.ldap_servers.filtering,
        _ => false,
    }
}
