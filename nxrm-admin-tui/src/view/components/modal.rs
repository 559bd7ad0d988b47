//! Modal dialogs

use nxrm_admin_core::machine::{RoleSelection, PAGE_SIZE};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::table::{fit, page_summary};
use crate::model::state::{DeleteTarget, Modal};
use crate::model::App;
use crate::view::theme::{colors, Styles};

/// Render the active modal, if any
pub fn render(app: &App, frame: &mut Frame) {
    let Some(ref modal) = app.modal.active else {
        return;
    };

    match modal {
        Modal::ConfirmDelete {
            target,
            item_name,
            focus,
        } => render_confirm_delete(frame, target, item_name, *focus),
        Modal::RoleSelection {
            host,
            filter_focused,
        } => render_role_selection(frame, host.machine(), *filter_focused),
        Modal::Help => render_help(frame),
        Modal::Error { title, message } => render_error(frame, title, message),
    }
}

/// Centered area of at most `width` x `height`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn modal_block(title: &str, border: Color) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(colors().bg))
}

fn render_confirm_delete(frame: &mut Frame, target: &DeleteTarget, item_name: &str, focus: usize) {
    let area = centered_rect(48, 9, frame.area());
    frame.render_widget(Clear, area);

    let block = modal_block("Confirm Deletion", colors().error);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let c = colors();
    let cancel_style = if focus == 0 {
        Style::default().fg(c.bg).bg(c.fg)
    } else {
        Style::default().fg(c.fg)
    };
    let confirm_style = if focus == 1 {
        Style::default().fg(c.bg).bg(c.error)
    } else {
        Style::default().fg(c.error)
    };

    let lines = vec![
        Line::from(""),
        Line::styled(format!("  Delete {}?", target.kind()), Styles::text()),
        Line::styled(format!("  \"{item_name}\""), Style::default().fg(c.warning)),
        Line::from(""),
        Line::from(vec![
            Span::raw("    "),
            Span::styled(" Cancel ", cancel_style),
            Span::raw("    "),
            Span::styled(" Delete ", confirm_style),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_role_selection(frame: &mut Frame, selection: &RoleSelection, filter_focused: bool) {
    let area = centered_rect(72, 22, frame.area());
    frame.render_widget(Clear, area);

    let c = colors();
    let block = modal_block("Select Contained Roles", c.border_focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();

    // Filter and counter
    let filter_style = if filter_focused {
        Style::default().fg(c.highlight).add_modifier(Modifier::BOLD)
    } else {
        Styles::muted()
    };
    let cursor = if filter_focused { "▏" } else { "" };
    let count = selection.selection_count();
    lines.push(Line::from(vec![
        Span::styled("Filter: ", filter_style),
        Span::styled(format!("{}{cursor}", selection.filter()), Styles::text()),
    ]));
    lines.push(Line::from(vec![
        Span::styled(format!("{count}"), Styles::counter(count)),
        Span::styled(" selected", Styles::muted()),
    ]));
    lines.push(Line::from(""));

    // Rows
    let width = inner.width as usize;
    let name_width = 24.min(width.saturating_sub(8));
    let description_width = width.saturating_sub(name_width + 8);
    let rows = selection.page_rows();
    if rows.is_empty() {
        lines.push(Line::styled("  No roles match the filter", Styles::muted()));
    }
    for (i, row) in rows.iter().enumerate() {
        let is_cursor = i == selection.cursor() && !filter_focused;
        let marker = if is_cursor { "▶ " } else { "  " };
        let checkbox = if row.is_checked { "[x] " } else { "[ ] " };
        let style = if is_cursor {
            Styles::selected()
        } else if row.is_selected {
            Style::default().fg(c.highlight)
        } else {
            Styles::text()
        };
        lines.push(Line::styled(
            format!(
                "{marker}{checkbox}{} {}",
                fit(&row.item.name, name_width),
                fit(&row.item.description, description_width)
            ),
            style,
        ));
    }

    // Footer
    let info = selection.page_info();
    let padding = (PAGE_SIZE + 3).saturating_sub(lines.len());
    lines.extend(std::iter::repeat_with(|| Line::from("")).take(padding));
    lines.push(Line::styled(page_summary(info), Styles::muted()));
    lines.push(Line::from(vec![
        Span::styled("Tab", Styles::hint_key()),
        Span::styled(" filter/list  ", Styles::hint_desc()),
        Span::styled("Space", Styles::hint_key()),
        Span::styled(" toggle  ", Styles::hint_desc()),
        Span::styled("Enter", Styles::hint_key()),
        Span::styled(" confirm  ", Styles::hint_desc()),
        Span::styled("Esc", Styles::hint_key()),
        Span::styled(" cancel", Styles::hint_desc()),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_error(frame: &mut Frame, title: &str, message: &str) {
    let area = centered_rect(50, 8, frame.area());
    frame.render_widget(Clear, area);

    let block = modal_block(title, colors().error);
    frame.render_widget(block, area);

    let inner = Rect::new(
        area.x + 2,
        area.y + 2,
        area.width.saturating_sub(4),
        area.height.saturating_sub(4),
    );

    let lines = vec![
        Line::styled(message, Styles::text()),
        Line::from(""),
        Line::styled("Press Esc or Enter to close", Styles::muted()),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("Tab", "Switch panel"),
            ("↑↓/jk", "Move up/down"),
            ("Enter", "Open / edit"),
            ("Esc", "Back / cancel"),
            ("Ctrl+r", "Refresh"),
            ("Alt+q", "Quit"),
        ],
    ),
    (
        "Lists",
        &[
            ("←→", "Previous/next page"),
            ("/", "Filter"),
            ("Alt+a", "Add"),
            ("Alt+d", "Delete"),
        ],
    ),
    (
        "Forms",
        &[
            ("Tab/↑↓", "Move between fields"),
            ("Space", "Toggle criterion"),
            ("←→", "Change selection"),
            ("Ctrl+s", "Save"),
            ("Alt+z", "Discard changes"),
            ("Alt+r", "Select contained roles"),
        ],
    ),
];

fn render_help(frame: &mut Frame) {
    let height = HELP_SECTIONS
        .iter()
        .map(|(_, keys)| u16::try_from(keys.len()).unwrap_or(u16::MAX).saturating_add(2))
        .fold(3, u16::saturating_add);
    let area = centered_rect(52, height, frame.area());
    frame.render_widget(Clear, area);

    let c = colors();
    let block = modal_block("Help", c.border_focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    for (section, keys) in HELP_SECTIONS {
        lines.push(Line::styled(
            *section,
            Style::default().fg(c.highlight).add_modifier(Modifier::BOLD),
        ));
        for (key, desc) in *keys {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<9}"), Style::default().fg(c.warning)),
                Span::styled(*desc, Styles::text()),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::styled("Press Esc to close the help", Styles::muted()));

    frame.render_widget(Paragraph::new(lines), inner);
}
