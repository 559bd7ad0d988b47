//! Role form page

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::model::{App, RoleFormRow};
use crate::view::components::form;
use crate::view::theme::{colors, Styles};

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let Some(state) = app.roles.form.as_ref() else {
        return;
    };
    let machine = state.machine();
    if form::render_unavailable(machine, frame, area) {
        return;
    }

    let draft = machine.data();
    let mut lines = Vec::new();

    if draft.read_only {
        lines.push(Line::styled(
            "  Built-in role: it can be viewed but not deleted",
            Style::default().fg(colors().warning),
        ));
        lines.push(Line::from(""));
    }

    for row in RoleFormRow::ALL {
        let focused = state.focus == row;
        let Some(field) = row.field() else {
            continue;
        };
        let value = match row {
            RoleFormRow::Id => &draft.id,
            RoleFormRow::Name => &draft.name,
            _ => &draft.description,
        };
        lines.extend(form::text_row(
            row.label(),
            value,
            focused,
            machine.is_immutable(field),
            machine.field_error(field),
        ));
    }

    // Contained roles
    lines.push(Line::from(""));
    let focused = state.focus == RoleFormRow::Roles;
    let names = machine.contained_role_names();
    let count = names.len();
    lines.push(Line::from(vec![
        Span::styled(
            if focused { "▶ " } else { "  " },
            Style::default().fg(colors().highlight),
        ),
        Span::styled(RoleFormRow::Roles.label(), if focused { Styles::title() } else { Styles::muted() }),
        Span::raw(" "),
        Span::styled(format!("({count})"), Styles::counter(count)),
        Span::styled(
            if focused { "  Enter or Alt+r to change" } else { "" },
            Styles::muted(),
        ),
    ]));
    if names.is_empty() {
        lines.push(Line::styled("    none", Styles::muted()));
    } else {
        lines.push(Line::styled(format!("    {}", names.join(", ")), Styles::text()));
    }
    if !draft.privileges.is_empty() {
        lines.push(Line::styled(
            format!("  {} privilege(s), managed in the web console", draft.privileges.len()),
            Styles::muted(),
        ));
    }

    lines.push(Line::from(""));
    lines.push(form::status_line(machine));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
