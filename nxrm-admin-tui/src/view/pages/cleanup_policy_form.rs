//! Cleanup policy form page

use nxrm_admin_core::machine::{CleanupPolicyFormMachine, FormDefinition};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::model::{App, PolicyFormRow, PolicyFormState};
use crate::view::components::checkbox_group::{CheckboxGroup, CheckboxItem};
use crate::view::components::form;
use crate::view::theme::Styles;

const CRITERIA_ROWS: [PolicyFormRow; 3] = [
    PolicyFormRow::LastBlobUpdated,
    PolicyFormRow::LastDownloaded,
    PolicyFormRow::AssetRegex,
];

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let Some(state) = app.cleanup_policies.form.as_ref() else {
        return;
    };
    let machine = state.machine();
    if form::render_unavailable(machine, frame, area) {
        return;
    }

    let visible = state.visible_rows();
    let general = general_lines(state);
    let criteria = checkbox_group(state, "Criteria", &visible, &CRITERIA_ROWS);
    let release = release_lines(state, &visible);
    let exclusion = checkbox_group(state, "Exclusion Criteria", &visible, &[PolicyFormRow::Retain]);
    let footer = footer_lines(machine);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(line_count(&general).saturating_add(1)),
            Constraint::Length(group_height(&criteria)),
            Constraint::Length(line_count(&release)),
            Constraint::Length(group_height(&exclusion)),
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(general), layout[0]);
    if !criteria.is_empty() {
        frame.render_widget(criteria, layout[1]);
    }
    frame.render_widget(Paragraph::new(release), layout[2]);
    if !exclusion.is_empty() {
        frame.render_widget(exclusion, layout[3]);
    }
    frame.render_widget(Paragraph::new(footer), layout[4]);
}

fn group_height(group: &CheckboxGroup<'_>) -> u16 {
    if group.is_empty() {
        0
    } else {
        group.height().saturating_add(1)
    }
}

fn line_count(lines: &[Line<'_>]) -> u16 {
    u16::try_from(lines.len()).unwrap_or(u16::MAX)
}

fn general_lines(state: &PolicyFormState) -> Vec<Line<'static>> {
    let machine = state.machine();
    let draft = machine.data();
    let mut lines = Vec::new();

    for row in [PolicyFormRow::Name, PolicyFormRow::Format, PolicyFormRow::Notes] {
        let focused = state.focus == row;
        let error = row.field().and_then(|field| machine.field_error(field));
        if row.is_select() {
            let format_name = machine
                .extras()
                .criteria_by_format
                .iter()
                .find(|format| format.id == draft.format)
                .map_or(row.value(draft), |format| format.name.as_str());
            lines.extend(form::select_row(row.label(), format_name, focused, error));
        } else {
            let read_only = row.field().is_some_and(|field| machine.is_immutable(field));
            lines.extend(form::text_row(row.label(), row.value(draft), focused, read_only, error));
        }
    }

    if draft.format.is_empty() {
        lines.push(Line::styled("  Select a format to see its criteria", Styles::muted()));
    } else if !machine.is_any_field_applicable() {
        lines.push(Line::styled("  This format has no cleanup criteria", Styles::muted()));
    }
    lines
}

fn checkbox_group<'a>(
    state: &'a PolicyFormState,
    label: &'a str,
    visible: &[PolicyFormRow],
    rows: &[PolicyFormRow],
) -> CheckboxGroup<'a> {
    let machine = state.machine();
    rows.iter()
        .filter(|row| visible.contains(row))
        .fold(CheckboxGroup::new(label), |group, row| {
            let disabled = !row.is_enabled(machine);
            group.item(CheckboxItem {
                label: row.label(),
                checked: row.is_checked(machine),
                focused: state.focus == *row,
                value: Some(row.value(machine.data())),
                error: row.field().and_then(|field| machine.field_error(field)),
                disabled,
                note: disabled.then(|| row.disabled_note()).flatten(),
            })
        })
}

fn release_lines(state: &PolicyFormState, visible: &[PolicyFormRow]) -> Vec<Line<'static>> {
    let row = PolicyFormRow::ReleaseType;
    if !visible.contains(&row) {
        return Vec::new();
    }
    let mut lines = form::select_row(row.label(), row.value(state.machine().data()), state.focus == row, None);
    lines.push(Line::from(""));
    lines
}

fn footer_lines(machine: &CleanupPolicyFormMachine) -> Vec<Line<'static>> {
    let mut lines = vec![form::status_line(machine)];

    if machine.show_preview() && machine.context().validation_errors.is_empty() {
        let preview = machine
            .definition()
            .to_payload(machine.data(), machine.extras());
        lines.push(Line::from(""));
        lines.push(Line::styled("  Preview", Styles::title()));
        lines.push(Line::styled(
            format!(
                "  Removes {} components matching: {}",
                preview.format,
                preview.criteria_summary()
            ),
            Styles::muted(),
        ));
    }
    lines
}
