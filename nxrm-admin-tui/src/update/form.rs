//! Form page updates

use nxrm_admin_core::machine::{
    CleanupPolicyEvent, CleanupPolicyField, CleanupPolicyForm, FormDefinition,
    FormEvent, FormOutcome, RoleDraft, RoleField, RoleForm, RoleFormEvent,
};
use nxrm_admin_core::types::ReleaseType;

use super::navigation::close_form;
use crate::backend::Backend;
use crate::message::FormMessage;
use crate::model::{App, DeleteTarget, Page, PolicyFormRow, PolicyFormState, RoleFormRow, RoleFormState};

/// Handle a form page message
pub fn update(app: &mut App, msg: FormMessage) {
    match app.current_page {
        Page::CleanupPolicyForm => cleanup_policy_form(app, msg),
        Page::RoleForm => role_form(app, msg),
        _ => {}
    }
}

/// A mounted form reached `Done`
pub fn closed(app: &mut App, list_page: Page, outcome: FormOutcome) {
    let kind = match list_page {
        Page::CleanupPolicies => CleanupPolicyForm::KIND,
        Page::Roles => RoleForm::KIND,
        _ => "Item",
    };
    let verb = match outcome {
        FormOutcome::Saved => "saved",
        FormOutcome::Deleted => "deleted",
    };
    log::info!("{kind} {verb}");

    if app.current_page.is_detail_page() && app.current_page.parent() == list_page {
        close_form(app, true);
    }
    app.set_status(format!("{kind} {verb}"));
}

// ========== Cleanup policy ==========

fn cleanup_policy_form(app: &mut App, msg: FormMessage) {
    let Some(form) = app.cleanup_policies.form.as_mut() else {
        return;
    };

    match msg {
        FormMessage::Delete => {
            if form.machine().can_delete() {
                let name = form.machine().data().name.clone();
                app.modal.show_confirm_delete(DeleteTarget::CleanupPolicyForm, &name);
            } else {
                app.set_status("Only saved policies can be deleted");
            }
            return;
        }
        FormMessage::Save => {
            form.host.send(FormEvent::Submit);
            if !form.machine().context().validation_errors.is_empty() {
                app.set_status("Fix the highlighted fields before saving");
            }
            return;
        }
        FormMessage::NextField => form.focus_next(),
        FormMessage::PrevField => form.focus_previous(),
        FormMessage::Input(ch) => edit_policy_field(form, |value| value.push(ch)),
        FormMessage::Backspace => edit_policy_field(form, |value| {
            value.pop();
        }),
        FormMessage::Toggle => {
            if let Some(event) = form.focus.toggle_event(form.machine()) {
                form.host.send(FormEvent::Custom(event));
            }
        }
        FormMessage::PrevOption => cycle_policy_option(form, false),
        FormMessage::NextOption => cycle_policy_option(form, true),
        FormMessage::Reset => form.host.send(FormEvent::Reset),
        FormMessage::SelectRoles => {}
    }
    form.clamp_focus();
}

fn edit_policy_field(form: &mut PolicyFormState, edit: impl FnOnce(&mut String)) {
    let Some(field) = form.focus.field() else {
        return;
    };
    if !form.focus.is_enabled(form.machine()) {
        return;
    }
    let mut value = form.focus.value(form.machine().data()).to_string();
    edit(&mut value);
    form.host.send(FormEvent::Update(field, value));
}

fn cycle_policy_option(form: &mut PolicyFormState, forward: bool) {
    match form.focus {
        PolicyFormRow::Format => {
            let machine = form.machine();
            let formats: Vec<&str> = machine
                .extras()
                .criteria_by_format
                .iter()
                .map(|format| format.id.as_str())
                .collect();
            let current = formats.iter().position(|id| *id == machine.data().format);
            if let Some(next) = cycle(current, formats.len(), forward) {
                let value = formats[next].to_string();
                form.host
                    .send(FormEvent::Update(CleanupPolicyField::Format, value));
            }
        }
        PolicyFormRow::ReleaseType => {
            let options: Vec<Option<ReleaseType>> = std::iter::once(None)
                .chain(ReleaseType::ALL.into_iter().map(Some))
                .collect();
            let current = options
                .iter()
                .position(|option| *option == form.machine().data().release_type);
            if let Some(next) = cycle(current, options.len(), forward) {
                form.host.send(FormEvent::Custom(CleanupPolicyEvent::UpdateReleaseType(
                    options[next],
                )));
            }
        }
        _ => {}
    }
}

/// Index after stepping from `current` through `len` options, wrapping around
fn cycle(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(index), true) => (index + 1) % len,
        (Some(index), false) => (index + len - 1) % len,
    })
}

// ========== Role ==========

fn role_form(app: &mut App, msg: FormMessage) {
    let Some(form) = app.roles.form.as_mut() else {
        return;
    };

    match msg {
        FormMessage::Delete => {
            let machine = form.machine();
            if machine.data().read_only {
                let message = format!("Role {} is read-only and cannot be deleted", machine.data().name);
                app.modal.show_error("Cannot delete role", &message);
            } else if machine.can_delete() {
                let name = machine.data().name.clone();
                app.modal.show_confirm_delete(DeleteTarget::RoleForm, &name);
            } else {
                app.set_status("Only saved roles can be deleted");
            }
        }
        FormMessage::SelectRoles => {
            let machine = form.machine();
            if machine.is_editable() {
                let host = Backend::role_selection(
                    &machine.selectable_roles(),
                    &machine.data().roles,
                    app.messages.clone(),
                );
                app.modal.show_role_selection(host);
            } else {
                app.modal
                    .show_error("Roles unavailable", "The role list has not been loaded");
            }
        }
        FormMessage::Save => {
            form.host.send(FormEvent::Submit);
            if !form.machine().context().validation_errors.is_empty() {
                app.set_status("Fix the highlighted fields before saving");
            }
        }
        FormMessage::NextField => form.focus_next(),
        FormMessage::PrevField => form.focus_previous(),
        FormMessage::Input(ch) => edit_role_field(form, |value| value.push(ch)),
        FormMessage::Backspace => edit_role_field(form, |value| {
            value.pop();
        }),
        FormMessage::Reset => form.host.send(FormEvent::Reset),
        FormMessage::Toggle | FormMessage::PrevOption | FormMessage::NextOption => {}
    }
}

fn role_value(draft: &RoleDraft, field: RoleField) -> &str {
    match field {
        RoleField::Id => &draft.id,
        RoleField::Name => &draft.name,
        RoleField::Description => &draft.description,
    }
}

fn edit_role_field(form: &mut RoleFormState, edit: impl FnOnce(&mut String)) {
    let Some(field) = form.focus.field() else {
        return;
    };
    if !form.focus.is_enabled(form.machine()) {
        return;
    }
    let mut value = role_value(form.machine().data(), field).to_string();
    edit(&mut value);
    form.host.send(FormEvent::Update(field, value));
}

/// Commit the contained roles picked in the selection modal
pub fn set_roles(app: &mut App, roles: Vec<String>) {
    match app.roles.form.as_mut() {
        Some(form) => {
            form.host.send(FormEvent::Custom(RoleFormEvent::SetRoles(roles)));
            form.focus = RoleFormRow::Roles;
        }
        None => log::debug!("Role form closed before the selection was confirmed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_both_ways() {
        assert_eq!(cycle(None, 3, true), Some(0));
        assert_eq!(cycle(None, 3, false), Some(2));
        assert_eq!(cycle(Some(2), 3, true), Some(0));
        assert_eq!(cycle(Some(0), 3, false), Some(2));
        assert_eq!(cycle(Some(1), 0, true), None);
    }
}
