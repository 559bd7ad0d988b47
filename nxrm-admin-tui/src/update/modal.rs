//! Modal updates

use nxrm_admin_core::machine::{FormEvent, ListEvent, RoleSelectionEvent, RoleSelectionOutcome};

use super::form::set_roles;
use crate::message::ModalMessage;
use crate::model::{App, DeleteTarget, Modal};

/// What happens after a modal handled a message
enum Follow {
    Stay,
    Close,
    Delete(DeleteTarget),
}

/// Handle a modal message
pub fn update(app: &mut App, msg: ModalMessage) {
    let Some(modal) = app.modal.active.as_mut() else {
        return;
    };

    let follow = match modal {
        Modal::ConfirmDelete { target, focus, .. } => match msg {
            ModalMessage::Close => Follow::Close,
            ModalMessage::ToggleDeleteFocus => {
                *focus = 1 - *focus;
                Follow::Stay
            }
            ModalMessage::Confirm if *focus == 1 => Follow::Delete(target.clone()),
            ModalMessage::Confirm => Follow::Close,
            _ => Follow::Stay,
        },
        Modal::RoleSelection {
            host,
            filter_focused,
        } => {
            // Confirm and Cancel close through the completion callback
            match msg {
                ModalMessage::Close => host.send(RoleSelectionEvent::Cancel),
                ModalMessage::Confirm => host.send(RoleSelectionEvent::Confirm),
                ModalMessage::ToggleFilterFocus => *filter_focused = !*filter_focused,
                ModalMessage::Input(ch) => {
                    let mut text = host.machine().filter().to_string();
                    text.push(ch);
                    host.send(RoleSelectionEvent::Filter(text));
                }
                ModalMessage::Backspace => {
                    let mut text = host.machine().filter().to_string();
                    if text.pop().is_some() {
                        host.send(RoleSelectionEvent::Filter(text));
                    }
                }
                ModalMessage::CursorUp => host.send(RoleSelectionEvent::CursorUp),
                ModalMessage::CursorDown => host.send(RoleSelectionEvent::CursorDown),
                ModalMessage::ToggleRow => host.send(RoleSelectionEvent::ToggleCursor),
                ModalMessage::NextPage => host.send(RoleSelectionEvent::NextPage),
                ModalMessage::PreviousPage => host.send(RoleSelectionEvent::PreviousPage),
                ModalMessage::ToggleDeleteFocus => {}
            }
            Follow::Stay
        }
        Modal::Help | Modal::Error { .. } => match msg {
            ModalMessage::Close | ModalMessage::Confirm => Follow::Close,
            _ => Follow::Stay,
        },
    };

    match follow {
        Follow::Stay => {}
        Follow::Close => app.modal.close(),
        Follow::Delete(target) => {
            app.modal.close();
            confirm_delete(app, target);
        }
    }
}

fn confirm_delete(app: &mut App, target: DeleteTarget) {
    log::info!("Delete confirmed for {}", target.kind());
    match target {
        DeleteTarget::CleanupPolicyForm => {
            if let Some(form) = app.cleanup_policies.form.as_mut() {
                form.host.send(FormEvent::ConfirmDelete);
            }
        }
        DeleteTarget::RoleForm => {
            if let Some(form) = app.roles.form.as_mut() {
                form.host.send(FormEvent::ConfirmDelete);
            }
        }
        DeleteTarget::LdapServer(id) => {
            app.set_status(format!("Deleting LDAP server {id}..."));
            app.ldap_servers.send(ListEvent::ConfirmDelete(id));
        }
    }
}

/// The role selection modal finished
pub fn role_selection_closed(app: &mut App, outcome: RoleSelectionOutcome) {
    if matches!(app.modal.active, Some(Modal::RoleSelection { .. })) {
        app.modal.close();
    }
    match outcome {
        RoleSelectionOutcome::Confirmed(roles) => {
            let count = roles.len();
            set_roles(app, roles);
            app.set_status(format!("{count} contained role(s) selected"));
        }
        RoleSelectionOutcome::Cancelled => log::debug!("Role selection cancelled"),
    }
}
