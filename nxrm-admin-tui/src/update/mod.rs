//! Update layer: consume messages, change the model
//!
//! Machine events are sent to the mounted hosts here; async completions come
//! back through `App::pump` and the completion callbacks' messages.

mod content;
mod form;
mod modal;
mod navigation;

use nxrm_admin_core::machine::{FormEvent, FormPhase, ListEvent, ListMachine, ListPhase, Listable};

use crate::message::{AppMessage, ModalMessage};
use crate::model::{App, FocusPanel, ListPageState, Page};

pub use navigation::open_page;

/// Handle one message
pub fn update(app: &mut App, msg: AppMessage) {
    match msg {
        AppMessage::Quit => {
            app.should_quit = true;
        }

        AppMessage::ToggleFocus => {
            if !app.modal.is_open() {
                app.focus = app.focus.toggle();
            }
        }

        AppMessage::Navigation(nav_msg) => navigation::update(app, nav_msg),

        AppMessage::Content(content_msg) => content::update(app, content_msg),

        AppMessage::Form(form_msg) => form::update(app, form_msg),

        AppMessage::Modal(modal_msg) => modal::update(app, modal_msg),

        AppMessage::GoBack => {
            if app.modal.is_open() {
                modal::update(app, ModalMessage::Close);
            } else if app.current_page.is_detail_page() {
                let busy = is_form_busy(app);
                navigation::close_form(app, busy);
                app.clear_status();
            } else if app.focus.is_content() {
                app.focus = FocusPanel::Navigation;
            }
        }

        AppMessage::Refresh => refresh(app),

        AppMessage::ShowHelp => app.modal.show_help(),

        AppMessage::ClearStatus => app.clear_status(),

        AppMessage::FormClosed { list_page, outcome } => form::closed(app, list_page, outcome),

        AppMessage::RoleSelectionClosed(outcome) => modal::role_selection_closed(app, outcome),

        AppMessage::Noop => {}
    }
}

fn is_form_busy(app: &App) -> bool {
    let policy = app
        .cleanup_policies
        .form
        .as_ref()
        .is_some_and(|form| form.machine().is_busy());
    let role = app
        .roles
        .form
        .as_ref()
        .is_some_and(|form| form.machine().is_busy());
    policy || role
}

/// Reload the current page; retries after a load failure
fn refresh(app: &mut App) {
    match app.current_page {
        Page::Home => {}
        page @ (Page::CleanupPolicies | Page::Roles | Page::LdapServers) => {
            refresh_list(app, page);
            app.set_status("Refreshing...");
        }
        Page::CleanupPolicyForm => {
            if let Some(form) = app.cleanup_policies.form.as_mut() {
                if form.machine().phase() == FormPhase::Error {
                    form.host.send(FormEvent::Retry);
                }
            }
        }
        Page::RoleForm => {
            if let Some(form) = app.roles.form.as_mut() {
                if form.machine().phase() == FormPhase::Error {
                    form.host.send(FormEvent::Retry);
                }
            }
        }
    }
}

/// Reload a list page, mounting it first if needed
pub(crate) fn refresh_list(app: &mut App, page: Page) {
    match page {
        Page::CleanupPolicies => {
            if !app.cleanup_policies.list.is_mounted() {
                app.cleanup_policies.list.mount(app.backend.cleanup_policy_list());
            } else {
                reload(&mut app.cleanup_policies.list);
            }
        }
        Page::Roles => {
            if !app.roles.list.is_mounted() {
                app.roles.list.mount(app.backend.role_list());
            } else {
                reload(&mut app.roles.list);
            }
        }
        Page::LdapServers => {
            if !app.ldap_servers.is_mounted() {
                app.ldap_servers.mount(app.backend.ldap_server_list());
            } else {
                reload(&mut app.ldap_servers);
            }
        }
        Page::Home | Page::CleanupPolicyForm | Page::RoleForm => {}
    }
}

fn reload<T: Listable>(list: &mut ListPageState<T>) {
    let phase = list.machine().map(ListMachine::phase);
    match phase {
        Some(ListPhase::Error) => list.send(ListEvent::Retry),
        Some(ListPhase::Loaded) => list.send(ListEvent::Refresh),
        Some(ListPhase::Loading) | None => {}
    }
}
