//! List page updates

use nxrm_admin_core::machine::{ListEvent, Listable};

use super::navigation::{open_policy_form, open_role_form};
use crate::message::ContentMessage;
use crate::model::{App, DeleteTarget, ListPageState, Page};

/// Handle a list page message
pub fn update(app: &mut App, msg: ContentMessage) {
    match app.current_page {
        Page::CleanupPolicies => {
            if !update_list(&mut app.cleanup_policies.list, &msg) {
                cleanup_policy_action(app, msg);
            }
        }
        Page::Roles => {
            if !update_list(&mut app.roles.list, &msg) {
                role_action(app, msg);
            }
        }
        Page::LdapServers => {
            if !update_list(&mut app.ldap_servers, &msg) {
                ldap_server_action(app, msg);
            }
        }
        Page::Home | Page::CleanupPolicyForm | Page::RoleForm => {}
    }
}

/// Cursor, page and filter handling shared by every list.
///
/// Returns `false` for page-specific actions.
fn update_list<T: Listable>(list: &mut ListPageState<T>, msg: &ContentMessage) -> bool {
    match msg {
        ContentMessage::SelectPrevious => list.send(ListEvent::SelectPrevious),
        ContentMessage::SelectNext => list.send(ListEvent::SelectNext),
        ContentMessage::NextPage => list.send(ListEvent::NextPage),
        ContentMessage::PreviousPage => list.send(ListEvent::PreviousPage),
        ContentMessage::StartFilter => list.filtering = list.is_mounted(),
        ContentMessage::FilterInput(ch) => {
            let mut text = current_filter(list);
            text.push(*ch);
            list.send(ListEvent::Filter(text));
        }
        ContentMessage::FilterBackspace => {
            let mut text = current_filter(list);
            if text.pop().is_some() {
                list.send(ListEvent::Filter(text));
            }
        }
        ContentMessage::FinishFilter => list.filtering = false,
        ContentMessage::ClearFilter => {
            list.filtering = false;
            if !current_filter(list).is_empty() {
                list.send(ListEvent::Filter(String::new()));
            }
        }
        ContentMessage::Edit | ContentMessage::Add | ContentMessage::Delete => return false,
    }
    true
}

fn current_filter<T: Listable>(list: &ListPageState<T>) -> String {
    list.machine()
        .map(|machine| machine.filter().to_string())
        .unwrap_or_default()
}

fn cleanup_policy_action(app: &mut App, msg: ContentMessage) {
    match msg {
        ContentMessage::Edit => {
            if let Some(policy) = app.cleanup_policies.list.selected() {
                open_policy_form(app, Some(policy.name));
            }
        }
        ContentMessage::Add => open_policy_form(app, None),
        ContentMessage::Delete => app.set_status("Open a policy with Enter to delete it"),
        _ => {}
    }
}

fn role_action(app: &mut App, msg: ContentMessage) {
    match msg {
        ContentMessage::Edit => {
            if let Some(role) = app.roles.list.selected() {
                open_role_form(app, Some(role.id));
            }
        }
        ContentMessage::Add => open_role_form(app, None),
        ContentMessage::Delete => app.set_status("Open a role with Enter to delete it"),
        _ => {}
    }
}

fn ldap_server_action(app: &mut App, msg: ContentMessage) {
    match msg {
        ContentMessage::Delete => {
            let Some(server) = app.ldap_servers.selected() else {
                return;
            };
            if app
                .ldap_servers
                .machine()
                .is_some_and(|machine| machine.deleting().is_some())
            {
                app.set_status("A delete is already in progress");
                return;
            }
            app.modal
                .show_confirm_delete(DeleteTarget::LdapServer(server.id().to_string()), &server.name);
        }
        ContentMessage::Edit | ContentMessage::Add => {
            app.set_status("LDAP servers are managed in the web console");
        }
        _ => {}
    }
}
