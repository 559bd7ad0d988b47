//! Navigation and page switching

use crate::message::NavigationMessage;
use crate::model::{App, FocusPanel, Page, PolicyFormState, RoleFormState};

/// Handle a navigation panel message
pub fn update(app: &mut App, msg: NavigationMessage) {
    match msg {
        NavigationMessage::SelectPrevious => app.navigation.select_previous(),
        NavigationMessage::SelectNext => app.navigation.select_next(),
        NavigationMessage::SelectFirst => app.navigation.select_first(),
        NavigationMessage::SelectLast => app.navigation.select_last(),
        NavigationMessage::Confirm => {
            if let Some(id) = app.navigation.current_id() {
                open_page(app, id.page());
            }
        }
    }
}

/// Show a top-level page and mount its list machine.
///
/// Machines of the page being left are unmounted; their pending
/// completions are dropped.
pub fn open_page(app: &mut App, page: Page) {
    let page = page.parent();
    app.modal.close();
    app.cleanup_policies.close_form();
    app.roles.close_form();
    app.cleanup_policies.list.unmount();
    app.roles.list.unmount();
    app.ldap_servers.unmount();

    match page {
        Page::CleanupPolicies => app.cleanup_policies.list.mount(app.backend.cleanup_policy_list()),
        Page::Roles => app.roles.list.mount(app.backend.role_list()),
        Page::LdapServers => app.ldap_servers.mount(app.backend.ldap_server_list()),
        Page::Home | Page::CleanupPolicyForm | Page::RoleForm => {}
    }

    log::debug!("Opened page {}", page.title());
    app.current_page = page;
    app.clear_status();
    if page != Page::Home {
        app.focus = FocusPanel::Content;
    }
}

/// Open the cleanup policy form; `name` is `None` to create one
pub fn open_policy_form(app: &mut App, name: Option<String>) {
    let host = app.backend.cleanup_policy_form(name, app.messages.clone());
    app.cleanup_policies.close_form();
    app.cleanup_policies.form = Some(PolicyFormState::new(host));
    app.current_page = Page::CleanupPolicyForm;
    app.focus = FocusPanel::Content;
    app.clear_status();
}

/// Open the role form; `id` is `None` to create one
pub fn open_role_form(app: &mut App, id: Option<String>) {
    let host = app.backend.role_form(id, app.messages.clone());
    app.roles.close_form();
    app.roles.form = Some(RoleFormState::new(host));
    app.current_page = Page::RoleForm;
    app.focus = FocusPanel::Content;
    app.clear_status();
}

/// Leave the open form for its list, reloading the list if `refresh` is set
pub fn close_form(app: &mut App, refresh: bool) {
    if !app.current_page.is_detail_page() {
        return;
    }
    let list_page = app.current_page.parent();
    app.modal.close();
    app.cleanup_policies.close_form();
    app.roles.close_form();
    app.current_page = list_page;
    if refresh {
        super::refresh_list(app, list_page);
    }
}
