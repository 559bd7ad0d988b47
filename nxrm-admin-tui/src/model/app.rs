//! Application state

use nxrm_admin_core::types::LdapServer;
use tokio::sync::mpsc::UnboundedSender;

use super::{
    CleanupPoliciesState, FocusPanel, ListPageState, ModalState, NavigationState, Page, RolesState,
};
use crate::backend::Backend;
use crate::message::AppMessage;

/// Application state
pub struct App {
    pub should_quit: bool,

    pub focus: FocusPanel,

    pub navigation: NavigationState,

    pub current_page: Page,

    /// Status bar message
    pub status_message: Option<String>,

    /// Data source and feature flags
    pub backend: Backend,

    /// Channel completion callbacks post into
    pub messages: UnboundedSender<AppMessage>,

    // === Page state ===
    pub cleanup_policies: CleanupPoliciesState,
    pub roles: RolesState,
    pub ldap_servers: ListPageState<LdapServer>,

    pub modal: ModalState,
}

impl App {
    pub fn new(backend: Backend, messages: UnboundedSender<AppMessage>) -> Self {
        Self {
            should_quit: false,
            focus: FocusPanel::Navigation,
            navigation: NavigationState::new(),
            current_page: Page::Home,
            status_message: None,
            backend,
            messages,
            cleanup_policies: CleanupPoliciesState::new(),
            roles: RolesState::new(),
            ldap_servers: ListPageState::new(),
            modal: ModalState::new(),
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Feed arrived completions into every mounted machine.
    ///
    /// Returns the number of completions processed.
    pub fn pump(&mut self) -> usize {
        self.cleanup_policies.pump() + self.roles.pump() + self.ldap_servers.pump() + self.modal.pump()
    }
}
