//! Modal state

use nxrm_admin_core::machine::RoleSelection;
use nxrm_admin_core::Host;

/// What a delete confirmation removes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    /// The policy open in the form
    CleanupPolicyForm,
    /// The role open in the form
    RoleForm,
    /// An LDAP server in the list, by id
    LdapServer(String),
}

impl DeleteTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CleanupPolicyForm => "cleanup policy",
            Self::RoleForm => "role",
            Self::LdapServer(_) => "LDAP server",
        }
    }
}

/// Modal variants; each carries all of its own data
pub enum Modal {
    /// Delete confirmation
    ConfirmDelete {
        target: DeleteTarget,
        item_name: String,
        /// 0 = Cancel, 1 = Delete
        focus: usize,
    },
    /// Contained-role picker of the role form
    RoleSelection {
        host: Host<RoleSelection>,
        /// Keystrokes go to the filter
        filter_focused: bool,
    },
    Help,
    Error { title: String, message: String },
}

/// Modal container
#[derive(Default)]
pub struct ModalState {
    pub active: Option<Modal>,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, modal: Modal) {
        self.close();
        self.active = Some(modal);
    }

    /// Close the active modal, unmounting its machine if it has one
    pub fn close(&mut self) {
        if let Some(Modal::RoleSelection { host, .. }) = self.active.take() {
            host.unmount();
        }
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn show_confirm_delete(&mut self, target: DeleteTarget, item_name: &str) {
        self.show(Modal::ConfirmDelete {
            target,
            item_name: item_name.to_string(),
            focus: 0,
        });
    }

    pub fn show_role_selection(&mut self, host: Host<RoleSelection>) {
        self.show(Modal::RoleSelection {
            host,
            filter_focused: true,
        });
    }

    pub fn show_error(&mut self, title: &str, message: &str) {
        self.show(Modal::Error {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    pub fn show_help(&mut self) {
        self.show(Modal::Help);
    }

    pub fn pump(&mut self) -> usize {
        match self.active.as_mut() {
            Some(Modal::RoleSelection { host, .. }) => host.pump(),
            _ => 0,
        }
    }
}
