//! Role pages state

use nxrm_admin_core::machine::{RoleField, RoleFormMachine};
use nxrm_admin_core::types::Role;
use nxrm_admin_core::Host;

use super::ListPageState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleFormRow {
    Id,
    Name,
    Description,
    /// Contained roles, edited through the selection modal
    Roles,
}

impl RoleFormRow {
    pub const ALL: [RoleFormRow; 4] = [Self::Id, Self::Name, Self::Description, Self::Roles];

    pub fn label(self) -> &'static str {
        match self {
            Self::Id => "Role ID",
            Self::Name => "Role Name",
            Self::Description => "Description",
            Self::Roles => "Contained Roles",
        }
    }

    pub fn field(self) -> Option<RoleField> {
        match self {
            Self::Id => Some(RoleField::Id),
            Self::Name => Some(RoleField::Name),
            Self::Description => Some(RoleField::Description),
            Self::Roles => None,
        }
    }
}

/// Mounted role form
pub struct RoleFormState {
    pub host: Host<RoleFormMachine>,
    pub focus: RoleFormRow,
}

impl RoleFormState {
    pub fn new(host: Host<RoleFormMachine>) -> Self {
        Self {
            host,
            focus: RoleFormRow::Id,
        }
    }

    pub fn machine(&self) -> &RoleFormMachine {
        self.host.machine()
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_previous(&mut self) {
        self.move_focus(RoleFormRow::ALL.len() - 1);
    }

    fn move_focus(&mut self, step: usize) {
        let rows = RoleFormRow::ALL;
        let current = rows.iter().position(|row| *row == self.focus).unwrap_or(0);
        self.focus = rows[(current + step) % rows.len()];
    }
}

/// Role list and form
#[derive(Default)]
pub struct RolesState {
    pub list: ListPageState<Role>,
    pub form: Option<RoleFormState>,
}

impl RolesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close_form(&mut self) {
        if let Some(form) = self.form.take() {
            form.host.unmount();
        }
    }

    pub fn pump(&mut self) -> usize {
        let form = self.form.as_mut().map_or(0, |form| form.host.pump());
        self.list.pump() + form
    }
}
