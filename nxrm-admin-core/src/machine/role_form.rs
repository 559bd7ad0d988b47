//! Role form

use std::collections::BTreeMap;

use super::form::{FormDefinition, FormMachine};
use super::validation;
use crate::types::Role;

pub type RoleFormMachine = FormMachine<RoleForm>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoleField {
    Id,
    Name,
    Description,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleFormEvent {
    /// Contained roles committed by the role selection modal
    SetRoles(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDraft {
    pub id: String,
    pub name: String,
    pub description: String,
    pub roles: Vec<String>,
    /// Carried through unchanged
    pub privileges: Vec<String>,
    pub source: String,
    pub read_only: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RoleLoad {
    pub all_roles: Vec<Role>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default)]
pub struct RoleExtras {
    /// Candidates for the role selection modal
    pub all_roles: Vec<Role>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RoleForm;

impl FormDefinition for RoleForm {
    type Field = RoleField;
    type Data = RoleDraft;
    type Extras = RoleExtras;
    type Loaded = RoleLoad;
    type Event = RoleFormEvent;
    type Payload = Role;

    const KIND: &'static str = "Role";

    fn apply_loaded(&self, loaded: RoleLoad, _is_edit: bool) -> (RoleDraft, RoleExtras) {
        let draft = loaded.role.map_or_else(
            || RoleDraft {
                source: "default".to_string(),
                ..RoleDraft::default()
            },
            |role| RoleDraft {
                id: role.id,
                name: role.name,
                description: role.description,
                roles: role.roles,
                privileges: role.privileges,
                source: role.source,
                read_only: role.read_only,
            },
        );
        let extras = RoleExtras {
            all_roles: loaded.all_roles,
        };
        (draft, extras)
    }

    fn update_field(&self, data: &mut RoleDraft, field: RoleField, value: String) {
        match field {
            RoleField::Id => data.id = value,
            RoleField::Name => data.name = value,
            RoleField::Description => data.description = value,
        }
    }

    fn apply_event(&self, data: &mut RoleDraft, _extras: &RoleExtras, event: RoleFormEvent) {
        match event {
            RoleFormEvent::SetRoles(mut roles) => {
                roles.retain(|id| *id != data.id);
                roles.sort();
                roles.dedup();
                data.roles = roles;
            }
        }
    }

    fn validate(&self, data: &RoleDraft, _extras: &RoleExtras, _is_edit: bool) -> BTreeMap<RoleField, String> {
        let mut errors = BTreeMap::new();
        if let Some(error) = validation::name(&data.id) {
            errors.insert(RoleField::Id, error);
        }
        if let Some(error) = validation::required(&data.name) {
            errors.insert(RoleField::Name, error);
        }
        errors
    }

    fn to_payload(&self, data: &RoleDraft, _extras: &RoleExtras) -> Role {
        Role {
            id: data.id.trim().to_string(),
            name: data.name.trim().to_string(),
            description: data.description.clone(),
            source: data.source.clone(),
            read_only: data.read_only,
            privileges: data.privileges.clone(),
            roles: data.roles.clone(),
        }
    }

    fn is_immutable(&self, field: RoleField, is_edit: bool) -> bool {
        is_edit && field == RoleField::Id
    }
}

impl FormMachine<RoleForm> {
    /// Roles that may be contained by this one (everything but itself)
    pub fn selectable_roles(&self) -> Vec<Role> {
        let own_id = &self.data().id;
        self.extras()
            .all_roles
            .iter()
            .filter(|role| role.id != *own_id)
            .cloned()
            .collect()
    }

    /// Display names of the contained roles, unknown ids as-is
    pub fn contained_role_names(&self) -> Vec<String> {
        self.data()
            .roles
            .iter()
            .map(|id| {
                self.extras()
                    .all_roles
                    .iter()
                    .find(|role| role.id == *id)
                    .map_or_else(|| id.clone(), |role| role.name.clone())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::form::{FormEvent, FormRequest};
    use crate::runtime::{Command, Machine};
    use crate::test_utils::{role, sample_roles};

    fn mounted(existing: Option<Role>) -> RoleFormMachine {
        let item_id = existing.as_ref().map(|r| r.id.clone());
        let mut machine = FormMachine::new(RoleForm, item_id);
        machine.start();
        machine.update(FormEvent::LoadSucceeded(RoleLoad {
            all_roles: sample_roles(),
            role: existing,
        }));
        machine
    }

    #[test]
    fn create_requires_id_and_name() {
        let mut machine = mounted(None);
        assert!(machine.update(FormEvent::Submit).is_empty());
        assert!(machine.field_error(RoleField::Id).is_some());
        assert!(machine.field_error(RoleField::Name).is_some());

        machine.update(FormEvent::Update(RoleField::Id, "nx-deployer".to_string()));
        machine.update(FormEvent::Update(RoleField::Name, "Deployer".to_string()));
        let commands = machine.update(FormEvent::Submit);
        assert!(matches!(
            commands.as_slice(),
            [Command::Request(FormRequest::Save { item_id: None, payload })]
                if payload.id == "nx-deployer" && payload.source == "default"
        ));
    }

    #[test]
    fn selected_roles_land_in_the_payload() {
        let mut machine = mounted(Some(role("nx-dev", "Developer")));
        machine.update(FormEvent::Custom(RoleFormEvent::SetRoles(vec![
            "nx-anonymous".to_string(),
            "nx-dev".to_string(),
            "nx-admin".to_string(),
        ])));
        assert_eq!(machine.data().roles, vec!["nx-admin", "nx-anonymous"]);
        assert_eq!(
            machine.contained_role_names(),
            vec!["Administrator", "Anonymous"]
        );

        let commands = machine.update(FormEvent::Submit);
        assert!(matches!(
            commands.as_slice(),
            [Command::Request(FormRequest::Save { item_id: Some(id), payload })]
                if id == "nx-dev" && payload.roles.len() == 2
        ));
    }

    #[test]
    fn a_role_cannot_contain_itself() {
        let machine = mounted(Some(role("nx-admin", "Administrator")));
        assert!(machine
            .selectable_roles()
            .iter()
            .all(|candidate| candidate.id != "nx-admin"));
        assert!(machine.is_immutable(RoleField::Id));
    }
}
