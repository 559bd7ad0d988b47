//! View state machines
//!
//! Every view owns one machine: an explicit phase enum plus context, changed
//! only by `Machine::update`. Remote work is requested through commands and
//! answered by completion events.

mod cleanup_policy;
mod collate;
mod form;
mod list;
pub mod pagination;
mod role_form;
mod role_selection;
pub mod validation;

pub use cleanup_policy::{
    CleanupPolicyDraft, CleanupPolicyEvent, CleanupPolicyExtras, CleanupPolicyField,
    CleanupPolicyForm, CleanupPolicyFormMachine, CleanupPolicyLoad,
};
pub use collate::{locale_cmp, matches_filter};
pub use form::{
    FormContext, FormDefinition, FormEvent, FormMachine, FormOutcome, FormPhase, FormRequest,
};
pub use list::{ListEvent, ListMachine, ListPhase, ListRequest, Listable};
pub use pagination::{PageInfo, PAGE_SIZE};
pub use role_form::{RoleDraft, RoleExtras, RoleField, RoleForm, RoleFormEvent, RoleFormMachine, RoleLoad};
pub use role_selection::{
    ListItem, RoleSelection, RoleSelectionEvent, RoleSelectionOutcome, SelectionRow,
};
