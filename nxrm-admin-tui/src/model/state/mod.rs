//! Page state
//!
//! Each page keeps the host of the machine it mounted; the machine owns the
//! page data, the state here only adds terminal input concerns (focus,
//! filter typing).

mod cleanup_policies;
mod list;
mod modal;
mod roles;

pub use cleanup_policies::{CleanupPoliciesState, PolicyFormRow, PolicyFormState};
pub use list::ListPageState;
pub use modal::{DeleteTarget, Modal, ModalState};
pub use roles::{RoleFormRow, RoleFormState, RolesState};
