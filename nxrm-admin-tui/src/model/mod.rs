//! Model layer: application state
//!
//! The model is the single source of truth the view reads from. It holds
//! plain data plus the hosts of the mounted core machines; every change goes
//! through the update layer.
//!
//! - `App`: root state (focus, navigation, current page, page states, modal)
//! - `FocusPanel`: navigation or content panel
//! - `NavigationState`: left panel items and selection
//! - `Page`: which page is shown; a plain route, no data
//! - `state`: per-page containers owning the mounted machine hosts
//!
//! `Page` is the room number, `state` is what is in the room: switching
//! pages mounts or unmounts the page's machine, the machine itself holds
//! the data and phase.

mod app;
mod focus;
mod navigation;
mod page;
pub mod state;

pub use app::App;
pub use focus::FocusPanel;
pub use navigation::{NavItem, NavItemId, NavigationState};
pub use page::Page;
pub use state::{
    CleanupPoliciesState, DeleteTarget, ListPageState, Modal, ModalState, PolicyFormRow,
    PolicyFormState, RoleFormRow, RoleFormState, RolesState,
};
