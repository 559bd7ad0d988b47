//! Main application message

use nxrm_admin_core::machine::{FormOutcome, RoleSelectionOutcome};

use super::{ContentMessage, FormMessage, ModalMessage, NavigationMessage};
use crate::model::Page;

/// Main application message
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Quit the application
    Quit,

    /// Switch focus between the navigation and content panels
    ToggleFocus,

    /// Navigation panel
    Navigation(NavigationMessage),

    /// List pages
    Content(ContentMessage),

    /// Form pages
    Form(FormMessage),

    /// Active modal
    Modal(ModalMessage),

    /// Leave the current detail page
    GoBack,

    /// Reload the current page (retry after a load failure)
    Refresh,

    ShowHelp,

    ClearStatus,

    /// A form reached its terminal state
    FormClosed { list_page: Page, outcome: FormOutcome },

    /// The role selection modal was confirmed or dismissed
    RoleSelectionClosed(RoleSelectionOutcome),

    /// Ignored input
    Noop,
}
