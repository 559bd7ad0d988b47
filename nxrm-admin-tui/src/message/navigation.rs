//! Navigation messages

/// Navigation messages
#[derive(Debug, Clone)]
pub enum NavigationMessage {
    SelectPrevious,
    SelectNext,
    /// Open the selected page
    Confirm,
    SelectFirst,
    SelectLast,
}
