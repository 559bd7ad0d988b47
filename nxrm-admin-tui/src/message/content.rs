//! List page messages

/// List page messages
#[derive(Debug, Clone)]
pub enum ContentMessage {
    // ========== Cursor and pages ==========
    SelectPrevious,
    SelectNext,
    NextPage,
    PreviousPage,

    // ========== Filter ==========
    /// Start typing into the filter
    StartFilter,
    FilterInput(char),
    FilterBackspace,
    /// Stop typing, keep the filter
    FinishFilter,
    /// Drop the filter text
    ClearFilter,

    // ========== Actions ==========
    /// Open the selected item
    Edit,
    /// Open an empty form
    Add,
    /// Ask to delete the selected item
    Delete,
}
