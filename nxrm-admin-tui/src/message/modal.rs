//! Modal messages

/// Modal messages
#[derive(Debug, Clone)]
pub enum ModalMessage {
    /// Dismiss the modal
    Close,

    /// Confirm the focused choice
    Confirm,

    /// Switch between Cancel and Delete in the delete confirmation
    ToggleDeleteFocus,

    /// Switch between the filter input and the table
    ToggleFilterFocus,

    /// Type into the filter
    Input(char),

    Backspace,

    CursorUp,

    CursorDown,

    /// Check or uncheck the row under the cursor
    ToggleRow,

    NextPage,

    PreviousPage,
}
