//! Form page messages

/// Form page messages
#[derive(Debug, Clone)]
pub enum FormMessage {
    NextField,
    PrevField,
    /// Type into the focused text field
    Input(char),
    Backspace,
    /// Flip the focused checkbox
    Toggle,
    /// Previous value of the focused select
    PrevOption,
    /// Next value of the focused select
    NextOption,
    Save,
    /// Ask to delete the edited item
    Delete,
    /// Discard edits
    Reset,
    /// Open the role selection modal
    SelectRoles,
}
