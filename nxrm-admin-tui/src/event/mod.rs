//! Event layer: terminal input to messages
//!
//! Input is routed by context, first match wins:
//! 1. an open modal takes every key
//! 2. global bindings (quit, help, refresh)
//! 3. form pages, list filter typing
//! 4. the focused panel (navigation or content)
//!
//! The handler only reads the model; all changes happen in the update layer.

mod handler;
mod keymap;

pub use handler::{handle_event, poll_event};
pub use keymap::{DefaultKeymap, KeyBinding};
