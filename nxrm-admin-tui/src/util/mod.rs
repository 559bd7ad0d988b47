//! Infrastructure with no business logic: terminal lifecycle and logging.
//!
//! `restore_terminal` must run whether the main loop succeeded or not,
//! otherwise the shell is left in raw mode.

mod logging;
mod terminal;

pub use logging::{default_log_path, init_logging};
pub use terminal::{init_terminal, restore_terminal, Term};
