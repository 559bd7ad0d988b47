//! Message layer: user actions and async completions as data
//!
//! The event layer translates terminal input into an `AppMessage`; completion
//! callbacks of mounted machines post `AppMessage`s through the application
//! channel. The update layer consumes both.
//!
//! Sub-messages keep the top-level enum small:
//! - `NavigationMessage`: left navigation panel
//! - `ContentMessage`: list pages
//! - `FormMessage`: form pages
//! - `ModalMessage`: the active modal

mod app;
mod content;
mod form;
mod modal;
mod navigation;

pub use app::AppMessage;
pub use content::ContentMessage;
pub use form::FormMessage;
pub use modal::ModalMessage;
pub use navigation::NavigationMessage;
