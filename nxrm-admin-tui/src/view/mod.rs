//! View layer: render the model into the terminal
//!
//! Rendering only reads `App`; nothing here changes state.

pub mod components;
mod layout;
pub mod pages;
pub mod theme;

pub use layout::render;
