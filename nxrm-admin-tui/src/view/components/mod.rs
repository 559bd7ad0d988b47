//! Reusable view components

pub mod checkbox_group;
pub mod form;
pub mod modal;
pub mod navigation;
pub mod statusbar;
pub mod table;
