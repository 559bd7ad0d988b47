//! Role selection modal
//!
//! The modal edits a working copy (`temp_selected_roles`) of the committed
//! selection. Confirm hands the working copy to the host; cancel drops it.

use std::collections::BTreeSet;
use std::convert::Infallible;

use super::collate::{locale_cmp, matches_filter};
use super::pagination::{is_valid_page, page_slice, PageInfo};
use crate::runtime::{Command, Commands, Machine};
use crate::types::Role;

/// Selectable row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<&Role> for ListItem {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id.clone(),
            name: role.name.clone(),
            description: role.description.clone(),
        }
    }
}

/// Row as rendered: `is_selected` groups rows, `is_checked` drives the checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRow<'a> {
    pub item: &'a ListItem,
    pub is_selected: bool,
    pub is_checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSelectionEvent {
    /// Toggle one id in the working copy
    SelectRole(String),
    /// Toggle the row under the cursor
    ToggleCursor,
    Filter(String),
    ChangePage(usize),
    NextPage,
    PreviousPage,
    CursorDown,
    CursorUp,
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSelectionOutcome {
    Confirmed(Vec<String>),
    Cancelled,
}

/// Role selection state machine
#[derive(Debug, Clone)]
pub struct RoleSelection {
    items: Vec<ListItem>,
    selected_roles: BTreeSet<String>,
    temp_selected_roles: BTreeSet<String>,
    filter: String,
    filtered_data: Vec<ListItem>,
    offset_page: usize,
    cursor: usize,
    closed: bool,
}

impl RoleSelection {
    /// # Arguments
    /// * `items` - Every selectable role
    /// * `selected_roles` - Ids currently committed on the owning form
    pub fn new(items: Vec<ListItem>, selected_roles: impl IntoIterator<Item = String>) -> Self {
        let selected_roles: BTreeSet<String> = selected_roles.into_iter().collect();
        let mut machine = Self {
            items,
            temp_selected_roles: selected_roles.clone(),
            selected_roles,
            filter: String::new(),
            filtered_data: Vec::new(),
            offset_page: 0,
            cursor: 0,
            closed: false,
        };
        machine.refilter();
        machine
    }

    pub fn from_roles(roles: &[Role], selected_roles: impl IntoIterator<Item = String>) -> Self {
        Self::new(roles.iter().map(ListItem::from).collect(), selected_roles)
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn selected_roles(&self) -> &BTreeSet<String> {
        &self.selected_roles
    }

    pub fn temp_selected_roles(&self) -> &BTreeSet<String> {
        &self.temp_selected_roles
    }

    /// Matching items, selected first
    pub fn filtered_data(&self) -> &[ListItem] {
        &self.filtered_data
    }

    pub fn offset_page(&self) -> usize {
        self.offset_page
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.offset_page, self.filtered_data.len())
    }

    pub fn pages(&self) -> usize {
        self.page_info().pages
    }

    pub fn lower_bound(&self) -> usize {
        self.page_info().lower_bound()
    }

    pub fn upper_bound(&self) -> usize {
        self.page_info().upper_bound()
    }

    /// Cursor position within the current page
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of ids in the working copy; drives the counter style
    pub fn selection_count(&self) -> usize {
        self.temp_selected_roles.len()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_roles.contains(id)
    }

    /// Rows of the current page
    pub fn page_rows(&self) -> Vec<SelectionRow<'_>> {
        page_slice(&self.filtered_data, self.offset_page)
            .iter()
            .map(|item| SelectionRow {
                item,
                is_selected: self.is_selected(&item.id),
                is_checked: self.temp_selected_roles.contains(&item.id),
            })
            .collect()
    }

    fn refilter(&mut self) {
        let mut filtered: Vec<ListItem> = self
            .items
            .iter()
            .filter(|item| matches_filter(&item.name, &self.filter))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| {
            self.is_selected(&b.id)
                .cmp(&self.is_selected(&a.id))
                .then_with(|| locale_cmp(&a.name, &b.name))
        });
        self.filtered_data = filtered;
    }

    fn toggle(&mut self, id: String) {
        if !self.temp_selected_roles.remove(&id) {
            self.temp_selected_roles.insert(id);
        }
    }

    fn rows_on_page(&self) -> usize {
        let info = self.page_info();
        info.upper_bound().saturating_sub(info.lower_bound())
    }

    fn change_page(&mut self, page: usize) {
        if is_valid_page(page, self.filtered_data.len()) {
            self.offset_page = page;
            self.cursor = 0;
        } else {
            log::debug!(
                "Page {page} rejected, {} page(s) available",
                self.pages()
            );
        }
    }
}

impl Machine for RoleSelection {
    type Event = RoleSelectionEvent;
    type Request = Infallible;
    type Output = RoleSelectionOutcome;

    fn update(&mut self, event: RoleSelectionEvent) -> Commands<Self> {
        if self.closed {
            log::debug!("Role selection already closed, ignoring {event:?}");
            return Vec::new();
        }
        match event {
            RoleSelectionEvent::SelectRole(id) => self.toggle(id),
            RoleSelectionEvent::ToggleCursor => {
                let index = self.lower_bound() + self.cursor;
                if let Some(item) = self.filtered_data.get(index) {
                    let id = item.id.clone();
                    self.toggle(id);
                }
            }
            RoleSelectionEvent::Filter(text) => {
                self.filter = text;
                self.offset_page = 0;
                self.cursor = 0;
                self.refilter();
            }
            RoleSelectionEvent::ChangePage(page) => self.change_page(page),
            RoleSelectionEvent::NextPage => self.change_page(self.offset_page + 1),
            RoleSelectionEvent::PreviousPage => {
                if let Some(page) = self.offset_page.checked_sub(1) {
                    self.change_page(page);
                }
            }
            RoleSelectionEvent::CursorDown => {
                if self.cursor + 1 < self.rows_on_page() {
                    self.cursor += 1;
                }
            }
            RoleSelectionEvent::CursorUp => self.cursor = self.cursor.saturating_sub(1),
            RoleSelectionEvent::Confirm => {
                self.selected_roles.clone_from(&self.temp_selected_roles);
                self.closed = true;
                let ids = self.selected_roles.iter().cloned().collect();
                return vec![Command::Notify(RoleSelectionOutcome::Confirmed(ids))];
            }
            RoleSelectionEvent::Cancel => {
                self.temp_selected_roles.clone_from(&self.selected_roles);
                self.closed = true;
                return vec![Command::Notify(RoleSelectionOutcome::Cancelled)];
            }
        }
        Vec::new()
    }
}
