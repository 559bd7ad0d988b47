//! Generic list page machine

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt::Debug;

use super::collate::{locale_cmp, matches_filter};
use super::pagination::{is_valid_page, page_slice, PageInfo};
use crate::runtime::{Command, Commands, Machine};
use crate::types::{CleanupPolicy, LdapServer, Role};

/// Item shown by a [`ListMachine`]
pub trait Listable: Clone + Debug + Send + 'static {
    /// Resource name used in log messages
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// Natural display order
    fn display_cmp(&self, other: &Self) -> Ordering {
        locale_cmp(self.name(), other.name())
    }
}

impl Listable for CleanupPolicy {
    const KIND: &'static str = "Cleanup policy";

    fn id(&self) -> &str {
        &self.name
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Listable for Role {
    const KIND: &'static str = "Role";

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Listable for LdapServer {
    const KIND: &'static str = "LDAP server";

    fn id(&self) -> &str {
        &self.name
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn display_cmp(&self, other: &Self) -> Ordering {
        self.order
            .cmp(&other.order)
            .then_with(|| locale_cmp(&self.name, &other.name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Loading,
    Loaded,
    Error,
}

#[derive(Debug)]
pub enum ListEvent<T> {
    LoadSucceeded(Vec<T>),
    LoadFailed(String),
    Retry,
    Refresh,
    Filter(String),
    ChangePage(usize),
    NextPage,
    PreviousPage,
    SelectNext,
    SelectPrevious,
    /// Delete an item after the user confirmed
    ConfirmDelete(String),
    /// Item removed (by this list or by a form)
    Deleted(String),
    DeleteFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRequest {
    Load,
    Delete { id: String },
}

/// List page state machine
#[derive(Debug, Clone)]
pub struct ListMachine<T: Listable> {
    phase: ListPhase,
    items: Vec<T>,
    filter: String,
    filtered: Vec<T>,
    offset_page: usize,
    cursor: usize,
    load_error: Option<String>,
    action_error: Option<String>,
    deleting: Option<String>,
}

impl<T: Listable> Default for ListMachine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Listable> ListMachine<T> {
    pub fn new() -> Self {
        Self {
            phase: ListPhase::Loading,
            items: Vec::new(),
            filter: String::new(),
            filtered: Vec::new(),
            offset_page: 0,
            cursor: 0,
            load_error: None,
            action_error: None,
            deleting: None,
        }
    }

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Failure of the last delete
    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    /// Id of the item being deleted
    pub fn deleting(&self) -> Option<&str> {
        self.deleting.as_deref()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Matching items in display order
    pub fn filtered(&self) -> &[T] {
        &self.filtered
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(self.offset_page, self.filtered.len())
    }

    pub fn page_rows(&self) -> &[T] {
        page_slice(&self.filtered, self.offset_page)
    }

    /// Cursor position within the page
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Item under the cursor
    pub fn selected(&self) -> Option<&T> {
        self.page_rows().get(self.cursor)
    }

    fn load(&mut self) -> Commands<Self> {
        self.phase = ListPhase::Loading;
        self.load_error = None;
        vec![Command::Request(ListRequest::Load)]
    }

    fn refilter(&mut self) {
        let mut filtered: Vec<T> = self
            .items
            .iter()
            .filter(|item| matches_filter(item.name(), &self.filter))
            .cloned()
            .collect();
        filtered.sort_by(T::display_cmp);
        self.filtered = filtered;

        let info = self.page_info();
        if !is_valid_page(self.offset_page, info.total) {
            self.offset_page = info.pages - 1;
        }
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let rows = self.page_rows().len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }

    fn change_page(&mut self, page: usize) {
        if is_valid_page(page, self.filtered.len()) {
            self.offset_page = page;
            self.cursor = 0;
        } else {
            log::debug!("{} list rejected page {page}", T::KIND);
        }
    }
}

impl<T: Listable> Machine for ListMachine<T> {
    type Event = ListEvent<T>;
    type Request = ListRequest;
    type Output = Infallible;

    fn start(&mut self) -> Commands<Self> {
        self.load()
    }

    fn update(&mut self, event: ListEvent<T>) -> Commands<Self> {
        match event {
            ListEvent::LoadSucceeded(items) => {
                self.items = items;
                self.phase = ListPhase::Loaded;
                self.refilter();
            }
            ListEvent::LoadFailed(message) => {
                self.load_error = Some(message);
                self.phase = ListPhase::Error;
            }
            ListEvent::Retry if self.phase == ListPhase::Error => return self.load(),
            ListEvent::Refresh if self.phase != ListPhase::Loading => {
                self.action_error = None;
                return self.load();
            }
            ListEvent::Retry | ListEvent::Refresh => {
                log::debug!("{} list ignored reload in phase {:?}", T::KIND, self.phase);
            }
            ListEvent::Filter(text) => {
                self.filter = text;
                self.offset_page = 0;
                self.cursor = 0;
                self.refilter();
            }
            ListEvent::ChangePage(page) => self.change_page(page),
            ListEvent::NextPage => self.change_page(self.offset_page + 1),
            ListEvent::PreviousPage => {
                if let Some(page) = self.offset_page.checked_sub(1) {
                    self.change_page(page);
                }
            }
            ListEvent::SelectNext => {
                if self.cursor + 1 < self.page_rows().len() {
                    self.cursor += 1;
                }
            }
            ListEvent::SelectPrevious => self.cursor = self.cursor.saturating_sub(1),
            ListEvent::ConfirmDelete(id) => {
                if self.phase != ListPhase::Loaded || self.deleting.is_some() {
                    log::debug!("{} list busy, delete of {id} ignored", T::KIND);
                    return Vec::new();
                }
                self.action_error = None;
                self.deleting = Some(id.clone());
                return vec![Command::Request(ListRequest::Delete { id })];
            }
            ListEvent::Deleted(id) => {
                if self.deleting.as_deref() == Some(id.as_str()) {
                    self.deleting = None;
                }
                self.items.retain(|item| item.id() != id);
                self.refilter();
            }
            ListEvent::DeleteFailed(message) => {
                self.deleting = None;
                self.action_error = Some(message);
            }
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{cleanup_policy, ldap_servers};

    fn loaded<T: Listable>(items: Vec<T>) -> ListMachine<T> {
        let mut machine = ListMachine::new();
        assert_eq!(machine.start(), vec![Command::Request(ListRequest::Load)]);
        machine.update(ListEvent::LoadSucceeded(items));
        machine
    }

    fn policies(count: usize) -> Vec<CleanupPolicy> {
        (0..count)
            .map(|i| cleanup_policy(&format!("policy-{i:02}"), "npm"))
            .collect()
    }

    #[test]
    fn ldap_servers_sort_by_order() {
        let machine = loaded(ldap_servers());
        let orders: Vec<u32> = machine.filtered().iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn load_failure_then_retry() {
        let mut machine: ListMachine<Role> = ListMachine::new();
        machine.start();
        machine.update(ListEvent::LoadFailed("offline".to_string()));
        assert_eq!(machine.phase(), ListPhase::Error);
        assert_eq!(machine.load_error(), Some("offline"));

        let commands = machine.update(ListEvent::Retry);
        assert_eq!(commands, vec![Command::Request(ListRequest::Load)]);
        assert!(machine.is_loading());
        assert!(machine.update(ListEvent::Refresh).is_empty());
    }

    #[test]
    fn filter_and_pages() {
        let mut machine = loaded(policies(23));
        assert_eq!(machine.page_info().pages, 3);

        machine.update(ListEvent::ChangePage(5));
        assert_eq!(machine.page_info().offset_page, 0);
        machine.update(ListEvent::ChangePage(2));
        assert_eq!(machine.page_rows().len(), 3);

        machine.update(ListEvent::Filter("POLICY-1".to_string()));
        assert_eq!(machine.page_info().offset_page, 0);
        assert_eq!(machine.filtered().len(), 10);
    }

    #[test]
    fn cursor_stays_on_the_page() {
        let mut machine = loaded(policies(12));
        for _ in 0..15 {
            machine.update(ListEvent::SelectNext);
        }
        assert_eq!(machine.cursor(), 9);
        assert_eq!(machine.selected().map(|p| p.name.as_str()), Some("policy-09"));

        machine.update(ListEvent::NextPage);
        assert_eq!(machine.cursor(), 0);
        assert_eq!(machine.selected().map(|p| p.name.as_str()), Some("policy-10"));
    }

    #[test]
    fn delete_removes_the_item() {
        let mut machine = loaded(policies(11));
        machine.update(ListEvent::ChangePage(1));

        let commands = machine.update(ListEvent::ConfirmDelete("policy-10".to_string()));
        assert_eq!(
            commands,
            vec![Command::Request(ListRequest::Delete {
                id: "policy-10".to_string()
            })]
        );
        assert!(machine
            .update(ListEvent::ConfirmDelete("policy-01".to_string()))
            .is_empty());

        machine.update(ListEvent::Deleted("policy-10".to_string()));
        assert_eq!(machine.deleting(), None);
        assert_eq!(machine.items().len(), 10);
        assert_eq!(machine.page_info().offset_page, 0);
    }

    #[test]
    fn delete_failure_is_reported() {
        let mut machine = loaded(ldap_servers());
        machine.update(ListEvent::ConfirmDelete("test #1".to_string()));
        machine.update(ListEvent::DeleteFailed("in use".to_string()));
        assert_eq!(machine.action_error(), Some("in use"));
        assert_eq!(machine.items().len(), 3);
    }
}
