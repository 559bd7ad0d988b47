//! List page state

use nxrm_admin_core::machine::{ListEvent, ListMachine, Listable};
use nxrm_admin_core::Host;

/// State of one list page: the mounted list machine plus input mode
pub struct ListPageState<T: Listable> {
    /// Mounted while the page is shown
    pub host: Option<Host<ListMachine<T>>>,
    /// Keystrokes go to the filter
    pub filtering: bool,
}

impl<T: Listable> ListPageState<T> {
    pub fn new() -> Self {
        Self {
            host: None,
            filtering: false,
        }
    }

    pub fn machine(&self) -> Option<&ListMachine<T>> {
        self.host.as_ref().map(Host::machine)
    }

    /// Replace the mounted instance
    pub fn mount(&mut self, host: Host<ListMachine<T>>) {
        self.unmount();
        self.host = Some(host);
    }

    pub fn unmount(&mut self) {
        if let Some(host) = self.host.take() {
            host.unmount();
        }
        self.filtering = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.host.is_some()
    }

    /// Forward an event to the mounted machine
    pub fn send(&mut self, event: ListEvent<T>) {
        match self.host.as_mut() {
            Some(host) => host.send(event),
            None => log::debug!("{} list not mounted, event dropped", T::KIND),
        }
    }

    /// Selected item, cloned out of the machine
    pub fn selected(&self) -> Option<T> {
        self.machine().and_then(|machine| machine.selected().cloned())
    }

    pub fn pump(&mut self) -> usize {
        self.host.as_mut().map_or(0, Host::pump)
    }
}

impl<T: Listable> Default for ListPageState<T> {
    fn default() -> Self {
        Self::new()
    }
}
