//! Navigation panel state

use super::Page;

/// Navigation item id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItemId {
    Home,
    CleanupPolicies,
    Roles,
    LdapServers,
}

impl NavItemId {
    pub fn page(self) -> Page {
        match self {
            Self::Home => Page::Home,
            Self::CleanupPolicies => Page::CleanupPolicies,
            Self::Roles => Page::Roles,
            Self::LdapServers => Page::LdapServers,
        }
    }
}

/// Navigation item
#[derive(Debug, Clone)]
pub struct NavItem {
    pub id: NavItemId,
    pub label: &'static str,
    pub icon: &'static str,
}

/// Navigation state
pub struct NavigationState {
    pub items: Vec<NavItem>,
    /// Index of the highlighted item
    pub selected: usize,
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            items: vec![
                NavItem {
                    id: NavItemId::Home,
                    label: "Home",
                    icon: "⌂",
                },
                NavItem {
                    id: NavItemId::CleanupPolicies,
                    label: "Cleanup Policies",
                    icon: "♻",
                },
                NavItem {
                    id: NavItemId::Roles,
                    label: "Roles",
                    icon: "@",
                },
                NavItem {
                    id: NavItemId::LdapServers,
                    label: "LDAP Servers",
                    icon: "≡",
                },
            ],
            selected: 0,
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn select_next(&mut self) {
        if self.selected < self.items.len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    pub fn current_item(&self) -> Option<&NavItem> {
        self.items.get(self.selected)
    }

    pub fn current_id(&self) -> Option<NavItemId> {
        self.current_item().map(|item| item.id)
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}
