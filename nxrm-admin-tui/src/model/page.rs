//! Page routing

/// Pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    CleanupPolicies,
    /// Create or edit a cleanup policy
    CleanupPolicyForm,
    Roles,
    /// Create or edit a role
    RoleForm,
    LdapServers,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::CleanupPolicies => "Cleanup Policies",
            Self::CleanupPolicyForm => "Cleanup Policy",
            Self::Roles => "Roles",
            Self::RoleForm => "Role",
            Self::LdapServers => "LDAP Servers",
        }
    }

    /// Form pages return to their list with Esc
    pub fn is_detail_page(self) -> bool {
        matches!(self, Self::CleanupPolicyForm | Self::RoleForm)
    }

    /// List a detail page returns to
    pub fn parent(self) -> Self {
        match self {
            Self::CleanupPolicyForm => Self::CleanupPolicies,
            Self::RoleForm => Self::Roles,
            other => other,
        }
    }
}
