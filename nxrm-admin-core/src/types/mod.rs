//! Data type definition

mod cleanup_policy;
mod feature_flags;
mod ldap_server;
mod role;

pub use cleanup_policy::{CleanupPolicy, Criterion, FormatCriteria, ReleaseType, MAVEN_FORMAT};
pub use feature_flags::FeatureFlags;
pub use ldap_server::{
    matching_template, user_and_group_templates, AuthScheme, GroupType, LdapProtocol, LdapServer,
    UserAndGroupTemplate,
};
pub use role::Role;
