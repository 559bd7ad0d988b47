//! Remote API abstraction trait definition

mod cleanup_policy_api;
mod ldap_server_api;
mod role_api;

pub use cleanup_policy_api::CleanupPolicyApi;
pub use ldap_server_api::LdapServerApi;
pub use role_api::RoleApi;
