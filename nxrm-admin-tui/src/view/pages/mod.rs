pub mod cleanup_policies;
pub mod cleanup_policy_form;
pub mod home;
pub mod ldap_servers;
pub mod role_form;
pub mod roles;
