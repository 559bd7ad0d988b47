//! API adapters that do not talk to a server

mod in_memory;
mod sample;

pub use in_memory::InMemoryAdminApi;
pub use sample::{sample_cleanup_policies, sample_format_criteria, sample_ldap_servers, sample_roles};
