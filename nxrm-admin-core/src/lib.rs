//! Repository Manager Admin Core Library
//!
//! Provides the platform-independent half of the admin console:
//! - Wire types for cleanup policies, roles and LDAP servers
//! - Remote API traits plus an HTTP client and an in-memory adapter
//! - View state machines (explicit state enums with pure `update` reducers)
//! - The runtime host that executes machine side effects and feeds the
//!   completion events back into the owning machine
//!
//! A front-end mounts one [`runtime::Host`] per page or modal, turns user
//! input into machine events and renders from the machine state.

pub mod adapters;
pub mod client;
pub mod error;
pub mod executors;
pub mod machine;
pub mod runtime;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use runtime::{Command, Executor, Host, Machine};
pub use traits::{CleanupPolicyApi, LdapServerApi, RoleApi};
pub use types::FeatureFlags;
