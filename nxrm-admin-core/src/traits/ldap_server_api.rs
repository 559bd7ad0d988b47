//! LDAP server remote API Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::LdapServer;

/// LDAP server endpoints
#[async_trait]
pub trait LdapServerApi: Send + Sync {
    /// List configured servers (unordered)
    async fn list(&self) -> CoreResult<Vec<LdapServer>>;

    /// Delete a server by name
    async fn delete(&self, name: &str) -> CoreResult<()>;
}
