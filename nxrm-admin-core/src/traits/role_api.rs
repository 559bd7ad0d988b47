//! Role remote API Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Role;

/// Security role endpoints
#[async_trait]
pub trait RoleApi: Send + Sync {
    /// List all roles
    async fn list(&self) -> CoreResult<Vec<Role>>;

    /// Get a role by id
    async fn get(&self, id: &str) -> CoreResult<Role>;

    /// Create a role
    async fn create(&self, role: &Role) -> CoreResult<()>;

    /// Replace an existing role
    ///
    /// # Arguments
    /// * `id` - Id of the role to update
    /// * `role` - New role data
    async fn update(&self, id: &str, role: &Role) -> CoreResult<()>;

    /// Delete a role
    async fn delete(&self, id: &str) -> CoreResult<()>;
}
