//! Cleanup policy remote API Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{CleanupPolicy, FormatCriteria};

/// Cleanup policy endpoints
///
/// Implementations:
/// - `NexusClient` (HTTP)
/// - `InMemoryAdminApi` (demo mode, tests)
#[async_trait]
pub trait CleanupPolicyApi: Send + Sync {
    /// List all policies
    async fn list(&self) -> CoreResult<Vec<CleanupPolicy>>;

    /// Get a policy by name
    ///
    /// # Arguments
    /// * `name` - Policy name (the policy's identifier)
    async fn get(&self, name: &str) -> CoreResult<CleanupPolicy>;

    /// Criteria supported by each repository format
    async fn criteria_by_format(&self) -> CoreResult<Vec<FormatCriteria>>;

    /// Create a policy
    async fn create(&self, policy: &CleanupPolicy) -> CoreResult<()>;

    /// Replace an existing policy
    ///
    /// # Arguments
    /// * `name` - Name of the policy to update
    /// * `policy` - New policy data
    async fn update(&self, name: &str, policy: &CleanupPolicy) -> CoreResult<()>;

    /// Delete a policy
    async fn delete(&self, name: &str) -> CoreResult<()>;
}
