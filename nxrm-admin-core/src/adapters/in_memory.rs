//! In-memory implementation of the remote API traits
//!
//! Backs demo mode and tests. Failures can be injected per operation kind and
//! every call is counted.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::sample;
use crate::error::{CoreError, CoreResult};
use crate::traits::{CleanupPolicyApi, LdapServerApi, RoleApi};
use crate::types::{CleanupPolicy, FormatCriteria, LdapServer, Role};

#[derive(Default)]
struct Failures {
    load: Option<CoreError>,
    save: Option<CoreError>,
    delete: Option<CoreError>,
}

#[derive(Default)]
struct CallCounters {
    loads: AtomicUsize,
    saves: AtomicUsize,
    deletes: AtomicUsize,
}

/// In-memory admin API
#[derive(Default)]
pub struct InMemoryAdminApi {
    policies: RwLock<BTreeMap<String, CleanupPolicy>>,
    format_criteria: RwLock<Vec<FormatCriteria>>,
    roles: RwLock<BTreeMap<String, Role>>,
    ldap_servers: RwLock<BTreeMap<String, LdapServer>>,
    failures: RwLock<Failures>,
    calls: CallCounters,
    latency: Option<Duration>,
}

impl InMemoryAdminApi {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the demo data set
    #[must_use]
    pub fn with_sample_data() -> Self {
        Self::new()
            .with_format_criteria(sample::sample_format_criteria())
            .with_policies(sample::sample_cleanup_policies())
            .with_roles(sample::sample_roles())
            .with_ldap_servers(sample::sample_ldap_servers())
    }

    #[must_use]
    pub fn with_policies(mut self, policies: Vec<CleanupPolicy>) -> Self {
        let store = self.policies.get_mut();
        for policy in policies {
            store.insert(policy.name.clone(), policy);
        }
        self
    }

    #[must_use]
    pub fn with_format_criteria(mut self, criteria: Vec<FormatCriteria>) -> Self {
        *self.format_criteria.get_mut() = criteria;
        self
    }

    #[must_use]
    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        let store = self.roles.get_mut();
        for role in roles {
            store.insert(role.id.clone(), role);
        }
        self
    }

    #[must_use]
    pub fn with_ldap_servers(mut self, servers: Vec<LdapServer>) -> Self {
        let store = self.ldap_servers.get_mut();
        for server in servers {
            store.insert(server.name.clone(), server);
        }
        self
    }

    /// Delay every call, so that busy states are visible in demo mode
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make every read fail with `error` (`None` restores normal behavior)
    pub async fn set_fail_load(&self, error: Option<CoreError>) {
        self.failures.write().await.load = error;
    }

    /// Make create/update fail with `error`
    pub async fn set_fail_save(&self, error: Option<CoreError>) {
        self.failures.write().await.save = error;
    }

    /// Make deletes fail with `error`
    pub async fn set_fail_delete(&self, error: Option<CoreError>) {
        self.failures.write().await.delete = error;
    }

    pub fn load_calls(&self) -> usize {
        self.calls.loads.load(Ordering::SeqCst)
    }

    pub fn save_calls(&self) -> usize {
        self.calls.saves.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.calls.deletes.load(Ordering::SeqCst)
    }

    async fn begin_load(&self) -> CoreResult<()> {
        self.calls.loads.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        match self.failures.read().await.load.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn begin_save(&self) -> CoreResult<()> {
        self.calls.saves.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        match self.failures.read().await.save.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn begin_delete(&self) -> CoreResult<()> {
        self.calls.deletes.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        match self.failures.read().await.delete.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

fn already_exists(kind: &str, id: &str) -> CoreError {
    CoreError::ApiError {
        status: 400,
        message: format!("{kind} '{id}' already exists"),
    }
}

#[async_trait]
impl CleanupPolicyApi for InMemoryAdminApi {
    async fn list(&self) -> CoreResult<Vec<CleanupPolicy>> {
        self.begin_load().await?;
        Ok(self.policies.read().await.values().cloned().collect())
    }

    async fn get(&self, name: &str) -> CoreResult<CleanupPolicy> {
        self.begin_load().await?;
        self.policies
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Cleanup policy", name))
    }

    async fn criteria_by_format(&self) -> CoreResult<Vec<FormatCriteria>> {
        self.begin_load().await?;
        Ok(self.format_criteria.read().await.clone())
    }

    async fn create(&self, policy: &CleanupPolicy) -> CoreResult<()> {
        self.begin_save().await?;
        let mut store = self.policies.write().await;
        if store.contains_key(&policy.name) {
            return Err(already_exists("Cleanup policy", &policy.name));
        }
        store.insert(policy.name.clone(), policy.clone());
        Ok(())
    }

    async fn update(&self, name: &str, policy: &CleanupPolicy) -> CoreResult<()> {
        self.begin_save().await?;
        let mut store = self.policies.write().await;
        let existing = store
            .get_mut(name)
            .ok_or_else(|| CoreError::not_found("Cleanup policy", name))?;
        let in_use_count = existing.in_use_count;
        *existing = CleanupPolicy {
            name: name.to_string(),
            in_use_count,
            ..policy.clone()
        };
        Ok(())
    }

    async fn delete(&self, name: &str) -> CoreResult<()> {
        self.begin_delete().await?;
        self.policies
            .write()
            .await
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| CoreError::not_found("Cleanup policy", name))
    }
}

#[async_trait]
impl RoleApi for InMemoryAdminApi {
    async fn list(&self) -> CoreResult<Vec<Role>> {
        self.begin_load().await?;
        Ok(self.roles.read().await.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> CoreResult<Role> {
        self.begin_load().await?;
        self.roles
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Role", id))
    }

    async fn create(&self, role: &Role) -> CoreResult<()> {
        self.begin_save().await?;
        let mut store = self.roles.write().await;
        if store.contains_key(&role.id) {
            return Err(already_exists("Role", &role.id));
        }
        store.insert(role.id.clone(), role.clone());
        Ok(())
    }

    async fn update(&self, id: &str, role: &Role) -> CoreResult<()> {
        self.begin_save().await?;
        let mut store = self.roles.write().await;
        let existing = store
            .get_mut(id)
            .ok_or_else(|| CoreError::not_found("Role", id))?;
        if existing.read_only {
            return Err(CoreError::ApiError {
                status: 400,
                message: format!("Role '{id}' is read-only"),
            });
        }
        *existing = Role {
            id: id.to_string(),
            ..role.clone()
        };
        Ok(())
    }

    async fn delete(&self, id: &str) -> CoreResult<()> {
        self.begin_delete().await?;
        self.roles
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CoreError::not_found("Role", id))
    }
}

#[async_trait]
impl LdapServerApi for InMemoryAdminApi {
    async fn list(&self) -> CoreResult<Vec<LdapServer>> {
        self.begin_load().await?;
        Ok(self.ldap_servers.read().await.values().cloned().collect())
    }

    async fn delete(&self, name: &str) -> CoreResult<()> {
        self.begin_delete().await?;
        self.ldap_servers
            .write()
            .await
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| CoreError::not_found("LDAP server", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{cleanup_policy, ldap_servers, role};

    #[tokio::test]
    async fn create_then_update_keeps_usage_count() {
        let api = InMemoryAdminApi::new().with_policies(vec![CleanupPolicy {
            in_use_count: 2,
            ..cleanup_policy("weekly", "npm")
        }]);

        let duplicate = CleanupPolicyApi::create(&api, &cleanup_policy("weekly", "npm")).await;
        assert!(matches!(duplicate, Err(CoreError::ApiError { status: 400, .. })));

        let changed = CleanupPolicy {
            notes: "changed".to_string(),
            ..cleanup_policy("weekly", "npm")
        };
        CleanupPolicyApi::update(&api, "weekly", &changed).await.unwrap();

        let stored = CleanupPolicyApi::get(&api, "weekly").await.unwrap();
        assert_eq!(stored.notes, "changed");
        assert_eq!(stored.in_use_count, 2);
        assert_eq!(api.save_calls(), 2);
    }

    #[tokio::test]
    async fn injected_failures_surface_as_errors() {
        let api = InMemoryAdminApi::new().with_roles(vec![role("nx-dev", "Developer")]);
        api.set_fail_load(Some(CoreError::NetworkError("offline".to_string())))
            .await;
        assert!(RoleApi::list(&api).await.is_err());

        api.set_fail_load(None).await;
        assert_eq!(RoleApi::list(&api).await.unwrap().len(), 1);
        assert_eq!(api.load_calls(), 2);
    }

    #[tokio::test]
    async fn read_only_roles_cannot_change() {
        let api = InMemoryAdminApi::new().with_roles(vec![Role {
            read_only: true,
            ..role("nx-admin", "Administrator")
        }]);
        let result = RoleApi::update(&api, "nx-admin", &role("nx-admin", "Root")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn deleting_missing_items_is_not_found() {
        let api = InMemoryAdminApi::new().with_ldap_servers(ldap_servers());
        LdapServerApi::delete(&api, "test #1").await.unwrap();
        assert_eq!(LdapServerApi::list(&api).await.unwrap().len(), 2);

        let missing = LdapServerApi::delete(&api, "test #1").await;
        assert!(matches!(missing, Err(CoreError::NotFound { .. })));
        assert_eq!(api.delete_calls(), 2);
    }
}
