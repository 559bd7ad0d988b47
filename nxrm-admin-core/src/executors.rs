//! Executors binding machine requests to the remote API
//!
//! Each request resolves into exactly one completion event. Errors are logged
//! here and handed to the machine as messages.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::error::CoreError;
use crate::machine::{
    CleanupPolicyForm, CleanupPolicyFormMachine, CleanupPolicyLoad, FormDefinition, FormEvent,
    FormRequest, ListEvent, ListMachine, ListRequest, RoleForm, RoleFormMachine, RoleLoad,
};
use crate::runtime::Executor;
use crate::traits::{CleanupPolicyApi, LdapServerApi, RoleApi};
use crate::types::{CleanupPolicy, LdapServer, Role};

fn failure_message(error: &CoreError, context: &str) -> String {
    error.log(context);
    error.to_string()
}

/// Turn a save/delete result into the matching form event
fn form_result<D: FormDefinition>(
    result: CoreResult<()>,
    context: &str,
    ok: FormEvent<D>,
    failed: fn(String) -> FormEvent<D>,
) -> FormEvent<D> {
    match result {
        Ok(()) => ok,
        Err(e) => failed(failure_message(&e, context)),
    }
}

// ===== Cleanup policies =====

/// Cleanup policy form requests
pub struct CleanupPolicyFormExecutor {
    api: Arc<dyn CleanupPolicyApi>,
}

impl CleanupPolicyFormExecutor {
    pub fn new(api: Arc<dyn CleanupPolicyApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Executor<CleanupPolicyFormMachine> for CleanupPolicyFormExecutor {
    async fn execute(&self, request: FormRequest<CleanupPolicyForm>) -> FormEvent<CleanupPolicyForm> {
        match request {
            FormRequest::Load { item_id } => {
                let policy = async {
                    match item_id.as_deref() {
                        Some(name) => self.api.get(name).await.map(Some),
                        None => Ok(None),
                    }
                };
                match futures::try_join!(self.api.criteria_by_format(), policy) {
                    Ok((criteria_by_format, policy)) => FormEvent::LoadSucceeded(CleanupPolicyLoad {
                        criteria_by_format,
                        policy,
                    }),
                    Err(e) => FormEvent::LoadFailed(failure_message(&e, "Load cleanup policy")),
                }
            }
            FormRequest::Save { item_id, payload } => {
                let result = match item_id {
                    Some(name) => self.api.update(&name, &payload).await,
                    None => self.api.create(&payload).await,
                };
                if result.is_ok() {
                    log::info!("Cleanup policy saved: {}", payload.name);
                }
                form_result(result, "Save cleanup policy", FormEvent::SaveSucceeded, FormEvent::SaveFailed)
            }
            FormRequest::Delete { item_id } => {
                let result = self.api.delete(&item_id).await;
                if result.is_ok() {
                    log::info!("Cleanup policy deleted: {item_id}");
                }
                form_result(result, "Delete cleanup policy", FormEvent::DeleteSucceeded, FormEvent::DeleteFailed)
            }
        }
    }
}

/// Cleanup policy list requests
pub struct CleanupPolicyListExecutor {
    api: Arc<dyn CleanupPolicyApi>,
}

impl CleanupPolicyListExecutor {
    pub fn new(api: Arc<dyn CleanupPolicyApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Executor<ListMachine<CleanupPolicy>> for CleanupPolicyListExecutor {
    async fn execute(&self, request: ListRequest) -> ListEvent<CleanupPolicy> {
        match request {
            ListRequest::Load => match self.api.list().await {
                Ok(items) => ListEvent::LoadSucceeded(items),
                Err(e) => ListEvent::LoadFailed(failure_message(&e, "List cleanup policies")),
            },
            ListRequest::Delete { id } => match self.api.delete(&id).await {
                Ok(()) => ListEvent::Deleted(id),
                Err(e) => ListEvent::DeleteFailed(failure_message(&e, "Delete cleanup policy")),
            },
        }
    }
}

// ===== Roles =====

/// Role form requests
pub struct RoleFormExecutor {
    api: Arc<dyn RoleApi>,
}

impl RoleFormExecutor {
    pub fn new(api: Arc<dyn RoleApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Executor<RoleFormMachine> for RoleFormExecutor {
    async fn execute(&self, request: FormRequest<RoleForm>) -> FormEvent<RoleForm> {
        match request {
            FormRequest::Load { item_id } => {
                let role = async {
                    match item_id.as_deref() {
                        Some(id) => self.api.get(id).await.map(Some),
                        None => Ok(None),
                    }
                };
                match futures::try_join!(self.api.list(), role) {
                    Ok((all_roles, role)) => FormEvent::LoadSucceeded(RoleLoad { all_roles, role }),
                    Err(e) => FormEvent::LoadFailed(failure_message(&e, "Load role")),
                }
            }
            FormRequest::Save { item_id, payload } => {
                let result = match item_id {
                    Some(id) => self.api.update(&id, &payload).await,
                    None => self.api.create(&payload).await,
                };
                if result.is_ok() {
                    log::info!("Role saved: {}", payload.id);
                }
                form_result(result, "Save role", FormEvent::SaveSucceeded, FormEvent::SaveFailed)
            }
            FormRequest::Delete { item_id } => {
                let result = self.api.delete(&item_id).await;
                if result.is_ok() {
                    log::info!("Role deleted: {item_id}");
                }
                form_result(result, "Delete role", FormEvent::DeleteSucceeded, FormEvent::DeleteFailed)
            }
        }
    }
}

/// Role list requests
pub struct RoleListExecutor {
    api: Arc<dyn RoleApi>,
}

impl RoleListExecutor {
    pub fn new(api: Arc<dyn RoleApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Executor<ListMachine<Role>> for RoleListExecutor {
    async fn execute(&self, request: ListRequest) -> ListEvent<Role> {
        match request {
            ListRequest::Load => match self.api.list().await {
                Ok(items) => ListEvent::LoadSucceeded(items),
                Err(e) => ListEvent::LoadFailed(failure_message(&e, "List roles")),
            },
            ListRequest::Delete { id } => match self.api.delete(&id).await {
                Ok(()) => ListEvent::Deleted(id),
                Err(e) => ListEvent::DeleteFailed(failure_message(&e, "Delete role")),
            },
        }
    }
}

// ===== LDAP servers =====

/// LDAP server list requests
pub struct LdapServerListExecutor {
    api: Arc<dyn LdapServerApi>,
}

impl LdapServerListExecutor {
    pub fn new(api: Arc<dyn LdapServerApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Executor<ListMachine<LdapServer>> for LdapServerListExecutor {
    async fn execute(&self, request: ListRequest) -> ListEvent<LdapServer> {
        match request {
            ListRequest::Load => match self.api.list().await {
                Ok(items) => ListEvent::LoadSucceeded(items),
                Err(e) => ListEvent::LoadFailed(failure_message(&e, "List LDAP servers")),
            },
            ListRequest::Delete { id } => match self.api.delete(&id).await {
                Ok(()) => {
                    log::info!("LDAP server deleted: {id}");
                    ListEvent::Deleted(id)
                }
                Err(e) => ListEvent::DeleteFailed(failure_message(&e, "Delete LDAP server")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::adapters::InMemoryAdminApi;
    use crate::machine::{
        CleanupPolicyEvent, CleanupPolicyField, FormMachine, FormOutcome, FormPhase, ListPhase,
        RoleField,
    };
    use crate::runtime::Host;
    use crate::test_utils::{cleanup_policy, format_criteria, ldap_servers, sample_roles};
    use crate::types::FeatureFlags;

    fn api() -> Arc<InMemoryAdminApi> {
        Arc::new(
            InMemoryAdminApi::new()
                .with_format_criteria(format_criteria())
                .with_policies(vec![cleanup_policy("npm-weekly", "npm")])
                .with_roles(sample_roles())
                .with_ldap_servers(ldap_servers()),
        )
    }

    fn policy_form(
        api: &Arc<InMemoryAdminApi>,
        item_id: Option<&str>,
        outcomes: &Arc<Mutex<Vec<FormOutcome>>>,
    ) -> Host<CleanupPolicyFormMachine> {
        let seen = Arc::clone(outcomes);
        Host::mount(
            FormMachine::new(CleanupPolicyForm::new(FeatureFlags::default()), item_id.map(str::to_string)),
            Arc::new(CleanupPolicyFormExecutor::new(api.clone())),
            move |outcome| seen.lock().unwrap().push(outcome),
        )
    }

    #[tokio::test]
    async fn submit_without_format_never_reaches_the_server() {
        let api = api();
        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let mut host = policy_form(&api, None, &outcomes);
        host.settle().await;
        assert_eq!(host.machine().phase(), FormPhase::Loaded);

        host.send(FormEvent::Update(CleanupPolicyField::Name, "weekly".to_string()));
        host.send(FormEvent::Submit);
        host.settle().await;

        assert_eq!(api.save_calls(), 0);
        assert!(host.machine().field_error(CleanupPolicyField::Format).is_some());
        assert!(outcomes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_policy_round_trip() {
        let api = api();
        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let mut host = policy_form(&api, None, &outcomes);
        host.settle().await;

        host.send(FormEvent::Update(CleanupPolicyField::Name, "raw-tmp".to_string()));
        host.send(FormEvent::Update(CleanupPolicyField::Format, "raw".to_string()));
        host.send(FormEvent::Custom(CleanupPolicyEvent::SetAssetRegexEnabled(true)));
        host.send(FormEvent::Update(CleanupPolicyField::AssetRegex, "tmp/.*".to_string()));
        host.send(FormEvent::Submit);
        assert_eq!(host.machine().phase(), FormPhase::Saving);
        host.settle().await;

        assert_eq!(host.machine().phase(), FormPhase::Done);
        assert_eq!(*outcomes.lock().unwrap(), vec![FormOutcome::Saved]);
        let stored = CleanupPolicyApi::get(api.as_ref(), "raw-tmp").await.unwrap();
        assert_eq!(stored.criteria_asset_regex.as_deref(), Some("tmp/.*"));
    }

    #[tokio::test]
    async fn delete_finishes_and_notifies_once() {
        let api = api();
        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let mut host = policy_form(&api, Some("npm-weekly"), &outcomes);
        host.settle().await;
        assert!(host.machine().can_delete());

        host.send(FormEvent::ConfirmDelete);
        assert_eq!(host.machine().phase(), FormPhase::Deleting);
        host.settle().await;
        // a stray second completion is ignored
        host.send(FormEvent::DeleteSucceeded);

        assert_eq!(host.machine().phase(), FormPhase::Done);
        assert_eq!(*outcomes.lock().unwrap(), vec![FormOutcome::Deleted]);
        assert_eq!(api.delete_calls(), 1);
    }

    #[tokio::test]
    async fn save_failure_is_recoverable() {
        let api = api();
        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let mut host = policy_form(&api, Some("npm-weekly"), &outcomes);
        host.settle().await;

        api.set_fail_save(Some(CoreError::NetworkError("connection reset".to_string())))
            .await;
        host.send(FormEvent::Update(CleanupPolicyField::Notes, "edited".to_string()));
        host.send(FormEvent::Submit);
        host.settle().await;

        let machine = host.machine();
        assert_eq!(machine.phase(), FormPhase::Error);
        assert!(machine
            .context()
            .save_error
            .as_deref()
            .is_some_and(|message| message.contains("connection reset")));
        assert_eq!(machine.data().notes, "edited");

        api.set_fail_save(None).await;
        host.send(FormEvent::Submit);
        host.settle().await;
        assert_eq!(host.machine().phase(), FormPhase::Done);
        assert_eq!(*outcomes.lock().unwrap(), vec![FormOutcome::Saved]);
    }

    #[tokio::test]
    async fn missing_policy_is_a_load_error() {
        let api = api();
        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let mut host = policy_form(&api, Some("nope"), &outcomes);
        host.settle().await;

        assert_eq!(host.machine().phase(), FormPhase::Error);
        assert!(host.machine().context().load_error.is_some());
        assert!(!host.machine().is_editable());
    }

    #[tokio::test]
    async fn role_form_loads_candidates_and_role() {
        let api = api();
        let done = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&done);
        let mut host = Host::mount(
            FormMachine::new(RoleForm, Some("nx-dev".to_string())),
            Arc::new(RoleFormExecutor::new(api.clone())),
            move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            },
        );
        host.settle().await;

        assert_eq!(host.machine().data().name, "Developer");
        assert_eq!(host.machine().extras().all_roles.len(), sample_roles().len());

        host.send(FormEvent::Update(RoleField::Description, "Builds things".to_string()));
        host.send(FormEvent::Submit);
        host.settle().await;
        assert_eq!(done.load(Ordering::SeqCst), 1);
        assert_eq!(
            RoleApi::get(api.as_ref(), "nx-dev").await.unwrap().description,
            "Builds things"
        );
    }

    #[tokio::test]
    async fn ldap_list_loads_and_deletes() {
        let api = api();
        let mut host = Host::mount(
            ListMachine::<LdapServer>::new(),
            Arc::new(LdapServerListExecutor::new(api.clone())),
            |_| {},
        );
        host.settle().await;
        assert_eq!(host.machine().phase(), ListPhase::Loaded);
        assert_eq!(host.machine().filtered()[0].name, "win-clm01-ads");

        host.send(ListEvent::ConfirmDelete("win-clm01-ads".to_string()));
        host.settle().await;
        assert_eq!(host.machine().items().len(), 2);
        assert_eq!(host.machine().filtered()[0].name, "test #1");
    }
}
