//! Backend layer: remote API wiring, config and credentials
//!
//! `Backend` owns the API handles (HTTP client or in-memory demo store) and
//! mounts the core machines the pages run. Completion callbacks post
//! `AppMessage`s into the application channel.

mod config_service;
mod credential_service;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use nxrm_admin_core::adapters::InMemoryAdminApi;
use nxrm_admin_core::client::NexusClient;
use nxrm_admin_core::executors::{
    CleanupPolicyFormExecutor, CleanupPolicyListExecutor, LdapServerListExecutor, RoleFormExecutor,
    RoleListExecutor,
};
use nxrm_admin_core::machine::{
    CleanupPolicyForm, CleanupPolicyFormMachine, FormMachine, FormOutcome, ListMachine, RoleForm,
    RoleFormMachine, RoleSelection, RoleSelectionOutcome,
};
use nxrm_admin_core::runtime::Inert;
use nxrm_admin_core::types::{CleanupPolicy, LdapServer, Role};
use nxrm_admin_core::{CleanupPolicyApi, FeatureFlags, Host, LdapServerApi, RoleApi};
use tokio::sync::mpsc::UnboundedSender;

pub use config_service::{AppConfig, ConfigService, FileConfigService, ServerConfig};
pub use credential_service::{resolve_password, KeyringPasswordStore, PasswordStore, PASSWORD_ENV};

use crate::message::AppMessage;
use crate::model::Page;

/// Artificial latency of the demo store, so busy states are visible
const DEMO_LATENCY: Duration = Duration::from_millis(250);

/// Where the data comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionMode {
    Demo,
    Remote { base_url: String, username: String },
}

impl fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Demo => write!(f, "demo (in-memory sample data)"),
            Self::Remote { base_url, username } => write!(f, "{username} @ {base_url}"),
        }
    }
}

/// API handles plus the flags injected into every view
#[derive(Clone)]
pub struct Backend {
    pub mode: ConnectionMode,
    pub flags: FeatureFlags,
    cleanup_policies: Arc<dyn CleanupPolicyApi>,
    roles: Arc<dyn RoleApi>,
    ldap_servers: Arc<dyn LdapServerApi>,
}

impl Backend {
    /// In-memory sample data
    pub fn demo(flags: FeatureFlags) -> Self {
        Self::with_store(
            Arc::new(InMemoryAdminApi::with_sample_data().with_latency(DEMO_LATENCY)),
            flags,
        )
    }

    /// Any in-memory store, e.g. one seeded by tests
    pub fn with_store(store: Arc<InMemoryAdminApi>, flags: FeatureFlags) -> Self {
        Self {
            mode: ConnectionMode::Demo,
            flags,
            cleanup_policies: store.clone(),
            roles: store.clone(),
            ldap_servers: store,
        }
    }

    /// REST client against a configured server
    pub fn remote(server: &ServerConfig, password: String, flags: FeatureFlags) -> Result<Self> {
        let client = Arc::new(NexusClient::new(server.client_config(password))?);
        Ok(Self {
            mode: ConnectionMode::Remote {
                base_url: client.base_url().to_string(),
                username: server.username.clone(),
            },
            flags,
            cleanup_policies: client.clone(),
            roles: client.clone(),
            ldap_servers: client,
        })
    }

    /// Pick the backend for the loaded config
    ///
    /// # Arguments
    /// * `config` - Loaded application config
    /// * `demo` - Force demo mode
    /// * `store` - Password store consulted for remote mode
    /// * `remember` - Persist a password taken from the environment
    pub fn from_config(
        config: &AppConfig,
        demo: bool,
        store: &dyn PasswordStore,
        remember: bool,
    ) -> Result<Self> {
        match (&config.server, demo) {
            (Some(server), false) => {
                let password = resolve_password(store, server, std::env::var(PASSWORD_ENV).ok(), remember)?;
                Self::remote(server, password, config.flags())
                    .with_context(|| format!("Cannot connect to {}", server.base_url))
            }
            (None, false) => {
                log::warn!("No server configured, starting in demo mode");
                Ok(Self::demo(config.flags()))
            }
            (_, true) => Ok(Self::demo(config.flags())),
        }
    }

    // ========== Lists ==========

    pub fn cleanup_policy_list(&self) -> Host<ListMachine<CleanupPolicy>> {
        Host::mount(
            ListMachine::new(),
            Arc::new(CleanupPolicyListExecutor::new(self.cleanup_policies.clone())),
            |_| {},
        )
    }

    pub fn role_list(&self) -> Host<ListMachine<Role>> {
        Host::mount(
            ListMachine::new(),
            Arc::new(RoleListExecutor::new(self.roles.clone())),
            |_| {},
        )
    }

    pub fn ldap_server_list(&self) -> Host<ListMachine<LdapServer>> {
        Host::mount(
            ListMachine::new(),
            Arc::new(LdapServerListExecutor::new(self.ldap_servers.clone())),
            |_| {},
        )
    }

    // ========== Forms ==========

    /// Cleanup policy form; `name` is `None` in create mode
    pub fn cleanup_policy_form(
        &self,
        name: Option<String>,
        messages: UnboundedSender<AppMessage>,
    ) -> Host<CleanupPolicyFormMachine> {
        Host::mount(
            FormMachine::new(CleanupPolicyForm::new(self.flags), name),
            Arc::new(CleanupPolicyFormExecutor::new(self.cleanup_policies.clone())),
            form_closed(Page::CleanupPolicies, messages),
        )
    }

    /// Role form; `id` is `None` in create mode
    pub fn role_form(&self, id: Option<String>, messages: UnboundedSender<AppMessage>) -> Host<RoleFormMachine> {
        Host::mount(
            FormMachine::new(RoleForm, id),
            Arc::new(RoleFormExecutor::new(self.roles.clone())),
            form_closed(Page::Roles, messages),
        )
    }

    // ========== Modals ==========

    /// Role selection over `roles`, starting from `selected`
    pub fn role_selection(
        roles: &[Role],
        selected: &[String],
        messages: UnboundedSender<AppMessage>,
    ) -> Host<RoleSelection> {
        Host::mount(
            RoleSelection::from_roles(roles, selected.iter().cloned()),
            Arc::new(Inert),
            move |outcome: RoleSelectionOutcome| post(&messages, AppMessage::RoleSelectionClosed(outcome)),
        )
    }
}

fn form_closed(list_page: Page, messages: UnboundedSender<AppMessage>) -> impl FnOnce(FormOutcome) + Send + 'static {
    move |outcome| post(&messages, AppMessage::FormClosed { list_page, outcome })
}

fn post(messages: &UnboundedSender<AppMessage>, msg: AppMessage) {
    if messages.send(msg).is_err() {
        log::debug!("Application channel closed, message dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_flag_overrides_configured_server() {
        let config = AppConfig {
            server: Some(ServerConfig {
                base_url: "https://nexus.example.com".to_string(),
                username: "admin".to_string(),
                timeout_secs: 30,
            }),
            ..AppConfig::default()
        };
        let backend = Backend::from_config(&config, true, &KeyringPasswordStore, false).unwrap();
        assert_eq!(backend.mode, ConnectionMode::Demo);
    }

    #[test]
    fn remote_mode_reports_normalized_url() {
        let server = ServerConfig {
            base_url: "https://nexus.example.com/".to_string(),
            username: "admin".to_string(),
            timeout_secs: 30,
        };
        let backend = Backend::remote(&server, "secret".to_string(), FeatureFlags::default()).unwrap();
        assert_eq!(
            backend.mode,
            ConnectionMode::Remote {
                base_url: "https://nexus.example.com".to_string(),
                username: "admin".to_string(),
            }
        );
        assert!(Backend::remote(
            &ServerConfig {
                base_url: "not a url".to_string(),
                ..server
            },
            String::new(),
            FeatureFlags::default()
        )
        .is_err());
    }
}
