//! HTTP client for the repository manager REST API

mod http;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use url::Url;

use crate::error::{CoreError, CoreResult};
use crate::traits::{CleanupPolicyApi, LdapServerApi, RoleApi};
use crate::types::{CleanupPolicy, FormatCriteria, LdapServer, Role};

const CLEANUP_POLICIES_PATH: &str = "/service/rest/internal/cleanup-policies";
const ROLES_PATH: &str = "/service/rest/v1/security/roles";
const LDAP_PATH: &str = "/service/rest/v1/security/ldap";

/// Default connect timeout (seconds)
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Connection settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server root, e.g. `https://nexus.example.com`
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

/// REST client implementing every remote API trait
pub struct NexusClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl NexusClient {
    /// Build a client; fails on a malformed base URL
    pub fn new(config: ClientConfig) -> CoreResult<Self> {
        let base_url = normalize_base_url(&config.base_url)?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoreError::InvalidConfig(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            username: config.username,
            password: config.password,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .basic_auth(&self.username, Some(&self.password))
            .header(reqwest::header::ACCEPT, "application/json")
    }
}

/// Validate the base URL and strip trailing slashes
fn normalize_base_url(raw: &str) -> CoreResult<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed)
        .map_err(|e| CoreError::InvalidConfig(format!("Invalid server URL '{trimmed}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CoreError::InvalidConfig(format!(
            "Unsupported URL scheme '{}'",
            url.scheme()
        )));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn item_path(collection: &str, id: &str) -> String {
    format!("{collection}/{}", urlencoding::encode(id))
}

#[async_trait]
impl CleanupPolicyApi for NexusClient {
    async fn list(&self) -> CoreResult<Vec<CleanupPolicy>> {
        self.get_json(CLEANUP_POLICIES_PATH, "Cleanup policy", "").await
    }

    async fn get(&self, name: &str) -> CoreResult<CleanupPolicy> {
        self.get_json(&item_path(CLEANUP_POLICIES_PATH, name), "Cleanup policy", name)
            .await
    }

    async fn criteria_by_format(&self) -> CoreResult<Vec<FormatCriteria>> {
        let path = format!("{CLEANUP_POLICIES_PATH}/criteria/formats");
        self.get_json(&path, "Format criteria", "").await
    }

    async fn create(&self, policy: &CleanupPolicy) -> CoreResult<()> {
        self.send_json(Method::POST, CLEANUP_POLICIES_PATH, policy, "Cleanup policy", &policy.name)
            .await
    }

    async fn update(&self, name: &str, policy: &CleanupPolicy) -> CoreResult<()> {
        self.send_json(
            Method::PUT,
            &item_path(CLEANUP_POLICIES_PATH, name),
            policy,
            "Cleanup policy",
            name,
        )
        .await
    }

    async fn delete(&self, name: &str) -> CoreResult<()> {
        self.delete_item(&item_path(CLEANUP_POLICIES_PATH, name), "Cleanup policy", name)
            .await
    }
}

#[async_trait]
impl RoleApi for NexusClient {
    async fn list(&self) -> CoreResult<Vec<Role>> {
        self.get_json(ROLES_PATH, "Role", "").await
    }

    async fn get(&self, id: &str) -> CoreResult<Role> {
        self.get_json(&item_path(ROLES_PATH, id), "Role", id).await
    }

    async fn create(&self, role: &Role) -> CoreResult<()> {
        self.send_json(Method::POST, ROLES_PATH, role, "Role", &role.id)
            .await
    }

    async fn update(&self, id: &str, role: &Role) -> CoreResult<()> {
        self.send_json(Method::PUT, &item_path(ROLES_PATH, id), role, "Role", id)
            .await
    }

    async fn delete(&self, id: &str) -> CoreResult<()> {
        self.delete_item(&item_path(ROLES_PATH, id), "Role", id).await
    }
}

#[async_trait]
impl LdapServerApi for NexusClient {
    async fn list(&self) -> CoreResult<Vec<LdapServer>> {
        self.get_json(LDAP_PATH, "LDAP server", "").await
    }

    async fn delete(&self, name: &str) -> CoreResult<()> {
        self.delete_item(&item_path(LDAP_PATH, name), "LDAP server", name)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ClientConfig {
        ClientConfig {
            base_url: base_url.to_string(),
            username: "admin".to_string(),
            password: "admin123".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn base_url_is_normalized() {
        let client = NexusClient::new(config(" https://nexus.example.com/ ")).unwrap();
        assert_eq!(client.base_url(), "https://nexus.example.com");
        assert_eq!(
            client.url(ROLES_PATH),
            "https://nexus.example.com/service/rest/v1/security/roles"
        );
    }

    #[test]
    fn invalid_base_urls_are_rejected() {
        assert!(matches!(
            NexusClient::new(config("nexus.example.com")),
            Err(CoreError::InvalidConfig(_))
        ));
        assert!(matches!(
            NexusClient::new(config("ftp://nexus.example.com")),
            Err(CoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn ids_are_percent_encoded() {
        assert_eq!(
            item_path(LDAP_PATH, "test #1"),
            "/service/rest/v1/security/ldap/test%20%231"
        );
    }
}
