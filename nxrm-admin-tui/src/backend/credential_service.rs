//! Credential service
//!
//! Passwords live in the OS keyring (service `nxrm-admin`, user
//! `<username>@<host>`) or come from `NXRM_ADMIN_PASSWORD`:
//! - Windows: Credential Manager
//! - macOS: Keychain
//! - Linux: Secret Service (GNOME Keyring / KWallet)

use keyring::Entry;

use super::config_service::ServerConfig;

const SERVICE_NAME: &str = "nxrm-admin";

/// Environment variable consulted before the keyring
pub const PASSWORD_ENV: &str = "NXRM_ADMIN_PASSWORD";

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Keyring access failed: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("No password for {0}: set {PASSWORD_ENV} or store one with --remember-password")]
    Missing(String),
}

/// Password storage
pub trait PasswordStore: Send + Sync {
    fn get(&self, account: &str) -> Result<Option<String>, CredentialError>;

    fn set(&self, account: &str, password: &str) -> Result<(), CredentialError>;
}

/// Password storage backed by the OS keyring
pub struct KeyringPasswordStore;

impl PasswordStore for KeyringPasswordStore {
    fn get(&self, account: &str) -> Result<Option<String>, CredentialError> {
        let entry = Entry::new(SERVICE_NAME, account)?;
        match entry.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, account: &str, password: &str) -> Result<(), CredentialError> {
        Entry::new(SERVICE_NAME, account)?.set_password(password)?;
        Ok(())
    }
}

/// Keyring user for a server
pub fn account_key(server: &ServerConfig) -> String {
    format!("{}@{}", server.username, server.host())
}

/// Find the password for `server`.
///
/// `env_password` wins over the store; with `remember` set it is also
/// written to the store.
pub fn resolve_password(
    store: &dyn PasswordStore,
    server: &ServerConfig,
    env_password: Option<String>,
    remember: bool,
) -> Result<String, CredentialError> {
    let account = account_key(server);

    if let Some(password) = env_password.filter(|p| !p.is_empty()) {
        if remember {
            store.set(&account, &password)?;
            log::info!("Stored password for {account} in the keyring");
        }
        return Ok(password);
    }

    store.get(&account)?.ok_or(CredentialError::Missing(account))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct MemoryStore(Mutex<HashMap<String, String>>);

    impl PasswordStore for MemoryStore {
        fn get(&self, account: &str) -> Result<Option<String>, CredentialError> {
            Ok(self.0.lock().unwrap().get(account).cloned())
        }

        fn set(&self, account: &str, password: &str) -> Result<(), CredentialError> {
            self.0
                .lock()
                .unwrap()
                .insert(account.to_string(), password.to_string());
            Ok(())
        }
    }

    fn server() -> ServerConfig {
        ServerConfig {
            base_url: "https://nexus.example.com/".to_string(),
            username: "admin".to_string(),
            timeout_secs: 30,
        }
    }

    #[test]
    fn account_key_uses_host() {
        assert_eq!(account_key(&server()), "admin@nexus.example.com");
    }

    #[test]
    fn environment_wins_and_can_be_remembered() {
        let store = MemoryStore::default();
        store.set("admin@nexus.example.com", "old").unwrap();

        let password = resolve_password(&store, &server(), Some("new".to_string()), false).unwrap();
        assert_eq!(password, "new");
        assert_eq!(store.get("admin@nexus.example.com").unwrap().as_deref(), Some("old"));

        resolve_password(&store, &server(), Some("new".to_string()), true).unwrap();
        assert_eq!(store.get("admin@nexus.example.com").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn falls_back_to_store_then_fails() {
        let store = MemoryStore::default();
        assert!(matches!(
            resolve_password(&store, &server(), Some(String::new()), false),
            Err(CredentialError::Missing(account)) if account == "admin@nexus.example.com"
        ));

        store.set("admin@nexus.example.com", "secret").unwrap();
        assert_eq!(resolve_password(&store, &server(), None, false).unwrap(), "secret");
    }
}
