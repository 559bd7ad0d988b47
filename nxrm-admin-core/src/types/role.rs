//! Role type definitions

use serde::{Deserialize, Serialize};

/// Security role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Realm the role comes from (`default`, `LDAP`, ...)
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub privileges: Vec<String>,
    /// Ids of contained roles
    #[serde(default)]
    pub roles: Vec<String>,
}

fn default_source() -> String {
    "default".to_string()
}
