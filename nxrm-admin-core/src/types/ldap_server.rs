//! LDAP server type definitions

use serde::{Deserialize, Serialize};

/// Connection protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LdapProtocol {
    #[default]
    Ldap,
    Ldaps,
}

impl LdapProtocol {
    pub fn scheme(self) -> &'static str {
        match self {
            Self::Ldap => "ldap",
            Self::Ldaps => "ldaps",
        }
    }
}

/// Bind authentication scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthScheme {
    None,
    #[default]
    Simple,
    DigestMd5,
    CramMd5,
}

/// Group mapping strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GroupType {
    #[serde(rename = "STATIC", alias = "static")]
    Static,
    #[default]
    #[serde(rename = "DYNAMIC", alias = "dynamic")]
    Dynamic,
}

/// LDAP server connection and user/group mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LdapServer {
    pub id: String,
    pub name: String,
    /// Position in the realm's lookup order (lower first)
    pub order: u32,

    // === Connection ===
    pub protocol: LdapProtocol,
    #[serde(default)]
    pub use_trust_store: bool,
    pub host: String,
    pub port: u16,
    pub search_base: String,
    pub auth_scheme: AuthScheme,
    #[serde(default)]
    pub auth_realm: Option<String>,
    #[serde(default)]
    pub auth_username: Option<String>,
    pub connection_timeout_seconds: u32,
    pub connection_retry_delay_seconds: u32,
    pub max_incidents_count: u32,

    // === User mapping ===
    #[serde(default)]
    pub user_base_dn: Option<String>,
    #[serde(default)]
    pub user_subtree: bool,
    #[serde(default)]
    pub user_object_class: Option<String>,
    #[serde(default)]
    pub user_ldap_filter: Option<String>,
    #[serde(default)]
    pub user_id_attribute: Option<String>,
    #[serde(default)]
    pub user_real_name_attribute: Option<String>,
    #[serde(default)]
    pub user_email_address_attribute: Option<String>,
    #[serde(default)]
    pub user_password_attribute: Option<String>,

    // === Group mapping ===
    #[serde(default)]
    pub ldap_groups_as_roles: bool,
    #[serde(default)]
    pub group_type: GroupType,
    #[serde(default)]
    pub group_base_dn: Option<String>,
    #[serde(default)]
    pub group_subtree: bool,
    #[serde(default)]
    pub group_object_class: Option<String>,
    #[serde(default)]
    pub group_id_attribute: Option<String>,
    #[serde(default)]
    pub group_member_attribute: Option<String>,
    #[serde(default)]
    pub group_member_format: Option<String>,
    #[serde(default)]
    pub user_member_of_attribute: Option<String>,
}

impl LdapServer {
    /// `ldaps://host:port/searchBase`
    pub fn url(&self) -> String {
        format!(
            "{}://{}:{}/{}",
            self.protocol.scheme(),
            self.host,
            self.port,
            self.search_base
        )
    }
}

/// Preset user and group mapping for common directory layouts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAndGroupTemplate {
    pub name: &'static str,
    pub user_base_dn: Option<&'static str>,
    pub user_object_class: &'static str,
    pub user_id_attribute: &'static str,
    pub user_real_name_attribute: &'static str,
    pub user_email_address_attribute: &'static str,
    pub group_type: GroupType,
    pub group_base_dn: Option<&'static str>,
    pub group_object_class: Option<&'static str>,
    pub group_id_attribute: Option<&'static str>,
    pub group_member_attribute: Option<&'static str>,
    pub group_member_format: Option<&'static str>,
    pub user_member_of_attribute: Option<&'static str>,
}

impl UserAndGroupTemplate {
    /// Copy the template's mapping onto a server record
    pub fn apply_to(&self, server: &mut LdapServer) {
        let owned = |value: Option<&'static str>| value.map(str::to_string);
        server.user_base_dn = owned(self.user_base_dn);
        server.user_subtree = false;
        server.user_object_class = Some(self.user_object_class.to_string());
        server.user_ldap_filter = None;
        server.user_id_attribute = Some(self.user_id_attribute.to_string());
        server.user_real_name_attribute = Some(self.user_real_name_attribute.to_string());
        server.user_email_address_attribute = Some(self.user_email_address_attribute.to_string());
        server.user_password_attribute = None;
        server.ldap_groups_as_roles = true;
        server.group_type = self.group_type;
        server.group_base_dn = owned(self.group_base_dn);
        server.group_subtree = false;
        server.group_object_class = owned(self.group_object_class);
        server.group_id_attribute = owned(self.group_id_attribute);
        server.group_member_attribute = owned(self.group_member_attribute);
        server.group_member_format = owned(self.group_member_format);
        server.user_member_of_attribute = owned(self.user_member_of_attribute);
    }
}

/// First built-in template whose mapping the server uses unchanged
pub fn matching_template(server: &LdapServer) -> Option<UserAndGroupTemplate> {
    user_and_group_templates().into_iter().find(|template| {
        let mut applied = server.clone();
        template.apply_to(&mut applied);
        applied == *server
    })
}

/// Built-in user and group templates
pub fn user_and_group_templates() -> Vec<UserAndGroupTemplate> {
    let dynamic = |name, user_base_dn, user_object_class, user_id_attribute| UserAndGroupTemplate {
        name,
        user_base_dn,
        user_object_class,
        user_id_attribute,
        user_real_name_attribute: "cn",
        user_email_address_attribute: "mail",
        group_type: GroupType::Dynamic,
        group_base_dn: None,
        group_object_class: None,
        group_id_attribute: None,
        group_member_attribute: None,
        group_member_format: None,
        user_member_of_attribute: Some("memberOf"),
    };

    vec![
        dynamic("Active Directory", Some("cn=users"), "user", "sAMAccountName"),
        UserAndGroupTemplate {
            name: "Posix with Static Groups",
            user_base_dn: Some("ou=people"),
            user_object_class: "posixAccount",
            user_id_attribute: "uid",
            user_real_name_attribute: "cn",
            user_email_address_attribute: "mail",
            group_type: GroupType::Static,
            group_base_dn: Some("ou=groups"),
            group_object_class: Some("posixGroup"),
            group_id_attribute: Some("cn"),
            group_member_attribute: Some("memberUid"),
            group_member_format: Some("${username}"),
            user_member_of_attribute: None,
        },
        dynamic(
            "Posix with Dynamic Groups",
            Some("ou=people"),
            "posixAccount",
            "uid",
        ),
        dynamic("Generic Ldap Server", None, "inetOrgPerson", "uid"),
    ]
}
