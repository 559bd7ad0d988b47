//! Test fixtures and builders

use crate::types::{CleanupPolicy, Criterion, FormatCriteria, LdapServer, Role, MAVEN_FORMAT};

// ===== LDAP servers =====

const LDAP_SERVERS_JSON: &str = r#"[
  {
    "name": "win-clm01.sonatype.dev",
    "protocol": "LDAP",
    "useTrustStore": false,
    "host": "win-clm01.sonatype.dev",
    "port": 389,
    "searchBase": "dc=win,dc=blackforest,dc=local",
    "authScheme": "SIMPLE",
    "authRealm": null,
    "authUsername": "CN=testuser1,CN=Users,DC=win,DC=blackforest,DC=local",
    "connectionTimeoutSeconds": 30,
    "connectionRetryDelaySeconds": 300,
    "maxIncidentsCount": 3,
    "userBaseDn": "cn=users",
    "userSubtree": false,
    "userObjectClass": "user",
    "userLdapFilter": "",
    "userIdAttribute": "sAMAccountName",
    "userRealNameAttribute": "cn",
    "userEmailAddressAttribute": "mail",
    "userPasswordAttribute": "",
    "ldapGroupsAsRoles": true,
    "groupType": "DYNAMIC",
    "groupBaseDn": null,
    "groupSubtree": false,
    "groupObjectClass": null,
    "groupIdAttribute": null,
    "groupMemberAttribute": null,
    "groupMemberFormat": null,
    "userMemberOfAttribute": "memberOf",
    "id": "8b7b5a16-9421-4637-b173-d7210e45220d",
    "order": 3
  },
  {
    "name": "win-clm01-ads",
    "protocol": "LDAP",
    "useTrustStore": false,
    "host": "10.20.6.182",
    "port": 10389,
    "searchBase": "dc=apache,dc=blackforest,dc=local",
    "authScheme": "SIMPLE",
    "authRealm": null,
    "authUsername": "cn=testuser1,ou=users,ou=system",
    "connectionTimeoutSeconds": 30,
    "connectionRetryDelaySeconds": 300,
    "maxIncidentsCount": 3,
    "userBaseDn": "ou=people",
    "userSubtree": false,
    "userObjectClass": "inetOrgPerson",
    "userLdapFilter": "",
    "userIdAttribute": "uid",
    "userRealNameAttribute": "cn",
    "userEmailAddressAttribute": "mail",
    "userPasswordAttribute": "",
    "ldapGroupsAsRoles": true,
    "groupType": "DYNAMIC",
    "groupBaseDn": null,
    "groupSubtree": false,
    "groupObjectClass": null,
    "groupIdAttribute": null,
    "groupMemberAttribute": null,
    "groupMemberFormat": null,
    "userMemberOfAttribute": "memberOf",
    "id": "0c0d7218-8d83-4bfe-904c-2eca6533afbf",
    "order": 1
  },
  {
    "name": "test #1",
    "protocol": "LDAPS",
    "useTrustStore": false,
    "host": "1.1.1.1",
    "port": 10389,
    "searchBase": "dc=apa,dc=black,dc=remote",
    "authScheme": "SIMPLE",
    "authRealm": null,
    "authUsername": "cn=testuser1,ou=users,ou=system",
    "connectionTimeoutSeconds": 30,
    "connectionRetryDelaySeconds": 300,
    "maxIncidentsCount": 3,
    "userBaseDn": "ou=people",
    "userSubtree": false,
    "userObjectClass": "inetOrgPerson",
    "userLdapFilter": "",
    "userIdAttribute": "uid",
    "userRealNameAttribute": "cn",
    "userEmailAddressAttribute": "mail",
    "userPasswordAttribute": "",
    "ldapGroupsAsRoles": true,
    "groupType": "DYNAMIC",
    "groupBaseDn": null,
    "groupSubtree": false,
    "groupObjectClass": null,
    "groupIdAttribute": null,
    "groupMemberAttribute": null,
    "groupMemberFormat": null,
    "userMemberOfAttribute": "memberOf",
    "id": "0c0d7218-8d83-4bfe-904c-2fffasfsa",
    "order": 2
  }
]"#;

/// Three configured servers, deliberately out of `order`
pub fn ldap_servers() -> Vec<LdapServer> {
    serde_json::from_str(LDAP_SERVERS_JSON).unwrap()
}

// ===== Roles =====

pub fn role(id: &str, name: &str) -> Role {
    Role {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{name} role"),
        ..Role::default()
    }
}

pub fn sample_roles() -> Vec<Role> {
    vec![
        Role {
            read_only: true,
            privileges: vec!["nx-all".to_string()],
            ..role("nx-admin", "Administrator")
        },
        Role {
            read_only: true,
            privileges: vec!["nx-search-read".to_string(), "nx-healthcheck-read".to_string()],
            ..role("nx-anonymous", "Anonymous")
        },
        role("nx-dev", "Developer"),
        role("nx-deployer", "deployer"),
        role("nx-viewer", "Viewer"),
    ]
}

// ===== Cleanup policies =====

pub fn cleanup_policy(name: &str, format: &str) -> CleanupPolicy {
    CleanupPolicy {
        name: name.to_string(),
        format: format.to_string(),
        notes: String::new(),
        ..CleanupPolicy::default()
    }
}

/// `maven2` supports everything, `npm` has no retain, `raw` has no release type
pub fn format_criteria() -> Vec<FormatCriteria> {
    let format = |id: &str, name: &str, available_criteria: &[Criterion]| FormatCriteria {
        id: id.to_string(),
        name: name.to_string(),
        available_criteria: available_criteria.to_vec(),
    };
    vec![
        format(
            MAVEN_FORMAT,
            "Maven2",
            &[
                Criterion::LastBlobUpdated,
                Criterion::LastDownloaded,
                Criterion::IsPrerelease,
                Criterion::Regex,
                Criterion::Retain,
            ],
        ),
        format(
            "npm",
            "npm",
            &[
                Criterion::LastBlobUpdated,
                Criterion::LastDownloaded,
                Criterion::IsPrerelease,
                Criterion::Regex,
            ],
        ),
        format(
            "raw",
            "Raw",
            &[
                Criterion::LastBlobUpdated,
                Criterion::LastDownloaded,
                Criterion::Regex,
            ],
        ),
    ]
}
