//! Demo data set

use crate::types::{
    AuthScheme, CleanupPolicy, Criterion, FormatCriteria, GroupType, LdapProtocol, LdapServer,
    ReleaseType, Role, MAVEN_FORMAT,
};

pub fn sample_format_criteria() -> Vec<FormatCriteria> {
    use Criterion::{IsPrerelease, LastBlobUpdated, LastDownloaded, Regex, Retain};

    [
        ("*", "All Formats", vec![LastBlobUpdated, LastDownloaded, Regex]),
        ("docker", "Docker", vec![LastBlobUpdated, LastDownloaded, IsPrerelease, Regex]),
        (MAVEN_FORMAT, "Maven2", vec![LastBlobUpdated, LastDownloaded, IsPrerelease, Regex, Retain]),
        ("npm", "npm", vec![LastBlobUpdated, LastDownloaded, IsPrerelease, Regex]),
        ("nuget", "NuGet", vec![LastBlobUpdated, LastDownloaded, IsPrerelease, Regex]),
        ("pypi", "PyPI", vec![LastBlobUpdated, LastDownloaded, IsPrerelease, Regex]),
        ("raw", "Raw", vec![LastBlobUpdated, LastDownloaded, Regex]),
    ]
    .into_iter()
    .map(|(id, name, available_criteria)| FormatCriteria {
        id: id.to_string(),
        name: name.to_string(),
        available_criteria,
    })
    .collect()
}

pub fn sample_cleanup_policies() -> Vec<CleanupPolicy> {
    let policy = |name: &str, format: &str, notes: &str| CleanupPolicy {
        name: name.to_string(),
        format: format.to_string(),
        notes: notes.to_string(),
        ..CleanupPolicy::default()
    };

    vec![
        CleanupPolicy {
            criteria_last_blob_updated: Some(30),
            criteria_release_type: Some(ReleaseType::Prereleases),
            in_use_count: 3,
            ..policy("maven-snapshots-30d", MAVEN_FORMAT, "Snapshots older than a month")
        },
        CleanupPolicy {
            criteria_last_downloaded: Some(365),
            criteria_release_type: Some(ReleaseType::Releases),
            retain: Some(5),
            in_use_count: 1,
            ..policy("maven-releases-keep-5", MAVEN_FORMAT, "")
        },
        CleanupPolicy {
            criteria_last_downloaded: Some(90),
            criteria_asset_regex: Some(".*-SNAPSHOT.*".to_string()),
            ..policy("docker-stale-tags", "docker", "Unpulled snapshot tags")
        },
        CleanupPolicy {
            criteria_last_blob_updated: Some(180),
            in_use_count: 2,
            ..policy("npm-half-year", "npm", "")
        },
        CleanupPolicy {
            criteria_asset_regex: Some("tmp/.*".to_string()),
            ..policy("raw-tmp", "raw", "Scratch uploads")
        },
    ]
}

pub fn sample_roles() -> Vec<Role> {
    let role = |id: &str, name: &str, description: &str| Role {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        source: "default".to_string(),
        ..Role::default()
    };

    let mut roles = vec![
        Role {
            read_only: true,
            privileges: vec!["nx-all".to_string()],
            ..role("nx-admin", "nx-admin", "Administrator Role")
        },
        Role {
            read_only: true,
            privileges: vec![
                "nx-healthcheck-read".to_string(),
                "nx-search-read".to_string(),
                "nx-repository-view-*-*-read".to_string(),
            ],
            ..role("nx-anonymous", "nx-anonymous", "Anonymous Role")
        },
        Role {
            roles: vec!["nx-anonymous".to_string()],
            ..role("developer", "Developer", "Read and deploy to hosted repositories")
        },
        role("deployer", "deployer", "CI deployment account"),
        role("auditor", "Auditor", "Read-only access to settings"),
    ];
    for team in ["alpha", "Beta", "gamma", "Delta", "epsilon", "Zeta", "eta", "Theta"] {
        roles.push(role(
            &format!("team-{}", team.to_lowercase()),
            &format!("{team} team"),
            &format!("Members of the {team} team"),
        ));
    }
    roles
}

pub fn sample_ldap_servers() -> Vec<LdapServer> {
    let server = |name: &str, order: u32, protocol: LdapProtocol, host: &str, port: u16, search_base: &str| {
        LdapServer {
            id: format!("ldap-{order}"),
            name: name.to_string(),
            order,
            protocol,
            host: host.to_string(),
            port,
            search_base: search_base.to_string(),
            auth_scheme: AuthScheme::Simple,
            auth_username: Some(format!("cn=nexus,{search_base}")),
            connection_timeout_seconds: 30,
            connection_retry_delay_seconds: 300,
            max_incidents_count: 3,
            user_base_dn: Some("ou=people".to_string()),
            user_object_class: Some("inetOrgPerson".to_string()),
            user_id_attribute: Some("uid".to_string()),
            user_real_name_attribute: Some("cn".to_string()),
            user_email_address_attribute: Some("mail".to_string()),
            ldap_groups_as_roles: true,
            group_type: GroupType::Dynamic,
            user_member_of_attribute: Some("memberOf".to_string()),
            ..LdapServer::default()
        }
    };

    vec![
        server("corp-ad", 2, LdapProtocol::Ldap, "ad.corp.example", 389, "dc=corp,dc=example"),
        server("primary-ldaps", 1, LdapProtocol::Ldaps, "ldap.example.com", 636, "dc=example,dc=com"),
        server("legacy-openldap", 3, LdapProtocol::Ldap, "10.0.4.12", 10389, "dc=legacy,dc=local"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_roles_span_more_than_one_page() {
        assert!(sample_roles().len() > crate::machine::PAGE_SIZE);
    }

    #[test]
    fn sample_policies_use_known_formats() {
        let formats = sample_format_criteria();
        for policy in sample_cleanup_policies() {
            assert!(formats.iter().any(|format| format.id == policy.format));
        }
    }
}
