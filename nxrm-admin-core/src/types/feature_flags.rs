//! Feature flags injected into the views

use serde::{Deserialize, Serialize};

/// Server-side feature flags the admin views depend on.
///
/// Views receive this value at construction instead of reading global state.
/// The console has no endpoint for these, so the values come from the local
/// config and must mirror the server's settings named on each field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureFlags {
    /// `nexus.datastore.enabled`
    pub datastore_enabled: bool,
    /// `datastore.isPostgresql`
    pub postgres_enabled: bool,
    /// `nexus.cleanup.preview.enabled`
    pub cleanup_preview_enabled: bool,
    /// `nexus.cleanup.mavenRetain`
    pub cleanup_maven_retain: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            datastore_enabled: false,
            postgres_enabled: false,
            cleanup_preview_enabled: true,
            cleanup_maven_retain: false,
        }
    }
}

impl FeatureFlags {
    /// Cleanup preview needs both the datastore and the preview flag
    pub fn is_preview_enabled(&self) -> bool {
        self.datastore_enabled && self.cleanup_preview_enabled
    }

    /// Retain-N needs the maven retain flag on a PostgreSQL datastore
    pub fn is_retain_supported(&self) -> bool {
        self.cleanup_maven_retain && self.postgres_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retain_needs_both_flags() {
        let retain_only = FeatureFlags {
            cleanup_maven_retain: true,
            ..FeatureFlags::default()
        };
        assert!(!retain_only.is_retain_supported());
        let on_postgres = FeatureFlags {
            postgres_enabled: true,
            ..retain_only
        };
        assert!(on_postgres.is_retain_supported());
    }

    #[test]
    fn preview_requires_datastore() {
        let flags = FeatureFlags::default();
        assert!(!flags.is_preview_enabled());
    }

    #[test]
    fn deserializes_partial_config() {
        let flags: FeatureFlags = serde_json::from_str(r#"{"postgresEnabled":true}"#).unwrap();
        assert!(flags.postgres_enabled);
        assert!(flags.cleanup_preview_enabled);
    }
}
