//! Cleanup policy type definitions

use serde::{Deserialize, Serialize};

/// Format id of Maven 2 repositories, the only format with retain-N support
pub const MAVEN_FORMAT: &str = "maven2";

/// Release type criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseType {
    Releases,
    Prereleases,
}

impl ReleaseType {
    /// All selectable values, in display order
    pub const ALL: [ReleaseType; 2] = [ReleaseType::Releases, ReleaseType::Prereleases];

    pub fn label(self) -> &'static str {
        match self {
            Self::Releases => "Release Versions",
            Self::Prereleases => "Pre-Release / Snapshot Versions",
        }
    }
}

/// A criterion a repository format may support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Criterion {
    LastBlobUpdated,
    LastDownloaded,
    IsPrerelease,
    Regex,
    Retain,
    /// Criterion this client does not know about
    #[serde(other)]
    Unknown,
}

/// Criteria available for one repository format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatCriteria {
    /// Format id (`maven2`, `npm`, `*` for all formats)
    pub id: String,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub available_criteria: Vec<Criterion>,
}

impl FormatCriteria {
    pub fn supports(&self, criterion: Criterion) -> bool {
        self.available_criteria.contains(&criterion)
    }
}

/// Cleanup policy as exchanged with the remote API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupPolicy {
    pub name: String,
    pub format: String,
    #[serde(default)]
    pub notes: String,
    /// Component last updated more than N days ago
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria_last_blob_updated: Option<u32>,
    /// Component last downloaded more than N days ago
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria_last_downloaded: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria_release_type: Option<ReleaseType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria_asset_regex: Option<String>,
    /// Keep the N most recent versions (exclusion criteria)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retain: Option<u32>,
    /// Number of repositories using the policy (read-only)
    #[serde(default, skip_serializing)]
    pub in_use_count: u32,
}

impl CleanupPolicy {
    /// Short human summary of the active criteria, used by list views
    pub fn criteria_summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(days) = self.criteria_last_blob_updated {
            parts.push(format!("updated > {days}d"));
        }
        if let Some(days) = self.criteria_last_downloaded {
            parts.push(format!("downloaded > {days}d"));
        }
        if let Some(release_type) = self.criteria_release_type {
            parts.push(release_type.label().to_string());
        }
        if let Some(ref regex) = self.criteria_asset_regex {
            parts.push(format!("/{regex}/"));
        }
        if let Some(retain) = self.retain {
            parts.push(format!("keep {retain}"));
        }
        if parts.is_empty() {
            "no criteria".to_string()
        } else {
            parts.join(", ")
        }
    }
}
