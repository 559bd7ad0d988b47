//! Cleanup policy form

use std::collections::BTreeMap;

use super::form::{FormDefinition, FormMachine};
use super::validation::{self, MAX_CRITERIA_DAYS};
use crate::types::{CleanupPolicy, Criterion, FeatureFlags, FormatCriteria, ReleaseType, MAVEN_FORMAT};

/// Cleanup policy form machine
pub type CleanupPolicyFormMachine = FormMachine<CleanupPolicyForm>;

/// Text fields of the cleanup policy form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CleanupPolicyField {
    Name,
    Format,
    Notes,
    LastBlobUpdated,
    LastDownloaded,
    AssetRegex,
    Retain,
}

/// Criteria toggles and the release type select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupPolicyEvent {
    SetLastBlobUpdatedEnabled(bool),
    SetLastDownloadedEnabled(bool),
    SetAssetRegexEnabled(bool),
    SetExclusionEnabled(bool),
    UpdateReleaseType(Option<ReleaseType>),
}

/// Editable policy draft.
///
/// Criteria values stay in the draft while their toggle is off so that
/// re-enabling restores them; the payload leaves them out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupPolicyDraft {
    pub name: String,
    pub format: String,
    pub notes: String,
    pub last_blob_updated: String,
    pub last_downloaded: String,
    pub release_type: Option<ReleaseType>,
    pub asset_regex: String,
    pub retain: String,
    pub last_blob_updated_enabled: bool,
    pub last_downloaded_enabled: bool,
    pub asset_regex_enabled: bool,
    pub exclusion_enabled: bool,
}

/// Data loaded when the form mounts
#[derive(Debug, Clone, Default)]
pub struct CleanupPolicyLoad {
    pub criteria_by_format: Vec<FormatCriteria>,
    /// Existing policy in edit mode
    pub policy: Option<CleanupPolicy>,
}

#[derive(Debug, Clone, Default)]
pub struct CleanupPolicyExtras {
    pub criteria_by_format: Vec<FormatCriteria>,
}

/// Cleanup policy form behavior
#[derive(Debug, Clone, Copy)]
pub struct CleanupPolicyForm {
    flags: FeatureFlags,
}

impl CleanupPolicyForm {
    pub fn new(flags: FeatureFlags) -> Self {
        Self { flags }
    }

    pub fn flags(&self) -> FeatureFlags {
        self.flags
    }

    /// Whether the draft's format supports `criterion`
    pub fn is_field_applicable(
        draft: &CleanupPolicyDraft,
        extras: &CleanupPolicyExtras,
        criterion: Criterion,
    ) -> bool {
        extras
            .criteria_by_format
            .iter()
            .any(|format| format.id == draft.format && format.supports(criterion))
    }

    /// Retain-N exclusion is offered for Maven on a PostgreSQL datastore
    pub fn show_retain_n(&self, draft: &CleanupPolicyDraft) -> bool {
        self.flags.is_retain_supported() && draft.format == MAVEN_FORMAT
    }

    /// The exclusion toggle only applies to release versions
    pub fn is_exclusion_available(draft: &CleanupPolicyDraft) -> bool {
        draft.release_type == Some(ReleaseType::Releases)
    }

    fn is_enabled(draft: &CleanupPolicyDraft, extras: &CleanupPolicyExtras, field: CleanupPolicyField) -> bool {
        let (enabled, criterion) = match field {
            CleanupPolicyField::LastBlobUpdated => {
                (draft.last_blob_updated_enabled, Criterion::LastBlobUpdated)
            }
            CleanupPolicyField::LastDownloaded => {
                (draft.last_downloaded_enabled, Criterion::LastDownloaded)
            }
            CleanupPolicyField::AssetRegex => (draft.asset_regex_enabled, Criterion::Regex),
            CleanupPolicyField::Name | CleanupPolicyField::Format | CleanupPolicyField::Notes => {
                return true
            }
            CleanupPolicyField::Retain => return false,
        };
        enabled && Self::is_field_applicable(draft, extras, criterion)
    }

    /// Retain-N is shown and switched on, so it is edited and validated
    fn is_retain_active(&self, draft: &CleanupPolicyDraft) -> bool {
        draft.exclusion_enabled && self.show_retain_n(draft) && Self::is_exclusion_available(draft)
    }

    /// Retain-N goes into the payload. Flags only hide the section, so a
    /// loaded value survives while its toggle and release type stay on.
    fn is_retain_submitted(draft: &CleanupPolicyDraft) -> bool {
        draft.exclusion_enabled && draft.format == MAVEN_FORMAT && Self::is_exclusion_available(draft)
    }
}

fn optional_number(value: Option<u32>) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

impl FormDefinition for CleanupPolicyForm {
    type Field = CleanupPolicyField;
    type Data = CleanupPolicyDraft;
    type Extras = CleanupPolicyExtras;
    type Loaded = CleanupPolicyLoad;
    type Event = CleanupPolicyEvent;
    type Payload = CleanupPolicy;

    const KIND: &'static str = "Cleanup policy";

    fn apply_loaded(
        &self,
        loaded: CleanupPolicyLoad,
        _is_edit: bool,
    ) -> (CleanupPolicyDraft, CleanupPolicyExtras) {
        let extras = CleanupPolicyExtras {
            criteria_by_format: loaded.criteria_by_format,
        };
        let Some(policy) = loaded.policy else {
            return (CleanupPolicyDraft::default(), extras);
        };

        let draft = CleanupPolicyDraft {
            last_blob_updated_enabled: policy.criteria_last_blob_updated.is_some(),
            last_downloaded_enabled: policy.criteria_last_downloaded.is_some(),
            asset_regex_enabled: policy.criteria_asset_regex.is_some(),
            exclusion_enabled: policy.retain.is_some(),
            last_blob_updated: optional_number(policy.criteria_last_blob_updated),
            last_downloaded: optional_number(policy.criteria_last_downloaded),
            retain: optional_number(policy.retain),
            asset_regex: policy.criteria_asset_regex.unwrap_or_default(),
            release_type: policy.criteria_release_type,
            name: policy.name,
            format: policy.format,
            notes: policy.notes,
        };
        (draft, extras)
    }

    fn update_field(&self, data: &mut CleanupPolicyDraft, field: CleanupPolicyField, value: String) {
        match field {
            CleanupPolicyField::Name => data.name = value,
            CleanupPolicyField::Format => data.format = value,
            CleanupPolicyField::Notes => data.notes = value,
            CleanupPolicyField::LastBlobUpdated => data.last_blob_updated = value,
            CleanupPolicyField::LastDownloaded => data.last_downloaded = value,
            CleanupPolicyField::AssetRegex => data.asset_regex = value,
            CleanupPolicyField::Retain => data.retain = value,
        }
    }

    fn apply_event(
        &self,
        data: &mut CleanupPolicyDraft,
        _extras: &CleanupPolicyExtras,
        event: CleanupPolicyEvent,
    ) {
        match event {
            CleanupPolicyEvent::SetLastBlobUpdatedEnabled(checked) => {
                data.last_blob_updated_enabled = checked;
            }
            CleanupPolicyEvent::SetLastDownloadedEnabled(checked) => {
                data.last_downloaded_enabled = checked;
            }
            CleanupPolicyEvent::SetAssetRegexEnabled(checked) => data.asset_regex_enabled = checked,
            CleanupPolicyEvent::SetExclusionEnabled(checked) => {
                if checked && !Self::is_exclusion_available(data) {
                    log::debug!("Exclusion criteria need release versions");
                    return;
                }
                data.exclusion_enabled = checked;
            }
            CleanupPolicyEvent::UpdateReleaseType(release_type) => {
                data.release_type = release_type;
                if !Self::is_exclusion_available(data) {
                    data.exclusion_enabled = false;
                }
            }
        }
    }

    fn validate(
        &self,
        data: &CleanupPolicyDraft,
        extras: &CleanupPolicyExtras,
        _is_edit: bool,
    ) -> BTreeMap<CleanupPolicyField, String> {
        let mut errors = BTreeMap::new();
        let mut check = |field, error: Option<String>| {
            if let Some(error) = error {
                errors.insert(field, error);
            }
        };

        check(CleanupPolicyField::Name, validation::name(&data.name));
        check(CleanupPolicyField::Format, validation::required(&data.format));

        for (field, value) in [
            (CleanupPolicyField::LastBlobUpdated, &data.last_blob_updated),
            (CleanupPolicyField::LastDownloaded, &data.last_downloaded),
        ] {
            if Self::is_enabled(data, extras, field) {
                check(field, validation::integer_in_range(value, 1, MAX_CRITERIA_DAYS));
            }
        }
        if Self::is_enabled(data, extras, CleanupPolicyField::AssetRegex) {
            check(CleanupPolicyField::AssetRegex, validation::required(&data.asset_regex));
        }
        if self.is_retain_active(data) {
            check(CleanupPolicyField::Retain, validation::integer_at_least(&data.retain, 1));
        }
        errors
    }

    fn to_payload(&self, data: &CleanupPolicyDraft, extras: &CleanupPolicyExtras) -> CleanupPolicy {
        let days = |field, value: &str| {
            Self::is_enabled(data, extras, field)
                .then(|| validation::parse_integer(value))
                .flatten()
        };

        CleanupPolicy {
            name: data.name.trim().to_string(),
            format: data.format.clone(),
            notes: data.notes.clone(),
            criteria_last_blob_updated: days(CleanupPolicyField::LastBlobUpdated, data.last_blob_updated.as_str()),
            criteria_last_downloaded: days(CleanupPolicyField::LastDownloaded, data.last_downloaded.as_str()),
            criteria_release_type: data
                .release_type
                .filter(|_| Self::is_field_applicable(data, extras, Criterion::IsPrerelease)),
            criteria_asset_regex: Self::is_enabled(data, extras, CleanupPolicyField::AssetRegex)
                .then(|| data.asset_regex.clone()),
            retain: Self::is_retain_submitted(data)
                .then(|| validation::parse_integer(&data.retain))
                .flatten(),
            in_use_count: 0,
        }
    }

    fn is_immutable(&self, field: CleanupPolicyField, is_edit: bool) -> bool {
        is_edit && field == CleanupPolicyField::Name
    }
}

impl FormMachine<CleanupPolicyForm> {
    pub fn is_field_applicable(&self, criterion: Criterion) -> bool {
        CleanupPolicyForm::is_field_applicable(self.data(), self.extras(), criterion)
    }

    /// Whether the criteria section is shown at all
    pub fn is_any_field_applicable(&self) -> bool {
        [
            Criterion::LastBlobUpdated,
            Criterion::LastDownloaded,
            Criterion::IsPrerelease,
            Criterion::Regex,
        ]
        .into_iter()
        .any(|criterion| self.is_field_applicable(criterion))
    }

    pub fn show_retain_n(&self) -> bool {
        self.definition().show_retain_n(self.data())
    }

    pub fn is_exclusion_available(&self) -> bool {
        CleanupPolicyForm::is_exclusion_available(self.data())
    }

    /// Dry-run / preview panel
    pub fn show_preview(&self) -> bool {
        self.definition().flags().is_preview_enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::form::{FormEvent, FormPhase, FormRequest};
    use crate::runtime::{Command, Machine};
    use crate::test_utils::{cleanup_policy, format_criteria};

    fn retain_flags() -> FeatureFlags {
        FeatureFlags {
            postgres_enabled: true,
            cleanup_maven_retain: true,
            ..FeatureFlags::default()
        }
    }

    fn mounted(flags: FeatureFlags, policy: Option<CleanupPolicy>) -> CleanupPolicyFormMachine {
        let item_id = policy.as_ref().map(|p| p.name.clone());
        let mut machine = FormMachine::new(CleanupPolicyForm::new(flags), item_id);
        machine.start();
        machine.update(FormEvent::LoadSucceeded(CleanupPolicyLoad {
            criteria_by_format: format_criteria(),
            policy,
        }));
        assert_eq!(machine.phase(), FormPhase::Loaded);
        machine
    }

    fn set(machine: &mut CleanupPolicyFormMachine, field: CleanupPolicyField, value: &str) {
        machine.update(FormEvent::Update(field, value.to_string()));
    }

    fn submitted_payload(machine: &mut CleanupPolicyFormMachine) -> CleanupPolicy {
        let commands = machine.update(FormEvent::Submit);
        match commands.into_iter().next() {
            Some(Command::Request(FormRequest::Save { payload, .. })) => payload,
            other => panic!("expected a save request, got {other:?}"),
        }
    }

    #[test]
    fn missing_format_blocks_submit() {
        let mut machine = mounted(FeatureFlags::default(), None);
        set(&mut machine, CleanupPolicyField::Name, "weekly");

        let commands = machine.update(FormEvent::Submit);
        assert!(commands.is_empty());
        assert_eq!(machine.phase(), FormPhase::Loaded);
        assert_eq!(
            machine.field_error(CleanupPolicyField::Format),
            Some(validation::REQUIRED)
        );
    }

    #[test]
    fn reenabled_criterion_keeps_its_value() {
        let mut machine = mounted(FeatureFlags::default(), None);
        set(&mut machine, CleanupPolicyField::Name, "weekly");
        set(&mut machine, CleanupPolicyField::Format, "npm");
        machine.update(FormEvent::Custom(CleanupPolicyEvent::SetLastBlobUpdatedEnabled(true)));
        set(&mut machine, CleanupPolicyField::LastBlobUpdated, "30");

        machine.update(FormEvent::Custom(CleanupPolicyEvent::SetLastBlobUpdatedEnabled(false)));
        assert_eq!(machine.data().last_blob_updated, "30");
        machine.update(FormEvent::Custom(CleanupPolicyEvent::SetLastBlobUpdatedEnabled(true)));
        assert_eq!(machine.data().last_blob_updated, "30");

        let payload = submitted_payload(&mut machine);
        assert_eq!(payload.criteria_last_blob_updated, Some(30));
    }

    #[test]
    fn disabled_criteria_never_reach_the_payload() {
        let mut machine = mounted(FeatureFlags::default(), None);
        set(&mut machine, CleanupPolicyField::Name, "weekly");
        set(&mut machine, CleanupPolicyField::Format, "npm");
        machine.update(FormEvent::Custom(CleanupPolicyEvent::SetLastDownloadedEnabled(true)));
        set(&mut machine, CleanupPolicyField::LastDownloaded, "90");
        machine.update(FormEvent::Custom(CleanupPolicyEvent::SetAssetRegexEnabled(true)));
        set(&mut machine, CleanupPolicyField::AssetRegex, ".*\\.tgz");
        machine.update(FormEvent::Custom(CleanupPolicyEvent::SetLastDownloadedEnabled(false)));

        let payload = submitted_payload(&mut machine);
        assert_eq!(payload.criteria_last_downloaded, None);
        assert_eq!(payload.criteria_asset_regex.as_deref(), Some(".*\\.tgz"));
    }

    #[test]
    fn disabled_criteria_are_not_validated() {
        let mut machine = mounted(FeatureFlags::default(), None);
        set(&mut machine, CleanupPolicyField::Name, "weekly");
        set(&mut machine, CleanupPolicyField::Format, "npm");
        set(&mut machine, CleanupPolicyField::LastBlobUpdated, "not a number");
        assert!(machine.can_submit());

        machine.update(FormEvent::Custom(CleanupPolicyEvent::SetLastBlobUpdatedEnabled(true)));
        assert!(!machine.can_submit());
        assert!(machine.field_error(CleanupPolicyField::LastBlobUpdated).is_some());
    }

    #[test]
    fn day_criteria_are_range_checked() {
        let mut machine = mounted(FeatureFlags::default(), None);
        set(&mut machine, CleanupPolicyField::Name, "weekly");
        set(&mut machine, CleanupPolicyField::Format, "npm");
        machine.update(FormEvent::Custom(CleanupPolicyEvent::SetLastDownloadedEnabled(true)));

        set(&mut machine, CleanupPolicyField::LastDownloaded, "24856");
        assert!(!machine.can_submit());
        set(&mut machine, CleanupPolicyField::LastDownloaded, "24855");
        assert!(machine.can_submit());
    }

    #[test]
    fn criteria_follow_the_selected_format() {
        let mut machine = mounted(FeatureFlags::default(), None);
        assert!(!machine.is_any_field_applicable());

        set(&mut machine, CleanupPolicyField::Format, "raw");
        assert!(machine.is_field_applicable(Criterion::Regex));
        assert!(!machine.is_field_applicable(Criterion::IsPrerelease));

        set(&mut machine, CleanupPolicyField::Name, "raw-files");
        machine.update(FormEvent::Custom(CleanupPolicyEvent::UpdateReleaseType(Some(
            ReleaseType::Prereleases,
        ))));
        let payload = submitted_payload(&mut machine);
        assert_eq!(payload.criteria_release_type, None);
    }

    #[test]
    fn retain_n_needs_maven_on_postgres() {
        let mut plain = mounted(FeatureFlags::default(), None);
        set(&mut plain, CleanupPolicyField::Format, MAVEN_FORMAT);
        assert!(!plain.show_retain_n());

        let mut machine = mounted(retain_flags(), None);
        set(&mut machine, CleanupPolicyField::Format, "npm");
        assert!(!machine.show_retain_n());
        set(&mut machine, CleanupPolicyField::Format, MAVEN_FORMAT);
        assert!(machine.show_retain_n());
    }

    #[test]
    fn exclusion_requires_release_versions() {
        let mut machine = mounted(retain_flags(), None);
        set(&mut machine, CleanupPolicyField::Name, "maven-releases");
        set(&mut machine, CleanupPolicyField::Format, MAVEN_FORMAT);

        machine.update(FormEvent::Custom(CleanupPolicyEvent::SetExclusionEnabled(true)));
        assert!(!machine.data().exclusion_enabled);

        machine.update(FormEvent::Custom(CleanupPolicyEvent::UpdateReleaseType(Some(
            ReleaseType::Releases,
        ))));
        machine.update(FormEvent::Custom(CleanupPolicyEvent::SetExclusionEnabled(true)));
        assert!(machine.data().exclusion_enabled);
        assert!(machine.field_error(CleanupPolicyField::Retain).is_none());
        assert!(!machine.can_submit());

        set(&mut machine, CleanupPolicyField::Retain, "0");
        assert!(machine.field_error(CleanupPolicyField::Retain).is_some());
        set(&mut machine, CleanupPolicyField::Retain, "3");
        assert!(machine.can_submit());

        machine.update(FormEvent::Custom(CleanupPolicyEvent::UpdateReleaseType(Some(
            ReleaseType::Prereleases,
        ))));
        assert!(!machine.data().exclusion_enabled);
        let payload = submitted_payload(&mut machine);
        assert_eq!(payload.retain, None);
        assert_eq!(payload.criteria_release_type, Some(ReleaseType::Prereleases));
    }

    #[test]
    fn edit_mode_derives_toggles_and_locks_the_name() {
        let policy = CleanupPolicy {
            criteria_last_downloaded: Some(60),
            criteria_asset_regex: Some("snapshots/.*".to_string()),
            ..cleanup_policy("maven-weekly", MAVEN_FORMAT)
        };
        let mut machine = mounted(FeatureFlags::default(), Some(policy));

        assert!(machine.is_edit());
        assert!(machine.data().last_downloaded_enabled);
        assert!(machine.data().asset_regex_enabled);
        assert!(!machine.data().last_blob_updated_enabled);
        assert!(machine.is_immutable(CleanupPolicyField::Name));

        set(&mut machine, CleanupPolicyField::Name, "renamed");
        assert_eq!(machine.data().name, "maven-weekly");
        assert!(machine.is_pristine());

        let commands = machine.update(FormEvent::Submit);
        assert!(matches!(
            commands.as_slice(),
            [Command::Request(FormRequest::Save { item_id: Some(id), payload })]
                if id == "maven-weekly" && payload.criteria_last_downloaded == Some(60)
        ));
    }

    /// Edit `policy`, touch only the notes and return what gets saved
    fn resubmitted(flags: FeatureFlags, policy: CleanupPolicy) -> CleanupPolicy {
        let mut machine = mounted(flags, Some(policy));
        set(&mut machine, CleanupPolicyField::Notes, "touched");
        assert!(!machine.is_pristine());
        submitted_payload(&mut machine)
    }

    #[test]
    fn hidden_retain_survives_an_unrelated_edit() {
        let policy = CleanupPolicy {
            criteria_release_type: Some(ReleaseType::Releases),
            retain: Some(5),
            ..cleanup_policy("maven-releases-keep-5", MAVEN_FORMAT)
        };
        let mut machine = mounted(FeatureFlags::default(), Some(policy));
        assert!(!machine.show_retain_n());
        assert!(machine.data().exclusion_enabled);

        set(&mut machine, CleanupPolicyField::Notes, "keep the last five");
        let payload = submitted_payload(&mut machine);
        assert_eq!(payload.retain, Some(5));
        assert_eq!(payload.criteria_release_type, Some(ReleaseType::Releases));
        assert_eq!(payload.notes, "keep the last five");
    }

    #[test]
    fn visible_retain_survives_an_unrelated_edit() {
        let policy = CleanupPolicy {
            criteria_release_type: Some(ReleaseType::Releases),
            retain: Some(3),
            ..cleanup_policy("maven-releases-keep-3", MAVEN_FORMAT)
        };
        let payload = resubmitted(retain_flags(), policy);
        assert_eq!(payload.retain, Some(3));
    }

    #[test]
    fn retain_is_dropped_once_release_type_changes() {
        let policy = CleanupPolicy {
            criteria_release_type: Some(ReleaseType::Releases),
            retain: Some(5),
            ..cleanup_policy("maven-releases-keep-5", MAVEN_FORMAT)
        };
        let mut machine = mounted(FeatureFlags::default(), Some(policy));
        machine.update(FormEvent::Custom(CleanupPolicyEvent::UpdateReleaseType(None)));
        let payload = submitted_payload(&mut machine);
        assert_eq!(payload.retain, None);
    }

    #[test]
    fn last_blob_updated_survives_an_unrelated_edit() {
        let policy = CleanupPolicy {
            criteria_last_blob_updated: Some(14),
            ..cleanup_policy("npm-stale", "npm")
        };
        let payload = resubmitted(FeatureFlags::default(), policy);
        assert_eq!(payload.criteria_last_blob_updated, Some(14));
        assert_eq!(payload.criteria_last_downloaded, None);
    }

    #[test]
    fn last_downloaded_survives_an_unrelated_edit() {
        let policy = CleanupPolicy {
            criteria_last_downloaded: Some(180),
            ..cleanup_policy("npm-unused", "npm")
        };
        let payload = resubmitted(FeatureFlags::default(), policy);
        assert_eq!(payload.criteria_last_downloaded, Some(180));
        assert_eq!(payload.criteria_last_blob_updated, None);
    }

    #[test]
    fn regex_survives_an_unrelated_edit() {
        let policy = CleanupPolicy {
            criteria_asset_regex: Some("tmp/.*".to_string()),
            ..cleanup_policy("raw-tmp", "raw")
        };
        let payload = resubmitted(FeatureFlags::default(), policy);
        assert_eq!(payload.criteria_asset_regex.as_deref(), Some("tmp/.*"));
    }

    #[test]
    fn release_type_survives_an_unrelated_edit() {
        let policy = CleanupPolicy {
            criteria_release_type: Some(ReleaseType::Prereleases),
            criteria_last_blob_updated: Some(30),
            ..cleanup_policy("maven-snapshots", MAVEN_FORMAT)
        };
        let payload = resubmitted(FeatureFlags::default(), policy);
        assert_eq!(payload.criteria_release_type, Some(ReleaseType::Prereleases));
        assert_eq!(payload.criteria_last_blob_updated, Some(30));
        assert_eq!(payload.retain, None);
    }

    #[test]
    fn preview_follows_flags() {
        let machine = mounted(FeatureFlags::default(), None);
        assert!(!machine.show_preview());

        let flags = FeatureFlags {
            datastore_enabled: true,
            ..FeatureFlags::default()
        };
        assert!(mounted(flags, None).show_preview());
    }
}
