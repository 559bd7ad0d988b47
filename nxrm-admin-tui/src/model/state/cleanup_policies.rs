//! Cleanup policy pages state

use nxrm_admin_core::machine::{
    CleanupPolicyDraft, CleanupPolicyEvent, CleanupPolicyField, CleanupPolicyFormMachine,
};
use nxrm_admin_core::types::{CleanupPolicy, Criterion, ReleaseType};
use nxrm_admin_core::Host;

use super::ListPageState;

/// Rows of the cleanup policy form, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyFormRow {
    Name,
    /// Select over the known formats
    Format,
    Notes,
    /// Checkbox plus day count
    LastBlobUpdated,
    /// Checkbox plus day count
    LastDownloaded,
    /// Checkbox plus pattern
    AssetRegex,
    /// Select: any / releases / pre-releases
    ReleaseType,
    /// Checkbox plus number of versions kept
    Retain,
}

impl PolicyFormRow {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Format => "Format",
            Self::Notes => "Notes",
            Self::LastBlobUpdated => "Component Age (days)",
            Self::LastDownloaded => "Component Usage (days)",
            Self::ReleaseType => "Release Type",
            Self::AssetRegex => "Asset Name Matcher",
            Self::Retain => "Retain N Versions",
        }
    }

    /// Text field edited on this row
    pub fn field(self) -> Option<CleanupPolicyField> {
        match self {
            Self::Name => Some(CleanupPolicyField::Name),
            Self::Notes => Some(CleanupPolicyField::Notes),
            Self::LastBlobUpdated => Some(CleanupPolicyField::LastBlobUpdated),
            Self::LastDownloaded => Some(CleanupPolicyField::LastDownloaded),
            Self::AssetRegex => Some(CleanupPolicyField::AssetRegex),
            Self::Retain => Some(CleanupPolicyField::Retain),
            Self::Format | Self::ReleaseType => None,
        }
    }

    /// Current text of the row
    pub fn value(self, draft: &CleanupPolicyDraft) -> &str {
        match self {
            Self::Name => &draft.name,
            Self::Format => &draft.format,
            Self::Notes => &draft.notes,
            Self::LastBlobUpdated => &draft.last_blob_updated,
            Self::LastDownloaded => &draft.last_downloaded,
            Self::ReleaseType => draft.release_type.map_or("Any", ReleaseType::label),
            Self::AssetRegex => &draft.asset_regex,
            Self::Retain => &draft.retain,
        }
    }

    /// Whether the row carries a criteria checkbox
    pub fn has_checkbox(self) -> bool {
        matches!(
            self,
            Self::LastBlobUpdated | Self::LastDownloaded | Self::AssetRegex | Self::Retain
        )
    }

    pub fn is_select(self) -> bool {
        matches!(self, Self::Format | Self::ReleaseType)
    }

    /// Checkbox state of the row in `machine`
    pub fn is_checked(self, machine: &CleanupPolicyFormMachine) -> bool {
        let draft = machine.data();
        match self {
            Self::LastBlobUpdated => draft.last_blob_updated_enabled,
            Self::LastDownloaded => draft.last_downloaded_enabled,
            Self::AssetRegex => draft.asset_regex_enabled,
            Self::Retain => draft.exclusion_enabled,
            _ => false,
        }
    }

    /// Whether the row accepts input; a shown Retain row waits for release versions
    pub fn is_enabled(self, machine: &CleanupPolicyFormMachine) -> bool {
        match self {
            Self::Retain => machine.is_exclusion_available(),
            _ => true,
        }
    }

    /// Info shown under a disabled row
    pub fn disabled_note(self) -> Option<&'static str> {
        match self {
            Self::Retain => Some("Requires release versions as the release type"),
            _ => None,
        }
    }

    /// Event flipping the row's checkbox
    pub fn toggle_event(self, machine: &CleanupPolicyFormMachine) -> Option<CleanupPolicyEvent> {
        if !self.is_enabled(machine) {
            return None;
        }
        let enabled = !self.is_checked(machine);
        match self {
            Self::LastBlobUpdated => Some(CleanupPolicyEvent::SetLastBlobUpdatedEnabled(enabled)),
            Self::LastDownloaded => Some(CleanupPolicyEvent::SetLastDownloadedEnabled(enabled)),
            Self::AssetRegex => Some(CleanupPolicyEvent::SetAssetRegexEnabled(enabled)),
            Self::Retain => Some(CleanupPolicyEvent::SetExclusionEnabled(enabled)),
            _ => None,
        }
    }

    /// Rows shown for the current draft; criteria rows follow the format
    pub fn visible(machine: &CleanupPolicyFormMachine) -> Vec<Self> {
        let mut rows = vec![Self::Name, Self::Format, Self::Notes];
        if machine.is_field_applicable(Criterion::LastBlobUpdated) {
            rows.push(Self::LastBlobUpdated);
        }
        if machine.is_field_applicable(Criterion::LastDownloaded) {
            rows.push(Self::LastDownloaded);
        }
        if machine.is_field_applicable(Criterion::Regex) {
            rows.push(Self::AssetRegex);
        }
        if machine.is_field_applicable(Criterion::IsPrerelease) {
            rows.push(Self::ReleaseType);
        }
        if machine.show_retain_n() {
            rows.push(Self::Retain);
        }
        rows
    }
}

/// Mounted cleanup policy form
pub struct PolicyFormState {
    pub host: Host<CleanupPolicyFormMachine>,
    pub focus: PolicyFormRow,
}

impl PolicyFormState {
    pub fn new(host: Host<CleanupPolicyFormMachine>) -> Self {
        Self {
            host,
            focus: PolicyFormRow::Name,
        }
    }

    pub fn machine(&self) -> &CleanupPolicyFormMachine {
        self.host.machine()
    }

    pub fn visible_rows(&self) -> Vec<PolicyFormRow> {
        PolicyFormRow::visible(self.machine())
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_previous(&mut self) {
        self.move_focus(-1);
    }

    /// Keep the focus on a visible row after the draft changed
    pub fn clamp_focus(&mut self) {
        if !self.visible_rows().contains(&self.focus) {
            self.focus = PolicyFormRow::Format;
        }
    }

    fn move_focus(&mut self, step: isize) {
        let rows = self.visible_rows();
        let current = rows.iter().position(|row| *row == self.focus).unwrap_or(0);
        let next = (current as isize + step).rem_euclid(rows.len() as isize) as usize;
        self.focus = rows[next];
    }
}

/// Cleanup policy list and form
#[derive(Default)]
pub struct CleanupPoliciesState {
    pub list: ListPageState<CleanupPolicy>,
    pub form: Option<PolicyFormState>,
}

impl CleanupPoliciesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close_form(&mut self) {
        if let Some(form) = self.form.take() {
            form.host.unmount();
        }
    }

    pub fn pump(&mut self) -> usize {
        let form = self.form.as_mut().map_or(0, |form| form.host.pump());
        self.list.pump() + form
    }
}
