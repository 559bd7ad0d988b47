//! Generic create/edit form machine
//!
//! ```text
//! loading ──ok──▶ loaded ──submit──▶ saving ──ok──▶ done
//!    │  ▲            │  ▲               │
//!  fail retry        │  └────reset──────┤fail
//!    ▼  │     confirm-delete            ▼
//!  error ◀────── deleting ◀────────── error (save)
//! ```
//!
//! A [`FormDefinition`] supplies the form-specific parts: how loaded data
//! becomes a draft, how field edits and custom events change it, validation
//! and the submission payload.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Debug;

use crate::runtime::{Command, Commands, Machine};

/// Form-specific behavior plugged into [`FormMachine`]
pub trait FormDefinition: 'static {
    /// Text fields of the form
    type Field: Copy + Ord + Debug + Send + 'static;
    /// Editable draft (field values and toggles)
    type Data: Clone + PartialEq + Debug + Default + Send + 'static;
    /// Read-only data loaded with the form (option lists, metadata)
    type Extras: Clone + Debug + Default + Send + 'static;
    /// Load result
    type Loaded: Send + 'static;
    /// Form-specific events (toggles, selects)
    type Event: Debug + Send + 'static;
    /// Submission payload
    type Payload: Debug + Send + 'static;

    /// Resource name used in log messages
    const KIND: &'static str;

    /// Build the draft and extras from the load result
    fn apply_loaded(&self, loaded: Self::Loaded, is_edit: bool) -> (Self::Data, Self::Extras);

    /// Merge one field value into the draft
    fn update_field(&self, data: &mut Self::Data, field: Self::Field, value: String);

    /// Apply a form-specific event
    fn apply_event(&self, data: &mut Self::Data, extras: &Self::Extras, event: Self::Event);

    /// Validate the draft; an empty map means the form may be submitted
    fn validate(
        &self,
        data: &Self::Data,
        extras: &Self::Extras,
        is_edit: bool,
    ) -> BTreeMap<Self::Field, String>;

    /// Build the payload from a valid draft
    fn to_payload(&self, data: &Self::Data, extras: &Self::Extras) -> Self::Payload;

    /// Fields that cannot change once the item exists
    fn is_immutable(&self, _field: Self::Field, _is_edit: bool) -> bool {
        false
    }
}

/// Form lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Loading,
    Loaded,
    Saving,
    Deleting,
    /// Load, save or delete failed; see `load_error` / `save_error`
    Error,
    /// Terminal: the host closes the form
    Done,
}

/// Terminal outcome reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Saved,
    Deleted,
}

/// Form events
#[derive(Debug)]
pub enum FormEvent<D: FormDefinition> {
    LoadSucceeded(D::Loaded),
    LoadFailed(String),
    /// Set a text field
    Update(D::Field, String),
    Custom(D::Event),
    Submit,
    SaveSucceeded,
    SaveFailed(String),
    /// Delete after the user confirmed (edit mode only)
    ConfirmDelete,
    DeleteSucceeded,
    DeleteFailed(String),
    /// Reload after a load failure, or dismiss a save failure
    Retry,
    /// Discard edits
    Reset,
}

/// Remote work requested by the form
#[derive(Debug)]
pub enum FormRequest<D: FormDefinition> {
    Load {
        item_id: Option<String>,
    },
    /// `item_id` is `None` when creating
    Save {
        item_id: Option<String>,
        payload: D::Payload,
    },
    Delete {
        item_id: String,
    },
}

/// Mutable form context
pub struct FormContext<D: FormDefinition> {
    /// Baseline the draft is compared and reset against
    pub pristine_data: D::Data,
    pub data: D::Data,
    pub extras: D::Extras,
    pub load_error: Option<String>,
    pub save_error: Option<String>,
    pub validation_errors: BTreeMap<D::Field, String>,
    touched: BTreeSet<D::Field>,
    submit_attempted: bool,
}

impl<D: FormDefinition> Default for FormContext<D> {
    fn default() -> Self {
        Self {
            pristine_data: D::Data::default(),
            data: D::Data::default(),
            extras: D::Extras::default(),
            load_error: None,
            save_error: None,
            validation_errors: BTreeMap::new(),
            touched: BTreeSet::new(),
            submit_attempted: false,
        }
    }
}

/// Create/edit form state machine
pub struct FormMachine<D: FormDefinition> {
    definition: D,
    item_id: Option<String>,
    phase: FormPhase,
    context: FormContext<D>,
}

impl<D: FormDefinition> FormMachine<D> {
    /// # Arguments
    /// * `definition` - Form-specific behavior
    /// * `item_id` - Item to edit; `None` or empty creates a new item
    pub fn new(definition: D, item_id: Option<String>) -> Self {
        Self {
            definition,
            item_id: item_id.filter(|id| !id.is_empty()),
            phase: FormPhase::Loading,
            context: FormContext::default(),
        }
    }

    pub fn definition(&self) -> &D {
        &self.definition
    }

    pub fn item_id(&self) -> Option<&str> {
        self.item_id.as_deref()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn context(&self) -> &FormContext<D> {
        &self.context
    }

    pub fn data(&self) -> &D::Data {
        &self.context.data
    }

    pub fn extras(&self) -> &D::Extras {
        &self.context.extras
    }

    pub fn is_edit(&self) -> bool {
        self.item_id.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FormPhase::Loading
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, FormPhase::Saving | FormPhase::Deleting)
    }

    pub fn is_pristine(&self) -> bool {
        self.context.data == self.context.pristine_data
    }

    /// Whether the draft is shown and editable
    pub fn is_editable(&self) -> bool {
        match self.phase {
            FormPhase::Loaded => true,
            FormPhase::Error => self.context.load_error.is_none(),
            _ => false,
        }
    }

    pub fn can_submit(&self) -> bool {
        self.is_editable() && self.context.validation_errors.is_empty()
    }

    pub fn can_delete(&self) -> bool {
        self.is_edit() && self.is_editable()
    }

    pub fn is_immutable(&self, field: D::Field) -> bool {
        self.definition.is_immutable(field, self.is_edit())
    }

    /// Inline error for a field, shown once it was edited or a submit was attempted
    pub fn field_error(&self, field: D::Field) -> Option<&str> {
        if !self.context.submit_attempted && !self.context.touched.contains(&field) {
            return None;
        }
        self.context.validation_errors.get(&field).map(String::as_str)
    }

    fn load(&mut self) -> Commands<Self> {
        self.phase = FormPhase::Loading;
        self.context.load_error = None;
        vec![Command::Request(FormRequest::Load {
            item_id: self.item_id.clone(),
        })]
    }

    fn revalidate(&mut self) {
        self.context.validation_errors =
            self.definition
                .validate(&self.context.data, &self.context.extras, self.is_edit());
    }

    fn ignored(&self, event: &str) -> Commands<Self> {
        log::debug!(
            "{} form ignored {event} in phase {:?}",
            D::KIND,
            self.phase
        );
        Vec::new()
    }
}

impl<D: FormDefinition> Machine for FormMachine<D> {
    type Event = FormEvent<D>;
    type Request = FormRequest<D>;
    type Output = FormOutcome;

    fn start(&mut self) -> Commands<Self> {
        self.load()
    }

    fn update(&mut self, event: FormEvent<D>) -> Commands<Self> {
        match event {
            FormEvent::LoadSucceeded(loaded) => {
                if self.phase != FormPhase::Loading {
                    return self.ignored("load result");
                }
                let (data, extras) = self.definition.apply_loaded(loaded, self.is_edit());
                self.context.pristine_data = data.clone();
                self.context.data = data;
                self.context.extras = extras;
                self.context.touched.clear();
                self.context.submit_attempted = false;
                self.revalidate();
                self.phase = FormPhase::Loaded;
                Vec::new()
            }
            FormEvent::LoadFailed(message) => {
                if self.phase != FormPhase::Loading {
                    return self.ignored("load failure");
                }
                self.context.load_error = Some(message);
                self.phase = FormPhase::Error;
                Vec::new()
            }
            FormEvent::Update(field, value) => {
                if !self.is_editable() {
                    return self.ignored("field update");
                }
                if self.is_immutable(field) {
                    log::debug!("{} form field {field:?} is read-only", D::KIND);
                    return Vec::new();
                }
                self.definition
                    .update_field(&mut self.context.data, field, value);
                self.context.touched.insert(field);
                self.revalidate();
                Vec::new()
            }
            FormEvent::Custom(event) => {
                if !self.is_editable() {
                    return self.ignored("custom event");
                }
                self.definition
                    .apply_event(&mut self.context.data, &self.context.extras, event);
                self.revalidate();
                Vec::new()
            }
            FormEvent::Submit => {
                if !self.is_editable() {
                    return self.ignored("submit");
                }
                self.context.submit_attempted = true;
                self.revalidate();
                if !self.context.validation_errors.is_empty() {
                    log::debug!(
                        "{} form has {} invalid field(s)",
                        D::KIND,
                        self.context.validation_errors.len()
                    );
                    return Vec::new();
                }
                let payload = self
                    .definition
                    .to_payload(&self.context.data, &self.context.extras);
                self.context.save_error = None;
                self.phase = FormPhase::Saving;
                vec![Command::Request(FormRequest::Save {
                    item_id: self.item_id.clone(),
                    payload,
                })]
            }
            FormEvent::SaveSucceeded => {
                if self.phase != FormPhase::Saving {
                    return self.ignored("save result");
                }
                self.context.pristine_data = self.context.data.clone();
                self.phase = FormPhase::Done;
                vec![Command::Notify(FormOutcome::Saved)]
            }
            FormEvent::SaveFailed(message) | FormEvent::DeleteFailed(message) => {
                if !self.is_busy() {
                    return self.ignored("save/delete failure");
                }
                self.context.save_error = Some(message);
                self.phase = FormPhase::Error;
                Vec::new()
            }
            FormEvent::ConfirmDelete => {
                let Some(item_id) = self.item_id.clone() else {
                    return self.ignored("delete in create mode");
                };
                if !self.is_editable() {
                    return self.ignored("delete");
                }
                self.context.save_error = None;
                self.phase = FormPhase::Deleting;
                vec![Command::Request(FormRequest::Delete { item_id })]
            }
            FormEvent::DeleteSucceeded => {
                if self.phase != FormPhase::Deleting {
                    return self.ignored("delete result");
                }
                self.phase = FormPhase::Done;
                vec![Command::Notify(FormOutcome::Deleted)]
            }
            FormEvent::Retry => {
                if self.phase != FormPhase::Error {
                    return self.ignored("retry");
                }
                if self.context.load_error.is_some() {
                    return self.load();
                }
                self.context.save_error = None;
                self.phase = FormPhase::Loaded;
                Vec::new()
            }
            FormEvent::Reset => {
                if !self.is_editable() {
                    return self.ignored("reset");
                }
                self.context.data = self.context.pristine_data.clone();
                self.context.touched.clear();
                self.context.submit_attempted = false;
                self.context.save_error = None;
                self.phase = FormPhase::Loaded;
                self.revalidate();
                Vec::new()
            }
        }
    }
}
